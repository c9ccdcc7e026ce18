//! Package search lookups used to resolve archives to coordinates.

mod maven;

pub use maven::{MavenCentralClient, DEFAULT_SEARCH_URL};

use crate::error::Result;
use crate::model::PackageCoordinate;
use async_trait::async_trait;

/// A read-only index of published artifacts.
#[async_trait]
pub trait PackageSearch: Send + Sync {
    /// Artifacts whose recorded SHA-1 equals `sha1` (lowercase hex).
    async fn search_by_sha1(&self, sha1: &str) -> Result<Vec<PackageCoordinate>>;

    /// Artifacts with the given artifact id and version, in any group.
    async fn search_by_artifact_version(
        &self,
        artifact_id: &str,
        version: &str,
    ) -> Result<Vec<PackageCoordinate>>;
}
