mod snyk;

pub use snyk::{SnykClient, DEFAULT_API_URL};

use crate::error::Result;
use crate::model::{PackageCoordinate, PackageIssues};
use async_trait::async_trait;

/// Tests a published package for known vulnerabilities and license issues.
#[async_trait]
pub trait PackageScanner: Send + Sync {
    fn name(&self) -> &'static str;
    async fn scan_package(&self, coordinate: &PackageCoordinate) -> Result<PackageIssues>;
}
