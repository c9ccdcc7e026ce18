use crate::error::Result;
use crate::inputs::ARCHIVE_EXTENSIONS;
use crate::model::{IdentificationMethod, PackageCoordinate};
use crate::search::PackageSearch;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Identifies an archive by guessing `artifact-version` from its file name.
///
/// The name is split on its last `-`, so `my-lib-core-1.0.jar` becomes
/// artifact `my-lib-core`, version `1.0`. Classifier suffixes such as
/// `-sources` end up as the version.
pub struct FilenameHeuristic {
    search: Arc<dyn PackageSearch>,
}

impl FilenameHeuristic {
    pub fn new(search: Arc<dyn PackageSearch>) -> Self {
        Self { search }
    }
}

/// Splits an archive path into `(artifact_id, version)` on the last `-` of
/// its file name, dropping a trailing archive extension from the version.
///
/// Returns `None` when the file name contains no `-`.
pub fn split_filename(archive: &str) -> Option<(String, String)> {
    let file_name = archive
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(archive);

    let dash = file_name.rfind('-')?;
    let artifact_id = &file_name[..dash];
    let rest = &file_name[dash + 1..];

    let version = ARCHIVE_EXTENSIONS
        .iter()
        .find_map(|ext| rest.strip_suffix(*ext))
        .unwrap_or(rest);

    Some((artifact_id.to_string(), version.to_string()))
}

#[async_trait]
impl super::IdentificationStrategy for FilenameHeuristic {
    fn method(&self) -> IdentificationMethod {
        IdentificationMethod::Filename
    }

    async fn identify(&self, archive: &Path) -> Result<Vec<PackageCoordinate>> {
        let name = archive.to_string_lossy();
        let Some((artifact_id, version)) = split_filename(&name) else {
            warn!("Found file without version ({}), cannot guess coordinates", name);
            return Ok(Vec::new());
        };

        debug!(
            "Guessed artifact {} version {} from {}",
            artifact_id, version, name
        );
        self.search
            .search_by_artifact_version(&artifact_id, &version)
            .await
    }
}
