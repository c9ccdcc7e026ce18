use crate::error::Result;
use crate::model::{IdentificationMethod, PackageCoordinate};
use crate::search::PackageSearch;
use async_trait::async_trait;
use sha1::{Digest, Sha1};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Bytes read per block while hashing.
const HASH_BLOCK_SIZE: usize = 8 * 1024;

/// Identifies an archive by looking up its SHA-1 in the search index.
pub struct ChecksumLookup {
    search: Arc<dyn PackageSearch>,
}

impl ChecksumLookup {
    pub fn new(search: Arc<dyn PackageSearch>) -> Self {
        Self { search }
    }
}

/// Lowercase hex SHA-1 of a file, read in fixed-size blocks.
pub fn sha1_file(path: &Path) -> std::io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha1::new();
    let mut block = [0u8; HASH_BLOCK_SIZE];

    loop {
        let n = file.read(&mut block)?;
        if n == 0 {
            break;
        }
        hasher.update(&block[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

#[async_trait]
impl super::IdentificationStrategy for ChecksumLookup {
    fn method(&self) -> IdentificationMethod {
        IdentificationMethod::Checksum
    }

    async fn identify(&self, archive: &Path) -> Result<Vec<PackageCoordinate>> {
        let size = match fs::metadata(archive) {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                warn!("Could not stat {}: {}", archive.display(), e);
                return Ok(Vec::new());
            }
        };

        // An empty file would match every artifact recorded with the empty hash
        if size == 0 {
            warn!("{} is 0 bytes, skipping checksum lookup", archive.display());
            return Ok(Vec::new());
        }

        let sha1 = match sha1_file(archive) {
            Ok(sha1) => sha1,
            Err(e) => {
                warn!("Could not read {}: {}", archive.display(), e);
                return Ok(Vec::new());
            }
        };
        debug!("SHA-1 of {} is {}", archive.display(), sha1);

        self.search.search_by_sha1(&sha1).await
    }
}
