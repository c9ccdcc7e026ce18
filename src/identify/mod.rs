//! Archive identification.
//!
//! An archive is resolved to Maven coordinates by trying a list of
//! [`IdentificationStrategy`] implementations in priority order. The first
//! strategy that returns at least one coordinate wins; later strategies are
//! not run and results are never merged.
//!
//! | Strategy | Reliability |
//! |----------|-------------|
//! | [`ChecksumLookup`] | Exact: SHA-1 of the file matched against Maven Central |
//! | [`EmbeddedPomInspection`] | Self-declared by the build, can be stale after repackaging |
//! | [`FilenameHeuristic`] | A guess from `artifact-version.jar` |
//!
//! # Example
//!
//! ```no_run
//! use jarscan::identify::Identifier;
//! use jarscan::search::{MavenCentralClient, DEFAULT_SEARCH_URL};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> jarscan::Result<()> {
//!     let search = Arc::new(MavenCentralClient::new(DEFAULT_SEARCH_URL)?);
//!     let identifier = Identifier::standard(search);
//!
//!     let found = identifier.identify_packages(Path::new("commons-io-2.11.0.jar")).await?;
//!     for coordinate in &found.packages {
//!         println!("{}", coordinate);
//!     }
//!     Ok(())
//! }
//! ```

mod checksum;
mod filename;
mod pom;

pub use checksum::{sha1_file, ChecksumLookup};
pub use filename::{split_filename, FilenameHeuristic};
pub use pom::{parse_pom, EmbeddedPomInspection};

use crate::error::Result;
use crate::model::{Identification, IdentificationMethod, PackageCoordinate};
use crate::search::PackageSearch;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// One way of turning an archive into candidate coordinates.
#[async_trait]
pub trait IdentificationStrategy: Send + Sync {
    /// The method recorded when this strategy identifies an archive.
    fn method(&self) -> IdentificationMethod;

    /// Returns every coordinate this strategy finds, possibly none.
    ///
    /// Problems local to the archive (unreadable file, corrupt zip, bad
    /// descriptor) are logged and produce an empty result. Search service
    /// failures are returned as errors.
    async fn identify(&self, archive: &Path) -> Result<Vec<PackageCoordinate>>;
}

/// Runs identification strategies in priority order.
pub struct Identifier {
    strategies: Vec<Box<dyn IdentificationStrategy>>,
}

impl Identifier {
    /// Builds a cascade from strategies ordered highest priority first.
    pub fn new(strategies: Vec<Box<dyn IdentificationStrategy>>) -> Self {
        Self { strategies }
    }

    /// Checksum lookup, then embedded POM inspection, then the filename heuristic.
    pub fn standard(search: Arc<dyn PackageSearch>) -> Self {
        Self::new(vec![
            Box::new(ChecksumLookup::new(search.clone())),
            Box::new(EmbeddedPomInspection),
            Box::new(FilenameHeuristic::new(search)),
        ])
    }

    pub async fn identify_packages(&self, archive: &Path) -> Result<Identification> {
        info!("Identifying package for {}", archive.display());

        for strategy in &self.strategies {
            let packages = strategy.identify(archive).await?;
            if !packages.is_empty() {
                debug!(
                    "{} identified {} package(s) by {}",
                    archive.display(),
                    packages.len(),
                    strategy.method()
                );
                return Ok(Identification {
                    method: Some(strategy.method()),
                    packages,
                });
            }
            debug!("{} found nothing for {}", strategy.method(), archive.display());
        }

        info!("No package identified for {}", archive.display());
        Ok(Identification::unidentified())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory search index that records every query it receives.
    #[derive(Default)]
    pub struct FakeSearch {
        pub by_sha1: HashMap<String, Vec<PackageCoordinate>>,
        pub by_artifact_version: HashMap<(String, String), Vec<PackageCoordinate>>,
        pub queries: Mutex<Vec<String>>,
    }

    impl FakeSearch {
        pub fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PackageSearch for FakeSearch {
        async fn search_by_sha1(&self, sha1: &str) -> Result<Vec<PackageCoordinate>> {
            self.queries.lock().unwrap().push(format!("sha1:{}", sha1));
            Ok(self.by_sha1.get(sha1).cloned().unwrap_or_default())
        }

        async fn search_by_artifact_version(
            &self,
            artifact_id: &str,
            version: &str,
        ) -> Result<Vec<PackageCoordinate>> {
            self.queries
                .lock()
                .unwrap()
                .push(format!("gav:{}:{}", artifact_id, version));
            Ok(self
                .by_artifact_version
                .get(&(artifact_id.to_string(), version.to_string()))
                .cloned()
                .unwrap_or_default())
        }
    }

    /// Writes a jar containing the given (entry name, contents) pairs.
    pub fn write_jar(path: &Path, entries: &[(&str, &str)]) {
        use std::io::Write;
        use zip::write::SimpleFileOptions;

        let file = std::fs::File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for (name, contents) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(contents.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    pub fn pom(group: &str, artifact: &str, version: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <groupId>{}</groupId>
  <artifactId>{}</artifactId>
  <version>{}</version>
</project>"#,
            group, artifact, version
        )
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{pom, write_jar, FakeSearch};
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Strategy returning a fixed answer and logging that it ran.
    struct Scripted {
        method: IdentificationMethod,
        answer: Vec<PackageCoordinate>,
        calls: Arc<Mutex<Vec<IdentificationMethod>>>,
    }

    #[async_trait]
    impl IdentificationStrategy for Scripted {
        fn method(&self) -> IdentificationMethod {
            self.method
        }

        async fn identify(&self, _archive: &Path) -> Result<Vec<PackageCoordinate>> {
            self.calls.lock().unwrap().push(self.method);
            Ok(self.answer.clone())
        }
    }

    fn scripted(answers: [usize; 3]) -> (Identifier, Arc<Mutex<Vec<IdentificationMethod>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let methods = [
            IdentificationMethod::Checksum,
            IdentificationMethod::EmbeddedPom,
            IdentificationMethod::Filename,
        ];
        let strategies = methods
            .iter()
            .zip(answers)
            .map(|(method, count)| {
                let answer = (0..count)
                    .map(|i| PackageCoordinate::new(method.as_str(), "lib", i.to_string()))
                    .collect();
                Box::new(Scripted {
                    method: *method,
                    answer,
                    calls: calls.clone(),
                }) as Box<dyn IdentificationStrategy>
            })
            .collect();
        (Identifier::new(strategies), calls)
    }

    #[tokio::test]
    async fn test_stops_at_first_strategy_with_results() {
        let (identifier, calls) = scripted([2, 1, 1]);
        let found = identifier.identify_packages(Path::new("x.jar")).await.unwrap();

        assert_eq!(found.method, Some(IdentificationMethod::Checksum));
        assert_eq!(found.packages.len(), 2);
        assert_eq!(*calls.lock().unwrap(), vec![IdentificationMethod::Checksum]);
    }

    #[tokio::test]
    async fn test_falls_through_in_priority_order() {
        let (identifier, calls) = scripted([0, 0, 3]);
        let found = identifier.identify_packages(Path::new("x.jar")).await.unwrap();

        assert_eq!(found.method, Some(IdentificationMethod::Filename));
        assert_eq!(found.packages.len(), 3);
        assert_eq!(
            *calls.lock().unwrap(),
            vec![
                IdentificationMethod::Checksum,
                IdentificationMethod::EmbeddedPom,
                IdentificationMethod::Filename,
            ]
        );
    }

    #[tokio::test]
    async fn test_never_merges_results() {
        let (identifier, calls) = scripted([0, 1, 5]);
        let found = identifier.identify_packages(Path::new("x.jar")).await.unwrap();

        assert_eq!(found.method, Some(IdentificationMethod::EmbeddedPom));
        assert_eq!(found.packages.len(), 1);
        assert_eq!(calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unidentified_is_not_an_error() {
        let (identifier, _) = scripted([0, 0, 0]);
        let found = identifier.identify_packages(Path::new("x.jar")).await.unwrap();
        assert_eq!(found, Identification::unidentified());
    }

    #[tokio::test]
    async fn test_standard_cascade_prefers_checksum() {
        let dir = TempDir::new().unwrap();
        let jar = dir.path().join("foolib-2.3.1.jar");
        let descriptor = pom("org.example", "foolib", "2.3.1");
        write_jar(&jar, &[("META-INF/maven/org.example/foolib/pom.xml", &descriptor)]);
        let sha1 = sha1_file(&jar).unwrap();

        let mut search = FakeSearch::default();
        search.by_sha1.insert(
            sha1.clone(),
            vec![
                PackageCoordinate::new("org.example", "foolib", "2.3.1"),
                PackageCoordinate::new("org.example.legacy", "foolib", "2.3.1"),
                PackageCoordinate::new("io.relocated", "foolib", "2.3.1"),
            ],
        );
        let search = Arc::new(search);

        let identifier = Identifier::standard(search.clone());
        let found = identifier.identify_packages(&jar).await.unwrap();

        assert_eq!(found.method, Some(IdentificationMethod::Checksum));
        assert_eq!(found.packages.len(), 3);
        assert_eq!(search.queries(), vec![format!("sha1:{}", sha1)]);
    }

    #[tokio::test]
    async fn test_standard_cascade_uses_pom_before_filename() {
        let dir = TempDir::new().unwrap();
        let jar = dir.path().join("foolib-2.3.1.jar");
        let descriptor = pom("org.example", "foolib", "2.3.1");
        write_jar(&jar, &[("META-INF/maven/org.example/foolib/pom.xml", &descriptor)]);

        let search = Arc::new(FakeSearch::default());
        let identifier = Identifier::standard(search.clone());
        let found = identifier.identify_packages(&jar).await.unwrap();

        assert_eq!(found.method, Some(IdentificationMethod::EmbeddedPom));
        assert_eq!(found.packages, vec![PackageCoordinate::new("org.example", "foolib", "2.3.1")]);
        // Only the checksum query ran
        assert_eq!(search.queries().len(), 1);
        assert!(search.queries()[0].starts_with("sha1:"));
    }

    #[tokio::test]
    async fn test_standard_cascade_zero_byte_archive_skips_checksum() {
        let dir = TempDir::new().unwrap();
        let jar = dir.path().join("my-lib-core-1.0.jar");
        std::fs::write(&jar, b"").unwrap();

        let mut search = FakeSearch::default();
        search.by_artifact_version.insert(
            ("my-lib-core".to_string(), "1.0".to_string()),
            vec![PackageCoordinate::new("org.example", "my-lib-core", "1.0")],
        );
        let search = Arc::new(search);

        let identifier = Identifier::standard(search.clone());
        let found = identifier.identify_packages(&jar).await.unwrap();

        assert_eq!(found.method, Some(IdentificationMethod::Filename));
        assert_eq!(search.queries(), vec!["gav:my-lib-core:1.0".to_string()]);
    }
}
