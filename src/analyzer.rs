//! Per-archive pipeline: identify, optionally scan, collect results.

use crate::checker::PackageScanner;
use crate::error::Result;
use crate::identify::Identifier;
use crate::model::{ArchiveAnalysisResult, PackageReport};
use crate::output::print_package_issues;
use std::path::{Path, PathBuf};
use tracing::info;

/// Identifies archives and, when a scanner is configured, tests every
/// identified package.
pub struct Analyzer<'a> {
    identifier: &'a Identifier,
    scanner: Option<&'a dyn PackageScanner>,
}

impl<'a> Analyzer<'a> {
    pub fn new(identifier: &'a Identifier, scanner: Option<&'a dyn PackageScanner>) -> Self {
        Self {
            identifier,
            scanner,
        }
    }

    pub fn scans(&self) -> bool {
        self.scanner.is_some()
    }

    /// Analyzes one archive. Scan failures are returned, not swallowed.
    pub async fn analyze_archive(&self, archive: &Path) -> Result<ArchiveAnalysisResult> {
        let identification = self.identifier.identify_packages(archive).await?;
        let mut result = ArchiveAnalysisResult::new(archive, identification.method);

        if !identification.is_identified() {
            println!("No package identified for {}", archive.display());
        }

        for coordinate in identification.packages {
            let report = match self.scanner {
                Some(scanner) => {
                    println!("{} test package {}...", scanner.name(), coordinate);
                    let issues = scanner.scan_package(&coordinate).await?;
                    print_package_issues(&issues);
                    PackageReport::scanned(coordinate, issues)
                }
                None => {
                    println!("Identified {}", coordinate);
                    PackageReport::unscanned(coordinate)
                }
            };
            result.matching_packages.push(report);
        }

        Ok(result)
    }

    /// Analyzes archives one at a time, preserving input order.
    pub async fn analyze_all(&self, archives: &[PathBuf]) -> Result<Vec<ArchiveAnalysisResult>> {
        let mut results = Vec::with_capacity(archives.len());

        for archive in archives {
            println!("Analyzing jar {}...", archive.display());
            results.push(self.analyze_archive(archive).await?);
            println!();
        }

        info!(
            "Analyzed {} archive(s), {} identified",
            results.len(),
            results.iter().filter(|r| r.is_identified()).count()
        );
        Ok(results)
    }
}
