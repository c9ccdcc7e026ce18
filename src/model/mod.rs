//! Core data types for coordinates, issues, and analysis results.
//!
//! - [`PackageCoordinate`] - Maven group/artifact/version of a published artifact
//! - [`Issue`] - A vulnerability or license issue reported by the scan API
//! - [`Identification`] - What the identification cascade found for one archive
//! - [`ArchiveAnalysisResult`] - Per-archive result, as exported to JSON
//!
//! # Example
//!
//! ```
//! use jarscan::model::{ArchiveAnalysisResult, PackageCoordinate, PackageReport};
//! use std::path::Path;
//!
//! let coordinate = PackageCoordinate::new("commons-io", "commons-io", "2.11.0");
//! let mut result = ArchiveAnalysisResult::new(Path::new("commons-io-2.11.0.jar"), None);
//! result.matching_packages.push(PackageReport::unscanned(coordinate));
//!
//! assert!(result.is_identified());
//! ```

mod issue;
mod package;
mod report;

pub use issue::*;
pub use package::*;
pub use report::*;
