use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{Issue, PackageCoordinate, PackageIssues, Severity};

/// Which identification strategy produced an archive's coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentificationMethod {
    Checksum,
    EmbeddedPom,
    Filename,
}

impl IdentificationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentificationMethod::Checksum => "checksum",
            IdentificationMethod::EmbeddedPom => "embedded-pom",
            IdentificationMethod::Filename => "filename",
        }
    }
}

impl std::fmt::Display for IdentificationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of running the identification cascade on one archive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Identification {
    pub method: Option<IdentificationMethod>,
    pub packages: Vec<PackageCoordinate>,
}

impl Identification {
    pub fn unidentified() -> Self {
        Self::default()
    }

    pub fn is_identified(&self) -> bool {
        !self.packages.is_empty()
    }
}

/// One identified package and, when scanning ran, its issues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageReport {
    #[serde(flatten)]
    pub coordinate: PackageCoordinate,
    pub vulnerabilities: Option<Vec<Issue>>,
    #[serde(rename = "license-issues")]
    pub license_issues: Option<Vec<Issue>>,
}

impl PackageReport {
    pub fn unscanned(coordinate: PackageCoordinate) -> Self {
        Self {
            coordinate,
            vulnerabilities: None,
            license_issues: None,
        }
    }

    pub fn scanned(coordinate: PackageCoordinate, issues: PackageIssues) -> Self {
        Self {
            coordinate,
            vulnerabilities: Some(issues.vulnerabilities),
            license_issues: Some(issues.licenses),
        }
    }
}

/// Everything learned about one input archive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveAnalysisResult {
    pub jar: String,
    #[serde(
        rename = "identified-by",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub identified_by: Option<IdentificationMethod>,
    #[serde(rename = "matching-packages")]
    pub matching_packages: Vec<PackageReport>,
}

impl ArchiveAnalysisResult {
    pub fn new(jar: &Path, identified_by: Option<IdentificationMethod>) -> Self {
        Self {
            jar: jar.display().to_string(),
            identified_by,
            matching_packages: Vec::new(),
        }
    }

    pub fn is_identified(&self) -> bool {
        !self.matching_packages.is_empty()
    }

    pub fn vulnerability_count(&self) -> usize {
        self.matching_packages
            .iter()
            .filter_map(|p| p.vulnerabilities.as_ref())
            .map(Vec::len)
            .sum()
    }

    pub fn license_issue_count(&self) -> usize {
        self.matching_packages
            .iter()
            .filter_map(|p| p.license_issues.as_ref())
            .map(Vec::len)
            .sum()
    }

    /// Severities of every vulnerability found in this archive.
    pub fn vulnerability_severities(&self) -> impl Iterator<Item = Severity> + '_ {
        self.matching_packages
            .iter()
            .filter_map(|p| p.vulnerabilities.as_ref())
            .flatten()
            .map(Issue::severity)
    }
}
