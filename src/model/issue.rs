use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Unknown,
}

impl Severity {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "critical" => Severity::Critical,
            "high" => Severity::High,
            "medium" => Severity::Medium,
            "low" => Severity::Low,
            _ => Severity::Unknown,
        }
    }
}

/// An issue reported by the scan API.
///
/// Only `id` is typed. Every other field stays as the API sent it, explicit
/// nulls included, so the record serializes back out unmodified; the
/// accessors read the fields the tool needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Issue {
    fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.text("title")
    }

    pub fn url(&self) -> Option<&str> {
        self.text("url")
    }

    pub fn package(&self) -> Option<&str> {
        self.text("package")
    }

    pub fn version(&self) -> Option<&str> {
        self.text("version")
    }

    /// Severity as the API spelled it.
    pub fn severity_label(&self) -> Option<&str> {
        self.text("severity")
    }

    pub fn severity(&self) -> Severity {
        self.severity_label()
            .map(Severity::parse)
            .unwrap_or(Severity::Unknown)
    }

    /// CVE identifiers, if the API reported any.
    pub fn cves(&self) -> Vec<String> {
        self.fields
            .get("identifiers")
            .and_then(|ids| ids.get("CVE"))
            .and_then(Value::as_array)
            .map(|cves| {
                cves.iter()
                    .filter_map(|c| c.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Vulnerability and license issues found for one package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageIssues {
    #[serde(default)]
    pub vulnerabilities: Vec<Issue>,
    #[serde(default)]
    pub licenses: Vec<Issue>,
}

/// Issue counts per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeveritySummary {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub unknown: usize,
}

impl SeveritySummary {
    pub fn from_issues(issues: &[Issue]) -> Self {
        let mut summary = Self::default();
        for issue in issues {
            match issue.severity() {
                Severity::Critical => summary.critical += 1,
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
                Severity::Unknown => summary.unknown += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low + self.unknown
    }
}
