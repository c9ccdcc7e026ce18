use serde::{Deserialize, Serialize};

/// Maven coordinates of a published artifact.
///
/// Coordinates are immutable once built; use the accessors to read them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageCoordinate {
    full_id: String,
    group_id: String,
    artifact_id: String,
    version: String,
}

impl PackageCoordinate {
    /// Builds coordinates whose full id is `group:artifact:version`.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        let group_id = group_id.into();
        let artifact_id = artifact_id.into();
        let version = version.into();
        Self {
            full_id: format!("{}:{}:{}", group_id, artifact_id, version),
            group_id,
            artifact_id,
            version,
        }
    }

    /// Builds coordinates with an id assigned by the search index.
    pub fn with_full_id(
        full_id: impl Into<String>,
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            full_id: full_id.into(),
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    pub fn full_id(&self) -> &str {
        &self.full_id
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl std::fmt::Display for PackageCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}@{}", self.group_id, self.artifact_id, self.version)
    }
}
