use crate::credentials::auth_header_value;
use crate::error::{Error, Result};
use crate::model::{PackageCoordinate, PackageIssues};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://snyk.io/api/v1/";

/// Client for the Snyk v1 package test API.
///
/// The auth header and optional organization are fixed when the client is
/// built, once per run.
pub struct SnykClient {
    client: reqwest::Client,
    api_url: String,
    auth_header: String,
    org_id: Option<String>,
}

impl SnykClient {
    pub fn new(token: &str, org_id: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("jarscan/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_url: DEFAULT_API_URL.to_string(),
            auth_header: auth_header_value(token),
            org_id,
        })
    }

    /// Points the client at another API root, e.g. a self-hosted instance.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        let mut api_url = api_url.into();
        if !api_url.ends_with('/') {
            api_url.push('/');
        }
        self.api_url = api_url;
        self
    }

    pub fn org_id(&self) -> Option<&str> {
        self.org_id.as_deref()
    }

    /// Checks that the API accepts the token.
    ///
    /// A non-success status is `Ok(false)`; only transport failures are errors.
    pub async fn is_token_valid(&self) -> Result<bool> {
        let response = self
            .client
            .get(&self.api_url)
            .header(AUTHORIZATION, &self.auth_header)
            .send()
            .await?;

        let status = response.status();
        debug!("Token check returned HTTP {}", status);
        Ok(status.is_success())
    }

    /// `{api}/test/maven/{group}/{artifact}/{version}`, each coordinate a
    /// single percent-encoded path segment.
    fn test_url(&self, coordinate: &PackageCoordinate) -> Result<Url> {
        let invalid = || Error::InvalidUrl(self.api_url.clone());
        let mut url = Url::parse(&self.api_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend([
                "test",
                "maven",
                coordinate.group_id(),
                coordinate.artifact_id(),
                coordinate.version(),
            ]);
        Ok(url)
    }
}

#[derive(Deserialize)]
struct TestResponse {
    issues: PackageIssues,
}

#[async_trait]
impl super::PackageScanner for SnykClient {
    fn name(&self) -> &'static str {
        "Snyk"
    }

    async fn scan_package(&self, coordinate: &PackageCoordinate) -> Result<PackageIssues> {
        let url = self.test_url(coordinate)?;
        debug!("GET {}", url);

        let mut request = self
            .client
            .get(url)
            .header(AUTHORIZATION, &self.auth_header);
        if let Some(org) = &self.org_id {
            request = request.query(&[("org", org)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::ApiStatus {
                service: "Snyk",
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body: TestResponse = response.json().await?;
        Ok(body.issues)
    }
}
