use crate::cache::Cache;
use crate::error::{Error, Result};
use crate::model::PackageCoordinate;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use tracing::{debug, trace};

pub const DEFAULT_SEARCH_URL: &str = "https://search.maven.org/solrsearch/select";

/// Maximum number of documents requested per query.
const DEFAULT_ROWS: u32 = 20;

/// Client for the Maven Central search API.
pub struct MavenCentralClient {
    client: reqwest::Client,
    search_url: String,
    rows: u32,
    cache: Option<Cache>,
}

impl MavenCentralClient {
    pub fn new(search_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("jarscan/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            search_url: search_url.into(),
            rows: DEFAULT_ROWS,
            cache: None,
        })
    }

    pub fn with_rows(mut self, rows: u32) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_cache(mut self, cache: Cache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Cache key for a query against this index.
    ///
    /// Hashes the endpoint, row limit and query text so that distinct
    /// requests never share an entry.
    fn cache_key(&self, q: &str) -> String {
        let mut hasher = Sha1::new();
        hasher.update(self.search_url.as_bytes());
        hasher.update(b"\n");
        hasher.update(self.rows.to_string().as_bytes());
        hasher.update(b"\n");
        hasher.update(q.as_bytes());
        format!("search_{}", hex::encode(hasher.finalize()))
    }

    async fn query(&self, q: &str) -> Result<Vec<PackageCoordinate>> {
        let cache_key = self.cache_key(q);
        if let Some(cache) = &self.cache {
            if let Some(docs) = cache.get::<Vec<SearchDoc>>(&cache_key) {
                trace!("Cache hit for q={}", q);
                return Ok(docs.into_iter().map(SearchDoc::into_coordinate).collect());
            }
        }

        debug!("Maven search q={}", q);
        let rows = self.rows.to_string();
        let response = self
            .client
            .get(&self.search_url)
            .query(&[("q", q), ("rows", rows.as_str()), ("wt", "json")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ApiStatus {
                service: "Maven search",
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body: SearchResponse = response.json().await?;
        let docs = body.response.docs;

        if let Some(cache) = &self.cache {
            let _ = cache.set(&cache_key, &docs);
        }

        Ok(docs.into_iter().map(SearchDoc::into_coordinate).collect())
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    response: SearchBody,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SearchDoc {
    id: String,
    g: String,
    a: String,
    v: String,
}

impl SearchDoc {
    fn into_coordinate(self) -> PackageCoordinate {
        PackageCoordinate::with_full_id(self.id, self.g, self.a, self.v)
    }
}

#[async_trait]
impl super::PackageSearch for MavenCentralClient {
    async fn search_by_sha1(&self, sha1: &str) -> Result<Vec<PackageCoordinate>> {
        let q = format!("1:\"{}\"", sha1);
        self.query(&q).await
    }

    async fn search_by_artifact_version(
        &self,
        artifact_id: &str,
        version: &str,
    ) -> Result<Vec<PackageCoordinate>> {
        let q = format!("a:\"{}\" AND v:\"{}\"", artifact_id, version);
        self.query(&q).await
    }
}
