//! Catalog backed by the REST API of the parts database.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use super::{endpoint, records_from_page, CatalogError, CatalogQuery, CatalogSource};

const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/";
const CATALOG_TIMEOUT_SECS: u64 = 30;

/// Fetches `GET <base>/<endpoint>?cpu=<id>&...`.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: String,
}

impl HttpCatalog {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(CATALOG_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self { client, base_url }
    }

    /// Full URL of a query, without the query string.
    pub fn url(&self, query: &CatalogQuery) -> String {
        format!("{}{}", self.base_url, endpoint(query.category))
    }
}

impl Default for HttpCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, query: &CatalogQuery) -> Result<Vec<Value>, CatalogError> {
        let url = self.url(query);
        tracing::debug!("GET {} {:?}", url, query.params);

        let response = self.client.get(&url).query(&query.params).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status { status, message });
        }

        let page: Value = response.json().await?;
        records_from_page(query.category, page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    #[test]
    fn test_urls() {
        let catalog = HttpCatalog::with_base_url("http://parts.local/api");
        assert_eq!(
            catalog.url(&CatalogQuery::new(Category::Chassis)),
            "http://parts.local/api/cases/"
        );
        assert_eq!(
            HttpCatalog::new().url(&CatalogQuery::new(Category::Mem)),
            "http://localhost:8000/api/mems/"
        );
    }
}
