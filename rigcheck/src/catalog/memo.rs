//! Caller-owned cache of normalized catalog pages.

use std::collections::HashMap;

use super::{CatalogError, CatalogQuery, CatalogSource};
use crate::model::{Category, Component};
use crate::normalize::normalize_component;

/// Normalized pages keyed by category and filter signature.
#[derive(Debug, Default)]
pub struct CatalogMemo {
    pages: HashMap<(Category, String), Vec<Component>>,
}

impl CatalogMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached page for the query, fetching and normalizing it on a miss.
    pub async fn page(
        &mut self,
        source: &dyn CatalogSource,
        query: &CatalogQuery,
    ) -> Result<Vec<Component>, CatalogError> {
        let key = (query.category, query.signature());
        if let Some(page) = self.pages.get(&key) {
            tracing::debug!("Catalog memo hit for {} [{}]", key.0, key.1);
            return Ok(page.clone());
        }

        let records = source.fetch(query).await?;
        let page: Vec<Component> = records
            .iter()
            .map(|record| normalize_component(query.category, record))
            .collect();
        tracing::info!(
            "Loaded {} {} candidates from {} catalog",
            page.len(),
            query.category,
            source.name()
        );

        self.pages.insert(key, page.clone());
        Ok(page)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn clear(&mut self) {
        self.pages.clear();
    }
}
