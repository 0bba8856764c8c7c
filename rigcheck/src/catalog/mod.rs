//! Catalog sources
//!
//! Candidate pages are fetched from a catalog before the engine runs. A
//! source returns raw records; they are normalized on the way into the
//! [`CatalogMemo`].

pub mod file;
pub mod http;
pub mod memo;

pub use file::FileCatalog;
pub use http::HttpCatalog;
pub use memo::CatalogMemo;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

use crate::model::{Build, Category};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Catalog page for {0} is not a list of records")]
    NotAList(Category),
}

/// A source of raw candidate records.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Source name for logs
    fn name(&self) -> &str;

    /// Fetch the raw candidates of one category.
    async fn fetch(&self, query: &CatalogQuery) -> Result<Vec<Value>, CatalogError>;
}

/// Categories whose selection narrows the candidate list of `category`.
pub fn filter_categories(category: Category) -> &'static [Category] {
    use Category::*;
    match category {
        Cpu => &[Mobo, Ram, Gpu, Psu],
        Gpu => &[Psu, Cpu, Mobo, Chassis],
        Ram => &[Mobo, Cpu],
        Mobo => &[Cpu, Ram, Gpu, Psu, Mem, Chassis],
        Psu => &[Gpu, Cpu, Mobo, Chassis],
        Mem => &[Mobo],
        Chassis => &[Mobo, Gpu, Psu],
    }
}

/// Catalog endpoint of a category.
pub fn endpoint(category: Category) -> &'static str {
    match category {
        Category::Cpu => "cpus/",
        Category::Mobo => "motherboards/",
        Category::Ram => "rams/",
        Category::Gpu => "gpus/",
        Category::Psu => "psus/",
        Category::Mem => "mems/",
        Category::Chassis => "cases/",
    }
}

/// Query parameter naming a selection of `category`. The catalog API calls
/// the chassis slot `case`.
pub fn query_key(category: Category) -> &'static str {
    match category {
        Category::Chassis => "case",
        other => other.as_str(),
    }
}

/// What to fetch: a category plus the ids of the build's relevant
/// selections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub category: Category,
    pub params: Vec<(String, String)>,
}

impl CatalogQuery {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            params: Vec::new(),
        }
    }

    /// Query for `category` filtered by the ids selected in `build`.
    pub fn for_build(category: Category, build: &Build) -> Self {
        let params = filter_categories(category)
            .iter()
            .filter_map(|other| {
                build
                    .selected_id(*other)
                    .map(|id| (query_key(*other).to_string(), id.to_string()))
            })
            .collect();
        Self { category, params }
    }

    /// Stable cache key for the filter part of the query.
    pub fn signature(&self) -> String {
        let mut pairs: Vec<String> = self
            .params
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        pairs.sort();
        pairs.join("&")
    }
}

/// Accept a bare array or a paginated `{"results": [...]}` page.
pub(crate) fn records_from_page(category: Category, page: Value) -> Result<Vec<Value>, CatalogError> {
    match page {
        Value::Array(records) => Ok(records),
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(records)) => Ok(records),
            _ => Err(CatalogError::NotAList(category)),
        },
        _ => Err(CatalogError::NotAList(category)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;
    use serde_json::json;

    #[test]
    fn test_query_uses_relevant_selections_only() {
        let build = Build {
            cpu: Some(Cpu {
                info: ComponentInfo {
                    id: "7".to_string(),
                    ..Default::default()
                },
                ..Default::default()
            }),
            mem: Some(Storage {
                info: ComponentInfo {
                    id: "3".to_string(),
                    ..Default::default()
                },
                ..Default::default()
            }),
            ..Default::default()
        };

        let ram = CatalogQuery::for_build(Category::Ram, &build);
        assert_eq!(ram.params, vec![("cpu".to_string(), "7".to_string())]);

        let mobo = CatalogQuery::for_build(Category::Mobo, &build);
        assert_eq!(mobo.signature(), "cpu=7&mem=3");

        assert!(CatalogQuery::for_build(Category::Mem, &build).params.is_empty());
    }

    #[test]
    fn test_chassis_filter_is_sent_as_case() {
        let build = Build {
            chassis: Some(Chassis {
                info: ComponentInfo {
                    id: "70".to_string(),
                    ..Default::default()
                },
                ..Default::default()
            }),
            ..Default::default()
        };
        let gpu = CatalogQuery::for_build(Category::Gpu, &build);
        assert_eq!(gpu.params, vec![("case".to_string(), "70".to_string())]);
        assert_eq!(query_key(Category::Mobo), "mobo");
    }

    #[test]
    fn test_signature_is_order_independent() {
        let a = CatalogQuery {
            category: Category::Gpu,
            params: vec![("psu".into(), "1".into()), ("cpu".into(), "2".into())],
        };
        let b = CatalogQuery {
            category: Category::Gpu,
            params: vec![("cpu".into(), "2".into()), ("psu".into(), "1".into())],
        };
        assert_eq!(a.signature(), b.signature());
    }

    #[test]
    fn test_page_shapes() {
        let records = records_from_page(Category::Cpu, json!([{"id": 1}])).unwrap();
        assert_eq!(records.len(), 1);
        let records = records_from_page(Category::Cpu, json!({"results": [{"id": 1}, {"id": 2}]})).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records_from_page(Category::Cpu, json!({"id": 1})).is_err());
    }
}
