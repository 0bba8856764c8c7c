//! Catalog backed by a directory of `<category>.json` files.

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};

use super::{records_from_page, CatalogError, CatalogQuery, CatalogSource};

/// Reads `cpu.json`, `mobo.json`, ... from a directory. Filters in the
/// query are ignored; every record of the category is a candidate.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    dir: PathBuf,
}

impl FileCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl CatalogSource for FileCatalog {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self, query: &CatalogQuery) -> Result<Vec<Value>, CatalogError> {
        let path = self.dir.join(format!("{}.json", query.category));
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| CatalogError::Io {
                path: path.clone(),
                source,
            })?;
        let page: Value = serde_json::from_str(&content)?;
        records_from_page(query.category, page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_category_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("psu.json"),
            r#"[{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]"#,
        )
        .unwrap();

        let catalog = FileCatalog::new(dir.path());
        let records = catalog.fetch(&CatalogQuery::new(Category::Psu)).await.unwrap();
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let catalog = FileCatalog::new(dir.path());
        let err = catalog.fetch(&CatalogQuery::new(Category::Gpu)).await.unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
