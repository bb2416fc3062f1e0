//! Test catalog manifest
//!
//! The manifest lists pre-supplied tests:
//!
//! ```json
//! { "tests": [
//!     { "id": 1, "name": "Algebra", "fileName": "algebra.docx", "courses": [1, 2] },
//!     { "id": "phys", "name": "Physics", "sub_catalogs": [
//!         { "id": "phys-1", "name": "Mechanics", "path": "phys/mech.txt" } ] }
//! ] }
//! ```
//!
//! Ids and courses are written as numbers in some manifests and strings in others; both are
//! normalized to strings. The catalog is loaded once and is read-only afterwards.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog manifest: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TestCatalog {
    #[serde(default)]
    pub tests: Vec<TestCatalogItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCatalogItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institute: Option<String>,
    #[serde(default, deserialize_with = "strings_or_numbers", skip_serializing_if = "Vec::is_empty")]
    pub courses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(
        default,
        rename = "sub_catalogs",
        alias = "subCatalogs",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub sub_catalogs: Vec<TestCatalogItem>,
}

impl TestCatalogItem {
    /// Source file of this entry relative to the asset base (`path` wins over `fileName`)
    pub fn source(&self) -> Option<&str> {
        self.path.as_deref().or(self.file_name.as_deref())
    }

    /// Source file resolved against the asset base path
    pub fn resolve_path(&self, asset_base: &Path) -> Option<PathBuf> {
        self.source().map(|source| asset_base.join(source))
    }
}

impl TestCatalog {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Every entry, nested ones included, depth-first with their nesting depth
    pub fn iter(&self) -> impl Iterator<Item = (usize, &TestCatalogItem)> {
        let mut stack: Vec<(usize, &TestCatalogItem)> =
            self.tests.iter().rev().map(|item| (0, item)).collect();
        std::iter::from_fn(move || {
            let (depth, item) = stack.pop()?;
            stack.extend(item.sub_catalogs.iter().rev().map(|sub| (depth + 1, sub)));
            Some((depth, item))
        })
    }

    pub fn find(&self, id: &str) -> Option<&TestCatalogItem> {
        self.iter().map(|(_, item)| item).find(|item| item.id == id)
    }
}

fn scalar_to_string<E: serde::de::Error>(value: Value) -> Result<String, E> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(E::custom(format!("expected a string or number, found {other}"))),
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    scalar_to_string(Value::deserialize(deserializer)?)
}

fn strings_or_numbers<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(values) => values.into_iter().map(scalar_to_string).collect(),
        single => Ok(vec![scalar_to_string(single)?]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
        "tests": [
            { "id": 1, "name": "Algebra", "fileName": "algebra.docx", "courses": [1, "2"] },
            { "id": "phys", "name": "Physics", "institute": "IPT", "sub_catalogs": [
                { "id": "phys-1", "name": "Mechanics", "path": "phys/mech.txt", "language": "ru" }
            ] }
        ]
    }"#;

    #[test]
    fn normalizes_numeric_ids_and_courses() {
        let catalog = TestCatalog::from_json(MANIFEST).unwrap();
        let algebra = &catalog.tests[0];
        assert_eq!(algebra.id, "1");
        assert_eq!(algebra.courses, vec!["1", "2"]);
        assert_eq!(algebra.source(), Some("algebra.docx"));
    }

    #[test]
    fn walks_nested_catalogs_depth_first() {
        let catalog = TestCatalog::from_json(MANIFEST).unwrap();
        let walked: Vec<_> = catalog
            .iter()
            .map(|(depth, item)| (depth, item.id.as_str()))
            .collect();
        assert_eq!(walked, vec![(0, "1"), (0, "phys"), (1, "phys-1")]);
    }

    #[test]
    fn resolves_paths_against_asset_base() {
        let catalog = TestCatalog::from_json(MANIFEST).unwrap();
        let mech = catalog.find("phys-1").unwrap();
        assert_eq!(
            mech.resolve_path(Path::new("/srv/assets")),
            Some(PathBuf::from("/srv/assets/phys/mech.txt"))
        );
        assert_eq!(catalog.find("phys").unwrap().resolve_path(Path::new("a")), None);
        assert!(catalog.find("missing").is_none());
    }

    #[test]
    fn rejects_invalid_manifests() {
        assert!(matches!(
            TestCatalog::from_json(r#"{"tests": [{"id": true, "name": "x"}]}"#),
            Err(CatalogError::Json(_))
        ));
        assert!(matches!(
            TestCatalog::from_path("/nonexistent/catalog.json"),
            Err(CatalogError::Io { .. })
        ));
    }
}
