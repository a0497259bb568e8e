use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{EducationLevel, MaritalStatus};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("category list unavailable at {path}: {source}")]
    Unavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("category list at {path} is malformed: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Selectable choices per intake field. Only used to populate options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryCatalog(BTreeMap<String, Vec<String>>);

impl CategoryCatalog {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Unavailable {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| CatalogError::Malformed {
            path: path.display().to_string(),
            source,
        })
    }

    /// Choices offered by the rule-based form when no category list is configured.
    pub fn builtin() -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(
            "education_type".to_string(),
            EducationLevel::ordered()
                .iter()
                .map(|level| level.label().to_string())
                .collect(),
        );
        fields.insert(
            "marital_status".to_string(),
            MaritalStatus::ordered()
                .iter()
                .map(|status| status.label().to_string())
                .collect(),
        );
        Self(fields)
    }

    pub fn options(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
