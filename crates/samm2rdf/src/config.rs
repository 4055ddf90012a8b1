//! Editor settings that influence synchronization and serialization.

use std::path::Path;

use serde::Deserialize;

use crate::emitter::turtle::SerializerOptions;
use crate::model::ontology::{samm, DEFAULT_SAMM_VERSION};

/// Settings file contents, e.g. `{"language": "de", "sammAlias": "samm"}`.
/// Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorSettings {
    /// UI display language; example values are rendered with it.
    pub language: Option<String>,
    /// Prefix bound to the SAMM meta model namespace in written files.
    pub samm_alias: String,
    /// Meta model version for documents that do not declare one.
    pub samm_version: String,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            language: None,
            samm_alias: samm::PREFIX.to_string(),
            samm_version: DEFAULT_SAMM_VERSION.to_string(),
        }
    }
}

impl EditorSettings {
    pub fn serializer_options(&self) -> SerializerOptions {
        SerializerOptions {
            display_language: self.language.clone(),
        }
    }
}

/// Load settings from a JSON file.
pub fn load_settings(path: &Path) -> crate::error::Result<EditorSettings> {
    let content = std::fs::read_to_string(path)?;
    let settings: EditorSettings = serde_json::from_str(&content)?;
    Ok(settings)
}
