// src/config/model.rs

use serde::Deserialize;

use crate::services::gemini::{DEFAULT_API_URL, DEFAULT_MODEL};
use crate::services::KnowledgeBase;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [model]
/// model = "gemini-2.5-flash"
/// temperature = 0.0
///
/// [[knowledge]]
/// name = "taurine"
/// note = "Risk: Unclear long-term effects"
/// ```
///
/// All sections are optional; a missing file yields pure defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Collaborator model settings from `[model]`.
    #[serde(default)]
    pub model: ModelSection,

    /// Extra knowledge entries appended to the built-in table.
    #[serde(default)]
    pub knowledge: Vec<KnowledgeEntry>,
}

/// `[model]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelSection {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// API key. If unset, the `GEMINI_API_KEY` environment variable is used.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub temperature: f32,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for ModelSection {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_url: default_api_url(),
            api_key: None,
            temperature: 0.0,
        }
    }
}

/// One `[[knowledge]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeEntry {
    pub name: String,
    pub note: String,
}

impl ConfigFile {
    /// Configured key, falling back to the `GEMINI_API_KEY` environment
    /// variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.model
            .api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
    }

    /// Built-in knowledge table plus any configured entries.
    pub fn knowledge_base(&self) -> KnowledgeBase {
        KnowledgeBase::builtin().with_entries(
            self.knowledge
                .iter()
                .map(|e| (e.name.clone(), e.note.clone())),
        )
    }
}
