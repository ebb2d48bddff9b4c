use std::path::PathBuf;
use std::time::Duration;

pub mod classifier;
pub mod models;

pub use classifier::EntityClassifier;
pub use models::{create_recognizer, SharedRecognizer};

#[derive(Debug, Clone)]
pub struct Config {
    /// One of [`models::AVAILABLE_MODELS`].
    pub model: String,
    /// Base URL of the NER service, for the `remote` model.
    pub model_url: Option<String>,
    /// Replaces the built-in lexicon of the `gazetteer` model.
    pub lexicon_path: Option<PathBuf>,
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "gazetteer".to_string(),
            model_url: None,
            lexicon_path: None,
            timeout: None,
        }
    }
}

pub mod prelude {
    pub use super::Config;
    pub use super::classifier::EntityClassifier;
    pub use super::models::{create_recognizer, SharedRecognizer};
    pub use nx_core::{EntityBuckets, EntityRecognizer, Error, Result};
}
