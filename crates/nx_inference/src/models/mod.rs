use std::sync::Arc;
use nx_core::{Error, Result};
use tokio::sync::OnceCell;
use tracing::info;
use crate::Config;

pub mod gazetteer;
pub mod remote;

pub use gazetteer::GazetteerRecognizer;
pub use nx_core::EntityRecognizer;
pub use remote::RemoteRecognizer;

/// Names accepted by [`Config::model`].
pub const AVAILABLE_MODELS: &[&str] = &["gazetteer", "remote"];

pub async fn create_recognizer(config: &Config) -> Result<Arc<dyn EntityRecognizer>> {
    match config.model.as_str() {
        "gazetteer" => {
            let model = match &config.lexicon_path {
                Some(path) => GazetteerRecognizer::from_file(path)?,
                None => GazetteerRecognizer::builtin()?,
            };
            Ok(Arc::new(model))
        }
        "remote" => {
            let url = config.model_url.as_deref().ok_or_else(|| {
                Error::Config("The remote model needs a model URL".to_string())
            })?;
            Ok(Arc::new(RemoteRecognizer::new(url, config.timeout)?))
        }
        other => Err(Error::Config(format!(
            "Unknown model '{}'. Available models: {}",
            other,
            AVAILABLE_MODELS.join(", ")
        ))),
    }
}

/// Process-wide handle on the recognizer.
///
/// The model is built on the first [`get`](Self::get) and reused by every
/// later call and every clone of the handle. A failed build is not cached.
#[derive(Debug, Clone)]
pub struct SharedRecognizer {
    config: Arc<Config>,
    cell: Arc<OnceCell<Arc<dyn EntityRecognizer>>>,
}

impl SharedRecognizer {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            cell: Arc::new(OnceCell::new()),
        }
    }

    /// Wraps a model that is already built.
    pub fn from_recognizer(model: Arc<dyn EntityRecognizer>) -> Self {
        Self {
            config: Arc::new(Config::default()),
            cell: Arc::new(OnceCell::new_with(Some(model))),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }

    pub async fn get(&self) -> Result<Arc<dyn EntityRecognizer>> {
        self.cell
            .get_or_try_init(|| async {
                let model = create_recognizer(&self.config).await?;
                info!("🧠 Entity model initialized (using {})", model.name());
                Ok::<_, Error>(model)
            })
            .await
            .cloned()
    }
}
