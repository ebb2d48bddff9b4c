use nx_core::{EntityBuckets, Result};
use tracing::{debug, info};
use crate::models::SharedRecognizer;

/// Sorts the entities found in a text into people, places and organisations.
#[derive(Debug, Clone)]
pub struct EntityClassifier {
    recognizer: SharedRecognizer,
}

impl EntityClassifier {
    pub fn new(recognizer: SharedRecognizer) -> Self {
        Self { recognizer }
    }

    pub async fn classify(&self, text: &str) -> Result<EntityBuckets> {
        let model = self.recognizer.get().await?;
        let annotations = model.recognize(text).await?;
        let total = annotations.len();

        let mut buckets = EntityBuckets::default();
        let mut dropped = 0;
        for annotation in annotations {
            let label = annotation.label.clone();
            if !buckets.push(annotation) {
                debug!("Dropping entity with unsupported label {}", label);
                dropped += 1;
            }
        }

        info!(
            "🏷️ {} entities from {} ({} people, {} places, {} organisations, {} dropped)",
            total,
            model.name(),
            buckets.people.len(),
            buckets.places.len(),
            buckets.organisations.len(),
            dropped
        );
        Ok(buckets)
    }
}
