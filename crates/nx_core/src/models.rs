use async_trait::async_trait;
use std::fmt;
use crate::types::EntityAnnotation;
use crate::Result;

#[async_trait]
pub trait EntityRecognizer: Send + Sync + fmt::Debug {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Returns the entity spans found in `text`, in the order they occur
    async fn recognize(&self, text: &str) -> Result<Vec<EntityAnnotation>>;
}
