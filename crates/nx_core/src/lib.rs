pub mod error;
pub mod models;
pub mod types;

pub use error::{Error, Result};
pub use models::EntityRecognizer;
pub use types::{ArticleRecord, EntityAnnotation, EntityBuckets, EntityLabel};
