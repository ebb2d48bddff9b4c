use nx_inference::EntityClassifier;
use nx_scrapers::ArticleExtractor;

/// Shared by every request; nothing in here is mutated after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub extractor: ArticleExtractor,
    pub classifier: EntityClassifier,
}
