pub mod date;
pub mod fetch;
pub mod logging;
pub mod scrapers;
pub mod selectors;

pub use fetch::{FetchConfig, HttpFetcher, PageFetcher, StaticFetcher};
pub use logging::init_logging;
pub use scrapers::{extract_document, ArticleExtractor, Scraper};
pub use selectors::{CompiledSelectors, SelectorConfig};

pub mod prelude {
    pub use super::scrapers::{ArticleExtractor, Scraper};
    pub use nx_core::{ArticleRecord, Error, Result};
}
