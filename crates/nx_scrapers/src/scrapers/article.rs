use std::sync::Arc;
use async_trait::async_trait;
use nx_core::{ArticleRecord, Result};
use crate::fetch::{FetchConfig, HttpFetcher, PageFetcher};
use crate::logging::Logger;
use crate::scrapers::{extract_document, Scraper};
use crate::selectors::{CompiledSelectors, SelectorConfig};

/// Fetches an article page and reduces it to an [`ArticleRecord`].
///
/// Holds no per-call state, so one instance can serve any number of calls.
#[derive(Debug, Clone)]
pub struct ArticleExtractor {
    source: String,
    fetcher: Arc<dyn PageFetcher>,
    selectors: CompiledSelectors,
}

impl ArticleExtractor {
    pub fn new(
        source: impl Into<String>,
        fetcher: Arc<dyn PageFetcher>,
        config: &SelectorConfig,
    ) -> Result<Self> {
        Ok(Self {
            source: source.into(),
            fetcher,
            selectors: config.compile()?,
        })
    }

    /// BBC News layout over plain HTTP.
    pub fn bbc(fetch: &FetchConfig) -> Result<Self> {
        Self::new(
            "BBC News",
            Arc::new(HttpFetcher::new(fetch)?),
            &SelectorConfig::default(),
        )
    }

    pub fn selectors(&self) -> &CompiledSelectors {
        &self.selectors
    }

    pub async fn extract(&self, url: &str) -> Result<ArticleRecord> {
        let logger = Logger::new().with_prefix("📰").with_prefix(format!("[{}]", url));
        if !self.can_handle(url) {
            logger.warn(&format!(
                "host is not one of {:?}, extracting with the {} layout anyway",
                self.selectors.config().hosts,
                self.source
            ));
        }

        logger.debug("fetching page");
        let html = self.fetcher.fetch(url).await?;
        logger.debug(&format!("fetched {} bytes", html.len()));

        let record = extract_document(url, &html, &self.selectors)?;
        logger.info(&format!(
            "extracted \"{}\" ({} chars, published {})",
            record.title(),
            record.content().len(),
            record.date_published().unwrap_or("unknown")
        ));
        Ok(record)
    }
}

#[async_trait]
impl Scraper for ArticleExtractor {
    fn source(&self) -> &str {
        &self.source
    }

    fn can_handle(&self, url: &str) -> bool {
        self.selectors.config().matches_host(url)
    }

    async fn scrape_article(&self, url: &str) -> Result<ArticleRecord> {
        self.extract(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::StaticFetcher;
    use nx_core::Error;

    const URL: &str = "https://www.bbc.co.uk/news/uk-1";

    fn extractor(html: &str) -> ArticleExtractor {
        let fetcher = StaticFetcher::new().with_page(URL, html);
        ArticleExtractor::new("BBC News", Arc::new(fetcher), &SelectorConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_extract_through_fetcher() {
        let extractor = extractor(
            r#"<h1 id="main-heading">Hello</h1><time datetime="2021-01-02T03:04:05.000Z"></time><div class="css-uf6wea-RichTextComponentWrapper e1xue1i82"><p>World</p></div>"#,
        );
        let record = extractor.scrape_article(URL).await.unwrap();
        assert_eq!(record.title(), "Hello");
        assert_eq!(record.date_published(), Some("02 January 2021"));
        assert_eq!(record.content(), "World");
        assert_eq!(extractor.source(), "BBC News");
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let extractor = extractor("");
        let err = extractor.extract("https://www.bbc.co.uk/news/other").await.unwrap_err();
        assert!(matches!(err, Error::PageNotFound(_)));
    }

    #[tokio::test]
    async fn test_no_partial_record_on_missing_heading() {
        let extractor = extractor(r#"<time datetime="2021-01-02T03:04:05.000Z"></time>"#);
        let err = extractor.extract(URL).await.unwrap_err();
        assert!(err.is_markup());
    }

    #[test]
    fn test_can_handle() {
        let extractor = extractor("");
        assert!(extractor.can_handle("https://www.bbc.co.uk/news/uk-52255054"));
        assert!(!extractor.can_handle("https://www.clarin.com/article"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SelectorConfig {
            title: "h1[".to_string(),
            ..SelectorConfig::default()
        };
        let result = ArticleExtractor::new("x", Arc::new(StaticFetcher::new()), &config);
        assert!(matches!(result, Err(Error::InvalidSelector { field: "title", .. })));
    }
}
