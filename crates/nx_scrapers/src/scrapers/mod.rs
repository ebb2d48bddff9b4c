use async_trait::async_trait;
use nx_core::{ArticleRecord, Error, Result};
use scraper::Html;
use crate::date::normalize_timestamp;
use crate::selectors::CompiledSelectors;

pub mod article;

pub use article::ArticleExtractor;

#[async_trait]
pub trait Scraper: Send + Sync {
    /// Returns the name of the news source
    fn source(&self) -> &str;

    /// Returns true if the page layout this scraper knows applies to the URL
    fn can_handle(&self, url: &str) -> bool;

    /// Fetches the URL and builds its record
    async fn scrape_article(&self, url: &str) -> Result<ArticleRecord>;
}

/// Builds an [`ArticleRecord`] from an already fetched page.
///
/// Fails with [`Error::MissingElement`] when the heading or the time element
/// is absent, and with [`Error::DateParse`] when the timestamp is malformed.
/// A time element without the timestamp attribute leaves the date empty.
pub fn extract_document(url: &str, html: &str, selectors: &CompiledSelectors) -> Result<ArticleRecord> {
    let document = Html::parse_document(html);
    let config = selectors.config();

    let title = document
        .select(&selectors.title)
        .next()
        .map(|el| el.text().collect::<String>())
        .ok_or_else(|| Error::MissingElement {
            field: "title",
            selector: config.title.clone(),
        })?;

    let time = document
        .select(&selectors.date)
        .next()
        .ok_or_else(|| Error::MissingElement {
            field: "date",
            selector: config.date.clone(),
        })?;
    let date_published = time
        .value()
        .attr(&config.date_attribute)
        .map(normalize_timestamp)
        .transpose()?;

    let content = utils::paragraph_blocks(&document, selectors).join(" ");

    Ok(ArticleRecord::new(url, title, date_published, content))
}

pub(crate) mod utils {
    use scraper::{ElementRef, Html, Selector};
    use crate::selectors::CompiledSelectors;

    /// Text of every text node under `element`, skipping anything inside a
    /// descendant matching `strip`.
    pub fn visible_text(element: ElementRef<'_>, strip: Option<&Selector>) -> String {
        let stripped: Vec<_> = match strip {
            Some(selector) => element.select(selector).map(|el| el.id()).collect(),
            None => Vec::new(),
        };

        let mut text = String::new();
        for node in element.descendants() {
            if let Some(fragment) = node.value().as_text() {
                if node.ancestors().any(|ancestor| stripped.contains(&ancestor.id())) {
                    continue;
                }
                text.push_str(fragment);
            }
        }
        text
    }

    /// True when `element` holds a `paragraph` match outside every stripped
    /// descendant.
    pub fn has_visible(element: ElementRef<'_>, paragraph: &Selector, strip: Option<&Selector>) -> bool {
        let stripped: Vec<_> = match strip {
            Some(selector) => element.select(selector).map(|el| el.id()).collect(),
            None => Vec::new(),
        };

        element.select(paragraph).any(|p| {
            !stripped.contains(&p.id()) && !p.ancestors().any(|ancestor| stripped.contains(&ancestor.id()))
        })
    }

    /// Visible text of each content block that holds at least one paragraph,
    /// in document order. List-only blocks are skipped.
    pub fn paragraph_blocks(document: &Html, selectors: &CompiledSelectors) -> Vec<String> {
        let strip = selectors.strip.as_ref();
        document
            .select(&selectors.content_block)
            .filter(|block| has_visible(*block, &selectors.paragraph, strip))
            .map(|block| visible_text(block, strip))
            .collect()
    }
}
