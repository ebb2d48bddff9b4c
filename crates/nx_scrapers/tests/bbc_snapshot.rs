use std::sync::Arc;
use nx_core::{ArticleRecord, Error};
use nx_scrapers::{extract_document, ArticleExtractor, SelectorConfig, StaticFetcher};

const URL: &str = "https://www.bbc.co.uk/news/uk-52255054";
const PAGE: &str = include_str!("fixtures/bbc_uk_52255054.html");
const GOLDEN: &str = include_str!("fixtures/bbc_uk_52255054.json");

fn golden() -> ArticleRecord {
    serde_json::from_str(GOLDEN).unwrap()
}

#[tokio::test]
async fn test_snapshot_matches_golden_record() {
    let fetcher = StaticFetcher::new().with_page(URL, PAGE);
    let extractor = ArticleExtractor::new("BBC News", Arc::new(fetcher), &SelectorConfig::default()).unwrap();

    let record = extractor.extract(URL).await.unwrap();
    let expected = golden();

    assert_eq!(record.title(), "Coronavirus: 'We need Easter as much as ever,' says the Queen");
    assert_eq!(record.date_published(), Some("11 April 2020"));
    assert_eq!(record.content(), expected.content());
    assert_eq!(record, expected);
}

#[test]
fn test_snapshot_serializes_to_contract() {
    let selectors = SelectorConfig::default().compile().unwrap();
    let record = extract_document(URL, PAGE, &selectors).unwrap();

    let actual: serde_json::Value = serde_json::to_value(&record).unwrap();
    let expected: serde_json::Value = serde_json::from_str(GOLDEN).unwrap();
    assert_eq!(actual, expected);
}

#[test]
fn test_snapshot_excludes_list_blocks_and_styles() {
    let selectors = SelectorConfig::default().compile().unwrap();
    let record = extract_document(URL, PAGE, &selectors).unwrap();

    assert!(!record.content().contains("A visual guide to the outbreak"));
    assert!(!record.content().contains("We will succeed' in coronavirus fight"));
    assert!(!record.content().contains("RichTextContainer"));
}

#[test]
fn test_snapshot_without_heading_fails() {
    let selectors = SelectorConfig::default().compile().unwrap();
    let page = PAGE.replace(r#"id="main-heading""#, r#"id="sub-heading""#);
    let err = extract_document(URL, &page, &selectors).unwrap_err();
    assert!(matches!(err, Error::MissingElement { field: "title", .. }));
}

#[test]
fn test_snapshot_without_datetime_omits_date() {
    let selectors = SelectorConfig::default().compile().unwrap();
    let page = PAGE.replace(r#" datetime="2020-04-11T19:01:56.000Z""#, "");
    let record = extract_document(URL, &page, &selectors).unwrap();
    let expected = golden();

    assert_eq!(record.date_published(), None);
    assert_eq!(record.title(), expected.title());
    assert_eq!(record.content(), expected.content());

    let value = serde_json::to_value(&record).unwrap();
    assert!(value.get("Date_published").is_none());
    assert_eq!(value["URL"], URL);
}
