use serde::{Deserialize, Serialize};
use std::fmt;

/// A news article reduced to the fields we extract from its page.
///
/// Built once per extraction and never mutated afterwards; fields are only
/// exposed through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    #[serde(rename = "URL")]
    url: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(
        rename = "Date_published",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    date_published: Option<String>,
    #[serde(rename = "Content")]
    content: String,
}

impl ArticleRecord {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        date_published: Option<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            date_published,
            content: content.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn date_published(&self) -> Option<&str> {
        self.date_published.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Category tag attached to a recognized span.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityLabel {
    /// `ORG`
    Organization,
    /// `GPE`, a geopolitical entity.
    Place,
    /// `PERSON`
    Person,
    /// Any other tag the model emits (`DATE`, `MONEY`, `NORP`...).
    Other(String),
}

impl EntityLabel {
    pub fn as_tag(&self) -> &str {
        match self {
            EntityLabel::Organization => "ORG",
            EntityLabel::Place => "GPE",
            EntityLabel::Person => "PERSON",
            EntityLabel::Other(tag) => tag,
        }
    }
}

impl From<&str> for EntityLabel {
    fn from(tag: &str) -> Self {
        match tag {
            "ORG" => EntityLabel::Organization,
            "GPE" => EntityLabel::Place,
            "PERSON" => EntityLabel::Person,
            other => EntityLabel::Other(other.to_string()),
        }
    }
}

impl From<String> for EntityLabel {
    fn from(tag: String) -> Self {
        EntityLabel::from(tag.as_str())
    }
}

impl From<EntityLabel> for String {
    fn from(label: EntityLabel) -> Self {
        label.as_tag().to_string()
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityAnnotation {
    pub text: String,
    pub label: EntityLabel,
}

impl EntityAnnotation {
    pub fn new(text: impl Into<String>, label: impl Into<EntityLabel>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// Entities partitioned by category, each list in annotation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityBuckets {
    pub people: Vec<String>,
    pub places: Vec<String>,
    pub organisations: Vec<String>,
}

impl EntityBuckets {
    /// Routes one annotation into its bucket. Returns `false` when the label
    /// has no bucket and the annotation was dropped.
    pub fn push(&mut self, annotation: EntityAnnotation) -> bool {
        let bucket = match annotation.label {
            EntityLabel::Organization => &mut self.organisations,
            EntityLabel::Place => &mut self.places,
            EntityLabel::Person => &mut self.people,
            EntityLabel::Other(_) => return false,
        };
        bucket.push(annotation.text);
        true
    }

    pub fn from_annotations<I>(annotations: I) -> Self
    where
        I: IntoIterator<Item = EntityAnnotation>,
    {
        let mut buckets = Self::default();
        for annotation in annotations {
            buckets.push(annotation);
        }
        buckets
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty() && self.places.is_empty() && self.organisations.is_empty()
    }
}
