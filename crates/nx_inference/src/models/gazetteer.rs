use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;
use nx_core::{EntityAnnotation, EntityLabel, Result};
use super::EntityRecognizer;

/// English lexicon shipped with the crate, keyed by model tag.
pub const BUILTIN_LEXICON: &str = include_str!("../../data/en_lexicon.json");

/// Finds entities by looking phrases up in a fixed lexicon.
///
/// Matching is case-sensitive, on word boundaries, left to right, preferring
/// the longest phrase at each position. Output is fully deterministic.
pub struct GazetteerRecognizer {
    phrases: HashMap<String, EntityLabel>,
    max_words: usize,
}

impl fmt::Debug for GazetteerRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GazetteerRecognizer")
            .field("phrases", &self.phrases.len())
            .field("max_words", &self.max_words)
            .finish()
    }
}

impl GazetteerRecognizer {
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_LEXICON)
    }

    /// Expects `{"PERSON": [...], "ORG": [...], "GPE": [...]}`; any other tag
    /// is accepted and reported as [`EntityLabel::Other`].
    pub fn from_json(json: &str) -> Result<Self> {
        let lexicon: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        Ok(Self::from_lexicon(lexicon))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_lexicon(lexicon: BTreeMap<String, Vec<String>>) -> Self {
        let mut phrases = HashMap::new();
        let mut max_words = 0;
        for (tag, entries) in lexicon {
            let label = EntityLabel::from(tag);
            for entry in entries {
                let spans = words(&entry);
                let (Some(&(start, _)), Some(&(_, end))) = (spans.first(), spans.last()) else {
                    continue;
                };
                max_words = max_words.max(spans.len());
                phrases.insert(phrase_key(&entry[start..end]), label.clone());
            }
        }
        Self { phrases, max_words }
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    fn find(&self, text: &str) -> Vec<EntityAnnotation> {
        let spans = words(text);
        let mut found = Vec::new();
        let mut i = 0;
        'scan: while i < spans.len() {
            let longest = self.max_words.min(spans.len() - i);
            let (start, _) = spans[i];
            for len in (1..=longest).rev() {
                let (_, end) = spans[i + len - 1];
                if let Some(label) = self.phrases.get(&phrase_key(&text[start..end])) {
                    found.push(EntityAnnotation::new(&text[start..end], label.clone()));
                    i += len;
                    continue 'scan;
                }
            }
            i += 1;
        }
        found
    }
}

/// Lookup key of a phrase: its text with whitespace runs collapsed to one
/// space. Punctuation between words is kept, so `Tim, Cook` never matches
/// `Tim Cook`.
fn phrase_key(phrase: &str) -> String {
    phrase.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Byte spans of the words in `text`. A word is a run of alphanumerics,
/// hyphens and ampersands; everything else separates words.
fn words(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;
    for (idx, c) in text.char_indices() {
        let in_word = c.is_alphanumeric() || c == '-' || c == '&';
        match (in_word, start) {
            (true, None) => start = Some(idx),
            (false, Some(s)) => {
                spans.push((s, idx));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push((s, text.len()));
    }
    spans
}

#[async_trait::async_trait]
impl EntityRecognizer for GazetteerRecognizer {
    fn name(&self) -> &str {
        "Gazetteer"
    }

    async fn recognize(&self, text: &str) -> Result<Vec<EntityAnnotation>> {
        Ok(self.find(text))
    }
}
