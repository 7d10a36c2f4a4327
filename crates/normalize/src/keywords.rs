//! Keyword extraction.
//!
//! Keywords are the raw whitespace-delimited tokens of a profile's free-text
//! fields, deduplicated by exact match. No case folding, stemming or
//! punctuation stripping happens here; downstream search indexes do their own.
use std::collections::HashSet;

use crate::types::Profile;

/// An insertion-ordered set of tokens borrowed from the source texts.
#[derive(Debug, Default, Clone)]
pub struct KeywordSet<'a> {
    seen: HashSet<&'a str>,
    tokens: Vec<&'a str>,
}

impl<'a> KeywordSet<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every whitespace-delimited token of `text` not already present.
    pub fn extend_from(&mut self, text: &'a str) {
        for token in text.split_whitespace() {
            if self.seen.insert(token) {
                self.tokens.push(token);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.seen.contains(token)
    }

    /// Tokens in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.tokens.iter().copied()
    }

    /// Space-joined tokens.
    pub fn join(&self) -> String {
        self.tokens.join(" ")
    }
}

/// Collects keywords from summary, headline, skill names, language names and
/// each position's title and description, in that order.
pub fn extract_keywords(profile: &Profile) -> KeywordSet<'_> {
    let mut set = KeywordSet::new();
    set.extend_from(&profile.summary);
    set.extend_from(&profile.headline);
    for skill in &profile.skills {
        set.extend_from(&skill.name);
    }
    for language in &profile.languages {
        set.extend_from(&language.name);
    }
    for position in &profile.positions {
        set.extend_from(&position.title);
        set.extend_from(&position.description);
    }
    set
}
