//! Core types for the flashcard deck.

use crate::markup::RenderedText;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Parser configuration for one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Character delimiting strong-emphasis spans inside card text.
    /// Datasets are expected to use one marker consistently.
    pub emphasis_marker: char,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            emphasis_marker: '*',
        }
    }
}

/// One question/answer unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub subject: String,
    pub chapter: String,
    /// Integer tag >= 1 used for filtering within a chapter.
    pub difficulty: u32,
    /// Trimmed source text, markers included.
    pub raw_front: String,
    pub raw_back: String,
    /// Rendered form with emphasis and line breaks expanded.
    pub front: RenderedText,
    pub back: RenderedText,
}

/// Subject scope applied to chapter visibility and activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectFilter {
    All,
    Subject(String),
}

impl Default for SubjectFilter {
    fn default() -> Self {
        Self::All
    }
}

impl SubjectFilter {
    pub fn matches(&self, card: &Card) -> bool {
        match self {
            Self::All => true,
            Self::Subject(subject) => card.subject == *subject,
        }
    }
}

/// Parsed dataset: cards in chapter-grouped order plus chapter metadata.
///
/// Built once by the parser and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
    chapters: Vec<String>,
    difficulties: BTreeMap<String, BTreeSet<u32>>,
}

impl Deck {
    pub(crate) fn new(
        cards: Vec<Card>,
        chapters: Vec<String>,
        difficulties: BTreeMap<String, BTreeSet<u32>>,
    ) -> Self {
        Self {
            cards,
            chapters,
            difficulties,
        }
    }

    /// All cards, grouped by chapter in first-seen chapter order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Chapter names in first-seen order.
    pub fn chapters(&self) -> &[String] {
        &self.chapters
    }

    /// Chapter name at `index`.
    pub fn chapter(&self, index: usize) -> Option<&str> {
        self.chapters.get(index).map(String::as_str)
    }

    /// Distinct difficulties observed in a chapter, ascending.
    pub fn difficulties(&self, chapter: &str) -> Vec<u32> {
        self.difficulties
            .get(chapter)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub(crate) fn difficulty_sets(&self) -> &BTreeMap<String, BTreeSet<u32>> {
        &self.difficulties
    }

    /// Distinct subjects, lexicographically sorted.
    pub fn subjects(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.cards.iter().map(|c| c.subject.as_str()).collect();
        set.into_iter().map(str::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
