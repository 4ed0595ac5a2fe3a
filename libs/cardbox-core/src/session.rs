//! Navigation and filter state for one study session.
//!
//! A [`Session`] owns the parsed deck and every selection the user can make:
//! the subject filter, the per-chapter difficulty selection, and the active
//! chapter/card pointers. Presentation code reads the derived views and calls
//! the mutators; nothing here is ambient or persisted.

use crate::error::NavError;
use crate::types::{Card, Deck, SubjectFilter};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// One row of the chapter list under the current subject filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterEntry {
    /// Index into [`Deck::chapters`], stable across filter changes.
    pub index: usize,
    pub name: String,
    /// Cards matching the subject filter. The difficulty selection applies at
    /// activation, not here.
    pub card_count: usize,
}

/// Which screen the session is on.
#[derive(Debug, Clone, PartialEq, Eq)]
enum View {
    ChapterList,
    Flashcards {
        chapter: usize,
        card: usize,
        /// Indices into the deck's card list, materialized at activation.
        cards: Vec<usize>,
    },
}

/// All mutable state of one study session.
#[derive(Debug, Clone)]
pub struct Session {
    deck: Deck,
    subject: SubjectFilter,
    selected: BTreeMap<String, BTreeSet<u32>>,
    view: View,
}

impl Session {
    /// Start on the chapter list with every difficulty selected and no
    /// subject filter.
    pub fn new(deck: Deck) -> Self {
        let selected = deck.difficulty_sets().clone();
        Self {
            deck,
            subject: SubjectFilter::All,
            selected,
            view: View::ChapterList,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn subject(&self) -> &SubjectFilter {
        &self.subject
    }

    /// Replace the subject filter. Changes chapter visibility only; an
    /// already-active chapter session is untouched.
    pub fn set_subject(&mut self, subject: SubjectFilter) {
        self.subject = subject;
    }

    /// Distinct subjects of the deck, lexicographically sorted.
    pub fn subjects(&self) -> Vec<String> {
        self.deck.subjects()
    }

    /// Chapters with at least one card matching the subject filter, in deck
    /// order. Chapters with none are hidden entirely.
    pub fn chapter_entries(&self) -> Vec<ChapterEntry> {
        self.deck
            .chapters()
            .iter()
            .enumerate()
            .filter_map(|(index, name)| {
                let card_count = self
                    .deck
                    .cards()
                    .iter()
                    .filter(|card| card.chapter == *name && self.subject.matches(card))
                    .count();
                (card_count > 0).then(|| ChapterEntry {
                    index,
                    name: name.clone(),
                    card_count,
                })
            })
            .collect()
    }

    /// Distinct difficulties observed in a chapter, ascending.
    pub fn difficulties(&self, chapter: &str) -> Vec<u32> {
        self.deck.difficulties(chapter)
    }

    /// Whether a difficulty is currently selected for a chapter.
    pub fn is_selected(&self, chapter: &str, difficulty: u32) -> bool {
        self.selected
            .get(chapter)
            .is_some_and(|set| set.contains(&difficulty))
    }

    /// Toggle one difficulty for a chapter. Takes effect on the next
    /// activation; an already-active card list is never refiltered.
    pub fn toggle_difficulty(&mut self, chapter: &str, difficulty: u32) {
        if let Some(set) = self.selected.get_mut(chapter) {
            if !set.remove(&difficulty) {
                set.insert(difficulty);
            }
        }
    }

    /// Activate a chapter by deck index, materializing the filtered card list
    /// and resetting the pointer. Returns `false` (and stays on the chapter
    /// list) when no card matches the current filters.
    pub fn enter_chapter(&mut self, index: usize) -> bool {
        let Some(chapter) = self.deck.chapter(index) else {
            return false;
        };
        let empty = BTreeSet::new();
        let selected = self.selected.get(chapter).unwrap_or(&empty);
        let cards: Vec<usize> = self
            .deck
            .cards()
            .iter()
            .enumerate()
            .filter(|(_, card)| {
                card.chapter == chapter
                    && selected.contains(&card.difficulty)
                    && self.subject.matches(card)
            })
            .map(|(i, _)| i)
            .collect();

        if cards.is_empty() {
            return false;
        }
        self.view = View::Flashcards {
            chapter: index,
            card: 0,
            cards,
        };
        true
    }

    /// Return to the chapter list.
    pub fn leave_chapter(&mut self) {
        self.view = View::ChapterList;
    }

    /// Index of the active chapter, if any.
    pub fn active_chapter(&self) -> Option<usize> {
        match &self.view {
            View::ChapterList => None,
            View::Flashcards { chapter, .. } => Some(*chapter),
        }
    }

    /// Name of the active chapter, if any.
    pub fn active_chapter_name(&self) -> Option<&str> {
        self.active_chapter().and_then(|i| self.deck.chapter(i))
    }

    /// Move to the previous card; no-op at the first card.
    pub fn previous(&mut self) {
        if let View::Flashcards { card, .. } = &mut self.view {
            *card = card.saturating_sub(1);
        }
    }

    /// Move to the next card; no-op at the last card.
    pub fn next(&mut self) {
        if let View::Flashcards { card, cards, .. } = &mut self.view {
            if *card + 1 < cards.len() {
                *card += 1;
            }
        }
    }

    /// Jump to a 1-based card number within the active list. Out-of-range
    /// input reports the valid bounds and leaves the pointer alone.
    pub fn jump_to(&mut self, number: usize) -> Result<(), NavError> {
        let View::Flashcards { card, cards, .. } = &mut self.view else {
            return Err(NavError::NoActiveChapter);
        };
        if number < 1 || number > cards.len() {
            return Err(NavError::OutOfRange {
                requested: number,
                total: cards.len(),
            });
        }
        *card = number - 1;
        Ok(())
    }

    /// The card under the pointer.
    pub fn active_card(&self) -> Option<&Card> {
        match &self.view {
            View::ChapterList => None,
            View::Flashcards { card, cards, .. } => {
                cards.get(*card).and_then(|&i| self.deck.cards().get(i))
            }
        }
    }

    /// 1-based position and total of the active card list.
    pub fn progress(&self) -> Option<(usize, usize)> {
        match &self.view {
            View::ChapterList => None,
            View::Flashcards { card, cards, .. } => Some((*card + 1, cards.len())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    fn session(rows: &str) -> Session {
        Session::new(parse(rows).unwrap())
    }

    #[test]
    fn enter_chapter_materializes_and_resets_pointer() {
        let mut s = session("Math|A|1|f1|b1\nMath|A|2|f2|b2");
        assert!(s.enter_chapter(0));
        assert_eq!(s.progress(), Some((1, 2)));
        assert_eq!(s.active_card().unwrap().raw_front, "f1");
    }

    #[test]
    fn enter_unknown_chapter_is_a_noop() {
        let mut s = session("Math|A|1|f|b");
        assert!(!s.enter_chapter(5));
        assert_eq!(s.active_chapter(), None);
    }

    #[test]
    fn enter_with_no_matching_cards_stays_on_chapter_list() {
        let mut s = session("Math|A|1|f|b");
        s.toggle_difficulty("A", 1);
        assert!(!s.enter_chapter(0));
        assert_eq!(s.active_chapter(), None);
        assert_eq!(s.active_card(), None);
        assert_eq!(s.progress(), None);
    }

    #[test]
    fn pointer_clamps_at_both_ends() {
        let mut s = session("Math|A|1|f1|b1\nMath|A|1|f2|b2");
        s.enter_chapter(0);
        s.previous();
        assert_eq!(s.progress(), Some((1, 2)));
        s.next();
        s.next();
        s.next();
        assert_eq!(s.progress(), Some((2, 2)));
    }

    #[test]
    fn jump_to_is_one_based() {
        let mut s = session("Math|A|1|f1|b1\nMath|A|1|f2|b2\nMath|A|1|f3|b3");
        s.enter_chapter(0);
        assert_eq!(s.jump_to(3), Ok(()));
        assert_eq!(s.active_card().unwrap().raw_front, "f3");
    }

    #[test]
    fn jump_out_of_range_reports_bounds_and_keeps_pointer() {
        let mut s = session("Math|A|1|f1|b1\nMath|A|1|f2|b2\nMath|A|1|f3|b3");
        s.enter_chapter(0);
        s.next();
        assert_eq!(
            s.jump_to(5),
            Err(NavError::OutOfRange {
                requested: 5,
                total: 3
            })
        );
        assert_eq!(
            s.jump_to(0),
            Err(NavError::OutOfRange {
                requested: 0,
                total: 3
            })
        );
        assert_eq!(s.progress(), Some((2, 3)));
    }

    #[test]
    fn jump_without_active_chapter_fails() {
        let mut s = session("Math|A|1|f|b");
        assert_eq!(s.jump_to(1), Err(NavError::NoActiveChapter));
    }

    #[test]
    fn out_of_range_message_names_the_bounds() {
        let err = NavError::OutOfRange {
            requested: 5,
            total: 3,
        };
        assert_eq!(
            err.to_string(),
            "card number 5 out of range (valid: 1-3)"
        );
    }

    #[test]
    fn difficulty_toggle_applies_on_next_activation() {
        let mut s = session("Math|A|1|front1|back1\nMath|A|2|front2|back2");
        assert_eq!(s.difficulties("A"), vec![1, 2]);

        s.enter_chapter(0);
        s.toggle_difficulty("A", 2);
        // The active list is a snapshot; the toggle must not refilter it.
        assert_eq!(s.progress(), Some((1, 2)));

        s.enter_chapter(0);
        assert_eq!(s.progress(), Some((1, 1)));
        assert_eq!(s.active_card().unwrap().raw_front, "front1");

        s.toggle_difficulty("A", 2);
        s.enter_chapter(0);
        assert_eq!(s.progress(), Some((1, 2)));
    }

    #[test]
    fn subject_filter_hides_chapters_without_matches() {
        let mut s = session("Bio|A|1|f|b\nChem|B|1|f|b");
        assert_eq!(s.chapter_entries().len(), 2);

        s.set_subject(SubjectFilter::Subject("Bio".to_string()));
        let entries = s.chapter_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "A");
        assert_eq!(entries[0].index, 0);
        assert_eq!(entries[0].card_count, 1);
    }

    #[test]
    fn subject_change_leaves_active_session_alone() {
        let mut s = session("Bio|A|1|f1|b1\nChem|A|1|f2|b2");
        s.enter_chapter(0);
        assert_eq!(s.progress(), Some((1, 2)));

        s.set_subject(SubjectFilter::Subject("Bio".to_string()));
        assert_eq!(s.progress(), Some((1, 2)));

        // The new filter applies on re-activation.
        s.enter_chapter(0);
        assert_eq!(s.progress(), Some((1, 1)));
        assert_eq!(s.active_card().unwrap().subject, "Bio");
    }

    #[test]
    fn subject_filter_applies_at_activation() {
        let mut s = session("Bio|A|1|f1|b1\nChem|B|1|f2|b2");
        s.set_subject(SubjectFilter::Subject("Bio".to_string()));
        assert!(!s.enter_chapter(1));
        assert!(s.enter_chapter(0));
    }

    #[test]
    fn pointer_resets_on_reactivation() {
        let mut s = session("Math|A|1|f1|b1\nMath|A|1|f2|b2");
        s.enter_chapter(0);
        s.next();
        assert_eq!(s.progress(), Some((2, 2)));
        s.enter_chapter(0);
        assert_eq!(s.progress(), Some((1, 2)));
    }

    #[test]
    fn leave_chapter_returns_to_list() {
        let mut s = session("Math|A|1|f|b");
        s.enter_chapter(0);
        s.leave_chapter();
        assert_eq!(s.active_chapter(), None);
        assert_eq!(s.active_card(), None);
    }

    #[test]
    fn end_to_end_difficulty_selection() {
        let mut s = session("A|1|front1|back1\nA|2|front2|back2");
        assert_eq!(s.deck().chapters(), ["A"]);
        assert_eq!(s.difficulties("A"), vec![1, 2]);

        s.toggle_difficulty("A", 2);
        assert!(s.enter_chapter(0));
        assert_eq!(s.progress(), Some((1, 1)));
        let card = s.active_card().unwrap();
        assert_eq!(card.raw_front, "front1");
        assert_eq!(card.raw_back, "back1");
    }
}
