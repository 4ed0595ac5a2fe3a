//! Pipe-delimited dataset parser.
//!
//! # Format
//! ```text
//! subject|chapter|difficulty|front|back
//! chapter|difficulty|front|back
//! ```
//!
//! One candidate card per line. The 4-field shape leaves the subject implicit;
//! fields past the fifth are ignored. Rows with fewer than four fields, or
//! with an empty chapter/front/back after trimming, are dropped without error.

use crate::error::{ParseError, Result};
use crate::markup;
use crate::types::{Card, Deck, ParseOptions};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Subject substituted when a row leaves the field empty.
pub const UNSPECIFIED_SUBJECT: &str = "Unspecified";

/// Parse dataset text into a deck with default options.
pub fn parse(content: &str) -> Result<Deck> {
    parse_with(content, ParseOptions::default())
}

/// Parse dataset text into a deck.
///
/// Fails only when the marker cannot survive field splitting or when no row
/// yields a card; everything else is normalized per field.
pub fn parse_with(content: &str, options: ParseOptions) -> Result<Deck> {
    let marker = options.emphasis_marker;
    if marker == '|' || marker.is_whitespace() {
        return Err(ParseError::ReservedMarker { marker });
    }

    let mut chapters: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, Vec<Card>> = HashMap::new();
    let mut difficulties: BTreeMap<String, BTreeSet<u32>> = BTreeMap::new();

    for (idx, line) in content.lines().enumerate() {
        let fields: Vec<&str> = line.trim().split('|').collect();
        let (subject, chapter, difficulty, front, back) = match fields.len() {
            0..=3 => {
                tracing::debug!(line = idx + 1, "dropping row below minimum field count");
                continue;
            }
            4 => ("", fields[0], fields[1], fields[2], fields[3]),
            _ => (fields[0], fields[1], fields[2], fields[3], fields[4]),
        };

        let subject = subject.trim();
        let subject = if subject.is_empty() {
            UNSPECIFIED_SUBJECT
        } else {
            subject
        };
        let chapter = chapter.trim();
        let front = front.trim();
        let back = back.trim();
        if chapter.is_empty() || front.is_empty() || back.is_empty() {
            tracing::debug!(line = idx + 1, "dropping row with empty required field");
            continue;
        }
        let difficulty = parse_difficulty(difficulty);

        if !grouped.contains_key(chapter) {
            chapters.push(chapter.to_string());
        }
        difficulties
            .entry(chapter.to_string())
            .or_default()
            .insert(difficulty);
        grouped.entry(chapter.to_string()).or_default().push(Card {
            subject: subject.to_string(),
            chapter: chapter.to_string(),
            difficulty,
            raw_front: front.to_string(),
            raw_back: back.to_string(),
            front: markup::render(front, marker),
            back: markup::render(back, marker),
        });
    }

    // Flatten chapter groups in appearance order, even if the source
    // interleaved them.
    let mut cards = Vec::new();
    for chapter in &chapters {
        if let Some(group) = grouped.remove(chapter) {
            cards.extend(group);
        }
    }

    if cards.is_empty() {
        return Err(ParseError::EmptyDeck);
    }
    Ok(Deck::new(cards, chapters, difficulties))
}

/// Difficulty field with `1` as the floor and the fallback.
fn parse_difficulty(field: &str) -> u32 {
    match field.trim().parse::<u32>() {
        Ok(0) | Err(_) => 1,
        Ok(value) => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_five_field_rows() {
        let deck = parse("Math|Algebra|2|front1|back1\nMath|Algebra|3|front2|back2").unwrap();
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.chapters(), ["Algebra"]);
        assert_eq!(deck.cards()[0].subject, "Math");
        assert_eq!(deck.cards()[0].difficulty, 2);
        assert_eq!(deck.difficulties("Algebra"), vec![2, 3]);
    }

    #[test]
    fn parse_four_field_rows_get_implicit_subject() {
        let deck = parse("Algebra|1|front|back").unwrap();
        assert_eq!(deck.cards()[0].subject, UNSPECIFIED_SUBJECT);
        assert_eq!(deck.cards()[0].chapter, "Algebra");
    }

    #[test]
    fn empty_subject_field_defaults() {
        let deck = parse("|Algebra|1|front|back").unwrap();
        assert_eq!(deck.cards()[0].subject, UNSPECIFIED_SUBJECT);
    }

    #[test]
    fn short_rows_are_dropped_silently() {
        let deck = parse("just|three|fields\nMath|Algebra|1|front|back").unwrap();
        assert_eq!(deck.len(), 1);
        assert_eq!(deck.chapters(), ["Algebra"]);
    }

    #[test]
    fn short_rows_do_not_affect_difficulty_sets() {
        let deck = parse("Geometry|9|dangling\nMath|Algebra|1|front|back").unwrap();
        assert!(deck.difficulties("Geometry").is_empty());
        assert_eq!(deck.difficulties("Algebra"), vec![1]);
    }

    #[test]
    fn difficulty_defaults_to_one() {
        let deck = parse(
            "Math|Algebra||no difficulty|back\n\
             Math|Algebra|hard|non-numeric|back\n\
             Math|Algebra|0|zero|back",
        )
        .unwrap();
        assert!(deck.cards().iter().all(|c| c.difficulty == 1));
        assert_eq!(deck.difficulties("Algebra"), vec![1]);
    }

    #[test]
    fn rows_with_empty_required_fields_are_dropped() {
        let deck = parse(
            "Math||1|front|back\n\
             Math|Algebra|1||back\n\
             Math|Algebra|1|front|\n\
             Math|Algebra|1|front|back",
        )
        .unwrap();
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let deck = parse("Math|Algebra|1|front|back|extra|junk").unwrap();
        assert_eq!(deck.cards()[0].raw_back, "back");
    }

    #[test]
    fn chapters_keep_first_seen_order() {
        let deck = parse(
            "Math|B|1|f|b\n\
             Math|A|1|f|b\n\
             Math|C|1|f|b",
        )
        .unwrap();
        assert_eq!(deck.chapters(), ["B", "A", "C"]);
    }

    #[test]
    fn interleaved_chapters_are_regrouped() {
        let deck = parse(
            "Math|A|1|a1|b\n\
             Math|B|1|b1|b\n\
             Math|A|1|a2|b",
        )
        .unwrap();
        let fronts: Vec<&str> = deck.cards().iter().map(|c| c.raw_front.as_str()).collect();
        assert_eq!(fronts, ["a1", "a2", "b1"]);
    }

    #[test]
    fn markup_is_rendered_per_side() {
        let deck = parse("Math|Algebra|1|the *middle* term|top<br>bottom").unwrap();
        let card = &deck.cards()[0];
        assert!(card.front.lines[0].iter().any(|s| s.strong && s.text == "middle"));
        assert_eq!(card.back.plain(), "top\nbottom");
    }

    #[test]
    fn subjects_are_sorted() {
        let deck = parse(
            "Zoology|Z|1|f|b\n\
             Anatomy|A|1|f|b",
        )
        .unwrap();
        assert_eq!(deck.subjects(), ["Anatomy", "Zoology"]);
    }

    #[test]
    fn empty_input_is_an_empty_deck() {
        assert_eq!(parse(""), Err(ParseError::EmptyDeck));
        assert_eq!(parse("nothing here"), Err(ParseError::EmptyDeck));
    }

    #[test]
    fn reserved_marker_is_rejected() {
        let options = ParseOptions {
            emphasis_marker: '|',
        };
        assert_eq!(
            parse_with("Math|Algebra|1|front|back", options),
            Err(ParseError::ReservedMarker { marker: '|' })
        );
    }
}
