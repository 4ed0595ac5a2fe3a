//! Core library for the cardbox flashcard tool.
//!
//! Provides:
//! - Pipe-delimited dataset parser (subject/chapter/difficulty-tagged cards)
//! - Card text rendering (emphasis spans, line-break markers)
//! - Navigation and filter state for one study session
//! - Version-log parsing

pub mod error;
pub mod markup;
pub mod parser;
pub mod session;
pub mod types;
pub mod version;

pub use error::{NavError, ParseError, Result};
pub use markup::{render, RenderedText, Segment};
pub use parser::{parse, parse_with, UNSPECIFIED_SUBJECT};
pub use session::{ChapterEntry, Session};
pub use types::{Card, Deck, ParseOptions, SubjectFilter};
pub use version::{is_newest_first, parse_versions, VersionEntry};
