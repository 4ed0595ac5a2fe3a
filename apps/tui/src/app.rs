//! Interactive application state and key handling.

use crate::i18n::{self, Language};
use cardbox_core::{Deck, NavError, Session, SubjectFilter, VersionEntry};
use crossterm::event::{KeyCode, KeyEvent};

/// Everything the TUI mutates between frames: the core session plus
/// presentation-only state (cursor, flip, jump input, overlays).
pub struct App {
    pub session: Session,
    pub versions: Vec<VersionEntry>,
    pub language: Language,
    /// Position within the visible chapter entries.
    pub chapter_cursor: usize,
    pub flipped: bool,
    /// Digits typed into the jump prompt, when it is open.
    pub jump_input: Option<String>,
    /// One-shot message shown in the footer, cleared on the next key.
    pub notice: Option<String>,
    pub show_versions: bool,
    quit: bool,
}

impl App {
    pub fn new(deck: Deck, versions: Vec<VersionEntry>) -> Self {
        let language = if deck
            .subjects()
            .iter()
            .any(|subject| subject == i18n::CHINESE_SUBJECT)
        {
            Language::ZhTw
        } else {
            Language::En
        };
        Self {
            session: Session::new(deck),
            versions,
            language,
            chapter_cursor: 0,
            flipped: false,
            jump_input: None,
            notice: None,
            show_versions: false,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.notice = None;

        if self.show_versions {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('v') | KeyCode::Char('q')
            ) {
                self.show_versions = false;
            }
            return;
        }
        if self.jump_input.is_some() {
            self.handle_jump_key(key);
            return;
        }
        match self.session.active_chapter() {
            None => self.handle_chapter_list_key(key),
            Some(_) => self.handle_flashcard_key(key),
        }
    }

    fn handle_chapter_list_key(&mut self, key: KeyEvent) {
        let entries = self.session.chapter_entries();
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('v') => self.show_versions = true,
            KeyCode::Char('s') => self.cycle_subject(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.chapter_cursor = self.chapter_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.chapter_cursor + 1 < entries.len() {
                    self.chapter_cursor += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(entry) = entries.get(self.chapter_cursor) {
                    if self.session.enter_chapter(entry.index) {
                        self.flipped = false;
                    }
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let (Some(entry), Some(difficulty)) =
                    (entries.get(self.chapter_cursor), c.to_digit(10))
                {
                    // Only levels the chapter actually has get a checkbox.
                    if self.session.difficulties(&entry.name).contains(&difficulty) {
                        self.session.toggle_difficulty(&entry.name, difficulty);
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_flashcard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('v') => self.show_versions = true,
            KeyCode::Esc | KeyCode::Char('b') => {
                self.session.leave_chapter();
                self.flipped = false;
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.flipped = !self.flipped,
            KeyCode::Left | KeyCode::Char('p') => {
                let before = self.session.progress();
                self.session.previous();
                if self.session.progress() != before {
                    self.flipped = false;
                }
            }
            KeyCode::Right | KeyCode::Char('n') => {
                let before = self.session.progress();
                self.session.next();
                if self.session.progress() != before {
                    self.flipped = false;
                }
            }
            KeyCode::Char('j') => self.jump_input = Some(String::new()),
            _ => {}
        }
    }

    fn handle_jump_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(buffer) = self.jump_input.as_mut() {
                    if buffer.len() < 6 {
                        buffer.push(c);
                    }
                }
            }
            KeyCode::Backspace => {
                if let Some(buffer) = self.jump_input.as_mut() {
                    buffer.pop();
                }
            }
            KeyCode::Esc => self.jump_input = None,
            KeyCode::Enter => {
                let input = self.jump_input.take().unwrap_or_default();
                self.submit_jump(&input);
            }
            _ => {}
        }
    }

    fn submit_jump(&mut self, input: &str) {
        // Empty or non-numeric input falls through as an out-of-range zero.
        let number = input.trim().parse::<usize>().unwrap_or(0);
        match self.session.jump_to(number) {
            Ok(()) => self.flipped = false,
            Err(NavError::OutOfRange { total, .. }) => {
                let t = i18n::text(self.language);
                self.notice = Some(format!("{}1-{}", t.jump_to, total));
            }
            Err(NavError::NoActiveChapter) => {}
        }
    }

    /// Cycle All -> subjects in order -> All, switching the UI language the
    /// way subject selection does.
    fn cycle_subject(&mut self) {
        let subjects = self.session.subjects();
        let next = match self.session.subject() {
            SubjectFilter::All => subjects
                .first()
                .cloned()
                .map(SubjectFilter::Subject)
                .unwrap_or(SubjectFilter::All),
            SubjectFilter::Subject(current) => match subjects.iter().position(|s| s == current) {
                Some(i) if i + 1 < subjects.len() => {
                    SubjectFilter::Subject(subjects[i + 1].clone())
                }
                _ => SubjectFilter::All,
            },
        };
        self.language = match &next {
            SubjectFilter::Subject(name) => Language::for_subject(name),
            SubjectFilter::All => Language::En,
        };
        self.session.set_subject(next);

        let visible = self.session.chapter_entries().len();
        self.chapter_cursor = self.chapter_cursor.min(visible.saturating_sub(1));
    }
}
