//! cardbox — a terminal flashcard study tool for pipe-delimited datasets.

mod app;
mod i18n;
mod ui;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cardbox_core::{is_newest_first, parse_versions, parse_with, ParseOptions};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;

const EMBEDDED_DECK: &str = include_str!("../assets/deck.txt");
const EMBEDDED_VERSIONS: &str = include_str!("../assets/versions.txt");

#[derive(Debug, Parser)]
#[command(
    name = "cardbox",
    version,
    about = "Flashcard study tool for pipe-delimited datasets"
)]
struct Cli {
    /// Dataset file, one `subject|chapter|difficulty|front|back` row per card
    /// (subject may be omitted); the embedded sample deck is used when absent.
    #[arg(long, global = true)]
    deck: Option<PathBuf>,

    /// Version-log file (`version|date|description` rows, newest first).
    #[arg(long, global = true)]
    versions: Option<PathBuf>,

    /// Emphasis marker used by the dataset.
    #[arg(long, default_value_t = '*', global = true)]
    marker: char,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Study the deck interactively (the default).
    Study,
    /// Validate the dataset and print a summary.
    Check,
    /// Print the normalized deck as JSON.
    Export,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let deck_text = read_input(cli.deck.as_deref(), EMBEDDED_DECK)?;
    let versions_text = read_input(cli.versions.as_deref(), EMBEDDED_VERSIONS)?;
    let options = ParseOptions {
        emphasis_marker: cli.marker,
    };

    match cli.command.unwrap_or(Command::Study) {
        Command::Study => study(&deck_text, &versions_text, options),
        Command::Check => check(&deck_text, &versions_text, options),
        Command::Export => export(&deck_text, options),
    }
}

fn read_input(path: Option<&Path>, embedded: &str) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => Ok(embedded.to_string()),
    }
}

fn study(deck_text: &str, versions_text: &str, options: ParseOptions) -> Result<()> {
    // A dataset that fails to parse is surfaced once, before any UI comes up.
    let deck = parse_with(deck_text, options).context("failed to parse flashcard data")?;
    let versions = parse_versions(versions_text);
    if !is_newest_first(&versions) {
        tracing::warn!("version log is not in newest-first order");
    }
    let mut app = App::new(deck, versions);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while !app.should_quit() {
        terminal.draw(|frame| ui::draw(frame, app))?;
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }
    }
    Ok(())
}

fn check(deck_text: &str, versions_text: &str, options: ParseOptions) -> Result<()> {
    let deck = parse_with(deck_text, options).context("dataset failed validation")?;
    println!(
        "{} cards, {} chapters, {} subjects",
        deck.len(),
        deck.chapters().len(),
        deck.subjects().len()
    );
    for chapter in deck.chapters() {
        let count = deck
            .cards()
            .iter()
            .filter(|card| card.chapter == *chapter)
            .count();
        let levels: Vec<String> = deck
            .difficulties(chapter)
            .iter()
            .map(u32::to_string)
            .collect();
        println!("  {chapter}: {count} cards, difficulties {{{}}}", levels.join(","));
    }
    println!("subjects: {}", deck.subjects().join(", "));

    let versions = parse_versions(versions_text);
    println!("{} version entries", versions.len());
    if !is_newest_first(&versions) {
        tracing::warn!("version log is not in newest-first order");
    }
    Ok(())
}

fn export(deck_text: &str, options: ParseOptions) -> Result<()> {
    let deck = parse_with(deck_text, options).context("dataset failed validation")?;
    println!("{}", serde_json::to_string_pretty(&deck)?);
    Ok(())
}
