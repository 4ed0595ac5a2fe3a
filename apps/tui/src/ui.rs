//! Screen rendering.

use crate::app::App;
use crate::i18n;
use cardbox_core::{RenderedText, SubjectFilter};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    match app.session.active_chapter() {
        None => draw_chapter_list(frame, area, app),
        Some(_) => draw_flashcard(frame, area, app),
    }
    if app.show_versions {
        draw_version_log(frame, area, app);
    }
}

fn draw_chapter_list(frame: &mut Frame, area: Rect, app: &App) {
    let t = i18n::text(app.language);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(area);

    let subject = match app.session.subject() {
        SubjectFilter::All => t.all_subjects,
        SubjectFilter::Subject(name) => i18n::subject_label(name, app.language),
    };
    let header = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(t.title, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("  {}", version_tag(app)),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(format!("{}: {}", t.subject, subject)),
    ]);
    frame.render_widget(header, chunks[0]);

    let entries = app.session.chapter_entries();
    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let boxes: Vec<String> = app
                .session
                .difficulties(&entry.name)
                .iter()
                .map(|level| {
                    let mark = if app.session.is_selected(&entry.name, *level) {
                        "x"
                    } else {
                        " "
                    };
                    format!("[{mark}] {}{level}", t.difficulty)
                })
                .collect();
            ListItem::new(vec![
                Line::from(format!(
                    "{}  {} {} {}",
                    entry.name, entry.card_count, t.of, entry.card_count
                )),
                Line::from(Span::styled(
                    format!("    {}", boxes.join("  ")),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(t.chapters))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select((!entries.is_empty()).then_some(app.chapter_cursor));
    frame.render_stateful_widget(list, chunks[1], &mut state);

    let footer = format!(
        "Enter: {}  1-9: {}  s: {}  v: {}  q: {}",
        t.go, t.difficulty, t.subject, t.version_log, t.quit
    );
    draw_footer(frame, chunks[2], app, footer);
}

fn draw_flashcard(frame: &mut Frame, area: Rect, app: &App) {
    let t = i18n::text(app.language);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(area);

    let chapter = app.session.active_chapter_name().unwrap_or_default();
    let (position, total) = app.session.progress().unwrap_or((0, 0));
    let header = Paragraph::new(Line::from(vec![
        Span::styled(chapter.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("   {position} {} {total}", t.of)),
    ]));
    frame.render_widget(header, chunks[0]);

    let body = match app.session.active_card() {
        Some(card) => card_text(if app.flipped { &card.back } else { &card.front }),
        None => Text::default(),
    };
    let border = if app.flipped {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let card = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).border_style(border))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    frame.render_widget(card, chunks[1]);

    let footer = if let Some(buffer) = &app.jump_input {
        format!("{}{buffer}_", t.jump_to)
    } else {
        format!(
            "Space: {}  \u{2190}/\u{2192}: {}/{}  j: {}  Esc: {}  q: {}",
            t.flip,
            t.previous,
            t.next,
            t.jump_to.trim(),
            t.back,
            t.quit
        )
    };
    draw_footer(frame, chunks[2], app, footer);
}

/// Hint line, replaced by the one-shot notice when present.
fn draw_footer(frame: &mut Frame, area: Rect, app: &App, hints: String) {
    let line = match &app.notice {
        Some(notice) => Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        None => Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray))),
    };
    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::TOP)),
        area,
    );
}

fn card_text(text: &RenderedText) -> Text<'_> {
    let lines: Vec<Line> = text
        .lines
        .iter()
        .map(|line| {
            Line::from(
                line.iter()
                    .map(|segment| {
                        if segment.strong {
                            Span::styled(
                                segment.text.as_str(),
                                Style::default()
                                    .fg(Color::Cyan)
                                    .add_modifier(Modifier::BOLD),
                            )
                        } else {
                            Span::raw(segment.text.as_str())
                        }
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    Text::from(lines)
}

fn draw_version_log(frame: &mut Frame, area: Rect, app: &App) {
    let t = i18n::text(app.language);
    let rect = centered_rect(70, 60, area);
    frame.render_widget(Clear, rect);

    let mut lines = Vec::new();
    for entry in &app.versions {
        lines.push(Line::from(vec![
            Span::styled(
                format!("v{}", entry.version),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", entry.date),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.push(Line::from(entry.description.clone()));
        lines.push(Line::default());
    }
    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(t.version_log))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, rect);
}

fn version_tag(app: &App) -> String {
    app.versions
        .first()
        .map(|entry| format!("v{}", entry.version))
        .unwrap_or_default()
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1]);
    horiz[1]
}
