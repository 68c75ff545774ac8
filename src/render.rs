// File: src/render.rs
use crate::config::{BrowserConfig, Theme};
use crate::core::engine::DeckSession;
use crate::core::types::WordEntry;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};

/// Card accent colours, picked by `id % ACCENTS.len()`.
pub const ACCENTS: [Color; 5] = [
    Color::Rgb { r: 0x3b, g: 0x82, b: 0xf6 },
    Color::Rgb { r: 0x06, g: 0xb6, b: 0xd4 },
    Color::Rgb { r: 0x8b, g: 0x5c, b: 0xf6 },
    Color::Rgb { r: 0xf5, g: 0x9e, b: 0x0b },
    Color::Rgb { r: 0x22, g: 0xc5, b: 0x5e },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub strong: Color,
    pub muted: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                background: Color::Rgb { r: 0xf8, g: 0xfa, b: 0xfc },
                text: Color::Rgb { r: 0x33, g: 0x41, b: 0x55 },
                strong: Color::Rgb { r: 0x0f, g: 0x17, b: 0x2a },
                muted: Color::Rgb { r: 0x64, g: 0x74, b: 0x8b },
            },
            Theme::Dark => Palette {
                background: Color::Rgb { r: 0x0b, g: 0x12, b: 0x20 },
                text: Color::Rgb { r: 0xcb, g: 0xd5, b: 0xe1 },
                strong: Color::Rgb { r: 0xf8, g: 0xfa, b: 0xfc },
                muted: Color::Rgb { r: 0x94, g: 0xa3, b: 0xb8 },
            },
        }
    }
}

/// Everything shown on one flashcard, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id_label: String,
    pub source: String,
    pub pronunciation: String,
    pub target: String,
    pub accent: usize,
}

impl CardView {
    pub fn new(entry: &WordEntry, session: &DeckSession) -> Self {
        Self {
            id_label: format!("#{:04}", entry.id),
            source: entry.source_text.clone(),
            pronunciation: session.phonetic_hint(&entry.source_text),
            target: entry.target_text.clone(),
            accent: entry.id as usize % ACCENTS.len(),
        }
    }
}

/// Formats a count with comma thousands separators: 2000 -> "2,000".
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn match_label(count: usize) -> String {
    format!("{} cards match", group_thousands(count))
}

pub fn header_label(title: &str, total: usize) -> String {
    format!("{} • {} words", title, group_thousands(total))
}

/// Front-end state that is not part of the browsing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<'a> {
    pub theme: Theme,
    pub search_focused: bool,
    pub status: Option<&'a str>,
}

/// Queues a full redraw of the browser screen.
pub fn draw<W: Write>(out: &mut W, session: &DeckSession, config: &BrowserConfig, frame: &Frame) -> io::Result<()> {
    let palette = Palette::for_theme(frame.theme);
    queue!(
        out,
        SetBackgroundColor(palette.background),
        Clear(ClearType::All),
        MoveTo(2, 1),
        SetForegroundColor(palette.strong),
        SetAttribute(Attribute::Bold),
        Print(header_label(&config.title, session.total_count())),
        SetAttribute(Attribute::Reset),
        SetBackgroundColor(palette.background),
    )?;

    let cursor_mark = if frame.search_focused { "▏" } else { "" };
    queue!(
        out,
        MoveTo(2, 3),
        SetForegroundColor(palette.muted),
        Print("Search: "),
        SetForegroundColor(palette.text),
        Print(format!("{}{}", session.query(), cursor_mark)),
        MoveTo(2, 4),
        SetForegroundColor(palette.muted),
        Print(format!("{}   [{}]", match_label(session.match_count()), session.mode().label())),
    )?;

    match session.current_entry() {
        Some(entry) => draw_card(out, &CardView::new(entry, session), config, &palette)?,
        None => queue!(
            out,
            MoveTo(4, 7),
            SetForegroundColor(palette.strong),
            Print("No matches found"),
            MoveTo(4, 8),
            SetForegroundColor(palette.muted),
            Print("Try another keyword or reset the search."),
        )?,
    }

    if let Some((position, count)) = session.position() {
        queue!(
            out,
            MoveTo(2, 16),
            SetForegroundColor(palette.muted),
            Print(format!("{} / {}", group_thousands(position), group_thousands(count))),
        )?;
    }

    queue!(
        out,
        MoveTo(2, 18),
        SetForegroundColor(palette.muted),
        Print("←/→ prev/next  r random  d deck start  / search  x clear  s order  t theme  e/i say  q quit"),
    )?;
    if let Some(status) = frame.status {
        queue!(out, MoveTo(2, 19), SetForegroundColor(palette.text), Print(status))?;
    }
    queue!(out, ResetColor)?;
    out.flush()
}

fn draw_card<W: Write>(out: &mut W, card: &CardView, config: &BrowserConfig, palette: &Palette) -> io::Result<()> {
    let accent = ACCENTS[card.accent];
    queue!(
        out,
        MoveTo(4, 6),
        SetForegroundColor(palette.muted),
        Print(config.source_label.to_uppercase()),
        Print("  "),
        SetForegroundColor(accent),
        Print(&card.id_label),
        MoveTo(4, 8),
        SetForegroundColor(palette.strong),
        SetAttribute(Attribute::Bold),
        Print(&card.source),
        SetAttribute(Attribute::Reset),
        SetBackgroundColor(palette.background),
        MoveTo(4, 10),
        SetForegroundColor(palette.muted),
        Print("Pronunciation "),
        SetForegroundColor(palette.text),
        Print(&card.pronunciation),
        MoveTo(4, 12),
        SetForegroundColor(palette.muted),
        Print(config.target_label.to_uppercase()),
        MoveTo(4, 13),
        SetForegroundColor(palette.text),
        Print(&card.target),
    )
}
