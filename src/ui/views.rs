//! The two layouts for a result set: bordered article cards and the
//! three-column "Top Headlines" highlight grid.

use console::Style;
use std::sync::OnceLock;

use time::{OffsetDateTime, UtcOffset};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use url::Url;

use crate::news::{Article, Author, ResultSet};
use crate::util::sanitize::sanitize_for_terminal;
use crate::util::text::{clamp_lines, fit, wrap};

pub const CARDS_EMPTY: &str = "No articles found.";
pub const HIGHLIGHTS_EMPTY: &str = "No articles found for this category.";

/// Avatar slots before the rest collapse into a `+N` badge.
pub const MAX_AVATARS: usize = 3;

const GAP: usize = 2;
const MIN_COLUMN: usize = 24;
const DESCRIPTION_LINES: usize = 2;
const HIGHLIGHT_HEIGHT: usize = 9;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[month padding:none]/[day padding:none]/[year]");

pub fn card_columns(width: usize) -> usize {
    if width >= 100 { 2 } else { 1 }
}

pub fn highlight_columns(width: usize) -> usize {
    match width {
        w if w >= 120 => 3,
        w if w >= 80 => 2,
        _ => 1,
    }
}

/// Card grid: image, source, title, two-line description, authors, date.
pub fn card_grid(results: &ResultSet, selected: Option<usize>, width: usize) -> Vec<String> {
    if results.is_empty() {
        return vec![CARDS_EMPTY.to_string()];
    }
    let (cols, col_width) = column_layout(width, card_columns(width));
    let inner = col_width.saturating_sub(4).max(1);

    let mut lines = Vec::new();
    for (row, chunk) in results.articles.chunks(cols).enumerate() {
        let bodies: Vec<Vec<String>> = chunk.iter().map(|a| card_body(a, inner)).collect();
        let height = bodies.iter().map(Vec::len).max().unwrap_or(0);
        let boxes: Vec<Vec<String>> = bodies
            .into_iter()
            .enumerate()
            .map(|(i, body)| boxed(body, height, inner, selected == Some(row * cols + i)))
            .collect();
        lines.extend(join_row(&boxes, col_width));
    }
    lines
}

/// Highlight grid: dark cards with title and description pushed to the bottom.
pub fn highlight_grid(results: &ResultSet, selected: Option<usize>, width: usize) -> Vec<String> {
    if results.is_empty() {
        return vec![HIGHLIGHTS_EMPTY.to_string()];
    }
    let (cols, col_width) = column_layout(width, highlight_columns(width));

    let mut lines = Vec::new();
    for (row, chunk) in results.articles.chunks(cols).enumerate() {
        let cards: Vec<Vec<String>> = chunk
            .iter()
            .enumerate()
            .map(|(i, a)| highlight_card(a, col_width, selected == Some(row * cols + i)))
            .collect();
        lines.extend(join_row(&cards, col_width));
        lines.push(String::new());
    }
    lines
}

/// `(AL)(GH)` for up to three authors; beyond that two avatars and `(+N)`.
pub fn avatar_strip(authors: &[Author]) -> String {
    let shown = if authors.len() > MAX_AVATARS {
        MAX_AVATARS - 1
    } else {
        authors.len()
    };
    let mut out: String = authors[..shown]
        .iter()
        .map(|a| format!("({})", initials(&a.name)))
        .collect();
    if authors.len() > shown {
        out.push_str(&format!("(+{})", authors.len() - shown));
    }
    out
}

static LOCAL_OFFSET: OnceLock<UtcOffset> = OnceLock::new();

/// Read the local UTC offset for article dates. `time` only allows this while
/// the process is single-threaded; if it refuses, dates stay in UTC.
pub fn init_local_offset() {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let _ = LOCAL_OFFSET.set(offset);
}

/// Publication date as shown on cards, in local time.
pub fn format_date(ts: Option<OffsetDateTime>) -> String {
    let offset = LOCAL_OFFSET.get().copied().unwrap_or(UtcOffset::UTC);
    format_date_at(ts, offset)
}

fn format_date_at(ts: Option<OffsetDateTime>, offset: UtcOffset) -> String {
    ts.and_then(|t| t.to_offset(offset).format(DATE_FORMAT).ok())
        .unwrap_or_default()
}

fn card_body(article: &Article, inner: usize) -> Vec<String> {
    let dim = Style::new().dim();
    let source_style = Style::new().cyan();
    let title_style = Style::new().bold();

    let mut body = Vec::new();
    body.push(cell(&format!("▣ {}", image_label(&article.image)), inner, &dim));
    body.push(cell(&sanitize_for_terminal(&article.source.name), inner, &source_style));

    let title = sanitize_for_terminal(&article.title);
    for line in wrap(&title, inner) {
        body.push(cell(&line, inner, &title_style));
    }

    let desc = sanitize_for_terminal(&article.description);
    for line in clamp_lines(&desc, inner, DESCRIPTION_LINES) {
        body.push(cell(&line, inner, &dim));
    }

    if !article.authors.is_empty() {
        let names = article
            .authors
            .iter()
            .map(|a| sanitize_for_terminal(&a.name))
            .collect::<Vec<_>>()
            .join(", ");
        let row = format!("{} {}", avatar_strip(&article.authors), names);
        body.push(cell(&row, inner, &Style::new()));
    }

    let date = format_date(article.published_at);
    let read_more = "Read more";
    let spacer = inner.saturating_sub(read_more.len() + date.chars().count()).max(1);
    let footer = format!("{}{}{}", read_more, " ".repeat(spacer), date);
    body.push(cell(&footer, inner, &Style::new().blue()));
    body
}

fn highlight_card(article: &Article, width: usize, focused: bool) -> Vec<String> {
    let inner = width.saturating_sub(2).max(1);
    let bg = Style::new().white().on_black();
    let title_style = if focused {
        Style::new().yellow().bold().on_black()
    } else {
        Style::new().white().bold().on_black()
    };

    let title = clamp_lines(&sanitize_for_terminal(&article.title), inner, 3);
    let desc = clamp_lines(&sanitize_for_terminal(&article.description), inner, 4);

    let mut text: Vec<String> = Vec::new();
    text.extend(title.iter().map(|l| padded(l, inner, &title_style)));
    text.extend(desc.iter().map(|l| padded(l, inner, &bg)));

    let height = HIGHLIGHT_HEIGHT.max(text.len() + 1);
    let mut card = vec![padded("", inner, &bg); height - text.len()];
    card.extend(text);
    card
}

fn column_layout(width: usize, wanted: usize) -> (usize, usize) {
    let width = width.max(MIN_COLUMN);
    let mut cols = wanted.max(1);
    while cols > 1 && (width - GAP * (cols - 1)) / cols < MIN_COLUMN {
        cols -= 1;
    }
    let col_width = (width - GAP * (cols - 1)) / cols;
    (cols, col_width)
}

fn boxed(body: Vec<String>, height: usize, inner: usize, focused: bool) -> Vec<String> {
    let border = if focused {
        Style::new().cyan().bold()
    } else {
        Style::new().dim()
    };
    let rule = "─".repeat(inner + 2);
    let side = border.apply_to("│").to_string();

    let mut out = Vec::with_capacity(height + 2);
    out.push(border.apply_to(format!("┌{}┐", rule)).to_string());
    let blank = " ".repeat(inner);
    for i in 0..height {
        let content = body.get(i).map(String::as_str).unwrap_or(&blank);
        out.push(format!("{} {} {}", side, content, side));
    }
    out.push(border.apply_to(format!("└{}┘", rule)).to_string());
    out
}

fn join_row(cards: &[Vec<String>], col_width: usize) -> Vec<String> {
    let height = cards.iter().map(Vec::len).max().unwrap_or(0);
    let blank = " ".repeat(col_width);
    let sep = " ".repeat(GAP);
    (0..height)
        .map(|i| {
            cards
                .iter()
                .map(|c| c.get(i).map(String::as_str).unwrap_or(&blank))
                .collect::<Vec<_>>()
                .join(sep.as_str())
        })
        .collect()
}

fn cell(text: &str, width: usize, style: &Style) -> String {
    style.apply_to(fit(text, width)).to_string()
}

// One column of margin on each side, inside the background.
fn padded(text: &str, inner: usize, style: &Style) -> String {
    style.apply_to(format!(" {} ", fit(text, inner))).to_string()
}

fn image_label(image: &str) -> String {
    if image.trim().is_empty() {
        return "no image".to_string();
    }
    match Url::parse(image) {
        Ok(u) => format!("{}{}", u.host_str().unwrap_or_default(), u.path()),
        Err(_) => sanitize_for_terminal(image),
    }
}

fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|w| w.chars().find(|c| c.is_alphanumeric()))
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if letters.is_empty() { "?".to_string() } else { letters }
}
