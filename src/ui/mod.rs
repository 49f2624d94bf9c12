mod views;

pub use views::{
    CARDS_EMPTY, HIGHLIGHTS_EMPTY, avatar_strip, card_grid, format_date, highlight_grid,
    init_local_offset,
};

use console::{Style, Term};
use std::io;

use crate::browser::pager::{PageItem, page_items, pager_visible};
use crate::browser::{BrowserState, Focus, ViewMode};
use crate::news::Category;
use crate::util::text::fit;

const MIN_WIDTH: usize = 40;

/// Clear the terminal and draw one full frame.
pub fn draw(term: &Term, state: &BrowserState, header: Option<&str>) -> io::Result<()> {
    let (_rows, cols) = term.size();
    let frame = render_screen(state, header, cols as usize);
    term.clear_screen()?;
    term.write_str(&frame.join("\n"))?;
    term.write_line("")?;
    term.flush()
}

/// Every line of a frame, top to bottom.
pub fn render_screen(state: &BrowserState, header: Option<&str>, width: usize) -> Vec<String> {
    let width = width.max(MIN_WIDTH);
    let mut lines = Vec::new();

    if let Some(h) = header {
        lines.push(h.to_string());
    }
    lines.push(title_line(state, width));
    lines.push(category_bar(state, width));
    lines.push(search_line(state, width));
    lines.push(String::new());

    let heading = match state.view {
        ViewMode::Cards => "Latest",
        ViewMode::Highlights => "Top Headlines",
    };
    lines.push(Style::new().bold().apply_to(heading).to_string());
    lines.push(Style::new().dim().apply_to("─".repeat(width)).to_string());

    let body = match state.view {
        ViewMode::Cards => card_grid(&state.results, state.selected, width),
        ViewMode::Highlights => highlight_grid(&state.results, state.selected, width),
    };
    lines.extend(body);

    if pager_visible(state.view, state.results.total) {
        lines.push(String::new());
        lines.push(pager_line(state.query.page, state.page_count(), width));
    }

    lines.push(String::new());
    if let Focus::PageJump(typed) = &state.focus {
        lines.push(format!(
            "Go to page (1-{}): {}█  Enter = go, Esc = cancel",
            state.page_count().max(1),
            typed
        ));
    }
    lines.push(Style::new().dim().apply_to(help_line(&state.focus)).to_string());
    lines
}

fn title_line(state: &BrowserState, width: usize) -> String {
    let status = if state.loading {
        "loading…".to_string()
    } else if state.results.total > 0 {
        format!("{} results", state.results.total)
    } else {
        String::new()
    };
    let title = "News Browser";
    let gap = width.saturating_sub(title.len() + status.chars().count()).max(1);
    format!(
        "{}{}{}",
        Style::new().bold().apply_to(title),
        " ".repeat(gap),
        Style::new().yellow().apply_to(status)
    )
}

fn category_bar(state: &BrowserState, width: usize) -> String {
    let active = Style::new().reverse().bold();
    let idle = Style::new().dim();
    let highlight = (!state.is_searching()).then_some(state.query.category);

    let mut used = 0;
    let mut out = String::new();
    for (i, cat) in Category::ALL.into_iter().enumerate() {
        let chip = format!(" {} {} ", i + 1, cat.label());
        if used + chip.len() > width {
            break;
        }
        used += chip.len();
        let style = if highlight == Some(cat) { &active } else { &idle };
        out.push_str(&style.apply_to(chip).to_string());
    }
    out
}

fn search_line(state: &BrowserState, width: usize) -> String {
    let editing = state.focus == Focus::Search;
    let cursor = if editing { "█" } else { "" };
    let mut text = format!("Search: {}{}", state.search_input, cursor);
    if let crate::news::Filter::Search(q) = state.query.filter() {
        text.push_str(&format!("   (results for \"{}\")", q));
    }
    let text = fit(&text, width);
    if editing {
        Style::new().bold().apply_to(text).to_string()
    } else {
        text
    }
}

/// `‹ 1 … 4 [5] 6 … 12 ›`, centered.
pub fn pager_line(current: u32, count: u32, width: usize) -> String {
    let mut parts = vec!["‹".to_string()];
    for item in page_items(current, count) {
        parts.push(match item {
            PageItem::Page(p) if p == current => format!("[{}]", p),
            PageItem::Page(p) => p.to_string(),
            PageItem::Gap => "…".to_string(),
        });
    }
    parts.push("›".to_string());
    let strip = parts.join(" ");
    let pad = width.saturating_sub(strip.chars().count()) / 2;
    format!("{}{}", " ".repeat(pad), strip)
}

fn help_line(focus: &Focus) -> &'static str {
    match focus {
        Focus::Browse => {
            "Tab/1-7 = category, / = search, ←/→ = page, g = go to page, ↑/↓ = select, Enter = open, v = view, q = quit"
        }
        Focus::Search => "Type to search (applies after a pause), Enter = search now, Esc = done",
        Focus::PageJump(_) => "Digits = page number, Enter = go, Esc = cancel",
    }
}
