//! Width-aware text layout for fixed-width terminal cells.

use console::{Alignment, measure_text_width, pad_str, truncate_str};

const ELLIPSIS: &str = "…";

/// Greedy word wrap to `width` columns. Words longer than a line are cut.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;

    for word in text.split_whitespace() {
        let mut word = word.to_string();
        let mut word_width = measure_text_width(&word);

        while word_width > width {
            if line_width > 0 {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            let (head, tail) = split_at_width(&word, width);
            lines.push(head);
            word = tail;
            word_width = measure_text_width(&word);
        }
        if word.is_empty() {
            continue;
        }

        let needed = if line_width == 0 { word_width } else { line_width + 1 + word_width };
        if needed > width {
            lines.push(std::mem::take(&mut line));
            line_width = 0;
        }
        if line_width > 0 {
            line.push(' ');
            line_width += 1;
        }
        line.push_str(&word);
        line_width += word_width;
    }
    if line_width > 0 {
        lines.push(line);
    }
    lines
}

/// Wrap and keep at most `max_lines`, ending the last kept line with an
/// ellipsis when something was cut.
pub fn clamp_lines(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines = wrap(text, width);
    if lines.len() <= max_lines {
        return lines;
    }
    lines.truncate(max_lines);
    if let Some(last) = lines.last_mut() {
        let room = width.saturating_sub(measure_text_width(ELLIPSIS));
        let cut = truncate_str(last, room, "").into_owned();
        *last = format!("{}{}", cut.trim_end(), ELLIPSIS);
    }
    lines
}

/// Exactly `width` columns: truncated with an ellipsis or padded with spaces.
pub fn fit(text: &str, width: usize) -> String {
    pad_str(text, width, Alignment::Left, Some(ELLIPSIS)).into_owned()
}

/// Split off the longest prefix that fits in `width` columns.
fn split_at_width(word: &str, width: usize) -> (String, String) {
    let mut used = 0;
    for (idx, ch) in word.char_indices() {
        let w = measure_text_width(ch.encode_utf8(&mut [0; 4]));
        if used + w > width && idx > 0 {
            return (word[..idx].to_string(), word[idx..].to_string());
        }
        used += w;
    }
    (word.to_string(), String::new())
}
