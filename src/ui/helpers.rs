//! Shared rendering utilities.
//!
//! Widths here are counted in `char`s, not bytes, so labels such as "loading…"
//! pad correctly.

use crate::ui::theme::Theme;

/// Narrowest the title column gets.
const MIN_TITLE_WIDTH: usize = 16;

/// Widest the title column gets.
const MAX_TITLE_WIDTH: usize = 40;

/// Width of the district column.
pub const DISTRICT_WIDTH: usize = 20;

/// Positions the cursor at a 1-indexed `row` and `col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Width of the title column for a pane `cols` wide.
#[must_use]
pub const fn title_column_width(cols: usize) -> usize {
    let width = cols / 3;
    if width < MIN_TITLE_WIDTH {
        MIN_TITLE_WIDTH
    } else if width > MAX_TITLE_WIDTH {
        MAX_TITLE_WIDTH
    } else {
        width
    }
}

/// Number of terminal cells `text` takes, assuming single-width characters.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to `max` characters, marking the cut with `…`.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if display_width(text) <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Truncates or right-pads `text` to exactly `width` characters.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let cut = truncate(text, width);
    let pad = width.saturating_sub(display_width(&cut));
    format!("{cut}{}", " ".repeat(pad))
}

/// Splits `text` into lines of at most `width` characters at spaces. Words
/// longer than `width` are hard-cut.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            lines.push(word.drain(..width).collect());
        }
        let word: String = word.into_iter().collect();

        let separator = usize::from(!line.is_empty());
        if display_width(&line) + separator + display_width(&word) > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&word);
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Prints `text` with the character range `range` in match colors, then
/// switches back to `base_fg`.
///
/// Selected rows skip match colors so the selection background stays intact.
pub fn render_highlighted_text(
    text: &str,
    range: Option<(usize, usize)>,
    theme: &Theme,
    base_fg: &str,
    is_selected: bool,
) {
    let Some((start, end)) = range.filter(|_| !is_selected) else {
        print!("{text}");
        return;
    };

    let chars: Vec<char> = text.chars().collect();
    let end = end.min(chars.len());
    let start = start.min(end);

    let before: String = chars[..start].iter().collect();
    let matched: String = chars[start..end].iter().collect();
    let after: String = chars[end..].iter().collect();

    print!("{before}");
    print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
    print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
    print!("{matched}");
    print!("{}", Theme::reset());
    print!("{}", Theme::fg(base_fg));
    print!("{after}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_column_is_clamped() {
        assert_eq!(title_column_width(30), MIN_TITLE_WIDTH);
        assert_eq!(title_column_width(90), 30);
        assert_eq!(title_column_width(300), MAX_TITLE_WIDTH);
    }

    #[test]
    fn fit_pads_and_truncates_by_chars() {
        assert_eq!(fit("Kochi", 7), "Kochi  ");
        assert_eq!(fit("Thiruvananthapuram", 6), "Thiru…");
        assert_eq!(display_width(&fit("loading…", 10)), 10);
    }

    #[test]
    fn wrap_breaks_at_spaces() {
        assert_eq!(
            wrap("Phone number must be exactly 10 digits", 16),
            vec!["Phone number", "must be exactly", "10 digits"]
        );
        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert!(wrap("", 10).is_empty());
    }
}
