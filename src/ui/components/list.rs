//! Record list body: column headings, rows and the detail pane of the
//! selected record.

use super::render_border;
use super::table::{render_table_headers, render_table_rows};
use crate::ui::helpers::{display_width, fit, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailLine, ListView};

/// Width of the label column in the detail pane.
const DETAIL_LABEL_WIDTH: usize = 14;

/// Renders the list between `start_row` and `bottom_border`.
///
/// ```text
/// NAME              DISTRICT             DETAILS
/// GHSS Kollam       Kollam               120 people
/// ──────────────────────────────────────────────────
///  Location       Near bus stand
///  Contact        9876543210
/// ```
///
/// The detail pane sits directly above `bottom_border`.
pub fn render_list(start_row: usize, bottom_border: usize, list: &ListView, theme: &Theme, cols: usize) {
    let row = render_table_headers(start_row, theme, cols);

    if list.no_matches {
        let message = "No records match this district";
        let padding = cols.saturating_sub(display_width(message)) / 2;
        position_cursor(row + 1, 1);
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{}{message}", " ".repeat(padding));
        print!("{}", Theme::reset());
        return;
    }

    render_table_rows(row, &list.items, theme, cols);

    if !list.details.is_empty() {
        let detail_border = bottom_border.saturating_sub(list.details.len() + 1);
        if detail_border > row {
            render_details(detail_border, &list.details, theme, cols);
        }
    }
}

fn render_details(border_row: usize, details: &[DetailLine], theme: &Theme, cols: usize) {
    let mut row = render_border(border_row, &theme.colors.border, cols);
    let value_width = cols.saturating_sub(DETAIL_LABEL_WIDTH + 2);

    for line in details {
        position_cursor(row, 1);
        print!(" ");
        print!("{}", Theme::fg(&theme.colors.accent_fg));
        print!("{}", fit(&line.label, DETAIL_LABEL_WIDTH));
        print!(" ");
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{}", truncate(&line.value, value_width));
        print!("{}", Theme::reset());
        row += 1;
    }
}
