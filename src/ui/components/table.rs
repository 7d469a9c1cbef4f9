//! Record table: title, district and summary columns.

use crate::ui::helpers::{self, display_width, fit, position_cursor, DISTRICT_WIDTH};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Renders the column headings at `row`. Returns the next free row.
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    let title_width = helpers::title_column_width(cols);
    let line = format!("{} {} {}", fit("NAME", title_width), fit("DISTRICT", DISTRICT_WIDTH), "DETAILS");

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", fit(&line, cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders `items` one per row from `row`. Returns the next free row.
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    let title_width = helpers::title_column_width(cols);
    let summary_width = cols.saturating_sub(title_width + DISTRICT_WIDTH + 2);

    position_cursor(row, 1);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    print!("{} ", fit(&item.title, title_width));

    let district = helpers::truncate(&item.district, DISTRICT_WIDTH);
    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.accent_fg));
    }
    helpers::render_highlighted_text(
        &district,
        item.highlight_range,
        theme,
        &theme.colors.accent_fg,
        item.is_selected,
    );
    print!("{} ", " ".repeat(DISTRICT_WIDTH.saturating_sub(display_width(&district))));

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", fit(&item.summary, summary_width));

    print!("{}", Theme::reset());
    row + 1
}
