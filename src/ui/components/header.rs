//! Header: screen tabs, then the screen title with data freshness.

use crate::ui::helpers::{display_width, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the two header rows starting at `row`. Returns the next free row.
///
/// ```text
///  1 Organizations   2 Requirements   3 Camps   4 Vehicles   5 Register
///  Camp List (12)                                     updated 3m ago
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    let mut used = 0;
    for tab in &header.tabs {
        let label = format!(" {} {} ", tab.key, tab.label);
        let width = display_width(&label) + 1;
        if used + width > cols {
            break;
        }

        if tab.is_active {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.tab_active_fg));
            print!("{}", Theme::bg(&theme.colors.tab_active_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        print!("{label}");
        print!("{} ", Theme::reset());
        used += width;
    }
    print!("{}", " ".repeat(cols.saturating_sub(used)));

    let status = header.status.as_deref().unwrap_or("");
    let status_len = display_width(status) + 1;
    let title = truncate(&header.title, cols.saturating_sub(status_len));
    let title_len = display_width(&title);

    position_cursor(row + 1, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{title}");
    print!("{}", Theme::reset());
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", " ".repeat(cols.saturating_sub(title_len + status_len)));
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{status} ");
    print!("{}", Theme::reset());

    row + 2
}
