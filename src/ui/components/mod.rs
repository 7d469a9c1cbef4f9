//! Component renderers. Each one prints a single part of the frame at the
//! rows it is given and, where it makes sense, returns the next free row.
//!
//! - [`header`]: screen tabs, title and freshness
//! - [`search`]: district filter box
//! - [`list`]: record table plus detail pane
//! - [`empty`]: loading, failure and "nothing here" messages
//! - [`form`]: registration form
//! - [`alert`]: modal alert
//! - [`footer`]: keybinding hints

mod alert;
mod empty;
mod footer;
mod form;
mod header;
mod list;
mod search;
mod table;

pub use alert::render_alert;
pub use empty::render_empty_state;
pub use footer::render_footer;
pub use form::render_form;
pub use header::render_header;
pub use list::render_list;
pub use search::render_search_bar;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;

/// Renders a full-width horizontal rule at `row`. Returns the next free row.
pub fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}
