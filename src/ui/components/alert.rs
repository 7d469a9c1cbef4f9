//! Modal alert box drawn over the rest of the frame.

use crate::ui::helpers::{display_width, fit, position_cursor, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::AlertInfo;

const MAX_ALERT_WIDTH: usize = 50;

const DISMISS_HINT: &str = "Press any key";

/// Renders `alert` centered in a `rows` x `cols` pane.
///
/// ```text
/// ┌ Error ───────────────────────┐
/// │ Phone number must be exactly │
/// │ 10 digits                    │
/// │                              │
/// │ Press any key                │
/// └──────────────────────────────┘
/// ```
pub fn render_alert(alert: &AlertInfo, theme: &Theme, rows: usize, cols: usize) {
    let box_width = cols.saturating_sub(4).min(MAX_ALERT_WIDTH).max(12);
    let inner_width = box_width.saturating_sub(4);

    let mut lines = wrap(&alert.message, inner_width);
    lines.push(String::new());
    lines.push(DISMISS_HINT.to_string());

    let box_height = lines.len() + 2;
    let top = rows.saturating_sub(box_height) / 2 + 1;
    let left = cols.saturating_sub(box_width) / 2 + 1;

    let title = fit(&format!(" {} ", alert.title), inner_width);
    let title = title.trim_end();
    let top_rule = box_width.saturating_sub(display_width(title) + 3);

    position_cursor(top, left);
    open_box(theme);
    print!("┌─");
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{title}");
    print!("{}", Theme::reset());
    open_box(theme);
    print!("{}┐", "─".repeat(top_rule));
    print!("{}", Theme::reset());

    for (offset, line) in lines.iter().enumerate() {
        position_cursor(top + 1 + offset, left);
        open_box(theme);
        print!("│ ");
        if line == DISMISS_HINT {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        print!("{}", fit(line, inner_width));
        print!("{}", Theme::fg(&theme.colors.alert_border));
        print!(" │");
        print!("{}", Theme::reset());
    }

    position_cursor(top + box_height - 1, left);
    open_box(theme);
    print!("└{}┘", "─".repeat(box_width.saturating_sub(2)));
    print!("{}", Theme::reset());
}

fn open_box(theme: &Theme) {
    print!("{}", Theme::fg(&theme.colors.alert_border));
    if let Some(bg) = &theme.colors.alert_bg {
        print!("{}", Theme::bg(bg));
    }
}
