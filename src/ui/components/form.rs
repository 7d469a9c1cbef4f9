//! Registration form body.

use crate::ui::helpers::{fit, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FormFieldView, FormView};

const LABEL_WIDTH: usize = 20;

/// Left margin of the form.
const MARGIN: usize = 3;

/// Renders one field per two rows from `row`, then the submit line. Returns
/// the next free row.
///
/// ```text
///    Organization Name   ▏Relief Trust
///    District            ◀ Kollam ▶
///
///    [ Register ]
/// ```
pub fn render_form(row: usize, form: &FormView, theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for field in &form.fields {
        render_field(current_row, field, theme, cols);
        current_row += 2;
    }

    position_cursor(current_row, MARGIN + 1);
    if form.is_pending {
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("Submitting…");
    } else {
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.accent_fg));
        print!("[ Register ]");
    }
    print!("{}", Theme::reset());

    current_row + 1
}

fn render_field(row: usize, field: &FormFieldView, theme: &Theme, cols: usize) {
    let value_width = cols.saturating_sub(MARGIN + LABEL_WIDTH + 2);

    position_cursor(row, MARGIN + 1);
    if field.is_focused {
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.accent_fg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", fit(&field.label, LABEL_WIDTH));
    print!("{}", Theme::reset());

    let (text, placeholder) = match (field.is_choice, field.value.is_empty()) {
        (true, true) => ("◀ Select district ▶".to_string(), true),
        (true, false) => (format!("◀ {} ▶", field.value), false),
        (false, _) => {
            let cursor = if field.is_focused { "▏" } else { "" };
            (format!("{}{cursor}", field.value), false)
        }
    };
    let text = truncate(&text, value_width);

    if placeholder {
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.text_dim));
    } else if field.is_focused {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    print!("{text}");
    print!("{}", Theme::reset());
}
