//! Top-level rendering coordinator.
//!
//! Computes the view model from application state and hands each part to its
//! component. Output goes to stdout as ANSI escape sequences.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, UIViewModel};

/// Renders the plugin UI to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

/// Lays out one frame: header, optional search box, body, footer, then the
/// alert on top.
fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 2;

    current_row = components::render_header(current_row, &vm.header, theme, cols);
    current_row = components::render_border(current_row, &theme.colors.border, cols);

    if let Some(search) = &vm.search_bar {
        current_row = components::render_search_bar(current_row, search, theme, cols);
    }

    let footer_row = rows.saturating_sub(1);
    let bottom_border = footer_row.saturating_sub(1);

    match &vm.body {
        Body::List(list) => {
            components::render_list(current_row, bottom_border, list, theme, cols);
        }
        Body::Empty(empty) => components::render_empty_state(current_row + 2, empty, theme, cols),
        Body::Form(form) => {
            components::render_form(current_row + 1, form, theme, cols);
        }
    }

    components::render_border(bottom_border, &theme.colors.border, cols);
    components::render_footer(footer_row, &vm.footer, theme, cols);

    if let Some(alert) = &vm.alert {
        components::render_alert(alert, theme, rows, cols);
    }
}
