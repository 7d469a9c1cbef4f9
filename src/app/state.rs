//! Application state and view model computation.
//!
//! [`AppState`] is the single source of truth for everything on screen: the
//! active [`Screen`], one [`ListPane`] per directory screen, the registration
//! form and any modal alert. Screens are switched only through
//! [`AppState::switch_to`], which deactivates the outgoing list (cancelling
//! its fetch) and starts the fetch of the incoming one.
//!
//! View models are computed on demand from a state snapshot.

use super::form::{FormField, RegistrationForm};
use super::list_screen::{ListPane, ListScreen, PaneStatus};
use super::lifecycle::age_label;
use super::modes::{InputMode, Screen};
use crate::api::HttpRequest;
use crate::app::filter::match_range;
use crate::app::Action;
use crate::domain::{Camp, ListKind, Organization, Requirement, Vehicle};
use crate::ui::helpers::{title_column_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    AlertInfo, Body, DetailLine, DisplayItem, EmptyState, FooterInfo, FormFieldView, FormView,
    HeaderInfo, ListView, SearchBarInfo, TabInfo, UIViewModel,
};
use chrono::{DateTime, Utc};

/// Rows taken by everything but the record table: blank, tabs, title,
/// border, column headers, border above details, border, footer and the
/// unused last row.
const LIST_CHROME_ROWS: usize = 9;

/// Extra rows taken by the search box.
const SEARCH_BAR_ROWS: usize = 3;

/// Maximum rows given to the detail pane.
const MAX_DETAIL_ROWS: usize = 6;

/// A modal message. While one is shown, the next key dismisses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

const fn slot(kind: ListKind) -> usize {
    match kind {
        ListKind::Organizations => 0,
        ListKind::Requirements => 1,
        ListKind::Camps => 2,
        ListKind::Vehicles => 3,
    }
}

#[derive(Debug)]
pub struct AppState {
    /// Screen currently shown.
    pub screen: Screen,

    /// Key interpretation on directory screens.
    pub input_mode: InputMode,

    /// One pane per [`ListKind`], indexed by [`slot`].
    lists: [Box<dyn ListPane>; 4],

    pub form: RegistrationForm,

    /// Modal alert on top of the current screen.
    pub alert: Option<Alert>,

    /// Backend base URL, without the `/api/...` path.
    pub base_url: String,

    pub theme: Theme,
}

impl AppState {
    /// Creates the state showing `start`. Nothing is fetched until
    /// [`AppState::activate_current`] runs.
    #[must_use]
    pub fn new(base_url: impl Into<String>, theme: Theme, start: Screen) -> Self {
        Self {
            screen: start,
            input_mode: InputMode::Normal,
            lists: [
                Box::new(ListScreen::<Organization>::new()),
                Box::new(ListScreen::<Requirement>::new()),
                Box::new(ListScreen::<Camp>::new()),
                Box::new(ListScreen::<Vehicle>::new()),
            ],
            form: RegistrationForm::new(),
            alert: None,
            base_url: base_url.into(),
            theme,
        }
    }

    #[must_use]
    pub fn pane(&self, kind: ListKind) -> &dyn ListPane {
        self.lists[slot(kind)].as_ref()
    }

    pub fn pane_mut(&mut self, kind: ListKind) -> &mut dyn ListPane {
        self.lists[slot(kind)].as_mut()
    }

    /// Pane of the current screen, `None` on the form.
    #[must_use]
    pub fn current_pane(&self) -> Option<&dyn ListPane> {
        self.screen.list_kind().map(|kind| self.pane(kind))
    }

    pub fn current_pane_mut(&mut self) -> Option<&mut dyn ListPane> {
        let kind = self.screen.list_kind()?;
        Some(self.pane_mut(kind))
    }

    /// Starts the fetch of the current screen, if it is a list.
    pub fn activate_current(&mut self) -> Vec<Action> {
        let base_url = self.base_url.clone();
        self.current_pane_mut()
            .map(|pane| pane.activate(&base_url))
            .map(Action::SendRequest)
            .into_iter()
            .collect()
    }

    /// Activates `screen`. Switching to the screen already shown does nothing.
    pub fn switch_to(&mut self, screen: Screen) -> Vec<Action> {
        if screen == self.screen {
            return vec![];
        }

        tracing::debug!(from = ?self.screen, to = ?screen, "switching screen");

        if let Some(pane) = self.current_pane_mut() {
            pane.deactivate();
        }
        self.screen = screen;
        self.input_mode = InputMode::Normal;
        self.activate_current()
    }

    /// Starts a fresh fetch of the current list.
    pub fn reload(&mut self) -> Option<HttpRequest> {
        let base_url = self.base_url.clone();
        self.input_mode = InputMode::Normal;
        self.current_pane_mut().map(|pane| pane.activate(&base_url))
    }

    pub fn show_alert(&mut self, title: impl Into<String>, message: impl Into<String>) {
        let alert = Alert::new(title, message);
        tracing::debug!(title = %alert.title, message = %alert.message, "showing alert");
        self.alert = Some(alert);
    }

    /// Computes the view model for a `rows` x `cols` pane.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        self.compute_viewmodel_at(rows, cols, Utc::now())
    }

    /// [`AppState::compute_viewmodel`] with an explicit clock.
    #[must_use]
    pub fn compute_viewmodel_at(&self, rows: usize, cols: usize, now: DateTime<Utc>) -> UIViewModel {
        let body = match self.current_pane() {
            Some(pane) => self.compute_list_body(pane, rows, cols),
            None => Body::Form(self.compute_form()),
        };

        UIViewModel {
            header: self.compute_header(now),
            search_bar: self.compute_search_bar(),
            body,
            footer: self.compute_footer(),
            alert: self.alert.as_ref().map(|a| AlertInfo {
                title: a.title.clone(),
                message: a.message.clone(),
            }),
        }
    }

    fn compute_header(&self, now: DateTime<Utc>) -> HeaderInfo {
        let tabs = Screen::ALL
            .iter()
            .enumerate()
            .map(|(i, screen)| TabInfo {
                key: i + 1,
                label: screen.tab_label().to_string(),
                is_active: *screen == self.screen,
            })
            .collect();

        let (title, status) = match self.current_pane() {
            Some(pane) => {
                let title = match pane.status() {
                    PaneStatus::Ready { total, .. } if !pane.query().is_empty() => {
                        format!(" {} ({}/{total}) ", pane.kind().title(), pane.visible_len())
                    }
                    PaneStatus::Ready { total, .. } => format!(" {} ({total}) ", pane.kind().title()),
                    PaneStatus::Idle | PaneStatus::Loading | PaneStatus::Failed { .. } => {
                        format!(" {} ", pane.kind().title())
                    }
                };
                let status = match pane.status() {
                    PaneStatus::Ready { loaded_at, .. } => {
                        Some(format!("updated {}", age_label(loaded_at, now)))
                    }
                    PaneStatus::Loading => Some("loading…".to_string()),
                    PaneStatus::Idle | PaneStatus::Failed { .. } => None,
                };
                (title, status)
            }
            None => {
                let status = self.form.is_pending().then(|| "submitting…".to_string());
                (" Register Organization ".to_string(), status)
            }
        };

        HeaderInfo { title, tabs, status }
    }

    fn compute_list_body(&self, pane: &dyn ListPane, rows: usize, cols: usize) -> Body {
        match pane.status() {
            PaneStatus::Idle => {
                return Body::Empty(EmptyState {
                    message: "Waiting for permissions".to_string(),
                    subtitle: "Grant web access to reach the relief server".to_string(),
                    is_error: false,
                });
            }
            PaneStatus::Loading => {
                return Body::Empty(EmptyState {
                    message: "Loading…".to_string(),
                    subtitle: format!("Fetching {}", pane.kind().title()),
                    is_error: false,
                });
            }
            PaneStatus::Failed { message } => {
                return Body::Empty(EmptyState {
                    message,
                    subtitle: "Press r to retry".to_string(),
                    is_error: true,
                });
            }
            PaneStatus::Ready { total, .. } if total == 0 => {
                return Body::Empty(EmptyState {
                    message: pane.kind().empty_message().to_string(),
                    subtitle: "Press r to reload".to_string(),
                    is_error: false,
                });
            }
            PaneStatus::Ready { .. } => {}
        }

        let details: Vec<DetailLine> = pane
            .selected_details()
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .take(MAX_DETAIL_ROWS)
            .map(|(label, value)| DetailLine {
                label: label.to_string(),
                value,
            })
            .collect();

        let available_rows = self.calculate_available_rows(rows, details.len());
        let all_rows = pane.rows();
        let selected = pane.selected_index();

        let mut visible_start = selected.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(all_rows.len());
        if visible_end - visible_start < available_rows && all_rows.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let query = pane.query();
        let items = all_rows[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, row)| DisplayItem {
                title: truncate(&row.title, title_column_width(cols)),
                highlight_range: match_range(&row.district, query),
                district: row.district.clone(),
                summary: row.summary.clone(),
                is_selected: visible_start + offset == selected,
            })
            .collect();

        Body::List(ListView {
            items,
            selected_index: selected.saturating_sub(visible_start),
            no_matches: all_rows.is_empty(),
            details,
        })
    }

    fn compute_form(&self) -> FormView {
        let fields = FormField::ALL
            .iter()
            .map(|&field| FormFieldView {
                label: field.label().to_string(),
                value: self.form.value(field).to_string(),
                is_focused: field == self.form.focus(),
                is_choice: field == FormField::District,
            })
            .collect();

        FormView {
            fields,
            is_pending: self.form.is_pending(),
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        let pane = self.current_pane()?;
        let searching = self.input_mode == InputMode::Search;
        (searching || !pane.query().is_empty()).then(|| SearchBarInfo {
            query: pane.query().to_string(),
            is_editing: searching,
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.alert.is_some() {
            "Press any key to continue"
        } else {
            match (self.screen, self.input_mode) {
                (Screen::Register, _) => {
                    "Tab/↓: next  ↑: previous  ←/→: district  Enter: submit  Esc: back"
                }
                (_, InputMode::Search) => "Type a district  Enter: keep filter  Esc: clear",
                (_, InputMode::Normal) => {
                    "1-5/Tab: screens  j/k: move  /: filter  c: call  e: email  m: map  r: reload  q: quit"
                }
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn calculate_available_rows(&self, total_rows: usize, detail_rows: usize) -> usize {
        let search_rows = if self.compute_search_bar().is_some() {
            SEARCH_BAR_ROWS
        } else {
            0
        };
        total_rows
            .saturating_sub(LIST_CHROME_ROWS + search_rows + detail_rows)
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::HttpResponse;
    use crate::app::list_screen::ListPane;
    use std::collections::BTreeMap;

    fn state() -> AppState {
        AppState::new("http://relief.test", Theme::default(), Screen::Camps)
    }

    fn ok(body: &str) -> HttpResponse {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        HttpResponse::new(200, headers, body.as_bytes().to_vec())
    }

    fn sent(actions: &[Action]) -> &HttpRequest {
        match actions {
            [Action::SendRequest(req)] => req,
            other => panic!("expected one request, got {other:?}"),
        }
    }

    #[test]
    fn activation_fetches_current_list() {
        let mut s = state();
        let actions = s.activate_current();
        assert_eq!(sent(&actions).url, "http://relief.test/api/camps");
        assert_eq!(s.pane(ListKind::Camps).status(), PaneStatus::Loading);
    }

    #[test]
    fn switching_cancels_the_outgoing_fetch() {
        let mut s = state();
        let seq = sent(&s.activate_current()).context.seq;
        let actions = s.switch_to(Screen::Vehicles);
        assert_eq!(sent(&actions).url, "http://relief.test/api/vehicle");

        assert!(!s.pane_mut(ListKind::Camps).apply_response(seq, ok("[]")));
        assert_eq!(s.pane(ListKind::Camps).status(), PaneStatus::Idle);
    }

    #[test]
    fn switching_to_the_same_screen_is_a_no_op() {
        let mut s = state();
        s.activate_current();
        assert!(s.switch_to(Screen::Camps).is_empty());
    }

    #[test]
    fn form_screen_issues_no_fetch() {
        let mut s = state();
        assert!(s.switch_to(Screen::Register).is_empty());
        assert!(s.current_pane().is_none());
        assert!(matches!(s.compute_viewmodel(24, 80).body, Body::Form(_)));
    }

    #[test]
    fn viewmodel_shows_freshness_and_rows() {
        let mut s = state();
        let seq = sent(&s.activate_current()).context.seq;
        s.pane_mut(ListKind::Camps).apply_response(
            seq,
            ok(r#"[{"camp_name":"GHSS","district":"Kollam","location":"Chavara"}]"#),
        );

        let vm = s.compute_viewmodel(24, 80);
        assert_eq!(vm.header.status.as_deref(), Some("updated just now"));
        assert_eq!(vm.header.title, " Camp List (1) ");
        assert!(vm.header.tabs[2].is_active);
        let Body::List(list) = vm.body else {
            panic!("expected a list body");
        };
        assert_eq!(list.items[0].title, "GHSS");
        assert!(list.items[0].is_selected);
        assert_eq!(list.details[0].value, "GHSS");
    }

    #[test]
    fn viewmodel_highlights_query_in_district() {
        let mut s = state();
        let seq = sent(&s.activate_current()).context.seq;
        let pane = s.pane_mut(ListKind::Camps);
        pane.apply_response(seq, ok(r#"[{"district":"Kollam"},{"district":"Idukki"}]"#));
        pane.push_query('l');
        pane.push_query('l');

        let vm = s.compute_viewmodel(24, 80);
        assert_eq!(vm.header.title, " Camp List (1/2) ");
        let Body::List(list) = vm.body else {
            panic!("expected a list body");
        };
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].highlight_range, Some((2, 4)));
        assert!(vm.search_bar.is_some());
    }

    #[test]
    fn failed_fetch_shows_inline_error() {
        let mut s = state();
        let seq = sent(&s.activate_current()).context.seq;
        s.pane_mut(ListKind::Camps)
            .apply_response(seq, HttpResponse::new(400, BTreeMap::new(), Vec::new()));

        let Body::Empty(empty) = s.compute_viewmodel(24, 80).body else {
            panic!("expected an empty body");
        };
        assert!(empty.is_error);
        assert_eq!(empty.message, "Error fetching camp data");
    }

    #[test]
    fn window_follows_selection() {
        let mut s = state();
        let seq = sent(&s.activate_current()).context.seq;
        let body = format!(
            "[{}]",
            (0..50)
                .map(|i| format!(r#"{{"id":{i},"camp_name":"Camp {i}"}}"#))
                .collect::<Vec<_>>()
                .join(",")
        );
        let pane = s.pane_mut(ListKind::Camps);
        pane.apply_response(seq, ok(&body));
        for _ in 0..40 {
            pane.move_down();
        }

        let Body::List(list) = s.compute_viewmodel(20, 80).body else {
            panic!("expected a list body");
        };
        let selected = &list.items[list.selected_index];
        assert!(selected.is_selected);
        assert_eq!(selected.title, "Camp 40");
    }
}
