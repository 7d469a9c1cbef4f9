//! Generic remote list screen.
//!
//! One [`ListScreen`] backs each of the four directory screens. It owns the
//! screen's fetch lifecycle, the current filter query, the visible list and
//! the selection cursor. The visible list is always the filtered full list of
//! the latest completed fetch; it is recomputed on every query edit and on
//! every accepted fetch result.
//!
//! [`ListPane`] is the object-safe face of a screen so [`AppState`] can hold
//! the four record types side by side.
//!
//! [`AppState`]: crate::app::AppState

use crate::api::{HttpRequest, HttpResponse};
use crate::app::filter::filter;
use crate::app::lifecycle::{FetchLifecycle, FetchState};
use crate::domain::{Intent, IntentKind, ListKind, ListRecord};
use chrono::{DateTime, Utc};

/// Fetch status of a pane, as rendering needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaneStatus {
    Idle,
    Loading,
    Ready { loaded_at: DateTime<Utc>, total: usize },
    Failed { message: String },
}

/// Display text of one visible record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRow {
    pub title: String,
    pub district: String,
    pub summary: String,
}

/// A list screen with its record type erased.
pub trait ListPane: std::fmt::Debug {
    fn kind(&self) -> ListKind;

    /// Starts the screen's fetch, making any earlier one stale.
    fn activate(&mut self, base_url: &str) -> HttpRequest;

    /// Cancels the in-flight fetch and drops the list.
    fn deactivate(&mut self);

    /// Applies the response to request `seq`. Returns `false` if it was stale.
    fn apply_response(&mut self, seq: u64, response: HttpResponse) -> bool;

    fn status(&self) -> PaneStatus;

    fn query(&self) -> &str;
    fn push_query(&mut self, c: char);
    fn pop_query(&mut self);
    fn clear_query(&mut self);

    fn visible_len(&self) -> usize;
    fn selected_index(&self) -> usize;
    fn move_down(&mut self);
    fn move_up(&mut self);

    /// Rows of the visible list in display order.
    fn rows(&self) -> Vec<RecordRow>;

    /// Labelled fields of the selected record.
    fn selected_details(&self) -> Vec<(&'static str, String)>;

    /// Intent of `kind` for the selected record.
    fn selected_intent(&self, kind: IntentKind) -> Option<Intent>;
}

#[derive(Debug, Clone)]
pub struct ListScreen<T: ListRecord> {
    lifecycle: FetchLifecycle<T>,
    query: String,
    visible: Vec<T>,
    selected_index: usize,
}

impl<T: ListRecord> Default for ListScreen<T> {
    fn default() -> Self {
        Self {
            lifecycle: FetchLifecycle::new(),
            query: String::new(),
            visible: Vec::new(),
            selected_index: 0,
        }
    }
}

impl<T: ListRecord> ListScreen<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn lifecycle(&self) -> &FetchLifecycle<T> {
        &self.lifecycle
    }

    /// Records currently shown, after filtering.
    #[must_use]
    pub fn visible(&self) -> &[T] {
        &self.visible
    }

    #[must_use]
    pub fn selected(&self) -> Option<&T> {
        self.visible.get(self.selected_index)
    }

    /// Recomputes the visible list from the full list and the query, and
    /// clamps the selection into it.
    fn refresh(&mut self) {
        self.visible = filter(self.lifecycle.items(), &self.query, T::filter_field);

        if self.visible.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.visible.len() - 1);
        }

        tracing::trace!(
            kind = ?T::KIND,
            query = %self.query,
            visible = self.visible.len(),
            "visible list refreshed"
        );
    }
}

impl<T: ListRecord> ListPane for ListScreen<T> {
    fn kind(&self) -> ListKind {
        T::KIND
    }

    fn activate(&mut self, base_url: &str) -> HttpRequest {
        let seq = self.lifecycle.begin();
        self.selected_index = 0;
        self.refresh();
        HttpRequest::list(base_url, T::KIND, seq)
    }

    fn deactivate(&mut self) {
        self.lifecycle.cancel();
        self.query.clear();
        self.selected_index = 0;
        self.refresh();
    }

    fn apply_response(&mut self, seq: u64, response: HttpResponse) -> bool {
        if self.lifecycle.in_flight() != Some(seq) {
            tracing::debug!(kind = ?T::KIND, seq, "ignoring response to a superseded fetch");
            return false;
        }

        let result = response.into_list::<T>().map(|mut items| {
            T::arrange(&mut items);
            items
        });
        let failure = result.as_ref().err().map(ToString::to_string);

        if !self.lifecycle.complete(seq, result) {
            return false;
        }
        if let Some(error) = failure {
            tracing::warn!(kind = ?T::KIND, seq, error = %error, "list fetch failed");
        }

        self.query.clear();
        self.selected_index = 0;
        self.refresh();
        true
    }

    fn status(&self) -> PaneStatus {
        match self.lifecycle.state() {
            FetchState::Idle => PaneStatus::Idle,
            FetchState::Loading => PaneStatus::Loading,
            FetchState::Ready { items, loaded_at } => PaneStatus::Ready {
                loaded_at: *loaded_at,
                total: items.len(),
            },
            FetchState::Failed { error } => PaneStatus::Failed {
                message: T::KIND.failure_message(error),
            },
        }
    }

    fn query(&self) -> &str {
        &self.query
    }

    fn push_query(&mut self, c: char) {
        self.query.push(c);
        self.refresh();
    }

    fn pop_query(&mut self) {
        self.query.pop();
        self.refresh();
    }

    fn clear_query(&mut self) {
        self.query.clear();
        self.refresh();
    }

    fn visible_len(&self) -> usize {
        self.visible.len()
    }

    fn selected_index(&self) -> usize {
        self.selected_index
    }

    fn move_down(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.visible.len();
    }

    fn move_up(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.visible.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    fn rows(&self) -> Vec<RecordRow> {
        self.visible
            .iter()
            .map(|record| RecordRow {
                title: record.title(),
                district: record.filter_field().to_string(),
                summary: record.summary(),
            })
            .collect()
    }

    fn selected_details(&self) -> Vec<(&'static str, String)> {
        self.selected().map(ListRecord::details).unwrap_or_default()
    }

    fn selected_intent(&self, kind: IntentKind) -> Option<Intent> {
        self.selected().and_then(|record| record.intent(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Camp, Vehicle};
    use std::collections::BTreeMap;

    const BASE: &str = "http://relief.test";

    fn ok(body: &str) -> HttpResponse {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        HttpResponse::new(200, headers, body.as_bytes().to_vec())
    }

    fn server_error() -> HttpResponse {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), "text/html".to_string());
        HttpResponse::new(500, headers, b"<h1>Internal Server Error</h1>".to_vec())
    }

    const TWO_CAMPS: &str = r#"[{"id":1,"district":"Kochi"},{"id":2,"district":"Kollam"}]"#;

    #[test]
    fn late_failure_of_superseded_fetch_keeps_fresh_list() {
        let mut screen: ListScreen<Camp> = ListScreen::new();
        let first = screen.activate(BASE);
        let second = screen.activate(BASE);

        assert!(screen.apply_response(second.context.seq, ok(TWO_CAMPS)));
        assert!(!screen.apply_response(first.context.seq, server_error()));
        assert!(matches!(screen.status(), PaneStatus::Ready { total: 2, .. }));
    }

    #[test]
    fn failure_after_deactivation_is_ignored() {
        let mut screen: ListScreen<Camp> = ListScreen::new();
        let req = screen.activate(BASE);
        screen.deactivate();

        assert!(!screen.apply_response(req.context.seq, server_error()));
        assert_eq!(screen.status(), PaneStatus::Idle);
    }

    #[test]
    fn successful_fetch_shows_every_record() {
        let mut screen: ListScreen<Camp> = ListScreen::new();
        let req = screen.activate(BASE);
        assert_eq!(screen.status(), PaneStatus::Loading);

        assert!(screen.apply_response(req.context.seq, ok(TWO_CAMPS)));
        assert!(matches!(screen.status(), PaneStatus::Ready { total: 2, .. }));
        assert_eq!(screen.visible_len(), 2);
    }

    #[test]
    fn server_error_empties_the_list() {
        let mut screen: ListScreen<Camp> = ListScreen::new();
        let req = screen.activate(BASE);
        screen.apply_response(req.context.seq, ok(TWO_CAMPS));

        let req = screen.activate(BASE);
        assert!(screen.apply_response(req.context.seq, server_error()));
        assert_eq!(
            screen.status(),
            PaneStatus::Failed {
                message: "Error fetching camp data".to_string()
            }
        );
        assert_eq!(screen.visible_len(), 0);
    }

    #[test]
    fn stale_response_does_not_overwrite_newer_one() {
        let mut screen: ListScreen<Camp> = ListScreen::new();
        let a = screen.activate(BASE).context.seq;
        let b = screen.activate(BASE).context.seq;

        assert!(screen.apply_response(b, ok(r#"[{"id":2,"camp_name":"B"}]"#)));
        assert!(!screen.apply_response(a, ok(r#"[{"id":1,"camp_name":"A"}]"#)));
        assert_eq!(screen.rows()[0].title, "B");
    }

    #[test]
    fn deactivated_screen_ignores_late_response() {
        let mut screen: ListScreen<Camp> = ListScreen::new();
        let seq = screen.activate(BASE).context.seq;
        screen.deactivate();
        assert!(!screen.apply_response(seq, ok(TWO_CAMPS)));
        assert_eq!(screen.status(), PaneStatus::Idle);
        assert_eq!(screen.visible_len(), 0);
    }

    #[test]
    fn query_filters_on_district() {
        let mut screen: ListScreen<Camp> = ListScreen::new();
        let seq = screen.activate(BASE).context.seq;
        screen.apply_response(seq, ok(TWO_CAMPS));

        for c in "KOL".chars() {
            screen.push_query(c);
        }
        assert_eq!(screen.rows().len(), 1);
        assert_eq!(screen.rows()[0].district, "Kollam");

        screen.clear_query();
        assert_eq!(screen.visible_len(), 2);
    }

    #[test]
    fn completed_fetch_resets_query() {
        let mut screen: ListScreen<Camp> = ListScreen::new();
        let seq = screen.activate(BASE).context.seq;
        screen.apply_response(seq, ok(TWO_CAMPS));
        screen.push_query('x');
        assert_eq!(screen.visible_len(), 0);

        let seq = screen.activate(BASE).context.seq;
        screen.apply_response(seq, ok(TWO_CAMPS));
        assert_eq!(screen.query(), "");
        assert_eq!(screen.visible_len(), 2);
    }

    #[test]
    fn vehicles_arrive_latest_first() {
        let mut screen: ListScreen<Vehicle> = ListScreen::new();
        let seq = screen.activate(BASE).context.seq;
        screen.apply_response(
            seq,
            ok(r#"[{"id":3},{"id":1},{"id":4},{"id":1},{"id":5}]"#),
        );
        let ids: Vec<_> = screen.visible().iter().map(|v| v.id.unwrap()).collect();
        assert_eq!(ids, vec![5, 4, 3, 1, 1]);
    }

    #[test]
    fn vehicles_404_reads_as_none_found() {
        let mut screen: ListScreen<Vehicle> = ListScreen::new();
        let seq = screen.activate(BASE).context.seq;
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        screen.apply_response(seq, HttpResponse::new(404, headers, b"{}".to_vec()));
        assert_eq!(
            screen.status(),
            PaneStatus::Failed {
                message: "No vehicles found.".to_string()
            }
        );
    }

    #[test]
    fn selection_wraps_and_drives_intents() {
        let mut screen: ListScreen<Camp> = ListScreen::new();
        let seq = screen.activate(BASE).context.seq;
        screen.apply_response(
            seq,
            ok(r#"[{"camp_name":"A","contact_number":"111"},{"camp_name":"B"}]"#),
        );

        assert_eq!(
            screen.selected_intent(IntentKind::Call),
            Some(Intent::call("111"))
        );
        screen.move_down();
        assert_eq!(screen.selected_intent(IntentKind::Call), None);
        screen.move_down();
        assert_eq!(screen.selected_index(), 0);
        screen.move_up();
        assert_eq!(screen.selected_index(), 1);
        assert_eq!(screen.selected_details()[0], ("Camp Name", "B".to_string()));
    }
}
