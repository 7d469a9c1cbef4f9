//! Event handling and state transitions.
//!
//! [`handle_event`] is the only place state changes in response to input or
//! host callbacks. It returns whether the UI needs a re-render and the
//! actions the shim must execute.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `SwitchScreen`, `NextScreen`
//! - **Filter**: `SearchMode`, `Char`, `Backspace`, `FocusResults`, `ExitSearch`
//! - **Record actions**: `Call`, `Email`, `OpenMap`, `Reload`
//! - **Form**: `FormNext`, `FormPrev`, `DistrictNext`, `DistrictPrev`,
//!   `Submit`, `LeaveForm`
//! - **Host**: `WebResponse`, `IntentFailed`, `PermissionsGranted`,
//!   `PermissionsDenied`

use crate::api::{Endpoint, HttpResponse, RequestContext};
use crate::app::list_screen::ListPane;
use crate::app::modes::{InputMode, Screen};
use crate::app::{Action, AppState};
use crate::domain::error::{Result, SafeNetError};
use crate::domain::IntentKind;
use std::collections::BTreeMap;

/// Fallback when a failed registration carries no server message.
const REGISTRATION_FALLBACK: &str = "Something went wrong.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the selection down (wraps to top).
    KeyDown,
    /// Moves the selection up (wraps to bottom).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,

    /// Activates a screen directly.
    SwitchScreen(Screen),
    /// Activates the next screen in tab order.
    NextScreen,
    /// Re-fetches the current list.
    Reload,

    /// Starts editing the filter query.
    SearchMode,
    /// Stops editing and keeps the query.
    FocusResults,
    /// Stops editing and clears the query.
    ExitSearch,
    /// Typed character: filter query or focused form field.
    Char(char),
    /// Deletes the last character of the query or focused form field.
    Backspace,

    /// Dials the selected record's phone number.
    Call,
    /// Writes to the selected record's email address.
    Email,
    /// Opens the selected record's map link.
    OpenMap,

    FormNext,
    FormPrev,
    DistrictNext,
    DistrictPrev,
    /// Validates and posts the registration form.
    Submit,
    /// Leaves the form for the organization directory.
    LeaveForm,

    /// Closes the alert on screen.
    DismissAlert,

    /// The host granted the requested permissions.
    PermissionsGranted,
    /// The host denied the requested permissions.
    PermissionsDenied,

    /// A `web_request` completed.
    WebResponse {
        /// Context map handed back by the host.
        context: BTreeMap<String, String>,
        response: HttpResponse,
    },

    /// The opener command for an intent exited unsuccessfully.
    IntentFailed { kind: IntentKind, error: String },
}

/// Processes an event, mutates state and returns `(should_render, actions)`.
///
/// # Errors
///
/// Returns an error for a web response whose context cannot be decoded, or a
/// registration payload that cannot be serialized.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::KeyDown => Ok(with_pane(state, |pane| pane.move_down())),
        Event::KeyUp => Ok(with_pane(state, |pane| pane.move_up())),
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::SwitchScreen(screen) => {
            let actions = state.switch_to(*screen);
            Ok((true, actions))
        }
        Event::NextScreen => {
            let next = state.screen.next();
            Ok((true, state.switch_to(next)))
        }
        Event::Reload => {
            let Some(request) = state.reload() else {
                return Ok((false, vec![]));
            };
            tracing::debug!(url = %request.url, "reload requested");
            Ok((true, vec![Action::SendRequest(request)]))
        }
        Event::SearchMode => {
            if state.current_pane().is_none() {
                return Ok((false, vec![]));
            }
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search;
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            state.input_mode = InputMode::Normal;
            if let Some(pane) = state.current_pane_mut() {
                tracing::debug!(query = %pane.query(), "clearing filter");
                pane.clear_query();
            }
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.screen == Screen::Register {
                state.form.push_char(*c);
                return Ok((true, vec![]));
            }
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            Ok(with_pane(state, |pane| pane.push_query(*c)))
        }
        Event::Backspace => {
            if state.screen == Screen::Register {
                state.form.pop_char();
                return Ok((true, vec![]));
            }
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            Ok(with_pane(state, |pane| pane.pop_query()))
        }
        Event::Call => Ok(open_selected(state, IntentKind::Call)),
        Event::Email => Ok(open_selected(state, IntentKind::Email)),
        Event::OpenMap => Ok(open_selected(state, IntentKind::OpenMap)),
        Event::FormNext => {
            state.form.focus_next();
            Ok((true, vec![]))
        }
        Event::FormPrev => {
            state.form.focus_prev();
            Ok((true, vec![]))
        }
        Event::DistrictNext => {
            state.form.district_next();
            Ok((true, vec![]))
        }
        Event::DistrictPrev => {
            state.form.district_prev();
            Ok((true, vec![]))
        }
        Event::Submit => submit(state),
        Event::LeaveForm => Ok((true, state.switch_to(Screen::Organizations))),
        Event::DismissAlert => Ok((state.alert.take().is_some(), vec![])),
        Event::PermissionsGranted => {
            tracing::info!(screen = ?state.screen, "permissions granted, loading first screen");
            Ok((true, state.activate_current()))
        }
        Event::PermissionsDenied => {
            tracing::warn!("permissions denied, relief server unreachable");
            state.show_alert(
                "Permission Denied",
                "Web access is needed to reach the relief server.",
            );
            Ok((true, vec![]))
        }
        Event::WebResponse { context, response } => {
            let context = RequestContext::from_map(context)?;
            let _otel = context.trace.as_ref().and_then(|trace| trace.attach());
            let _response_span = tracing::debug_span!(
                "web_response",
                endpoint = context.endpoint.as_str(),
                seq = context.seq,
                status = response.status
            )
            .entered();

            apply_response(state, &context, response.clone())
        }
        Event::IntentFailed { kind, error } => {
            tracing::warn!(intent = kind.as_str(), error = %error, "intent failed");
            match kind.failure_title() {
                Some(title) => {
                    state.show_alert(title, error.clone());
                    Ok((true, vec![]))
                }
                None => Ok((false, vec![])),
            }
        }
    }
}

/// Runs `f` on the current list pane, if there is one.
fn with_pane(state: &mut AppState, f: impl FnOnce(&mut dyn ListPane)) -> (bool, Vec<Action>) {
    match state.current_pane_mut() {
        Some(pane) => {
            f(pane);
            (true, vec![])
        }
        None => (false, vec![]),
    }
}

fn open_selected(state: &AppState, kind: IntentKind) -> (bool, Vec<Action>) {
    let Some(intent) = state.current_pane().and_then(|pane| pane.selected_intent(kind)) else {
        tracing::debug!(intent = kind.as_str(), "selected record has nothing to open");
        return (false, vec![]);
    };
    tracing::debug!(intent = kind.as_str(), uri = %intent.uri, "opening intent");
    (false, vec![Action::OpenIntent(intent)])
}

fn submit(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    match state.form.submit(&state.base_url) {
        Ok(Some(request)) => Ok((true, vec![Action::SendRequest(request)])),
        Ok(None) => Ok((false, vec![])),
        Err(SafeNetError::Validation(error)) => {
            tracing::debug!(error = %error, "registration rejected locally");
            state.show_alert("Error", error.to_string());
            Ok((true, vec![]))
        }
        Err(other) => Err(other),
    }
}

fn apply_response(
    state: &mut AppState,
    context: &RequestContext,
    response: HttpResponse,
) -> Result<(bool, Vec<Action>)> {
    match context.endpoint {
        Endpoint::List(kind) => {
            let applied = state.pane_mut(kind).apply_response(context.seq, response);
            // Only the visible pane can change what is on screen.
            let visible = state.screen == Screen::from_list(kind);
            Ok((applied && visible, vec![]))
        }
        Endpoint::RegisterOrganization => match state.form.apply_response(context.seq, response) {
            None => Ok((false, vec![])),
            Some(Ok(())) => {
                state.show_alert("Success", "Organization registered!");
                // The directory may already be showing a list fetched before
                // the new organization existed.
                let actions = if state.screen == Screen::Organizations {
                    state.reload().map(Action::SendRequest).into_iter().collect()
                } else {
                    state.switch_to(Screen::Organizations)
                };
                Ok((true, actions))
            }
            Some(Err(error)) => {
                let message = error.server_message().unwrap_or(REGISTRATION_FALLBACK).to_string();
                state.show_alert("Registration Failed", message);
                Ok((true, vec![]))
            }
        },
    }
}

fn event_name(event: &Event) -> &'static str {
    match event {
        Event::KeyDown => "KeyDown",
        Event::KeyUp => "KeyUp",
        Event::CloseFocus => "CloseFocus",
        Event::SwitchScreen(_) => "SwitchScreen",
        Event::NextScreen => "NextScreen",
        Event::Reload => "Reload",
        Event::SearchMode => "SearchMode",
        Event::FocusResults => "FocusResults",
        Event::ExitSearch => "ExitSearch",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::Call => "Call",
        Event::Email => "Email",
        Event::OpenMap => "OpenMap",
        Event::FormNext => "FormNext",
        Event::FormPrev => "FormPrev",
        Event::DistrictNext => "DistrictNext",
        Event::DistrictPrev => "DistrictPrev",
        Event::Submit => "Submit",
        Event::LeaveForm => "LeaveForm",
        Event::DismissAlert => "DismissAlert",
        Event::PermissionsGranted => "PermissionsGranted",
        Event::PermissionsDenied => "PermissionsDenied",
        Event::WebResponse { .. } => "WebResponse",
        Event::IntentFailed { .. } => "IntentFailed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Intent;
    use crate::ui::Theme;

    fn granted(screen: Screen) -> (AppState, Vec<Action>) {
        let mut state = AppState::new("http://relief.test", Theme::default(), screen);
        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        (state, actions)
    }

    fn reply(actions: &[Action], status: u16, body: &str) -> Event {
        let Some(Action::SendRequest(request)) = actions.first() else {
            panic!("expected a request in {actions:?}");
        };
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        Event::WebResponse {
            context: request.context.to_map(),
            response: HttpResponse::new(status, headers, body.as_bytes().to_vec()),
        }
    }

    #[test]
    fn typing_outside_search_does_nothing() {
        let (mut state, _) = granted(Screen::Camps);
        assert_eq!(handle_event(&mut state, &Event::Char('x')).unwrap(), (false, vec![]));
    }

    #[test]
    fn call_opens_tel_intent_for_selected_record() {
        let (mut state, actions) = granted(Screen::Organizations);
        let event = reply(&actions, 200, r#"[{"org_name":"Seva","phone_number":"0712345678"}]"#);
        handle_event(&mut state, &event).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::Call).unwrap();
        assert_eq!(actions, vec![Action::OpenIntent(Intent::call("0712345678"))]);

        let (_, actions) = handle_event(&mut state, &Event::OpenMap).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn failed_map_raises_alert() {
        let (mut state, _) = granted(Screen::Camps);
        let event = Event::IntentFailed {
            kind: IntentKind::OpenMap,
            error: "exit code 3".into(),
        };
        assert_eq!(handle_event(&mut state, &event).unwrap(), (true, vec![]));
        let alert = state.alert.clone().unwrap();
        assert_eq!(alert.title, "Couldn't load page");
        assert_eq!(alert.message, "exit code 3");
    }

    #[test]
    fn denied_permissions_alert_without_fetching() {
        let mut state = AppState::new("http://relief.test", Theme::default(), Screen::Camps);
        let (render, actions) = handle_event(&mut state, &Event::PermissionsDenied).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(
            state.alert.as_ref().map(|a| a.title.as_str()),
            Some("Permission Denied")
        );
    }

    #[test]
    fn failed_call_raises_alert_but_failed_email_does_not() {
        let (mut state, _) = granted(Screen::Organizations);
        let event = Event::IntentFailed {
            kind: IntentKind::Email,
            error: "no mail client".into(),
        };
        assert_eq!(handle_event(&mut state, &event).unwrap(), (false, vec![]));
        assert!(state.alert.is_none());

        let event = Event::IntentFailed {
            kind: IntentKind::Call,
            error: "no dialer".into(),
        };
        handle_event(&mut state, &event).unwrap();
        assert_eq!(
            state.alert.as_ref().map(|a| a.title.as_str()),
            Some("Couldn't make a call")
        );

        handle_event(&mut state, &Event::DismissAlert).unwrap();
        assert!(state.alert.is_none());
    }

    #[test]
    fn validation_failure_alerts_without_request() {
        let (mut state, _) = granted(Screen::Register);
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        assert!(actions.is_empty());
        let alert = state.alert.clone().unwrap();
        assert_eq!(alert.title, "Error");
        assert_eq!(alert.message, "Please fill in all fields");
    }

    #[test]
    fn foreign_context_is_an_error() {
        let (mut state, _) = granted(Screen::Camps);
        let event = Event::WebResponse {
            context: BTreeMap::new(),
            response: HttpResponse::new(200, BTreeMap::new(), Vec::new()),
        };
        assert!(matches!(
            handle_event(&mut state, &event),
            Err(SafeNetError::Context(_))
        ));
    }

    #[test]
    fn escape_clears_filter_enter_keeps_it() {
        let (mut state, actions) = granted(Screen::Camps);
        let event = reply(&actions, 200, r#"[{"district":"Kochi"},{"district":"Wayanad"}]"#);
        handle_event(&mut state, &event).unwrap();

        handle_event(&mut state, &Event::SearchMode).unwrap();
        handle_event(&mut state, &Event::Char('w')).unwrap();
        handle_event(&mut state, &Event::FocusResults).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.current_pane().unwrap().visible_len(), 1);

        handle_event(&mut state, &Event::SearchMode).unwrap();
        handle_event(&mut state, &Event::ExitSearch).unwrap();
        assert_eq!(state.current_pane().unwrap().visible_len(), 2);
    }
}
