//! Zellij plugin shim.
//!
//! Translates Zellij events into [`safenet::Event`]s, runs them through
//! [`handle_event`], and carries out the returned actions with the host API.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse config, start tracing, build `AppState`, ask for
//!    `WebAccess` and `RunCommands`
//! 2. **Permissions**: once granted, the first screen is fetched
//! 3. **Update**: keys, web responses and opener results become library
//!    events
//! 4. **Render**: delegated to [`safenet::ui::render`]
//!
//! # Keybindings
//!
//! Directory screens:
//! - `1`-`5`: Jump to a screen, `Tab`: next screen
//! - `j`/`Down`, `k`/`Up`: Move selection (wraps)
//! - `/`: Filter by district (`Enter` keeps the filter, `Esc` clears it)
//! - `c`: Call, `e`: Email, `m`: Open map
//! - `r`: Reload
//! - `q`: Close plugin
//!
//! Registration form:
//! - `Tab`/`Down`: Next field, `Up`: Previous field
//! - `Left`/`Right`: Cycle district
//! - `Enter`: Submit, `Esc`: Back to organizations
//!
//! Any key dismisses an alert.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use safenet::api::{HttpRequest, HttpResponse, Method};
use safenet::domain::{Intent, IntentKind};
use safenet::{handle_event, Action, Config, Event, InputMode, Screen};

register_plugin!(State);

/// Context key naming the intent an opener command was run for.
const INTENT_CONTEXT_KEY: &str = "intent";

struct State {
    app: safenet::AppState,

    /// Host program that opens intent URIs.
    open_command: String,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: safenet::initialize(&config),
            open_command: config.open_command,
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        safenet::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        tracing::debug!(base_url = %config.base_url, open_command = %config.open_command, "parsed configuration");
        self.app = safenet::initialize(&config);
        self.open_command.clone_from(&config.open_command);

        request_permission(&[PermissionType::WebAccess, PermissionType::RunCommands]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::RunCommandResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete, waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, headers, body, context) => {
                Event::WebResponse {
                    context,
                    response: HttpResponse::new(status, headers, body),
                }
            }
            zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, context) => {
                match Self::map_command_result_event(exit_code, &stderr, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => Event::PermissionsGranted,
                PermissionStatus::Denied => Event::PermissionsDenied,
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        safenet::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if self.app.alert.is_some() {
            return Some(Event::DismissAlert);
        }
        if self.app.screen == Screen::Register {
            return Self::map_form_key(key);
        }

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        match self.app.input_mode {
            InputMode::Search => Self::map_search_key(key),
            InputMode::Normal => Self::map_normal_key(key),
        }
    }

    fn map_form_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Tab | BareKey::Down => Event::FormNext,
            BareKey::Up => Event::FormPrev,
            BareKey::Right => Event::DistrictNext,
            BareKey::Left => Event::DistrictPrev,
            BareKey::Enter => Event::Submit,
            BareKey::Esc => Event::LeaveForm,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_search_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Esc => Event::ExitSearch,
            BareKey::Enter => Event::FocusResults,
            BareKey::Down => Event::KeyDown,
            BareKey::Up => Event::KeyUp,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_normal_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Char(c @ '1'..='5') => Event::SwitchScreen(Screen::from_digit(c)?),
            BareKey::Tab => Event::NextScreen,
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Char('c') => Event::Call,
            BareKey::Char('e') => Event::Email,
            BareKey::Char('m') => Event::OpenMap,
            BareKey::Char('r') => Event::Reload,
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Esc => Event::ExitSearch,
            _ => return None,
        })
    }

    /// Only opener commands carry an intent in their context; a zero exit
    /// needs no event.
    fn map_command_result_event(
        exit_code: Option<i32>,
        stderr: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let kind = context
            .get(INTENT_CONTEXT_KEY)
            .and_then(|name| IntentKind::parse(name))?;
        tracing::debug!(intent = kind.as_str(), exit_code = ?exit_code, "opener finished");

        if exit_code == Some(0) {
            return None;
        }

        let stderr = String::from_utf8_lossy(stderr).trim().to_string();
        let error = if stderr.is_empty() {
            exit_code.map_or_else(
                || "opener terminated".to_string(),
                |code| format!("exit code {code}"),
            )
        } else {
            stderr
        };
        Some(Event::IntentFailed { kind, error })
    }

    fn send_request(request: &HttpRequest) {
        let verb = match request.method {
            Method::Get => HttpVerb::Get,
            Method::Post => HttpVerb::Post,
        };
        tracing::debug!(url = %request.url, method = ?request.method, "sending web request");
        web_request(
            request.url.as_str(),
            verb,
            request.headers.clone(),
            request.body.clone(),
            request.context.to_map(),
        );
    }

    fn open_intent(&self, intent: &Intent) {
        tracing::debug!(intent = intent.kind.as_str(), uri = %intent.uri, "running opener");
        let mut context = BTreeMap::new();
        context.insert(INTENT_CONTEXT_KEY.to_string(), intent.kind.as_str().to_string());
        run_command(&[self.open_command.as_str(), intent.uri.as_str()], context);
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::SendRequest(request) => Self::send_request(request),
            Action::OpenIntent(intent) => self.open_intent(intent),
        }
    }
}
