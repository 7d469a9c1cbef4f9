//! SafeNet: a Zellij plugin for a disaster-relief directory.
//!
//! The plugin talks to a SafeNet HTTP backend and offers:
//! - Four list screens (organizations, requirements, camps, vehicles), each
//!   fetched when it becomes visible and filterable by district
//! - A registration form for new organizations
//! - Call, email and map actions handed to the host's URL opener

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! │  - Key and web events in, host commands out         │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Screens, fetch lifecycle, district filter        │
//! │  - Registration form                                │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────────────┐   ┌─────────────────────────┐
//! │ API Layer (api/)      │   │ UI Layer (ui/)          │
//! │ - Endpoints           │   │ - Rendering             │
//! │ - Request context     │   │ - Theming               │
//! │ - Response decoding   │   │ - Components            │
//! └───────────────────────┘   └─────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Infrastructure, Observability              │
//! │  - Records, validation, intents, errors             │
//! │  - Sandbox paths, file-based OTLP tracing           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The library never performs I/O on its own. [`handle_event`] turns an
//! [`Event`] into state changes plus a list of [`Action`]s, and the shim
//! executes them with `web_request`, `run_command` or `hide_self`. Responses
//! come back as events carrying the context map of the request that caused
//! them, which is how stale responses are recognized and dropped.
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/safenet.wasm" {
//!         base_url "http://192.168.215.52:5000"
//!         open_command "xdg-open"
//!         start_screen "camps"
//!         theme "safenet-dark"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use safenet::{handle_event, initialize, Action, Config, Event, Screen};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted)?;
//! assert!(matches!(actions.as_slice(), [Action::SendRequest(_)]));
//!
//! let (_, actions) = handle_event(&mut state, &Event::SwitchScreen(Screen::Camps))?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), safenet::SafeNetError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode, Screen};
pub use domain::{Result, SafeNetError};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Backend used when `base_url` is not configured.
pub const DEFAULT_BASE_URL: &str = "http://192.168.215.52:5000";

/// Host command used to open `tel:`, `mailto:` and map links.
pub const DEFAULT_OPEN_COMMAND: &str = "xdg-open";

/// Plugin configuration, read from the Zellij plugin block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of the SafeNet backend. Endpoint paths are appended to it.
    pub base_url: String,

    /// Program that opens intent URIs on the host, e.g. `xdg-open` or `open`.
    pub open_command: String,

    /// Screen shown first.
    pub start_screen: Screen,

    /// Built-in theme: `safenet-light` or `safenet-dark`. Ignored when
    /// `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a TOML theme. `~` resolves to the sandbox `/host` mount.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for exported spans. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            open_command: DEFAULT_OPEN_COMMAND.to_string(),
            start_screen: Screen::Organizations,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses the map Zellij hands to `load`. Blank or unknown values fall
    /// back to the defaults.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use safenet::{Config, Screen};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("base_url".to_string(), "http://relief.local:5000/".to_string());
    /// map.insert("start_screen".to_string(), "vehicles".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.base_url, "http://relief.local:5000/");
    /// assert_eq!(config.start_screen, Screen::Vehicles);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        let start_screen = non_empty("start_screen")
            .and_then(|name| {
                let screen = Screen::parse(&name);
                if screen.is_none() {
                    tracing::debug!(start_screen = %name, "unknown start screen, using default");
                }
                screen
            })
            .unwrap_or(defaults.start_screen);

        Self {
            base_url: non_empty("base_url").unwrap_or(defaults.base_url),
            open_command: non_empty("open_command").unwrap_or(defaults.open_command),
            start_screen,
            theme_name: non_empty("theme"),
            theme_file: non_empty("theme_file"),
            trace_level: non_empty("trace_level"),
        }
    }

    /// Theme named by the configuration: `theme_file`, then `theme`, then the
    /// built-in default.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            match Theme::from_file(&path) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::warn!(theme_file = %path, error = %e, "failed to load theme file");
                }
            }
        }

        if let Some(theme_name) = &self.theme_name {
            match Theme::from_name(theme_name) {
                Some(theme) => return theme,
                None => tracing::warn!(theme_name = %theme_name, "unknown theme, using default"),
            }
        }

        Theme::default()
    }
}

/// Builds the initial [`AppState`]. No request is issued until the host
/// grants permissions.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        base_url = %config.base_url,
        start_screen = ?config.start_screen,
        "initializing safenet plugin"
    );

    AppState::new(config.base_url.clone(), config.load_theme(), config.start_screen)
}
