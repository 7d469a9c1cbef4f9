//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin shim (`main.rs`) and the domain/api layers. Input
//! and host callbacks arrive as [`Event`]s, [`handle_event`] mutates
//! [`AppState`], and side effects leave as [`Action`]s:
//!
//! ```text
//! Keys / WebRequestResult → Event → handle_event → AppState → Vec<Action>
//!                                                     ↓
//!                                    web_request / run_command / hide_self
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effects emitted by the event handler
//! - [`filter`]: Case-insensitive substring filter
//! - [`form`]: Registration form input state
//! - [`handler`]: Event processing and state transitions
//! - [`lifecycle`]: Per-screen fetch lifecycle with stale-result guard
//! - [`list_screen`]: Generic directory screen over a record type
//! - [`modes`]: Screens and input modes
//! - [`state`]: Application state and view model computation
//!
//! # Example
//!
//! ```rust
//! use safenet::app::{handle_event, AppState, Event, Screen};
//! use safenet::ui::Theme;
//!
//! let mut state = AppState::new("http://localhost:5000", Theme::default(), Screen::Camps);
//! let (_render, actions) = handle_event(&mut state, &Event::PermissionsGranted)?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), safenet::SafeNetError>(())
//! ```

pub mod actions;
pub mod filter;
pub mod form;
pub mod handler;
pub mod lifecycle;
pub mod list_screen;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use form::{FormField, RegistrationForm};
pub use handler::{handle_event, Event};
pub use list_screen::{ListPane, ListScreen, PaneStatus};
pub use modes::{InputMode, Screen};
pub use state::{Alert, AppState};
