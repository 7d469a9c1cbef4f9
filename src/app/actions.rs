//! Side effects requested by the event handler.
//!
//! The handler never talks to Zellij. It returns a `Vec<Action>` and the
//! plugin shim executes them in order.

use crate::api::HttpRequest;
use crate::domain::Intent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues an HTTP request through `web_request`. The request context
    /// comes back with the result.
    SendRequest(HttpRequest),

    /// Hands a `tel:`, `mailto:` or map URI to the host's opener command.
    OpenIntent(Intent),
}
