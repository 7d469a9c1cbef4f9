//! HTTP plumbing between the plugin and the relief backend.
//!
//! Requests and responses are plain data so the application layer stays
//! testable without a Zellij host:
//!
//! - [`endpoints`]: Backend routes and methods
//! - [`request`]: Requests the shim hands to `web_request`
//! - [`response`]: Classification and decoding of completed exchanges
//! - [`context`]: Routing, sequencing and trace ids for the round trip

pub mod context;
pub mod endpoints;
pub mod request;
pub mod response;

pub use context::{RequestContext, TraceContext};
pub use endpoints::{Endpoint, Method};
pub use request::HttpRequest;
pub use response::HttpResponse;
