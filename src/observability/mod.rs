//! Tracing export to a local file.
//!
//! ```text
//! tracing → tracing-opentelemetry → FileSpanExporter → safenet-otlp.json
//! ```
//!
//! Spans are written as OTLP JSON, one batch per line, under
//! `~/.local/share/zellij/safenet/`. The file rotates at 10 MiB and keeps
//! three numbered backups. `trace_level` in the plugin configuration sets the
//! filter (default `info`).
//!
//! Web requests carry the issuing span's ids in their context map (see
//! [`crate::api::RequestContext`]), so the span that handles a response is a
//! child of the one that sent the request.

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
