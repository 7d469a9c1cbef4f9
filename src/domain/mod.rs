//! Domain layer for the SafeNet plugin.
//!
//! Core types and rules, independent of Zellij APIs: the relief records and
//! their list metadata, registration validation, device intents, and errors.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`records`]: Organization, requirement, camp and vehicle records
//! - [`registration`]: Registration payload and validation
//! - [`intent`]: `tel:` / `mailto:` / map intents

pub mod error;
pub mod intent;
pub mod records;
pub mod registration;

pub use error::{FetchError, Result, SafeNetError};
pub use intent::{Intent, IntentKind};
pub use records::{Camp, ListKind, ListRecord, Organization, Requirement, Vehicle};
pub use registration::{OrganizationRegistration, ValidationError, DISTRICTS};
