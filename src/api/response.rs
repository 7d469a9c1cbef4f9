//! Decoding of completed HTTP exchanges.
//!
//! Zellij reports every completed `web_request` as a status, headers and a
//! body. When the request could not be made at all, it reports status 400
//! with no headers and the transport error text as the body; that shape is
//! classified as [`FetchError::Network`] rather than a server reply.

use crate::domain::error::FetchError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Status Zellij uses for requests that never reached a server.
const TRANSPORT_FAILURE_STATUS: u16 = 400;

/// Status the registration endpoint answers with on success.
const CREATED: u16 = 201;

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// A completed HTTP exchange as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, headers: BTreeMap<String, String>, body: Vec<u8>) -> Self {
        Self { status, headers, body }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn is_transport_failure(&self) -> bool {
        self.status == TRANSPORT_FAILURE_STATUS && self.headers.is_empty()
    }

    /// The `error` field of a JSON error body, if there is one.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        serde_json::from_slice::<ErrorBody>(&self.body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.is_empty())
    }

    fn failure(&self) -> FetchError {
        if self.is_transport_failure() {
            let reason = String::from_utf8_lossy(&self.body).trim().to_string();
            return FetchError::Network(if reason.is_empty() {
                "request failed".to_string()
            } else {
                reason
            });
        }
        FetchError::Http {
            status: self.status,
            message: self.error_message(),
        }
    }

    /// Decodes a 2xx response whose body is a JSON array of records.
    ///
    /// # Errors
    ///
    /// [`FetchError::Network`] or [`FetchError::Http`] for failed exchanges,
    /// [`FetchError::Decode`] when the body is not an array of `T`.
    pub fn into_list<T: DeserializeOwned>(self) -> Result<Vec<T>, FetchError> {
        if !self.is_success() {
            return Err(self.failure());
        }
        serde_json::from_slice(&self.body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    /// Accepts only `201 Created`; anything else is a failed registration.
    ///
    /// # Errors
    ///
    /// Any status other than 201, including other 2xx codes, becomes
    /// [`FetchError::Http`] carrying the server's `error` message if present.
    pub fn into_created(self) -> Result<(), FetchError> {
        if self.status == CREATED {
            Ok(())
        } else {
            Err(self.failure())
        }
    }
}
