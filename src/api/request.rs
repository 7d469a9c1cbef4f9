//! Outgoing HTTP requests, described as data.
//!
//! The library never performs I/O itself: the event handler returns an
//! [`HttpRequest`] inside an action and the plugin shim hands it to Zellij's
//! `web_request`.

use crate::api::context::RequestContext;
use crate::api::endpoints::{Endpoint, Method};
use crate::domain::error::Result;
use crate::domain::{ListKind, OrganizationRegistration};
use std::collections::BTreeMap;

const JSON: &str = "application/json";

/// A request ready to be issued by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    pub context: RequestContext,
}

impl HttpRequest {
    fn new(base_url: &str, endpoint: Endpoint, seq: u64) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), JSON.to_string());
        Self {
            method: endpoint.method(),
            url: endpoint.url(base_url),
            headers,
            body: Vec::new(),
            context: RequestContext::new(endpoint, seq),
        }
    }

    /// `GET` of the collection behind a list screen.
    #[must_use]
    pub fn list(base_url: &str, kind: ListKind, seq: u64) -> Self {
        Self::new(base_url, Endpoint::List(kind), seq)
    }

    /// `POST` of a registration form as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the form cannot be serialized.
    pub fn register(base_url: &str, form: &OrganizationRegistration, seq: u64) -> Result<Self> {
        let mut request = Self::new(base_url, Endpoint::RegisterOrganization, seq);
        request.body = serde_json::to_vec(form)?;
        request
            .headers
            .insert("Content-Type".to_string(), JSON.to_string());
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_request_is_a_bodiless_get() {
        let req = HttpRequest::list("http://192.168.215.52:5000", ListKind::Requirements, 3);
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.url, "http://192.168.215.52:5000/api/requirements");
        assert!(req.body.is_empty());
        assert_eq!(req.context.seq, 3);
        assert_eq!(req.headers.get("Accept").map(String::as_str), Some("application/json"));
    }

    #[test]
    fn register_request_posts_json() {
        let form = OrganizationRegistration {
            org_name: "Seva".into(),
            phone_number: "0712345678".into(),
            email: "seva@example.org".into(),
            district: "Idukki".into(),
        };
        let req = HttpRequest::register("http://host:5000", &form, 1).unwrap();
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.url, "http://host:5000/api/organization");
        assert_eq!(req.context.endpoint, Endpoint::RegisterOrganization);

        let body: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
        assert_eq!(body["district"], "Idukki");
        assert_eq!(
            req.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }
}
