//! Backend REST endpoints.

use crate::domain::ListKind;

/// HTTP method used by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One of the five backend operations the plugin performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `GET` of one of the four collections.
    List(ListKind),
    /// `POST /api/organization`.
    RegisterOrganization,
}

impl Endpoint {
    /// Path relative to the configured base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::List(ListKind::Organizations) | Self::RegisterOrganization => "/api/organization",
            Self::List(ListKind::Requirements) => "/api/requirements",
            Self::List(ListKind::Camps) => "/api/camps",
            Self::List(ListKind::Vehicles) => "/api/vehicle",
        }
    }

    #[must_use]
    pub const fn method(self) -> Method {
        match self {
            Self::List(_) => Method::Get,
            Self::RegisterOrganization => Method::Post,
        }
    }

    /// Full URL for this endpoint under `base_url`.
    ///
    /// ```
    /// use safenet::api::Endpoint;
    /// use safenet::domain::ListKind;
    ///
    /// let url = Endpoint::List(ListKind::Camps).url("http://10.0.0.2:5000/");
    /// assert_eq!(url, "http://10.0.0.2:5000/api/camps");
    /// ```
    #[must_use]
    pub fn url(self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }

    /// Stable identifier carried in the request context.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List(ListKind::Organizations) => "organizations",
            Self::List(ListKind::Requirements) => "requirements",
            Self::List(ListKind::Camps) => "camps",
            Self::List(ListKind::Vehicles) => "vehicles",
            Self::RegisterOrganization => "register",
        }
    }

    /// Parses the identifier produced by [`Endpoint::as_str`].
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "organizations" => Self::List(ListKind::Organizations),
            "requirements" => Self::List(ListKind::Requirements),
            "camps" => Self::List(ListKind::Camps),
            "vehicles" => Self::List(ListKind::Vehicles),
            "register" => Self::RegisterOrganization,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_match_backend_routes() {
        assert_eq!(Endpoint::List(ListKind::Organizations).path(), "/api/organization");
        assert_eq!(Endpoint::List(ListKind::Requirements).path(), "/api/requirements");
        assert_eq!(Endpoint::List(ListKind::Vehicles).path(), "/api/vehicle");
        assert_eq!(Endpoint::RegisterOrganization.path(), "/api/organization");
        assert_eq!(Endpoint::RegisterOrganization.method(), Method::Post);
        assert_eq!(Endpoint::List(ListKind::Camps).method(), Method::Get);
    }

    #[test]
    fn identifiers_round_trip() {
        let all = ListKind::ALL
            .into_iter()
            .map(Endpoint::List)
            .chain([Endpoint::RegisterOrganization]);
        for endpoint in all {
            assert_eq!(Endpoint::parse(endpoint.as_str()), Some(endpoint));
        }
        assert_eq!(Endpoint::parse("shelters"), None);
    }
}
