//! Device-level intents built from record fields.
//!
//! An intent is a URI handed to the host's URL opener: `tel:` for calls,
//! `mailto:` for email, the raw link for maps. Fields are forwarded as-is;
//! a malformed number or URL is the opener's problem to report.

/// What an intent asks the host to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentKind {
    Call,
    Email,
    OpenMap,
}

impl IntentKind {
    /// Stable identifier used in the `run_command` context.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Email => "email",
            Self::OpenMap => "map",
        }
    }

    /// Parses the identifier produced by [`IntentKind::as_str`].
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "call" => Some(Self::Call),
            "email" => Some(Self::Email),
            "map" => Some(Self::OpenMap),
            _ => None,
        }
    }

    /// Alert title shown when the host fails to open the intent.
    ///
    /// Email failures are not surfaced, so they have no title.
    #[must_use]
    pub const fn failure_title(self) -> Option<&'static str> {
        match self {
            Self::Call => Some("Couldn't make a call"),
            Self::OpenMap => Some("Couldn't load page"),
            Self::Email => None,
        }
    }
}

/// A URI to open outside the plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    pub kind: IntentKind,
    pub uri: String,
}

impl Intent {
    /// `tel:<number>` for the phone dialer.
    ///
    /// ```
    /// use safenet::domain::Intent;
    ///
    /// assert_eq!(Intent::call("0712345678").uri, "tel:0712345678");
    /// ```
    #[must_use]
    pub fn call(number: &str) -> Self {
        Self {
            kind: IntentKind::Call,
            uri: format!("tel:{number}"),
        }
    }

    /// `mailto:<address>` for the mail composer.
    #[must_use]
    pub fn email(address: &str) -> Self {
        Self {
            kind: IntentKind::Email,
            uri: format!("mailto:{address}"),
        }
    }

    /// The map link itself.
    #[must_use]
    pub fn open_map(url: &str) -> Self {
        Self {
            kind: IntentKind::OpenMap,
            uri: url.to_string(),
        }
    }

    /// Builds the intent of `kind` for a field value.
    ///
    /// Returns `None` when the field is absent or empty, since there is
    /// nothing to hand to the opener.
    #[must_use]
    pub fn for_field(kind: IntentKind, value: Option<&str>) -> Option<Self> {
        let value = value.filter(|v| !v.is_empty())?;
        Some(match kind {
            IntentKind::Call => Self::call(value),
            IntentKind::Email => Self::email(value),
            IntentKind::OpenMap => Self::open_map(value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_uris_without_touching_the_value() {
        assert_eq!(Intent::call("07 12-34").uri, "tel:07 12-34");
        assert_eq!(Intent::email("a@b.org").uri, "mailto:a@b.org");
        assert_eq!(
            Intent::open_map("https://maps.app.goo.gl/xyz").uri,
            "https://maps.app.goo.gl/xyz"
        );
    }

    #[test]
    fn empty_field_has_no_intent() {
        assert_eq!(Intent::for_field(IntentKind::Call, None), None);
        assert_eq!(Intent::for_field(IntentKind::OpenMap, Some("")), None);
        assert_eq!(
            Intent::for_field(IntentKind::Email, Some("x@y.z")),
            Some(Intent::email("x@y.z"))
        );
    }

    #[test]
    fn kind_identifiers_round_trip() {
        for kind in [IntentKind::Call, IntentKind::Email, IntentKind::OpenMap] {
            assert_eq!(IntentKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(IntentKind::parse("sms"), None);
    }

    #[test]
    fn email_failures_are_silent() {
        assert_eq!(IntentKind::Email.failure_title(), None);
        assert_eq!(IntentKind::Call.failure_title(), Some("Couldn't make a call"));
    }
}
