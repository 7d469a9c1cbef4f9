//! Input state of the organization registration form.

use crate::api::{HttpRequest, HttpResponse};
use crate::domain::error::{FetchError, Result};
use crate::domain::{OrganizationRegistration, DISTRICTS};

/// Form fields in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    OrgName,
    PhoneNumber,
    Email,
    District,
}

impl FormField {
    pub const ALL: [Self; 4] = [Self::OrgName, Self::PhoneNumber, Self::Email, Self::District];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OrgName => "Organization Name",
            Self::PhoneNumber => "Phone Number",
            Self::Email => "Email",
            Self::District => "District",
        }
    }

    const fn next(self) -> Self {
        match self {
            Self::OrgName => Self::PhoneNumber,
            Self::PhoneNumber => Self::Email,
            Self::Email => Self::District,
            Self::District => Self::OrgName,
        }
    }

    const fn prev(self) -> Self {
        match self {
            Self::OrgName => Self::District,
            Self::PhoneNumber => Self::OrgName,
            Self::Email => Self::PhoneNumber,
            Self::District => Self::Email,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub org_name: String,
    pub phone_number: String,
    pub email: String,
    /// Index into [`DISTRICTS`]; `None` until the user picks one.
    district: Option<usize>,
    focus: FormField,
    last_seq: u64,
    pending: Option<u64>,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self {
            org_name: String::new(),
            phone_number: String::new(),
            email: String::new(),
            district: None,
            focus: FormField::OrgName,
            last_seq: 0,
            pending: None,
        }
    }
}

impl RegistrationForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn focus(&self) -> FormField {
        self.focus
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Selected district, empty when unset.
    #[must_use]
    pub fn district(&self) -> &str {
        self.district.map_or("", |i| DISTRICTS[i])
    }

    /// Current text of `field`.
    #[must_use]
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::OrgName => &self.org_name,
            FormField::PhoneNumber => &self.phone_number,
            FormField::Email => &self.email,
            FormField::District => self.district(),
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Types `c` into the focused text field. The district is picked, not typed.
    pub fn push_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        if let Some(text) = self.focused_text_mut() {
            text.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(text) = self.focused_text_mut() {
            text.pop();
        }
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::OrgName => Some(&mut self.org_name),
            FormField::PhoneNumber => Some(&mut self.phone_number),
            FormField::Email => Some(&mut self.email),
            FormField::District => None,
        }
    }

    pub fn district_next(&mut self) {
        self.district = Some(self.district.map_or(0, |i| (i + 1) % DISTRICTS.len()));
    }

    pub fn district_prev(&mut self) {
        self.district = Some(
            self.district
                .map_or(DISTRICTS.len() - 1, |i| (i + DISTRICTS.len() - 1) % DISTRICTS.len()),
        );
    }

    /// Payload built from the current input.
    #[must_use]
    pub fn registration(&self) -> OrganizationRegistration {
        OrganizationRegistration {
            org_name: self.org_name.clone(),
            phone_number: self.phone_number.clone(),
            email: self.email.clone(),
            district: self.district().to_string(),
        }
    }

    /// Validates the form and builds its POST.
    ///
    /// Returns `Ok(None)` while an earlier submission is still pending.
    ///
    /// # Errors
    ///
    /// [`SafeNetError::Validation`](crate::domain::SafeNetError::Validation)
    /// when a rule fails; nothing is sent in that case.
    pub fn submit(&mut self, base_url: &str) -> Result<Option<HttpRequest>> {
        if let Some(seq) = self.pending {
            tracing::debug!(seq, "submission already pending");
            return Ok(None);
        }

        let registration = self.registration();
        registration.validate()?;

        self.last_seq += 1;
        let request = HttpRequest::register(base_url, &registration, self.last_seq)?;
        self.pending = Some(self.last_seq);

        tracing::info!(seq = self.last_seq, district = %registration.district, "submitting registration");
        Ok(Some(request))
    }

    /// Applies the server's answer to submission `seq`.
    ///
    /// Returns `None` for a response nobody is waiting for. A successful
    /// registration clears the form; a failed one leaves it as typed.
    pub fn apply_response(
        &mut self,
        seq: u64,
        response: HttpResponse,
    ) -> Option<std::result::Result<(), FetchError>> {
        if self.pending != Some(seq) {
            tracing::debug!(seq, pending = ?self.pending, "discarding stale registration response");
            return None;
        }
        self.pending = None;

        let outcome = response.into_created();
        match &outcome {
            Ok(()) => {
                tracing::info!(seq, "organization registered");
                self.clear();
            }
            Err(error) => tracing::warn!(seq, error = %error, "registration failed"),
        }
        Some(outcome)
    }

    /// Empties every field and returns focus to the first one.
    pub fn clear(&mut self) {
        self.org_name.clear();
        self.phone_number.clear();
        self.email.clear();
        self.district = None;
        self.focus = FormField::OrgName;
    }
}
