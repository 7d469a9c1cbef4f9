//! Organization registration payload and its local validation rules.
//!
//! Validation runs before anything is sent. Rules are applied in order and the
//! first failure wins:
//!
//! 1. All four fields must be non-empty.
//! 2. The phone number must be exactly ten ASCII decimal digits.
//!
//! Email format and duplicates are left to the server.

use serde::Serialize;
use thiserror::Error;

/// Number of digits a phone number must have.
const PHONE_DIGITS: usize = 10;

/// Districts offered by the registration form, in display order.
pub const DISTRICTS: [&str; 14] = [
    "Thiruvananthapuram",
    "Kollam",
    "Pathanamthitta",
    "Alappuzha",
    "Kottayam",
    "Idukki",
    "Ernakulam",
    "Thrissur",
    "Palakkad",
    "Malappuram",
    "Kozhikode",
    "Wayanad",
    "Kannur",
    "Kasaragod",
];

/// Local rejection of the registration form. The request is never sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// At least one of name, phone, email or district is empty.
    #[error("Please fill in all fields")]
    MissingFields,

    /// Phone number is not exactly ten decimal digits.
    #[error("Phone number must be exactly 10 digits")]
    InvalidPhone,
}

/// Body of `POST /api/organization`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrganizationRegistration {
    pub org_name: String,
    pub phone_number: String,
    pub email: String,
    pub district: String,
}

impl OrganizationRegistration {
    /// Checks the form against the registration rules.
    ///
    /// # Errors
    ///
    /// Returns the first rule that fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use safenet::domain::{OrganizationRegistration, ValidationError};
    ///
    /// let form = OrganizationRegistration {
    ///     org_name: "Relief Trust".into(),
    ///     phone_number: "12345".into(),
    ///     email: "info@relief.org".into(),
    ///     district: "Kollam".into(),
    /// };
    /// assert_eq!(form.validate(), Err(ValidationError::InvalidPhone));
    /// ```
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [&self.org_name, &self.phone_number, &self.email, &self.district];
        if fields.iter().any(|f| f.is_empty()) {
            return Err(ValidationError::MissingFields);
        }

        if !is_valid_phone(&self.phone_number) {
            return Err(ValidationError::InvalidPhone);
        }

        Ok(())
    }
}

/// Returns `true` when `phone` is exactly ten ASCII digits.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == PHONE_DIGITS && phone.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> OrganizationRegistration {
        OrganizationRegistration {
            org_name: "Kerala Relief Trust".to_string(),
            phone_number: "0712345678".to_string(),
            email: "contact@krt.org".to_string(),
            district: "Ernakulam".to_string(),
        }
    }

    #[test]
    fn accepts_well_formed_form() {
        assert_eq!(filled().validate(), Ok(()));
    }

    #[test]
    fn rejects_short_phone() {
        let form = OrganizationRegistration {
            phone_number: "12345".to_string(),
            ..filled()
        };
        assert_eq!(form.validate(), Err(ValidationError::InvalidPhone));
    }

    #[test]
    fn empty_name_wins_over_bad_phone() {
        let form = OrganizationRegistration {
            org_name: String::new(),
            phone_number: "12".to_string(),
            ..filled()
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingFields));
    }

    #[test]
    fn empty_district_is_missing() {
        let form = OrganizationRegistration {
            district: String::new(),
            ..filled()
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingFields));
    }

    #[test]
    fn phone_rules() {
        assert!(is_valid_phone("0712345678"));
        assert!(!is_valid_phone("071234567"));
        assert!(!is_valid_phone("07123456789"));
        assert!(!is_valid_phone("07123-5678"));
        assert!(!is_valid_phone("+912345678"));
        // Non-ASCII digits are not decimal digits for this rule.
        assert!(!is_valid_phone("٠١٢٣٤٥٦٧٨٩"));
    }

    #[test]
    fn serializes_with_backend_field_names() {
        let json = serde_json::to_value(filled()).unwrap();
        assert_eq!(json["org_name"], "Kerala Relief Trust");
        assert_eq!(json["phone_number"], "0712345678");
        assert_eq!(json["email"], "contact@krt.org");
        assert_eq!(json["district"], "Ernakulam");
    }
}
