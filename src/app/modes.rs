//! Screen and input mode types.
//!
//! The plugin shows exactly one [`Screen`] at a time. The four directory
//! screens share the generic list screen; [`Screen::Register`] is the
//! organization registration form. On directory screens the [`InputMode`]
//! decides whether keys navigate or edit the filter query.

use crate::domain::ListKind;

/// Top-level screens in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Organizations,
    Requirements,
    Camps,
    Vehicles,
    Register,
}

impl Screen {
    pub const ALL: [Self; 5] = [
        Self::Organizations,
        Self::Requirements,
        Self::Camps,
        Self::Vehicles,
        Self::Register,
    ];

    /// The list this screen displays, `None` for the form.
    #[must_use]
    pub const fn list_kind(self) -> Option<ListKind> {
        match self {
            Self::Organizations => Some(ListKind::Organizations),
            Self::Requirements => Some(ListKind::Requirements),
            Self::Camps => Some(ListKind::Camps),
            Self::Vehicles => Some(ListKind::Vehicles),
            Self::Register => None,
        }
    }

    #[must_use]
    pub const fn from_list(kind: ListKind) -> Self {
        match kind {
            ListKind::Organizations => Self::Organizations,
            ListKind::Requirements => Self::Requirements,
            ListKind::Camps => Self::Camps,
            ListKind::Vehicles => Self::Vehicles,
        }
    }

    /// Short label for the tab bar.
    #[must_use]
    pub const fn tab_label(self) -> &'static str {
        match self {
            Self::Organizations => "Organizations",
            Self::Requirements => "Requirements",
            Self::Camps => "Camps",
            Self::Vehicles => "Vehicles",
            Self::Register => "Register",
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Organizations => Self::Requirements,
            Self::Requirements => Self::Camps,
            Self::Camps => Self::Vehicles,
            Self::Vehicles => Self::Register,
            Self::Register => Self::Organizations,
        }
    }

    /// Screen bound to the digit keys `1`-`5`.
    #[must_use]
    pub fn from_digit(c: char) -> Option<Self> {
        let index = c.to_digit(10)?.checked_sub(1)?;
        Self::ALL.get(usize::try_from(index).ok()?).copied()
    }

    /// Parses the `start_screen` configuration value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "organizations" => Some(Self::Organizations),
            "requirements" => Some(Self::Requirements),
            "camps" => Some(Self::Camps),
            "vehicles" => Some(Self::Vehicles),
            "register" => Some(Self::Register),
            _ => None,
        }
    }
}

/// How keys are interpreted on a directory screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigation and record actions.
    Normal,

    /// Typing into the filter query.
    Search,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_map_to_tabs() {
        assert_eq!(Screen::from_digit('1'), Some(Screen::Organizations));
        assert_eq!(Screen::from_digit('5'), Some(Screen::Register));
        assert_eq!(Screen::from_digit('0'), None);
        assert_eq!(Screen::from_digit('6'), None);
        assert_eq!(Screen::from_digit('x'), None);
    }

    #[test]
    fn next_cycles_through_every_screen() {
        let mut screen = Screen::Organizations;
        for expected in Screen::ALL.iter().skip(1).chain(Screen::ALL.iter().take(1)) {
            screen = screen.next();
            assert_eq!(screen, *expected);
        }
    }

    #[test]
    fn list_kind_round_trips() {
        for kind in ListKind::ALL {
            assert_eq!(Screen::from_list(kind).list_kind(), Some(kind));
        }
        assert_eq!(Screen::Register.list_kind(), None);
    }

    #[test]
    fn parses_config_names() {
        assert_eq!(Screen::parse(" Vehicles "), Some(Screen::Vehicles));
        assert_eq!(Screen::parse("shelters"), None);
    }
}
