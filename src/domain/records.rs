//! Relief records served by the backend list endpoints.
//!
//! Records are read-only snapshots. The client imposes no schema beyond
//! displaying whatever is present: every text field accepts a string, number,
//! boolean, `null` or nothing at all, and unknown fields are ignored. The
//! [`ListRecord`] trait is the seam the generic list screen works through,
//! supplying the endpoint kind, the designated filter field, row text and
//! the intents a record offers.

use crate::domain::error::FetchError;
use crate::domain::intent::{Intent, IntentKind};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::cmp::Reverse;
use std::fmt::Debug;

/// The four list screens, one per backend collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Organizations,
    Requirements,
    Camps,
    Vehicles,
}

impl ListKind {
    pub const ALL: [Self; 4] = [
        Self::Organizations,
        Self::Requirements,
        Self::Camps,
        Self::Vehicles,
    ];

    /// Screen title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Organizations => "Organizations",
            Self::Requirements => "Requirement List",
            Self::Camps => "Camp List",
            Self::Vehicles => "Vehicles",
        }
    }

    /// Message shown when a successful fetch returned nothing to show.
    #[must_use]
    pub const fn empty_message(self) -> &'static str {
        match self {
            Self::Organizations => "No organizations found.",
            Self::Requirements => "No requirements found.",
            Self::Camps => "No camps found.",
            Self::Vehicles => "No vehicles found.",
        }
    }

    /// Inline message shown in place of the list when a fetch fails.
    #[must_use]
    pub fn failure_message(self, error: &FetchError) -> String {
        let message = match self {
            Self::Organizations => "Failed to fetch organization data. Please try again later.",
            Self::Requirements => "Failed to fetch requirements",
            Self::Camps => "Error fetching camp data",
            Self::Vehicles if error.status() == Some(404) => "No vehicles found.",
            Self::Vehicles => "Failed to fetch vehicle data. Please try again later.",
        };
        message.to_string()
    }
}

/// A record type that can back a list screen.
pub trait ListRecord: DeserializeOwned + Clone + PartialEq + Debug {
    /// Collection this record is fetched from.
    const KIND: ListKind;

    /// Server-assigned identifier, if the record carried one.
    fn id(&self) -> Option<i64>;

    /// The designated field the substring filter matches against.
    fn filter_field(&self) -> &str;

    /// Primary line of the row.
    fn title(&self) -> String;

    /// Secondary text of the row.
    fn summary(&self) -> String;

    /// Labelled fields shown in the detail pane for the selected record.
    fn details(&self) -> Vec<(&'static str, String)>;

    /// Intent of `kind` for this record, if it has the field for it.
    fn intent(&self, kind: IntentKind) -> Option<Intent>;

    /// Puts a freshly fetched list into display order. Server order by default.
    fn arrange(_items: &mut Vec<Self>) {}
}

fn text(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or_default()
}

fn owned(field: &Option<String>) -> String {
    text(field).to_string()
}

/// Accepts any JSON scalar and keeps it as display text.
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Accepts an integer, a float with no fraction or a numeric string.
fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// A relief organization registered with the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Organization {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub org_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub district: Option<String>,
}

impl ListRecord for Organization {
    const KIND: ListKind = ListKind::Organizations;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn filter_field(&self) -> &str {
        text(&self.district)
    }

    fn title(&self) -> String {
        owned(&self.org_name)
    }

    fn summary(&self) -> String {
        [text(&self.phone_number), text(&self.email)]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("  ")
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Organization", owned(&self.org_name)),
            ("District", owned(&self.district)),
            ("Phone", owned(&self.phone_number)),
            ("Email", owned(&self.email)),
        ]
    }

    fn intent(&self, kind: IntentKind) -> Option<Intent> {
        match kind {
            IntentKind::Call => Intent::for_field(kind, self.phone_number.as_deref()),
            IntentKind::Email => Intent::for_field(kind, self.email.as_deref()),
            IntentKind::OpenMap => None,
        }
    }

    /// Latest registrations first: the server returns them oldest first.
    fn arrange(items: &mut Vec<Self>) {
        items.reverse();
    }
}

/// A relief item a camp is asking for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Requirement {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub item_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub quantity: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub camp_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub district: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub map_link: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone_number: Option<String>,
}

impl ListRecord for Requirement {
    const KIND: ListKind = ListKind::Requirements;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn filter_field(&self) -> &str {
        text(&self.district)
    }

    fn title(&self) -> String {
        match (&self.item_name, &self.quantity) {
            (Some(item), Some(qty)) if !qty.is_empty() => format!("{item} x{qty}"),
            _ => owned(&self.item_name),
        }
    }

    fn summary(&self) -> String {
        owned(&self.camp_name)
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Item", owned(&self.item_name)),
            ("Quantity", owned(&self.quantity)),
            ("Category", owned(&self.category)),
            ("Camp", owned(&self.camp_name)),
            ("Location", owned(&self.location)),
            ("District", owned(&self.district)),
        ]
    }

    fn intent(&self, kind: IntentKind) -> Option<Intent> {
        match kind {
            IntentKind::Call => Intent::for_field(kind, self.phone_number.as_deref()),
            IntentKind::OpenMap => Intent::for_field(kind, self.map_link.as_deref()),
            IntentKind::Email => None,
        }
    }
}

/// A shelter camp and its occupancy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Camp {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub camp_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub current_people: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub max_capacity: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub district: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub map_link: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub contact_number: Option<String>,
}

impl ListRecord for Camp {
    const KIND: ListKind = ListKind::Camps;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn filter_field(&self) -> &str {
        text(&self.district)
    }

    fn title(&self) -> String {
        owned(&self.camp_name)
    }

    fn summary(&self) -> String {
        match (&self.current_people, &self.max_capacity) {
            (Some(now), Some(max)) => format!("{now}/{max} people"),
            (Some(now), None) => format!("{now} people"),
            _ => owned(&self.location),
        }
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Camp Name", owned(&self.camp_name)),
            ("Current People", owned(&self.current_people)),
            ("Max Capacity", owned(&self.max_capacity)),
            ("Location", owned(&self.location)),
            ("District", owned(&self.district)),
        ]
    }

    fn intent(&self, kind: IntentKind) -> Option<Intent> {
        match kind {
            IntentKind::Call => Intent::for_field(kind, self.contact_number.as_deref()),
            IntentKind::OpenMap => Intent::for_field(kind, self.map_link.as_deref()),
            IntentKind::Email => None,
        }
    }
}

/// A vehicle offered for relief transport.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Vehicle {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub vehicle_model: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub vehicle_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub owner_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub district: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone_number: Option<String>,
}

impl ListRecord for Vehicle {
    const KIND: ListKind = ListKind::Vehicles;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn filter_field(&self) -> &str {
        text(&self.district)
    }

    fn title(&self) -> String {
        match &self.vehicle_type {
            Some(kind) if !kind.is_empty() => format!("{} ({kind})", text(&self.vehicle_model)),
            _ => owned(&self.vehicle_model),
        }
    }

    fn summary(&self) -> String {
        format!("Owner: {}", text(&self.owner_name))
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Model", owned(&self.vehicle_model)),
            ("Type", owned(&self.vehicle_type)),
            ("Owner", owned(&self.owner_name)),
            ("District", owned(&self.district)),
            ("Phone", owned(&self.phone_number)),
        ]
    }

    fn intent(&self, kind: IntentKind) -> Option<Intent> {
        match kind {
            IntentKind::Call => Intent::for_field(kind, self.phone_number.as_deref()),
            IntentKind::Email | IntentKind::OpenMap => None,
        }
    }

    /// Latest first: descending id. The sort is stable and records without
    /// an id sink to the end.
    fn arrange(items: &mut Vec<Self>) {
        items.sort_by_key(|v| Reverse(v.id().map_or(i128::MIN, i128::from)));
    }
}
