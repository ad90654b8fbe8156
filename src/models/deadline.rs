use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::dates;
use crate::models::workload::{Category, Hours};

/// Reconciliation identity of a deadline. Kept as two fields so that a title
/// ending in the link's prefix can never collide with another pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeadlineKey {
    pub title: String,
    pub link: String,
}

impl DeadlineKey {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }

    /// Stable external identifier, used for reminder registrations.
    pub fn id(&self) -> String {
        serde_json::json!([self.title, self.link]).to_string()
    }
}

impl fmt::Display for DeadlineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({:?})", self.title, self.link)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deadline {
    #[serde(default)]
    pub link: String,
    /// `MM/DD/YYYY HH:MM:SS`, or [`dates::INVALID_DATE`].
    #[serde(default = "invalid_date")]
    pub due_date: String,
    #[serde(default)]
    pub max_grade: f64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub rounded_grade: f64,
    #[serde(rename = "deadlineType", default, with = "category_field")]
    pub category: Option<Category>,
    #[serde(default)]
    pub expected_total_hrs: i32,
    #[serde(default)]
    pub expected_hrs_per_day: i32,
    #[serde(default)]
    pub actual_total_hrs: i32,
    #[serde(default)]
    pub actual_hrs_per_day: i32,
    #[serde(default)]
    pub is_completed: bool,
}

fn invalid_date() -> String {
    dates::INVALID_DATE.to_string()
}

impl Deadline {
    pub fn key(&self) -> DeadlineKey {
        DeadlineKey::new(self.title.clone(), self.link.clone())
    }

    pub fn matches(&self, key: &DeadlineKey) -> bool {
        self.title == key.title && self.link == key.link
    }

    pub fn id(&self) -> String {
        self.key().id()
    }

    pub fn due_at(&self) -> Option<NaiveDateTime> {
        dates::parse_canonical(&self.due_date)
    }

    pub fn expected_hours(&self) -> Hours {
        Hours::new(self.expected_total_hrs, self.expected_hrs_per_day)
    }

    pub fn set_expected_hours(&mut self, hours: Hours) {
        self.expected_total_hrs = hours.total;
        self.expected_hrs_per_day = hours.per_day;
    }

    pub fn mark_completed(&mut self, actual: Hours) {
        self.actual_total_hrs = actual.total;
        self.actual_hrs_per_day = actual.per_day;
        self.is_completed = true;
    }
}

/// Serialized as the bare category name; unclassified is the empty string.
mod category_field {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<Category>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value.map(|c| c.as_str()).unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Category>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.as_deref().and_then(Category::parse))
    }
}
