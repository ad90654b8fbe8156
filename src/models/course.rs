use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::deadline::{Deadline, DeadlineKey};
use crate::models::workload::{Hours, WorkloadProfile};

/// Composite identity of a course. The surrogate `id` is regenerated on every
/// fresh parse, so matching always goes through this key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CourseKey {
    pub term: String,
    pub title: String,
    pub period: String,
    pub instructor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub instructor: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub deadlines: Vec<Deadline>,
    #[serde(default, rename = "assignmentTimeTaken")]
    pub workload: Option<WorkloadProfile>,
}

fn null_as_empty<'de, D>(d: D) -> Result<Vec<Deadline>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Deadline>>::deserialize(d)?.unwrap_or_default())
}

impl Course {
    pub fn new(
        term: impl Into<String>,
        title: impl Into<String>,
        period: impl Into<String>,
        instructor: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            term: term.into(),
            title: title.into(),
            period: period.into(),
            instructor: instructor.into(),
            deadlines: Vec::new(),
            workload: None,
        }
    }

    pub fn key(&self) -> CourseKey {
        CourseKey {
            term: self.term.clone(),
            title: self.title.clone(),
            period: self.period.clone(),
            instructor: self.instructor.clone(),
        }
    }

    pub fn matches(&self, key: &CourseKey) -> bool {
        self.term == key.term
            && self.title == key.title
            && self.period == key.period
            && self.instructor == key.instructor
    }

    /// The course's workload profile, or the global defaults if none was stored.
    pub fn profile(&self) -> WorkloadProfile {
        self.workload.unwrap_or_default()
    }

    pub fn deadline_mut(&mut self, key: &DeadlineKey) -> Option<&mut Deadline> {
        self.deadlines.iter_mut().find(|d| d.matches(key))
    }

    /// Ascending by due date, unparsable dates last. Stable, so equal dates
    /// keep their existing relative order.
    pub fn sort_deadlines(&mut self) {
        self.deadlines.sort_by(compare_due);
    }

    /// Records user-entered actual hours and marks the deadline completed.
    /// Returns false if no deadline has that key.
    pub fn complete_deadline(&mut self, key: &DeadlineKey, actual: Hours) -> bool {
        let Some(deadline) = self.deadline_mut(key) else {
            return false;
        };
        deadline.mark_completed(actual);
        self.sort_deadlines();
        true
    }
}

pub fn compare_due(a: &Deadline, b: &Deadline) -> Ordering {
    match (a.due_at(), b.due_at()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Every category name seen across the collection; unclassified shows up as "".
pub fn distinct_categories(courses: &[Course]) -> BTreeSet<String> {
    courses
        .iter()
        .flat_map(|c| c.deadlines.iter())
        .map(|d| d.category.map(|c| c.as_str()).unwrap_or("").to_string())
        .collect()
}
