use serde::Serialize;

use crate::models::Category;

/// Course identity as printed in the report page title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseHeader {
    pub title: String,
    pub instructor: String,
    pub period: String,
    pub term: String,
}

/// One gradable item row, before it becomes a `Deadline`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawDeadlineRecord {
    pub title: String,
    pub link: String,
    /// Due text with the `Due ` prefix removed.
    pub due_date_raw: String,
    pub rounded_grade_raw: String,
    pub max_grade_raw: String,
    /// Last token of the link text, fed to the classifier.
    pub phrase: String,
    /// Canonical due date or `Invalid Date`.
    pub due_date: String,
    pub rounded_grade: f64,
    pub max_grade: f64,
    pub category: Option<Category>,
    /// Label of the category row the item sits under.
    pub section: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ParseIssue {
    MissingCourseHeader { page_title: Option<String> },
    PartialRowSkipped { section: String, row: usize },
    UnparsableDueDate { title: String, raw: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedReport {
    pub header: Option<CourseHeader>,
    pub records: Vec<RawDeadlineRecord>,
    pub issues: Vec<ParseIssue>,
}

impl ParsedReport {
    pub fn skipped_rows(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i, ParseIssue::PartialRowSkipped { .. }))
            .count()
    }
}
