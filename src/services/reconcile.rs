use serde::Serialize;
use tracing::{debug, info};

use crate::models::{Course, CourseKey, Deadline, WorkloadProfile};
use crate::report::dto::{CourseHeader, ParsedReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineUpdate {
    /// Due date or a grade changed; schedule fields were adopted.
    Refreshed,
    /// Nothing substantive changed; only expected hours were re-applied.
    HoursOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileStats {
    pub course_created: bool,
    pub deadlines_inserted: usize,
    pub deadlines_refreshed: usize,
    pub deadlines_unchanged: usize,
}

impl From<&CourseHeader> for CourseKey {
    fn from(h: &CourseHeader) -> Self {
        CourseKey {
            term: h.term.clone(),
            title: h.title.clone(),
            period: h.period.clone(),
            instructor: h.instructor.clone(),
        }
    }
}

/// Merges one parsed page into `courses`.
///
/// A course already present under the same (term, title, period, instructor)
/// absorbs the page deadline by deadline; user-entered hours, completion and
/// the course's workload profile survive. Otherwise a new course with the
/// default profile is created first and the page merged into it, so repeated
/// rows within one page collapse the same way on every run. Returns `None`
/// for a page without a course header.
///
/// Running this twice with the same page leaves `courses` as after the first run.
pub fn reconcile(courses: &mut Vec<Course>, report: &ParsedReport) -> Option<ReconcileStats> {
    let header = report.header.as_ref()?;
    let key = CourseKey::from(header);

    let (index, course_created) = match courses.iter().position(|c| c.matches(&key)) {
        Some(index) => {
            info!("Course {} exists, merging deadlines", header.title);
            (index, false)
        }
        None => {
            info!("Course {} does not exist, adding it", header.title);
            let mut course = Course::new(
                header.term.clone(),
                header.title.clone(),
                header.period.clone(),
                header.instructor.clone(),
            );
            course.workload = Some(WorkloadProfile::default());
            courses.push(course);
            (courses.len() - 1, true)
        }
    };

    let existing = &mut courses[index];
    let profile = existing.profile();
    let mut stats = ReconcileStats {
        course_created,
        deadlines_inserted: 0,
        deadlines_refreshed: 0,
        deadlines_unchanged: 0,
    };

    for record in &report.records {
        let fresh = record.to_deadline(&profile);
        match existing.deadline_mut(&fresh.key()) {
            Some(current) => match apply_update(current, &fresh) {
                DeadlineUpdate::Refreshed => stats.deadlines_refreshed += 1,
                DeadlineUpdate::HoursOnly => stats.deadlines_unchanged += 1,
            },
            None => {
                debug!("New deadline {}", fresh.key());
                existing.deadlines.push(fresh);
                stats.deadlines_inserted += 1;
            }
        }
    }

    existing.sort_deadlines();
    Some(stats)
}

/// Field-level merge of a re-parsed deadline into the stored one with the
/// same key. Actual hours and completion on `current` are never touched.
pub fn apply_update(current: &mut Deadline, fresh: &Deadline) -> DeadlineUpdate {
    // A grade-only change also satisfies this condition, so it takes the same path.
    let changed = current.due_date != fresh.due_date
        || current.rounded_grade != fresh.rounded_grade
        || current.max_grade != fresh.max_grade;

    current.set_expected_hours(fresh.expected_hours());
    if changed {
        debug!(
            "due date, rounded grade or max grade has changed for {}: {} -> {}",
            fresh.title, current.due_date, fresh.due_date
        );
        current.due_date = fresh.due_date.clone();
        current.rounded_grade = fresh.rounded_grade;
        current.max_grade = fresh.max_grade;
        DeadlineUpdate::Refreshed
    } else {
        debug!("No significant changes, updating expected hours for {}", fresh.title);
        DeadlineUpdate::HoursOnly
    }
}
