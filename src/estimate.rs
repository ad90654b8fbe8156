//! Urgency arithmetic over reconciled deadlines.

use chrono::NaiveDateTime;

use crate::models::Deadline;

/// Whole days from `now` until the deadline is due, truncated toward zero.
/// Negative once past due; `None` when the due date is unknown.
pub fn days_to_due(deadline: &Deadline, now: NaiveDateTime) -> Option<i64> {
    deadline
        .due_at()
        .map(|due| due.signed_duration_since(now).num_days())
}

/// A deadline needs attention once the days left are no more than the days
/// its expected workload takes at the expected pace.
pub fn is_actionable(deadline: &Deadline, now: NaiveDateTime) -> bool {
    if deadline.is_completed {
        return false;
    }
    match days_to_due(deadline, now) {
        Some(days) => days <= deadline.expected_hours().days_needed(),
        None => false,
    }
}
