use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info};

use crate::estimate::{days_to_due, is_actionable};
use crate::models::{Course, Deadline};
use crate::notify::NotificationSink;

pub const MORNING_HOUR: u32 = 8;
pub const MIDDAY_HOUR: u32 = 12;
pub const EVENING_HOUR: u32 = 17;

/// Daily repeating reminder slot, chosen by how close the deadline is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReminderTier {
    Morning,
    Midday,
    Evening,
}

impl ReminderTier {
    pub fn for_days(days_to_due: i64) -> Self {
        if days_to_due <= 2 {
            ReminderTier::Morning
        } else if days_to_due <= 4 {
            ReminderTier::Midday
        } else {
            ReminderTier::Evening
        }
    }

    pub fn hour(&self) -> u32 {
        match self {
            ReminderTier::Morning => MORNING_HOUR,
            ReminderTier::Midday => MIDDAY_HOUR,
            ReminderTier::Evening => EVENING_HOUR,
        }
    }

    pub fn trigger(&self) -> Trigger {
        Trigger {
            hour: self.hour(),
            repeating: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Trigger {
    pub hour: u32,
    pub repeating: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reminder {
    pub deadline_id: String,
    pub course_title: String,
    pub deadline_title: String,
    pub days_to_due: i64,
    pub tier: ReminderTier,
}

impl Reminder {
    pub fn title(&self) -> String {
        format!("Upcoming Deadline: {}", self.course_title)
    }

    pub fn body(&self) -> String {
        format!("Your deadline for {} is approaching.", self.deadline_title)
    }

    pub fn trigger(&self) -> Trigger {
        self.tier.trigger()
    }
}

/// Deadlines that need attention now, most urgent first, ties by title.
pub fn select_reminders(courses: &[Course], now: NaiveDateTime) -> Vec<Reminder> {
    let mut candidates: Vec<Reminder> = Vec::new();
    for course in courses {
        for deadline in course.deadlines.iter().filter(|d| !d.is_completed) {
            if !is_actionable(deadline, now) {
                continue;
            }
            let Some(days) = days_to_due(deadline, now) else {
                continue;
            };
            candidates.push(Reminder {
                deadline_id: deadline.id(),
                course_title: course.title.clone(),
                deadline_title: deadline.title.clone(),
                days_to_due: days,
                tier: ReminderTier::for_days(days),
            });
        }
    }
    candidates.sort_by(|a, b| {
        a.days_to_due
            .cmp(&b.days_to_due)
            .then_with(|| a.deadline_title.cmp(&b.deadline_title))
    });
    candidates
}

/// Every open deadline across `courses`, soonest first; unknown dates last,
/// ties by title.
pub fn pending_deadlines<'a>(courses: &'a [Course], now: NaiveDateTime) -> Vec<(&'a Course, &'a Deadline)> {
    let mut pending: Vec<(&Course, &Deadline)> = courses
        .iter()
        .flat_map(|c| c.deadlines.iter().map(move |d| (c, d)))
        .filter(|(_, d)| !d.is_completed)
        .collect();
    pending.sort_by(|(_, a), (_, b)| {
        let (da, db) = (days_to_due(a, now), days_to_due(b, now));
        da.is_none()
            .cmp(&db.is_none())
            .then_with(|| da.cmp(&db))
            .then_with(|| a.title.cmp(&b.title))
    });
    pending
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleStats {
    pub scheduled: usize,
    pub cancelled: usize,
}

/// 期限が近い締切をリマインダーとして登録する
pub struct ReminderScheduler<'a> {
    sink: &'a mut dyn NotificationSink,
}

impl<'a> ReminderScheduler<'a> {
    pub fn new(sink: &'a mut dyn NotificationSink) -> Self {
        Self { sink }
    }

    /// Makes the sink hold exactly the current selection. Any registration
    /// outside it is withdrawn first, then every selected deadline is
    /// registered. Registration under an existing id replaces it.
    pub fn schedule_all(&mut self, courses: &[Course], now: NaiveDateTime) -> ScheduleStats {
        let mut stats = ScheduleStats::default();
        let selected = select_reminders(courses, now);
        let keep: BTreeSet<&str> = selected.iter().map(|r| r.deadline_id.as_str()).collect();

        for id in self.sink.registered_ids() {
            if !keep.contains(id.as_str()) && self.sink.cancel(&id) {
                debug!("Withdrew reminder {}", id);
                stats.cancelled += 1;
            }
        }

        for reminder in &selected {
            debug!(
                "Scheduling {} ({} days left) at {}:00",
                reminder.deadline_title,
                reminder.days_to_due,
                reminder.tier.hour()
            );
            self.sink.schedule(reminder);
            stats.scheduled += 1;
        }

        info!(
            "Reminders scheduled: {}, cancelled: {}",
            stats.scheduled, stats.cancelled
        );
        stats
    }
}
