use std::collections::{BTreeMap, BTreeSet};

use tracing::info;

use crate::services::reminders::Reminder;

/// Delivery side of reminders. Implementations guarantee future delivery and
/// must let a registration with a known `deadline_id` supersede the old one.
pub trait NotificationSink {
    fn schedule(&mut self, reminder: &Reminder);
    /// Withdraws the registration for `deadline_id`; false if there was none.
    fn cancel(&mut self, deadline_id: &str) -> bool;
    /// Ids with a live registration.
    fn registered_ids(&self) -> Vec<String>;
}

/// Writes registrations to the log only.
#[derive(Debug, Default)]
pub struct LogNotificationSink {
    registered: BTreeSet<String>,
}

impl LogNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NotificationSink for LogNotificationSink {
    fn schedule(&mut self, reminder: &Reminder) {
        self.registered.insert(reminder.deadline_id.clone());
        let trigger = reminder.trigger();
        info!(
            "[{}] {} - {} (daily at {:02}:00, repeating={})",
            reminder.deadline_id,
            reminder.title(),
            reminder.body(),
            trigger.hour,
            trigger.repeating
        );
    }

    fn cancel(&mut self, deadline_id: &str) -> bool {
        let removed = self.registered.remove(deadline_id);
        if removed {
            info!("[{}] reminder withdrawn", deadline_id);
        }
        removed
    }

    fn registered_ids(&self) -> Vec<String> {
        self.registered.iter().cloned().collect()
    }
}

/// Keeps the current registration per deadline id.
#[derive(Debug, Default)]
pub struct InMemoryNotificationSink {
    registrations: BTreeMap<String, Reminder>,
}

impl InMemoryNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, deadline_id: &str) -> Option<&Reminder> {
        self.registrations.get(deadline_id)
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl NotificationSink for InMemoryNotificationSink {
    fn schedule(&mut self, reminder: &Reminder) {
        self.registrations
            .insert(reminder.deadline_id.clone(), reminder.clone());
    }

    fn cancel(&mut self, deadline_id: &str) -> bool {
        self.registrations.remove(deadline_id).is_some()
    }

    fn registered_ids(&self) -> Vec<String> {
        self.registrations.keys().cloned().collect()
    }
}
