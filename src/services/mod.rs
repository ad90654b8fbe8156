pub mod course_service;
pub mod reconcile;
pub mod reminders;
pub mod scan_service;

pub use reminders::{Reminder, ReminderScheduler, ReminderTier};
pub use scan_service::{ScanOutcome, ScanService, ScanStats};
