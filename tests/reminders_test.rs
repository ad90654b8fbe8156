mod common;

use chrono::Duration;

use deadline_tracker::dates::{self, INVALID_DATE};
use deadline_tracker::models::{Category, Course, Hours};
use deadline_tracker::notify::{InMemoryNotificationSink, NotificationSink};
use deadline_tracker::services::reminders::{
    EVENING_HOUR, MIDDAY_HOUR, MORNING_HOUR, pending_deadlines, select_reminders,
};
use deadline_tracker::services::{ReminderScheduler, ReminderTier};

use common::{at, deadline};

fn course_with(title: &str, deadlines: Vec<deadline_tracker::models::Deadline>) -> Course {
    let mut course = Course::new("S2", title, "3", "Smith");
    course.deadlines = deadlines;
    course.sort_deadlines();
    course
}

#[test]
fn test_tier_boundaries() {
    assert_eq!(ReminderTier::for_days(-1), ReminderTier::Morning);
    assert_eq!(ReminderTier::for_days(2), ReminderTier::Morning);
    assert_eq!(ReminderTier::for_days(3), ReminderTier::Midday);
    assert_eq!(ReminderTier::for_days(4), ReminderTier::Midday);
    assert_eq!(ReminderTier::for_days(5), ReminderTier::Evening);

    assert_eq!(ReminderTier::Morning.hour(), MORNING_HOUR);
    assert_eq!(ReminderTier::Midday.trigger().hour, MIDDAY_HOUR);
    assert!(ReminderTier::Evening.trigger().repeating);
    assert_eq!(ReminderTier::Evening.hour(), EVENING_HOUR);
}

#[test]
fn test_selects_only_actionable_open_deadlines() {
    let now = at(2025, 3, 1, 9, 0);
    let mut done = deadline("Done homework", now + Duration::days(1), Category::Homework, 3, 1);
    done.mark_completed(Hours::new(3, 1));
    let mut unknown = deadline("Undated homework", now, Category::Homework, 3, 1);
    unknown.due_date = INVALID_DATE.to_string();

    let courses = vec![course_with(
        "Algebra II",
        vec![
            deadline("Soon homework", now + Duration::days(2), Category::Homework, 3, 1),
            deadline("Later homework", now + Duration::days(6), Category::Homework, 3, 1),
            deadline("Big project", now + Duration::days(8), Category::Test, 10, 1),
            done,
            unknown,
        ],
    )];

    let reminders = select_reminders(&courses, now);
    let picked: Vec<(&str, i64, ReminderTier)> = reminders
        .iter()
        .map(|r| (r.deadline_title.as_str(), r.days_to_due, r.tier))
        .collect();
    assert_eq!(
        picked,
        vec![
            ("Soon homework", 2, ReminderTier::Morning),
            ("Big project", 8, ReminderTier::Evening)
        ]
    );
    assert_eq!(reminders[0].course_title, "Algebra II");
    assert_eq!(reminders[0].title(), "Upcoming Deadline: Algebra II");
    assert_eq!(reminders[0].body(), "Your deadline for Soon homework is approaching.");
}

#[test]
fn test_equal_days_sort_by_title_across_courses() {
    let now = at(2025, 3, 1, 9, 0);
    let due = now + Duration::days(1);
    let courses = vec![
        course_with("Biology", vec![deadline("Beta lab", due, Category::Lab, 5, 2)]),
        course_with("Chemistry", vec![deadline("Alpha lab", due, Category::Lab, 5, 2)]),
    ];
    let titles: Vec<String> = select_reminders(&courses, now)
        .into_iter()
        .map(|r| r.deadline_title)
        .collect();
    assert_eq!(titles, vec!["Alpha lab", "Beta lab"]);
}

#[test]
fn test_reregistration_replaces_and_completion_cancels() {
    let now = at(2025, 3, 1, 9, 0);
    let mut courses = vec![course_with(
        "Algebra II",
        vec![deadline("Unit 3 Test", now + Duration::days(4), Category::Test, 10, 3)],
    )];
    let id = courses[0].deadlines[0].id();

    let mut sink = InMemoryNotificationSink::new();
    ReminderScheduler::new(&mut sink).schedule_all(&courses, now);
    assert_eq!(sink.len(), 1);
    assert_eq!(sink.get(&id).unwrap().tier, ReminderTier::Midday);

    let later = now + Duration::days(2);
    ReminderScheduler::new(&mut sink).schedule_all(&courses, later);
    assert_eq!(sink.len(), 1);
    assert_eq!(sink.get(&id).unwrap().tier, ReminderTier::Morning);

    courses[0].deadlines[0].mark_completed(Hours::new(9, 3));
    let stats = ReminderScheduler::new(&mut sink).schedule_all(&courses, later);
    assert_eq!(stats.scheduled, 0);
    assert_eq!(stats.cancelled, 1);
    assert!(sink.is_empty());
}

#[test]
fn test_deadline_ids_do_not_collide() {
    let now = at(2025, 3, 1, 9, 0);
    let mut a = deadline("Lab_", now, Category::Lab, 5, 2);
    a.link = "1".to_string();
    let mut b = deadline("Lab", now, Category::Lab, 5, 2);
    b.link = "_1".to_string();
    assert_ne!(a.id(), b.id());

    let mut sink = InMemoryNotificationSink::new();
    let courses = vec![course_with("Chemistry", vec![a, b])];
    ReminderScheduler::new(&mut sink).schedule_all(&courses, now);
    assert_eq!(sink.len(), 2);
}

#[test]
fn test_pending_lists_every_open_deadline() {
    let now = at(2025, 3, 1, 9, 0);
    let mut undated = deadline("Undated", now, Category::Homework, 3, 1);
    undated.due_date = INVALID_DATE.to_string();
    let mut done = deadline("Done", now, Category::Homework, 3, 1);
    done.is_completed = true;
    let courses = vec![course_with(
        "Algebra II",
        vec![
            undated,
            deadline("Far", now + Duration::days(30), Category::Homework, 3, 1),
            deadline("Near", now + Duration::days(1), Category::Homework, 3, 1),
            done,
        ],
    )];

    let titles: Vec<&str> = pending_deadlines(&courses, now)
        .into_iter()
        .map(|(_, d)| d.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Near", "Far", "Undated"]);
}

#[test]
fn test_cancel_unknown_id_is_noop() {
    let mut sink = InMemoryNotificationSink::new();
    assert!(!sink.cancel("[\"missing\",\"\"]"));
    assert!(sink.is_empty());
}

#[test]
fn test_deadline_no_longer_actionable_is_withdrawn() {
    let now = at(2025, 3, 1, 9, 0);
    let mut courses = vec![course_with(
        "Algebra II",
        vec![
            deadline("Unit 3 Test", now + Duration::days(2), Category::Test, 10, 3),
            deadline("Unit 4 Test", now + Duration::days(1), Category::Test, 10, 3),
        ],
    )];
    let moved = courses[0].deadlines[1].id();
    let undated = courses[0].deadlines[0].id();

    let mut sink = InMemoryNotificationSink::new();
    ReminderScheduler::new(&mut sink).schedule_all(&courses, now);
    assert_eq!(sink.len(), 2);

    courses[0].deadlines[0].due_date = INVALID_DATE.to_string();
    courses[0].deadlines[1].due_date = dates::format_canonical(&(now + Duration::days(60)));
    let stats = ReminderScheduler::new(&mut sink).schedule_all(&courses, now);

    assert_eq!(stats.scheduled, 0);
    assert_eq!(stats.cancelled, 2);
    assert!(sink.get(&moved).is_none());
    assert!(sink.get(&undated).is_none());
    assert!(sink.registered_ids().is_empty());
}

#[test]
fn test_removed_deadline_is_withdrawn() {
    let now = at(2025, 3, 1, 9, 0);
    let mut courses = vec![course_with(
        "Algebra II",
        vec![deadline("Unit 3 Test", now + Duration::days(2), Category::Test, 10, 3)],
    )];
    let mut sink = InMemoryNotificationSink::new();
    ReminderScheduler::new(&mut sink).schedule_all(&courses, now);

    courses[0].deadlines.clear();
    let stats = ReminderScheduler::new(&mut sink).schedule_all(&courses, now);
    assert_eq!(stats.cancelled, 1);
    assert!(sink.is_empty());
}

#[test]
fn test_cancel_counts_only_live_registrations() {
    let now = at(2025, 3, 1, 9, 0);
    let mut done = deadline("Unit 3 Test", now + Duration::days(2), Category::Test, 10, 3);
    done.mark_completed(Hours::new(9, 3));
    let courses = vec![course_with("Algebra II", vec![done])];

    let mut sink = InMemoryNotificationSink::new();
    let first = ReminderScheduler::new(&mut sink).schedule_all(&courses, now);
    let second = ReminderScheduler::new(&mut sink).schedule_all(&courses, now);
    assert_eq!(first.cancelled, 0);
    assert_eq!(second.cancelled, 0);
    assert!(sink.is_empty());
}
