use tracing::info;

use crate::error::AppError;
use crate::models::{Course, CourseKey, DeadlineKey, Hours, WorkloadProfile};
use crate::store::CourseStore;

/// Records the hours a student actually spent and marks the deadline done.
/// Later scans leave these fields alone.
pub fn record_completion(
    store: &mut dyn CourseStore,
    course: &CourseKey,
    deadline: &DeadlineKey,
    actual: Hours,
) -> Result<Course, AppError> {
    let mut courses = store.load()?;
    let target = find_course(&mut courses, course)?;
    if !target.complete_deadline(deadline, actual) {
        return Err(AppError::NotFound(format!(
            "deadline {} in course {}",
            deadline, course.title
        )));
    }
    info!("Updated deadline {} with actual hours", deadline);
    let updated = target.clone();
    store.save(&courses)?;
    Ok(updated)
}

/// Replaces a course's workload defaults. Deadlines pick the new expected
/// hours up on the next scan of the course's page.
pub fn update_workload_profile(
    store: &mut dyn CourseStore,
    course: &CourseKey,
    profile: WorkloadProfile,
) -> Result<Course, AppError> {
    let mut courses = store.load()?;
    let target = find_course(&mut courses, course)?;
    target.workload = Some(profile);
    info!("Updated workload profile for {}", target.title);
    let updated = target.clone();
    store.save(&courses)?;
    Ok(updated)
}

fn find_course<'a>(courses: &'a mut [Course], key: &CourseKey) -> Result<&'a mut Course, AppError> {
    courses
        .iter_mut()
        .find(|c| c.matches(key))
        .ok_or_else(|| AppError::NotFound(format!("course {} ({} {})", key.title, key.period, key.term)))
}
