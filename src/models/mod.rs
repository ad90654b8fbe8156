pub mod course;
pub mod deadline;
pub mod workload;

pub use course::{Course, CourseKey};
pub use deadline::{Deadline, DeadlineKey};
pub use workload::{Category, Hours, WorkloadProfile};
