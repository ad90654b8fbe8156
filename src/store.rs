use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::AppError;
use crate::models::Course;

/// Persistence for the whole course collection. `save` either replaces the
/// stored collection completely or leaves it as it was.
pub trait CourseStore {
    fn load(&self) -> Result<Vec<Course>, AppError>;
    fn save(&mut self, courses: &[Course]) -> Result<(), AppError>;
}

/// Single-line JSON array in one file.
pub struct JsonCourseStore {
    path: PathBuf,
}

impl JsonCourseStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CourseStore for JsonCourseStore {
    fn load(&self) -> Result<Vec<Course>, AppError> {
        if !self.path.exists() {
            info!("No course store at {}, starting empty", self.path.display());
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&self.path).map_err(|source| AppError::StoreRead {
            path: self.path.clone(),
            source,
        })?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let courses: Vec<Course> = serde_json::from_str(&text).map_err(AppError::StoreDecode)?;
        debug!("Loaded {} courses from {}", courses.len(), self.path.display());
        Ok(courses)
    }

    fn save(&mut self, courses: &[Course]) -> Result<(), AppError> {
        let body = serde_json::to_string(courses).map_err(AppError::StoreEncode)?;
        let tmp = self.temp_path();

        let written = write_file(&tmp, body.as_bytes()).and_then(|_| fs::rename(&tmp, &self.path));
        if let Err(source) = written {
            let _ = fs::remove_file(&tmp);
            return Err(AppError::StoreWrite {
                path: self.path.clone(),
                source,
            });
        }
        info!("Courses data written successfully to {}", self.path.display());
        Ok(())
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// Store held in memory, for tests and dry runs. `fail_writes` makes every
/// `save` fail without touching the held collection.
#[derive(Debug, Default)]
pub struct InMemoryCourseStore {
    courses: Vec<Course>,
    saves: usize,
    pub fail_writes: bool,
}

impl InMemoryCourseStore {
    pub fn new(courses: Vec<Course>) -> Self {
        Self {
            courses,
            ..Default::default()
        }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl CourseStore for InMemoryCourseStore {
    fn load(&self) -> Result<Vec<Course>, AppError> {
        Ok(self.courses.clone())
    }

    fn save(&mut self, courses: &[Course]) -> Result<(), AppError> {
        if self.fail_writes {
            return Err(AppError::StoreWrite {
                path: PathBuf::from("<memory>"),
                source: io::Error::other("writes disabled"),
            });
        }
        self.courses = courses.to_vec();
        self.saves += 1;
        Ok(())
    }
}

/// Stable order by period, the order courses are listed in.
pub fn sort_by_period(courses: &mut [Course]) {
    courses.sort_by(|a, b| a.period.cmp(&b.period));
}
