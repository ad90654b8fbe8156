use std::env;
use std::path::PathBuf;

use crate::error::AppError;

pub const DEFAULT_STORE_PATH: &str = "CoursesData.json";
pub const DEFAULT_REPORT_DIR: &str = "reports";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub store_path: PathBuf,
    pub report_dir: PathBuf,
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let store_path = env_path("DEADLINE_STORE_PATH", DEFAULT_STORE_PATH)?;
        let report_dir = env_path("DEADLINE_REPORT_DIR", DEFAULT_REPORT_DIR)?;

        Ok(Self {
            store_path,
            report_dir,
        })
    }
}

fn env_path(key: &str, default: &str) -> Result<PathBuf, AppError> {
    match env::var(key) {
        Ok(v) if v.trim().is_empty() => Err(AppError::Config(format!("{key} is set but empty"))),
        Ok(v) => Ok(PathBuf::from(v)),
        Err(env::VarError::NotPresent) => Ok(PathBuf::from(default)),
        Err(env::VarError::NotUnicode(_)) => {
            Err(AppError::Config(format!("{key} is not valid unicode")))
        }
    }
}
