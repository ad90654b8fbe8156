use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::AppError;

/// Provider of raw report pages by name.
pub trait DocumentSource {
    fn names(&self) -> Result<Vec<String>, AppError>;
    fn fetch(&self, name: &str) -> Result<String, AppError>;
}

/// `<dir>/<name>.html` files saved from the browser.
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DocumentSource for DirectorySource {
    /// Every `*.html` file stem in the directory, sorted. An unreadable or
    /// missing directory has no pages.
    fn names(&self) -> Result<Vec<String>, AppError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("No report pages: cannot read {}: {}", self.dir.display(), e);
                return Ok(Vec::new());
            }
        };

        let mut names = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|s| s.to_str()) != Some("html") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        debug!("Found {} report pages in {}", names.len(), self.dir.display());
        Ok(names)
    }

    fn fetch(&self, name: &str) -> Result<String, AppError> {
        let path = self.dir.join(format!("{name}.html"));
        fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => AppError::DocumentNotFound(path.display().to_string()),
            _ => AppError::MalformedDocument {
                source_name: name.to_string(),
                reason: e.to_string(),
            },
        })
    }
}

#[derive(Debug, Default)]
pub struct InMemoryDocumentSource {
    pages: BTreeMap<String, String>,
}

impl InMemoryDocumentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, name: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(name.into(), html.into());
        self
    }
}

impl DocumentSource for InMemoryDocumentSource {
    fn names(&self) -> Result<Vec<String>, AppError> {
        Ok(self.pages.keys().cloned().collect())
    }

    fn fetch(&self, name: &str) -> Result<String, AppError> {
        self.pages
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::DocumentNotFound(name.to_string()))
    }
}
