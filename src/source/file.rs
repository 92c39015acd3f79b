//! File-based data source.
//!
//! Polls a saved feed payload (for example the output of
//! `curl -o feed.json <feed url>`) for readings.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use parkwatch_types::{Reading, SpotDefaults};

use super::DataSource;
use crate::feed::parse_reading;

/// A data source that reads feed payloads from a JSON file.
///
/// The source tracks the file's modification time and only returns
/// new data when the file has been updated.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    defaults: SpotDefaults,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
}

impl FileSource {
    /// Create a new file source for the given path, using the default labels.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_defaults(path, SpotDefaults::default())
    }

    /// Create a new file source with custom spot labels.
    pub fn with_defaults<P: AsRef<Path>>(path: P, defaults: SpotDefaults) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            defaults,
            last_error: None,
            last_modified: None,
        }
    }

    /// Returns the path being monitored.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file's modification time.
    fn get_modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    /// Read and parse the file.
    fn read_file(&mut self) -> Option<Reading> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                self.last_error = Some(format!("Read error: {}", e));
                return None;
            }
        };

        match parse_reading(&content, &self.defaults) {
            Ok(Some(reading)) => {
                self.last_error = None;
                Some(reading)
            }
            Ok(None) => {
                self.last_error = Some("Parse error: file is empty".to_string());
                None
            }
            Err(e) => {
                self.last_error = Some(format!("Parse error: {}", e));
                None
            }
        }
    }
}

impl DataSource for FileSource {
    fn poll(&mut self) -> Option<Reading> {
        let current_modified = self.get_modified_time();

        // Check if file has been modified since last read
        let file_changed = match (&self.last_modified, &current_modified) {
            (None, _) => true,        // Nothing read yet, always try
            (Some(_), None) => false, // File disappeared, keep what we have
            (Some(last), Some(current)) => current > last,
        };

        if file_changed {
            if let Some(reading) = self.read_file() {
                self.last_modified = current_modified;
                return Some(reading);
            }
        }

        None
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn refresh(&mut self) {
        // Forget the mtime so the next poll re-reads the file.
        self.last_modified = None;
    }
}
