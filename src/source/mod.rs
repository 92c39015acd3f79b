//! Data source abstraction for receiving feed readings.
//!
//! This module provides a trait-based abstraction for receiving readings
//! from various sources (an HTTP feed, a saved payload file, or an in-memory
//! channel fed by the embedding application).

mod channel;
mod file;
mod http;

pub use channel::ChannelSource;
pub use file::FileSource;
pub use http::HttpSource;

use std::fmt::Debug;

use parkwatch_types::Reading;

/// Trait for receiving feed readings from various sources.
///
/// # Example
///
/// ```
/// use parkwatch::{DataSource, FileSource};
///
/// let mut source = FileSource::new("feed.json");
/// if let Some(reading) = source.poll() {
///     println!("Entry {} has {} spots", reading.entry_id, reading.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest reading.
    ///
    /// Returns `Some(reading)` if new data is available, `None` otherwise.
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<Reading>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// Returns the error message from the most recent failed attempt, if
    /// the source has not recovered since.
    fn error(&self) -> Option<&str>;

    /// Ask the source to fetch fresh data as soon as possible.
    fn refresh(&mut self) {}
}
