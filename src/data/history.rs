//! Historical data tracking for sparklines and change detection.

use std::collections::{HashMap, VecDeque};
use std::time::Instant;

use super::lot::LotData;

/// Maximum number of historical samples to keep.
const MAX_HISTORY_SIZE: usize = 60;

/// Tracks spot values across polls.
///
/// Samples are only recorded when the feed publishes a new entry, so a
/// sparkline shows one bar per feed entry rather than one per poll.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Historical values per spot (label -> samples).
    pub spot_values: HashMap<String, VecDeque<f64>>,
    /// Entry ids recorded so far, oldest first.
    pub entry_ids: VecDeque<String>,
    /// When each entry was first seen.
    pub timestamps: VecDeque<Instant>,
}

impl History {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new data snapshot.
    ///
    /// Returns `true` if the entry had not been seen before.
    pub fn record(&mut self, data: &LotData) -> bool {
        if self.entry_ids.back() == Some(&data.entry_id) {
            return false;
        }

        for spot in &data.spots {
            let values = self.spot_values.entry(spot.label.clone()).or_default();
            values.push_back(spot.value);
            if values.len() > MAX_HISTORY_SIZE {
                values.pop_front();
            }
        }

        self.entry_ids.push_back(data.entry_id.clone());
        if self.entry_ids.len() > MAX_HISTORY_SIZE {
            self.entry_ids.pop_front();
        }

        self.timestamps.push_back(data.last_updated);
        if self.timestamps.len() > MAX_HISTORY_SIZE {
            self.timestamps.pop_front();
        }
        true
    }

    /// Number of distinct entries recorded.
    pub fn len(&self) -> usize {
        self.entry_ids.len()
    }

    /// Check if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entry_ids.is_empty()
    }

    /// Get sparkline data for a spot (normalized to 0-7 for 8 bar levels).
    ///
    /// Returns an empty Vec if there's not enough history.
    pub fn get_sparkline(&self, label: &str) -> Vec<u8> {
        let Some(values) = self.spot_values.get(label) else {
            return Vec::new();
        };

        if values.len() < 2 {
            return Vec::new();
        }

        let max = values.iter().copied().fold(f64::MIN, f64::max);
        let min = values.iter().copied().fold(f64::MAX, f64::min);
        let range = max - min;

        values
            .iter()
            .map(|&v| {
                if range <= 0.0 {
                    0
                } else {
                    (((v - min) / range * 7.0) as u8).min(7)
                }
            })
            .collect()
    }

    /// Value change between the two most recent entries for a spot.
    ///
    /// Returns None if there's not enough history.
    pub fn get_change(&self, label: &str) -> Option<f64> {
        let values = self.spot_values.get(label)?;
        if values.len() < 2 {
            return None;
        }
        let current = *values.back()?;
        let previous = *values.get(values.len() - 2)?;
        Some(current - previous)
    }

    /// Time since the feed last published a new entry.
    pub fn since_last_entry(&self) -> Option<std::time::Duration> {
        self.timestamps.back().map(|t| t.elapsed())
    }
}
