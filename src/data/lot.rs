//! Spot status computation.
//!
//! This module turns a raw [`Reading`] into display data with an occupancy
//! status for every spot, computed from configurable thresholds.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use parkwatch_types::{ChannelInfo, Reading, SpotDefaults};

use crate::feed::parse_reading;

/// Thresholds for occupancy computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Sensor value at or above which a spot counts as occupied.
    pub occupied_at: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { occupied_at: 1.0 }
    }
}

/// Occupancy status for a spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SpotStatus {
    Free,
    Occupied,
}

impl SpotStatus {
    /// Classify a sensor value.
    pub fn from_value(value: f64, thresholds: &Thresholds) -> Self {
        if value >= thresholds.occupied_at {
            SpotStatus::Occupied
        } else {
            SpotStatus::Free
        }
    }

    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            SpotStatus::Free => "FREE",
            SpotStatus::Occupied => "BUSY",
        }
    }
}

/// A spot with its computed status.
#[derive(Debug, Clone)]
pub struct SpotData {
    pub label: String,
    pub value: f64,
    pub time: i64,
    pub url: String,
    pub status: SpotStatus,
}

/// Complete parsed lot data ready for display.
#[derive(Debug, Clone)]
pub struct LotData {
    pub entry_id: String,
    pub created_at: String,
    pub channel: Option<ChannelInfo>,
    /// Spots in feed field order.
    pub spots: Vec<SpotData>,
    pub last_updated: Instant,
}

impl LotData {
    /// Load and parse lot data from a saved feed payload.
    pub fn load(path: &Path, defaults: &SpotDefaults, thresholds: &Thresholds) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&content, defaults, thresholds)
    }

    /// Parse lot data from a feed payload string.
    pub fn parse(content: &str, defaults: &SpotDefaults, thresholds: &Thresholds) -> Result<Self> {
        let reading = parse_reading(content, defaults)?.context("feed payload is empty")?;
        Ok(Self::from_reading(reading, thresholds))
    }

    /// Convert a Reading into processed LotData.
    ///
    /// This is the primary conversion method used by all data sources.
    pub fn from_reading(reading: Reading, thresholds: &Thresholds) -> Self {
        let spots = reading
            .spots
            .into_iter()
            .map(|spot| SpotData {
                status: SpotStatus::from_value(spot.value, thresholds),
                label: spot.label,
                value: spot.value,
                time: spot.time,
                url: spot.url,
            })
            .collect();

        Self {
            entry_id: reading.entry_id,
            created_at: reading.created_at,
            channel: reading.channel,
            spots,
            last_updated: Instant::now(),
        }
    }

    /// Number of free spots.
    pub fn free_count(&self) -> usize {
        self.count(SpotStatus::Free)
    }

    /// Number of occupied spots.
    pub fn occupied_count(&self) -> usize {
        self.count(SpotStatus::Occupied)
    }

    fn count(&self, status: SpotStatus) -> usize {
        self.spots.iter().filter(|s| s.status == status).count()
    }

    /// Channel name, if the feed published one.
    pub fn channel_name(&self) -> Option<&str> {
        self.channel.as_ref().and_then(|c| c.name.as_deref())
    }

    /// Entries published after the displayed one, when the channel reports
    /// a newer last entry id than the entry we read.
    pub fn entries_behind(&self) -> Option<u64> {
        let last = self.channel.as_ref()?.last_entry_id?;
        let current: u64 = self.entry_id.parse().ok()?;
        Some(last.saturating_sub(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkwatch_types::ParkingSpot;

    fn reading(values: &[f64]) -> Reading {
        let defaults = SpotDefaults::default();
        let spots = values
            .iter()
            .enumerate()
            .map(|(i, v)| ParkingSpot::new(*v, format!("Spot {}", i + 1), defaults.time, "u"))
            .collect();
        Reading::new("12", "2019-04-02T11:46:10Z", spots)
    }

    #[test]
    fn test_status_threshold_is_inclusive() {
        let t = Thresholds { occupied_at: 50.0 };
        assert_eq!(SpotStatus::from_value(49.9, &t), SpotStatus::Free);
        assert_eq!(SpotStatus::from_value(50.0, &t), SpotStatus::Occupied);
    }

    #[test]
    fn test_from_reading_keeps_field_order() {
        let data = LotData::from_reading(reading(&[1.0, 0.0, 1.0]), &Thresholds::default());
        let labels: Vec<&str> = data.spots.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Spot 1", "Spot 2", "Spot 3"]);
        assert_eq!(data.occupied_count(), 2);
        assert_eq!(data.free_count(), 1);
        assert_eq!(data.entry_id, "12");
    }

    #[test]
    fn test_entries_behind() {
        let mut data = LotData::from_reading(reading(&[0.0]), &Thresholds::default());
        assert_eq!(data.entries_behind(), None);

        data.channel = Some(ChannelInfo {
            id: Some(1),
            name: Some("Lot".to_string()),
            last_entry_id: Some(15),
        });
        assert_eq!(data.entries_behind(), Some(3));
        assert_eq!(data.channel_name(), Some("Lot"));
    }

    #[test]
    fn test_parse_empty_payload_is_error() {
        let result = LotData::parse("", &SpotDefaults::default(), &Thresholds::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = LotData::load(
            Path::new("/nonexistent/feed.json"),
            &SpotDefaults::default(),
            &Thresholds::default(),
        );
        assert!(result.unwrap_err().to_string().contains("/nonexistent/feed.json"));
    }
}
