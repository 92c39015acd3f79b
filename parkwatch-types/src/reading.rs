//! Reading - the spots built from one feed entry.

use crate::ParkingSpot;

/// Channel metadata published alongside the feed entries.
///
/// Every field is optional; feeds that do not publish a `channel` object
/// produce no `ChannelInfo` at all.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelInfo {
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub id: Option<u64>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub last_entry_id: Option<u64>,
}

/// The most recent feed entry, materialized into parking spots.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reading {
    /// Identifier of the feed entry the spots came from.
    pub entry_id: String,
    /// Creation time of the entry, as published by the feed.
    pub created_at: String,
    /// Channel metadata, if the payload carried any.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub channel: Option<ChannelInfo>,
    /// One spot per configured label, in label order.
    pub spots: Vec<ParkingSpot>,
}

impl Reading {
    /// Create a reading without channel metadata.
    pub fn new(
        entry_id: impl Into<String>,
        created_at: impl Into<String>,
        spots: Vec<ParkingSpot>,
    ) -> Self {
        Self {
            entry_id: entry_id.into(),
            created_at: created_at.into(),
            channel: None,
            spots,
        }
    }

    /// Attach channel metadata.
    pub fn with_channel(mut self, channel: ChannelInfo) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Number of spots.
    pub fn len(&self) -> usize {
        self.spots.len()
    }

    /// Check if the reading has no spots.
    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    /// Find a spot by label.
    pub fn get(&self, label: &str) -> Option<&ParkingSpot> {
        self.spots.iter().find(|s| s.label == label)
    }

    /// Consume the reading, keeping only the spots.
    pub fn into_spots(self) -> Vec<ParkingSpot> {
        self.spots
    }
}
