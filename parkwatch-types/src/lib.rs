//! # parkwatch-types
//!
//! Core record types for parking sensor feeds. A feed publishes observations
//! as numbered fields (`field1`, `field2`, ...); each field carries the
//! measurement for one parking place. These types describe the records that
//! parkwatch builds from the most recent observation.
//!
//! ## Features
//!
//! - `serde`: JSON (or any serde format) serialization of all types
//!
//! ## Example
//!
//! ```rust
//! use parkwatch_types::{ParkingSpot, Reading, SpotDefaults};
//!
//! let defaults = SpotDefaults::default();
//! let spots: Vec<ParkingSpot> = [1.0, 0.0, 1.0]
//!     .iter()
//!     .zip(defaults.labels.iter())
//!     .map(|(value, label)| ParkingSpot::new(*value, label, defaults.time, &defaults.url))
//!     .collect();
//!
//! let reading = Reading::new("42", "2019-04-02T11:46:10Z", spots);
//! assert_eq!(reading.len(), 3);
//! assert_eq!(reading.spots[1].label, "Loc de parcare 2");
//! ```

mod reading;
mod spot;

pub use reading::*;
pub use spot::*;

/// Highest field number a feed entry can carry.
pub const MAX_FIELDS: usize = 8;
