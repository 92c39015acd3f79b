//! Data models and processing for feed readings.
//!
//! This module handles the transformation of parsed readings into
//! status-annotated data suitable for display.
//!
//! ## Submodules
//!
//! - [`duration`]: Parsing and formatting of duration strings (e.g., "15s", "500ms")
//! - [`history`]: Per-spot value history for sparklines and change detection
//! - [`lot`]: Display models ([`LotData`], [`SpotData`], [`SpotStatus`])
//!
//! ## Data Flow
//!
//! ```text
//! Reading (parsed feed entry)
//!        │
//!        ▼
//! LotData::from_reading()
//!        │
//!        ├──▶ SpotData (with status computed from Thresholds)
//!        │
//!        └──▶ History::record() (for sparklines)
//! ```

pub mod duration;
pub mod history;
pub mod lot;

pub use history::History;
pub use lot::{LotData, SpotData, SpotStatus, Thresholds};
