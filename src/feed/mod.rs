//! Feed payload parsing.
//!
//! A feed payload is a JSON object with a `feeds` array of observations,
//! oldest first, plus optional `channel` metadata:
//!
//! ```text
//! {
//!   "channel": { "id": 741213, "name": "Parcare", "last_entry_id": 42 },
//!   "feeds": [
//!     { "created_at": "...", "entry_id": 41, "field1": "0", "field2": "1", "field3": "0" },
//!     { "created_at": "...", "entry_id": 42, "field1": "1", "field2": "1", "field3": "0" }
//!   ]
//! }
//! ```
//!
//! Only the last entry is read. Its numbered fields become one
//! [`ParkingSpot`](parkwatch_types::ParkingSpot) each, labelled from
//! [`SpotDefaults`](parkwatch_types::SpotDefaults).

mod parse;
mod value;

pub use parse::{extract_spots, parse_reading};
pub use value::{get_f64, get_string};
