//! # parkwatch
//!
//! A terminal viewer and library for parking sensor feeds.
//!
//! Parking sensors publish their readings to a JSON channel feed (the
//! ThingSpeak `feeds.json` format): every entry carries one numeric field per
//! spot. This crate fetches such a feed over HTTP, takes the most recent
//! entry, and turns its fields into labelled [`ParkingSpot`] records that can
//! be displayed in an interactive terminal UI, printed once, or exported.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(occupancy)    │(rendering)   │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐                 │
//! │  │ source  │◀───│  client  │◀───│  feed   │                 │
//! │  │ (input) │    │  (HTTP)  │    │ (parse) │                 │
//! │  └─────────┘    └──────────┘    └─────────┘                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`feed`]**: Payload parsing: the last entry of `feeds` becomes a [`Reading`]
//! - **[`client`]**: Blocking HTTP retrieval with connect/read timeouts
//! - **[`source`]**: Data source abstraction ([`DataSource`] trait) with implementations
//!   for HTTP polling, saved payload files, and channel-based input
//! - **[`data`]**: Occupancy status, value history for sparklines
//! - **[`app`]** / **[`ui`]**: Application state and ratatui rendering
//!
//! ## Usage
//!
//! ### One-shot retrieval
//!
//! [`fetch_parking_data`] never fails: any problem is logged and yields an
//! empty list.
//!
//! ```no_run
//! let spots = parkwatch::fetch_parking_data(
//!     "https://api.thingspeak.com/channels/741213/feeds.json?results=2",
//! );
//! for spot in &spots {
//!     println!("{}: {}", spot.label, spot.value);
//! }
//! ```
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch a live feed
//! parkwatch --url "https://api.thingspeak.com/channels/741213/feeds.json?results=2"
//!
//! # Print the current state once
//! parkwatch --url "..." --once --json
//!
//! # View a saved payload
//! parkwatch --file feed.json
//! ```
//!
//! ### As a library with a channel source
//!
//! ```
//! use parkwatch::{App, ChannelSource, Thresholds};
//!
//! let (tx, source) = ChannelSource::create("sensor gateway");
//! let app = App::new(Box::new(source), Thresholds::default());
//! ```

pub mod app;
pub mod client;
pub mod data;
pub mod error;
pub mod events;
pub mod export;
pub mod feed;
pub mod logging;
pub mod settings;
pub mod source;
pub mod ui;

pub use app::App;
pub use client::{create_url, fetch_parking_data, read_body, FeedClient, FeedClientBuilder};
pub use data::{LotData, SpotData, SpotStatus, Thresholds};
pub use error::{FeedError, FetchError};
pub use feed::{extract_spots, parse_reading};
pub use settings::Settings;
pub use source::{ChannelSource, DataSource, FileSource, HttpSource};

pub use parkwatch_types::{ChannelInfo, ParkingSpot, Reading, SpotDefaults};
