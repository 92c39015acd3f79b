//! Layered configuration.
//!
//! Settings come from, in increasing priority: built-in defaults, an optional
//! TOML file, and `PARKWATCH_*` environment variables. Command-line flags are
//! applied on top by the binary.
//!
//! ```toml
//! feed_url = "https://api.thingspeak.com/channels/741213/feeds.json?results=2"
//! connect_timeout = "15s"
//! read_timeout = "10s"
//! refresh = "30s"
//! occupied_at = 1.0
//!
//! [spots]
//! labels = ["Loc de parcare 1", "Loc de parcare 2", "Loc de parcare 3"]
//! time = 1554205570
//! url = "https://play.google.com/store/apps/developer?id=Enachescu+Robert"
//! ```
//!
//! Nested keys use a double underscore in the environment, e.g.
//! `PARKWATCH_SPOTS__LABELS="North,South"`.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use parkwatch_types::SpotDefaults;
use serde::Deserialize;

use crate::client::FeedClient;
use crate::data::duration::parse_duration;
use crate::data::Thresholds;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "parkwatch.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "PARKWATCH";

/// Effective settings for a run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Feed URL. When unset, the binary falls back to a payload file.
    pub feed_url: Option<String>,
    pub connect_timeout: String,
    pub read_timeout: String,
    /// Interval between fetches (or file checks).
    pub refresh: String,
    pub occupied_at: f64,
    pub spots: SpotDefaults,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            feed_url: None,
            connect_timeout: "15s".to_string(),
            read_timeout: "10s".to_string(),
            refresh: "30s".to_string(),
            occupied_at: Thresholds::default().occupied_at,
            spots: SpotDefaults::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path` (or `parkwatch.toml` if present) and the
    /// process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_from(path: Option<&Path>, env: Environment) -> Result<Self> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config = Config::builder()
            .add_source(file)
            .add_source(
                env.prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("spots.labels")
                    .try_parsing(true),
            )
            .build()
            .context("loading configuration")?;

        config.try_deserialize().context("invalid configuration")
    }

    pub fn connect_timeout(&self) -> Result<Duration> {
        non_zero("connect_timeout", &self.connect_timeout)
    }

    pub fn read_timeout(&self) -> Result<Duration> {
        non_zero("read_timeout", &self.read_timeout)
    }

    pub fn refresh_interval(&self) -> Result<Duration> {
        non_zero("refresh", &self.refresh)
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            occupied_at: self.occupied_at,
        }
    }

    /// Build a feed client for the configured URL.
    pub fn feed_client(&self) -> Result<FeedClient> {
        let url = self.feed_url.as_deref().context("no feed URL configured")?;
        let client = FeedClient::builder()
            .endpoint(url)
            .connect_timeout(self.connect_timeout()?)
            .read_timeout(self.read_timeout()?)
            .defaults(self.spots.clone())
            .build()?;
        Ok(client)
    }
}

/// Zero would mean a fetch loop with no pause, or a request that can never succeed.
fn non_zero(key: &'static str, value: &str) -> Result<Duration> {
    let duration = parse_duration(value).context(key)?;
    if duration.is_zero() {
        anyhow::bail!("{} must be greater than zero, got '{}'", key, value);
    }
    Ok(duration)
}
