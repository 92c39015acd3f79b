//! HTTP retrieval of feed payloads.
//!
//! Each fetch is a single blocking GET on the calling thread. Connections
//! are not pooled: the client keeps no idle connections, so every request
//! opens a fresh one and closes it once the body has been read.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use parkwatch::FeedClient;
//!
//! let client = FeedClient::builder()
//!     .endpoint("https://api.thingspeak.com/channels/741213/feeds.json?results=2")
//!     .connect_timeout(Duration::from_secs(5))
//!     .build()?;
//!
//! let reading = client.fetch()?;
//! for spot in &reading.spots {
//!     println!("{}: {}", spot.label, spot.value);
//! }
//! # Ok::<(), parkwatch::FetchError>(())
//! ```

use std::io::{self, BufRead, BufReader, Read};
use std::time::Duration;

use parkwatch_types::{ParkingSpot, Reading, SpotDefaults, MAX_FIELDS};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use tracing::{debug, error};

use crate::error::FetchError;
use crate::feed::{extract_spots, parse_reading};

/// Time allowed to establish the connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
/// Time allowed to receive the response once connected.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetch a feed and build its spots with the default labels.
///
/// Never fails: a malformed URL, a network error, a non-200 response or an
/// unparseable body is logged and an empty list is returned.
pub fn fetch_parking_data(request_url: &str) -> Vec<ParkingSpot> {
    let client = match FeedClient::builder().endpoint(request_url).build() {
        Ok(client) => client,
        Err(e) => {
            error!(url = request_url, error = %e, "{}", build_failure(&e));
            return Vec::new();
        }
    };

    let body = match client.fetch_body() {
        Ok(body) => body,
        Err(e) => {
            error!(url = request_url, error = %e, "Problem making the HTTP request");
            String::new()
        }
    };

    extract_spots(&body, client.defaults())
}

/// Log message for a client that could not be built.
fn build_failure(err: &FetchError) -> &'static str {
    match err {
        FetchError::InvalidUrl { .. } => "Problem building the URL",
        _ => "Problem configuring the HTTP client",
    }
}

/// Parse and validate a feed URL. Only `http` and `https` are accepted.
pub fn create_url(request_url: &str) -> Result<Url, FetchError> {
    let invalid = |reason: String| FetchError::InvalidUrl {
        url: request_url.to_string(),
        reason,
    };

    let url = Url::parse(request_url.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}

/// Read a UTF-8 body line by line, joining the lines without separators.
pub fn read_body<R: Read>(reader: R) -> io::Result<String> {
    let mut output = String::new();
    for line in BufReader::new(reader).lines() {
        output.push_str(&line?);
    }
    Ok(output)
}

/// Blocking client for a single feed endpoint.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    url: Url,
    defaults: SpotDefaults,
}

impl FeedClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> FeedClientBuilder {
        FeedClientBuilder::default()
    }

    /// The endpoint this client fetches.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Labels and fixed values applied to every reading.
    pub fn defaults(&self) -> &SpotDefaults {
        &self.defaults
    }

    /// Perform one GET and return the body.
    ///
    /// Any status other than 200 is an error, including other 2xx codes.
    pub fn fetch_body(&self) -> Result<String, FetchError> {
        debug!(url = %self.url, "requesting feed");
        let response = self.client.get(self.url.clone()).send()?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = read_body(response).map_err(FetchError::from_body_read)?;
        debug!(bytes = body.len(), "received feed payload");
        Ok(body)
    }

    /// Fetch the feed and parse its latest entry.
    pub fn fetch(&self) -> Result<Reading, FetchError> {
        let body = self.fetch_body()?;
        parse_reading(&body, &self.defaults)?.ok_or(FetchError::EmptyResponse)
    }
}

/// Builder for FeedClient.
#[derive(Debug, Default)]
pub struct FeedClientBuilder {
    endpoint: Option<String>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    defaults: Option<SpotDefaults>,
}

impl FeedClientBuilder {
    /// Set the feed URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the connect timeout (default: 15 seconds).
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the read timeout (default: 10 seconds).
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Set the labels and fixed values stamped onto spots.
    pub fn defaults(mut self, defaults: SpotDefaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<FeedClient, FetchError> {
        let endpoint = self.endpoint.unwrap_or_default();
        if endpoint.trim().is_empty() {
            return Err(FetchError::InvalidUrl {
                url: endpoint,
                reason: "no feed URL configured".to_string(),
            });
        }
        let url = create_url(&endpoint)?;

        let defaults = self.defaults.unwrap_or_default();
        if defaults.labels.is_empty() || defaults.labels.len() > MAX_FIELDS {
            return Err(FetchError::Config(format!(
                "expected 1 to {} spot labels, got {}",
                MAX_FIELDS,
                defaults.labels.len()
            )));
        }

        let connect_timeout = self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT);
        let read_timeout = self.read_timeout.unwrap_or(DEFAULT_READ_TIMEOUT);
        if connect_timeout.is_zero() || read_timeout.is_zero() {
            return Err(FetchError::Config(
                "connect and read timeouts must be greater than zero".to_string(),
            ));
        }

        // The blocking client has no separate read timeout, so the overall
        // deadline covers connecting plus reading.
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(connect_timeout + read_timeout)
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(FeedClient {
            client,
            url,
            defaults,
        })
    }
}
