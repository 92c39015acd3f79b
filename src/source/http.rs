//! HTTP feed data source.
//!
//! Fetches the feed on a background worker thread so the UI never blocks
//! on the network. The worker performs one request at a time: it fetches,
//! publishes the result, then sleeps until the refresh interval elapses or
//! a refresh is requested.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use parkwatch_types::Reading;
use tokio::sync::watch;
use tracing::{info, warn};

use super::{ChannelSource, DataSource};
use crate::client::FeedClient;

type SharedError = Arc<Mutex<Option<String>>>;

/// A data source that polls a feed URL over HTTP.
///
/// Failed fetches are logged and reported through [`DataSource::error`];
/// the last good reading stays current until a fetch succeeds again.
#[derive(Debug)]
pub struct HttpSource {
    channel: ChannelSource,
    trigger: mpsc::Sender<()>,
    shared_error: SharedError,
    last_error: Option<String>,
}

impl HttpSource {
    /// Spawn the fetch worker. The first fetch starts immediately.
    pub fn spawn(client: FeedClient, interval: Duration) -> std::io::Result<Self> {
        if interval.is_zero() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "refresh interval must be greater than zero",
            ));
        }

        let url = client.url().to_string();
        let (tx, mut channel) = ChannelSource::create(&url);
        channel.set_description(format!("http: {}", url));

        let (trigger, trigger_rx) = mpsc::channel();
        let shared_error: SharedError = Arc::new(Mutex::new(None));
        let error_handle = shared_error.clone();

        thread::Builder::new()
            .name("parkwatch-fetch".to_string())
            .spawn(move || run_worker(client, interval, tx, trigger_rx, error_handle))?;

        Ok(Self {
            channel,
            trigger,
            shared_error,
            last_error: None,
        })
    }
}

fn run_worker(
    client: FeedClient,
    interval: Duration,
    tx: watch::Sender<Option<Reading>>,
    trigger: mpsc::Receiver<()>,
    errors: SharedError,
) {
    loop {
        match client.fetch() {
            Ok(reading) => {
                info!(entry_id = %reading.entry_id, spots = reading.len(), "fetched feed entry");
                set_error(&errors, None);
                if tx.send(Some(reading)).is_err() {
                    // Receiver dropped
                    break;
                }
            }
            Err(e) => {
                warn!(url = %client.url(), error = %e, "feed fetch failed");
                set_error(&errors, Some(e.to_string()));
            }
        }

        match trigger.recv_timeout(interval) {
            Ok(()) | Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        // Coalesce refresh requests that queued up during the wait.
        while trigger.try_recv().is_ok() {}
    }
}

fn set_error(errors: &SharedError, error: Option<String>) {
    let mut guard = errors.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = error;
}

impl DataSource for HttpSource {
    fn poll(&mut self) -> Option<Reading> {
        let reading = self.channel.poll();
        self.last_error = self
            .shared_error
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        reading
    }

    fn description(&self) -> &str {
        self.channel.description()
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn refresh(&mut self) {
        // The worker only exits once this sender is dropped.
        let _ = self.trigger.send(());
    }
}
