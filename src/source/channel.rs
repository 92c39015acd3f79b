//! Channel-based data source.
//!
//! Receives readings via a tokio watch channel. Applications that fetch
//! feeds themselves push readings through the sender half.

use parkwatch_types::Reading;
use tokio::sync::watch;

use super::DataSource;

/// A data source that receives readings via a channel.
///
/// # Example
///
/// ```
/// use parkwatch::{ChannelSource, DataSource};
/// use parkwatch_types::Reading;
///
/// let (tx, mut source) = ChannelSource::create("lot-a");
/// tx.send(Some(Reading::new("1", "2019-04-02T11:46:10Z", Vec::new()))).unwrap();
/// assert_eq!(source.poll().unwrap().entry_id, "1");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<Option<Reading>>,
    description: String,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of a watch channel
    /// * `source_description` - Where readings come from, for display
    pub fn new(receiver: watch::Receiver<Option<Reading>>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", source_description),
        }
    }

    /// Create a channel pair for sending readings to a ChannelSource.
    pub fn create(source_description: &str) -> (watch::Sender<Option<Reading>>, Self) {
        let (tx, rx) = watch::channel(None);
        (tx, Self::new(rx, source_description))
    }

    /// Replace the description shown in the status bar.
    pub(crate) fn set_description(&mut self, description: String) {
        self.description = description;
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<Reading> {
        // The last value stays readable after every sender is dropped.
        let latest = self.receiver.borrow_and_update();
        if latest.has_changed() {
            (*latest).clone()
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        None
    }
}
