//! Parking spot records and the fixed values used to build them.

/// Label used for the first spot.
pub const DEFAULT_LABEL_1: &str = "Loc de parcare 1";
/// Label used for the second spot.
pub const DEFAULT_LABEL_2: &str = "Loc de parcare 2";
/// Label used for the third spot.
pub const DEFAULT_LABEL_3: &str = "Loc de parcare 3";
/// Timestamp (Unix seconds) stamped on every spot.
pub const DEFAULT_SPOT_TIME: i64 = 1554205570;
/// Link attached to every spot.
pub const DEFAULT_SPOT_URL: &str =
    "https://play.google.com/store/apps/developer?id=Enachescu+Robert";

/// A single parking place as shown to the user.
///
/// Built once from a feed entry and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParkingSpot {
    /// Sensor value read from the spot's feed field.
    pub value: f64,
    /// Human-readable location label.
    pub label: String,
    /// Unix timestamp in seconds.
    pub time: i64,
    /// Link for more information about the spot.
    pub url: String,
}

impl ParkingSpot {
    /// Create a new spot record.
    pub fn new(value: f64, label: impl Into<String>, time: i64, url: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
            time,
            url: url.into(),
        }
    }
}

/// Values that are not taken from the feed but stamped onto every spot.
///
/// `labels[i]` is paired with feed field `field{i + 1}`, so the number of
/// labels decides how many spots a reading produces.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpotDefaults {
    pub labels: Vec<String>,
    pub time: i64,
    pub url: String,
}

impl Default for SpotDefaults {
    fn default() -> Self {
        Self {
            labels: vec![
                DEFAULT_LABEL_1.to_string(),
                DEFAULT_LABEL_2.to_string(),
                DEFAULT_LABEL_3.to_string(),
            ],
            time: DEFAULT_SPOT_TIME,
            url: DEFAULT_SPOT_URL.to_string(),
        }
    }
}

impl SpotDefaults {
    /// Feed field names paired with their labels, in order.
    pub fn fields(&self) -> impl Iterator<Item = (String, &str)> {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, label)| (format!("field{}", i + 1), label.as_str()))
    }

    /// Build the spot for the given label index.
    pub fn spot(&self, index: usize, value: f64) -> Option<ParkingSpot> {
        let label = self.labels.get(index)?;
        Some(ParkingSpot::new(value, label, self.time, &self.url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels_and_constants() {
        let defaults = SpotDefaults::default();
        assert_eq!(
            defaults.labels,
            vec!["Loc de parcare 1", "Loc de parcare 2", "Loc de parcare 3"]
        );
        assert_eq!(defaults.time, 1554205570);
        assert!(defaults.url.starts_with("https://play.google.com/"));
    }

    #[test]
    fn test_fields_pair_with_labels() {
        let defaults = SpotDefaults::default();
        let fields: Vec<(String, &str)> = defaults.fields().collect();
        assert_eq!(fields[0], ("field1".to_string(), "Loc de parcare 1"));
        assert_eq!(fields[2], ("field3".to_string(), "Loc de parcare 3"));
    }

    #[test]
    fn test_spot_out_of_range() {
        let defaults = SpotDefaults::default();
        assert!(defaults.spot(3, 1.0).is_none());

        let spot = defaults.spot(0, 12.5).unwrap();
        assert_eq!(spot.value, 12.5);
        assert_eq!(spot.time, DEFAULT_SPOT_TIME);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_spot_defaults_partial_deserialize() {
        let defaults: SpotDefaults = serde_json::from_str(r#"{"labels": ["A", "B"]}"#).unwrap();
        assert_eq!(defaults.labels, vec!["A", "B"]);
        assert_eq!(defaults.time, DEFAULT_SPOT_TIME);
    }
}
