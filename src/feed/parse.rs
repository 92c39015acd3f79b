//! Extraction of spots from the latest feed entry.

use parkwatch_types::{ChannelInfo, ParkingSpot, Reading, SpotDefaults};
use serde_json::Value;
use tracing::{debug, error};

use super::value::{get_f64, get_string};
use crate::error::FeedError;

/// Parse a feed payload into a [`Reading`] built from its last entry.
///
/// Returns `Ok(None)` for an empty (or whitespace-only) payload. The numbered
/// fields are read in label order, then `created_at` and `entry_id`; the
/// first one that is missing or malformed aborts the parse.
pub fn parse_reading(json: &str, defaults: &SpotDefaults) -> Result<Option<Reading>, FeedError> {
    if json.trim().is_empty() {
        return Ok(None);
    }

    let root: Value = serde_json::from_str(json)?;
    let root = root.as_object().ok_or(FeedError::NotAnObject("payload"))?;

    let feeds = root
        .get("feeds")
        .and_then(Value::as_array)
        .ok_or(FeedError::MissingFeeds)?;
    let latest = feeds
        .last()
        .ok_or(FeedError::EmptyFeed)?
        .as_object()
        .ok_or(FeedError::NotAnObject("feed entry"))?;

    let spots = defaults
        .fields()
        .enumerate()
        .map(|(index, (field, _))| {
            let value = get_f64(latest, &field)?;
            defaults.spot(index, value).ok_or(FeedError::MissingField(field))
        })
        .collect::<Result<Vec<_>, FeedError>>()?;

    let created_at = get_string(latest, "created_at")?;
    let entry_id = get_string(latest, "entry_id")?;

    let mut reading = Reading::new(entry_id, created_at, spots);
    if let Some(channel) = root.get("channel").and_then(parse_channel) {
        reading = reading.with_channel(channel);
    }

    debug!(
        entry_id = %reading.entry_id,
        entries = feeds.len(),
        spots = reading.len(),
        "parsed feed payload"
    );
    Ok(Some(reading))
}

/// Extract spots from a feed payload, logging and discarding any error.
///
/// An empty payload, a malformed payload and a payload missing any required
/// field all yield an empty list.
pub fn extract_spots(json: &str, defaults: &SpotDefaults) -> Vec<ParkingSpot> {
    match parse_reading(json, defaults) {
        Ok(Some(reading)) => reading.into_spots(),
        Ok(None) => Vec::new(),
        Err(e) => {
            error!(error = %e, "Problem parsing the parking spot JSON results");
            Vec::new()
        }
    }
}

// Channel metadata is informational; a malformed object is ignored.
fn parse_channel(value: &Value) -> Option<ChannelInfo> {
    match serde_json::from_value::<ChannelInfo>(value.clone()) {
        Ok(channel) => Some(channel),
        Err(e) => {
            debug!(error = %e, "ignoring malformed channel metadata");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "channel": {
                "id": 741213,
                "name": "Parcare",
                "field1": "Loc 1",
                "created_at": "2019-03-20T10:00:00Z",
                "last_entry_id": 42
            },
            "feeds": [
                {
                    "created_at": "2019-04-02T11:40:00Z",
                    "entry_id": 41,
                    "field1": "9.0",
                    "field2": "9.0",
                    "field3": "9.0"
                },
                {
                    "created_at": "2019-04-02T11:46:10Z",
                    "entry_id": 42,
                    "field1": "1",
                    "field2": 0,
                    "field3": "23.5"
                }
            ]
        }"#
    }

    #[test]
    fn test_three_spots_from_last_entry() {
        let defaults = SpotDefaults::default();
        let reading = parse_reading(sample_json(), &defaults).unwrap().unwrap();

        assert_eq!(reading.entry_id, "42");
        assert_eq!(reading.created_at, "2019-04-02T11:46:10Z");
        assert_eq!(reading.len(), 3);

        let values: Vec<f64> = reading.spots.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![1.0, 0.0, 23.5]);

        let labels: Vec<&str> = reading.spots.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Loc de parcare 1", "Loc de parcare 2", "Loc de parcare 3"]);

        for spot in &reading.spots {
            assert_eq!(spot.time, defaults.time);
            assert_eq!(spot.url, defaults.url);
        }
    }

    #[test]
    fn test_channel_metadata() {
        let reading = parse_reading(sample_json(), &SpotDefaults::default())
            .unwrap()
            .unwrap();
        let channel = reading.channel.unwrap();
        assert_eq!(channel.id, Some(741213));
        assert_eq!(channel.name.as_deref(), Some("Parcare"));
        assert_eq!(channel.last_entry_id, Some(42));
    }

    #[test]
    fn test_malformed_channel_is_ignored() {
        let json = r#"{
            "channel": "not an object",
            "feeds": [{ "created_at": "t", "entry_id": 1, "field1": 1, "field2": 2, "field3": 3 }]
        }"#;
        let reading = parse_reading(json, &SpotDefaults::default()).unwrap().unwrap();
        assert!(reading.channel.is_none());
        assert_eq!(reading.len(), 3);
    }

    #[test]
    fn test_empty_input_is_none() {
        let defaults = SpotDefaults::default();
        assert!(parse_reading("", &defaults).unwrap().is_none());
        assert!(parse_reading("  \n", &defaults).unwrap().is_none());
        assert!(extract_spots("", &defaults).is_empty());
    }

    #[test]
    fn test_malformed_json() {
        let defaults = SpotDefaults::default();
        assert!(matches!(
            parse_reading("{\"feeds\": [", &defaults),
            Err(FeedError::Json(_))
        ));
        assert!(extract_spots("not json at all", &defaults).is_empty());
    }

    #[test]
    fn test_structural_errors() {
        let defaults = SpotDefaults::default();
        assert!(matches!(
            parse_reading("[1, 2]", &defaults),
            Err(FeedError::NotAnObject("payload"))
        ));
        assert!(matches!(
            parse_reading(r#"{"channel": {}}"#, &defaults),
            Err(FeedError::MissingFeeds)
        ));
        assert!(matches!(
            parse_reading(r#"{"feeds": []}"#, &defaults),
            Err(FeedError::EmptyFeed)
        ));
        assert!(matches!(
            parse_reading(r#"{"feeds": [{}, 5]}"#, &defaults),
            Err(FeedError::NotAnObject("feed entry"))
        ));
    }

    #[test]
    fn test_missing_field_discards_whole_entry() {
        let json = r#"{"feeds": [{ "created_at": "t", "entry_id": 1, "field1": 1, "field2": null }]}"#;
        let defaults = SpotDefaults::default();
        assert!(matches!(
            parse_reading(json, &defaults),
            Err(FeedError::MissingField(f)) if f == "field2"
        ));
        assert!(extract_spots(json, &defaults).is_empty());
    }

    #[test]
    fn test_missing_entry_id() {
        let json = r#"{"feeds": [{ "created_at": "t", "field1": 1, "field2": 2, "field3": 3 }]}"#;
        assert!(matches!(
            parse_reading(json, &SpotDefaults::default()),
            Err(FeedError::MissingField(f)) if f == "entry_id"
        ));
    }

    #[test]
    fn test_custom_labels_select_fields() {
        let defaults = SpotDefaults {
            labels: vec!["North".to_string(), "South".to_string()],
            ..SpotDefaults::default()
        };
        // field3 is absent but only two labels are configured.
        let json = r#"{"feeds": [{ "created_at": "t", "entry_id": "a", "field1": "4", "field2": "5" }]}"#;
        let spots = extract_spots(json, &defaults);
        assert_eq!(spots.len(), 2);
        assert_eq!(spots[1].label, "South");
        assert_eq!(spots[1].value, 5.0);
    }
}
