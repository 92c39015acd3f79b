//! Application state and navigation logic.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::debug;

use crate::data::{History, LotData, SpotData, Thresholds};
use crate::source::DataSource;
use crate::ui::spots::{sort_spots_by, SortColumn};
use crate::ui::Theme;

/// File written by the in-app export key.
pub const DEFAULT_EXPORT_PATH: &str = "parkwatch_export.json";

/// How long a status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// The current view/tab in the TUI.
///
/// Spot detail is shown as an overlay (controlled by `App::show_detail_overlay`)
/// rather than as a separate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Table of all spots with their status.
    Spots,
    /// The feed entry behind the table and the state of the source.
    Feed,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Spots => View::Feed,
            View::Feed => View::Spots,
        }
    }

    /// Cycle to the previous view. With two views this is the same as `next`.
    pub fn prev(self) -> Self {
        self.next()
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Spots => "Spots",
            View::Feed => "Feed",
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Data source
    source: Box<dyn DataSource>,
    pub data: Option<LotData>,
    pub history: History,
    pub load_error: Option<String>,
    pub thresholds: Thresholds,

    // Navigation state (visual index into the filtered, sorted spot list)
    pub selected_spot_index: usize,

    // Sorting
    pub sort_column: SortColumn,
    pub sort_ascending: bool,

    // Search/filter
    pub filter_text: String,
    pub filter_active: bool,

    // UI
    pub theme: Theme,
    pub export_path: PathBuf,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App with the given data source and thresholds.
    pub fn new(source: Box<dyn DataSource>, thresholds: Thresholds) -> Self {
        Self::with_theme(source, thresholds, Theme::auto_detect())
    }

    /// Create a new App with an explicit theme (skips terminal detection).
    pub fn with_theme(source: Box<dyn DataSource>, thresholds: Thresholds, theme: Theme) -> Self {
        Self {
            running: true,
            current_view: View::Spots,
            show_help: false,
            show_detail_overlay: false,
            source,
            data: None,
            history: History::new(),
            load_error: None,
            thresholds,
            selected_spot_index: 0,
            sort_column: SortColumn::default(),
            sort_ascending: true,
            filter_text: String::new(),
            filter_active: false,
            theme,
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, time)) if time.elapsed() < STATUS_MESSAGE_TTL => Some(msg),
            _ => None,
        }
    }

    /// Poll the data source for new data.
    ///
    /// Returns true if a new reading was received. The source's error state
    /// is copied into `load_error` either way; a failing source keeps the
    /// last good data on screen.
    pub fn reload_data(&mut self) -> bool {
        let received = if let Some(reading) = self.source.poll() {
            let data = LotData::from_reading(reading, &self.thresholds);
            if self.history.record(&data) {
                debug!(entry_id = %data.entry_id, "new feed entry");
            }
            self.data = Some(data);
            self.clamp_selection();
            true
        } else {
            false
        };

        self.load_error = self.source.error().map(str::to_string);
        received
    }

    /// Ask the source for fresh data, then poll it.
    pub fn request_refresh(&mut self) {
        self.source.refresh();
        self.reload_data();
        self.set_status_message("Refresh requested".to_string());
    }

    fn clamp_selection(&mut self) {
        let count = self.filtered_spot_count();
        if self.selected_spot_index >= count {
            self.selected_spot_index = count.saturating_sub(1);
        }
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.filtered_spot_count().saturating_sub(1);
        self.selected_spot_index = (self.selected_spot_index + n).min(max);
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_spot_index = self.selected_spot_index.saturating_sub(n);
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        self.selected_spot_index = 0;
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        self.selected_spot_index = self.filtered_spot_count().saturating_sub(1);
    }

    /// Get count of spots after applying filter.
    pub fn filtered_spot_count(&self) -> usize {
        self.data.as_ref().map_or(0, |data| {
            data.spots.iter().filter(|s| self.matches_filter(&s.label)).count()
        })
    }

    /// Spots in display order (filtered, then sorted), with their raw index.
    pub fn visible_spots(&self) -> Vec<(usize, &SpotData)> {
        let Some(ref data) = self.data else {
            return Vec::new();
        };
        let mut spots: Vec<(usize, &SpotData)> = data
            .spots
            .iter()
            .enumerate()
            .filter(|(_, s)| self.matches_filter(&s.label))
            .collect();
        sort_spots_by(&mut spots, self.sort_column, self.sort_ascending);
        spots
    }

    /// The spot under the cursor.
    pub fn selected_spot(&self) -> Option<&SpotData> {
        self.visible_spots()
            .get(self.selected_spot_index)
            .map(|(_, spot)| *spot)
    }

    /// Open the detail overlay for the currently selected spot.
    pub fn enter_detail(&mut self) {
        if self.current_view == View::Spots && self.selected_spot().is_some() {
            self.show_detail_overlay = true;
        }
    }

    /// Navigate back: close overlay first, then return to the Spots view.
    pub fn go_back(&mut self) {
        if self.show_detail_overlay {
            self.show_detail_overlay = false;
            return;
        }
        self.current_view = View::Spots;
    }

    /// Close the detail overlay if open.
    pub fn close_overlay(&mut self) {
        self.show_detail_overlay = false;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Cycle to the next sort column.
    pub fn cycle_sort(&mut self) {
        self.sort_column = self.sort_column.next();
    }

    /// Toggle sort direction between ascending and descending.
    pub fn toggle_sort_direction(&mut self) {
        self.sort_ascending = !self.sort_ascending;
    }

    /// Enter filter input mode (starts capturing keystrokes for search).
    pub fn start_filter(&mut self) {
        self.filter_active = true;
    }

    /// Exit filter input mode without clearing the filter text.
    pub fn cancel_filter(&mut self) {
        self.filter_active = false;
    }

    /// Clear the filter text and exit filter mode.
    pub fn clear_filter(&mut self) {
        self.filter_text.clear();
        self.filter_active = false;
    }

    /// Append a character to the filter text.
    pub fn filter_push(&mut self, c: char) {
        self.filter_text.push(c);
        self.clamp_selection();
    }

    /// Remove the last character from the filter text.
    pub fn filter_pop(&mut self) {
        self.filter_text.pop();
    }

    /// Check if a spot label matches the current filter.
    pub fn matches_filter(&self, label: &str) -> bool {
        if self.filter_text.is_empty() {
            return true;
        }
        label.to_lowercase().contains(&self.filter_text.to_lowercase())
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export current state to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        let Some(ref data) = self.data else {
            anyhow::bail!("No data to export");
        };
        crate::export::write_export(path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ChannelSource;
    use parkwatch_types::{ParkingSpot, Reading};
    use tokio::sync::watch;

    fn reading(entry_id: &str, values: &[(&str, f64)]) -> Reading {
        let spots = values
            .iter()
            .map(|(label, v)| ParkingSpot::new(*v, *label, 0, "u"))
            .collect();
        Reading::new(entry_id, "2019-04-02T11:46:10Z", spots)
    }

    fn app_with_channel() -> (watch::Sender<Option<Reading>>, App) {
        let (tx, source) = ChannelSource::create("test");
        let app = App::with_theme(Box::new(source), Thresholds::default(), Theme::dark());
        (tx, app)
    }

    #[test]
    fn test_reload_data() {
        let (tx, mut app) = app_with_channel();
        assert!(!app.reload_data());
        assert!(app.data.is_none());

        tx.send(Some(reading("1", &[("A", 1.0), ("B", 0.0)]))).unwrap();
        assert!(app.reload_data());
        assert_eq!(app.data.as_ref().unwrap().spots.len(), 2);
        assert_eq!(app.history.len(), 1);
        assert!(app.load_error.is_none());
    }

    #[test]
    fn test_selection_is_clamped() {
        let (tx, mut app) = app_with_channel();
        tx.send(Some(reading("1", &[("A", 1.0), ("B", 0.0), ("C", 2.0)]))).unwrap();
        app.reload_data();

        app.select_next_n(10);
        assert_eq!(app.selected_spot_index, 2);
        app.select_prev_n(10);
        assert_eq!(app.selected_spot_index, 0);
        app.select_last();
        assert_eq!(app.selected_spot_index, 2);

        // Fewer spots in the next entry pull the selection back
        tx.send(Some(reading("2", &[("A", 1.0)]))).unwrap();
        app.reload_data();
        assert_eq!(app.selected_spot_index, 0);
    }

    #[test]
    fn test_filter_and_selected_spot() {
        let (tx, mut app) = app_with_channel();
        tx.send(Some(reading("1", &[("North 1", 1.0), ("South 1", 0.0), ("North 2", 0.0)])))
            .unwrap();
        app.reload_data();

        for c in "north".chars() {
            app.filter_push(c);
        }
        assert_eq!(app.filtered_spot_count(), 2);
        app.select_last();
        assert_eq!(app.selected_spot().unwrap().label, "North 2");

        app.clear_filter();
        assert_eq!(app.filtered_spot_count(), 3);
    }

    #[test]
    fn test_sorting_changes_selection_target() {
        let (tx, mut app) = app_with_channel();
        tx.send(Some(reading("1", &[("A", 5.0), ("B", 9.0), ("C", 1.0)]))).unwrap();
        app.reload_data();

        assert_eq!(app.selected_spot().unwrap().label, "A");

        app.sort_column = SortColumn::Value;
        app.sort_ascending = false;
        assert_eq!(app.selected_spot().unwrap().label, "B");
    }

    #[test]
    fn test_detail_overlay_and_back() {
        let (tx, mut app) = app_with_channel();

        // No data, nothing to show
        app.enter_detail();
        assert!(!app.show_detail_overlay);

        tx.send(Some(reading("1", &[("A", 1.0)]))).unwrap();
        app.reload_data();
        app.enter_detail();
        assert!(app.show_detail_overlay);

        app.go_back();
        assert!(!app.show_detail_overlay);

        app.set_view(View::Feed);
        app.go_back();
        assert_eq!(app.current_view, View::Spots);
    }

    #[test]
    fn test_view_cycle() {
        assert_eq!(View::Spots.next(), View::Feed);
        assert_eq!(View::Feed.next(), View::Spots);
        assert_eq!(View::Spots.prev(), View::Feed);
    }

    #[test]
    fn test_export_without_data_fails() {
        let (_tx, app) = app_with_channel();
        assert!(app.export_state(Path::new("/tmp/unused.json")).is_err());
    }

    #[test]
    fn test_status_message() {
        let (_tx, mut app) = app_with_channel();
        assert!(app.get_status_message().is_none());
        app.set_status_message("hello".to_string());
        assert_eq!(app.get_status_message(), Some("hello"));
    }
}
