//! Spots view rendering.
//!
//! Displays a table of every spot in the current entry with its value,
//! occupancy status and a sparkline of recent values.

use std::cmp::Ordering;

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::SpotData;

/// Sparkline characters (8 levels of height).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Column to sort by in the Spots view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    /// Feed field order (`field1`, `field2`, ...).
    #[default]
    Field,
    /// Sort by label alphabetically.
    Label,
    /// Sort by sensor value.
    Value,
    /// Sort by occupancy status.
    Status,
}

impl SortColumn {
    /// Cycle to the next sort column.
    pub fn next(self) -> Self {
        match self {
            SortColumn::Field => SortColumn::Label,
            SortColumn::Label => SortColumn::Value,
            SortColumn::Value => SortColumn::Status,
            SortColumn::Status => SortColumn::Field,
        }
    }

    fn label(self) -> &'static str {
        match self {
            SortColumn::Field => "field",
            SortColumn::Label => "label",
            SortColumn::Value => "value",
            SortColumn::Status => "status",
        }
    }
}

/// Render the Spots view.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(ref data) = app.data else {
        return;
    };
    let total = data.spots.len();
    let spots = app.visible_spots();

    let header = Row::new(vec![
        Cell::from(format_header("#", SortColumn::Field, app)),
        Cell::from(format_header("Spot", SortColumn::Label, app)),
        Cell::from(format_header("Value", SortColumn::Value, app)),
        Cell::from("Change"),
        Cell::from("Trend"),
        Cell::from("Time"),
        Cell::from(format_header("Status", SortColumn::Status, app)),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = spots
        .iter()
        .map(|(index, spot)| {
            let change = app
                .history
                .get_change(&spot.label)
                .map(format_change)
                .filter(|c| c != "0")
                .unwrap_or_else(|| "-".to_string());

            Row::new(vec![
                Cell::from(format!("field{}", index + 1)),
                Cell::from(spot.label.clone()),
                Cell::from(format_value(spot.value)),
                Cell::from(change),
                Cell::from(render_sparkline(&app.history.get_sparkline(&spot.label))),
                Cell::from(spot.time.to_string()),
                Cell::from(spot.status.symbol()).style(app.theme.status_style(spot.status)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Fill(3),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Min(8),
        Constraint::Length(11),
        Constraint::Min(6),
    ];

    let selected_visual_index = app.selected_spot_index.min(spots.len().saturating_sub(1));
    let sort_dir = if app.sort_ascending { "↑" } else { "↓" };

    let filter_info = if app.filter_active {
        format!(" /{}_", app.filter_text)
    } else if !app.filter_text.is_empty() {
        format!(" /{}/ [c:clear]", app.filter_text)
    } else {
        String::new()
    };

    let position_info = if !spots.is_empty() {
        format!(" [{}/{}]", selected_visual_index + 1, spots.len())
    } else {
        String::new()
    };

    let title = format!(
        " Spots ({}/{}) {} free [s:sort {}{}]{}{} ",
        spots.len(),
        total,
        data.free_count(),
        app.sort_column.label(),
        sort_dir,
        filter_info,
        position_info
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected_visual_index));

    frame.render_stateful_widget(table, area, &mut state);
}

fn format_header(name: &str, col: SortColumn, app: &App) -> Span<'static> {
    if app.sort_column == col {
        let arrow = if app.sort_ascending { "↑" } else { "↓" };
        Span::raw(format!("{}{}", name, arrow))
    } else {
        Span::raw(name.to_string())
    }
}

/// Sort spots by the given column and direction.
///
/// Each entry carries its field index; ties fall back to field order.
pub fn sort_spots_by(spots: &mut [(usize, &SpotData)], column: SortColumn, ascending: bool) {
    spots.sort_by(|a, b| {
        let primary = match column {
            SortColumn::Field => a.0.cmp(&b.0),
            SortColumn::Label => a.1.label.cmp(&b.1.label),
            SortColumn::Value => a.1.value.total_cmp(&b.1.value),
            SortColumn::Status => a.1.status.cmp(&b.1.status),
        };

        let primary = if ascending {
            primary
        } else {
            primary.reverse()
        };

        if primary == Ordering::Equal {
            a.0.cmp(&b.0)
        } else {
            primary
        }
    });
}

/// Whole numbers print without a fractional part.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

/// Signed difference between two readings, rounded to six decimals so
/// float subtraction noise does not show.
pub fn format_change(delta: f64) -> String {
    let rounded = if delta.abs() < 1e9 {
        (delta * 1e6).round() / 1e6
    } else {
        delta
    };
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{:+}", rounded)
    }
}

fn render_sparkline(data: &[u8]) -> String {
    if data.is_empty() {
        return "        ".to_string();
    }

    // Last 8 values
    let values: Vec<u8> = data.iter().rev().take(8).rev().copied().collect();

    values.iter().map(|&v| SPARKLINE_CHARS[v.min(7) as usize]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SpotStatus;

    fn spot(label: &str, value: f64, status: SpotStatus) -> SpotData {
        SpotData {
            label: label.to_string(),
            value,
            time: 0,
            url: String::new(),
            status,
        }
    }

    fn labels(spots: &[(usize, &SpotData)]) -> Vec<String> {
        spots.iter().map(|(_, s)| s.label.clone()).collect()
    }

    #[test]
    fn test_sort_by_value_and_direction() {
        let data = [
            spot("b", 2.0, SpotStatus::Occupied),
            spot("a", 0.0, SpotStatus::Free),
            spot("c", 5.0, SpotStatus::Occupied),
        ];
        let mut spots: Vec<_> = data.iter().enumerate().collect();

        sort_spots_by(&mut spots, SortColumn::Value, true);
        assert_eq!(labels(&spots), vec!["a", "b", "c"]);

        sort_spots_by(&mut spots, SortColumn::Value, false);
        assert_eq!(labels(&spots), vec!["c", "b", "a"]);

        sort_spots_by(&mut spots, SortColumn::Field, true);
        assert_eq!(labels(&spots), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_sort_by_status_ties_keep_field_order() {
        let data = [
            spot("x", 1.0, SpotStatus::Occupied),
            spot("y", 0.0, SpotStatus::Free),
            spot("z", 1.0, SpotStatus::Occupied),
        ];
        let mut spots: Vec<_> = data.iter().enumerate().collect();
        sort_spots_by(&mut spots, SortColumn::Status, true);
        assert_eq!(labels(&spots), vec!["y", "x", "z"]);
    }

    #[test]
    fn test_sort_column_cycle() {
        let mut col = SortColumn::default();
        for _ in 0..4 {
            col = col.next();
        }
        assert_eq!(col, SortColumn::Field);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(1.0), "1");
        assert_eq!(format_value(23.5), "23.5");
    }

    #[test]
    fn test_format_change_hides_float_noise() {
        assert_eq!(format_change(0.1 + 0.2), "+0.3");
        assert_eq!(format_change(23.5 - 0.3), "+23.2");
        assert_eq!(format_change(-1.0), "-1");
        assert_eq!(format_change(1e-12), "0");
        assert_eq!(format_change(-1e-12), "0");
    }

    #[test]
    fn test_render_sparkline() {
        assert_eq!(render_sparkline(&[]), "        ");
        assert_eq!(render_sparkline(&[0, 7]), "▁█");
    }
}
