//! Detail overlay rendering.
//!
//! Displays a modal overlay with everything known about the selected spot,
//! including its recent values.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Sparkline},
    Frame,
};

use crate::app::App;
use crate::ui::spots::{format_change, format_value};

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 50;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 14;

/// Render the spot detail as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(spot) = app.selected_spot() else {
        return;
    };

    let overlay_width = (area.width * 80 / 100).clamp(MIN_OVERLAY_WIDTH, 90);
    let overlay_height = (area.height * 60 / 100).clamp(MIN_OVERLAY_HEIGHT, 24);

    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    frame.render_widget(Clear, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Length(8), // Spot fields
        Constraint::Min(4),    // Value history
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let change = app
        .history
        .get_change(&spot.label)
        .map(format_change)
        .unwrap_or_else(|| "-".to_string());

    let lines = vec![
        Line::from(vec![Span::styled(format!(" {} ", spot.label), bold)]),
        Line::from(""),
        Line::from(vec![
            Span::raw(" Value: "),
            Span::styled(format_value(spot.value), bold),
            Span::raw("    Change: "),
            Span::raw(change),
            Span::raw("    Status: "),
            Span::styled(spot.status.symbol(), app.theme.status_style(spot.status)),
        ]),
        Line::from(vec![Span::raw(" Time:  "), Span::raw(spot.time.to_string())]),
        Line::from(vec![
            Span::raw(" URL:   "),
            Span::styled(spot.url.clone(), Style::default().fg(app.theme.highlight)),
        ]),
    ];

    let header = Paragraph::new(lines).block(
        Block::default()
            .title(" Spot Detail ")
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.highlight)),
    );
    frame.render_widget(header, chunks[0]);

    let history_block = Block::default()
        .title(format!(" History ({} entries) ", app.history.len()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let values: Vec<u64> = app
        .history
        .get_sparkline(&spot.label)
        .into_iter()
        .map(u64::from)
        .collect();

    if values.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Not enough entries yet",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ])
        .block(history_block);
        frame.render_widget(empty, chunks[1]);
    } else {
        let sparkline = Sparkline::default()
            .block(history_block)
            .data(&values)
            .max(7)
            .style(app.theme.status_style(spot.status));
        frame.render_widget(sparkline, chunks[1]);
    }

    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " ↑↓:other spots  Esc:close ",
        Style::default().add_modifier(Modifier::DIM),
    )]));
    frame.render_widget(footer, chunks[2]);
}
