//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::data::duration::format_duration;

/// Render the header bar with the lot overview.
///
/// Displays: status indicator, free/occupied counts, entry id.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.data else {
        let line = Line::from(vec![
            Span::styled(" PARKWATCH ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("| Loading..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let free = data.free_count();
    let occupied = data.occupied_count();

    // Green while anything is free, red when full, yellow when the last fetch failed
    let status_style = if app.load_error.is_some() {
        Style::default().fg(app.theme.error)
    } else if free > 0 {
        Style::default().fg(app.theme.free)
    } else {
        Style::default().fg(app.theme.occupied)
    };

    let title = data
        .channel_name()
        .map(|name| format!("{} ", name))
        .unwrap_or_else(|| "PARKWATCH ".to_string());

    let line = Line::from(vec![
        Span::styled(" ● ", status_style),
        Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(format!("{}", free), Style::default().fg(app.theme.free)),
        Span::raw(" free "),
        if occupied > 0 {
            Span::styled(
                format!("{}", occupied),
                Style::default().fg(app.theme.occupied).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" occupied │ "),
        Span::styled(
            format!("{}", data.spots.len()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" spots │ "),
        Span::raw(format!("entry #{}", data.entry_id)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing available views.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![Line::from(" 1:Spots "), Line::from(" 2:Feed ")];

    let selected = match app.current_view {
        View::Spots => 0,
        View::Feed => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Temporary status messages take priority, then the source error,
/// then data age and the context-sensitive controls.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let (status, style) = match (&app.data, &app.load_error) {
        (_, Some(err)) => (
            format!(" Error: {} | r:retry q:quit", err),
            Style::default().fg(app.theme.error),
        ),
        (Some(data), None) => {
            let controls = match app.current_view {
                View::Spots if app.filter_active => "Type to search | Enter:apply Esc:cancel",
                View::Spots => "/:search s:sort r:refresh Enter:detail ?:help q:quit",
                View::Feed => "Tab:switch r:refresh e:export ?:help q:quit",
            };
            (
                format!(
                    " {} | Updated {} ago | {}",
                    app.source_description(),
                    format_duration(data.last_updated.elapsed()),
                    controls,
                ),
                Style::default().add_modifier(Modifier::DIM),
            )
        }
        (None, None) => (
            format!(" {} | Loading... | q:quit", app.source_description()),
            Style::default().add_modifier(Modifier::DIM),
        ),
    };

    frame.render_widget(Paragraph::new(status).style(style), area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  ↑/↓ j/k     Navigate spots"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       Spot detail"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        section(" Spots"),
        Line::from("  /         Start filter/search"),
        Line::from("  c         Clear filter"),
        Line::from("  s         Cycle sort column"),
        Line::from("  S         Toggle sort direction"),
        Line::from(""),
        section(" General"),
        Line::from("  r         Refresh now"),
        Line::from("  e         Export to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 23u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
