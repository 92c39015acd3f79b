//! Feed view rendering.
//!
//! Shows where readings come from: the source, the entry currently on
//! screen, channel metadata and how many entries have been seen.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::duration::format_duration;

/// Render the Feed view.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(6), // Source
        Constraint::Min(6),    // Entry and channel
    ])
    .split(area);

    let label = Style::default().add_modifier(Modifier::DIM);
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let error_line = match app.load_error {
        Some(ref err) => Line::from(vec![
            Span::styled(" Last error:  ", label),
            Span::styled(err.clone(), Style::default().fg(app.theme.error)),
        ]),
        None => Line::from(vec![
            Span::styled(" Last error:  ", label),
            Span::raw("none"),
        ]),
    };

    let since = app
        .history
        .since_last_entry()
        .map(format_duration)
        .unwrap_or_else(|| "-".to_string());

    let source_lines = vec![
        Line::from(vec![
            Span::styled(" Source:      ", label),
            Span::styled(app.source_description().to_string(), bold),
        ]),
        Line::from(vec![
            Span::styled(" Entries:     ", label),
            Span::raw(format!("{} seen, last new entry {} ago", app.history.len(), since)),
        ]),
        error_line,
    ];

    let source = Paragraph::new(source_lines).block(block(app, " Source "));
    frame.render_widget(source, chunks[0]);

    let Some(ref data) = app.data else {
        let empty = Paragraph::new(Line::from(Span::styled(" Waiting for the first entry", label)))
            .block(block(app, " Entry "));
        frame.render_widget(empty, chunks[1]);
        return;
    };

    let mut entry_lines = vec![
        Line::from(vec![
            Span::styled(" Entry id:    ", label),
            Span::styled(data.entry_id.clone(), bold),
        ]),
        Line::from(vec![
            Span::styled(" Created at:  ", label),
            Span::raw(data.created_at.clone()),
        ]),
        Line::from(vec![
            Span::styled(" Spots:       ", label),
            Span::raw(format!(
                "{} ({} free, {} occupied, occupied at >= {})",
                data.spots.len(),
                data.free_count(),
                data.occupied_count(),
                app.thresholds.occupied_at
            )),
        ]),
    ];

    if let Some(ref channel) = data.channel {
        entry_lines.push(Line::from(""));
        if let Some(id) = channel.id {
            entry_lines.push(Line::from(vec![
                Span::styled(" Channel id:  ", label),
                Span::raw(id.to_string()),
            ]));
        }
        if let Some(ref name) = channel.name {
            entry_lines.push(Line::from(vec![
                Span::styled(" Channel:     ", label),
                Span::raw(name.clone()),
            ]));
        }
        if let Some(last) = channel.last_entry_id {
            let behind = data
                .entries_behind()
                .filter(|n| *n > 0)
                .map(|n| format!(" ({} newer)", n))
                .unwrap_or_default();
            entry_lines.push(Line::from(vec![
                Span::styled(" Last entry:  ", label),
                Span::raw(format!("{}{}", last, behind)),
            ]));
        }
    }

    let entry = Paragraph::new(entry_lines).block(block(app, " Entry "));
    frame.render_widget(entry, chunks[1]);
}

fn block<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}
