//! UI rendering with Ratatui.

use crate::app::{App, InputMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};
use todos_core::{Field, FormMode, StorageBackend};

/// Main render function.
pub fn render<B: StorageBackend>(frame: &mut Frame, app: &App<B>) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(3),    // List
            Constraint::Length(1), // Status / help
        ])
        .split(area);

    render_header(frame, chunks[0]);
    render_list(frame, app, chunks[1]);
    render_status(frame, app, chunks[2]);

    if let Some(mode) = app.list.dialog().mode() {
        render_form_dialog(frame, app, mode, area);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            "Todos App",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   [n] New Todo", Style::default().fg(Color::Cyan)),
    ]);
    let header = Paragraph::new(title).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}

/// Render the todo rows.
fn render_list<B: StorageBackend>(frame: &mut Frame, app: &App<B>, area: Rect) {
    let is_focused = app.input_mode() == InputMode::Normal;
    let border_color = if is_focused { Color::Cyan } else { Color::DarkGray };

    let block = Block::default()
        .title(" 📝 List ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.list.is_empty() {
        let message = Paragraph::new("No todos, Create a new todo")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(message, inner);
        return;
    }

    let items: Vec<ListItem> = app
        .list
        .todos()
        .iter()
        .enumerate()
        .map(|(i, todo)| {
            let checkbox = if todo.completed { "[x]" } else { "[ ]" };
            let name_style = if todo.completed {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(Color::White)
            };

            let lines = vec![
                Line::from(vec![
                    Span::styled(format!("{checkbox} "), Style::default().fg(Color::Green)),
                    Span::styled(todo.name.as_str(), name_style.add_modifier(Modifier::BOLD)),
                ]),
                Line::from(Span::styled(
                    format!("    {}", todo.description),
                    Style::default().fg(Color::Gray),
                )),
            ];

            let style = if i == app.selected_index {
                Style::default().bg(Color::Rgb(60, 60, 80))
            } else {
                Style::default()
            };

            ListItem::new(lines).style(style)
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}

fn render_status<B: StorageBackend>(frame: &mut Frame, app: &App<B>, area: Rect) {
    let (text, color) = match (&app.status, app.input_mode()) {
        (Some(status), _) => (status.clone(), Color::Yellow),
        (None, InputMode::Normal) => (
            "n: new | e: edit | d: delete | space: done | q: quit".to_string(),
            Color::DarkGray,
        ),
        (None, InputMode::Form) => (
            "Tab: next field | Enter: save | Esc: cancel".to_string(),
            Color::DarkGray,
        ),
    };
    frame.render_widget(Paragraph::new(text).style(Style::default().fg(color)), area);
}

/// Render the create/edit modal.
fn render_form_dialog<B: StorageBackend>(
    frame: &mut Frame,
    app: &App<B>,
    mode: FormMode,
    area: Rect,
) {
    let dialog_width = 64.min(area.width.saturating_sub(4));
    let dialog_height = 10.min(area.height);
    let dialog_area = centered_rect(dialog_width, dialog_height, area);

    // Clear the background
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(format!(" {} ", mode.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Name label
            Constraint::Length(1), // Name input
            Constraint::Length(1), // Description label
            Constraint::Length(1), // Description input
            Constraint::Length(1), // Buttons
        ])
        .split(inner);

    render_form_field(frame, app, Field::Name, chunks[0], chunks[1]);
    render_form_field(frame, app, Field::Description, chunks[2], chunks[3]);

    let buttons = Line::from(vec![
        Span::styled(
            format!("[Enter] {}", mode.submit_label()),
            Style::default().fg(Color::Green),
        ),
        Span::styled("  [Esc] Cancel", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(buttons), chunks[4]);
}

/// A label with its validation message, and the input line below it.
fn render_form_field<B: StorageBackend>(
    frame: &mut Frame,
    app: &App<B>,
    field: Field,
    label_area: Rect,
    input_area: Rect,
) {
    let focused = app.focused_field == field;

    let mut label = vec![Span::styled(
        field.label(),
        Style::default().fg(if focused { Color::Cyan } else { Color::Gray }),
    )];
    if let Some(error) = app.form.error(field) {
        label.push(Span::styled(
            format!("  {error}"),
            Style::default().fg(Color::Red),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(label)), label_area);

    let value = app.form.value(field);
    let cursor = if focused { "_" } else { "" };
    let input = if value.is_empty() && !focused {
        Line::from(Span::styled(
            format!("▸ {}", field.placeholder()),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![
            Span::styled("▸ ", Style::default().fg(Color::Magenta)),
            Span::styled(format!("{value}{cursor}"), Style::default().fg(Color::Yellow)),
        ])
    };
    frame.render_widget(Paragraph::new(input), input_area);
}

/// Helper to create a centered rectangle.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
