//! TUI rendering using ratatui.

use echo_models::{MessageDirection, StatusClass};
use echo_transport::Transport;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::app::App;

const PROMPT: &str = "> ";

/// Draw the TUI.
pub fn draw<T: Transport>(frame: &mut Frame, app: &App<T>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(1), // Status
            Constraint::Min(5),    // Messages
            Constraint::Length(3), // Input
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_status(frame, app, chunks[1]);
    draw_messages(frame, app, chunks[2]);
    draw_input(frame, app, chunks[3]);
    draw_footer(frame, chunks[4]);
}

fn status_style(class: StatusClass) -> Style {
    match class {
        StatusClass::Connecting => Style::default().bg(Color::Yellow).fg(Color::Black),
        StatusClass::Open => Style::default().bg(Color::Green).fg(Color::Black),
        StatusClass::Closed => Style::default().bg(Color::Red).fg(Color::White),
    }
}

fn direction_style(direction: MessageDirection) -> Style {
    match direction {
        MessageDirection::Sent => Style::default().fg(Color::Cyan),
        MessageDirection::Received => Style::default().fg(Color::Green),
    }
}

/// Draw the header bar.
fn draw_header<T: Transport>(frame: &mut Frame, app: &App<T>, area: Rect) {
    let header = Paragraph::new(format!(" ws-echo - {} ", app.panel.address()))
        .style(Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD));
    frame.render_widget(header, area);
}

/// Draw the status line.
fn draw_status<T: Transport>(frame: &mut Frame, app: &App<T>, area: Rect) {
    let status = app.panel.status();
    let line = Paragraph::new(format!(" {} ", status.label)).style(status_style(status.class));
    frame.render_widget(line, area);
}

/// Draw the scrollable message list.
fn draw_messages<T: Transport>(frame: &mut Frame, app: &App<T>, area: Rect) {
    let title = if app.scroll_offset > 0 {
        format!(" Messages [scroll: {}] ", app.scroll_offset)
    } else {
        " Messages ".to_string()
    };

    let lines: Vec<Line> = app
        .panel
        .log()
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::styled(
                    format!("{} ", entry.timestamp.format("%H:%M:%S")),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(entry.display_line(), direction_style(entry.direction)),
            ])
        })
        .collect();

    // Estimate wrapped height so the newest entries stay in view
    let inner_height = area.height.saturating_sub(2) as usize;
    let inner_width = area.width.saturating_sub(2) as usize;
    let total_wrapped: usize = lines
        .iter()
        .map(|line| {
            if inner_width == 0 {
                1
            } else {
                line.width().div_ceil(inner_width).max(1)
            }
        })
        .sum();

    let scroll = total_wrapped
        .saturating_sub(inner_height)
        .saturating_sub(app.scroll_offset);

    let output = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false })
        .scroll((scroll as u16, 0));

    frame.render_widget(output, area);
}

/// Draw the input box and place the cursor.
fn draw_input<T: Transport>(frame: &mut Frame, app: &App<T>, area: Rect) {
    let compose = app.panel.compose();
    let style = if app.panel.is_closed() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let input = Paragraph::new(format!("{}{}", PROMPT, compose.text()))
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(" Message "));
    frame.render_widget(input, area);

    let inner_width = area.width.saturating_sub(2) as usize;
    let offset = cursor_column(compose.before_cursor());
    if inner_width > 0 && offset < inner_width {
        frame.set_cursor_position((area.x + 1 + offset as u16, area.y + 1));
    }
}

/// Terminal column of the cursor inside the input box.
fn cursor_column(before_cursor: &str) -> usize {
    Line::from(vec![Span::raw(PROMPT), Span::raw(before_cursor)]).width()
}

/// Draw the footer with keybindings.
fn draw_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(
        " Enter: send | Ctrl+X: close connection | ↑/↓: history | PgUp/PgDn: scroll | Esc: quit ",
    )
    .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(footer, area);
}
