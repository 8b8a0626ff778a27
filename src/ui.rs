//! The renderer: projects a state snapshot onto the terminal frame.
//!
//! Drawing never feeds back into the state. The layout mirrors the snapshot
//! exactly: path label on top, a `list_width x list_size` window over the
//! children starting at `scroll_top`, and the status line at the bottom.
//! Quit teardown lives in the event loop, not here.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::fsgate::{EntryKind, FileSystemGateway};
use crate::state::Mode;
use crate::util::truncate_left;

const DIR_COLOR: Color = Color::Cyan;
const FILE_COLOR: Color = Color::White;
const LABEL_BG: Color = Color::DarkGray;

pub(crate) fn draw<G: FileSystemGateway>(app: &mut App<G>, frame: &mut Frame<'_>) {
    let area = frame.area();
    let list_height = app.state.scroll.list_size as u16 + 2;
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(list_height),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    draw_path_label(app, frame, vertical[0]);
    draw_list(app, frame, vertical[1]);
    draw_status_line(app, frame, vertical[2]);
}

fn draw_path_label<G: FileSystemGateway>(app: &App<G>, frame: &mut Frame<'_>, area: Rect) {
    let path = app.state.directory.display().to_string();
    let label = Paragraph::new(truncate_left(&path, area.width as usize))
        .style(Style::default().fg(Color::White).bg(LABEL_BG));
    frame.render_widget(label, area);
}

fn draw_list<G: FileSystemGateway>(app: &mut App<G>, frame: &mut Frame<'_>, area: Rect) {
    let state = &app.state;
    let width = state.scroll.list_width.saturating_add(2).min(area.width);
    let list_area = Rect { width, ..area };

    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(list_area);

    let top = state.scroll.scroll_top;
    let items: Vec<ListItem> = state
        .children
        .iter()
        .skip(top)
        .take(state.scroll.list_size)
        .map(|name| {
            let path = app.gateway.join_child(&state.directory, name);
            let (label, style) = match app.gateway.classify(&path) {
                EntryKind::Directory => (
                    format!("{name}/"),
                    Style::default().fg(DIR_COLOR),
                ),
                EntryKind::File => (
                    name.clone(),
                    Style::default().fg(FILE_COLOR).add_modifier(Modifier::BOLD),
                ),
            };
            let style = if state.selected.iter().any(|s| s == name) {
                style.add_modifier(Modifier::REVERSED)
            } else {
                style
            };
            ListItem::new(Line::from(Span::styled(label, style)))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), list_area);

    // Scrollbar over len + 1 rows, matching the reference scrolling feel
    // (slightly under-scrolled on the final page).
    let mut bar_state =
        ScrollbarState::new(state.children.len() + 1).position(state.scroll.scroll_top);
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        list_area,
        &mut bar_state,
    );

    app.list_rect = inner;
}

fn draw_status_line<G: FileSystemGateway>(app: &App<G>, frame: &mut Frame<'_>, area: Rect) {
    let state = &app.state;
    let style = match state.mode {
        Mode::Command => Style::default().fg(Color::Yellow),
        _ => Style::default().fg(Color::Gray),
    };
    frame.render_widget(Paragraph::new(state.text.as_str()).style(style), area);

    // The line is editable only in command mode; show the cursor there and
    // leave it hidden (focus on the list) otherwise.
    if state.mode == Mode::Command {
        let x = area.x + (state.text.width() as u16).min(area.width.saturating_sub(1));
        frame.set_cursor_position(Position::new(x, area.y));
    }
}
