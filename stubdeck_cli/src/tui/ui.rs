//! TUI rendering functions

use super::app::TuiApp;
use crate::api::MappingApi;
use crate::deck::{FormField, PreferenceStore, RowState, View};
use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Clear, Paragraph, Row, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Table, TableState, Wrap,
    },
    Frame,
};
use stubdeck_common::listing::EMPTY_MESSAGE;

const SIDEBAR_WIDTH: u16 = 16;
const SIDEBAR_COLLAPSED_WIDTH: u16 = 5;

/// Draw the TUI
pub fn draw<A: MappingApi, P: PreferenceStore>(frame: &mut Frame, app: &TuiApp<A, P>) {
    let sidebar_width = if app.console.sidebar().is_collapsed() {
        SIDEBAR_COLLAPSED_WIDTH
    } else {
        SIDEBAR_WIDTH
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(20)])
        .split(frame.area());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Active view
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Footer
        ])
        .split(columns[1]);

    draw_sidebar(frame, app, columns[0]);

    let route = app.console.route();
    if route.is_visible(View::Home) {
        draw_home(frame, app, rows[0]);
    } else if route.is_visible(View::Mocks) {
        draw_mocks(frame, app, rows[0]);
    } else if route.is_visible(View::Create) {
        draw_create(frame, app, rows[0]);
    } else {
        // Unknown location: every view stays hidden
        frame.render_widget(panel(""), rows[0]);
    }

    draw_status(frame, app, rows[1]);
    draw_footer(frame, app, rows[2]);

    if let Some(prompt) = &app.prompt {
        draw_prompt(frame, &prompt.message);
    }
}

fn panel<'a>(title: impl Into<Line<'a>>) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

/// Navigation with the active view highlighted
fn draw_sidebar<A: MappingApi, P: PreferenceStore>(
    frame: &mut Frame,
    app: &TuiApp<A, P>,
    area: Rect,
) {
    let collapsed = app.console.sidebar().is_collapsed();
    let route = app.console.route();

    let mut lines = vec![
        Line::from(Span::styled(
            if collapsed { " SD" } else { " STUBDECK" },
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (i, view) in View::ALL.iter().enumerate() {
        let label = if collapsed {
            format!(" {}", i + 1)
        } else {
            format!(" {} {}", i + 1, view.title())
        };
        let style = if route.is_active(*view) {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(Span::styled(label, style)));
    }

    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_home<A: MappingApi, P: PreferenceStore>(
    frame: &mut Frame,
    app: &TuiApp<A, P>,
    area: Rect,
) {
    let label = Style::default().fg(Color::DarkGray);
    let key = Style::default().fg(Color::Cyan);

    let mapping_count = app
        .console
        .rows()
        .map(|rows| rows.len().to_string())
        .unwrap_or_else(|| "-".to_string());

    let lines = vec![
        Line::from(Span::styled(
            "Mock mapping console",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Mappings loaded  ", label),
            Span::styled(mapping_count, Style::default().fg(Color::White)),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled("2", key), Span::styled("  Browse and edit mappings", label)]),
        Line::from(vec![Span::styled("3", key), Span::styled("  Create a mapping", label)]),
        Line::from(vec![Span::styled("S", key), Span::styled("  Save mappings to files", label)]),
        Line::from(vec![Span::styled("R", key), Span::styled("  Reset in-memory mappings", label)]),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(panel(" Home ")).wrap(Wrap { trim: false }),
        area,
    );
}

fn draw_mocks<A: MappingApi, P: PreferenceStore>(
    frame: &mut Frame,
    app: &TuiApp<A, P>,
    area: Rect,
) {
    let Some(rows) = app.console.rows() else {
        frame.render_widget(Paragraph::new("").block(panel(" Mocks ")), area);
        return;
    };

    if rows.is_empty() {
        let message = Paragraph::new(Span::styled(EMPTY_MESSAGE, Style::default().fg(Color::DarkGray)))
            .block(panel(" Mocks "));
        frame.render_widget(message, area);
        return;
    }

    let selected = rows.get(app.selected_index);
    let details_open = selected.is_some_and(|r| r.request_open || r.response_open);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(if details_open {
            [Constraint::Percentage(40), Constraint::Percentage(60)]
        } else {
            [Constraint::Min(3), Constraint::Length(0)]
        })
        .split(area);

    draw_mapping_table(frame, app, rows, chunks[0]);

    if let Some(row) = selected.filter(|_| details_open) {
        draw_details(frame, row, chunks[1]);
    }
}

/// Draw the mapping table with scrolling and scrollbar
fn draw_mapping_table<A: MappingApi, P: PreferenceStore>(
    frame: &mut Frame,
    app: &TuiApp<A, P>,
    rows: &[RowState],
    area: Rect,
) {
    let header = Row::new(vec!["Name", "API", "HTTP Method", "Request", "Response"])
        .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .bottom_margin(0);

    let url_width = (area.width as usize).saturating_sub(24 + 12 + 10 + 10 + 8).max(10);

    let table_rows: Vec<Row> = rows
        .iter()
        .map(|state| {
            let row = &state.row;
            Row::new(vec![
                Cell::from(truncate_str(&row.name, 24)),
                Cell::from(truncate_str(&row.url, url_width)),
                Cell::from(row.method.clone()).style(method_style(&row.method)),
                Cell::from(disclosure_marker(state.request_open)),
                Cell::from(if state.editor.is_editing() {
                    "editing".to_string()
                } else {
                    disclosure_marker(state.response_open)
                }),
            ])
        })
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let table = Table::new(
        table_rows,
        [
            Constraint::Length(24),
            Constraint::Min(10),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(panel(format!(" Mocks ({}) ", rows.len())))
    .row_highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)));

    let mut state = TableState::default();
    state.select(Some(app.selected_index));
    frame.render_stateful_widget(table, chunks[0], &mut state);

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("▲"))
        .end_symbol(Some("▼"))
        .track_symbol(Some("│"))
        .thumb_symbol("█");
    let mut scrollbar_state = ScrollbarState::new(rows.len()).position(app.selected_index);
    frame.render_stateful_widget(scrollbar, chunks[1], &mut scrollbar_state);
}

fn disclosure_marker(open: bool) -> String {
    if open { "▾ shown" } else { "▸ show" }.to_string()
}

/// Request and response panes of the selected row
fn draw_details(frame: &mut Frame, row: &RowState, area: Rect) {
    let panes: Vec<(&str, &str, bool)> = [
        row.request_open
            .then(|| (" Request ", row.row.request_json.as_str(), false)),
        row.response_open.then(|| {
            if row.editor.is_editing() {
                (" Response (editing, Esc to finish) ", row.editor.draft(), true)
            } else {
                (" Response ", row.editor.pretty(), false)
            }
        }),
    ]
    .into_iter()
    .flatten()
    .collect();

    if panes.is_empty() {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, panes.len() as u32); panes.len()])
        .split(area);

    for ((title, text, editing), chunk) in panes.into_iter().zip(chunks.iter()) {
        let border = if editing { Color::Yellow } else { Color::DarkGray };
        let mut content = text.to_string();
        if editing {
            content.push('▏');
        }
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));
        frame.render_widget(Paragraph::new(content).block(block), *chunk);
    }
}

fn draw_create<A: MappingApi, P: PreferenceStore>(
    frame: &mut Frame,
    app: &TuiApp<A, P>,
    area: Rect,
) {
    let form = &app.console.form;
    let mut lines = Vec::new();

    for field in FormField::ALL {
        let focused = field == app.form_field;
        let value = form.field(field);
        let label_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let label = Span::styled(format!("{:<16}", field.label()), label_style);

        let mut field_lines = Vec::new();
        if value.is_empty() {
            field_lines.push(Line::from(vec![
                label,
                Span::styled(
                    field.placeholder(),
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                ),
            ]));
        } else {
            for (i, part) in value.split('\n').enumerate() {
                let lead = if i == 0 {
                    label.clone()
                } else {
                    Span::raw(" ".repeat(16))
                };
                field_lines.push(Line::from(vec![
                    lead,
                    Span::styled(part.to_string(), Style::default().fg(Color::White)),
                ]));
            }
        }

        if focused {
            if let Some(last) = field_lines.last_mut() {
                last.push_span(Span::styled("▏", label_style));
            }
        }
        lines.extend(field_lines);
        lines.push(Line::from(""));
    }

    frame.render_widget(
        Paragraph::new(lines).block(panel(" Create mapping ")).wrap(Wrap { trim: false }),
        area,
    );
}

fn draw_status<A: MappingApi, P: PreferenceStore>(
    frame: &mut Frame,
    app: &TuiApp<A, P>,
    area: Rect,
) {
    let status = app.console.status();
    let color = if status.contains("failed") {
        Color::Red
    } else {
        Color::Green
    };
    let line = Line::from(vec![
        Span::styled(" ", Style::default()),
        Span::styled(status.to_string(), Style::default().fg(color)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the footer with key hints
fn draw_footer<A: MappingApi, P: PreferenceStore>(
    frame: &mut Frame,
    app: &TuiApp<A, P>,
    area: Rect,
) {
    let hints: &[(&str, &str)] = if app.is_editing() {
        &[("Ctrl+S", "Save"), ("Esc", "Done"), ("Ctrl+C", "Quit")]
    } else if app.console.route().is_visible(View::Mocks) {
        &[
            ("↑/↓", "Navigate"),
            ("q", "Request"),
            ("Enter", "Response"),
            ("e", "Edit"),
            ("s", "Save"),
            ("d", "Delete"),
            ("r", "Refresh"),
            ("Ctrl+B", "Sidebar"),
            ("Ctrl+C", "Quit"),
        ]
    } else if app.console.route().is_visible(View::Create) {
        &[
            ("Tab", "Next field"),
            ("Alt+Enter", "Newline"),
            ("Enter", "Create"),
            ("Esc", "Back"),
            ("Ctrl+C", "Quit"),
        ]
    } else {
        &[
            ("1-3", "Views"),
            ("S", "Save to files"),
            ("R", "Reset"),
            ("Ctrl+B", "Sidebar"),
            ("Ctrl+C", "Quit"),
        ]
    };

    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(*key, Style::default().fg(Color::Cyan)),
                Span::styled(format!(" {}  ", label), Style::default().fg(Color::DarkGray)),
            ]
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Message width plus borders and padding, capped at `available`
fn prompt_width(message: &str, available: u16) -> u16 {
    u16::try_from(message.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(6)
        .min(available)
}

/// Centered yes/no modal
fn draw_prompt(frame: &mut Frame, message: &str) {
    let width = prompt_width(message, frame.area().width);
    let [row] = Layout::vertical([Constraint::Length(5)])
        .flex(Flex::Center)
        .areas(frame.area());
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    let lines = vec![
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(Color::Cyan)),
            Span::styled(" Confirm  ", Style::default().fg(Color::DarkGray)),
            Span::styled("any key", Style::default().fg(Color::Cyan)),
            Span::styled(" Cancel", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let block = Block::default()
        .title(" Confirm ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Get style for HTTP method
fn method_style(method: &str) -> Style {
    match method {
        "GET" => Style::default().fg(Color::Green),
        "POST" => Style::default().fg(Color::Yellow),
        "PUT" => Style::default().fg(Color::Blue),
        "PATCH" => Style::default().fg(Color::Magenta),
        "DELETE" => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    }
}

/// Truncate a string to `max_len` characters
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max_len).collect()
    }
}
