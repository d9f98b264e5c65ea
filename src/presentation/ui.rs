use crate::application::{App, PanelRow};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

const BUTTON_HEIGHT: u16 = 3;
const PANEL_WIDTH: u16 = 48;

pub fn render_ui(f: &mut Frame, app: &App) {
    let area = f.area();
    let (header, _, status) = layout_chunks(area);

    render_header(f, app, header);
    render_button(f, app, area);
    if app.is_open {
        render_panel(f, app, area);
    }
    render_status_bar(f, app, status);
}

fn layout_chunks(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// The collapsed dropdown button, at the top of the body area.
pub fn button_area(area: Rect) -> Rect {
    let (_, body, _) = layout_chunks(area);
    Rect {
        x: body.x,
        y: body.y,
        width: body.width.min(PANEL_WIDTH),
        height: body.height.min(BUTTON_HEIGHT),
    }
}

/// The open panel, directly under the button. Sized to the visible rows,
/// clipped to the remaining body height.
pub fn panel_area(area: Rect, row_count: usize) -> Rect {
    let (_, body, _) = layout_chunks(area);
    let y = body.y + body.height.min(BUTTON_HEIGHT);
    let available = body.height.saturating_sub(BUTTON_HEIGHT);
    Rect {
        x: body.x,
        y,
        width: body.width.min(PANEL_WIDTH),
        height: available.min(row_count as u16 + 2),
    }
}

/// First visible row index for a cursor that must stay on screen.
pub fn panel_scroll(cursor: usize, row_count: usize, viewport: usize) -> usize {
    if viewport == 0 {
        return 0;
    }
    let offset = cursor.saturating_sub(viewport - 1);
    offset.min(row_count.saturating_sub(viewport))
}

/// Maps a terminal position to a visible panel row index, if it lands on
/// one. Positions on the panel border resolve to `None`.
pub fn panel_row_at(area: Rect, app: &App, position: Position) -> Option<usize> {
    let row_count = app.visible_rows().len();
    let panel = panel_area(area, row_count);
    if !panel.contains(position) || panel.height < 3 {
        return None;
    }
    if position.y == panel.y || position.y == panel.y + panel.height - 1 {
        return None;
    }

    let viewport = panel.height.saturating_sub(2) as usize;
    let offset = panel_scroll(app.cursor, row_count, viewport);
    let index = offset + (position.y - panel.y - 1) as usize;
    (index < row_count).then_some(index)
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(format!("funsel | {}", app.label))
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_button(f: &mut Frame, app: &App, area: Rect) {
    let arrow = if app.is_open { "▲" } else { "▼" };
    let button = Paragraph::new(format!("{} {}", app.label, arrow)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(if app.is_open {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            }),
    );
    f.render_widget(button, button_area(area));
}

fn render_panel(f: &mut Frame, app: &App, area: Rect) {
    let rows = app.visible_rows();
    let panel = panel_area(area, rows.len());
    if panel.height < 3 {
        return;
    }

    f.render_widget(Clear, panel);

    let viewport = panel.height.saturating_sub(2) as usize;
    let offset = panel_scroll(app.cursor, rows.len(), viewport);

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(viewport)
        .map(|(index, row)| {
            let line = panel_line(app, *row);
            let style = if index == app.cursor {
                Style::default().bg(Color::LightBlue).fg(Color::Black)
            } else {
                Style::default()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL));
    f.render_widget(list, panel);
}

fn panel_line(app: &App, row: PanelRow) -> Line<'static> {
    match row {
        PanelRow::SelectAll => {
            let all_selected = app
                .catalog
                .funnels
                .iter()
                .all(|funnel| app.is_funnel_fully_selected(&funnel.name));
            Line::from(vec![
                Span::raw(format!("{} ", checkbox(all_selected))),
                Span::styled(
                    "Выбрать все",
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ])
        }
        PanelRow::Funnel(funnel_idx) => {
            let funnel = &app.catalog.funnels[funnel_idx];
            let marker = if funnel.expanded { "▾" } else { "▸" };
            Line::from(vec![
                Span::raw(format!("{} {} ", marker, checkbox(app.is_funnel_fully_selected(&funnel.name)))),
                Span::raw(funnel.name.clone()),
            ])
        }
        PanelRow::Stage(funnel_idx, stage_idx) => {
            let funnel = &app.catalog.funnels[funnel_idx];
            let stage = &funnel.stages[stage_idx];
            Line::from(vec![
                Span::raw(format!("    {} ", checkbox(app.is_selected(&funnel.name, &stage.name)))),
                Span::styled("● ", Style::default().fg(stage_color(&stage.color))),
                Span::raw(stage.name.clone()),
            ])
        }
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

fn stage_color(hex: &str) -> Color {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() == 6 && hex.is_ascii() {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&hex[0..2], 16),
            u8::from_str_radix(&hex[2..4], 16),
            u8::from_str_radix(&hex[4..6], 16),
        ) {
            return Color::Rgb(r, g, b);
        }
    }
    Color::Gray
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = if let Some(ref status) = app.status_message {
        status.clone()
    } else if app.is_open {
        "↑↓/jk: move | Space: toggle | Enter: expand | a: select all | Esc: close".to_string()
    } else {
        "Enter/Space: open | q: quit".to_string()
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(if app.is_open {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        });
    f.render_widget(status, area);
}
