// Drawing - turns a Screen into ratatui widgets
// Layout: header, playlist + now-playing side by side, progress/controls, status bar

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::form::{AddForm, FormField};
use super::screen::{HitBox, LayoutHits, ListRow, RowHit, Screen};
use crate::controller::RowAction;

pub fn draw(f: &mut Frame, screen: &Screen, form: &AddForm, list_state: &mut ListState) -> LayoutHits {
    let size = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(6),    // Playlist + now playing
            Constraint::Length(5), // Progress + controls
            Constraint::Length(3), // Status bar
        ])
        .split(size);

    render_header(f, chunks[0], screen);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(38)])
        .split(chunks[1]);

    let rows = render_playlist(f, body[0], screen, list_state);
    render_now_playing(f, body[1], screen);
    let gauge_area = render_player_controls(f, chunks[2], screen);
    render_status_bar(f, chunks[3], screen.status.as_deref());

    if form.is_open() {
        render_add_form(f, size, form);
    }

    if screen.show_help {
        render_help_overlay(f, size);
    }

    // Overlays swallow clicks, so nothing underneath is hittable
    if form.is_open() || screen.show_help {
        return LayoutHits::default();
    }

    LayoutHits {
        progress: Some(hit_box(gauge_area)),
        rows,
    }
}

fn hit_box(area: Rect) -> HitBox {
    HitBox {
        x: area.x,
        y: area.y,
        width: area.width,
        height: area.height,
    }
}

fn render_header(f: &mut Frame, area: Rect, screen: &Screen) {
    let trending = screen.rows.iter().filter(|row| row.trending).count();
    let header = Paragraph::new(Line::from(vec![
        Span::styled("🎵 TuneDeck", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw(" | "),
        Span::styled(format!("{} tracks", screen.rows.len()), Style::default().fg(Color::Gray)),
        Span::raw(" | "),
        Span::styled(format!("{} trending", trending), Style::default().fg(Color::Magenta)),
        Span::raw(" | "),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::raw(" help"),
    ]))
    .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn row_line(row: &ListRow, highlighted: bool, is_playing: bool) -> Line<'static> {
    let prefix = if row.active && is_playing {
        "▶ "
    } else if row.active {
        "⏸ "
    } else {
        "  "
    };

    let style = if row.active {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut spans = vec![
        Span::styled(format!("{}{} - {}", prefix, row.title, row.artist), style),
    ];
    if row.trending {
        spans.push(Span::styled(" ★", Style::default().fg(Color::Magenta)));
    }

    // Row action hints only on the highlighted row to keep the list readable
    if highlighted {
        for action in RowAction::ALL {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("{}:{}", action.key_hint(), action.label(row.trending)),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    Line::from(spans)
}

/// Draws the list; returns the cells of every row that ended up on screen.
fn render_playlist(
    f: &mut Frame,
    area: Rect,
    screen: &Screen,
    list_state: &mut ListState,
) -> Vec<RowHit> {
    let items: Vec<ListItem> = screen
        .rows
        .iter()
        .map(|row| ListItem::new(row_line(row, row.index == screen.highlighted, screen.is_playing)))
        .collect();

    if screen.rows.is_empty() {
        list_state.select(None);
    } else {
        list_state.select(Some(screen.highlighted.min(screen.rows.len() - 1)));
    }

    let title = if screen.rows.is_empty() {
        "Playlist (empty - press a to add)".to_string()
    } else {
        format!("Playlist ({} tracks)", screen.rows.len())
    };

    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("→ ");

    f.render_stateful_widget(list, area, list_state);

    // One line per row, starting from wherever the list scrolled to
    let offset = list_state.offset();
    screen
        .rows
        .iter()
        .skip(offset)
        .take(usize::from(inner.height))
        .enumerate()
        .map(|(line, row)| RowHit {
            index: row.index,
            area: HitBox {
                x: inner.x,
                y: inner.y + line as u16,
                width: inner.width,
                height: 1,
            },
        })
        .collect()
}

fn render_now_playing(f: &mut Frame, area: Rect, screen: &Screen) {
    let content = match &screen.now_playing {
        Some(now) => {
            let (symbol, label, color) = if screen.is_playing {
                ("▶", "Playing", Color::Green)
            } else {
                ("⏸", "Paused", Color::Yellow)
            };
            vec![
                Line::from(Span::styled(
                    now.title.clone(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(now.artist.clone(), Style::default().fg(Color::Cyan))),
                Line::from(""),
                Line::from(vec![
                    Span::styled("🖼  ", Style::default().fg(Color::Gray)),
                    Span::styled(now.cover.clone(), Style::default().fg(Color::DarkGray)),
                ]),
                Line::from(""),
                Line::from(vec![
                    Span::styled(symbol, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                    Span::raw(" "),
                    Span::styled(label, Style::default().fg(color)),
                ]),
            ]
        }
        None => vec![Line::from(Span::styled(
            "No track loaded",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let panel = Paragraph::new(content)
        .block(Block::default().borders(Borders::ALL).title("Now Playing"))
        .wrap(Wrap { trim: true });

    f.render_widget(panel, area);
}

/// Draws the gauge and control hints; returns where the gauge went.
fn render_player_controls(f: &mut Frame, area: Rect, screen: &Screen) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Progress bar
            Constraint::Min(2),    // Controls
        ])
        .split(area);

    let progress = &screen.progress;
    let time_display = format!("{} / {}", progress.current_label(), progress.duration_label());
    let progress_color = if screen.is_playing { Color::Green } else { Color::Yellow };

    let progress_bar = Gauge::default()
        .block(Block::default().borders(Borders::NONE))
        .gauge_style(Style::default().fg(progress_color).add_modifier(Modifier::BOLD))
        .ratio(progress.ratio())
        .label(time_display);

    f.render_widget(progress_bar, chunks[0]);

    let filled = ((screen.volume * 10.0).round() as usize).min(10);
    let volume_bar = "█".repeat(filled);
    let volume_empty = "░".repeat(10 - filled);

    let controls_text = vec![
        Line::from(vec![
            Span::styled("Vol: ", Style::default().fg(Color::Gray)),
            Span::styled(volume_bar, Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
            Span::styled(volume_empty, Style::default().fg(Color::DarkGray)),
            Span::raw(format!(" {}%", (screen.volume * 100.0).round() as u32)),
        ]),
        Line::from(vec![
            Span::styled("Space", Style::default().fg(Color::Yellow)),
            Span::raw("=Play/Pause "),
            Span::styled("←/→", Style::default().fg(Color::Yellow)),
            Span::raw("=Prev/Next "),
            Span::styled("a", Style::default().fg(Color::Yellow)),
            Span::raw("=Add "),
            Span::styled("0-9", Style::default().fg(Color::Yellow)),
            Span::raw("=Seek "),
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::raw("=Quit"),
        ]),
    ];

    let controls = Paragraph::new(controls_text)
        .block(Block::default().borders(Borders::ALL).title("Player"))
        .wrap(Wrap { trim: true });

    f.render_widget(controls, chunks[1]);

    chunks[0]
}

fn render_status_bar(f: &mut Frame, area: Rect, status: Option<&str>) {
    let status = Paragraph::new(status.unwrap_or("Ready").to_string())
        .style(Style::default().fg(Color::Green))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}

fn render_add_form(f: &mut Frame, area: Rect, form: &AddForm) {
    let popup_area = centered_rect(60, 50, area);

    let mut lines = vec![Line::from("")];
    for field in FormField::ALL {
        let focused = form.focus() == field;
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let cursor = if focused { "█" } else { "" };

        lines.push(Line::from(vec![
            Span::styled(format!("{:>17}: ", field.label()), label_style),
            Span::styled(format!("{}{}", form.value(field), cursor), Style::default().fg(Color::White)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tab/↑↓: Field | Enter: Add | Esc: Cancel",
        Style::default().fg(Color::Gray),
    )));

    f.render_widget(Clear, popup_area);

    let popup = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("➕ Add Song")
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().bg(Color::Black).fg(Color::White));

    f.render_widget(popup, popup_area);
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(70, 70, area);

    let help_text = vec![
        Line::from(vec![Span::styled("🎵 TuneDeck Help", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![Span::styled("Playback:", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))]),
        Line::from("  Space         Play/Pause"),
        Line::from("  →             Next track"),
        Line::from("  ←             Previous track"),
        Line::from("  0-9           Seek to that tenth of the track"),
        Line::from("  Click bar     Seek to that spot"),
        Line::from("  +/-           Volume up/down"),
        Line::from(""),
        Line::from(vec![Span::styled("Playlist:", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))]),
        Line::from("  ↑/↓ k/j       Move highlight"),
        Line::from("  Enter/s       Play highlighted track"),
        Line::from("  t             Toggle trending"),
        Line::from("  d/Del         Delete track"),
        Line::from("  a             Add a song"),
        Line::from(""),
        Line::from("  q/Esc         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled("Press ? again to close", Style::default().fg(Color::Yellow))]),
    ];

    f.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().bg(Color::Black).fg(Color::White))
        .wrap(Wrap { trim: true });

    f.render_widget(help_paragraph, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
