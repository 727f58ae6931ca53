//! UI rendering

use super::app::App;
use crate::outline::{Outline, outline};
use eo_catalog::render::render_record;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

const SELECTION_BG: Color = Color::Rgb(38, 38, 38);

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &mut App) {
    // Left: results + search, right: preview
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(frame.area());

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),    // Results
            Constraint::Length(1), // Result count + build time
            Constraint::Length(1), // Shortcuts
            Constraint::Length(1), // Toast
            Constraint::Length(1), // Search input
        ])
        .split(main_chunks[0]);

    render_results(frame, app, left_chunks[0]);
    render_results_count(frame, app, left_chunks[1]);
    render_status_bar(frame, left_chunks[2]);
    render_toast_line(frame, app, left_chunks[3]);
    render_search_input(frame, app, left_chunks[4]);

    render_preview_panel(frame, app, main_chunks[1]);
}

fn render_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let cursor_style = Style::default().fg(Color::White).bg(Color::DarkGray);
    let text_style = Style::default().fg(Color::White);

    let (before, after) = app.search_input.text.split_at(app.search_input.cursor);
    let mut chars = after.chars();
    let cursor_char = chars.next();
    let after_cursor = chars.as_str();

    let mut spans = vec![Span::styled("▌ ", Style::default().fg(Color::Yellow))];
    if !before.is_empty() {
        spans.push(Span::styled(before, text_style));
    }
    match cursor_char {
        Some(c) => spans.push(Span::styled(c.to_string(), cursor_style)),
        None => spans.push(Span::styled("█", text_style)),
    }
    if !after_cursor.is_empty() {
        spans.push(Span::styled(after_cursor, text_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_results(frame: &mut Frame, app: &mut App, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let items: Vec<ListItem> = app
        .controller
        .entries()
        .iter()
        .map(|entry| {
            let mut meta = vec![Span::styled(
                format!("  EO {}", entry.record.eo_number),
                Style::default().fg(Color::Yellow),
            )];
            if let Some(date) = &entry.record.signing_date {
                meta.push(Span::styled(format!("  signed {date}"), dim));
            }
            if let Some(score) = entry.score {
                meta.push(Span::styled(format!("  {score:.2}"), dim));
            }
            ListItem::new(vec![
                Line::from(Span::styled(
                    entry.record.display_title().to_string(),
                    Style::default().fg(Color::White),
                )),
                Line::from(meta),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Executive Orders "),
        )
        .highlight_style(Style::default().bg(SELECTION_BG).add_modifier(Modifier::BOLD))
        .highlight_symbol("▌");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_results_count(frame: &mut Frame, app: &App, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);

    let count = match app.controller.message() {
        Some(message) => message.to_string(),
        None => format!("{} executive orders", app.controller.entries().len()),
    };
    let mut spans = vec![Span::styled(
        format!("  {count}"),
        Style::default().fg(Color::White),
    )];
    if let Some(elapsed) = app.last_query_time {
        spans.push(Span::styled(format!(" ({})", format_duration(elapsed)), dim));
    }
    if let Some(built) = app.controller.build_time_label() {
        spans.push(Span::styled(format!("  built {built}"), dim));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let bracket = Style::default().fg(Color::DarkGray);

    let mut spans = vec![Span::raw(" ")];
    for hint in [
        "↑↓ select",
        "^p/^n scroll",
        "Enter copy link",
        "^o open",
        "Esc quit",
    ] {
        spans.push(Span::styled(" [", bracket));
        spans.push(Span::styled(hint, dim));
        spans.push(Span::styled("]", bracket));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_toast_line(frame: &mut Frame, app: &App, area: Rect) {
    let Some(toast) = &app.toast else {
        return;
    };
    let bracket = Style::default().fg(Color::DarkGray);
    let toast_style = if toast.is_error {
        Style::default().fg(Color::Red).add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(Color::Blue).add_modifier(Modifier::DIM)
    };

    let spans = vec![
        Span::styled("  [", bracket),
        Span::styled(toast.message.as_str(), toast_style),
        Span::styled("]", bracket),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_preview_panel(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Preview ");

    let Some(record) = app.selected_record() else {
        let empty = Paragraph::new(Line::from(Span::styled(
            " No matching executive orders",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let tree = render_record(record, app.controller.view().schema());
    let width = area.width.saturating_sub(4) as usize;
    let lines = preview_lines(&outline(&tree), width);

    let preview = Paragraph::new(lines)
        .block(block)
        .scroll((app.preview_scroll, 0));
    frame.render_widget(preview, area);
}

/// Lay out an outline as styled lines, wrapping values to `width` columns
pub fn preview_lines(outline: &Outline, width: usize) -> Vec<Line<'static>> {
    let label_style = Style::default().fg(Color::DarkGray);
    let value_style = Style::default().fg(Color::White);
    let link_style = Style::default()
        .fg(Color::Blue)
        .add_modifier(Modifier::UNDERLINED);

    let mut lines = Vec::new();
    for row in wrap_text(&outline.title, width) {
        lines.push(Line::from(Span::styled(
            row,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(Span::styled(
        outline.number.clone(),
        Style::default().fg(Color::Yellow),
    )));

    for section in &outline.sections {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            section.name,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));

        for field in &section.fields {
            match &field.target {
                Some(target) => {
                    lines.push(Line::from(vec![
                        Span::styled(format!("{}: ", field.label), label_style),
                        Span::styled(field.value.clone(), link_style),
                    ]));
                    lines.push(Line::from(Span::styled(format!("  {target}"), label_style)));
                }
                None if field.value.width() + field.label.width() + 2 <= width => {
                    lines.push(Line::from(vec![
                        Span::styled(format!("{}: ", field.label), label_style),
                        Span::styled(field.value.clone(), value_style),
                    ]));
                }
                None => {
                    lines.push(Line::from(Span::styled(
                        format!("{}:", field.label),
                        label_style,
                    )));
                    for row in wrap_text(&field.value, width.saturating_sub(2)) {
                        lines.push(Line::from(Span::styled(format!("  {row}"), value_style)));
                    }
                }
            }
        }
    }
    lines
}

/// Greedy word wrap by display width
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.width() + 1 + word.width() <= max_width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn format_duration(d: Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{micros}µs")
    } else {
        format!("{:.1}ms", micros as f64 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::{Field, Section};

    fn plain(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(
            wrap_text("Expands domestic oil and gas production", 16),
            vec!["Expands domestic", "oil and gas", "production"]
        );
        assert!(wrap_text("   ", 10).is_empty());
    }

    #[test]
    fn test_preview_lines() {
        let outline = Outline {
            title: "Restoring Energy Dominance".to_string(),
            number: "EO 14002".to_string(),
            sections: vec![Section {
                name: "Details",
                fields: vec![
                    Field {
                        label: "Purpose".to_string(),
                        value: "-".to_string(),
                        target: None,
                    },
                    Field {
                        label: "Summary".to_string(),
                        value: "Expands domestic oil and gas production".to_string(),
                        target: None,
                    },
                    Field {
                        label: "Original Document".to_string(),
                        value: "Click Here".to_string(),
                        target: Some("https://example.gov/eo1".to_string()),
                    },
                ],
            }],
        };

        assert_eq!(
            plain(&preview_lines(&outline, 30)),
            vec![
                "Restoring Energy Dominance",
                "EO 14002",
                "",
                "Details",
                "Purpose: -",
                "Summary:",
                "  Expands domestic oil and gas",
                "  production",
                "Original Document: Click Here",
                "  https://example.gov/eo1",
            ]
        );
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_micros(250)), "250µs");
        assert_eq!(format_duration(Duration::from_micros(1500)), "1.5ms");
    }
}
