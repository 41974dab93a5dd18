//! Two-pane layout with a status bar.
//!
//! ```text
//! ┌─ Workflows (2) ──────────┐┌─ Generate ──────────────┐
//! │ > Sample Data Processing ││ Prompt   > write a haiku│
//! │   A basic workflow.      ││ Model    OpenAI (gpt-4o)│
//! │   [Run Workflow] [Edit]  ││ Temp     ▓▓▓▓▓▓▓░░░ 0.7 │
//! │   Workflow started.      ││ [Generate Content]      │
//! │                          ││ ┌ Output ─────────────┐ │
//! └──────────────────────────┘└─────────────────────────┘
//!  [idle] [http://127.0.0.1:5000] Tab:Focus ... ^C:Quit
//! ```

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};
use ratatui::Frame;

use crate::dashboard::{StatusRegion, TriggerControl, WorkflowList};

use super::app::{Focus, TuiApp};
use super::dashboard;

/// Draw the full TUI layout.
pub fn draw(f: &mut Frame, app: &TuiApp) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // panes
            Constraint::Length(1), // status bar
        ])
        .split(f.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(outer[0]);

    draw_workflows(f, app, panes[0]);
    draw_generate(f, app, panes[1]);
    draw_status(f, app, outer[1]);
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let color = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

fn button(control: &TriggerControl) -> Span<'static> {
    let style = if control.is_enabled() {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray).bg(Color::DarkGray)
    };
    Span::styled(format!("[{}]", control.label()), style)
}

fn status_line(status: &StatusRegion, indent: &'static str) -> Option<Line<'static>> {
    status.message().map(|m| {
        Line::from(vec![
            Span::raw(indent),
            Span::styled(m.text.clone(), dashboard::status_style(m.kind)),
        ])
    })
}

fn draw_workflows(f: &mut Frame, app: &TuiApp, area: Rect) {
    let cards = app.controller.cards();
    let title = match app.controller.list() {
        WorkflowList::Loaded(_) => format!(" Workflows ({}) ", cards.len()),
        _ => " Workflows ".to_string(),
    };
    let block = pane_block(title, app.focus == Focus::Workflows);

    let mut lines: Vec<Line> = Vec::new();
    match app.controller.list() {
        WorkflowList::Loading => {
            lines.push(Line::styled(
                "Loading workflows...",
                Style::default().fg(Color::Yellow),
            ));
        }
        WorkflowList::Empty => {
            lines.push(Line::styled(
                "No workflows found. Press n to create one.",
                Style::default().fg(Color::DarkGray),
            ));
        }
        WorkflowList::Failed(msg) => {
            lines.push(Line::styled(
                msg.clone(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }
        WorkflowList::Loaded(_) => {
            let width = area.width.saturating_sub(4) as usize;
            for (i, card) in cards.iter().enumerate() {
                let is_selected = i == app.selected;
                let name_style = if is_selected {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                let prefix = if is_selected { "> " } else { "  " };
                lines.push(Line::from(vec![
                    Span::styled(prefix, name_style),
                    Span::styled(dashboard::truncate(&card.workflow.name, width), name_style),
                ]));
                lines.push(Line::styled(
                    format!("  {}", dashboard::truncate(&card.workflow.description, width)),
                    Style::default().fg(Color::DarkGray),
                ));
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    button(&card.run),
                    Span::raw(" "),
                    Span::styled("[Edit Workflow]", Style::default().fg(Color::Cyan)),
                ]));
                if let Some(line) = status_line(&card.status, "  ") {
                    lines.push(line);
                }
                lines.push(Line::raw(""));
            }
        }
    }

    // Keep the selected card in view: each card is 4-5 lines tall.
    let card_rows: usize = cards
        .iter()
        .take(app.selected)
        .map(|c| if c.status.is_visible() { 5 } else { 4 })
        .sum();
    let viewport = area.height.saturating_sub(2) as usize;
    let scroll = card_rows.saturating_sub(viewport.saturating_sub(5));

    let para = Paragraph::new(Text::from(lines))
        .block(block)
        .scroll((scroll.min(u16::MAX as usize) as u16, 0));
    f.render_widget(para, area);
}

fn draw_generate(f: &mut Frame, app: &TuiApp, area: Rect) {
    let form = app.controller.form();
    let block = pane_block(" Generate ".to_string(), app.focus == Focus::Generate);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // prompt
            Constraint::Length(1), // model
            Constraint::Length(1), // temperature
            Constraint::Length(1), // trigger
            Constraint::Length(1), // status
            Constraint::Min(3),    // output
        ])
        .split(inner);

    let prompt_style = if app.focus == Focus::Generate {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };
    let prompt = if form.prompt.is_empty() {
        Paragraph::new(Span::styled(
            "Type a prompt...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Paragraph::new(Span::styled(form.prompt.clone(), prompt_style)).wrap(Wrap { trim: false })
    };
    f.render_widget(
        prompt.block(Block::default().title(" Prompt ").borders(Borders::ALL)),
        rows[0],
    );

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Model  ", Style::default().fg(Color::DarkGray)),
            Span::styled(form.model.label(), Style::default().fg(Color::Cyan)),
            Span::styled("  (F2)", Style::default().fg(Color::DarkGray)),
        ])),
        rows[1],
    );

    let temp_rows = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(7), Constraint::Min(5)])
        .split(rows[2]);
    f.render_widget(
        Paragraph::new(Span::styled("Temp   ", Style::default().fg(Color::DarkGray))),
        temp_rows[0],
    );
    f.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Yellow).bg(Color::Black))
            .ratio(form.temperature.value())
            .label(form.temperature.readout().to_string()),
        temp_rows[1],
    );

    f.render_widget(Paragraph::new(Line::from(button(&form.trigger))), rows[3]);

    if let Some(line) = status_line(&form.status, "") {
        f.render_widget(Paragraph::new(line), rows[4]);
    }

    let output = Paragraph::new(form.output.clone())
        .wrap(Wrap { trim: false })
        .block(Block::default().title(" Output ").borders(Borders::ALL));
    f.render_widget(output, rows[5]);
}

fn draw_status(f: &mut Frame, app: &TuiApp, area: Rect) {
    let in_flight = app.controller.in_flight();
    let state_style = if in_flight == 0 {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let mut spans = vec![
        Span::styled(" [", Style::default().fg(Color::DarkGray)),
        Span::styled(dashboard::format_in_flight(in_flight), state_style),
        Span::styled("]", Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::styled(format!("[{}]", app.base_url), Style::default().fg(Color::Cyan)),
    ];

    if let Some(link) = &app.last_link {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("[Edit: {link}]"),
            Style::default().fg(Color::Magenta),
        ));
    }

    let shortcuts = match app.focus {
        Focus::Workflows => "Enter:Run  e:Edit  n:New  r:Reload  Tab:Focus  Esc:Quit",
        Focus::Generate => "Enter:Generate  F2:Model  \u{2190}\u{2192}:Temp  Tab:Focus  Esc:Quit",
    };
    spans.push(Span::raw("  "));
    spans.push(Span::styled(shortcuts, Style::default().fg(Color::DarkGray)));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
