//! Terminal UI for the shiny hunt.

pub mod hunt_scene;

use crate::clock::format_elapsed;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::Duration;

/// Presentation-side snapshot of the hunt, built purely from engine events.
#[derive(Debug, Clone, Default)]
pub struct HuntView {
    /// Current encounter line, e.g. "Moonwyrm - rare".
    pub status: String,
    pub status_is_shiny: bool,
    pub encounters: u64,
    pub total_shinies: u64,
    pub elapsed_secs: u64,
    /// True while the engine is parked waiting for Continue.
    pub awaiting_continue: bool,
    /// Set when a flavor hint arrived with the latest common encounter.
    pub heard_flavor: bool,
    /// Degenerate-table report; the hunt is halted when set.
    pub stalled: Option<String>,
    /// Non-fatal problem worth showing once (asset or save errors).
    pub warning: Option<String>,
    pub muted: bool,
}

impl HuntView {
    pub fn new(total_shinies: u64, muted: bool) -> Self {
        Self {
            status: "Walking through the tall grass...".to_string(),
            total_shinies,
            muted,
            ..Self::default()
        }
    }
}

/// Draws the full hunt screen: stats on the left, sprite on the right,
/// footer with key hints, and the continue banner when a shiny is waiting.
pub fn draw_ui(frame: &mut Frame, view: &HuntView, sprite: Option<&str>) {
    let size = frame.size();

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(size);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40), // Stats panel
            Constraint::Percentage(60), // Sprite scene
        ])
        .split(v_chunks[0]);

    draw_stats_panel(frame, chunks[0], view);
    hunt_scene::draw_hunt_scene(frame, chunks[1], view, sprite);
    draw_footer(frame, v_chunks[1], view);

    if view.awaiting_continue {
        hunt_scene::draw_continue_banner(frame, size);
    }
}

fn draw_stats_panel(frame: &mut Frame, area: ratatui::layout::Rect, view: &HuntView) {
    let block = Block::default()
        .title(" Hunt ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let status_style = if view.status_is_shiny {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let mut lines = vec![
        Line::from(Span::styled(view.status.clone(), status_style)),
        Line::from(""),
        Line::from(format!("Encounters: {}", view.encounters)),
        Line::from(format!("Shinies Found: {}", view.total_shinies)),
        Line::from(format!(
            "Time Elapsed: {}",
            format_elapsed(Duration::from_secs(view.elapsed_secs))
        )),
    ];

    if view.heard_flavor {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "You hear a shiny nearby...",
            Style::default().fg(Color::Magenta),
        )));
    }

    if let Some(warning) = &view.warning {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            warning.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    if let Some(reason) = &view.stalled {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Hunt halted: {reason}"),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

fn draw_footer(frame: &mut Frame, area: ratatui::layout::Rect, view: &HuntView) {
    let audio = if view.muted { "muted" } else { "sound on" };
    let hints = if view.awaiting_continue {
        format!("[c] continue hunt  [m] {audio}  [q] quit")
    } else {
        format!("[m] {audio}  [q] quit")
    };

    let footer = Paragraph::new(hints)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
