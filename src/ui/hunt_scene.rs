//! Sprite scene and the continue banner.

use super::HuntView;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Draws the encounter sprite, centered in its panel.
pub fn draw_hunt_scene(frame: &mut Frame, area: Rect, view: &HuntView, sprite: Option<&str>) {
    let border_color = if view.status_is_shiny {
        Color::Yellow
    } else {
        Color::Cyan
    };

    let block = Block::default()
        .title(" Encounter ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(art) = sprite else {
        return;
    };

    let lines: Vec<Line> = art.lines().map(Line::from).collect();
    let art_height = lines.len() as u16;

    // Vertically center the sprite in the panel.
    let top_pad = inner.height.saturating_sub(art_height) / 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(top_pad), Constraint::Min(0)])
        .split(inner);

    let style = if view.status_is_shiny {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(style);
    frame.render_widget(paragraph, chunks[1]);
}

/// Centered overlay shown while the engine waits for Continue.
pub fn draw_continue_banner(frame: &mut Frame, area: Rect) {
    let width = 36.min(area.width);
    let height = 5.min(area.height);
    let banner_area = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Shiny! ");

    let text = vec![
        Line::from(""),
        Line::from("Press [c] to continue the hunt"),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .block(block);

    frame.render_widget(Clear, banner_area);
    frame.render_widget(paragraph, banner_area);
}
