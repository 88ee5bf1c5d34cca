//! Cache and API stats sidebar
//!
//! Shows the cached post count, monthly quota usage, and time until the
//! quota resets. Rendered alongside both the input prompt and the detail
//! view.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Renders the stats sidebar into the given area
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let used = app.quota_used();
    let budget = app.quota_budget();
    let percent = if budget > 0 {
        (used as f64 / budget as f64) * 100.0
    } else {
        0.0
    };

    let usage_color = if used >= budget {
        Color::Red
    } else if percent >= 80.0 {
        Color::Yellow
    } else {
        Color::Green
    };

    let lines = vec![
        Line::from(Span::styled(
            "Cached posts",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(format!("  {}", app.cached_posts())),
        Line::from(""),
        Line::from(Span::styled(
            "API usage",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(vec![Span::styled(
            format!("  {}/{} posts ({:.1}%)", used, budget, percent),
            Style::default().fg(usage_color),
        )]),
        Line::from(""),
        Line::from(Span::styled(
            "Quota resets",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(format!("  in {} days", app.quota_days_until_reset())),
    ];

    let block = Block::default()
        .title(" Cache & API Stats ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
