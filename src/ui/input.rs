//! Link input prompt view
//!
//! Renders the post-link prompt with any error or notice from the last
//! request, usage instructions, and the stats sidebar.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::stats;

/// Renders the input prompt view
pub fn render(frame: &mut Frame, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(28)])
        .split(frame.area());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(4),
        ])
        .split(columns[0]);

    let title = Paragraph::new(Line::from(Span::styled(
        "X Post Details Fetcher",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, rows[0]);

    // Prompt with a block cursor at the end of the typed text
    let prompt = Paragraph::new(Line::from(vec![
        Span::raw(app.input.as_str()),
        Span::styled("█", Style::default().fg(Color::Cyan)),
    ]))
    .block(
        Block::default()
            .title(" Post link ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(prompt, rows[1]);

    if let Some(error) = &app.error {
        let message = Paragraph::new(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        ))
        .wrap(Wrap { trim: true });
        frame.render_widget(message, rows[2]);
    } else if let Some(notice) = &app.notice {
        let message = Paragraph::new(Span::styled(
            notice.as_str(),
            Style::default().fg(Color::Green),
        ));
        frame.render_widget(message, rows[2]);
    }

    let instructions = Paragraph::new(vec![
        Line::from("How to use"),
        Line::from("  1. Paste an X post link, e.g. https://x.com/user/status/123456789"),
        Line::from("  2. Press Enter to fetch the post's text, author, and metrics"),
        Line::from("  3. Cached posts are served locally without spending API quota"),
        Line::from(""),
        Line::from(Span::styled(
            "Enter fetch · Esc clear/quit · Ctrl+C quit",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .wrap(Wrap { trim: false });
    frame.render_widget(instructions, rows[3]);

    stats::render(frame, columns[1], app);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::app_with_script;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_input_view_shows_title_and_prompt() {
        let (app, _temp_dir) = app_with_script(Vec::new());

        let content = render_to_string(&app);

        assert!(content.contains("X Post Details Fetcher"));
        assert!(content.contains("Post link"));
        assert!(content.contains("Cache & API Stats"));
    }

    #[test]
    fn test_input_view_shows_typed_text() {
        let (mut app, _temp_dir) = app_with_script(Vec::new());
        app.input = "https://x.com/alice/status/42".to_string();

        let content = render_to_string(&app);

        assert!(content.contains("https://x.com/alice/status/42"));
    }

    #[test]
    fn test_input_view_shows_error() {
        let (mut app, _temp_dir) = app_with_script(Vec::new());
        app.error = Some("Post 42 not found".to_string());

        let content = render_to_string(&app);

        assert!(content.contains("Post 42 not found"));
    }
}
