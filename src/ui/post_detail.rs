//! Post detail view
//!
//! Renders the fetched post: author block, text body, posted time, the
//! four engagement metrics, and attached media URLs, next to the stats
//! sidebar.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::{MediaKind, PostRecord};
use crate::ui::stats;

/// Renders the post detail view
pub fn render(frame: &mut Frame, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(28)])
        .split(frame.area());

    stats::render(frame, columns[1], app);

    let Some(record) = &app.current_post else {
        let placeholder = Paragraph::new("No post loaded")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(placeholder, columns[0]);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(columns[0]);

    render_author(frame, rows[0], record);
    render_metrics(frame, rows[1], record);
    render_body(frame, rows[2], app, record);
    render_footer(frame, rows[3], app);
}

/// Author block: display name, handle, and bio
fn render_author(frame: &mut Frame, area: Rect, record: &PostRecord) {
    let mut lines = vec![
        Line::from(Span::styled(
            record.author.name.as_str(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("@{}", record.author.handle),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    if let Some(bio) = &record.author.bio {
        lines.push(Line::from(bio.as_str()));
    }

    let block = Block::default().title(" Author ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// The four engagement counts, one bordered cell each
fn render_metrics(frame: &mut Frame, area: Rect, record: &PostRecord) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let metrics = [
        ("Likes", record.metrics.likes),
        ("Reposts", record.metrics.reposts),
        ("Quotes", record.metrics.quotes),
        ("Replies", record.metrics.replies),
    ];

    for (i, (label, value)) in metrics.iter().enumerate() {
        let cell = Paragraph::new(Span::styled(
            value.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .block(
            Block::default()
                .title(format!(" {} ", label))
                .borders(Borders::ALL),
        );
        frame.render_widget(cell, cells[i]);
    }
}

/// Scrollable body: post text, posted time, and media URLs
fn render_body(frame: &mut Frame, area: Rect, app: &App, record: &PostRecord) {
    let mut lines = vec![
        Line::from(record.text.as_str()),
        Line::from(""),
        Line::from(Span::styled(
            format!("Posted: {}", record.created_at.format("%Y-%m-%d %H:%M:%S UTC")),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    if record.media.is_empty() {
        lines.push(Line::from(Span::styled(
            "No media attached to this post.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Media",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for item in &record.media {
            lines.extend(media_lines(item));
        }
    }

    let block = Block::default().title(" Post ").borders(Borders::ALL);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll_offset, 0));
    frame.render_widget(paragraph, area);
}

/// Lines describing one media attachment
fn media_lines(item: &crate::data::MediaItem) -> Vec<Line<'_>> {
    let mut lines = Vec::new();

    match item.kind {
        MediaKind::Photo => {
            if let Some(url) = &item.url {
                lines.push(Line::from(format!("  Photo: {}", url)));
            }
        }
        MediaKind::Video | MediaKind::AnimatedGif => {
            let label = if item.kind == MediaKind::Video {
                "Video"
            } else {
                "GIF"
            };
            if let Some(url) = item.best_video_url() {
                lines.push(Line::from(format!("  {}: {}", label, url)));
            }
            if let Some(preview) = &item.preview_image_url {
                lines.push(Line::from(Span::styled(
                    format!("  Preview: {}", preview),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
    }

    lines
}

/// Key hints and any transient notice
fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.notice {
        Some(notice) => Line::from(Span::styled(
            notice.as_str(),
            Style::default().fg(Color::Green),
        )),
        None => Line::from(Span::styled(
            "e export · n new fetch · j/k scroll · ? help · q back",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{app_with_script, sample_record};
    use crate::app::AppState;
    use crate::data::{MediaItem, VideoVariant};
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(110, 30);
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

    fn detail_app() -> (App, tempfile::TempDir) {
        let (mut app, temp_dir) = app_with_script(Vec::new());
        app.current_post = Some(sample_record("42"));
        app.state = AppState::PostDetail("42".to_string());
        (app, temp_dir)
    }

    #[test]
    fn test_detail_view_shows_author_and_text() {
        let (app, _temp_dir) = detail_app();

        let content = render_to_string(&app);

        assert!(content.contains("Alice"));
        assert!(content.contains("@alice"));
        assert!(content.contains("A post about terminals"));
    }

    #[test]
    fn test_detail_view_shows_all_four_metrics() {
        let (app, _temp_dir) = detail_app();

        let content = render_to_string(&app);

        assert!(content.contains("Likes"));
        assert!(content.contains("Reposts"));
        assert!(content.contains("Quotes"));
        assert!(content.contains("Replies"));
        assert!(content.contains("12"), "Like count should be visible");
    }

    #[test]
    fn test_detail_view_without_media_says_so() {
        let (app, _temp_dir) = detail_app();

        let content = render_to_string(&app);

        assert!(content.contains("No media attached"));
    }

    #[test]
    fn test_detail_view_lists_media_urls() {
        let (mut app, _temp_dir) = detail_app();
        if let Some(record) = &mut app.current_post {
            record.media.push(MediaItem {
                kind: MediaKind::Video,
                url: None,
                preview_image_url: Some("https://pbs.twimg.com/preview.jpg".to_string()),
                variants: vec![VideoVariant {
                    content_type: "video/mp4".to_string(),
                    url: "https://video.example/clip.mp4".to_string(),
                    bit_rate: Some(832_000),
                }],
            });
        }

        let content = render_to_string(&app);

        assert!(content.contains("clip.mp4"));
        assert!(content.contains("preview.jpg"));
    }

    #[test]
    fn test_detail_view_without_post_shows_placeholder() {
        let (mut app, _temp_dir) = app_with_script(Vec::new());
        app.state = AppState::PostDetail("42".to_string());

        let content = render_to_string(&app);

        assert!(content.contains("No post loaded"));
    }
}
