use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use artbrowse_core::PendingCount;

use crate::app::App;
use crate::view::centered_rect;

/// Render the "select N rows" popup with its single text field.
pub fn render(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let popup = centered_rect(44, 8, f.area());

    let text = app.count_input.as_str();
    let (before, after) = text.split_at(app.count_input.cursor());
    let mut after_chars = after.chars();
    let under_cursor = after_chars
        .next()
        .map(String::from)
        .unwrap_or_else(|| " ".to_string());
    let rest: String = after_chars.collect();

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Rows to select",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  > ", Style::default().fg(theme.active)),
            Span::styled(before.to_string(), Style::default().fg(theme.text)),
            Span::styled(
                under_cursor,
                Style::default().fg(theme.header_fg).bg(theme.active),
            ),
            Span::styled(rest, Style::default().fg(theme.text)),
        ]),
    ];

    if let PendingCount::Active(n) = app.browser.pending() {
        lines.push(Line::from(Span::styled(
            format!("  {n} still pending from the last request"),
            Style::default().fg(theme.pending),
        )));
    } else {
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled(
            "  Enter",
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(": submit   ", Style::default().fg(theme.dim)),
        Span::styled(
            "Esc",
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(": cancel", Style::default().fg(theme.dim)),
    ]));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.active))
            .title(" Select rows "),
    );

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}
