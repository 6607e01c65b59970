use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use artbrowse_core::Record;

use crate::theme::Theme;

/// Render every field of `record` in a wrapped popup over the grid.
pub fn render(f: &mut Frame, theme: &Theme, record: &Record, selected: bool) {
    let area = f.area();
    let vertical = Layout::vertical([Constraint::Percentage(70)])
        .flex(Flex::Center)
        .split(area);
    let popup = Layout::horizontal([Constraint::Percentage(70)])
        .flex(Flex::Center)
        .split(vertical[0])[0];

    let label = |name: &'static str| {
        Span::styled(
            format!("{name:<17}"),
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD),
        )
    };
    let value = |v: Option<&str>| match v {
        Some(v) if !v.trim().is_empty() => Span::styled(v.to_string(), Style::default().fg(theme.text)),
        _ => Span::styled("\u{2014}", Style::default().fg(theme.dim)),
    };
    let year = |y: Option<i32>| y.map(|y| y.to_string());

    let mut lines = vec![
        Line::from(Span::styled(
            record.title_or_untitled().to_string(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![label("Id"), value(Some(&record.id.to_string()))]),
        Line::from(vec![
            label("Place of origin"),
            value(record.place_of_origin.as_deref()),
        ]),
        Line::from(vec![
            label("Start date"),
            value(year(record.date_start).as_deref()),
        ]),
        Line::from(vec![
            label("End date"),
            value(year(record.date_end).as_deref()),
        ]),
        Line::from(""),
        Line::from(label("Artist display")),
    ];
    lines.extend(multiline(record.artist_display.as_deref(), theme));
    lines.push(Line::from(""));
    lines.push(Line::from(label("Inscriptions")));
    lines.extend(multiline(record.inscriptions.as_deref(), theme));

    let title = if selected {
        " Record [selected] "
    } else {
        " Record "
    };
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.active))
                .title(title)
                .title_bottom(" Space: toggle   Enter/Esc: close "),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

fn multiline<'a>(text: Option<&str>, theme: &Theme) -> Vec<Line<'a>> {
    match text {
        Some(t) if !t.trim().is_empty() => t
            .lines()
            .map(|l| Line::from(Span::styled(format!("  {l}"), Style::default().fg(theme.text))))
            .collect(),
        _ => vec![Line::from(Span::styled(
            "  \u{2014}",
            Style::default().fg(theme.dim),
        ))],
    }
}
