use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use artbrowse_core::{PendingCount, Record};

use crate::app::App;
use crate::theme::Theme;
use crate::view::{one_line, spinner_char, truncate};

/// Width of the leading checkbox column.
pub const CHECKBOX_WIDTH: u16 = 5;

const PREV_BUTTON: &str = " \u{25c0} ";
const NEXT_BUTTON: &str = " \u{25b6} ";

/// Render the grid screen: header, record table, pager footer.
pub fn render(f: &mut Frame, app: &mut App) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // header
        Constraint::Min(5),    // table
        Constraint::Length(1), // pager + key hints
    ])
    .split(f.area());

    render_header(f, chunks[0], app);
    let offset = render_table(f, chunks[1], app);
    app.hit_areas.table = Some(chunks[1]);
    app.hit_areas.table_offset = offset;
    render_footer(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let browser = &app.browser;

    let mut spans = vec![
        Span::styled(" artbrowse ", theme.header_style()),
        Span::styled(
            format!(" {}", truncate(&app.source_name, 32)),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  Selected: {}", browser.selection().len()),
            Style::default().fg(theme.selected),
        ),
    ];

    if let PendingCount::Active(n) = browser.pending() {
        spans.push(Span::styled(
            format!("  Pending: {n}"),
            Style::default()
                .fg(theme.pending)
                .add_modifier(Modifier::BOLD),
        ));
    }

    if let Some(request) = browser.in_flight() {
        spans.push(Span::styled(
            format!(
                "  {} Loading page {}...",
                spinner_char(app.tick),
                request.page
            ),
            Style::default().fg(theme.spinner),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Returns the scroll offset the table was drawn with.
fn render_table(f: &mut Frame, area: Rect, app: &App) -> usize {
    let theme = &app.theme;
    let browser = &app.browser;
    let wide = area.width >= 100;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(format!(" Page {} ", browser.pager().label()));

    if browser.records().is_empty() {
        let msg = if browser.is_loading() {
            format!(" {} Loading...", spinner_char(app.tick))
        } else {
            " No records".to_string()
        };
        let body = Paragraph::new(Span::styled(msg, Style::default().fg(theme.dim))).block(block);
        f.render_widget(body, area);
        return 0;
    }

    let header_cells = if wide {
        vec![
            "",
            "Title",
            "Place of origin",
            "Artist display",
            "Inscriptions",
            "Start",
            "End",
        ]
    } else {
        vec!["", "Title", "Artist display", "Start", "End"]
    };
    let header = Row::new(header_cells.iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
    }))
    .height(1);

    let rows: Vec<Row> = browser
        .records()
        .iter()
        .map(|record| record_row(record, browser.selection().contains(record.id), wide, theme))
        .collect();

    let widths = if wide {
        vec![
            Constraint::Length(CHECKBOX_WIDTH),
            Constraint::Fill(2), // Title
            Constraint::Fill(1), // Place of origin
            Constraint::Fill(2), // Artist display
            Constraint::Fill(2), // Inscriptions
            Constraint::Length(6),
            Constraint::Length(6),
        ]
    } else {
        vec![
            Constraint::Length(CHECKBOX_WIDTH),
            Constraint::Fill(2),
            Constraint::Fill(1),
            Constraint::Length(6),
            Constraint::Length(6),
        ]
    };

    let table = Table::new(rows, &widths)
        .header(header)
        .block(block)
        .row_highlight_style(theme.highlight_style());

    // Start from the previous offset so the view only scrolls when the cursor leaves it.
    let mut state = TableState::default()
        .with_offset(app.hit_areas.table_offset)
        .with_selected(Some(app.cursor));
    f.render_stateful_widget(table, area, &mut state);
    state.offset()
}

fn record_row<'a>(record: &'a Record, selected: bool, wide: bool, theme: &Theme) -> Row<'a> {
    let checkbox = if selected { " [x]" } else { " [ ]" };
    let text = |field: &Option<String>| field.as_deref().map(one_line).unwrap_or_default();
    let year = |y: Option<i32>| y.map(|y| y.to_string()).unwrap_or_default();

    let title_style = if selected {
        Style::default().fg(theme.selected)
    } else {
        Style::default().fg(theme.text)
    };

    let mut cells = vec![
        Cell::from(checkbox).style(theme.checkbox_style(selected)),
        Cell::from(one_line(record.title_or_untitled())).style(title_style),
    ];
    if wide {
        cells.push(Cell::from(text(&record.place_of_origin)));
    }
    cells.push(Cell::from(text(&record.artist_display)));
    if wide {
        cells.push(Cell::from(text(&record.inscriptions)).style(Style::default().fg(theme.dim)));
    }
    cells.push(Cell::from(year(record.date_start)));
    cells.push(Cell::from(year(record.date_end)));
    Row::new(cells)
}

fn render_footer(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let pager = app.browser.pager();
    let nav_enabled = !app.browser.is_loading();

    let button_style = |enabled: bool| {
        if enabled && nav_enabled {
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim)
        }
    };

    let label = format!("{} ", pager.label());
    let range = match pager.record_range() {
        Some((start, end)) => format!(" {start}\u{2013}{end} of {} ", pager.total_records()),
        None => " ".to_string(),
    };

    let spans = vec![
        Span::styled(PREV_BUTTON, button_style(!pager.is_first())),
        Span::styled(label.clone(), Style::default().fg(theme.text)),
        Span::styled(NEXT_BUTTON, button_style(!pager.is_last())),
        Span::styled(range, Style::default().fg(theme.dim)),
        Span::styled(
            " Space:select  s:select N  \u{2190}/\u{2192}:page  Enter:detail  ?:help  q:quit",
            theme.footer_style(),
        ),
    ];
    f.render_widget(Paragraph::new(Line::from(spans)), area);

    let prev_w = PREV_BUTTON.chars().count() as u16;
    let label_w = label.chars().count() as u16;
    let next_w = NEXT_BUTTON.chars().count() as u16;
    app.hit_areas.prev_button = Some(Rect::new(area.x, area.y, prev_w, 1).intersection(area));
    app.hit_areas.next_button =
        Some(Rect::new(area.x + prev_w + label_w, area.y, next_w, 1).intersection(area));
}
