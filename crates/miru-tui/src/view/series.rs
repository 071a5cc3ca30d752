use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState};

use crate::model::series_view::{Footer, SeriesView};
use crate::theme::Theme;

use super::truncate;

const COLUMN_WIDTHS: [Constraint; 3] = [
    Constraint::Percentage(60),
    Constraint::Percentage(20),
    Constraint::Percentage(20),
];

/// Render one category view: title bar, column header, the list and the footer.
///
/// Records the list height in `view.page_size` for page-wise navigation.
pub fn render(f: &mut Frame, area: Rect, view: &mut SeriesView, theme: &Theme) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // title bar
        Constraint::Length(1), // spacer
        Constraint::Length(1), // column header
        Constraint::Length(1), // divider
        Constraint::Min(0),    // list
        Constraint::Length(1), // footer
    ])
    .split(area);

    render_header(f, chunks[0], view, theme);
    render_column_header(f, chunks[2], theme);
    f.render_widget(
        Paragraph::new("\u{2500}".repeat(chunks[3].width as usize)).style(theme.dim_style()),
        chunks[3],
    );
    render_list(f, chunks[4], view, theme);
    render_footer(f, chunks[5], view, theme);

    view.page_size = (chunks[4].height as usize).max(1);
}

fn render_header(f: &mut Frame, area: Rect, view: &SeriesView, theme: &Theme) {
    let style = theme.bar_style(view.category());
    let cols = Layout::horizontal([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(area);
    f.render_widget(Paragraph::new("<").style(style), cols[0]);
    f.render_widget(
        Paragraph::new(view.title())
            .alignment(Alignment::Center)
            .style(style),
        cols[1],
    );
    f.render_widget(Paragraph::new(">").style(style), cols[2]);
}

fn render_column_header(f: &mut Frame, area: Rect, theme: &Theme) {
    let header = Row::new(vec![
        Cell::from("Name"),
        Cell::from(Line::from("Seen").alignment(Alignment::Right)),
        Cell::from(Line::from("Total").alignment(Alignment::Right)),
    ])
    .style(theme.column_header_style());
    let table = Table::new(Vec::<Row>::new(), COLUMN_WIDTHS).header(header);
    f.render_widget(table, area);
}

fn render_list(f: &mut Frame, area: Rect, view: &SeriesView, theme: &Theme) {
    let name_width = (area.width as usize * 60 / 100).saturating_sub(1);
    let rows: Vec<Row> = view
        .walker
        .entries()
        .iter()
        .map(|entry| {
            let series = entry.series();
            Row::new(vec![
                Cell::from(truncate(&series.name, name_width)),
                Cell::from(Line::from(series.seen.to_string()).alignment(Alignment::Right)),
                Cell::from(Line::from(series.episodes.to_string()).alignment(Alignment::Right)),
            ])
        })
        .collect();

    let table = Table::new(rows, COLUMN_WIDTHS)
        .style(Style::default().fg(theme.text))
        .row_highlight_style(theme.focus_style());

    let mut state = TableState::default();
    state.select(view.walker.focus_index());
    f.render_stateful_widget(table, area, &mut state);
}

fn render_footer(f: &mut Frame, area: Rect, view: &SeriesView, theme: &Theme) {
    let style = theme.bar_style(view.category());
    let key = theme.key_style();

    let paragraph = match &view.footer {
        Footer::Totals => {
            Paragraph::new(format!("Total of {} seen episodes", view.total_seen))
                .alignment(Alignment::Center)
        }
        Footer::MarkingPrompt => Paragraph::new(Line::from(vec![
            Span::styled("Mark as:", key),
            Span::raw(" "),
            Span::styled("a", key),
            Span::raw("ctive, on "),
            Span::styled("h", key),
            Span::raw("old, "),
            Span::styled("d", key),
            Span::raw("ropped, "),
            Span::styled("p", key),
            Span::raw("lanned"),
        ])),
        Footer::OrderByPrompt => Paragraph::new(Line::from(vec![
            Span::styled("Order by:", key),
            Span::raw(" "),
            Span::styled("n", key),
            Span::raw("ame, "),
            Span::styled("s", key),
            Span::raw("een, "),
            Span::styled("e", key),
            Span::raw("pisodes"),
        ])),
        Footer::Input { prompt, .. } => {
            let column = prompt.label.chars().count() + prompt.cursor_column();
            let x = area.x + (column as u16).min(area.width.saturating_sub(1));
            f.set_cursor_position((x, area.y));
            Paragraph::new(Line::from(vec![
                Span::raw(prompt.label.as_str()),
                Span::raw(prompt.buffer.as_str()),
            ]))
        }
    };
    f.render_widget(paragraph.style(style), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use miru_core::{Category, Key, NewSeries, OrderField, SeriesStore, SqliteStore};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn draw(view: &mut SeriesView) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|f| render(f, f.area(), view, &Theme::classic()))
            .unwrap();
        terminal
    }

    #[test]
    fn renders_rows_and_totals() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .insert(&NewSeries {
                name: "Mushishi".to_string(),
                episodes: 26,
                seen: 4,
                status: None,
            })
            .unwrap();
        let mut view = SeriesView::new(Category::Watching, OrderField::Name);
        view.reload(&store).unwrap();

        let terminal = draw(&mut view);
        let text = screen(&terminal);
        assert!(text.contains("Currently Watching"));
        assert!(text.contains("Mushishi"));
        assert!(text.contains("26"));
        assert!(text.contains("Total of 4 seen episodes"));
        // 12 rows minus title, spacer, column header, divider and footer.
        assert_eq!(view.page_size, 7);
    }

    #[test]
    fn renders_prompts_in_footer() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .insert(&NewSeries {
                name: "Aria".to_string(),
                episodes: 13,
                seen: 0,
                status: None,
            })
            .unwrap();
        let mut view = SeriesView::new(Category::Watching, OrderField::Name);
        view.reload(&store).unwrap();

        view.handle_key(Key::Char('m'), &store).unwrap();
        assert!(screen(&draw(&mut view)).contains("Mark as: active, on hold, dropped, planned"));
        view.handle_key(Key::Esc, &store).unwrap();

        view.handle_key(Key::Char('o'), &store).unwrap();
        assert!(screen(&draw(&mut view)).contains("Order by: name, seen, episodes"));
        view.handle_key(Key::Esc, &store).unwrap();

        view.handle_key(Key::Char('x'), &store).unwrap();
        assert!(screen(&draw(&mut view)).contains("Do you really want to delete \"Aria\" [y/N]?:"));
    }

    #[test]
    fn empty_list_renders() {
        let mut view = SeriesView::new(Category::Dropped, OrderField::Name);
        let text = screen(&draw(&mut view));
        assert!(text.contains("Dropped"));
        assert!(text.contains("Total of 0 seen episodes"));
    }
}
