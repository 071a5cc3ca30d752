use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Margin, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::add_dialog::{AddSeriesDialog, DialogField};
use crate::model::prompt::Prompt;
use crate::theme::Theme;

use super::centered_rect;

/// Render the add-series form as a 50x12 overlay on top of the current view.
pub fn render(f: &mut Frame, dialog: &AddSeriesDialog, theme: &Theme) {
    let popup = centered_rect(50, 12, f.area());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Add Series to {} ", dialog.category.title()))
        .style(theme.dialog_style());
    let inner = block.inner(popup);

    f.render_widget(Clear, popup);
    f.render_widget(block, popup);

    let rows = Layout::vertical([
        Constraint::Length(1), // padding
        Constraint::Length(1), // name label
        Constraint::Length(1), // name edit
        Constraint::Length(1), // episodes label
        Constraint::Length(1), // episodes edit
        Constraint::Length(1), // padding
        Constraint::Length(1), // button
        Constraint::Length(1), // error
    ])
    .split(inner.inner(Margin::new(1, 0)));

    f.render_widget(Paragraph::new("Name"), rows[1]);
    render_field(f, rows[2], &dialog.name, dialog.focus == DialogField::Name, theme);
    f.render_widget(Paragraph::new("Episodes"), rows[3]);
    render_field(
        f,
        rows[4],
        &dialog.episodes,
        dialog.focus == DialogField::Episodes,
        theme,
    );

    let button = Span::styled(
        "[ Add ]",
        theme.button_style(dialog.focus == DialogField::Submit),
    );
    f.render_widget(
        Paragraph::new(Line::from(button)).alignment(Alignment::Center),
        rows[6],
    );

    if let Some(error) = &dialog.error {
        f.render_widget(
            Paragraph::new(error.as_str()).style(theme.error_style()),
            rows[7],
        );
    }
}

fn render_field(f: &mut Frame, area: Rect, prompt: &Prompt, focused: bool, theme: &Theme) {
    f.render_widget(
        Paragraph::new(prompt.buffer.as_str()).style(theme.edit_style()),
        area,
    );
    if focused {
        let column = (prompt.cursor_column() as u16).min(area.width.saturating_sub(1));
        f.set_cursor_position((area.x + column, area.y));
    }
}
