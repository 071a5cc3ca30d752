pub mod add_dialog;
pub mod help;
pub mod series;

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Truncate a string to fit in `max_width` columns, appending "\u{2026}" if truncated.
pub fn truncate(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if s.chars().count() <= max_width {
        return s.to_string();
    }
    let mut truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
    truncated.push('\u{2026}');
    truncated
}

/// Create a centered rectangle of the given width (columns) and height (rows),
/// shrunk to fit `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .split(area);
    Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .split(vertical[0])[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("Ōkami", 5), "Ōkami");
        assert_eq!(truncate("Ōkami Kakushi", 6), "Ōkami\u{2026}");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn centered_rect_fits_small_areas() {
        let area = Rect::new(0, 0, 30, 8);
        let popup = centered_rect(50, 12, area);
        assert_eq!((popup.width, popup.height), (30, 8));
        let popup = centered_rect(10, 4, area);
        assert_eq!(popup, Rect::new(10, 2, 10, 4));
    }
}
