use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::theme::Theme;

use super::centered_rect;

/// Key map, grouped by section. Shared by the help overlay and `--help`.
pub const KEY_MAP: &[(&str, &[(&str, &str)])] = &[
    (
        "Views",
        &[
            ("h / \u{2190}", "Move to the view on the left"),
            ("l / \u{2192}", "Move to the view on the right"),
            ("1-5", "Move to a specific view"),
        ],
    ),
    (
        "List",
        &[
            ("j / \u{2193}", "Focus next series"),
            ("k / \u{2191}", "Focus previous series"),
            ("PgDn / PgUp", "Page down / up"),
            ("Home / End", "First / last series"),
        ],
    ),
    (
        "Series",
        &[
            ("i", "Increment seen episodes"),
            ("d", "Decrement seen episodes"),
            ("s", "Set seen episodes to a number"),
            ("ma", "Mark as active"),
            ("mh", "Mark as on hold"),
            ("md", "Mark as dropped"),
            ("mp", "Mark as planned"),
            ("a", "Add new series"),
            ("x", "Delete series"),
        ],
    ),
    (
        "Ordering",
        &[
            ("on", "Order by name"),
            ("os", "Order by seen episodes"),
            ("oe", "Order by episode count"),
        ],
    ),
    (
        "General",
        &[
            ("?", "Show this help"),
            ("q / Q", "Exit"),
            ("Ctrl+c", "Exit from anywhere"),
        ],
    ),
];

/// Plain-text key map for the CLI help epilog.
pub fn key_map_text() -> String {
    let mut out = String::from("Keys:\n");
    for (section, keys) in KEY_MAP {
        out.push_str(&format!("  {section}\n"));
        for (key, desc) in *keys {
            out.push_str(&format!("    {key:<14}{desc}\n"));
        }
    }
    out
}

/// Render the help overlay as a centered popup.
pub fn render(f: &mut Frame, theme: &Theme) {
    let rows: usize = KEY_MAP.iter().map(|(_, keys)| keys.len() + 2).sum();
    let popup = centered_rect(52, rows as u16 + 2, f.area());

    let mut lines = Vec::with_capacity(rows);
    for (section, keys) in KEY_MAP {
        lines.push(section_header(section));
        lines.extend(keys.iter().map(|(key, desc)| key_line(key, desc, theme)));
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines).style(theme.dialog_style()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Keys (any key closes) "),
    );

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

fn section_header(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {title}"),
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

fn key_line<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("   {key:<14}"), theme.column_header_style()),
        Span::raw(desc),
    ])
}
