use ratatui::style::{Color, Modifier, Style};

use miru_core::Category;

/// Color theme for the TUI, passed to every render function.
#[derive(Debug, Clone)]
pub struct Theme {
    pub watching: Color,
    pub completed: Color,
    pub hold: Color,
    pub dropped: Color,
    pub planned: Color,

    /// Foreground drawn on top of category colors.
    pub header_fg: Color,
    pub text: Color,
    pub dim: Color,
    pub focus_fg: Color,
    pub focus_bg: Color,
    pub key_fg: Color,
    pub edit_fg: Color,
    pub edit_bg: Color,
    pub button_fg: Color,
    pub button_bg: Color,
    pub dialog_fg: Color,
    pub dialog_bg: Color,
    pub error: Color,
}

impl Theme {
    /// The traditional 16-color palette.
    pub fn classic() -> Self {
        Self {
            watching: Color::Blue,
            completed: Color::Green,
            hold: Color::Cyan,
            dropped: Color::DarkGray,
            planned: Color::Red,

            header_fg: Color::White,
            text: Color::Reset,
            dim: Color::DarkGray,
            focus_fg: Color::Black,
            focus_bg: Color::White,
            key_fg: Color::Black,
            edit_fg: Color::White,
            edit_bg: Color::DarkGray,
            button_fg: Color::White,
            button_bg: Color::Blue,
            dialog_fg: Color::Black,
            dialog_bg: Color::Gray,
            error: Color::Red,
        }
    }

    /// Softer truecolor variant.
    pub fn modern() -> Self {
        Self {
            watching: Color::Rgb(40, 90, 170),
            completed: Color::Rgb(30, 130, 70),
            hold: Color::Rgb(20, 130, 140),
            dropped: Color::Rgb(80, 80, 95),
            planned: Color::Rgb(160, 50, 60),

            header_fg: Color::White,
            text: Color::White,
            dim: Color::Rgb(120, 120, 140),
            focus_fg: Color::White,
            focus_bg: Color::Rgb(30, 40, 80),
            key_fg: Color::Black,
            edit_fg: Color::White,
            edit_bg: Color::Rgb(50, 50, 65),
            button_fg: Color::White,
            button_bg: Color::Rgb(60, 140, 255),
            dialog_fg: Color::White,
            dialog_bg: Color::Rgb(25, 25, 35),
            error: Color::Rgb(255, 80, 80),
        }
    }

    /// Look a theme up by its config/CLI name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "classic" => Some(Self::classic()),
            "modern" => Some(Self::modern()),
            _ => None,
        }
    }

    pub fn category_color(&self, category: Category) -> Color {
        match category {
            Category::Watching => self.watching,
            Category::Completed => self.completed,
            Category::Hold => self.hold,
            Category::Dropped => self.dropped,
            Category::Planned => self.planned,
        }
    }

    /// Header and footer bar of a view.
    pub fn bar_style(&self, category: Category) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.category_color(category))
    }

    pub fn focus_style(&self) -> Style {
        Style::default().fg(self.focus_fg).bg(self.focus_bg)
    }

    /// Key letters in prompts, e.g. the `h` in "(h)old".
    pub fn key_style(&self) -> Style {
        Style::default()
            .fg(self.key_fg)
            .bg(self.focus_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn column_header_style(&self) -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    pub fn edit_style(&self) -> Style {
        Style::default().fg(self.edit_fg).bg(self.edit_bg)
    }

    pub fn button_style(&self, focused: bool) -> Style {
        let style = Style::default().fg(self.button_fg).bg(self.button_bg);
        if focused {
            style.add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            style
        }
    }

    pub fn dialog_style(&self) -> Style {
        Style::default().fg(self.dialog_fg).bg(self.dialog_bg)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.dim)
    }
}
