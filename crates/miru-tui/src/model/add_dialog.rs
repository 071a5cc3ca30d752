use miru_core::{Category, Key, MAX_NAME_LEN, NewSeries};

use super::prompt::{Prompt, PromptOutcome, parse_count};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogField {
    Name,
    Episodes,
    Submit,
}

impl DialogField {
    fn next(self) -> Self {
        match self {
            Self::Name => Self::Episodes,
            Self::Episodes => Self::Submit,
            Self::Submit => Self::Name,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Name => Self::Submit,
            Self::Episodes => Self::Name,
            Self::Submit => Self::Episodes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    Pending,
    Cancelled,
    Submitted(NewSeries),
}

/// Modal form for adding a series to the list it was opened from.
#[derive(Debug, Clone)]
pub struct AddSeriesDialog {
    pub category: Category,
    pub name: Prompt,
    pub episodes: Prompt,
    pub focus: DialogField,
    /// Validation message from the last rejected submit.
    pub error: Option<String>,
}

impl AddSeriesDialog {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            name: Prompt::text("Name").with_max_len(MAX_NAME_LEN),
            episodes: Prompt::integer("Episodes"),
            focus: DialogField::Name,
            error: None,
        }
    }

    pub fn handle_key(&mut self, key: Key) -> DialogOutcome {
        match key {
            Key::Esc => return DialogOutcome::Cancelled,
            Key::Tab | Key::Down => self.focus = self.focus.next(),
            Key::BackTab | Key::Up => self.focus = self.focus.prev(),
            _ => return self.handle_field_key(key),
        }
        DialogOutcome::Pending
    }

    fn handle_field_key(&mut self, key: Key) -> DialogOutcome {
        match self.focus {
            DialogField::Submit => match key {
                Key::Enter | Key::Char(' ') => self.submit(),
                _ => DialogOutcome::Pending,
            },
            DialogField::Name => {
                if let PromptOutcome::Submitted(_) = self.name.handle_key(key) {
                    self.focus = DialogField::Episodes;
                }
                DialogOutcome::Pending
            }
            DialogField::Episodes => match self.episodes.handle_key(key) {
                PromptOutcome::Submitted(_) => self.submit(),
                _ => DialogOutcome::Pending,
            },
        }
    }

    fn submit(&mut self) -> DialogOutcome {
        let episodes = if self.episodes.buffer.trim().is_empty() {
            1
        } else {
            parse_count(&self.episodes.buffer).min(u64::from(u32::MAX)) as u32
        };
        match NewSeries::for_category(self.category, &self.name.buffer, episodes) {
            Ok(new) => DialogOutcome::Submitted(new),
            Err(e) => {
                self.error = Some(e.to_string());
                self.focus = DialogField::Name;
                DialogOutcome::Pending
            }
        }
    }
}
