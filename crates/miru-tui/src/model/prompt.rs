use miru_core::{Key, name_len};

/// Which characters a prompt accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Text,
    /// ASCII digits only.
    Integer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    Editing,
    Submitted(String),
    Cancelled,
}

/// A single-line editor with a label, used by footer prompts and dialog fields.
#[derive(Debug, Clone)]
pub struct Prompt {
    pub label: String,
    pub kind: PromptKind,
    pub buffer: String,
    /// Byte offset into `buffer`, always on a char boundary.
    pub cursor: usize,
    /// Input cap in UTF-16 code units, the unit the `name` column uses.
    pub max_len: Option<usize>,
}

impl Prompt {
    pub fn text(label: impl Into<String>) -> Self {
        Self::new(label.into(), PromptKind::Text)
    }

    pub fn integer(label: impl Into<String>) -> Self {
        Self::new(label.into(), PromptKind::Integer)
    }

    fn new(label: String, kind: PromptKind) -> Self {
        Self {
            label,
            kind,
            buffer: String::new(),
            cursor: 0,
            max_len: None,
        }
    }

    pub fn with_max_len(mut self, max: usize) -> Self {
        self.max_len = Some(max);
        self
    }

    /// Number of characters before the cursor (for placing the terminal cursor).
    pub fn cursor_column(&self) -> usize {
        self.buffer[..self.cursor].chars().count()
    }

    pub fn handle_key(&mut self, key: Key) -> PromptOutcome {
        match key {
            Key::Enter => return PromptOutcome::Submitted(self.buffer.clone()),
            Key::Esc => return PromptOutcome::Cancelled,
            Key::Backspace => {
                if self.cursor > 0 {
                    let prev = self.prev_boundary();
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                }
            }
            Key::Left => self.cursor = self.prev_boundary(),
            Key::Right => {
                if self.cursor < self.buffer.len() {
                    self.cursor += self.buffer[self.cursor..]
                        .chars()
                        .next()
                        .map(|c| c.len_utf8())
                        .unwrap_or(0);
                }
            }
            Key::Home => self.cursor = 0,
            Key::End => self.cursor = self.buffer.len(),
            Key::Char(c) => self.insert(c),
            _ => {}
        }
        PromptOutcome::Editing
    }

    fn insert(&mut self, c: char) {
        if c.is_control() || (self.kind == PromptKind::Integer && !c.is_ascii_digit()) {
            return;
        }
        if let Some(max) = self.max_len
            && name_len(&self.buffer) + c.len_utf16() > max
        {
            return;
        }
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

/// Lenient count parsing for numeric prompts: empty or non-numeric input is 0,
/// oversized input saturates.
pub fn parse_count(text: &str) -> u64 {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    trimmed.parse().unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(prompt: &mut Prompt, s: &str) {
        for c in s.chars() {
            prompt.handle_key(Key::Char(c));
        }
    }

    #[test]
    fn enter_submits_buffer() {
        let mut p = Prompt::text("Delete?");
        type_str(&mut p, "y");
        assert_eq!(p.handle_key(Key::Enter), PromptOutcome::Submitted("y".into()));
    }

    #[test]
    fn esc_cancels() {
        let mut p = Prompt::text("Delete?");
        type_str(&mut p, "yes");
        assert_eq!(p.handle_key(Key::Esc), PromptOutcome::Cancelled);
    }

    #[test]
    fn integer_prompt_ignores_non_digits() {
        let mut p = Prompt::integer("Seen");
        type_str(&mut p, "1a2-b3");
        assert_eq!(p.buffer, "123");
    }

    #[test]
    fn cursor_editing_handles_multibyte() {
        let mut p = Prompt::text("Name");
        type_str(&mut p, "añb");
        p.handle_key(Key::Left);
        p.handle_key(Key::Backspace);
        assert_eq!(p.buffer, "ab");
        assert_eq!(p.cursor_column(), 1);
        p.handle_key(Key::Home);
        p.handle_key(Key::Char('>'));
        p.handle_key(Key::End);
        p.handle_key(Key::Char('<'));
        assert_eq!(p.buffer, ">ab<");
    }

    #[test]
    fn max_len_is_enforced() {
        let mut p = Prompt::text("Name").with_max_len(3);
        type_str(&mut p, "abcdef");
        assert_eq!(p.buffer, "abc");
    }

    #[test]
    fn max_len_counts_utf16_units() {
        let mut p = Prompt::text("Name").with_max_len(3);
        type_str(&mut p, "a\u{1F4FA}\u{1F4FA}");
        assert_eq!(p.buffer, "a\u{1F4FA}");
        type_str(&mut p, "b");
        assert_eq!(p.buffer, "a\u{1F4FA}");
    }

    #[test]
    fn parse_count_is_lenient() {
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count(" 12 "), 12);
        assert_eq!(parse_count("-3"), 0);
        assert_eq!(parse_count("99999999999999999999999"), u64::MAX);
    }
}
