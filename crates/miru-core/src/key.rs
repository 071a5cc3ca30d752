/// A keystroke (or wheel step) as seen by the controllers.
///
/// The terminal layer translates raw input into these; everything below it
/// only matches on symbolic names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    ScrollUp,
    ScrollDown,
}
