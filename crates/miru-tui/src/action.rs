use miru_core::Key;

/// What the event loop hands to [`App::update`](crate::app::App::update).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Key(Key),
    Quit,
    Resize(u16, u16),
    None,
}
