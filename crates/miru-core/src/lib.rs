//! Core of the miru episode tracker.
//!
//! Holds the [`Series`] entity, the five status [`Category`] filters, the
//! [`SeriesStore`] contract with its SQLite implementation, and the two
//! pieces of interactive state that sit on top of the store: the per-row
//! [`Entry`] controller and the per-view [`Walker`] projection.
//!
//! Nothing in here knows about terminals. Keystrokes arrive as symbolic
//! [`Key`] values and structural changes leave as typed events.

mod category;
mod entry;
mod key;
mod series;
mod store;
mod walker;

use thiserror::Error;

pub use category::{Category, OrderField};
pub use entry::{Entry, EntryState, Handled, RowEvent};
pub use key::Key;
pub use series::{MAX_NAME_LEN, NewSeries, Series, SeriesId, Status, name_len, validate_name};
pub use store::{SeriesStore, SqliteStore};
pub use walker::{Walker, WalkerEvent};

#[derive(Error, Debug)]
pub enum MiruError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("series {0} does not exist")]
    NotFound(SeriesId),
    #[error("invalid series name: {0}")]
    InvalidName(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MiruError>;
