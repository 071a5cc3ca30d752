//! Per-row controller: turns keys on the focused row into mutations or requests.

use crate::key::Key;
use crate::series::{Series, SeriesId, Status};
use crate::store::SeriesStore;
use crate::{MiruError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryState {
    #[default]
    Normal,
    /// `m` was pressed; the next key picks a status.
    MarkingStatus,
}

/// What a row reports after handling a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowEvent {
    Advanced,
    Retreated,
    StatusChanged(Option<Status>),
    MarkingStarted,
    MarkingEnded,
    DeleteRequested(SeriesId),
    SetSeenRequested(SeriesId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handled {
    /// Not a row key; the caller should try the next handler.
    Ignored,
    Consumed(Vec<RowEvent>),
}

/// One row of a list: the series value fetched at the last reload plus the
/// row's own marking state.
#[derive(Debug, Clone)]
pub struct Entry {
    series: Series,
    state: EntryState,
}

impl Entry {
    pub fn new(series: Series) -> Self {
        Self {
            series,
            state: EntryState::Normal,
        }
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn id(&self) -> SeriesId {
        self.series.id
    }

    pub fn state(&self) -> EntryState {
        self.state
    }

    pub fn handle_key(&mut self, key: Key, store: &dyn SeriesStore) -> Result<Handled> {
        if self.state == EntryState::MarkingStatus {
            return self.handle_marking(key, store).map(Handled::Consumed);
        }

        let event = match key {
            Key::Char('i') => {
                self.mutate(store, Series::advance)?;
                RowEvent::Advanced
            }
            Key::Char('d') => {
                self.mutate(store, Series::retreat)?;
                RowEvent::Retreated
            }
            Key::Char('m') => {
                self.state = EntryState::MarkingStatus;
                RowEvent::MarkingStarted
            }
            Key::Char('s') => RowEvent::SetSeenRequested(self.id()),
            Key::Char('x') => RowEvent::DeleteRequested(self.id()),
            _ => return Ok(Handled::Ignored),
        };
        Ok(Handled::Consumed(vec![event]))
    }

    /// Marking consumes exactly one key, whatever it is.
    fn handle_marking(&mut self, key: Key, store: &dyn SeriesStore) -> Result<Vec<RowEvent>> {
        self.state = EntryState::Normal;
        let mut events = vec![RowEvent::MarkingEnded];

        let status = match key {
            Key::Char(c) => Status::from_marking_key(c),
            _ => None,
        };
        if let Some(status) = status {
            self.mutate(store, |s| {
                s.status = status;
                true
            })?;
            events.push(RowEvent::StatusChanged(status));
        }
        Ok(events)
    }

    /// Re-read the row, apply `op`, and write it back if it changed anything.
    fn mutate(&mut self, store: &dyn SeriesStore, op: impl FnOnce(&mut Series) -> bool) -> Result<()> {
        let mut fresh = store
            .get(self.series.id)?
            .ok_or(MiruError::NotFound(self.series.id))?;
        if op(&mut fresh) {
            store.update(&fresh)?;
            tracing::debug!(
                id = %fresh.id,
                seen = fresh.seen,
                category = fresh.category().title(),
                "row updated"
            );
        }
        self.series = fresh;
        Ok(())
    }
}
