//! List projection: the ordered, filtered snapshot behind one view.
//!
//! The store is the source of truth. A [`Walker`] caches the rows matching its
//! category, rebuilds that cache wholesale on every [`reload`](Walker::reload),
//! and keeps a focus cursor into it. Keys for the focused row are forwarded to
//! its [`Entry`]; whatever the row reports comes back up as a [`WalkerEvent`],
//! with committed mutations already followed by a reload.

use crate::Result;
use crate::category::{Category, OrderField};
use crate::entry::{Entry, Handled, RowEvent};
use crate::key::Key;
use crate::series::Series;
use crate::store::SeriesStore;

/// Structural notifications for the owning view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkerEvent {
    /// The snapshot was rebuilt.
    SeriesChanged,
    MarkingActivated,
    MarkingDeactivated,
    DeletionRequested(Series),
    SettingSeenRequested(Series),
}

#[derive(Debug)]
pub struct Walker {
    category: Category,
    order_by: OrderField,
    entries: Vec<Entry>,
    focus: usize,
}

impl Walker {
    /// An empty walker; call [`reload`](Self::reload) to fill it.
    pub fn new(category: Category, order_by: OrderField) -> Self {
        Self {
            category,
            order_by,
            entries: Vec::new(),
            focus: 0,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn order_by(&self) -> OrderField {
        self.order_by
    }

    /// Takes effect on the next reload.
    pub fn set_order_by(&mut self, order_by: OrderField) {
        self.order_by = order_by;
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Re-query the store and replace the snapshot, clamping the cursor.
    pub fn reload(&mut self, store: &dyn SeriesStore) -> Result<WalkerEvent> {
        self.entries = store
            .query(self.category, self.order_by)?
            .into_iter()
            .map(Entry::new)
            .collect();
        if self.focus >= self.entries.len() {
            self.focus = self.entries.len().saturating_sub(1);
        }
        tracing::debug!(
            category = self.category.title(),
            order_by = self.order_by.label(),
            rows = self.entries.len(),
            "reloaded list"
        );
        Ok(WalkerEvent::SeriesChanged)
    }

    /// Cursor position, or `None` while the list is empty.
    pub fn focus_index(&self) -> Option<usize> {
        let last = self.entries.len().checked_sub(1)?;
        Some(self.focus.min(last))
    }

    pub fn focus(&self) -> Option<(&Entry, usize)> {
        let index = self.focus_index()?;
        Some((&self.entries[index], index))
    }

    pub fn next(&self, position: usize) -> Option<(&Entry, usize)> {
        let next = position.checked_add(1)?;
        self.entries.get(next).map(|entry| (entry, next))
    }

    pub fn prev(&self, position: usize) -> Option<(&Entry, usize)> {
        let prev = position.checked_sub(1)?;
        self.entries.get(prev).map(|entry| (entry, prev))
    }

    pub fn set_focus(&mut self, position: usize) {
        self.focus = position;
    }

    /// Store-computed sum of `seen` over the whole category, independent of
    /// the cached snapshot.
    pub fn total_seen_episodes(&self, store: &dyn SeriesStore) -> Result<u64> {
        store.sum_seen(self.category)
    }

    /// Forward `key` to the focused row.
    ///
    /// Returns `None` when there is no row or the row does not want the key.
    pub fn handle_key(
        &mut self,
        key: Key,
        store: &dyn SeriesStore,
    ) -> Result<Option<Vec<WalkerEvent>>> {
        let Some(index) = self.focus_index() else {
            return Ok(None);
        };
        let events = match self.entries[index].handle_key(key, store)? {
            Handled::Ignored => return Ok(None),
            Handled::Consumed(events) => events,
        };

        // Requests name the series as it was when the key arrived.
        let series = self.entries[index].series().clone();
        let mut relayed = Vec::with_capacity(events.len());
        for event in events {
            relayed.push(match event {
                RowEvent::Advanced | RowEvent::Retreated | RowEvent::StatusChanged(_) => {
                    self.reload(store)?
                }
                RowEvent::MarkingStarted => WalkerEvent::MarkingActivated,
                RowEvent::MarkingEnded => WalkerEvent::MarkingDeactivated,
                RowEvent::DeleteRequested(_) => WalkerEvent::DeletionRequested(series.clone()),
                RowEvent::SetSeenRequested(_) => {
                    WalkerEvent::SettingSeenRequested(series.clone())
                }
            });
        }
        Ok(Some(relayed))
    }
}
