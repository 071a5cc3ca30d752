use miru_core::{
    Category, Key, MiruError, OrderField, Series, SeriesStore, Walker, WalkerEvent,
};

use super::prompt::{Prompt, PromptOutcome, parse_count};

/// What a footer input prompt is asking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptPurpose {
    ConfirmDelete(Series),
    SetSeen(Series),
}

/// Footer content of a view. Everything but `Totals` is a transient modal.
#[derive(Debug, Clone)]
pub enum Footer {
    Totals,
    MarkingPrompt,
    OrderByPrompt,
    Input {
        prompt: Prompt,
        purpose: PromptPurpose,
    },
}

/// Result of offering a key to a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewOutcome {
    Consumed,
    /// Not a view key; the app gets a chance at it.
    Ignored(Key),
    OrderingChanged(OrderField),
}

/// One status-filtered list: its projection plus footer modal state.
#[derive(Debug)]
pub struct SeriesView {
    pub walker: Walker,
    pub footer: Footer,
    /// Total seen episodes, refreshed whenever the footer returns to totals.
    pub total_seen: u64,
    /// Rows per page for PageUp/PageDown, updated by the renderer.
    pub page_size: usize,
}

impl SeriesView {
    pub fn new(category: Category, order_by: OrderField) -> Self {
        Self {
            walker: Walker::new(category, order_by),
            footer: Footer::Totals,
            total_seen: 0,
            page_size: 10,
        }
    }

    pub fn category(&self) -> Category {
        self.walker.category()
    }

    pub fn title(&self) -> &'static str {
        self.category().title()
    }

    /// Re-query the list and reset the footer.
    pub fn reload(&mut self, store: &dyn SeriesStore) -> miru_core::Result<()> {
        self.walker.reload(store)?;
        self.redraw_footer(store)
    }

    /// Used for the next reload; does not reload by itself.
    pub fn set_ordering(&mut self, field: OrderField) {
        self.walker.set_order_by(field);
    }

    fn redraw_footer(&mut self, store: &dyn SeriesStore) -> miru_core::Result<()> {
        self.footer = Footer::Totals;
        self.total_seen = self.walker.total_seen_episodes(store)?;
        Ok(())
    }

    pub fn handle_key(
        &mut self,
        key: Key,
        store: &dyn SeriesStore,
    ) -> miru_core::Result<ViewOutcome> {
        match &mut self.footer {
            Footer::Input { prompt, purpose } => {
                let outcome = prompt.handle_key(key);
                let purpose = purpose.clone();
                match outcome {
                    PromptOutcome::Editing => {}
                    PromptOutcome::Cancelled => self.redraw_footer(store)?,
                    PromptOutcome::Submitted(text) => match purpose {
                        PromptPurpose::ConfirmDelete(series) => {
                            self.confirm_delete(store, &series, &text)?
                        }
                        PromptPurpose::SetSeen(series) => {
                            self.apply_set_seen(store, &series, &text)?
                        }
                    },
                }
                return Ok(ViewOutcome::Consumed);
            }
            Footer::OrderByPrompt => {
                // Any key closes the prompt; unrecognized ones continue upward.
                self.redraw_footer(store)?;
                let field = match key {
                    Key::Char(c) => OrderField::from_key(c),
                    _ => None,
                };
                return Ok(match field {
                    Some(field) => ViewOutcome::OrderingChanged(field),
                    None => ViewOutcome::Ignored(key),
                });
            }
            // The marking row owns the next key.
            Footer::MarkingPrompt => {}
            Footer::Totals => {
                if key == Key::Char('o') {
                    self.footer = Footer::OrderByPrompt;
                    return Ok(ViewOutcome::Consumed);
                }
            }
        }

        match self.walker.handle_key(key, store)? {
            Some(events) => {
                for event in events {
                    self.on_walker_event(event, store)?;
                }
                Ok(ViewOutcome::Consumed)
            }
            None => Ok(self.navigate(key)),
        }
    }

    fn on_walker_event(
        &mut self,
        event: WalkerEvent,
        store: &dyn SeriesStore,
    ) -> miru_core::Result<()> {
        match event {
            WalkerEvent::SeriesChanged | WalkerEvent::MarkingDeactivated => {
                self.redraw_footer(store)?
            }
            WalkerEvent::MarkingActivated => self.footer = Footer::MarkingPrompt,
            WalkerEvent::DeletionRequested(series) => {
                self.footer = Footer::Input {
                    prompt: Prompt::text(format!(
                        "Do you really want to delete \"{}\" [y/N]?: ",
                        series.name
                    )),
                    purpose: PromptPurpose::ConfirmDelete(series),
                };
            }
            WalkerEvent::SettingSeenRequested(series) => {
                self.footer = Footer::Input {
                    prompt: Prompt::integer(format!(
                        "Set the number of seen episodes for \"{}\": ",
                        series.name
                    )),
                    purpose: PromptPurpose::SetSeen(series),
                };
            }
        }
        Ok(())
    }

    /// Delete `series` if `answer` is a (case-insensitive) "y"; otherwise
    /// just close the prompt.
    pub fn confirm_delete(
        &mut self,
        store: &dyn SeriesStore,
        series: &Series,
        answer: &str,
    ) -> miru_core::Result<()> {
        if answer.trim().eq_ignore_ascii_case("y") {
            store.delete(series.id)?;
            tracing::info!(id = %series.id, name = %series.name, "deleted series");
            self.reload(store)
        } else {
            self.redraw_footer(store)
        }
    }

    /// Set the seen count from prompt text, clamped to the episode count.
    pub fn apply_set_seen(
        &mut self,
        store: &dyn SeriesStore,
        series: &Series,
        text: &str,
    ) -> miru_core::Result<()> {
        let mut fresh = store
            .get(series.id)?
            .ok_or(MiruError::NotFound(series.id))?;
        fresh.set_seen(parse_count(text));
        store.update(&fresh)?;
        self.reload(store)
    }

    /// Vim-style list movement for keys no row claimed.
    fn navigate(&mut self, key: Key) -> ViewOutcome {
        let Some(focus) = self.walker.focus_index() else {
            return ViewOutcome::Ignored(key);
        };
        let last = self.walker.len() - 1;
        let target = match key {
            Key::Char('j') | Key::Down | Key::ScrollDown => self.walker.next(focus).map(|(_, i)| i),
            Key::Char('k') | Key::Up | Key::ScrollUp => self.walker.prev(focus).map(|(_, i)| i),
            Key::PageDown => Some((focus + self.page_size.max(1)).min(last)),
            Key::PageUp => Some(focus.saturating_sub(self.page_size.max(1))),
            Key::Home => Some(0),
            Key::End => Some(last),
            _ => return ViewOutcome::Ignored(key),
        };
        if let Some(index) = target {
            self.walker.set_focus(index);
        }
        ViewOutcome::Consumed
    }
}
