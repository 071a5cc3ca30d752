use miru_core::{Key, OrderField};

use super::App;
use crate::action::Action;
use crate::model::add_dialog::{AddSeriesDialog, DialogOutcome};
use crate::model::series_view::ViewOutcome;

impl App {
    /// Process a user action and update state. Returns true if the app should quit.
    pub fn update(&mut self, action: Action) -> miru_core::Result<bool> {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Key(key) => self.handle_key(key)?,
            Action::Resize(..) | Action::None => {}
        }
        Ok(self.should_quit)
    }

    fn handle_key(&mut self, key: Key) -> miru_core::Result<()> {
        if self.show_help {
            self.show_help = false;
            return Ok(());
        }

        if let Some(dialog) = &mut self.dialog {
            match dialog.handle_key(key) {
                DialogOutcome::Pending => {}
                DialogOutcome::Cancelled => self.dialog = None,
                DialogOutcome::Submitted(new) => {
                    let id = self.store.insert(&new)?;
                    tracing::info!(%id, name = %new.name, episodes = new.episodes, "added series");
                    self.dialog = None;
                    self.display_view(self.current)?;
                }
            }
            return Ok(());
        }

        let view = &mut self.views[self.current];
        match view.handle_key(key, self.store.as_ref())? {
            ViewOutcome::Consumed => Ok(()),
            ViewOutcome::OrderingChanged(field) => self.ordering_changed(field),
            ViewOutcome::Ignored(key) => self.handle_global_key(key),
        }
    }

    fn handle_global_key(&mut self, key: Key) -> miru_core::Result<()> {
        let count = self.views.len();
        match key {
            Key::Char('q') | Key::Char('Q') => self.should_quit = true,
            Key::Char('h') | Key::Left => self.display_view((self.current + count - 1) % count)?,
            Key::Char('l') | Key::Right => self.display_view((self.current + 1) % count)?,
            Key::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if index < count {
                    self.display_view(index)?;
                }
            }
            Key::Char('a') => {
                self.dialog = Some(AddSeriesDialog::new(self.current_view().category()));
            }
            Key::Char('?') => self.show_help = true,
            _ => {}
        }
        Ok(())
    }

    /// Every view adopts the new ordering; only the visible one reloads now.
    fn ordering_changed(&mut self, field: OrderField) -> miru_core::Result<()> {
        for view in &mut self.views {
            view.set_ordering(field);
        }
        tracing::info!(order_by = field.label(), "ordering changed");
        self.views[self.current].reload(self.store.as_ref())
    }
}
