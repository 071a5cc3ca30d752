mod update;

#[cfg(test)]
mod tests;

use miru_core::{Category, OrderField, SeriesStore};

use crate::model::add_dialog::AddSeriesDialog;
use crate::model::series_view::SeriesView;
use crate::theme::Theme;

/// Main controller: the five category views, the active index, and the
/// modal overlays drawn on top of them.
pub struct App {
    pub store: Box<dyn SeriesStore>,
    pub views: Vec<SeriesView>,
    pub current: usize,
    pub dialog: Option<AddSeriesDialog>,
    pub theme: Theme,
    pub show_help: bool,
    pub should_quit: bool,
    /// Window title to emit before the next draw.
    pub pending_title: Option<String>,
}

impl App {
    /// Build one view per category and display the first.
    pub fn new(
        store: Box<dyn SeriesStore>,
        theme: Theme,
        order_by: OrderField,
    ) -> miru_core::Result<Self> {
        let views = Category::ALL
            .into_iter()
            .map(|category| SeriesView::new(category, order_by))
            .collect();
        let mut app = Self {
            store,
            views,
            current: 0,
            dialog: None,
            theme,
            show_help: false,
            should_quit: false,
            pending_title: None,
        };
        app.display_view(0)?;
        Ok(app)
    }

    pub fn current_view(&self) -> &SeriesView {
        &self.views[self.current]
    }

    /// Make `index` the active view, reloading it from the store.
    pub fn display_view(&mut self, index: usize) -> miru_core::Result<()> {
        self.current = index;
        let view = &mut self.views[index];
        view.reload(self.store.as_ref())?;
        self.pending_title = Some(format!("Miru - {}", view.title()));
        tracing::info!(view = view.title(), rows = view.walker.len(), "displaying view");
        Ok(())
    }

    pub fn take_pending_title(&mut self) -> Option<String> {
        self.pending_title.take()
    }

    pub fn view(&mut self, f: &mut ratatui::Frame) {
        let area = f.area();
        crate::view::series::render(f, area, &mut self.views[self.current], &self.theme);

        if let Some(dialog) = &self.dialog {
            crate::view::add_dialog::render(f, dialog, &self.theme);
        }
        if self.show_help {
            crate::view::help::render(f, &self.theme);
        }
    }
}
