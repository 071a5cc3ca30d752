//! Terminal-independent UI state: footer prompts, per-category views and the
//! add-series dialog. Rendering lives in [`crate::view`].

pub mod add_dialog;
pub mod prompt;
pub mod series_view;
