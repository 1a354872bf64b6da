// src/ports/mod.rs
pub mod confirm;
pub mod html;
pub mod list_view;

pub use confirm::{AssumeYes, ConfirmPrompt, LinePrompt};
pub use html::HtmlPresenter;
pub use list_view::{Gesture, ListRow, ListView, ViewCallbacks};
