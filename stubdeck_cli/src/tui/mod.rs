//! Terminal User Interface for the mapping console

mod app;
mod ui;

pub use app::{TuiApp, TuiEvent};
pub use ui::draw;
