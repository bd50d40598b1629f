//! Terminal front-end: co-pilot, party chat and campaign panes in one screen.

pub mod app;
pub mod events;
pub mod theme;
pub mod views;
pub mod widgets;

pub use app::AppState;
pub use events::{AppEvent, Focus};
