//! View rendering

mod dashboard;
mod dialogs;

pub use dashboard::render_dashboard;
pub use dialogs::{render_loading_indicator, render_prompt};
