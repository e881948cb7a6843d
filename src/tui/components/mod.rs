//! TUI components

mod help;
mod month;
mod text_input;

pub use help::HelpOverlay;
pub use month::{MonthView, MONTH_HEIGHT};
pub use text_input::render_text_field;
