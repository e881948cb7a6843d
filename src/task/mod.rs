//! Task model and the queries shells run over it
//!
//! - `model`: the persisted record and creation parameters
//! - `input`: validation of free-text input at the shell boundary
//! - `filter`: list filtering and calendar markers

pub mod filter;
pub mod input;
pub mod model;

pub use filter::{due_markers, DayMarker, StatusFilter, TaskFilter};
pub use model::{NewTask, Priority, Task, DATE_FORMAT, DEFAULT_CATEGORY};
