//! Daybook library - task store, model, and the CLI/TUI shells over it

pub mod calendar;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod store;
pub mod task;
pub mod tui;

pub use store::{LoadStatus, Stats, TaskStore};
pub use task::{NewTask, Priority, Task};
