//! CLI command implementations

pub mod add;
pub mod calendar;
pub mod definition;
pub mod list;
pub mod remove;
pub mod stats;
pub mod toggle;
pub mod transfer;

pub use definition::{Cli, Commands};

use anyhow::{bail, Result};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::store::TaskStore;

/// Map a 1-based task number from the command line to a store index.
pub fn resolve_number(number: usize, store: &TaskStore) -> Result<usize> {
    if number == 0 || number > store.len() {
        bail!(
            "No task #{} (the list has {} task{})",
            number,
            store.len(),
            if store.len() == 1 { "" } else { "s" }
        );
    }
    Ok(number - 1)
}

/// Cut `s` to at most `max` display columns, marking the cut with "...".
pub fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max <= 3 {
        return take_columns(s, max);
    }
    format!("{}...", take_columns(s, max - 3))
}

/// Left-align `s` in `width` display columns.
pub fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(fill))
}

fn take_columns(s: &str, max: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}
