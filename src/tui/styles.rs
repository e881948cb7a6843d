//! TUI theme and styling

use ratatui::style::Color;

use crate::task::Priority;

#[derive(Debug, Clone)]
pub struct Theme {
    // Background and borders
    pub background: Color,
    pub border: Color,
    pub selection: Color,
    pub status_bar: Color,

    // Text colors
    pub title: Color,
    pub text: Color,
    pub dimmed: Color,
    pub hint: Color,

    // Task colors
    pub high: Color,
    pub low: Color,
    pub done: Color,
    pub overdue: Color,

    // Calendar
    pub today: Color,
    pub due_pending: Color,
    pub due_done: Color,

    // UI elements
    pub error: Color,
    pub search: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::paper()
    }
}

impl Theme {
    pub fn paper() -> Self {
        Self {
            background: Color::Rgb(24, 22, 20),
            border: Color::Rgb(90, 80, 68),
            selection: Color::Rgb(58, 52, 44),
            status_bar: Color::Rgb(36, 33, 30),

            title: Color::Rgb(240, 200, 120),
            text: Color::Rgb(230, 222, 208),
            dimmed: Color::Rgb(130, 120, 108),
            hint: Color::Rgb(170, 160, 140),

            high: Color::Rgb(255, 120, 90),
            low: Color::Rgb(140, 170, 200),
            done: Color::Rgb(110, 150, 110),
            overdue: Color::Rgb(255, 90, 90),

            today: Color::Rgb(240, 200, 120),
            due_pending: Color::Rgb(255, 170, 60),
            due_done: Color::Rgb(110, 150, 110),

            error: Color::Rgb(255, 100, 80),
            search: Color::Rgb(250, 230, 170),
            accent: Color::Rgb(240, 200, 120),
        }
    }

    pub fn priority(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.high,
            Priority::Normal => self.text,
            Priority::Low => self.low,
        }
    }
}
