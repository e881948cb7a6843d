//! Help overlay component

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::styles::Theme;

const DIALOG_WIDTH: u16 = 50;
const DIALOG_HEIGHT: u16 = 28;
#[cfg(test)]
const BORDER_HEIGHT: u16 = 2;
#[cfg(test)]
const BORDER_WIDTH: u16 = 2;
#[cfg(test)]
const KEY_COLUMN_WIDTH: usize = 12; // 2 spaces indent + 10 chars for key

fn shortcuts() -> Vec<(&'static str, Vec<(&'static str, &'static str)>)> {
    vec![
        (
            "Tasks",
            vec![
                ("j/↓", "Move down"),
                ("k/↑", "Move up"),
                ("g/G", "Go to top / bottom"),
                ("Spc/Enter", "Toggle done"),
                ("n", "New task"),
                ("d", "Delete task"),
            ],
        ),
        (
            "Calendar",
            vec![
                ("h/l", "Previous / next day"),
                ("H/L", "Previous / next month"),
                ("t", "Jump to today"),
                ("f", "Filter list by selected day"),
            ],
        ),
        (
            "Other",
            vec![
                ("/", "Search"),
                ("Esc", "Clear search"),
                ("b", "Back up task file"),
                ("?", "Toggle help"),
                ("q", "Quit"),
            ],
        ),
    ]
}

#[cfg(test)]
fn content_line_count() -> usize {
    let mut count = 0;
    for (_, keys) in shortcuts() {
        count += 1; // section header
        count += keys.len(); // shortcut lines
        count += 1; // empty line after section
    }
    count
}

pub struct HelpOverlay;

impl HelpOverlay {
    pub fn render(frame: &mut Frame, area: Rect, theme: &Theme) {
        let dialog_area = crate::tui::dialogs::centered_rect(area, DIALOG_WIDTH, DIALOG_HEIGHT);

        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .style(Style::default().bg(theme.background))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" Keyboard Shortcuts ")
            .title_style(Style::default().fg(theme.title).bold());

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let mut lines: Vec<Line> = Vec::new();

        for (section, keys) in shortcuts() {
            lines.push(Line::from(Span::styled(
                section,
                Style::default().fg(theme.accent).bold(),
            )));
            for (key, desc) in keys {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:10}", key), Style::default().fg(theme.hint)),
                    Span::styled(desc, Style::default().fg(theme.text)),
                ]));
            }
            lines.push(Line::from(""));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
