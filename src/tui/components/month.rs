//! Month calendar component with due-date markers

use chrono::{Datelike, NaiveDate};
use ratatui::prelude::*;
use ratatui::widgets::*;
use std::collections::BTreeMap;

use crate::calendar::{MonthGrid, WEEKDAY_HEADER};
use crate::task::DayMarker;
use crate::tui::styles::Theme;

/// Rows needed to draw any month: title, header, up to six weeks.
pub const MONTH_HEIGHT: u16 = 8;

pub struct MonthView<'a> {
    pub selected: NaiveDate,
    pub today: NaiveDate,
    pub markers: &'a BTreeMap<u32, DayMarker>,
}

impl MonthView<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let grid = MonthGrid::containing(self.selected);
        let mut lines = vec![
            Line::from(Span::styled(
                grid.title(),
                Style::default().fg(theme.title).bold(),
            ))
            .alignment(Alignment::Center),
            Line::from(
                WEEKDAY_HEADER
                    .iter()
                    .map(|d| Span::styled(format!(" {} ", d), Style::default().fg(theme.dimmed)))
                    .collect::<Vec<_>>(),
            ),
        ];

        for week in &grid.weeks {
            let spans: Vec<Span> = week
                .iter()
                .map(|cell| match cell {
                    None => Span::raw("    "),
                    Some(day) => {
                        let (text, style) = self.day_cell(*day, &grid, theme);
                        Span::styled(text, style)
                    }
                })
                .collect();
            lines.push(Line::from(spans));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn day_cell(&self, day: u32, grid: &MonthGrid, theme: &Theme) -> (String, Style) {
        let marker = self.markers.get(&day);
        let mark = match marker {
            Some(DayMarker::Pending) => '•',
            Some(DayMarker::Done) => '✓',
            None => ' ',
        };

        let mut style = match marker {
            Some(DayMarker::Pending) => Style::default().fg(theme.due_pending),
            Some(DayMarker::Done) => Style::default().fg(theme.due_done),
            None => Style::default().fg(theme.text),
        };

        let is_today = self.today.year() == grid.year
            && self.today.month() == grid.month
            && self.today.day() == day;
        if is_today {
            style = style.fg(theme.today).bold();
        }
        if self.selected.day() == day {
            style = style.bg(theme.selection).reversed();
        }

        (format!("{:>3}{}", day, mark), style)
    }
}
