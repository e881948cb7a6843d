//! Home view - task list, calendar and status line

mod operations;
#[cfg(test)]
mod tests;

use chrono::{Datelike, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;
use std::collections::BTreeMap;

use super::app::Action;
use super::components::{HelpOverlay, MonthView, MONTH_HEIGHT};
use super::dialogs::{ConfirmDialog, DialogResult, NewTaskDialog};
use super::styles::Theme;
use crate::calendar::shift_months;
use crate::store::TaskStore;
use crate::task::{due_markers, DayMarker, Task, TaskFilter, DATE_FORMAT, DEFAULT_CATEGORY};

/// Width of the calendar column, borders included
const CALENDAR_WIDTH: u16 = 32;

struct StatusMessage {
    text: String,
    is_error: bool,
}

pub struct HomeView {
    store: TaskStore,
    /// Store indices of the rows currently shown, in list order
    rows: Vec<usize>,
    markers: BTreeMap<u32, DayMarker>,
    seen_revision: u64,

    // UI state
    cursor: usize,
    today: NaiveDate,
    selected_date: NaiveDate,
    date_filter: bool,

    // Dialogs
    show_help: bool,
    new_dialog: Option<NewTaskDialog>,
    confirm_dialog: Option<ConfirmDialog<usize>>,

    // Search
    search_active: bool,
    search_query: String,

    message: Option<StatusMessage>,
}

impl HomeView {
    pub fn new(store: TaskStore, today: NaiveDate) -> Self {
        let mut view = Self {
            seen_revision: store.revision(),
            store,
            rows: Vec::new(),
            markers: BTreeMap::new(),
            cursor: 0,
            today,
            selected_date: today,
            date_filter: false,
            show_help: false,
            new_dialog: None,
            confirm_dialog: None,
            search_active: false,
            search_query: String::new(),
            message: None,
        };
        view.rebuild();
        view
    }

    /// Returns true if the date changed. A selection left on the old day follows it.
    pub fn set_today(&mut self, today: NaiveDate) -> bool {
        if today == self.today {
            return false;
        }
        if self.selected_date == self.today {
            self.selected_date = today;
            self.rebuild();
        }
        self.today = today;
        true
    }

    /// Rebuild the visible rows if the store changed since the last draw.
    pub fn sync(&mut self) {
        if self.store.revision() != self.seen_revision {
            self.rebuild();
        }
    }

    fn filter(&self) -> TaskFilter {
        TaskFilter {
            due_on: self.date_filter.then_some(self.selected_date),
            query: (!self.search_query.is_empty()).then(|| self.search_query.clone()),
            ..Default::default()
        }
    }

    fn rebuild(&mut self) {
        let filter = self.filter();
        self.rows = filter
            .apply(self.store.list_all())
            .map(|(index, _)| index)
            .collect();
        self.markers = due_markers(
            self.store.list_all(),
            self.selected_date.year(),
            self.selected_date.month(),
        );
        self.seen_revision = self.store.revision();

        if self.cursor >= self.rows.len() {
            self.cursor = self.rows.len().saturating_sub(1);
        }
    }

    /// Store index of the highlighted row
    fn selected_index(&self) -> Option<usize> {
        self.rows.get(self.cursor).copied()
    }

    fn selected_task(&self) -> Option<&Task> {
        self.selected_index().and_then(|index| self.store.get(index))
    }

    fn set_message(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    fn set_error(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if self.show_help {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return None;
        }

        if let Some(dialog) = &mut self.new_dialog {
            match dialog.handle_key(key) {
                DialogResult::Continue => {}
                DialogResult::Cancel => {
                    self.new_dialog = None;
                }
                DialogResult::Submit(task) => {
                    self.new_dialog = None;
                    self.add_task(task);
                }
            }
            return None;
        }

        if let Some(dialog) = &mut self.confirm_dialog {
            match dialog.handle_key(key) {
                DialogResult::Continue => {}
                DialogResult::Cancel => {
                    self.confirm_dialog = None;
                }
                DialogResult::Submit(index) => {
                    self.confirm_dialog = None;
                    self.delete_task(index);
                }
            }
            return None;
        }

        if self.search_active {
            match key.code {
                KeyCode::Esc => {
                    self.search_active = false;
                    self.search_query.clear();
                    self.rebuild();
                }
                KeyCode::Enter => {
                    self.search_active = false;
                }
                KeyCode::Backspace => {
                    self.search_query.pop();
                    self.cursor = 0;
                    self.rebuild();
                }
                KeyCode::Char(c) => {
                    self.search_query.push(c);
                    self.cursor = 0;
                    self.rebuild();
                }
                _ => {}
            }
            return None;
        }

        match key.code {
            KeyCode::Char('q') => return Some(Action::Quit),
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Char('/') => {
                self.search_active = true;
            }
            KeyCode::Esc => {
                if !self.search_query.is_empty() {
                    self.search_query.clear();
                    self.rebuild();
                }
                self.message = None;
            }
            KeyCode::Char('n') => {
                let due = self.date_filter.then_some(self.selected_date);
                self.new_dialog = Some(NewTaskDialog::new(due));
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(index) = self.selected_index() {
                    let content = self
                        .store
                        .get(index)
                        .map(|task| task.content.clone())
                        .unwrap_or_default();
                    self.confirm_dialog = Some(ConfirmDialog::new(
                        "Delete Task",
                        format!("Delete \"{}\"?", content),
                        index,
                    ));
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(index) = self.selected_index() {
                    self.toggle_task(index);
                }
            }
            KeyCode::Char('b') => self.backup(),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::PageUp => self.move_cursor(-10),
            KeyCode::PageDown => self.move_cursor(10),
            KeyCode::Home | KeyCode::Char('g') => {
                self.cursor = 0;
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.cursor = self.rows.len().saturating_sub(1);
            }
            KeyCode::Left | KeyCode::Char('h') => self.shift_day(-1),
            KeyCode::Right | KeyCode::Char('l') => self.shift_day(1),
            KeyCode::Char('H') => self.select_date(shift_months(self.selected_date, -1)),
            KeyCode::Char('L') => self.select_date(shift_months(self.selected_date, 1)),
            KeyCode::Char('t') => self.select_date(self.today),
            KeyCode::Char('f') => {
                self.date_filter = !self.date_filter;
                self.cursor = 0;
                self.rebuild();
            }
            _ => {}
        }

        None
    }

    fn move_cursor(&mut self, delta: i32) {
        if self.rows.is_empty() {
            return;
        }

        self.cursor = if delta < 0 {
            self.cursor.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            (self.cursor + delta as usize).min(self.rows.len() - 1)
        };
    }

    fn shift_day(&mut self, delta: i64) {
        let date = self
            .selected_date
            .checked_add_signed(chrono::Duration::days(delta))
            .unwrap_or(self.selected_date);
        self.select_date(date);
    }

    fn select_date(&mut self, date: NaiveDate) {
        if date == self.selected_date {
            return;
        }
        self.selected_date = date;
        if self.date_filter {
            self.cursor = 0;
        }
        self.rebuild();
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(CALENDAR_WIDTH)])
            .split(main_chunks[0]);

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(MONTH_HEIGHT + 2), Constraint::Min(0)])
            .split(chunks[1]);

        self.render_list(frame, chunks[0], theme);
        self.render_calendar(frame, side[0], theme);
        self.render_details(frame, side[1], theme);
        self.render_status_bar(frame, main_chunks[1], theme);

        if self.show_help {
            HelpOverlay::render(frame, area, theme);
        }

        if let Some(dialog) = &self.new_dialog {
            dialog.render(frame, area, theme);
        }

        if let Some(dialog) = &self.confirm_dialog {
            dialog.render(frame, area, theme);
        }
    }

    fn render_list(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let title = if self.date_filter {
            format!(" Tasks due {} ", self.selected_date.format(DATE_FORMAT))
        } else {
            " Tasks ".to_string()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(title)
            .title_style(Style::default().fg(theme.title).bold());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.rows.is_empty() {
            let hint = if self.store.is_empty() {
                "Press 'n' to add one"
            } else {
                "Press 'f' or Esc to widen the view"
            };
            let empty_text = vec![
                Line::from(""),
                Line::from("No tasks").style(Style::default().fg(theme.dimmed)),
                Line::from(""),
                Line::from(hint).style(Style::default().fg(theme.hint)),
            ];
            frame.render_widget(
                Paragraph::new(empty_text).alignment(Alignment::Center),
                inner,
            );
        } else {
            let items: Vec<ListItem> = self
                .rows
                .iter()
                .filter_map(|&index| self.store.get(index))
                .map(|task| self.render_item(task, theme))
                .collect();

            let list = List::new(items).highlight_style(Style::default().bg(theme.selection));
            let mut state = ListState::default().with_selected(Some(self.cursor));
            frame.render_stateful_widget(list, inner, &mut state);
        }

        if self.search_active || !self.search_query.is_empty() {
            let search_area = Rect {
                x: inner.x,
                y: inner.y + inner.height.saturating_sub(1),
                width: inner.width,
                height: 1,
            };
            let search_text = format!("/{}", self.search_query);
            frame.render_widget(
                Paragraph::new(search_text).style(Style::default().fg(theme.search)),
                search_area,
            );
        }
    }

    fn render_item(&self, task: &Task, theme: &Theme) -> ListItem<'static> {
        let content_style = if task.completed {
            Style::default().fg(theme.done).crossed_out()
        } else {
            Style::default().fg(theme.priority(task.priority))
        };

        let mut spans = vec![
            Span::styled(
                format!("{} ", task.status_mark()),
                Style::default().fg(theme.dimmed),
            ),
            Span::styled(
                task.priority.marker(),
                Style::default().fg(theme.priority(task.priority)).bold(),
            ),
            Span::raw(" "),
            Span::styled(task.content.clone(), content_style),
        ];

        if task.category != DEFAULT_CATEGORY {
            spans.push(Span::styled(
                format!(" #{}", task.category),
                Style::default().fg(theme.dimmed),
            ));
        }

        if let Some(due) = task.due_date {
            let style = if task.is_overdue(self.today) {
                Style::default().fg(theme.overdue).bold()
            } else {
                Style::default().fg(theme.hint)
            };
            spans.push(Span::styled(format!("  {}", due.format(DATE_FORMAT)), style));
        }

        ListItem::new(Line::from(spans))
    }

    fn render_calendar(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let border = if self.date_filter {
            theme.accent
        } else {
            theme.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Calendar ")
            .title_style(Style::default().fg(theme.title).bold());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        MonthView {
            selected: self.selected_date,
            today: self.today,
            markers: &self.markers,
        }
        .render(frame, inner, theme);
    }

    fn render_details(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" Details ")
            .title_style(Style::default().fg(theme.title).bold());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let label = Style::default().fg(theme.dimmed);
        let value = Style::default().fg(theme.text);

        let lines = match self.selected_task() {
            None => vec![Line::from(Span::styled("No task selected", label))],
            Some(task) => {
                let due = task
                    .due_date
                    .map(|d| d.format(DATE_FORMAT).to_string())
                    .unwrap_or_else(|| "-".to_string());
                let status = if task.completed {
                    "done"
                } else if task.is_overdue(self.today) {
                    "overdue"
                } else {
                    "pending"
                };
                vec![
                    Line::from(Span::styled(task.content.clone(), value.bold())),
                    Line::from(""),
                    Line::from(vec![
                        Span::styled("Status:   ", label),
                        Span::styled(status, value),
                    ]),
                    Line::from(vec![
                        Span::styled("Due:      ", label),
                        Span::styled(due, value),
                    ]),
                    Line::from(vec![
                        Span::styled("Priority: ", label),
                        Span::styled(
                            task.priority.label(),
                            Style::default().fg(theme.priority(task.priority)),
                        ),
                    ]),
                    Line::from(vec![
                        Span::styled("Category: ", label),
                        Span::styled(task.category.clone(), value),
                    ]),
                    Line::from(vec![
                        Span::styled("Created:  ", label),
                        Span::styled(task.created_at.format("%Y-%m-%d %H:%M").to_string(), value),
                    ]),
                ]
            }
        };

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }

    /// Counts shown on the left of the status line
    fn summary(&self) -> String {
        let stats = self.store.stats();
        if self.date_filter || !self.search_query.is_empty() {
            format!("{} of {} shown", self.rows.len(), stats.total)
        } else {
            format!("Total: {}  Completed: {}", stats.total, stats.completed)
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let key_style = Style::default().fg(theme.accent).bold();
        let desc_style = Style::default().fg(theme.dimmed);
        let sep_style = Style::default().fg(theme.border);

        let mut spans = vec![
            Span::styled(format!(" {} ", self.summary()), Style::default().fg(theme.text)),
            Span::styled("│", sep_style),
        ];

        match &self.message {
            Some(message) => {
                let color = if message.is_error {
                    theme.error
                } else {
                    theme.hint
                };
                spans.push(Span::styled(
                    format!(" {}", message.text),
                    Style::default().fg(color),
                ));
            }
            None => {
                spans.extend([
                    Span::styled(" n", key_style),
                    Span::styled(" New ", desc_style),
                    Span::styled("│", sep_style),
                    Span::styled(" Space", key_style),
                    Span::styled(" Toggle ", desc_style),
                    Span::styled("│", sep_style),
                    Span::styled(" f", key_style),
                    Span::styled(" Filter day ", desc_style),
                    Span::styled("│", sep_style),
                    Span::styled(" ?", key_style),
                    Span::styled(" Help ", desc_style),
                    Span::styled("│", sep_style),
                    Span::styled(" q", key_style),
                    Span::styled(" Quit", desc_style),
                ]);
            }
        }

        let status =
            Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.status_bar));
        frame.render_widget(status, area);
    }
}
