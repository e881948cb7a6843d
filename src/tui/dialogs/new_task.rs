//! New task dialog

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use super::DialogResult;
use crate::task::{NewTask, Priority, DATE_FORMAT};
use crate::tui::components::render_text_field;
use crate::tui::styles::Theme;

const FIELD_COUNT: usize = 4;
const PRIORITY_FIELD: usize = 2;

pub struct NewTaskDialog {
    content: Input,
    due_date: Input,
    priority: Priority,
    category: Input,
    focused_field: usize,
    error_message: Option<String>,
}

impl NewTaskDialog {
    /// `due` pre-fills the due date field, typically with the day selected
    /// in the calendar.
    pub fn new(due: Option<NaiveDate>) -> Self {
        let due_text = due
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default();
        Self {
            content: Input::default(),
            due_date: Input::new(due_text),
            priority: Priority::default(),
            category: Input::default(),
            focused_field: 0,
            error_message: None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogResult<NewTask> {
        match key.code {
            KeyCode::Esc => DialogResult::Cancel,
            KeyCode::Enter => match NewTask::parse(
                self.content.value(),
                self.due_date.value(),
                self.priority.label(),
                self.category.value(),
            ) {
                Ok(task) => DialogResult::Submit(task),
                Err(e) => {
                    self.error_message = Some(e.to_string());
                    DialogResult::Continue
                }
            },
            KeyCode::Tab => {
                self.focused_field = (self.focused_field + 1) % FIELD_COUNT;
                DialogResult::Continue
            }
            KeyCode::BackTab => {
                self.focused_field = (self.focused_field + FIELD_COUNT - 1) % FIELD_COUNT;
                DialogResult::Continue
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
                if self.focused_field == PRIORITY_FIELD =>
            {
                self.priority = if key.code == KeyCode::Left {
                    self.priority.next().next()
                } else {
                    self.priority.next()
                };
                DialogResult::Continue
            }
            _ => {
                if let Some(input) = self.current_input_mut() {
                    input.handle_event(&crossterm::event::Event::Key(key));
                    self.error_message = None;
                }
                DialogResult::Continue
            }
        }
    }

    fn current_input_mut(&mut self) -> Option<&mut Input> {
        match self.focused_field {
            0 => Some(&mut self.content),
            1 => Some(&mut self.due_date),
            3 => Some(&mut self.category),
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let dialog_area = super::centered_rect(area, 60, 13);
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .style(Style::default().bg(theme.background))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .title(" New Task ")
            .title_style(Style::default().fg(theme.title).bold());

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(1),
            ])
            .split(inner);

        render_text_field(
            frame,
            chunks[0],
            "Task:",
            &self.content,
            self.focused_field == 0,
            Some("what needs doing"),
            theme,
        );
        render_text_field(
            frame,
            chunks[1],
            "Due:",
            &self.due_date,
            self.focused_field == 1,
            Some("YYYY-MM-DD (optional)"),
            theme,
        );

        let priority_focused = self.focused_field == PRIORITY_FIELD;
        let label_style = if priority_focused {
            Style::default().fg(theme.accent).underlined()
        } else {
            Style::default().fg(theme.text)
        };
        let mut spans = vec![Span::styled("Priority:", label_style), Span::raw(" ")];
        for priority in [Priority::High, Priority::Normal, Priority::Low] {
            let style = if priority == self.priority {
                Style::default().fg(theme.priority(priority)).bold().reversed()
            } else {
                Style::default().fg(theme.dimmed)
            };
            spans.push(Span::styled(format!(" {} ", priority.label()), style));
            spans.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), chunks[2]);

        render_text_field(
            frame,
            chunks[3],
            "Category:",
            &self.category,
            self.focused_field == 3,
            Some("default"),
            theme,
        );

        let footer = match &self.error_message {
            Some(message) => Line::from(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            )),
            None => Line::from(vec![
                Span::styled("Tab", Style::default().fg(theme.hint)),
                Span::raw(" next  "),
                Span::styled("Enter", Style::default().fg(theme.hint)),
                Span::raw(" add  "),
                Span::styled("Esc", Style::default().fg(theme.hint)),
                Span::raw(" cancel"),
            ]),
        };
        frame.render_widget(Paragraph::new(footer), chunks[4]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(dialog: &mut NewTaskDialog, text: &str) {
        for c in text.chars() {
            dialog.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_initial_state() {
        let dialog = NewTaskDialog::new(None);
        assert_eq!(dialog.content.value(), "");
        assert_eq!(dialog.due_date.value(), "");
        assert_eq!(dialog.priority, Priority::Normal);
        assert_eq!(dialog.focused_field, 0);
    }

    #[test]
    fn test_due_date_prefilled() {
        let dialog = NewTaskDialog::new(NaiveDate::from_ymd_opt(2024, 5, 20));
        assert_eq!(dialog.due_date.value(), "2024-05-20");
    }

    #[test]
    fn test_esc_cancels() {
        let mut dialog = NewTaskDialog::new(None);
        assert!(matches!(
            dialog.handle_key(key(KeyCode::Esc)),
            DialogResult::Cancel
        ));
    }

    #[test]
    fn test_enter_with_empty_content_shows_error() {
        let mut dialog = NewTaskDialog::new(None);
        assert!(matches!(
            dialog.handle_key(key(KeyCode::Enter)),
            DialogResult::Continue
        ));
        assert!(dialog.error_message.is_some());

        type_text(&mut dialog, "x");
        assert!(dialog.error_message.is_none());
    }

    #[test]
    fn test_submit_all_fields() {
        let mut dialog = NewTaskDialog::new(None);
        type_text(&mut dialog, "Buy milk");
        dialog.handle_key(key(KeyCode::Tab));
        type_text(&mut dialog, "2024-05-20");
        dialog.handle_key(key(KeyCode::Tab));
        dialog.handle_key(key(KeyCode::Left));
        dialog.handle_key(key(KeyCode::Tab));
        type_text(&mut dialog, "home");

        match dialog.handle_key(key(KeyCode::Enter)) {
            DialogResult::Submit(task) => {
                assert_eq!(task.content, "Buy milk");
                assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 5, 20));
                assert_eq!(task.priority, Priority::High);
                assert_eq!(task.category, "home");
            }
            _ => panic!("Expected Submit"),
        }
    }

    #[test]
    fn test_invalid_due_date_blocks_submit() {
        let mut dialog = NewTaskDialog::new(None);
        type_text(&mut dialog, "Buy milk");
        dialog.handle_key(key(KeyCode::Tab));
        type_text(&mut dialog, "tomorrow");

        assert!(matches!(
            dialog.handle_key(key(KeyCode::Enter)),
            DialogResult::Continue
        ));
        assert!(dialog
            .error_message
            .as_deref()
            .is_some_and(|m| m.contains("tomorrow")));
    }

    #[test]
    fn test_priority_field_ignores_typing() {
        let mut dialog = NewTaskDialog::new(None);
        dialog.handle_key(key(KeyCode::Tab));
        dialog.handle_key(key(KeyCode::Tab));
        type_text(&mut dialog, "abc");
        assert_eq!(dialog.content.value(), "");
        assert_eq!(dialog.category.value(), "");

        dialog.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(dialog.priority, Priority::Normal.next());
    }

    #[test]
    fn test_backtab_wraps() {
        let mut dialog = NewTaskDialog::new(None);
        dialog.handle_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
        assert_eq!(dialog.focused_field, FIELD_COUNT - 1);
    }
}
