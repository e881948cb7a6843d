//! Confirmation dialog

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::DialogResult;
use crate::tui::styles::Theme;

/// Yes/No prompt that hands back `payload` when confirmed.
pub struct ConfirmDialog<T> {
    title: String,
    message: String,
    payload: T,
    confirm_selected: bool,
}

impl<T: Clone> ConfirmDialog<T> {
    pub fn new(title: &str, message: impl Into<String>, payload: T) -> Self {
        Self {
            title: title.to_string(),
            message: message.into(),
            payload,
            confirm_selected: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogResult<T> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => DialogResult::Cancel,
            KeyCode::Char('y') | KeyCode::Char('Y') => DialogResult::Submit(self.payload.clone()),
            KeyCode::Enter if self.confirm_selected => DialogResult::Submit(self.payload.clone()),
            KeyCode::Enter => DialogResult::Cancel,
            KeyCode::Left | KeyCode::Char('h') => {
                self.confirm_selected = true;
                DialogResult::Continue
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.confirm_selected = false;
                DialogResult::Continue
            }
            KeyCode::Tab => {
                self.confirm_selected = !self.confirm_selected;
                DialogResult::Continue
            }
            _ => DialogResult::Continue,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let dialog_area = super::centered_rect(area, 54, 8);

        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .style(Style::default().bg(theme.background))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.error))
            .title(format!(" {} ", self.title))
            .title_style(Style::default().fg(theme.error).bold());

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let message = Paragraph::new(self.message.as_str())
            .style(Style::default().fg(theme.text))
            .wrap(Wrap { trim: true });
        frame.render_widget(message, chunks[0]);

        let (yes_style, no_style) = if self.confirm_selected {
            (
                Style::default().fg(theme.error).bold(),
                Style::default().fg(theme.dimmed),
            )
        } else {
            (
                Style::default().fg(theme.dimmed),
                Style::default().fg(theme.done).bold(),
            )
        };

        let buttons = Line::from(vec![
            Span::styled("[Yes]", yes_style),
            Span::raw("    "),
            Span::styled("[No]", no_style),
        ]);
        frame.render_widget(
            Paragraph::new(buttons).alignment(Alignment::Center),
            chunks[1],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn dialog() -> ConfirmDialog<usize> {
        ConfirmDialog::new("Delete Task", "Delete \"Buy milk\"?", 4)
    }

    #[test]
    fn test_defaults_to_no() {
        let mut dialog = dialog();
        assert!(matches!(
            dialog.handle_key(key(KeyCode::Enter)),
            DialogResult::Cancel
        ));
    }

    #[test]
    fn test_y_returns_payload() {
        let mut dialog = dialog();
        assert!(matches!(
            dialog.handle_key(key(KeyCode::Char('y'))),
            DialogResult::Submit(4)
        ));
    }

    #[test]
    fn test_esc_and_n_cancel() {
        let mut dialog = dialog();
        assert!(matches!(
            dialog.handle_key(key(KeyCode::Esc)),
            DialogResult::Cancel
        ));
        assert!(matches!(
            dialog.handle_key(key(KeyCode::Char('N'))),
            DialogResult::Cancel
        ));
    }

    #[test]
    fn test_select_yes_then_enter() {
        let mut dialog = dialog();
        assert!(matches!(
            dialog.handle_key(key(KeyCode::Left)),
            DialogResult::Continue
        ));
        assert!(matches!(
            dialog.handle_key(key(KeyCode::Enter)),
            DialogResult::Submit(4)
        ));
    }

    #[test]
    fn test_tab_toggles_selection() {
        let mut dialog = dialog();
        dialog.handle_key(key(KeyCode::Tab));
        assert!(dialog.confirm_selected);
        dialog.handle_key(key(KeyCode::Tab));
        assert!(!dialog.confirm_selected);
    }

    #[test]
    fn test_right_selects_no() {
        let mut dialog = dialog();
        dialog.handle_key(key(KeyCode::Char('h')));
        dialog.handle_key(key(KeyCode::Char('l')));
        assert!(matches!(
            dialog.handle_key(key(KeyCode::Enter)),
            DialogResult::Cancel
        ));
    }
}
