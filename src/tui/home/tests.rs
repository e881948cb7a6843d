//! Tests for HomeView

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use tempfile::TempDir;
use tracing::Dispatch;

use super::HomeView;
use crate::store::TaskStore;
use crate::task::NewTask;
use crate::tui::app::Action;
use crate::tui::styles::Theme;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    date(2024, 5, 20)
}

struct TestEnv {
    temp: TempDir,
    view: HomeView,
}

impl TestEnv {
    fn press(&mut self, code: KeyCode) -> Option<Action> {
        self.view.handle_key(key(code))
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(KeyCode::Char(c));
        }
    }

    fn visible(&self) -> Vec<String> {
        self.view
            .rows
            .iter()
            .map(|&i| self.view.store.get(i).unwrap().content.clone())
            .collect()
    }

    fn reopen(&self) -> TaskStore {
        TaskStore::with_dispatch(self.temp.path().join("todos.json"), Dispatch::none())
    }
}

fn create_test_env(tasks: Vec<NewTask>) -> TestEnv {
    let temp = TempDir::new().unwrap();
    let mut store = TaskStore::with_dispatch(temp.path().join("todos.json"), Dispatch::none());
    for task in tasks {
        store.add(task).unwrap();
    }
    let view = HomeView::new(store, today());
    TestEnv { temp, view }
}

fn sample_tasks() -> Vec<NewTask> {
    vec![
        NewTask::new("Buy milk").due(today()),
        NewTask::new("Write report").due(date(2024, 5, 21)),
        NewTask::new("Call plumber"),
    ]
}

#[test]
fn test_initial_state() {
    let env = create_test_env(sample_tasks());
    assert_eq!(env.view.rows, vec![0, 1, 2]);
    assert_eq!(env.view.cursor, 0);
    assert_eq!(env.view.selected_date, today());
    assert!(env.view.new_dialog.is_none() && env.view.confirm_dialog.is_none());
}

#[test]
fn test_q_quits() {
    let mut env = create_test_env(vec![]);
    assert_eq!(env.press(KeyCode::Char('q')), Some(Action::Quit));
}

#[test]
fn test_help_swallows_keys() {
    let mut env = create_test_env(sample_tasks());
    env.press(KeyCode::Char('?'));
    assert!(env.view.show_help);

    assert_eq!(env.press(KeyCode::Char('j')), None);
    assert_eq!(env.view.cursor, 0);

    assert_eq!(env.press(KeyCode::Char('q')), None);
    assert!(!env.view.show_help);
}

#[test]
fn test_cursor_movement_is_clamped() {
    let mut env = create_test_env(sample_tasks());
    env.press(KeyCode::Char('k'));
    assert_eq!(env.view.cursor, 0);

    env.press(KeyCode::Char('j'));
    env.press(KeyCode::Down);
    env.press(KeyCode::Char('j'));
    assert_eq!(env.view.cursor, 2);

    env.press(KeyCode::Char('g'));
    assert_eq!(env.view.cursor, 0);
    env.press(KeyCode::Char('G'));
    assert_eq!(env.view.cursor, 2);
}

#[test]
fn test_new_task_dialog_adds_and_persists() {
    let mut env = create_test_env(vec![]);
    env.press(KeyCode::Char('n'));
    assert!(env.view.new_dialog.is_some());

    env.type_text("Water plants");
    env.press(KeyCode::Enter);

    assert!(env.view.new_dialog.is_none());
    assert_eq!(env.visible(), vec!["Water plants"]);
    assert_eq!(env.view.store.stats().total, 1);
    assert_eq!(env.reopen().list_all()[0].content, "Water plants");
}

#[test]
fn test_new_task_dialog_escape_adds_nothing() {
    let mut env = create_test_env(vec![]);
    env.press(KeyCode::Char('n'));
    env.type_text("Never mind");
    env.press(KeyCode::Esc);

    assert!(env.view.new_dialog.is_none());
    assert!(env.view.store.is_empty());
}

#[test]
fn test_new_task_prefills_filtered_day() {
    let mut env = create_test_env(vec![]);
    env.press(KeyCode::Char('f'));
    env.press(KeyCode::Char('n'));
    env.type_text("Dentist");
    env.press(KeyCode::Enter);

    assert_eq!(env.view.store.list_all()[0].due_date, Some(today()));
    assert_eq!(env.visible(), vec!["Dentist"]);
}

#[test]
fn test_space_toggles_selected_task() {
    let mut env = create_test_env(sample_tasks());
    env.press(KeyCode::Char('j'));
    env.press(KeyCode::Char(' '));

    assert!(env.view.store.list_all()[1].completed);
    assert!(env.reopen().list_all()[1].completed);

    env.press(KeyCode::Enter);
    assert!(!env.view.store.list_all()[1].completed);
}

#[test]
fn test_delete_requires_confirmation() {
    let mut env = create_test_env(sample_tasks());
    env.press(KeyCode::Char('j'));
    env.press(KeyCode::Char('d'));
    assert!(env.view.confirm_dialog.is_some());

    env.press(KeyCode::Char('n'));
    assert!(env.view.confirm_dialog.is_none());
    assert_eq!(env.view.store.len(), 3);

    env.press(KeyCode::Char('d'));
    env.press(KeyCode::Char('y'));
    assert_eq!(env.visible(), vec!["Buy milk", "Call plumber"]);
    assert_eq!(env.reopen().len(), 2);
}

#[test]
fn test_delete_last_row_moves_cursor_up() {
    let mut env = create_test_env(sample_tasks());
    env.press(KeyCode::Char('G'));
    env.press(KeyCode::Char('d'));
    env.press(KeyCode::Char('y'));
    assert_eq!(env.view.cursor, 1);
}

#[test]
fn test_delete_on_empty_list_does_nothing() {
    let mut env = create_test_env(vec![]);
    env.press(KeyCode::Char('d'));
    assert!(env.view.confirm_dialog.is_none());
}

#[test]
fn test_date_filter_follows_selected_day() {
    let mut env = create_test_env(sample_tasks());
    env.press(KeyCode::Char('f'));
    assert_eq!(env.visible(), vec!["Buy milk"]);

    env.press(KeyCode::Char('l'));
    assert_eq!(env.visible(), vec!["Write report"]);

    env.press(KeyCode::Char('l'));
    assert!(env.visible().is_empty());

    env.press(KeyCode::Char('t'));
    assert_eq!(env.view.selected_date, today());
    assert_eq!(env.visible(), vec!["Buy milk"]);

    env.press(KeyCode::Char('f'));
    assert_eq!(env.visible().len(), 3);
}

#[test]
fn test_month_navigation_updates_markers() {
    let mut env = create_test_env(sample_tasks());
    assert!(env.view.markers.contains_key(&20));
    assert!(env.view.markers.contains_key(&21));

    env.press(KeyCode::Char('L'));
    assert_eq!(env.view.selected_date, date(2024, 6, 20));
    assert!(env.view.markers.is_empty());

    env.press(KeyCode::Char('H'));
    env.press(KeyCode::Char('H'));
    assert_eq!(env.view.selected_date, date(2024, 4, 20));
}

#[test]
fn test_search_filters_rows() {
    let mut env = create_test_env(sample_tasks());
    env.press(KeyCode::Char('/'));
    env.type_text("MILK");
    assert_eq!(env.visible(), vec!["Buy milk"]);

    // typing while searching does not trigger commands
    assert_eq!(env.view.store.len(), 3);

    env.press(KeyCode::Enter);
    assert!(!env.view.search_active);
    assert_eq!(env.visible(), vec!["Buy milk"]);

    env.press(KeyCode::Esc);
    assert_eq!(env.visible().len(), 3);
}

#[test]
fn test_toggle_in_filtered_view_hits_store_index() {
    let mut env = create_test_env(sample_tasks());
    env.press(KeyCode::Char('/'));
    env.type_text("plumber");
    env.press(KeyCode::Enter);
    env.press(KeyCode::Char(' '));

    assert!(env.view.store.list_all()[2].completed);
    assert!(!env.view.store.list_all()[0].completed);
}

#[test]
fn test_summary_counts() {
    let mut env = create_test_env(sample_tasks());
    env.press(KeyCode::Char(' '));
    assert_eq!(env.view.summary(), "Total: 3  Completed: 1");

    env.press(KeyCode::Char('f'));
    assert_eq!(env.view.summary(), "1 of 3 shown");
}

#[test]
fn test_backup_without_file_reports_error() {
    let mut env = create_test_env(vec![]);
    env.press(KeyCode::Char('b'));
    assert!(env.view.message.as_ref().is_some_and(|m| m.is_error));
}

#[test]
fn test_backup_creates_copy() {
    let mut env = create_test_env(sample_tasks());
    env.press(KeyCode::Char('b'));
    let message = env.view.message.as_ref().unwrap();
    assert!(!message.is_error);

    let backups = std::fs::read_dir(env.temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with("todos_backup_"))
        .count();
    assert_eq!(backups, 1);
}

#[test]
fn test_set_today_moves_selection_left_on_old_day() {
    let mut env = create_test_env(sample_tasks());
    assert!(!env.view.set_today(today()));
    assert!(env.view.set_today(date(2024, 5, 21)));
    assert_eq!(env.view.selected_date, date(2024, 5, 21));

    env.press(KeyCode::Char('l'));
    assert!(env.view.set_today(date(2024, 5, 22)));
    assert_eq!(env.view.selected_date, date(2024, 5, 22));
    assert_eq!(env.view.today, date(2024, 5, 22));
}

#[test]
fn test_render_shows_tasks_and_counts() {
    let mut env = create_test_env(sample_tasks());
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    let theme = Theme::default();
    terminal
        .draw(|f| env.view.render(f, f.area(), &theme))
        .unwrap();

    let screen: String = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect();
    assert!(screen.contains("Buy milk"));
    assert!(screen.contains("May 2024"));
    assert!(screen.contains("Total: 3"));
}

#[test]
fn test_render_with_dialogs_open() {
    let mut env = create_test_env(sample_tasks());
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let theme = Theme::default();

    env.press(KeyCode::Char('n'));
    terminal
        .draw(|f| env.view.render(f, f.area(), &theme))
        .unwrap();
    env.press(KeyCode::Esc);

    env.press(KeyCode::Char('?'));
    terminal
        .draw(|f| env.view.render(f, f.area(), &theme))
        .unwrap();
}
