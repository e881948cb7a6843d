//! Main TUI application

use anyhow::Result;
use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use std::time::Duration;

use super::home::HomeView;
use super::styles::Theme;
use crate::store::TaskStore;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct App {
    home: HomeView,
    should_quit: bool,
    theme: Theme,
}

impl App {
    pub fn new(store: TaskStore) -> Self {
        Self {
            home: HomeView::new(store, Local::now().date_naive()),
            should_quit: false,
            theme: Theme::default(),
        }
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        terminal.clear()?;
        terminal.draw(|f| self.render(f))?;

        loop {
            if event::poll(POLL_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key);
                        self.home.sync();
                        terminal.draw(|f| self.render(f))?;
                    }
                    Event::Resize(_, _) => {
                        terminal.draw(|f| self.render(f))?;
                    }
                    _ => {}
                }
            } else if self.home.set_today(Local::now().date_naive()) {
                // Date rolled over while idle
                terminal.draw(|f| self.render(f))?;
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        self.home.render(frame, frame.area(), &self.theme);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
            self.should_quit = true;
            return;
        }

        if let Some(action) = self.home.handle_key(key) {
            match action {
                Action::Quit => self.should_quit = true,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
}
