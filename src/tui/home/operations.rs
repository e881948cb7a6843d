//! Store mutations triggered from the home view

use super::HomeView;
use crate::task::NewTask;

impl HomeView {
    pub(super) fn add_task(&mut self, task: NewTask) {
        let content = task.content.clone();
        match self.store.add(task) {
            Ok(index) => {
                self.set_message(format!("Added: {}", content));
                self.rebuild();
                if let Some(row) = self.rows.iter().position(|&i| i == index) {
                    self.cursor = row;
                }
            }
            Err(e) => {
                self.set_error(format!("Could not save new task: {}", e));
                self.rebuild();
            }
        }
    }

    pub(super) fn toggle_task(&mut self, index: usize) {
        match self.store.toggle_complete(index) {
            Ok(true) => {
                if let Some(task) = self.store.get(index) {
                    let verb = if task.completed { "Completed" } else { "Reopened" };
                    let text = format!("{}: {}", verb, task.content);
                    self.set_message(text);
                }
            }
            Ok(false) => self.set_error("Task no longer exists"),
            Err(e) => self.set_error(format!("Could not save change: {}", e)),
        }
        self.sync();
    }

    pub(super) fn delete_task(&mut self, index: usize) {
        let content = self.store.get(index).map(|task| task.content.clone());
        match self.store.delete(index) {
            Ok(true) => {
                self.set_message(format!("Deleted: {}", content.unwrap_or_default()));
            }
            Ok(false) => self.set_error("Task no longer exists"),
            Err(e) => self.set_error(format!("Could not save deletion: {}", e)),
        }
        self.sync();
    }

    pub(super) fn backup(&mut self) {
        match self.store.backup() {
            Ok(path) => self.set_message(format!("Backed up to {}", path.display())),
            Err(e) => self.set_error(format!("Backup failed: {}", e)),
        }
    }
}
