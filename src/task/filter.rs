//! Read-only queries shells run over `TaskStore::list_all()`

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

use super::model::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Done,
}

/// Conjunction of optional criteria. An empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub due_on: Option<NaiveDate>,
    pub status: StatusFilter,
    pub category: Option<String>,
    /// Case-insensitive substring of content or category
    pub query: Option<String>,
}

impl TaskFilter {
    pub fn is_empty(&self) -> bool {
        self.due_on.is_none()
            && self.status == StatusFilter::All
            && self.category.is_none()
            && self.query.as_deref().is_none_or(str::is_empty)
    }

    pub fn matches(&self, task: &Task) -> bool {
        if let Some(date) = self.due_on {
            if !task.is_due_on(date) {
                return false;
            }
        }

        match self.status {
            StatusFilter::All => {}
            StatusFilter::Pending if task.completed => return false,
            StatusFilter::Done if !task.completed => return false,
            _ => {}
        }

        if let Some(category) = &self.category {
            if &task.category != category {
                return false;
            }
        }

        if let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) {
            let query = query.to_lowercase();
            if !task.content.to_lowercase().contains(&query)
                && !task.category.to_lowercase().contains(&query)
            {
                return false;
            }
        }

        true
    }

    /// Matching tasks paired with their store index
    pub fn apply<'a>(&'a self, tasks: &'a [Task]) -> impl Iterator<Item = (usize, &'a Task)> + 'a {
        tasks
            .iter()
            .enumerate()
            .filter(move |(_, task)| self.matches(task))
    }
}

/// Calendar marker for a day that has tasks due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayMarker {
    /// At least one task due that day is still open
    Pending,
    /// Every task due that day is completed
    Done,
}

/// Markers keyed by day-of-month for the given month.
pub fn due_markers(tasks: &[Task], year: i32, month: u32) -> BTreeMap<u32, DayMarker> {
    let mut markers = BTreeMap::new();

    for task in tasks {
        let Some(due) = task.due_date else { continue };
        if due.year() != year || due.month() != month {
            continue;
        }

        let marker = if task.completed {
            DayMarker::Done
        } else {
            DayMarker::Pending
        };
        markers
            .entry(due.day())
            .and_modify(|existing| {
                if marker == DayMarker::Pending {
                    *existing = DayMarker::Pending;
                }
            })
            .or_insert(marker);
    }

    markers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{NewTask, Priority};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<Task> {
        let mut tasks = vec![
            Task::create(NewTask::new("Buy milk").due(date(2024, 5, 1)).category("life")),
            Task::create(NewTask::new("File taxes").due(date(2024, 5, 1)).priority(Priority::High)),
            Task::create(NewTask::new("Call mom").category("life")),
            Task::create(NewTask::new("Ship release").due(date(2024, 5, 20)).category("work")),
            Task::create(NewTask::new("Plan trip").due(date(2024, 6, 3))),
        ];
        tasks[1].completed = true;
        tasks[3].completed = true;
        tasks
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let tasks = sample();
        let filter = TaskFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&tasks).count(), tasks.len());
    }

    #[test]
    fn test_filter_by_due_date_keeps_store_indices() {
        let tasks = sample();
        let filter = TaskFilter {
            due_on: Some(date(2024, 5, 1)),
            ..Default::default()
        };
        let indices: Vec<usize> = filter.apply(&tasks).map(|(i, _)| i).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_filter_by_status() {
        let tasks = sample();
        let pending = TaskFilter {
            status: StatusFilter::Pending,
            ..Default::default()
        };
        let done = TaskFilter {
            status: StatusFilter::Done,
            ..Default::default()
        };
        assert_eq!(pending.apply(&tasks).count(), 3);
        assert_eq!(done.apply(&tasks).count(), 2);
    }

    #[test]
    fn test_filter_combines_criteria() {
        let tasks = sample();
        let filter = TaskFilter {
            category: Some("life".to_string()),
            query: Some("MOM".to_string()),
            ..Default::default()
        };
        let matched: Vec<&str> = filter.apply(&tasks).map(|(_, t)| t.content.as_str()).collect();
        assert_eq!(matched, vec!["Call mom"]);
    }

    #[test]
    fn test_query_matches_category() {
        let tasks = sample();
        let filter = TaskFilter {
            query: Some("work".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&tasks).count(), 1);
    }

    #[test]
    fn test_blank_query_is_ignored() {
        let filter = TaskFilter {
            query: Some(String::new()),
            ..Default::default()
        };
        assert!(filter.is_empty());
    }

    #[test]
    fn test_due_markers() {
        let tasks = sample();
        let may = due_markers(&tasks, 2024, 5);
        assert_eq!(may.len(), 2);
        // One open and one completed task on the 1st
        assert_eq!(may.get(&1), Some(&DayMarker::Pending));
        assert_eq!(may.get(&20), Some(&DayMarker::Done));

        let june = due_markers(&tasks, 2024, 6);
        assert_eq!(june.keys().copied().collect::<Vec<_>>(), vec![3]);

        assert!(due_markers(&tasks, 2023, 5).is_empty());
    }
}
