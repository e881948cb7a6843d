//! `daybook list` command implementation

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;
use serde::Serialize;

use super::{pad, truncate};
use crate::store::TaskStore;
use crate::task::input::parse_due_date;
use crate::task::{StatusFilter, Task, TaskFilter, DATE_FORMAT};

const TABLE_COL_NUMBER: usize = 4;
const TABLE_COL_PRIORITY: usize = 7;
const TABLE_COL_DUE: usize = 11;
const TABLE_COL_CATEGORY: usize = 12;
const TABLE_COL_CONTENT: usize = 48;

#[derive(Args)]
pub struct ListArgs {
    /// Only tasks due on this date (YYYY-MM-DD)
    #[arg(long, conflicts_with = "today")]
    date: Option<String>,

    /// Only tasks due today
    #[arg(long)]
    today: bool,

    /// Only tasks not yet done
    #[arg(long, conflicts_with = "done")]
    pending: bool,

    /// Only completed tasks
    #[arg(long)]
    done: bool,

    /// Only tasks in this category
    #[arg(short, long)]
    category: Option<String>,

    /// Case-insensitive text to look for in content or category
    #[arg(short, long)]
    search: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct TaskJson<'a> {
    number: usize,
    #[serde(flatten)]
    task: &'a Task,
}

impl ListArgs {
    fn to_filter(&self, today: NaiveDate) -> Result<TaskFilter> {
        let due_on = if self.today {
            Some(today)
        } else {
            match &self.date {
                Some(raw) => parse_due_date(raw)?,
                None => None,
            }
        };

        let status = if self.pending {
            StatusFilter::Pending
        } else if self.done {
            StatusFilter::Done
        } else {
            StatusFilter::All
        };

        Ok(TaskFilter {
            due_on,
            status,
            category: self.category.clone(),
            query: self.search.clone(),
        })
    }
}

fn table_header() -> String {
    format!(
        "{} ST  {} {} {} CONTENT",
        pad("#", TABLE_COL_NUMBER),
        pad("PRI", TABLE_COL_PRIORITY),
        pad("DUE", TABLE_COL_DUE),
        pad("CATEGORY", TABLE_COL_CATEGORY),
    )
}

fn table_row(index: usize, task: &Task, today: NaiveDate) -> String {
    let due = match task.due_date {
        Some(date) if task.is_overdue(today) => format!("{}!", date.format(DATE_FORMAT)),
        Some(date) => date.format(DATE_FORMAT).to_string(),
        None => "-".to_string(),
    };

    format!(
        "{} {} {} {} {} {}",
        pad(&(index + 1).to_string(), TABLE_COL_NUMBER),
        task.status_mark(),
        pad(task.priority.label(), TABLE_COL_PRIORITY),
        pad(&due, TABLE_COL_DUE),
        pad(&truncate(&task.category, TABLE_COL_CATEGORY), TABLE_COL_CATEGORY),
        truncate(&task.content, TABLE_COL_CONTENT),
    )
}

pub fn run(store: &TaskStore, args: ListArgs) -> Result<()> {
    let today = Local::now().date_naive();
    let filter = args.to_filter(today)?;
    let rows: Vec<(usize, &Task)> = filter.apply(store.list_all()).collect();

    if args.json {
        let tasks: Vec<TaskJson> = rows
            .iter()
            .map(|(index, task)| TaskJson {
                number: index + 1,
                task,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    if store.is_empty() {
        println!("No tasks yet. Add one with: daybook add \"Buy milk\"");
        return Ok(());
    }
    if rows.is_empty() {
        println!("No tasks match.");
        return Ok(());
    }

    println!("{}", table_header());
    println!(
        "{}",
        "-".repeat(
            TABLE_COL_NUMBER + TABLE_COL_PRIORITY + TABLE_COL_DUE + TABLE_COL_CATEGORY + 24
        )
    );
    for (index, task) in &rows {
        println!("{}", table_row(*index, task, today));
    }

    let stats = store.stats();
    if filter.is_empty() {
        println!("\nTotal: {} tasks, {} completed", stats.total, stats.completed);
    } else {
        println!("\nShowing {} of {} tasks", rows.len(), stats.total);
    }
    Ok(())
}
