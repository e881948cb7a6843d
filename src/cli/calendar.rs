//! `daybook calendar` command implementation

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use clap::Args;
use std::collections::BTreeMap;

use crate::calendar::{MonthGrid, WEEKDAY_HEADER};
use crate::store::TaskStore;
use crate::task::input::parse_month;
use crate::task::{due_markers, DayMarker, Task, TaskFilter};

#[derive(Args)]
pub struct CalendarArgs {
    /// Month to show (YYYY-MM), defaults to the current month
    #[arg(short, long)]
    month: Option<String>,
}

/// Render the grid as text. Days with open tasks get `*`, days whose tasks
/// are all done get `+`, and today is bracketed.
fn render_grid(
    grid: &MonthGrid,
    markers: &BTreeMap<u32, DayMarker>,
    today: Option<u32>,
) -> Vec<String> {
    let mut lines = vec![format!("{:^28}", grid.title())];
    lines.push(
        WEEKDAY_HEADER
            .iter()
            .map(|d| format!(" {} ", d))
            .collect::<Vec<_>>()
            .join("")
            .trim_end()
            .to_string(),
    );

    for week in &grid.weeks {
        let mut line = String::new();
        for cell in week {
            let text = match cell {
                None => "    ".to_string(),
                Some(day) => {
                    let mark = match markers.get(day) {
                        Some(DayMarker::Pending) => '*',
                        Some(DayMarker::Done) => '+',
                        None => ' ',
                    };
                    if Some(*day) == today {
                        format!("[{:>2}]", day)
                    } else {
                        format!("{:>3}{}", day, mark)
                    }
                }
            };
            line.push_str(&text);
        }
        lines.push(line.trim_end().to_string());
    }

    lines
}

pub fn run(store: &TaskStore, args: CalendarArgs) -> Result<()> {
    let now = Local::now().date_naive();
    let (year, month) = match &args.month {
        Some(raw) => parse_month(raw)?,
        None => (now.year(), now.month()),
    };
    let grid = MonthGrid::new(year, month).unwrap_or_else(|| MonthGrid::containing(now));

    let tasks = store.list_all();
    let markers = due_markers(tasks, grid.year, grid.month);
    let today = (now.year() == grid.year && now.month() == grid.month).then(|| now.day());

    for line in render_grid(&grid, &markers, today) {
        println!("{}", line);
    }

    if markers.is_empty() {
        println!("\nNothing due this month.");
        return Ok(());
    }

    println!();
    for day in markers.keys() {
        let Some(date) = NaiveDate::from_ymd_opt(grid.year, grid.month, *day) else {
            continue;
        };
        let filter = TaskFilter {
            due_on: Some(date),
            ..Default::default()
        };
        for (index, task) in filter.apply(tasks) {
            println!("{}  #{:<3} {}", date.format("%a %d"), index + 1, summary(task));
        }
    }
    println!("\n* open   + all done");
    Ok(())
}

fn summary(task: &Task) -> String {
    format!("{} {}", task.status_mark(), task.content)
}
