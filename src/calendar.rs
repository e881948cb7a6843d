//! Month grid shared by the CLI and TUI calendar views

use chrono::{Datelike, Months, NaiveDate};

pub const WEEKDAY_HEADER: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// A month laid out in Monday-first weeks. Cells outside the month are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<[Option<u32>; 7]>,
}

impl MonthGrid {
    /// Returns `None` for a month chrono cannot represent.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let days = days_in_month(first);
        let offset = first.weekday().num_days_from_monday() as usize;

        let mut weeks = Vec::new();
        let mut week = [None; 7];
        let mut slot = offset;
        for day in 1..=days {
            week[slot] = Some(day);
            slot += 1;
            if slot == 7 {
                weeks.push(week);
                week = [None; 7];
                slot = 0;
            }
        }
        if slot > 0 {
            weeks.push(week);
        }

        Some(Self { year, month, weeks })
    }

    pub fn containing(date: NaiveDate) -> Self {
        // from_ymd_opt cannot fail for the month of an existing date
        Self::new(date.year(), date.month()).unwrap_or_else(|| Self {
            year: date.year(),
            month: date.month(),
            weeks: Vec::new(),
        })
    }

    pub fn title(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_default()
    }
}

pub fn days_in_month(first: NaiveDate) -> u32 {
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Move `date` by whole months, clamping the day to the target month's length.
pub fn shift_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let shifted = if delta >= 0 {
        date.checked_add_months(Months::new(delta as u32))
    } else {
        date.checked_sub_months(Months::new(delta.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_layout() {
        // May 2024 starts on a Wednesday
        let grid = MonthGrid::new(2024, 5).unwrap();
        assert_eq!(grid.weeks.len(), 5);
        assert_eq!(grid.weeks[0], [None, None, Some(1), Some(2), Some(3), Some(4), Some(5)]);
        assert_eq!(grid.weeks[4][4], Some(31));
        assert_eq!(grid.weeks[4][5], None);
    }

    #[test]
    fn test_month_starting_on_monday() {
        // April 2024 starts on a Monday
        let grid = MonthGrid::new(2024, 4).unwrap();
        assert_eq!(grid.weeks[0][0], Some(1));
        let days: u32 = grid.weeks.iter().flatten().flatten().count() as u32;
        assert_eq!(days, 30);
    }

    #[test]
    fn test_invalid_month() {
        assert!(MonthGrid::new(2024, 13).is_none());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(date(2024, 2, 1)), 29);
        assert_eq!(days_in_month(date(2023, 2, 1)), 28);
        assert_eq!(days_in_month(date(2024, 12, 1)), 31);
    }

    #[test]
    fn test_shift_months_clamps_day() {
        assert_eq!(shift_months(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(shift_months(date(2024, 3, 15), -3), date(2023, 12, 15));
        assert_eq!(shift_months(date(2024, 3, 15), 0), date(2024, 3, 15));
    }

    #[test]
    fn test_title() {
        assert_eq!(MonthGrid::new(2024, 5).unwrap().title(), "May 2024");
    }
}
