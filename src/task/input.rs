//! Validation of raw user input before it reaches the store

use chrono::NaiveDate;

use super::model::{NewTask, Priority, DATE_FORMAT, DEFAULT_CATEGORY};
use crate::error::InputError;

pub fn parse_content(raw: &str) -> Result<String, InputError> {
    let content = raw.trim();
    if content.is_empty() {
        return Err(InputError::EmptyContent);
    }
    Ok(content.to_string())
}

/// Empty input means "no deadline".
pub fn parse_due_date(raw: &str) -> Result<Option<NaiveDate>, InputError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|_| InputError::InvalidDate(raw.to_string()))
}

/// Empty input means the default priority.
pub fn parse_priority(raw: &str) -> Result<Priority, InputError> {
    if raw.trim().is_empty() {
        return Ok(Priority::default());
    }
    Priority::parse(raw).ok_or_else(|| InputError::InvalidPriority(raw.trim().to_string()))
}

pub fn parse_category(raw: &str) -> String {
    match raw.trim() {
        "" => DEFAULT_CATEGORY.to_string(),
        category => category.to_string(),
    }
}

/// Parse `YYYY-MM` into (year, month).
pub fn parse_month(raw: &str) -> Result<(i32, u32), InputError> {
    let invalid = || InputError::InvalidMonth(raw.trim().to_string());
    let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
        return Err(invalid());
    }
    Ok((year, month))
}

impl NewTask {
    /// Validate every field of a task entered as free text.
    pub fn parse(
        content: &str,
        due_date: &str,
        priority: &str,
        category: &str,
    ) -> Result<Self, InputError> {
        Ok(Self {
            content: parse_content(content)?,
            due_date: parse_due_date(due_date)?,
            priority: parse_priority(priority)?,
            category: parse_category(category),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_is_trimmed() {
        assert_eq!(parse_content("  Buy milk \n").unwrap(), "Buy milk");
    }

    #[test]
    fn test_blank_content_rejected() {
        assert_eq!(parse_content(""), Err(InputError::EmptyContent));
        assert_eq!(parse_content("   \t"), Err(InputError::EmptyContent));
    }

    #[test]
    fn test_due_date() {
        assert_eq!(parse_due_date(""), Ok(None));
        assert_eq!(
            parse_due_date("2024-05-01"),
            Ok(NaiveDate::from_ymd_opt(2024, 5, 1))
        );
        assert_eq!(
            parse_due_date("2024-02-30"),
            Err(InputError::InvalidDate("2024-02-30".to_string()))
        );
        assert!(parse_due_date("05/01/2024").is_err());
    }

    #[test]
    fn test_priority_defaults_when_blank() {
        assert_eq!(parse_priority(""), Ok(Priority::Normal));
        assert_eq!(parse_priority("HIGH"), Ok(Priority::High));
        assert_eq!(
            parse_priority("asap"),
            Err(InputError::InvalidPriority("asap".to_string()))
        );
    }

    #[test]
    fn test_category_defaults_when_blank() {
        assert_eq!(parse_category(" "), "default");
        assert_eq!(parse_category(" life "), "life");
    }

    #[test]
    fn test_month() {
        assert_eq!(parse_month("2024-05"), Ok((2024, 5)));
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("may").is_err());
    }

    #[test]
    fn test_new_task_parse() {
        let task = NewTask::parse("Buy milk", "2024-05-01", "high", "life").unwrap();
        assert_eq!(task.content, "Buy milk");
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.category, "life");

        assert_eq!(
            NewTask::parse(" ", "", "", ""),
            Err(InputError::EmptyContent)
        );
    }
}
