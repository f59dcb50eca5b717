//! Core types for the taskdeck store.

use crate::error::{StoreError, StoreResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    /// 1-based dense rank used for manual ordering. Across all tasks the
    /// positions form an unbroken `1..=N` sequence.
    pub position: i64,
    /// `None` means unscheduled; unscheduled tasks sort after all
    /// scheduled ones in any due-date ordering.
    pub due_date: Option<NaiveDate>,
}

/// Sort order for list and search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderBy {
    /// Manual order (position ascending).
    #[default]
    Position,
    /// Due date ascending, unscheduled last, ties by position.
    DueDate,
}

/// Storage format for due dates.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` due date supplied at the interface boundary.
pub fn parse_due_date(s: &str) -> StoreResult<NaiveDate> {
    NaiveDate::parse_from_str(s, DUE_DATE_FORMAT).map_err(|_| {
        StoreError::validation(format!("invalid due date '{s}', expected YYYY-MM-DD"))
    })
}

/// Reject empty or whitespace-only titles. Titles are stored as given;
/// callers are expected to have already trimmed.
pub(crate) fn validate_title(title: &str) -> StoreResult<()> {
    if title.trim().is_empty() {
        return Err(StoreError::validation("title must not be empty"));
    }
    Ok(())
}
