//! Personal schedule entities.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A recurring weekly busy block in a user's timetable.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Schedule {
    /// Unique schedule identifier.
    pub id: i64,
    /// The owning user.
    pub user_id: i64,
    /// Weekday, 0 = Monday through 6 = Sunday.
    pub day_of_week: i32,
    /// Block start.
    pub start_time: NaiveTime,
    /// Block end.
    pub end_time: NaiveTime,
    /// Optional label ("Linear Algebra", "standup", ...).
    pub description: Option<String>,
    /// When the entry was registered.
    pub created_at: DateTime<Utc>,
}

/// A gap shared by every member of a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeTimeSlot {
    /// Weekday, 0 = Monday through 6 = Sunday.
    pub day_of_week: i32,
    /// Gap start.
    pub start_time: NaiveTime,
    /// Gap end.
    pub end_time: NaiveTime,
}
