//! Card entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A card on a project board. A card with no column is archived, not
/// deleted — deleting a column detaches its cards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Card {
    /// Unique card identifier.
    pub id: i64,
    /// The project this card belongs to.
    pub project_id: i64,
    /// The column holding the card, if any.
    pub column_id: Option<i64>,
    /// Card title.
    pub title: String,
    /// Optional body text.
    pub content: Option<String>,
    /// Display order within the column.
    pub position: i32,
    /// Free-board X coordinate.
    pub x: f64,
    /// Free-board Y coordinate.
    pub y: f64,
    /// Planned start.
    pub start_date: Option<DateTime<Utc>>,
    /// Deadline.
    pub due_date: Option<DateTime<Utc>>,
    /// When the card was created.
    pub created_at: DateTime<Utc>,
    /// When the card was last modified.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new card.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCard {
    /// Card title.
    pub title: String,
    /// Optional body text.
    pub content: Option<String>,
    /// Target column; omit to create the card unplaced.
    pub column_id: Option<i64>,
    /// Display order within the column.
    #[serde(default)]
    pub position: i32,
    /// Free-board X coordinate.
    #[serde(default)]
    pub x: f64,
    /// Free-board Y coordinate.
    #[serde(default)]
    pub y: f64,
    /// Initial assignee user ids.
    #[serde(default)]
    pub assignee_ids: Vec<i64>,
    /// Planned start.
    pub start_date: Option<DateTime<Utc>>,
    /// Deadline.
    pub due_date: Option<DateTime<Utc>>,
}

/// Partial update for a card. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCard {
    /// New title.
    pub title: Option<String>,
    /// New body text.
    pub content: Option<String>,
    /// New column.
    pub column_id: Option<i64>,
    /// New display order.
    pub position: Option<i32>,
    /// New X coordinate.
    pub x: Option<f64>,
    /// New Y coordinate.
    pub y: Option<f64>,
    /// Replacement assignee set.
    pub assignee_ids: Option<Vec<i64>>,
    /// New planned start.
    pub start_date: Option<DateTime<Utc>>,
    /// New deadline.
    pub due_date: Option<DateTime<Utc>>,
}
