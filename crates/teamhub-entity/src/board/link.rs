//! Association records between cards and users, cards, and files.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Assignment of a user to a card.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CardAssignee {
    /// The card.
    pub card_id: i64,
    /// The assigned user.
    pub user_id: i64,
}

/// A directed dependency edge between two cards of the same project.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CardDependency {
    /// Edge origin.
    pub from_card_id: i64,
    /// Edge target.
    pub to_card_id: i64,
}

/// Attachment link between a card and a file.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CardFileLink {
    /// The card.
    pub card_id: i64,
    /// The attached file.
    pub file_id: i64,
}
