use chrono::{DateTime, Local};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Game {
    pub id: i64,
    pub name: String,              // ⇔ games.name (TEXT, unique by convention only)
    pub created_at: DateTime<Local>, // ⇔ games.created_at (TEXT, UTC RFC3339)
}

/// Values written by an `insert` into `games`.
#[derive(Debug, Clone)]
pub struct NewGame {
    pub name: String,
    pub created_at: DateTime<Local>,
}
