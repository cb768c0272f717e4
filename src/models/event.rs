use chrono::{DateTime, Local};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Event {
    pub id: i64,
    pub game_name: String,         // ⇔ events.game_name (matches games.name, not enforced)
    pub title: String,             // ⇔ events.title
    pub start_at: DateTime<Local>, // ⇔ events.start_at (creation time)
    pub end_at: DateTime<Local>,   // ⇔ events.end_at
    pub is_remind_needed: bool,    // ⇔ events.is_remind_needed (INT 0/1)
    pub is_completed: bool,        // ⇔ events.is_completed (INT 0/1)
}

impl Event {
    pub fn belongs_to(&self, game_name: &str) -> bool {
        self.game_name == game_name
    }

    pub fn is_open(&self) -> bool {
        !self.is_completed
    }

    pub fn end_str(&self) -> String {
        self.end_at.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// Values written by an `insert` into `events`.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub game_name: String,
    pub title: String,
    pub start_at: DateTime<Local>,
    pub end_at: DateTime<Local>,
    pub is_remind_needed: bool,
}
