use crate::db::store::Store;
use crate::errors::{AppError, AppResult};
use crate::models::game::NewGame;
use crate::ui::messages::warning;
use chrono::{DateTime, Local};

/// High-level business logic for game creation.
pub struct GameLogic;

impl GameLogic {
    pub fn create<S: Store + ?Sized>(store: &mut S, name: &str, now: DateTime<Local>) -> AppResult<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::EmptyField("name"));
        }

        let id = store.insert_game(&NewGame {
            name: name.to_string(),
            created_at: now,
        })?;

        if let Err(e) = store.record("add_game", name, &format!("Created game #{}", id)) {
            warning(format!("Failed to write internal log: {}", e));
        }

        Ok(id)
    }
}
