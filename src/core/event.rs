use crate::core::calculator::deadline::derive_end_time;
use crate::db::store::Store;
use crate::errors::{AppError, AppResult};
use crate::models::end_mode::EndMode;
use crate::models::event::NewEvent;
use crate::ui::messages::warning;
use chrono::{DateTime, Local};

/// Everything the event form submits.
#[derive(Debug, Clone)]
pub struct NewEventInput {
    pub game_name: Option<String>,
    pub title: String,
    pub end_mode: EndMode,
    pub remind_needed: bool,
}

/// High-level business logic for event creation and completion.
pub struct EventLogic;

impl EventLogic {
    /// Insert a new event; `start_at` is the creation time.
    pub fn create<S: Store + ?Sized>(
        store: &mut S,
        input: &NewEventInput,
        now: DateTime<Local>,
    ) -> AppResult<i64> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(AppError::EmptyField("title"));
        }

        let game_name = match input.game_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => return Err(AppError::NoGameSelected),
        };

        let end_at = derive_end_time(&input.end_mode, &now)?;

        let id = store.insert_event(&NewEvent {
            game_name: game_name.to_string(),
            title: title.to_string(),
            start_at: now,
            end_at,
            is_remind_needed: input.remind_needed,
        })?;

        if let Err(e) = store.record(
            "add_event",
            game_name,
            &format!("Created event #{} '{}' due {}", id, title, end_at.format("%Y-%m-%d %H:%M")),
        ) {
            warning(format!("Failed to write internal log: {}", e));
        }

        Ok(id)
    }

    /// Flip the completion flag of `id` from `current`; returns the new flag.
    pub fn toggle<S: Store + ?Sized>(store: &mut S, id: i64, current: bool) -> AppResult<bool> {
        let next = !current;
        store.update_completion(id, next)?;

        let state = if next { "completed" } else { "reopened" };
        if let Err(e) = store.record("toggle", &format!("#{}", id), &format!("Event {}", state)) {
            warning(format!("Failed to write internal log: {}", e));
        }

        Ok(next)
    }
}
