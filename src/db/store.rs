//! The persistence boundary: two collections, five operations.
//!
//! Core logic only talks to a `Store`; `DbPool` is the SQLite adapter.

use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::event::{Event, NewEvent};
use crate::models::game::{Game, NewGame};

pub trait Store {
    /// All games, ascending `created_at`.
    fn select_games(&mut self) -> AppResult<Vec<Game>>;

    /// All events, ascending `end_at`.
    fn select_events(&mut self) -> AppResult<Vec<Event>>;

    fn insert_game(&mut self, game: &NewGame) -> AppResult<i64>;

    fn insert_event(&mut self, event: &NewEvent) -> AppResult<i64>;

    /// Set `is_completed` for the event `id`.
    fn update_completion(&mut self, id: i64, completed: bool) -> AppResult<()>;

    /// Audit hook. Stores without an audit trail ignore it.
    fn record(&mut self, _operation: &str, _target: &str, _message: &str) -> AppResult<()> {
        Ok(())
    }
}

impl Store for DbPool {
    fn select_games(&mut self) -> AppResult<Vec<Game>> {
        queries::select_games(&self.conn)
    }

    fn select_events(&mut self) -> AppResult<Vec<Event>> {
        queries::select_events(&self.conn)
    }

    fn insert_game(&mut self, game: &NewGame) -> AppResult<i64> {
        queries::insert_game(&self.conn, game)
    }

    fn insert_event(&mut self, event: &NewEvent) -> AppResult<i64> {
        queries::insert_event(&self.conn, event)
    }

    fn update_completion(&mut self, id: i64, completed: bool) -> AppResult<()> {
        let changed = queries::update_event_completion(&self.conn, id, completed)?;
        if changed == 0 {
            return Err(AppError::EventNotFound(id));
        }
        Ok(())
    }

    fn record(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        ttlog(&self.conn, operation, target, message)
    }
}
