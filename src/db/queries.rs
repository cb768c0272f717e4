use crate::errors::{AppError, AppResult};
use crate::models::event::{Event, NewEvent};
use crate::models::game::{Game, NewGame};
use crate::utils::date::{from_db_timestamp, to_db_timestamp};
use chrono::{DateTime, Local};
use rusqlite::params;
use rusqlite::{Connection, Result, Row};

fn timestamp_column(row: &Row, column: &str) -> Result<DateTime<Local>> {
    let raw: String = row.get(column)?;
    from_db_timestamp(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(format!("{}: {}", column, raw))),
        )
    })
}

pub fn map_game_row(row: &Row) -> Result<Game> {
    Ok(Game {
        id: row.get("id")?,
        name: row.get("name")?,
        created_at: timestamp_column(row, "created_at")?,
    })
}

pub fn map_event_row(row: &Row) -> Result<Event> {
    Ok(Event {
        id: row.get("id")?,
        game_name: row.get("game_name")?,
        title: row.get("title")?,
        start_at: timestamp_column(row, "start_at")?,
        end_at: timestamp_column(row, "end_at")?,
        is_remind_needed: row.get::<_, i32>("is_remind_needed")? == 1,
        is_completed: row.get::<_, i32>("is_completed")? == 1,
    })
}

pub fn select_games(conn: &Connection) -> AppResult<Vec<Game>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, created_at FROM games
         ORDER BY created_at ASC, id ASC",
    )?;

    let rows = stmt.query_map([], map_game_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn select_events(conn: &Connection) -> AppResult<Vec<Event>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, game_name, title, start_at, end_at, is_remind_needed, is_completed
         FROM events
         ORDER BY end_at ASC, id ASC",
    )?;

    let rows = stmt.query_map([], map_event_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_game(conn: &Connection, game: &NewGame) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO games (name, created_at) VALUES (?1, ?2)",
        params![game.name, to_db_timestamp(&game.created_at)],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_event(conn: &Connection, ev: &NewEvent) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO events (game_name, title, start_at, end_at, is_remind_needed, is_completed)
         VALUES (?1, ?2, ?3, ?4, ?5, 0)",
        params![
            ev.game_name,
            ev.title,
            to_db_timestamp(&ev.start_at),
            to_db_timestamp(&ev.end_at),
            if ev.is_remind_needed { 1 } else { 0 },
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Returns the number of rows touched (0 when `id` does not exist).
pub fn update_event_completion(conn: &Connection, id: i64, completed: bool) -> AppResult<usize> {
    let changed = conn.execute(
        "UPDATE events SET is_completed = ?1 WHERE id = ?2",
        params![if completed { 1 } else { 0 }, id],
    )?;
    Ok(changed)
}
