use crate::ui::messages::{success, warning};
use chrono::Local;
use rusqlite::{Connection, Error, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn create_games_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS games (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_games_created_at ON games(created_at);
        "#,
    )?;
    Ok(())
}

fn create_events_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            game_name         TEXT NOT NULL,
            title             TEXT NOT NULL,
            start_at          TEXT NOT NULL,
            end_at            TEXT NOT NULL,
            is_remind_needed  INTEGER NOT NULL DEFAULT 1 CHECK(is_remind_needed IN (0,1)),
            is_completed      INTEGER NOT NULL DEFAULT 0 CHECK(is_completed IN (0,1))
        );
        "#,
    )?;
    Ok(())
}

fn ensure_event_indexes(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_events_end_at ON events(end_at);
        CREATE INDEX IF NOT EXISTS idx_events_game_name ON events(game_name);
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        [Local::now().to_rfc3339().as_str(), version, message],
    )?;
    Ok(())
}

/// Event tables imported from the hosted store may lack `start_at`.
/// Add it and back-fill with `end_at`, which renders as a minimum-width bar.
fn migrate_add_start_at_column(conn: &Connection) -> Result<(), Error> {
    let version = "20250601_0001_add_start_at";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    if table_has_column(conn, "events", "start_at")? {
        return Ok(());
    }

    warning("Adding 'start_at' column to events table...");

    // Dropped without commit on any error, which rolls the ALTER back.
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        r#"
        ALTER TABLE events ADD COLUMN start_at TEXT;
        UPDATE events SET start_at = end_at WHERE start_at IS NULL;
        "#,
    )
    .map_err(|e| {
        Error::SqliteFailure(
            rusqlite::ffi::Error::new(1),
            Some(format!("Failed to add 'start_at' column: {}", e)),
        )
    })?;

    mark_applied(&tx, version, "Added start_at to events")?;
    tx.commit()?;

    success(format!(
        "Migration applied: {} → added 'start_at' to events table",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Called from db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !table_exists(conn, "games")? {
        create_games_table(conn)?;
        success("Created games table.");
    }

    if !table_exists(conn, "events")? {
        create_events_table(conn)?;
        success("Created events table.");
    } else {
        migrate_add_start_at_column(conn)?;
    }

    ensure_event_indexes(conn)?;

    Ok(())
}
