#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Duration, Local, TimeZone};
use eventboard::db::initialize::init_db;
use eventboard::db::pool::DbPool;
use eventboard::models::event::Event;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn evb() -> Command {
    cargo_bin_cmd!("eventboard")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_eventboard.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize the schema of `db_path` through the CLI
pub fn init_cli_db(db_path: &str) {
    evb()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Fresh in-memory store with the full schema
pub fn memory_store() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    pool
}

/// A fixed local instant, safe from DST transitions in common zones
pub fn local(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(y, m, d, h, min, s)
        .earliest()
        .expect("valid local time")
}

pub fn event(id: i64, game: &str, title: &str, remind: bool, end: DateTime<Local>) -> Event {
    Event {
        id,
        game_name: game.to_string(),
        title: title.to_string(),
        start_at: end - Duration::hours(1),
        end_at: end,
        is_remind_needed: remind,
        is_completed: false,
    }
}

pub fn titles(events: &[Event]) -> Vec<&str> {
    events.iter().map(|e| e.title.as_str()).collect()
}
