use crate::db::pool::DbPool;
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::date::from_db_timestamp;
use rusqlite::OptionalExtension;
use std::fs;

fn count(pool: &DbPool, sql: &str) -> rusqlite::Result<i64> {
    pool.conn.query_row(sql, [], |row| row.get(0))
}

fn show_timestamp(raw: Option<String>) -> String {
    raw.and_then(|s| from_db_timestamp(&s))
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| format!("{GREY}--{RESET}"))
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    header("Database info");

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) COUNTS
    //
    let games = count(pool, "SELECT COUNT(*) FROM games")?;
    let events = count(pool, "SELECT COUNT(*) FROM events")?;
    let open = count(pool, "SELECT COUNT(*) FROM events WHERE is_completed = 0")?;

    println!("{}• Games:{} {}{}{}", CYAN, RESET, GREEN, games, RESET);
    println!(
        "{}• Events:{} {}{}{} ({} open, {} completed)",
        CYAN,
        RESET,
        GREEN,
        events,
        RESET,
        open,
        events - open
    );

    //
    // 3) DEADLINE RANGE
    //
    let first_end: Option<String> = pool
        .conn
        .query_row(
            "SELECT end_at FROM events ORDER BY end_at ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_end: Option<String> = pool
        .conn
        .query_row(
            "SELECT end_at FROM events ORDER BY end_at DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    println!("{}• Deadlines:{}", CYAN, RESET);
    println!("    from: {}", show_timestamp(first_end));
    println!("    to:   {}", show_timestamp(last_end));

    println!();
    Ok(())
}
