pub mod config;
pub mod db;
pub mod event;
pub mod game;
pub mod init;
pub mod log;
pub mod shell;
pub mod view;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::state::AppState;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use crate::utils::date::parse_instant;
use chrono::{DateTime, Local};

/// Current time, or the instant pinned with `--now`.
pub fn clock(cli: &Cli) -> AppResult<DateTime<Local>> {
    match &cli.now {
        Some(s) => parse_instant(s),
        None => Ok(Local::now()),
    }
}

/// Open the configured database, bringing the schema up to date.
pub fn open_store(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

/// Fresh session state, loaded from `store`.
pub fn load_state(store: &mut DbPool, cfg: &Config) -> AppResult<AppState> {
    let mut state = AppState::new(cfg.sidebar_open, cfg.default_remind_needed);
    state.reload(store)?;
    Ok(state)
}

/// Report a reload that failed after a committed write.
pub fn warn_stale(state: &AppState) {
    if let Some(err) = &state.last_error {
        warning(format!("Saved, but the refresh failed: {}", err));
    }
}
