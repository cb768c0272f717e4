use crate::cli::commands::{clock, load_state, open_store, warn_stale};
use crate::cli::parser::{Cli, Commands, GameAction};
use crate::config::Config;
use crate::core::state::Modal;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Game { action } = &cli.command else {
        return Ok(());
    };

    let mut store = open_store(cfg)?;
    let mut state = load_state(&mut store, cfg)?;

    match action {
        GameAction::Add { name } => {
            let now = clock(cli)?;
            state.open_modal(Modal::Game)?;
            state.game_form.name = name.clone();
            let id = state.submit_game(&mut store, now)?;
            success(format!("Game '{}' registered (#{})", name.trim(), id));
            warn_stale(&state);
        }
        GameAction::List { json } => {
            if *json {
                let out = serde_json::to_string_pretty(&state.games)
                    .map_err(|e| AppError::Other(e.to_string()))?;
                println!("{}", out);
            } else if state.games.is_empty() {
                println!("No games registered yet.");
            } else {
                println!("🎮 Games:");
                for g in &state.games {
                    let events = state.events.iter().filter(|e| e.belongs_to(&g.name));
                    let (total, open) = events.fold((0, 0), |(t, o), e| {
                        (t + 1, if e.is_open() { o + 1 } else { o })
                    });
                    println!(
                        "{:>4}  {}  ({} open / {} total, since {})",
                        g.id,
                        g.name,
                        open,
                        total,
                        g.created_at.format("%Y-%m-%d")
                    );
                }
            }
        }
    }

    Ok(())
}
