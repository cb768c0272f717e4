use crate::cli::commands::{clock, load_state, open_store, warn_stale};
use crate::cli::parser::{Cli, Commands, EndArgs, EventAction};
use crate::config::Config;
use crate::core::calculator::remaining::remaining_time;
use crate::core::state::{AppState, Modal};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::formatting::fit_width;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Event { action } = &cli.command else {
        return Ok(());
    };

    let now = clock(cli)?;
    let mut store = open_store(cfg)?;
    let mut state = load_state(&mut store, cfg)?;

    match action {
        EventAction::Add {
            title,
            game,
            end,
            remind,
            no_remind,
        } => {
            state.select_game(Some(game.as_str()))?;
            state.open_modal(Modal::Event)?;
            let remind_needed = match (*remind, *no_remind) {
                (_, true) => false,
                (true, _) => true,
                _ => state.event_form.remind_needed,
            };
            fill_event_form(&mut state, title, end, remind_needed);

            let id = state.submit_event(&mut store, now)?;

            match state.events.iter().find(|e| e.id == id) {
                Some(ev) => success(format!(
                    "Event #{} '{}' added to {}, due {} ({})",
                    ev.id,
                    ev.title,
                    ev.game_name,
                    ev.end_str(),
                    remaining_time(&ev.end_at, &now)
                )),
                None => success(format!("Event #{} added to {}", id, game)),
            }
            warn_stale(&state);
        }

        EventAction::List { game, json } => {
            state.select_game(game.as_deref())?;
            let events = state.visible_events();

            if *json {
                let out = serde_json::to_string_pretty(&events)
                    .map_err(|e| AppError::Other(e.to_string()))?;
                println!("{}", out);
            } else if events.is_empty() {
                println!("No events.");
            } else {
                for ev in events {
                    let tag = if ev.is_remind_needed { "" } else { " [Schedule]" };
                    let done = if ev.is_completed { "done" } else { "open" };
                    println!(
                        "{:>4}  {}  {}  {}  {:<4}  {}{}",
                        ev.id,
                        fit_width(&ev.game_name, 14),
                        fit_width(&ev.title, 24),
                        ev.end_str(),
                        done,
                        remaining_time(&ev.end_at, &now),
                        tag
                    );
                }
            }
        }

        EventAction::Done { id } => {
            let completed = state.toggle_completion(&mut store, *id)?;
            if completed {
                success(format!("Event #{} marked as completed", id));
            } else {
                info(format!("Event #{} reopened", id));
            }
            warn_stale(&state);
        }
    }

    Ok(())
}

/// Copy command-line values into the event form, honouring the
/// one-mode-at-a-time rule of the form.
pub fn fill_event_form(state: &mut AppState, title: &str, end: &EndArgs, remind_needed: bool) {
    let form = &mut state.event_form;
    form.title = title.to_string();
    form.remind_needed = remind_needed;

    if let Some(days) = &end.days {
        form.set_days_later(days);
    }
    if let Some(hours) = &end.hours {
        form.set_hours_later(hours);
    }
    if let Some(date) = &end.date {
        form.set_fixed_date(date);
    }
}
