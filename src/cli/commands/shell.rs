//! Interactive session: one `AppState` kept alive across commands.

use crate::cli::commands::event::fill_event_form;
use crate::cli::commands::{clock, open_store};
use crate::cli::parser::{Cli, EndArgs};
use crate::config::Config;
use crate::core::state::{AppState, Modal};
use crate::db::store::Store;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, info, success};
use crate::ui::render::{RenderOptions, render};
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use regex::Regex;
use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(multicall = true)]
struct ShellLine {
    #[command(subcommand)]
    cmd: ShellCommand,
}

#[derive(Subcommand)]
enum ShellCommand {
    /// Render the dashboard
    Show,

    /// Focus one game
    Select {
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// Back to the overall schedule
    All,

    /// Show or hide the game list
    Sidebar,

    /// Register a new game
    AddGame {
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// Add an event to the selected game
    AddEvent {
        title: String,

        #[command(flatten)]
        end: EndArgs,

        #[arg(long = "remind", conflicts_with = "no_remind")]
        remind: bool,

        #[arg(long = "no-remind")]
        no_remind: bool,
    },

    /// Toggle completion of an event
    Done { id: i64 },

    /// Fetch everything again
    Reload,

    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

enum Flow {
    Render,
    Quit,
}

/// Split a line into words; double quotes group words.
fn tokenize(re: &Regex, line: &str) -> Vec<String> {
    re.captures_iter(line)
        .filter_map(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}

fn apply<S: Store + ?Sized>(
    state: &mut AppState,
    store: &mut S,
    cmd: ShellCommand,
    now: DateTime<Local>,
) -> AppResult<Flow> {
    match cmd {
        ShellCommand::Show => {}
        ShellCommand::Select { name } => state.select_game(Some(name.join(" ").as_str()))?,
        ShellCommand::All => state.select_game(None)?,
        ShellCommand::Sidebar => state.toggle_sidebar(),
        ShellCommand::AddGame { name } => {
            state.open_modal(Modal::Game)?;
            state.game_form.name = name.join(" ");
            let id = state.submit_game(store, now)?;
            success(format!("Game #{} registered", id));
        }
        ShellCommand::AddEvent {
            title,
            end,
            remind,
            no_remind,
        } => {
            state.open_modal(Modal::Event)?;
            let remind_needed = match (remind, no_remind) {
                (_, true) => false,
                (true, _) => true,
                _ => state.event_form.remind_needed,
            };
            fill_event_form(state, &title, &end, remind_needed);
            let id = state.submit_event(store, now)?;
            success(format!("Event #{} added", id));
        }
        ShellCommand::Done { id } => {
            let completed = state.toggle_completion(store, id)?;
            if completed {
                success(format!("Event #{} marked as completed", id));
            } else {
                info(format!("Event #{} reopened", id));
            }
        }
        ShellCommand::Reload => state.reload(store)?,
        ShellCommand::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Render)
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let mut store = open_store(cfg)?;
    let mut state = AppState::new(cfg.sidebar_open, cfg.default_remind_needed);
    if let Err(e) = state.reload(&mut store) {
        error(e);
    }

    let opts = RenderOptions {
        timeline_width: cfg.timeline_width,
        color: cfg.color,
    };
    let words = Regex::new(r#""([^"]*)"|(\S+)"#).map_err(|e| AppError::Other(e.to_string()))?;

    print!("{}", render(&state, clock(cli)?, &opts)?);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        print!("eventboard> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            println!();
            break;
        }

        let tokens = tokenize(&words, &line);
        if tokens.is_empty() {
            continue;
        }

        let parsed = match ShellLine::try_parse_from(tokens) {
            Ok(p) => p,
            Err(e) => {
                let _ = e.print();
                continue;
            }
        };

        let now = clock(cli)?;
        match apply(&mut state, &mut store, parsed.cmd, now) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Render) => print!("{}", render(&state, now, &opts)?),
            Err(e) => error(e),
        }
    }

    Ok(())
}
