use crate::cli::commands::{clock, load_state, open_store};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::render::{RenderOptions, render};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::View {
        game,
        no_sidebar,
        plain,
    } = &cli.command
    {
        let now = clock(cli)?;
        let mut store = open_store(cfg)?;
        let mut state = load_state(&mut store, cfg)?;

        if *no_sidebar && state.sidebar_open {
            state.toggle_sidebar();
        }
        state.select_game(game.as_deref())?;

        let opts = RenderOptions {
            timeline_width: cfg.timeline_width,
            color: cfg.color && !*plain,
        };
        print!("{}", render(&state, now, &opts)?);
    }

    Ok(())
}
