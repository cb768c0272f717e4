use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for eventboard
/// CLI dashboard to track game deadlines with SQLite
#[derive(Parser)]
#[command(
    name = "eventboard",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track game deadlines on a rolling nine-day timeline using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Pin the current time (RFC 3339 or local YYYY-MM-DDTHH:MM[:SS])
    #[arg(global = true, long = "now", hide = true)]
    pub now: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Register or list games
    Game {
        #[command(subcommand)]
        action: GameAction,
    },

    /// Add, list or complete events
    Event {
        #[command(subcommand)]
        action: EventAction,
    },

    /// Render the dashboard once
    View {
        /// Show only this game (default: overall schedule)
        #[arg(long, short = 'g')]
        game: Option<String>,

        #[arg(long = "no-sidebar", help = "Hide the game list")]
        no_sidebar: bool,

        #[arg(long = "plain", help = "Disable colours")]
        plain: bool,
    },

    /// Interactive session (type `help` inside)
    Shell,
}

#[derive(Subcommand)]
pub enum GameAction {
    /// Register a new game
    Add {
        /// Game name
        name: String,
    },

    /// List games in creation order
    List {
        #[arg(long, help = "Print as JSON")]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum EventAction {
    /// Add an event to a game
    Add {
        /// Event title
        title: String,

        /// Game the event belongs to
        #[arg(long, short = 'g')]
        game: String,

        #[command(flatten)]
        end: EndArgs,

        /// Reminder needed (default comes from the configuration)
        #[arg(long = "remind", conflicts_with = "no_remind")]
        remind: bool,

        /// No reminder: the event is tagged "Schedule" and sorted last
        #[arg(long = "no-remind")]
        no_remind: bool,
    },

    /// List events in display order
    List {
        /// Show only this game
        #[arg(long, short = 'g')]
        game: Option<String>,

        #[arg(long, help = "Print as JSON")]
        json: bool,
    },

    /// Toggle the completion flag of an event
    Done {
        /// Event id
        id: i64,
    },
}

/// Deadline of a new event: a fixed date, or an offset from now.
#[derive(Args, Debug, Clone)]
pub struct EndArgs {
    /// Deadline day (YYYY-MM-DD), ends at 23:59
    #[arg(long, conflicts_with_all = ["days", "hours"])]
    pub date: Option<String>,

    /// Days from now (the current hour, minutes dropped)
    #[arg(long, allow_hyphen_values = true)]
    pub days: Option<String>,

    /// Hours from now, applied after --days
    #[arg(long, allow_hyphen_values = true)]
    pub hours: Option<String>,
}
