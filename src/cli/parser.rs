use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for doorbell
/// Kiosk visitor check-in: ring the on-duty shift and keep a durable log
#[derive(Parser)]
#[command(
    name = "doorbell",
    version = env!("CARGO_PKG_VERSION"),
    about = "Kiosk visitor check-in: every ring is stamped with the shift on duty and logged",
    long_about = None
)]
pub struct Cli {
    /// Use this configuration file instead of ~/.doorbell/doorbell.conf
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Override the ring log path (.csv, or .sqlite/.db for SQLite)
    #[arg(global = true, long = "log", value_name = "PATH")]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Admin credentials; prompted on stdin when missing.
#[derive(Args, Clone, Debug, Default)]
pub struct AdminArgs {
    #[arg(long = "user", help = "Admin user name")]
    pub user: Option<String>,

    #[arg(long = "password", help = "Admin password")]
    pub password: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file and an empty ring log
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

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

    /// Show the shift on duty now (or at a given time) and the configured windows
    Shift {
        #[arg(long = "at", help = "HH:MM (today) or YYYY-MM-DDTHH:MM[:SS]")]
        at: Option<String>,
    },

    /// Ring once with the given visitor details
    Ring {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        badge: Option<String>,

        #[arg(long)]
        note: Option<String>,

        #[arg(long, value_name = "FILE", help = "JPEG snapshot to attach")]
        photo: Option<String>,

        #[arg(long, help = "Pin the shift label (admin only)")]
        shift: Option<String>,

        #[command(flatten)]
        admin: AdminArgs,
    },

    /// Run the interactive kiosk on stdin (type :help for commands)
    Kiosk,

    /// List recent rings, newest first
    List {
        #[arg(long, help = "Filter by year/month/day or a custom range")]
        range: Option<String>,

        #[arg(long = "shift", help = "Only these shifts (repeatable)")]
        shifts: Vec<String>,

        #[arg(long, help = "Case-insensitive search on name/username/badge/note")]
        search: Option<String>,

        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Export the (filtered) ring log (admin only)
    Export {
        #[arg(
            long,
            value_enum,
            help = "Output format (default: from the file extension, else csv)"
        )]
        format: Option<ExportFormat>,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long = "shift", help = "Only these shifts (repeatable)")]
        shifts: Vec<String>,

        #[arg(long)]
        search: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,

        #[command(flatten)]
        admin: AdminArgs,
    },

    /// Reset the ring log (admin only); archived to a zip first by default
    Clear {
        #[arg(long, help = "Do not ask for confirmation")]
        yes: bool,

        #[arg(long = "no-backup", help = "Skip the zip archive")]
        no_backup: bool,

        #[command(flatten)]
        admin: AdminArgs,
    },

    /// Print the internal audit log (SQLite backend)
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Write the doorbell chime as a WAV file
    Tone {
        #[arg(long, value_name = "FILE")]
        file: String,
    },
}
