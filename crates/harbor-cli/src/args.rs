use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    ClientCommands, ReferentCommands, ShortlistCommands, StepCommands, TaskCommands,
    WeeklyCommands,
};

/// Main command-line interface for the Harbor aftercare coordination tool
///
/// Harbor tracks each client's discharge plan: the dependency-gated planning
/// checklist with due dates, the shortlist of candidate aftercare programs,
/// follow-up tasks, the referent contact record, and weekly case-review
/// updates. It can also run as an MCP (Model Context Protocol) server for
/// integration with AI assistants.
#[derive(Parser)]
#[command(version, about, name = "harbor")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/harbor/harbor.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Harbor CLI
///
/// Commands are grouped by the part of the discharge plan they touch:
/// clients, checklist steps, the program shortlist, weekly updates, tasks
/// and the referent record. `serve` starts the MCP server.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage client plans
    #[command(alias = "c")]
    Client {
        #[command(subcommand)]
        command: ClientCommands,
    },
    /// Manage checklist steps
    #[command(alias = "s")]
    Step {
        #[command(subcommand)]
        command: StepCommands,
    },
    /// Manage the program shortlist
    #[command(alias = "sl")]
    Shortlist {
        #[command(subcommand)]
        command: ShortlistCommands,
    },
    /// Manage weekly case-review updates
    #[command(alias = "w")]
    Weekly {
        #[command(subcommand)]
        command: WeeklyCommands,
    },
    /// Manage follow-up tasks
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Manage the referent contact record
    #[command(alias = "r")]
    Referent {
        #[command(subcommand)]
        command: ReferentCommands,
    },
    /// Start the MCP server
    Serve,
}
