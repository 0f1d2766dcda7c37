//! Command-line interface for hikelog.
//!
//! Each subcommand lives in its own module with an `Args` struct and a `cmd`
//! entry point. All of them open the configured journal through [`Db::new`]
//! and report through the `msg_*` macros.
//!
//! [`Db::new`]: crate::db::db::Db::new

pub mod hike;
pub mod init;
pub mod migrations;
pub mod observation;
pub mod search;
pub mod stats;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Set your name and the default hike order")]
    Init(init::InitArgs),
    #[command(about = "Add, list, show, edit and delete hikes")]
    Hike(hike::HikeArgs),
    #[command(about = "Record and manage observations for a hike", visible_alias = "obs")]
    Observation(observation::ObservationArgs),
    #[command(about = "Find hikes whose name contains a term")]
    Search(search::SearchArgs),
    #[command(about = "Find hikes by name, location, date and length")]
    Find(search::FindArgs),
    #[command(about = "Show totals, difficulty distribution and upcoming hikes")]
    Stats,
    #[command(about = "Inspect the database schema version")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Hike(args) => hike::cmd(args),
            Commands::Observation(args) => observation::cmd(args),
            Commands::Search(args) => search::cmd(args),
            Commands::Find(args) => search::find(args),
            Commands::Stats => stats::cmd(),
            Commands::Migrations(args) => migrations::cmd(args),
        }
    }
}
