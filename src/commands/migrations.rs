//! Schema inspection for the configured journal file.
//!
//! Opens the file without migrating it, so `status` reports what the next
//! regular open would apply.

use crate::{
    db::{
        db::Db,
        migrations::{get_db_version, MigrationManager},
    },
    libs::{config::Config, messages::Message, view::View},
    msg_info, msg_print, msg_warning,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct MigrationsArgs {
    #[command(subcommand)]
    command: MigrationsCommand,
}

#[derive(Debug, Subcommand)]
enum MigrationsCommand {
    /// Show the schema version and any migrations still to run
    Status,
    /// Show applied and pending migrations with their timestamps
    History,
}

pub fn cmd(args: MigrationsArgs) -> Result<()> {
    let path = Config::read()?.database_file()?;
    let conn = Db::open_without_migrations(&path)?;
    let manager = MigrationManager::new();
    let pending = manager.pending_migrations(&conn)?;

    match args.command {
        MigrationsCommand::Status => {
            msg_print!(Message::DatabaseVersion(get_db_version(&conn)?, manager.latest_version()));
            if pending.is_empty() {
                msg_info!(Message::DatabaseUpToDate);
                return Ok(());
            }

            msg_warning!(Message::DatabaseNeedsUpdate);
            msg_print!(Message::PendingMigrationsHeader, true);
            for (version, name) in &pending {
                msg_print!(format!("  v{} {}", version, name));
            }
        }
        MigrationsCommand::History => {
            let applied = manager.get_migration_history(&conn)?;
            if applied.is_empty() {
                msg_info!(Message::NoMigrationsApplied);
            }

            msg_print!(Message::MigrationHistory, true);
            View::migrations(&applied, &pending);
        }
    }

    Ok(())
}
