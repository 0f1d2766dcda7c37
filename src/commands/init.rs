//! Interactive settings setup.

use crate::{
    libs::{config::Config, messages::Message},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Print the current settings instead of prompting
    #[arg(short, long)]
    show: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.show {
        let config = Config::read()?;
        msg_info!(format!("User name: {}", config.user_name));
        msg_info!(format!("Sort order: {}", config.sort_order.label()));
        msg_info!(format!("Database: {}", config.database_file()?.display()));
        return Ok(());
    }

    Config::init()?.save()?;
    msg_success!(Message::ConfigSaved);
    Ok(())
}
