use crate::{
    db::db::Db,
    libs::{
        formatter::{parse_input_time, to_storage_time},
        messages::Message,
        observation::Observation,
        view::View,
    },
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct ObservationArgs {
    #[command(subcommand)]
    command: ObservationCommand,
}

#[derive(Debug, Subcommand)]
enum ObservationCommand {
    /// Record an observation for a hike
    Add {
        /// Hike ID
        hike_id: i64,
        /// What was observed
        text: String,
        /// Time as "YYYY-MM-DD HH:MM"; defaults to now
        #[arg(short, long)]
        time: Option<String>,
        /// Additional comment
        #[arg(short, long)]
        comment: Option<String>,
    },
    /// List the observations of a hike, latest first
    List {
        /// Hike ID
        hike_id: i64,
    },
    /// Change an observation's text, time or comment
    Edit {
        /// Observation ID
        id: i64,
        #[arg(long)]
        text: Option<String>,
        /// Time as "YYYY-MM-DD HH:MM"
        #[arg(long)]
        time: Option<String>,
        /// Pass an empty string to remove the comment
        #[arg(long)]
        comment: Option<String>,
    },
    /// Delete an observation
    Delete {
        /// Observation ID
        id: i64,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(args: ObservationArgs) -> Result<()> {
    match args.command {
        ObservationCommand::Add { hike_id, text, time, comment } => handle_add(hike_id, text, time, comment),
        ObservationCommand::List { hike_id } => handle_list(hike_id),
        ObservationCommand::Edit { id, text, time, comment } => handle_edit(id, text, time, comment),
        ObservationCommand::Delete { id, yes } => handle_delete(id, yes),
    }
}

fn handle_add(hike_id: i64, text: String, time: Option<String>, comment: Option<String>) -> Result<()> {
    let recorded_at = match time {
        Some(time) => parse_input_time(&time)?,
        None => Local::now().naive_local(),
    };
    let observation = Observation::new(hike_id, text.trim(), recorded_at, comment.as_deref().map(str::trim));
    observation.validate()?;

    let mut db = Db::new()?;
    let hike = match db.hikes()?.get_by_id(hike_id)? {
        Some(hike) => hike,
        None => {
            msg_error!(Message::HikeNotFound(hike_id));
            return Ok(());
        }
    };

    db.observations()?.insert(&observation)?;
    msg_success!(Message::ObservationCreated(hike.name));
    Ok(())
}

fn handle_list(hike_id: i64) -> Result<()> {
    let mut db = Db::new()?;
    let hike = match db.hikes()?.get_by_id(hike_id)? {
        Some(hike) => hike,
        None => {
            msg_error!(Message::HikeNotFound(hike_id));
            return Ok(());
        }
    };

    let observations = db.observations()?.fetch_for_hike(hike_id)?;
    if observations.is_empty() {
        msg_info!(Message::NoObservationsForHike(hike.name));
        return Ok(());
    }

    msg_print!(Message::ObservationsHeader(hike.name), true);
    View::observations(&observations);
    Ok(())
}

fn handle_edit(id: i64, text: Option<String>, time: Option<String>, comment: Option<String>) -> Result<()> {
    if text.is_none() && time.is_none() && comment.is_none() {
        msg_info!(Message::NoChangesDetected);
        return Ok(());
    }

    let db = Db::new()?;
    let observations = db.observations()?;
    let mut observation = match observations.get_by_id(id)? {
        Some(observation) => observation,
        None => {
            msg_error!(Message::ObservationNotFound(id));
            return Ok(());
        }
    };

    if let Some(text) = text {
        observation.observation = text.trim().to_string();
    }
    if let Some(time) = time {
        observation.time = to_storage_time(parse_input_time(&time)?);
    }
    if let Some(comment) = comment {
        let comment = comment.trim();
        observation.comment = (!comment.is_empty()).then(|| comment.to_string());
    }
    observation.validate()?;

    observations.update(&observation)?;
    msg_success!(Message::ObservationUpdated);
    Ok(())
}

fn handle_delete(id: i64, yes: bool) -> Result<()> {
    let db = Db::new()?;
    let observations = db.observations()?;
    if observations.get_by_id(id)?.is_none() {
        msg_error!(Message::ObservationNotFound(id));
        return Ok(());
    }

    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteObservation(id).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    observations.delete(id)?;
    msg_success!(Message::ObservationDeleted(id));
    Ok(())
}
