use crate::{
    db::db::Db,
    libs::{
        config::Config,
        formatter::{parse_input_date, to_storage_date},
        hike::{parking_label, Difficulty, EstimatedDuration, Hike},
        messages::Message,
        search::{HikeFilter, HikeSort},
        view::View,
    },
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{builder::BoolishValueParser, Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct HikeArgs {
    #[command(subcommand)]
    command: HikeCommand,
}

#[derive(Debug, Subcommand)]
enum HikeCommand {
    /// Record a new hike
    Add {
        /// Hike name
        name: String,
        /// Where the hike takes place
        location: String,
        /// Date as DD/MM/YYYY
        date: String,
        /// Length in km
        length: f64,
        /// easy, moderate, hard or very-hard
        #[arg(short = 'D', long, default_value = "moderate")]
        difficulty: Difficulty,
        /// Parking is available at the start
        #[arg(short, long)]
        parking: bool,
        /// <1, 1-2, 2-4, 4-6, 6-8 or >8 hours
        #[arg(short = 't', long)]
        duration: Option<EstimatedDuration>,
        /// Free-text description
        #[arg(short, long)]
        description: Option<String>,
        /// Maximum group size
        #[arg(short, long)]
        group_size: Option<u32>,
    },
    /// List all hikes
    List {
        /// Override the configured order, e.g. date_asc or length_desc
        #[arg(short, long)]
        sort: Option<HikeSort>,
    },
    /// Show one hike with its observations
    Show {
        /// Hike ID
        id: i64,
    },
    /// Change fields of an existing hike
    Edit {
        /// Hike ID
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// Date as DD/MM/YYYY
        #[arg(long)]
        date: Option<String>,
        /// Length in km
        #[arg(long)]
        length: Option<f64>,
        #[arg(long)]
        difficulty: Option<Difficulty>,
        /// yes or no
        #[arg(long, value_parser = BoolishValueParser::new())]
        parking: Option<bool>,
        #[arg(long)]
        duration: Option<EstimatedDuration>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        group_size: Option<u32>,
    },
    /// Delete a hike and all of its observations
    Delete {
        /// Hike ID
        id: i64,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete every hike and observation
    Clear {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(args: HikeArgs) -> Result<()> {
    match args.command {
        HikeCommand::Add {
            name,
            location,
            date,
            length,
            difficulty,
            parking,
            duration,
            description,
            group_size,
        } => {
            let date = parse_input_date(&date)?;
            let mut hike = Hike::new(name.trim(), location.trim(), date, length, difficulty)
                .with_parking(parking)
                .with_duration(duration.unwrap_or_default())
                .with_max_group_size(group_size.unwrap_or(0));
            if let Some(description) = description {
                hike = hike.with_description(description.trim());
            }
            handle_add(hike)
        }
        HikeCommand::List { sort } => handle_list(sort),
        HikeCommand::Show { id } => handle_show(id),
        HikeCommand::Edit {
            id,
            name,
            location,
            date,
            length,
            difficulty,
            parking,
            duration,
            description,
            group_size,
        } => {
            let changes = HikeChanges {
                name,
                location,
                date,
                length,
                difficulty,
                parking,
                duration,
                description,
                group_size,
            };
            handle_edit(id, changes)
        }
        HikeCommand::Delete { id, yes } => handle_delete(id, yes),
        HikeCommand::Clear { yes } => handle_clear(yes),
    }
}

fn handle_add(hike: Hike) -> Result<()> {
    hike.validate()?;

    let id = Db::new()?.hikes()?.insert(&hike)?;
    msg_success!(Message::HikeCreated(id, hike.name));
    Ok(())
}

fn handle_list(sort: Option<HikeSort>) -> Result<()> {
    let sort = match sort {
        Some(sort) => sort,
        None => Config::read()?.sort_order,
    };
    let hikes = Db::new()?.hikes()?.fetch_sorted(HikeFilter::All, sort)?;

    if hikes.is_empty() {
        msg_info!(Message::NoHikesFound);
        return Ok(());
    }

    msg_print!(Message::HikesHeader, true);
    View::hikes(&hikes);
    Ok(())
}

fn handle_show(id: i64) -> Result<()> {
    let mut db = Db::new()?;
    let hike = match db.hikes()?.get_by_id(id)? {
        Some(hike) => hike,
        None => {
            msg_error!(Message::HikeNotFound(id));
            return Ok(());
        }
    };
    let observations = db.observations()?.fetch_for_hike(id)?;

    msg_print!(Message::HikeDetailsHeader(hike.name.clone()), true);
    View::hike(&hike, observations.len());

    if !observations.is_empty() {
        msg_print!(Message::ObservationsHeader(hike.name), true);
        View::observations(&observations);
    }
    Ok(())
}

/// Fields given on the command line for `hike edit`.
#[derive(Debug, Default)]
struct HikeChanges {
    name: Option<String>,
    location: Option<String>,
    date: Option<String>,
    length: Option<f64>,
    difficulty: Option<Difficulty>,
    parking: Option<bool>,
    duration: Option<EstimatedDuration>,
    description: Option<String>,
    group_size: Option<u32>,
}

impl HikeChanges {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.location.is_none()
            && self.date.is_none()
            && self.length.is_none()
            && self.difficulty.is_none()
            && self.parking.is_none()
            && self.duration.is_none()
            && self.description.is_none()
            && self.group_size.is_none()
    }

    fn apply(self, hike: &mut Hike) -> Result<()> {
        if let Some(name) = self.name {
            hike.name = name.trim().to_string();
        }
        if let Some(location) = self.location {
            hike.location = location.trim().to_string();
        }
        if let Some(date) = self.date {
            hike.date = to_storage_date(parse_input_date(&date)?);
        }
        if let Some(length) = self.length {
            hike.length_km = length;
        }
        if let Some(difficulty) = self.difficulty {
            hike.difficulty = difficulty.to_string();
        }
        if let Some(parking) = self.parking {
            hike.parking_available = parking_label(parking).to_string();
        }
        if let Some(duration) = self.duration {
            hike.estimated_duration = duration.to_string();
        }
        if let Some(description) = self.description {
            hike.description = description.trim().to_string();
        }
        if let Some(group_size) = self.group_size {
            hike.max_group_size = group_size;
        }
        Ok(())
    }
}

fn handle_edit(id: i64, changes: HikeChanges) -> Result<()> {
    if changes.is_empty() {
        msg_info!(Message::NoChangesDetected);
        return Ok(());
    }

    let mut db = Db::new()?;
    let mut hike = match db.hikes()?.get_by_id(id)? {
        Some(hike) => hike,
        None => {
            msg_error!(Message::HikeNotFound(id));
            return Ok(());
        }
    };

    changes.apply(&mut hike)?;
    hike.validate()?;

    db.hikes()?.update(&hike)?;
    msg_success!(Message::HikeUpdated(hike.name));
    Ok(())
}

fn handle_delete(id: i64, yes: bool) -> Result<()> {
    let mut db = Db::new()?;
    let hike = match db.hikes()?.get_by_id(id)? {
        Some(hike) => hike,
        None => {
            msg_error!(Message::HikeNotFound(id));
            return Ok(());
        }
    };

    if !yes {
        let observation_count = db.observations()?.count_for_hike(id)?;
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteHike(hike.name.clone(), observation_count).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    db.hikes()?.delete(id)?;
    msg_success!(Message::HikeDeleted(hike.name));
    Ok(())
}

fn handle_clear(yes: bool) -> Result<()> {
    let mut db = Db::new()?;
    let count = db.hikes()?.count()?;

    if count == 0 {
        msg_info!(Message::NoHikesFound);
        return Ok(());
    }

    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmClearAll(count).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    let deleted = db.hikes()?.delete_all()?;
    msg_success!(Message::HikesCleared(deleted));
    Ok(())
}
