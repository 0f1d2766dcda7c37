use crate::{
    db::db::Db,
    libs::{formatter::parse_input_date, messages::Message, search::SearchCriteria, view::View},
    msg_error, msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Part of the hike name, case-insensitive
    term: String,
}

#[derive(Debug, Args)]
pub struct FindArgs {
    /// Part of the hike name
    #[arg(short, long)]
    name: Option<String>,
    /// Part of the location
    #[arg(short, long)]
    location: Option<String>,
    /// Exact date as DD/MM/YYYY
    #[arg(short, long)]
    date: Option<String>,
    /// Minimum length in km
    #[arg(long)]
    min: Option<f64>,
    /// Maximum length in km
    #[arg(long)]
    max: Option<f64>,
}

pub fn cmd(args: SearchArgs) -> Result<()> {
    let hikes = Db::new()?.hikes()?.search_by_name(args.term.trim())?;

    if hikes.is_empty() {
        msg_info!(Message::NoHikesMatching(args.term));
        return Ok(());
    }

    msg_print!(Message::HikesFound(hikes.len()), true);
    View::hikes(&hikes);
    Ok(())
}

pub fn find(args: FindArgs) -> Result<()> {
    if args.min.is_some_and(|km| km < 0.0) || args.max.is_some_and(|km| km < 0.0) {
        msg_error!(Message::NegativeLength);
        return Ok(());
    }

    let criteria = SearchCriteria {
        name: args.name,
        location: args.location,
        date: args.date.as_deref().map(parse_input_date).transpose()?,
        min_length: args.min,
        max_length: args.max,
    };

    if criteria.is_empty() {
        msg_error!(Message::EmptySearchCriteria);
        return Ok(());
    }

    let hikes = Db::new()?.hikes()?.advanced_search(&criteria)?;

    if hikes.is_empty() {
        msg_info!(Message::NoHikesMatchingCriteria);
        return Ok(());
    }

    msg_print!(Message::HikesFound(hikes.len()), true);
    View::hikes(&hikes);
    Ok(())
}
