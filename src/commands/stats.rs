use crate::{
    db::db::Db,
    libs::{config::Config, messages::Message, statistics::Statistics, view::View},
    msg_info, msg_print, msg_warning,
};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let config = Config::read()?;
    let mut db = Db::new()?;
    let stats = Statistics::compute(&mut db)?;

    msg_print!(Message::StatisticsHeader(config.user_name), true);
    View::statistics(&stats);

    msg_print!(Message::DifficultyHeader, true);
    View::difficulty(&stats);

    msg_print!(Message::UpcomingHeader, true);
    if stats.upcoming_hikes.is_empty() {
        msg_info!(Message::NoUpcomingHikes);
    } else {
        View::hikes(&stats.upcoming_hikes);
    }

    if stats.skipped_dates > 0 {
        msg_warning!(Message::SkippedUnparseableDates(stats.skipped_dates));
    }
    Ok(())
}
