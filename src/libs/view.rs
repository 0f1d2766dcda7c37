use crate::libs::formatter::{format_display_date, format_display_time, format_distance, format_group_size};
use crate::libs::hike::{Difficulty, Hike};
use crate::libs::observation::Observation;
use crate::libs::statistics::Statistics;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn hikes(hikes: &[Hike]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "LOCATION", "DATE", "LENGTH", "DIFFICULTY", "DURATION"]);
        for hike in hikes {
            table.add_row(row![
                hike.id.unwrap_or(0),
                hike.name,
                hike.location,
                format_display_date(&hike.date),
                format_distance(hike.length_km),
                hike.difficulty,
                hike.estimated_duration
            ]);
        }
        table.printstd();
    }

    pub fn hike(hike: &Hike, observation_count: usize) {
        let mut table = Table::new();

        table.add_row(row!["ID", hike.id.unwrap_or(0)]);
        table.add_row(row!["Name", hike.name]);
        table.add_row(row!["Location", hike.location]);
        table.add_row(row!["Date", format_display_date(&hike.date)]);
        table.add_row(row!["Length", format_distance(hike.length_km)]);
        table.add_row(row!["Difficulty", hike.difficulty]);
        table.add_row(row!["Parking", hike.parking_available]);
        table.add_row(row!["Duration", hike.estimated_duration]);
        table.add_row(row!["Max group size", format_group_size(hike.max_group_size)]);
        table.add_row(row!["Description", hike.description]);
        table.add_row(row!["Observations", observation_count]);
        table.printstd();
    }

    pub fn observations(observations: &[Observation]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "TIME", "OBSERVATION", "COMMENT"]);
        for observation in observations {
            table.add_row(row![
                observation.id.unwrap_or(0),
                format_display_time(&observation.time),
                observation.observation,
                observation.comment.as_deref().unwrap_or("")
            ]);
        }
        table.printstd();
    }

    pub fn statistics(stats: &Statistics) {
        let mut table = Table::new();

        table.add_row(row!["Total hikes", stats.total_hikes]);
        table.add_row(row!["Total observations", stats.total_observations]);
        table.add_row(row!["Total distance", format_distance(stats.total_distance_km)]);
        table.printstd();
    }

    pub fn difficulty(stats: &Statistics) {
        let mut table = Table::new();

        table.add_row(row!["DIFFICULTY", "HIKES", "SHARE"]);
        for level in Difficulty::ALL {
            let bucket = stats.difficulty.bucket(level);
            table.add_row(row![level, bucket.count, format!("{}%", bucket.percent)]);
        }
        table.printstd();
    }

    /// Applied versions with their timestamps, then the ones still pending.
    pub fn migrations(applied: &[(u32, String, String)], pending: &[(u32, &str)]) {
        let mut table = Table::new();

        table.add_row(row!["VERSION", "NAME", "APPLIED"]);
        for (version, name, applied_at) in applied {
            table.add_row(row![format!("v{}", version), name, applied_at]);
        }
        for (version, name) in pending {
            table.add_row(row![format!("v{}", version), name, "pending"]);
        }
        table.printstd();
    }
}
