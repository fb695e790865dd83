use anyhow::Result;
use chrono::Utc;
use owo_colors::OwoColorize;
use recruitcal_core::SchedulingController;
use recruitcal_core::config::SchedulerConfig;

use crate::input::parse_date;
use crate::render::{pluralize, render_schedule};

pub fn run(
    mut config: SchedulerConfig,
    date: Option<String>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let tz = config.timezone()?;
    let reference = match date {
        Some(d) => parse_date(&d, tz)?,
        None => Utc::now(),
    };
    if seed.is_some() {
        config.seed = seed;
    }

    let mut controller = SchedulingController::from_config(&config)?;
    let planned = controller.on_auto_assign(reference)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&planned)?);
        return Ok(());
    }

    let month = reference.with_timezone(&tz).format("%B %Y");
    println!(
        "{}",
        format!(
            "Assigned {} {} in {}",
            planned.len(),
            pluralize("candidate", planned.len()),
            month
        )
        .green()
    );
    let today = Utc::now().with_timezone(&tz).date_naive();
    println!("{}", render_schedule(controller.events().list(), tz, today));

    Ok(())
}
