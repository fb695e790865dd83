use anyhow::Result;
use owo_colors::OwoColorize;
use recruitcal_core::CandidateRepository;
use recruitcal_core::config::SchedulerConfig;

use crate::render::render_pool;

pub fn run(config: &SchedulerConfig, json: bool) -> Result<()> {
    let pool = CandidateRepository::from_seed(config.candidates.iter().cloned())?;

    if json {
        println!("{}", serde_json::to_string_pretty(pool.list())?);
        return Ok(());
    }

    println!("{}", format!("Candidates ({})", pool.len()).bold());
    println!("{}", render_pool(pool.list()));

    Ok(())
}
