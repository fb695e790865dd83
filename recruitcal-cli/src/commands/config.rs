use anyhow::Result;
use owo_colors::OwoColorize;
use recruitcal_core::config::SchedulerConfig;

pub fn run(config: &SchedulerConfig) -> Result<()> {
    let config_path = SchedulerConfig::config_path()?;
    let duration = config.interview_duration()?;
    let tz = config.timezone()?;

    println!("{}", "Paths".bold());
    println!("  Config:      {}", config_path.display());
    println!();
    println!("{}", "Settings".bold());
    println!("  Interviews:  {}", humantime::format_duration(duration.to_std()?));
    println!("  Time zone:   {}", tz.name());
    println!(
        "  Seed:        {}",
        config
            .seed
            .map_or_else(|| "random".to_string(), |s| s.to_string())
    );
    println!("  Candidates:  {}", config.candidates.len());

    Ok(())
}
