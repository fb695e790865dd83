//! Parsing of user-typed dates, times and durations.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Exact formats tried before falling back to natural language.
const EXACT_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S"];

/// Parse an interview start such as "2024-03-20 15:00", "tomorrow 3pm" or
/// "sat 3pm", interpreted as local time in `tz`.
pub fn parse_start(input: &str, tz: Tz) -> Result<DateTime<Utc>> {
    let input = input.trim();

    let naive = match parse_exact(input) {
        Some(dt) => dt,
        None => {
            if !has_time_component(input) {
                anyhow::bail!("Add a time of day to \"{}\" (e.g. \"{} 10am\")", input, input);
            }
            let expanded = expand_abbreviations(input);
            fuzzydate::parse(&expanded)
                .map_err(|_| anyhow::anyhow!("Could not parse date/time: \"{}\"", input))?
        }
    };

    localize(naive, tz)
}

/// Parse a YYYY-MM-DD date as noon local time, a safe instant inside that day.
pub fn parse_date(input: &str, tz: Tz) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date format '{}'. Expected YYYY-MM-DD", input))?;
    localize(date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN)), tz)
}

/// Parse an interview length such as "45m" or "1h 30m".
pub fn parse_length(input: &str) -> Result<Duration> {
    let std_dur = humantime::parse_duration(input.trim())
        .map_err(|e| anyhow::anyhow!("Could not parse duration \"{}\": {}", input, e))?;
    let length = Duration::from_std(std_dur).context("Duration too large")?;
    if length <= Duration::zero() {
        anyhow::bail!("Duration must be longer than zero");
    }
    Ok(length)
}

fn parse_exact(input: &str) -> Option<NaiveDateTime> {
    EXACT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
}

fn localize(naive: NaiveDateTime, tz: Tz) -> Result<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| anyhow::anyhow!("{} does not exist in {}", naive, tz.name()))
}

const WEEKDAYS: [&str; 7] = [
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];

const MONTHS: [&str; 12] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

/// Spell out shortened day and month names ("sat", "tues", "sept") for fuzzydate.
/// A word of three letters or more that starts a day or month name is expanded.
fn expand_abbreviations(input: &str) -> String {
    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            if word.len() < 3 {
                return word;
            }
            WEEKDAYS
                .iter()
                .chain(MONTHS.iter())
                .find(|name| name.starts_with(word))
                .copied()
                .unwrap_or(word)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check if the input mentions a time of day (am/pm, HH:MM, noon, midnight, "at N").
fn has_time_component(input: &str) -> bool {
    let lower = input.to_lowercase();

    if lower.contains("noon") || lower.contains("midnight") {
        return true;
    }

    let bytes = lower.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        // am/pm after a digit, optionally separated by a space: "6pm", "6 pm"
        if (b == b'a' || b == b'p') && bytes.get(i + 1) == Some(&b'm') {
            if i > 0 && bytes[i - 1].is_ascii_digit() {
                return true;
            }
            if i > 1 && bytes[i - 1] == b' ' && bytes[i - 2].is_ascii_digit() {
                return true;
            }
        }

        // HH:MM
        if b == b':'
            && i > 0
            && bytes[i - 1].is_ascii_digit()
            && bytes.get(i + 1).is_some_and(u8::is_ascii_digit)
        {
            return true;
        }
    }

    let after_at = lower
        .find(" at ")
        .map(|pos| &lower[pos + 4..])
        .or_else(|| lower.strip_prefix("at "));
    after_at.is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
}
