//! TUI rendering traits for recruitcal types.
//!
//! Extension traits that add colored terminal rendering to recruitcal-core
//! types using owo_colors.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use owo_colors::OwoColorize;
use recruitcal_core::notify::SentNotification;
use recruitcal_core::{Candidate, InterviewEvent, ProposedEvent, SessionState};

pub trait Render {
    fn render(&self) -> String;
}

/// Rendering for types whose output depends on the display time zone.
pub trait RenderIn {
    fn render_in(&self, tz: Tz) -> String;
}

impl Render for Candidate {
    fn render(&self) -> String {
        let flag = if self.notified {
            format!(" {}", "(notified)".green())
        } else {
            String::new()
        };
        format!(
            "{} {}{}",
            self.full_name().bold(),
            format!("{}, {}", self.position, self.email).dimmed(),
            flag
        )
    }
}

impl Render for SessionState {
    fn render(&self) -> String {
        match self {
            SessionState::Idle => "idle".dimmed().to_string(),
            SessionState::ProposingNew => "new interview".yellow().to_string(),
            SessionState::ProposingEdit => "editing interview".yellow().to_string(),
        }
    }
}

impl RenderIn for InterviewEvent {
    fn render_in(&self, tz: Tz) -> String {
        let start = self.start.with_timezone(&tz);
        let end = self.end.with_timezone(&tz);
        let status = if self.notified {
            "notified".green().to_string()
        } else {
            "pending".yellow().to_string()
        };
        format!(
            "{}-{} {} {}",
            start.format("%H:%M"),
            end.format("%H:%M"),
            self,
            format!("[{}]", status).dimmed()
        )
    }
}

impl RenderIn for ProposedEvent {
    fn render_in(&self, tz: Tz) -> String {
        let event = self.event();
        format!(
            "{}, {} {}",
            event.title.bold(),
            event.position,
            format_instant(event.start, tz).cyan()
        )
    }
}

impl Render for SentNotification {
    fn render(&self) -> String {
        format!("Notification sent to {}", self.address)
            .green()
            .to_string()
    }
}

/// Format an instant as local "YYYY-MM-DD HH:MM", the format the prompts accept.
pub fn format_instant(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%Y-%m-%d %H:%M").to_string()
}

/// Render the pool as a numbered list.
pub fn render_pool(candidates: &[Candidate]) -> String {
    if candidates.is_empty() {
        return "   Everyone has an interview".dimmed().to_string();
    }

    candidates
        .iter()
        .map(|c| format!("   {} {}", c.id.to_string().dimmed(), c.render()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render interviews grouped by local day, earliest first.
pub fn render_schedule(events: &[InterviewEvent], tz: Tz, today: NaiveDate) -> String {
    if events.is_empty() {
        return "   No interviews scheduled".dimmed().to_string();
    }

    let mut sorted: Vec<&InterviewEvent> = events.iter().collect();
    sorted.sort_by_key(|e| e.start);

    let mut lines = Vec::new();
    let mut current_date: Option<NaiveDate> = None;

    for event in sorted {
        let date = event.start.with_timezone(&tz).date_naive();
        if current_date != Some(date) {
            if current_date.is_some() {
                lines.push(String::new());
            }
            lines.push(format!("   {}", date_label(date, today).bold()));
            current_date = Some(date);
        }
        lines.push(format!("     {}", event.render_in(tz)));
    }

    lines.join("\n")
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

/// Human-readable day label ("Today", "Tomorrow", "Wed Mar 20").
fn date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn date_labels() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(date_label(today, today), "Today");
        assert_eq!(date_label(today.succ_opt().unwrap(), today), "Tomorrow");
        assert_eq!(
            date_label(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(), today),
            "Wed Mar 20"
        );
    }

    #[test]
    fn instants_format_in_zone() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 20, 14, 0, 0).unwrap();
        assert_eq!(format_instant(instant, Tz::UTC), "2024-03-20 14:00");
        assert_eq!(format_instant(instant, Tz::Europe__Paris), "2024-03-20 15:00");
    }
}
