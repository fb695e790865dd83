//! Interactive scheduling session.
//!
//! Stands in for the calendar UI: every choice made here is forwarded to the
//! controller as the matching gesture (drop, select, move, resize, delete,
//! notify), and failures are shown as notices without ending the session.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use dialoguer::{Confirm, Input, Select};
use owo_colors::OwoColorize;
use recruitcal_core::config::SchedulerConfig;
use recruitcal_core::notify::OutboxNotifier;
use recruitcal_core::{Candidate, CandidateId, InterviewEvent, SchedulingController, SessionState};

use crate::input::{parse_length, parse_start};
use crate::render::{Render, RenderIn, format_instant, pluralize, render_pool, render_schedule};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Schedule,
    Edit,
    Move,
    Resize,
    Notify,
    Delete,
    AutoAssign,
    Quit,
}

impl Action {
    fn label(self) -> &'static str {
        match self {
            Action::Schedule => "Schedule a candidate",
            Action::Edit => "Edit an interview",
            Action::Move => "Move an interview",
            Action::Resize => "Change an interview's length",
            Action::Notify => "Notify a candidate",
            Action::Delete => "Delete an interview",
            Action::AutoAssign => "Auto-assign everyone left",
            Action::Quit => "Quit",
        }
    }
}

pub fn run(config: &SchedulerConfig) -> Result<()> {
    let tz = config.timezone()?;
    let outbox = OutboxNotifier::new();
    let mut controller = SchedulingController::from_config(config)?.with_notifier(outbox.clone());

    loop {
        println!();
        print_overview(&controller, tz);

        let actions = available_actions(&controller);
        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
        let selection = Select::new()
            .with_prompt("  What next?")
            .items(&labels)
            .default(0)
            .interact()?;

        let action = actions[selection];
        if action == Action::Quit {
            break;
        }

        if let Err(e) = perform(action, &mut controller, tz) {
            eprintln!("  {}", e.to_string().red());
        }

        for sent in outbox.drain() {
            println!("  {}", sent.render());
        }
    }

    Ok(())
}

fn print_overview(controller: &SchedulingController, tz: Tz) {
    let pool = controller.candidates();
    let today = Utc::now().with_timezone(&tz).date_naive();

    println!("{}", format!("Candidates ({})", pool.len()).bold());
    println!("{}", render_pool(pool.list()));
    println!();
    println!("{}", format!("Interviews ({})", controller.events().len()).bold());
    println!("{}", render_schedule(controller.events().list(), tz, today));
    println!();
}

fn available_actions(controller: &SchedulingController) -> Vec<Action> {
    let has_pool = !controller.candidates().is_empty();
    let has_events = !controller.events().is_empty();
    let has_pending = controller.events().list().iter().any(|e| !e.notified);

    let mut actions = Vec::new();
    if has_pool {
        actions.push(Action::Schedule);
    }
    if has_events {
        actions.extend([Action::Edit, Action::Move, Action::Resize]);
    }
    if has_pending {
        actions.push(Action::Notify);
    }
    if has_events {
        actions.push(Action::Delete);
    }
    if has_pool {
        actions.push(Action::AutoAssign);
    }
    actions.push(Action::Quit);
    actions
}

fn perform(action: Action, controller: &mut SchedulingController, tz: Tz) -> Result<()> {
    match action {
        Action::Schedule => {
            let candidate = pick_candidate(controller)?;
            controller.on_drop(&candidate)?;
            complete_proposal(controller, tz)
        }
        Action::Edit => {
            let id = pick_event(controller, tz, "Interview to edit", |_| true)?;
            controller.on_select_event(id)?;
            complete_proposal(controller, tz)
        }
        Action::Move => {
            let id = pick_event(controller, tz, "Interview to move", |_| true)?;
            let event = find_event(controller, id)?;
            let start = prompt_start(tz, event.start)?;
            let moved = controller.on_move(id, start, start + event.duration())?;
            println!("  {}", format!("Moved: {}", moved.render_in(tz)).green());
            Ok(())
        }
        Action::Resize => {
            let id = pick_event(controller, tz, "Interview to resize", |_| true)?;
            let event = find_event(controller, id)?;
            let length = prompt_length(event.duration())?;
            let resized = controller.on_resize(id, event.start, event.start + length)?;
            println!("  {}", format!("Resized: {}", resized.render_in(tz)).green());
            Ok(())
        }
        Action::Notify => {
            let id = pick_event(controller, tz, "Candidate to notify", |e| !e.notified)?;
            if !controller.on_notify(id) {
                println!("  {}", "Already notified".dimmed());
            }
            Ok(())
        }
        Action::Delete => {
            let id = pick_event(controller, tz, "Interview to delete", |_| true)?;
            let event = find_event(controller, id)?;
            let confirmed = Confirm::new()
                .with_prompt(format!("  Delete the interview with {}?", event.title))
                .default(false)
                .interact()?;
            if !confirmed {
                return Ok(());
            }
            if let Some(candidate) = controller.on_delete_event(id)? {
                println!(
                    "  {}",
                    format!("{} is back in the pool", candidate.full_name()).yellow()
                );
            }
            Ok(())
        }
        Action::AutoAssign => {
            let planned = controller.on_auto_assign(Utc::now())?;
            println!(
                "  {}",
                format!(
                    "Assigned {} {}",
                    planned.len(),
                    pluralize("candidate", planned.len())
                )
                .green()
            );
            Ok(())
        }
        Action::Quit => Ok(()),
    }
}

/// Walk the open proposal through the start prompt and save/cancel.
/// Any prompt failure cancels the proposal so the session returns to idle.
fn complete_proposal(controller: &mut SchedulingController, tz: Tz) -> Result<()> {
    let result = confirm_proposal(controller, tz);
    if result.is_err() {
        controller.on_cancel();
    }
    result
}

fn confirm_proposal(controller: &mut SchedulingController, tz: Tz) -> Result<()> {
    let Some(proposal) = controller.proposal() else {
        return Ok(());
    };
    println!();
    println!("  {} {}", controller.state().render(), proposal.render_in(tz));
    let current = proposal.start();

    let start = prompt_start(tz, current)?;
    controller.on_edit_proposed_start(start)?;

    let heading = match controller.state() {
        SessionState::ProposingEdit => "  Save changes?",
        _ => "  Save interview?",
    };
    let save = Confirm::new().with_prompt(heading).default(true).interact()?;

    if save {
        let event = controller.on_confirm()?;
        println!(
            "  {}",
            format!("Saved: {} at {}", event, format_instant(event.start, tz)).green()
        );
    } else {
        controller.on_cancel();
        println!("  {}", "Cancelled".dimmed());
    }

    Ok(())
}

fn pick_candidate(controller: &SchedulingController) -> Result<Candidate> {
    let candidates = controller.candidates().list();
    let items: Vec<String> = candidates.iter().map(|c| c.to_string()).collect();
    let selection = Select::new()
        .with_prompt("  Candidate")
        .items(&items)
        .default(0)
        .interact()?;
    Ok(candidates[selection].clone())
}

fn pick_event<F>(
    controller: &SchedulingController,
    tz: Tz,
    prompt: &str,
    filter: F,
) -> Result<CandidateId>
where
    F: Fn(&InterviewEvent) -> bool,
{
    let events: Vec<&InterviewEvent> = controller
        .events()
        .list()
        .iter()
        .filter(|e| filter(e))
        .collect();
    if events.is_empty() {
        anyhow::bail!("No matching interviews");
    }

    let items: Vec<String> = events
        .iter()
        .map(|e| format!("{} {}", format_instant(e.start, tz), e))
        .collect();
    let selection = Select::new()
        .with_prompt(format!("  {}", prompt))
        .items(&items)
        .default(0)
        .interact()?;
    Ok(events[selection].candidate_id)
}

fn find_event(controller: &SchedulingController, id: CandidateId) -> Result<InterviewEvent> {
    controller
        .events()
        .get(id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("No interview for candidate {}", id))
}

/// Prompt for a start time with retry on parse errors. Empty input keeps `current`.
fn prompt_start(tz: Tz, current: DateTime<Utc>) -> Result<DateTime<Utc>> {
    loop {
        let input: String = Input::new()
            .with_prompt(format!("  Start ({})", format_instant(current, tz)))
            .default(String::new())
            .show_default(false)
            .interact_text()?;
        if input.is_empty() {
            return Ok(current);
        }
        match parse_start(&input, tz) {
            Ok(start) => return Ok(start),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

/// Prompt for an interview length with retry on parse errors. Empty input keeps `current`.
fn prompt_length(current: Duration) -> Result<Duration> {
    let hint = current
        .to_std()
        .map(|d| humantime::format_duration(d).to_string())
        .unwrap_or_default();
    loop {
        let input: String = Input::new()
            .with_prompt(format!("  How long? ({})", hint))
            .default(String::new())
            .show_default(false)
            .interact_text()?;
        if input.is_empty() {
            return Ok(current);
        }
        match parse_length(&input) {
            Ok(length) => return Ok(length),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recruitcal_core::CandidateRepository;
    use recruitcal_core::candidate::default_roster;

    fn controller() -> SchedulingController {
        let pool = CandidateRepository::from_seed(default_roster()).unwrap();
        SchedulingController::new(pool, Duration::hours(1), Tz::UTC)
    }

    #[test]
    fn fresh_session_offers_scheduling_only() {
        let actions = available_actions(&controller());
        assert_eq!(actions, vec![Action::Schedule, Action::AutoAssign, Action::Quit]);
    }

    #[test]
    fn fully_notified_schedule_hides_notify() {
        let mut controller = controller();
        controller.on_auto_assign(Utc::now()).unwrap();
        for id in 1..=3 {
            controller.on_notify(CandidateId(id));
        }

        let actions = available_actions(&controller);
        assert_eq!(
            actions,
            vec![
                Action::Edit,
                Action::Move,
                Action::Resize,
                Action::Delete,
                Action::Quit
            ]
        );
    }
}
