//! Colored terminal output for the CLI.

use std::io::{self, Write};

use owo_colors::OwoColorize;

use crate::catalog::Episode;
use crate::history::SimulationRecord;
use crate::scenario::{AlignmentScore, ScenarioTag};
use crate::simulation::SimulationResult;

/// Maximum length for truncated display strings.
const DEFAULT_MAX_LEN: usize = 80;

/// Truncate a string to at most `max_len` characters, adding an ellipsis if truncated.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    }
}

/// One-line rendering of alignment scores.
#[must_use]
pub fn format_scores(scores: &AlignmentScore) -> String {
    format!(
        "VC: {}% | Founder: {}% | Balance: {}%",
        scores.vc, scores.founder, scores.balance
    )
}

fn heading(tag: ScenarioTag) -> String {
    match tag {
        ScenarioTag::VcWin => tag.heading().red().bold().to_string(),
        ScenarioTag::FounderWin => tag.heading().green().bold().to_string(),
        ScenarioTag::WinWin => tag.heading().yellow().bold().to_string(),
    }
}

/// Print the episode list.
pub fn print_episodes(episodes: &[Episode]) {
    if episodes.is_empty() {
        println!("{}", "No episodes loaded".dimmed());
    }
    for ep in episodes {
        println!(
            "{} {} {}",
            ep.episode_id.cyan().bold(),
            ep.title.bold(),
            format!("[{}]", ep.conflict_type).dimmed()
        );
        if !ep.legal_stakes.is_empty() {
            println!("    {}", truncate(&ep.legal_stakes, DEFAULT_MAX_LEN).dimmed());
        }
    }
    let _ = io::stdout().flush();
}

/// Print the three scenarios of a simulation.
pub fn print_simulation(result: &SimulationResult) {
    let ep = &result.episode;
    println!(
        "{} {} ({})",
        "[EPISODE]".blue().bold(),
        ep.title.bold(),
        ep.episode_id.cyan()
    );
    println!("  conflict={}", ep.conflict_type.dimmed());

    for (tag, payload) in result.scenarios.iter() {
        println!();
        println!("{}", heading(tag));
        println!("  {}", payload.narrative);
        for clause in &payload.clauses {
            println!(
                "  - {} {}",
                format!("{}:", clause.clause_type).bold(),
                truncate(&clause.short_text, DEFAULT_MAX_LEN)
            );
        }
        println!(
            "  {}",
            format_scores(result.alignment_scores.get(tag)).dimmed()
        );
    }
    let _ = io::stdout().flush();
}

/// Print stored history rows.
pub fn print_history(records: &[SimulationRecord]) {
    if records.is_empty() {
        println!("{}", "No simulations recorded".dimmed());
    }
    for record in records {
        println!(
            "{} {} {} {} {}",
            record
                .created_at
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
                .dimmed(),
            format!("#{}", record.id).bold(),
            record.episode_id.cyan(),
            heading(record.scenario),
            format_scores(&record.alignment_scores).dimmed()
        );
        println!("    {}", truncate(&record.narrative, DEFAULT_MAX_LEN));
    }
    let _ = io::stdout().flush();
}
