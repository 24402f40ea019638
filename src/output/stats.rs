//! Statistics reporting.

use console::style;

use crate::dedup::{Outcome, RegistryStats};

/// Counters for one interactive form session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub submitted: u64,
    pub accepted: u64,
    pub duplicates: u64,
    pub errors: u64,
}

impl SessionStats {
    /// Count a submission the registry answered.
    pub fn record_outcome(&mut self, outcome: &Outcome) {
        self.submitted += 1;
        match outcome {
            Outcome::Accepted(_) => self.accepted += 1,
            Outcome::Duplicate(_) => self.duplicates += 1,
        }
    }

    /// Count a submission that was rejected before reaching the registry.
    pub fn record_error(&mut self) {
        self.submitted += 1;
        self.errors += 1;
    }
}

/// Print statistics for a form session.
pub fn print_session_stats(stats: &SessionStats) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Session Statistics:").bold());
    println!("  Submitted:  {}", stats.submitted);
    println!("  Accepted:   {}", style(stats.accepted).green());
    println!("  Duplicates: {}", style(stats.duplicates).yellow());
    if stats.errors > 0 {
        println!("  Errors:     {}", style(stats.errors).red());
    }
    println!("{}", style("═".repeat(50)).dim());
}

/// Print a summary line for the registry.
pub fn print_registry_summary(stats: &RegistryStats) {
    println!(
        "Registry: {} unique bills ({} accepted, {} duplicates)",
        style(stats.unique).green(),
        style(stats.accepted).green(),
        style(stats.duplicates).yellow()
    );
}
