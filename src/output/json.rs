//! JSON output formatter

use crate::runner::CycleSummary;
use serde::Serialize;

/// JSON-serializable cycle output
#[derive(Serialize)]
pub struct JsonOutput<'a> {
    pub cycle: u64,
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
    pub timed_out: usize,
    pub findings: usize,
    pub delivered: usize,
    pub hosts: &'a CycleSummary,
}

impl<'a> JsonOutput<'a> {
    pub fn new(cycle: u64, summary: &'a CycleSummary) -> Self {
        Self {
            cycle,
            total: summary.total(),
            completed: summary.completed(),
            failed: summary.failed(),
            timed_out: summary.timed_out(),
            findings: summary.findings().count(),
            delivered: summary.delivered(),
            hosts: summary,
        }
    }
}

/// Render a cycle as pretty-printed JSON
pub fn to_json(cycle: u64, summary: &CycleSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonOutput::new(cycle, summary))
}

/// Print a cycle as JSON to stdout
pub fn print_json(cycle: u64, summary: &CycleSummary) -> serde_json::Result<()> {
    println!("{}", to_json(cycle, summary)?);
    Ok(())
}
