//! Terminal output formatting

use crate::models::{HostReport, ProbeResult};
use crate::runner::{CycleSummary, HostOutcome};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar over the host list
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let template = ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(template.progress_chars("█▓░"));
    pb.set_message(message.to_string());
    pb
}

/// Print section header
pub fn print_header(title: &str) {
    println!();
    println!(
        "{}",
        style(format!("━━━ {} ━━━", title)).cyan().bold()
    );
    println!();
}

/// Print one line per host, followed by its probes and findings.
///
/// Expiry is highlighted against the same `threshold_days` the audit used.
pub fn print_outcome(outcome: &HostOutcome, threshold_days: i64) {
    match outcome {
        HostOutcome::Completed { report, .. } => print_report(report, threshold_days),
        HostOutcome::Failed { hostname, error } => {
            println!(
                "  {} {} {}",
                style("✗ Error").red().dim(),
                style(hostname).bold(),
                style(format!("- {}", error)).red().dim()
            );
        }
        HostOutcome::TimedOut { hostname } => {
            println!(
                "  {} {}",
                style("✗ Timed out").red().dim(),
                style(hostname).bold()
            );
        }
    }
}

fn print_report(report: &HostReport, threshold_days: i64) {
    let status = if report.has_findings() {
        style("! Issues").yellow().to_string()
    } else {
        style("✓ OK").green().to_string()
    };

    let expiry = report
        .days_until_expiry
        .map(|days| format_expiry_days(days, threshold_days))
        .unwrap_or_default();

    println!("  {} {} {}", status, style(&report.hostname).bold(), expiry);

    if let Some(cert) = &report.certificate {
        println!(
            "      {} {} {} {}",
            style("cert:").dim(),
            cert.subject_cn(),
            style("issued by").dim(),
            cert.issuer_cn()
        );
    }

    if let Some(error) = &report.fetch_error {
        println!("      {} {}", style("fetch:").dim(), style(error).red().dim());
    }

    if !report.probes.is_empty() {
        let probes: Vec<String> = report.probes.iter().map(format_probe).collect();
        println!("      {}", probes.join("  "));
    }

    for finding in &report.findings {
        println!(
            "      {} {} {}",
            style("⚠").yellow(),
            style(format!("[{}]", finding.category)).yellow(),
            finding.detail
        );
    }
}

fn format_probe(probe: &ProbeResult) -> String {
    let name = probe.protocol.to_string();
    match (probe.accepted, probe.protocol.is_deprecated()) {
        (true, true) => style(format!("✗ {}", name)).red().to_string(),
        (true, false) => style(format!("✓ {}", name)).green().to_string(),
        (false, _) if probe.protocol.is_modern() => style(format!("– {}", name)).yellow().to_string(),
        (false, _) => style(format!("– {}", name)).dim().to_string(),
    }
}

/// How urgently an expiry date should be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExpiryLevel {
    Expired,
    Expiring,
    Approaching,
    Distant,
}

/// `days` below the threshold matches the auditor's `CertExpiringSoon` rule
fn expiry_level(days: i64, threshold_days: i64) -> ExpiryLevel {
    if days < 0 {
        ExpiryLevel::Expired
    } else if days < threshold_days {
        ExpiryLevel::Expiring
    } else if days <= threshold_days.max(0) + 30 {
        ExpiryLevel::Approaching
    } else {
        ExpiryLevel::Distant
    }
}

fn format_expiry_days(days: i64, threshold_days: i64) -> String {
    match expiry_level(days, threshold_days) {
        ExpiryLevel::Expired => style(format!("(expired {} days ago)", days.abs()))
            .red()
            .to_string(),
        ExpiryLevel::Expiring => style(format!("({} days)", days)).red().bold().to_string(),
        ExpiryLevel::Approaching => style(format!("({} days)", days)).yellow().to_string(),
        ExpiryLevel::Distant => style(format!("({} days)", days)).dim().to_string(),
    }
}

/// Print cycle totals
pub fn print_cycle_summary(summary: &CycleSummary) {
    print_header("Audit Summary");

    println!("  Hosts audited: {}", style(summary.total()).bold());
    println!("  Completed: {}", style(summary.completed()).green());
    println!("  Failed: {}", style(summary.failed()).red());
    println!("  Timed out: {}", style(summary.timed_out()).red());
    println!("  Findings: {}", style(summary.findings().count()).yellow());
    println!("  Notifications delivered: {}", style(summary.delivered()).cyan());
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}
