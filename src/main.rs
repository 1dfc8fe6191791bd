//! TLS Auditor - certificate expiry and protocol version auditing
//!
//! Reads a host list, audits every host and sends each finding to a
//! Telegram chat. Runs once, or periodically with `--interval`.

use anyhow::{bail, Context, Result};
use clap::Parser;
use console::style;
use std::sync::Arc;
use tls_auditor::config;
use tls_auditor::hosts::load_hosts;
use tls_auditor::notify::{LogNotifier, Notifier, TelegramNotifier};
use tls_auditor::output;
use tls_auditor::runner::{run_scheduled, RunOptions};
use tls_auditor::{Auditor, Cli};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Install the ring crypto provider for rustls
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut settings =
        config::load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply(&mut settings);
    settings
        .validate(!cli.dry_run)
        .context("Invalid configuration")?;

    let Some(hosts_file) = settings.audit.hosts_file.clone() else {
        bail!("No host list given: pass --hosts or set SUBDOMAIN_FILE_PATH");
    };
    let hosts = load_hosts(&hosts_file)
        .with_context(|| format!("Failed to read host list {}", hosts_file.display()))?;
    if hosts.is_empty() {
        bail!("No hostnames found in {}", hosts_file.display());
    }

    let notifier: Arc<dyn Notifier> = if cli.dry_run {
        Arc::new(LogNotifier)
    } else {
        Arc::new(TelegramNotifier::new(&settings.notify)?)
    };
    let auditor = Auditor::new(&settings, notifier)?;

    let options = RunOptions {
        parallel: settings.audit.parallel,
        host_timeout: settings.audit.host_timeout(),
        interval: cli.interval(),
        count: cli.count,
    };

    if !cli.json {
        output::print_info(&format!(
            "Auditing {} host(s) from {}",
            hosts.len(),
            hosts_file.display()
        ));
    }

    let pb = (!cli.json).then(|| output::create_progress_bar(hosts.len() as u64, "Auditing"));
    let on_event = |outcome: &tls_auditor::runner::HostOutcome| {
        if let Some(pb) = &pb {
            pb.set_message(outcome.hostname().to_string());
            pb.inc(1);
        }
    };

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let threshold_days = settings.audit.expiry_threshold_days;
    let mut on_cycle = |cycle: u64, summary: &tls_auditor::runner::CycleSummary| {
        if let Some(pb) = &pb {
            pb.finish_and_clear();
        }

        if cli.json {
            if let Err(e) = output::print_json(cycle, summary) {
                output::print_error(&format!("Failed to render JSON: {}", e));
            }
        } else {
            output::print_header(&format!("Cycle {}", cycle));
            for outcome in &summary.outcomes {
                output::print_outcome(outcome, threshold_days);
            }
            output::print_cycle_summary(summary);
        }

        if let Some(pb) = &pb {
            pb.reset();
        }
    };

    let cycles = run_scheduled(&auditor, &hosts, &options, shutdown, &on_event, &mut on_cycle).await;
    tracing::info!("Finished after {} cycle(s)", cycles);

    Ok(())
}
