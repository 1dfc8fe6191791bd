//! Audit cycle engine
//!
//! Drives the auditor over a host list with bounded concurrency, a per-host
//! time limit, and optional periodic repetition. Can be driven by any frontend
//! through the event callback.

use crate::auditor::Auditor;
use crate::models::{Finding, HostReport};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::future::Future;
use std::time::Duration;

/// Scheduling options for a run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Hosts audited at the same time
    pub parallel: usize,
    /// Upper bound on one host's audit, all stages included
    pub host_timeout: Duration,
    /// Pause between cycles; `None` runs a single cycle
    pub interval: Option<Duration>,
    /// Number of cycles in periodic mode, 0 for no limit
    pub count: u64,
}

/// What happened to one host in a cycle
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HostOutcome {
    Completed { report: HostReport, delivered: usize },
    Failed { hostname: String, error: String },
    TimedOut { hostname: String },
}

impl HostOutcome {
    pub fn hostname(&self) -> &str {
        match self {
            HostOutcome::Completed { report, .. } => &report.hostname,
            HostOutcome::Failed { hostname, .. } | HostOutcome::TimedOut { hostname } => hostname,
        }
    }
}

/// Results of one pass over the host list, in host list order
#[derive(Debug, Clone, Serialize)]
pub struct CycleSummary {
    pub outcomes: Vec<HostOutcome>,
}

impl CycleSummary {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn completed(&self) -> usize {
        self.count(|o| matches!(o, HostOutcome::Completed { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, HostOutcome::Failed { .. }))
    }

    pub fn timed_out(&self) -> usize {
        self.count(|o| matches!(o, HostOutcome::TimedOut { .. }))
    }

    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                HostOutcome::Completed { report, .. } => Some(report.findings.iter()),
                _ => None,
            })
            .flatten()
    }

    pub fn delivered(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                HostOutcome::Completed { delivered, .. } => *delivered,
                _ => 0,
            })
            .sum()
    }

    fn count(&self, predicate: impl Fn(&HostOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(o)).count()
    }
}

/// Audit one host under the time limit, then deliver its findings.
///
/// A host that runs out of time is abandoned and nothing is delivered for it.
pub async fn audit_host(auditor: &Auditor, hostname: &str, timeout: Duration) -> HostOutcome {
    match tokio::time::timeout(timeout, auditor.inspect(hostname)).await {
        Ok(Ok(report)) => {
            let delivered = auditor.deliver(&report.findings).await;
            HostOutcome::Completed { report, delivered }
        }
        Ok(Err(e)) => {
            tracing::error!("Audit of {} failed: {}", hostname, e);
            HostOutcome::Failed {
                hostname: hostname.to_string(),
                error: e.to_string(),
            }
        }
        Err(_) => {
            tracing::warn!(
                "Audit of {} timed out after {}s, findings discarded",
                hostname,
                timeout.as_secs()
            );
            HostOutcome::TimedOut {
                hostname: hostname.to_string(),
            }
        }
    }
}

/// Run one pass over the host list
pub async fn run_cycle(
    auditor: &Auditor,
    hosts: &[String],
    options: &RunOptions,
    on_event: &dyn Fn(&HostOutcome),
) -> CycleSummary {
    let mut indexed: Vec<(usize, HostOutcome)> = stream::iter(hosts.iter().enumerate())
        .map(|(index, hostname)| async move {
            (index, audit_host(auditor, hostname, options.host_timeout).await)
        })
        .buffer_unordered(options.parallel.max(1))
        .inspect(|(_, outcome)| on_event(outcome))
        .collect()
        .await;

    indexed.sort_by_key(|(index, _)| *index);
    CycleSummary {
        outcomes: indexed.into_iter().map(|(_, outcome)| outcome).collect(),
    }
}

/// Run cycles until the schedule is exhausted or `shutdown` resolves.
///
/// A cycle interrupted by shutdown is dropped without calling `on_cycle`.
/// Returns the number of completed cycles.
pub async fn run_scheduled<S>(
    auditor: &Auditor,
    hosts: &[String],
    options: &RunOptions,
    shutdown: S,
    on_event: &dyn Fn(&HostOutcome),
    on_cycle: &mut dyn FnMut(u64, &CycleSummary),
) -> u64
where
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut cycles = 0u64;

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                tracing::warn!("Shutdown requested, abandoning in-flight audits");
                break;
            }
            summary = run_cycle(auditor, hosts, options, on_event) => {
                cycles += 1;
                on_cycle(cycles, &summary);
            }
        }

        let Some(interval) = options.interval else {
            break;
        };
        if options.count > 0 && cycles >= options.count {
            tracing::info!("Cycle limit reached, stopping");
            break;
        }

        tokio::select! {
            biased;
            _ = &mut shutdown => {
                tracing::info!("Shutdown requested, stopping");
                break;
            }
            _ = tokio::time::sleep(interval) => {}
        }
    }

    cycles
}
