//! Domain auditor
//!
//! Runs the audit stages for one hostname, strictly in order:
//!
//! 1. FETCH: HTTPS GET, capturing the end-entity certificate from that handshake.
//!    A failure yields a `NoHttps` finding and ends the audit unless
//!    `probe_on_fetch_failure` is set.
//! 2. CERT: parse the captured certificate and evaluate its expiry window.
//! 3. PROTO: probe every configured protocol version on fresh connections.
//!
//! Findings are collected first and only delivered once the audit completed,
//! so an abandoned audit never produces a partial notification.

use crate::checks::expiry::days_until_expiry;
use crate::checks::{CertificateChecker, ExpiryEvaluator, HttpsFetcher, ProtocolProber};
use crate::config::Settings;
use crate::models::{Finding, HostReport, ProbeResult, TlsProtocol};
use crate::notify::Notifier;
use crate::utils::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Audits hostnames and hands findings to a notifier
pub struct Auditor {
    fetcher: HttpsFetcher,
    certificates: CertificateChecker,
    evaluator: ExpiryEvaluator,
    prober: ProtocolProber,
    protocols: Vec<TlsProtocol>,
    probe_on_fetch_failure: bool,
    notifier: Arc<dyn Notifier>,
}

impl Auditor {
    pub fn new(settings: &Settings, notifier: Arc<dyn Notifier>) -> Result<Self> {
        Ok(Self {
            fetcher: HttpsFetcher::new(&settings.fetch, settings.audit.port)?,
            certificates: CertificateChecker::new(),
            evaluator: ExpiryEvaluator::new(settings.audit.expiry_threshold()),
            prober: ProtocolProber::new(&settings.probe, settings.audit.port),
            protocols: settings.probe.protocols.clone(),
            probe_on_fetch_failure: settings.audit.probe_on_fetch_failure,
            notifier,
        })
    }

    /// Audit a hostname and deliver its findings.
    ///
    /// Delivery failures are logged and never turn into an error here; the
    /// full list of findings is returned either way. An error means the
    /// certificate could not be evaluated.
    pub async fn audit(&self, hostname: &str) -> Result<Vec<Finding>> {
        let report = self.inspect(hostname).await?;
        self.deliver(&report.findings).await;
        Ok(report.findings)
    }

    /// Run every stage for a hostname without notifying
    pub async fn inspect(&self, hostname: &str) -> Result<HostReport> {
        self.inspect_at(hostname, Utc::now()).await
    }

    /// Like [`Auditor::inspect`], evaluating certificate expiry against `now`
    pub async fn inspect_at(&self, hostname: &str, now: DateTime<Utc>) -> Result<HostReport> {
        tracing::info!("Processing domain: {}", hostname);
        let mut report = HostReport::new(hostname);

        match self.fetcher.fetch(hostname).await {
            Ok(outcome) => {
                tracing::debug!("{} answered HTTP {}", hostname, outcome.status);

                let cert = self.certificates.parse_certificate(&outcome.peer_certificate)?;
                let expiring = self.evaluator.evaluate(&cert, now)?;
                let days = days_until_expiry(&cert.not_after, now)?;
                tracing::info!(
                    "Domain {}: certificate {} expires {} ({} days)",
                    hostname,
                    cert.subject_cn(),
                    cert.not_after,
                    days
                );

                if expiring {
                    report
                        .findings
                        .push(Finding::cert_expiring_soon(hostname, &cert.not_after));
                }
                report.days_until_expiry = Some(days);
                report.expiring_soon = Some(expiring);
                report.certificate = Some(cert);
            }
            Err(e) => {
                tracing::warn!("No HTTPS or error checking domain {}: {}", hostname, e);
                report.fetch_error = Some(e.to_string());
                report.findings.push(Finding::no_https(hostname));

                if !self.probe_on_fetch_failure {
                    return Ok(report);
                }
            }
        }

        report.probes = self.prober.probe(hostname, &self.protocols).await;
        for probe in &report.probes {
            tracing::info!("Domain {}: {}", hostname, describe_probe(probe));
        }
        report
            .findings
            .extend(protocol_findings(hostname, &report.probes));

        tracing::info!(
            "Domain {}: audit complete, {} finding(s)",
            hostname,
            report.findings.len()
        );
        Ok(report)
    }

    /// Hand findings to the notifier one at a time, in order.
    ///
    /// Returns how many were delivered.
    pub async fn deliver(&self, findings: &[Finding]) -> usize {
        let mut delivered = 0;
        for finding in findings {
            match self.notifier.send(&finding.hostname, &finding.detail).await {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!(
                    "Error sending notification for {}: {}",
                    finding.hostname,
                    e
                ),
            }
        }
        delivered
    }
}

/// Per-version log text, carrying the error detail of a rejection
fn describe_probe(probe: &ProbeResult) -> String {
    match (probe.accepted, &probe.error) {
        (true, _) => format!("{} supported", probe.protocol),
        (false, Some(error)) => format!("{} not supported ({})", probe.protocol, error),
        (false, None) => format!("{} not supported", probe.protocol),
    }
}

/// Translate probe results into findings.
///
/// A deprecated version that was accepted, or the modern version rejected,
/// is a finding; every other outcome is only logged.
pub fn protocol_findings(hostname: &str, probes: &[ProbeResult]) -> Vec<Finding> {
    probes
        .iter()
        .filter_map(|probe| {
            if probe.protocol.is_deprecated() && probe.accepted {
                Some(Finding::weak_protocol_accepted(hostname, probe.protocol))
            } else if probe.protocol.is_modern() && !probe.accepted {
                Some(Finding::modern_protocol_rejected(hostname, probe.protocol))
            } else {
                None
            }
        })
        .collect()
}
