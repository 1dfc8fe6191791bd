//! Per-host audit report

use super::{CertificateInfo, Finding, ProbeResult};
use serde::Serialize;

/// Everything one audit learned about a hostname
#[derive(Debug, Clone, Serialize)]
pub struct HostReport {
    pub hostname: String,
    /// Error from stage FETCH, when the HTTPS request failed
    pub fetch_error: Option<String>,
    pub certificate: Option<CertificateInfo>,
    pub days_until_expiry: Option<i64>,
    pub expiring_soon: Option<bool>,
    /// One entry per requested protocol, in request order; empty when probing was skipped
    pub probes: Vec<ProbeResult>,
    pub findings: Vec<Finding>,
}

impl HostReport {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            fetch_error: None,
            certificate: None,
            days_until_expiry: None,
            expiring_soon: None,
            probes: vec![],
            findings: vec![],
        }
    }

    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }
}
