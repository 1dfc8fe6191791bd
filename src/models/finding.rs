//! Findings produced by an audit

use super::TlsProtocol;
use serde::Serialize;
use std::fmt;

/// Kind of policy violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FindingCategory {
    NoHttps,
    CertExpiringSoon,
    WeakProtocolAccepted,
    ModernProtocolRejected,
}

impl fmt::Display for FindingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingCategory::NoHttps => write!(f, "No HTTPS"),
            FindingCategory::CertExpiringSoon => write!(f, "Certificate expiring soon"),
            FindingCategory::WeakProtocolAccepted => write!(f, "Weak protocol accepted"),
            FindingCategory::ModernProtocolRejected => write!(f, "Modern protocol rejected"),
        }
    }
}

/// One policy violation discovered for a hostname
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub hostname: String,
    pub category: FindingCategory,
    /// Human readable issue text, sent as-is to the notifier
    pub detail: String,
}

impl Finding {
    pub fn new(
        hostname: impl Into<String>,
        category: FindingCategory,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            hostname: hostname.into(),
            category,
            detail: detail.into(),
        }
    }

    pub fn no_https(hostname: &str) -> Self {
        Self::new(hostname, FindingCategory::NoHttps, "No HTTPS or error occurred")
    }

    pub fn cert_expiring_soon(hostname: &str, not_after: &str) -> Self {
        Self::new(
            hostname,
            FindingCategory::CertExpiringSoon,
            format!("Certificate expiring soon (notAfter {})", not_after),
        )
    }

    pub fn weak_protocol_accepted(hostname: &str, protocol: TlsProtocol) -> Self {
        Self::new(
            hostname,
            FindingCategory::WeakProtocolAccepted,
            format!("{} is deprecated but supported", protocol),
        )
    }

    pub fn modern_protocol_rejected(hostname: &str, protocol: TlsProtocol) -> Self {
        Self::new(
            hostname,
            FindingCategory::ModernProtocolRejected,
            format!("{} is not supported", protocol),
        )
    }
}
