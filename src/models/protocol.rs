//! Protocol probe result types

use serde::{Deserialize, Serialize};
use std::fmt;

/// TLS protocol versions, in probe order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TlsProtocol {
    #[serde(rename = "SSLv3", alias = "SSL3")]
    Ssl30,
    #[serde(rename = "TLS1.0", alias = "TLSv1.0")]
    Tls10,
    #[serde(rename = "TLS1.1", alias = "TLSv1.1")]
    Tls11,
    #[serde(rename = "TLS1.2", alias = "TLSv1.2")]
    Tls12,
    #[serde(rename = "TLS1.3", alias = "TLSv1.3")]
    Tls13,
}

impl fmt::Display for TlsProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TlsProtocol::Ssl30 => write!(f, "SSLv3"),
            TlsProtocol::Tls10 => write!(f, "TLS 1.0"),
            TlsProtocol::Tls11 => write!(f, "TLS 1.1"),
            TlsProtocol::Tls12 => write!(f, "TLS 1.2"),
            TlsProtocol::Tls13 => write!(f, "TLS 1.3"),
        }
    }
}

impl TlsProtocol {
    /// The fixed probe order: every version from SSLv3 to TLS 1.3
    pub const ALL: [TlsProtocol; 5] = [
        TlsProtocol::Ssl30,
        TlsProtocol::Tls10,
        TlsProtocol::Tls11,
        TlsProtocol::Tls12,
        TlsProtocol::Tls13,
    ];

    /// Check if this protocol is deprecated
    pub fn is_deprecated(&self) -> bool {
        matches!(
            self,
            TlsProtocol::Ssl30 | TlsProtocol::Tls10 | TlsProtocol::Tls11
        )
    }

    /// Check if this is the modern slot a server is expected to accept
    pub fn is_modern(&self) -> bool {
        matches!(self, TlsProtocol::Tls13)
    }
}

/// Outcome of a handshake pinned to a single protocol version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    pub protocol: TlsProtocol,
    pub accepted: bool,
    /// Why the handshake was rejected; `None` when accepted
    pub error: Option<String>,
}

impl ProbeResult {
    pub fn accepted(protocol: TlsProtocol) -> Self {
        Self {
            protocol,
            accepted: true,
            error: None,
        }
    }

    pub fn rejected(protocol: TlsProtocol, error: impl Into<String>) -> Self {
        Self {
            protocol,
            accepted: false,
            error: Some(error.into()),
        }
    }
}
