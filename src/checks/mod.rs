//! Check modules for tls-auditor
//!
//! This module contains the per-stage check implementations the auditor drives.

pub mod certificate;
pub mod expiry;
pub mod fetch;
pub mod protocol;
pub mod tcp;

pub use certificate::CertificateChecker;
pub use expiry::ExpiryEvaluator;
pub use fetch::{FetchOutcome, HttpsFetcher};
pub use protocol::ProtocolProber;
pub use tcp::TcpChecker;
