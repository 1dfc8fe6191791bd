//! Data models for tls-auditor
//!
//! This module contains all the data structures used throughout the application.

pub mod certificate;
pub mod finding;
pub mod protocol;
pub mod report;

pub use certificate::{CertificateInfo, EXPIRY_FORMAT};
pub use finding::{Finding, FindingCategory};
pub use protocol::{ProbeResult, TlsProtocol};
pub use report::HostReport;
