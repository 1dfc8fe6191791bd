//! TLS-Auditor Library
//!
//! Periodically audits hostnames for two security properties:
//! - whether the certificate they serve is about to expire
//! - which SSL/TLS protocol versions their endpoint accepts
//!
//! Policy violations become [`Finding`]s handed to a [`notify::Notifier`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tls_auditor::{Auditor, Settings};
//! use tls_auditor::notify::LogNotifier;
//!
//! #[tokio::main]
//! async fn main() -> tls_auditor::Result<()> {
//!     let auditor = Auditor::new(&Settings::default(), Arc::new(LogNotifier))?;
//!     let findings = auditor.audit("example.com").await?;
//!     // Process findings...
//!     Ok(())
//! }
//! ```

pub mod auditor;
pub mod checks;
pub mod cli;
pub mod config;
pub mod hosts;
pub mod models;
pub mod notify;
pub mod output;
pub mod runner;
pub mod utils;

// Re-export commonly used types
pub use auditor::Auditor;
pub use cli::Cli;
pub use config::Settings;
pub use models::{Finding, FindingCategory, HostReport, ProbeResult, TlsProtocol};
pub use utils::{AuditorError, Result};
