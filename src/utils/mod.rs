//! Utility modules for tls-auditor
//!
//! This module contains the error types shared by every audit stage.

pub mod error;

pub use error::{
    AuditorError, CertificateError, ConfigError, FetchError, NotifyError, ProbeError, Result,
    TcpError,
};
