//! Custom error types for tls-auditor
//!
//! This module defines domain-specific error types using `thiserror` for
//! the failure modes of each audit stage. Errors stay local to the hostname
//! and stage they occur in; only `AuditorError` crosses module boundaries.

use thiserror::Error;

/// Top-level error type for the tls-auditor application
#[derive(Error, Debug)]
pub enum AuditorError {
    #[error("HTTPS fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Certificate error: {0}")]
    Certificate(#[from] CertificateError),
}

/// Errors raised while performing the initial HTTPS request (stage FETCH)
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTPS request to {hostname} failed: {message}")]
    Request { hostname: String, message: String },

    #[error("{hostname} answered with HTTP status {status}")]
    Status { hostname: String, status: u16 },

    #[error("No peer certificate presented by {hostname}")]
    NoCertificate { hostname: String },

    #[error("Failed to build HTTPS client: {message}")]
    Client { message: String },
}

/// TCP connection errors
#[derive(Error, Debug)]
pub enum TcpError {
    #[error("Connection refused to {host}:{port}")]
    ConnectionRefused { host: String, port: u16 },

    #[error("Connection timed out to {host}:{port}")]
    Timeout { host: String, port: u16 },

    #[error("Host unreachable: {host}")]
    HostUnreachable { host: String },

    #[error("Network unreachable")]
    NetworkUnreachable,

    #[error("TCP connection failed to {host}:{port}: {message}")]
    ConnectionFailed {
        host: String,
        port: u16,
        message: String,
    },
}

/// Per-version handshake errors. Recorded on the probe result, never fatal.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("{0}")]
    Connection(#[from] TcpError),

    #[error("TLS handshake failed: {message}")]
    HandshakeFailed { message: String },

    #[error("Timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("TLS configuration error: {message}")]
    Configuration { message: String },

    #[error("Protocol not available in the local TLS library: {message}")]
    Unsupported { message: String },
}

/// Certificate parsing errors
#[derive(Error, Debug)]
pub enum CertificateError {
    #[error("Failed to parse certificate: {message}")]
    ParseError { message: String },

    #[error("Invalid certificate expiry timestamp {value:?}: expected YYYYMMDDHHMMSSZ")]
    InvalidExpiry { value: String },
}

/// Notification delivery errors
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notification request failed: {message}")]
    Request { message: String },

    #[error("Notification rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Missing required configuration: {key}")]
    MissingRequired { key: String },
}

/// Result type alias using AuditorError
pub type Result<T> = std::result::Result<T, AuditorError>;
