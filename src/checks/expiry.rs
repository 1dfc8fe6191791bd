//! Certificate expiry evaluation
//!
//! Decides whether a certificate's notAfter falls inside the lookahead window.
//! Pure functions of (notAfter, now, threshold) so they can be tested with
//! synthetic timestamps.

use crate::models::{CertificateInfo, EXPIRY_FORMAT};
use crate::utils::CertificateError;
use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};

/// Evaluates certificates against a fixed lookahead threshold
#[derive(Debug, Clone, Copy)]
pub struct ExpiryEvaluator {
    threshold: Duration,
}

impl ExpiryEvaluator {
    pub fn new(threshold: Duration) -> Self {
        Self { threshold }
    }

    /// True iff the certificate expires strictly before `now + threshold`
    pub fn evaluate(
        &self,
        cert: &CertificateInfo,
        now: DateTime<Utc>,
    ) -> Result<bool, CertificateError> {
        is_expiring_soon(&cert.not_after, now, self.threshold)
    }
}

/// Parse a `YYYYMMDDHHMMSSZ` timestamp.
///
/// Anything that is not exactly fourteen digits followed by `Z` is rejected.
pub fn parse_expiry(value: &str) -> Result<DateTime<Utc>, CertificateError> {
    let invalid = || CertificateError::InvalidExpiry {
        value: value.to_string(),
    };

    let bytes = value.as_bytes();
    if bytes.len() != 15 || bytes[14] != b'Z' || !bytes[..14].iter().all(u8::is_ascii_digit) {
        return Err(invalid());
    }

    let naive = NaiveDateTime::parse_from_str(value, EXPIRY_FORMAT).map_err(|_| invalid())?;
    Ok(Utc.from_utc_datetime(&naive))
}

/// True iff `not_after < now + threshold`.
///
/// An expiry exactly on the boundary is not expiring soon.
pub fn is_expiring_soon(
    not_after: &str,
    now: DateTime<Utc>,
    threshold: Duration,
) -> Result<bool, CertificateError> {
    let expiry = parse_expiry(not_after)?;
    match now.checked_add_signed(threshold) {
        Some(deadline) => Ok(expiry < deadline),
        // The window reaches past the representable range, so everything falls inside it
        None => Ok(true),
    }
}

/// Whole days from `now` until `not_after`; negative once expired
pub fn days_until_expiry(not_after: &str, now: DateTime<Utc>) -> Result<i64, CertificateError> {
    Ok((parse_expiry(not_after)? - now).num_days())
}
