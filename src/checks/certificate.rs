//! Certificate parsing
//!
//! Reads the end-entity certificate captured during the HTTPS request using x509-parser.

use crate::models::{CertificateInfo, EXPIRY_FORMAT};
use crate::utils::CertificateError;
use chrono::{DateTime, TimeZone, Utc};
use x509_parser::prelude::*;

/// Certificate checker and parser
#[derive(Debug, Default, Clone, Copy)]
pub struct CertificateChecker;

impl CertificateChecker {
    /// Create a new certificate checker
    pub fn new() -> Self {
        Self
    }

    /// Parse a single DER-encoded certificate
    pub fn parse_certificate(&self, der: &[u8]) -> Result<CertificateInfo, CertificateError> {
        if der.is_empty() {
            return Err(CertificateError::ParseError {
                message: "Empty certificate".to_string(),
            });
        }

        let (_, cert) =
            X509Certificate::from_der(der).map_err(|e| CertificateError::ParseError {
                message: format!("Failed to parse certificate: {:?}", e),
            })?;

        let serial = cert
            .serial
            .to_bytes_be()
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(":");

        let not_after = asn1_time_to_datetime(cert.validity().not_after)?;

        Ok(CertificateInfo {
            subject: cert.subject().to_string(),
            issuer: cert.issuer().to_string(),
            serial,
            not_after: not_after.format(EXPIRY_FORMAT).to_string(),
        })
    }
}

/// Convert ASN.1 time to chrono DateTime
fn asn1_time_to_datetime(time: ASN1Time) -> Result<DateTime<Utc>, CertificateError> {
    let timestamp = time.timestamp();
    Utc.timestamp_opt(timestamp, 0)
        .single()
        .ok_or_else(|| CertificateError::ParseError {
            message: "Invalid timestamp in certificate".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_self_signed_certificate() {
        let mut params = rcgen::CertificateParams::new(vec!["audit.test".to_string()]).unwrap();
        params
            .distinguished_name
            .push(rcgen::DnType::CommonName, "audit.test");
        params.not_after = rcgen::date_time_ymd(2031, 6, 15);
        let key = rcgen::KeyPair::generate().unwrap();
        let cert = params.self_signed(&key).unwrap();

        let info = CertificateChecker::new()
            .parse_certificate(cert.der().as_ref())
            .unwrap();

        assert_eq!(info.not_after, "20310615000000Z");
        assert_eq!(info.subject_cn(), "audit.test");
        assert!(!info.serial.is_empty());
    }

    #[test]
    fn test_parse_garbage_is_an_error() {
        let checker = CertificateChecker::new();
        assert!(matches!(
            checker.parse_certificate(&[]),
            Err(CertificateError::ParseError { .. })
        ));
        assert!(matches!(
            checker.parse_certificate(b"not a certificate"),
            Err(CertificateError::ParseError { .. })
        ));
    }
}
