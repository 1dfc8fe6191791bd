//! Certificate information structures

use serde::Serialize;

/// Wire format of a certificate validity timestamp (ASN.1 GeneralizedTime, UTC)
pub const EXPIRY_FORMAT: &str = "%Y%m%d%H%M%SZ";

/// The fields of an end-entity certificate the auditor works with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateInfo {
    pub subject: String,
    pub issuer: String,
    pub serial: String,
    /// notAfter in `YYYYMMDDHHMMSSZ` form
    pub not_after: String,
}

impl CertificateInfo {
    /// Extract the common name from the subject, falling back to the full DN
    pub fn subject_cn(&self) -> String {
        extract_cn(&self.subject)
    }

    /// Extract the common name from the issuer, falling back to the full DN
    pub fn issuer_cn(&self) -> String {
        extract_cn(&self.issuer)
    }
}

/// Extract common name from a distinguished name string
fn extract_cn(dn: &str) -> String {
    // DN format: "CN=example.com, O=Example Inc, ..."
    for part in dn.split(',') {
        let part = part.trim();
        if let Some(cn) = part.strip_prefix("CN=") {
            return cn.to_string();
        }
    }
    dn.to_string()
}
