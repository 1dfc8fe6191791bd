//! Protocol version prober
//!
//! Attempts one handshake per requested protocol version, each pinned to exactly
//! that version (minimum and maximum both set). rustls handles TLS 1.2 and 1.3;
//! the legacy versions it cannot speak go through OpenSSL at security level 0,
//! so the local library never vetoes a handshake the server would accept.
//! Certificates are not verified: acceptance is a property of the handshake,
//! not of trust.

use crate::checks::TcpChecker;
use crate::config::ProbeSettings;
use crate::models::{ProbeResult, TlsProtocol};
use crate::utils::ProbeError;
use futures::stream::{self, StreamExt};
use openssl::ssl::{SslConnector, SslMethod, SslOptions, SslVerifyMode, SslVersion};
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::CryptoProvider;
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, Error as RustlsError, SignatureScheme};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio_openssl::SslStream;

/// OpenSSL reason code for SSL_R_NO_PROTOCOLS_AVAILABLE
const NO_PROTOCOLS_AVAILABLE: i32 = 191;

/// A certificate verifier that accepts any certificate.
#[derive(Debug)]
struct AcceptAnyCertVerifier;

impl ServerCertVerifier for AcceptAnyCertVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, RustlsError> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, RustlsError> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, RustlsError> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        vec![
            SignatureScheme::RSA_PKCS1_SHA256,
            SignatureScheme::RSA_PKCS1_SHA384,
            SignatureScheme::RSA_PKCS1_SHA512,
            SignatureScheme::ECDSA_NISTP256_SHA256,
            SignatureScheme::ECDSA_NISTP384_SHA384,
            SignatureScheme::ECDSA_NISTP521_SHA512,
            SignatureScheme::RSA_PSS_SHA256,
            SignatureScheme::RSA_PSS_SHA384,
            SignatureScheme::RSA_PSS_SHA512,
            SignatureScheme::ED25519,
            SignatureScheme::ED448,
        ]
    }
}

/// How a protocol version is pinned, and by which TLS library
#[derive(Clone, Copy)]
enum VersionPin {
    Legacy(SslVersion),
    Rustls(&'static rustls::SupportedProtocolVersion),
}

fn version_pin(protocol: TlsProtocol) -> VersionPin {
    match protocol {
        TlsProtocol::Ssl30 => VersionPin::Legacy(SslVersion::SSL3),
        TlsProtocol::Tls10 => VersionPin::Legacy(SslVersion::TLS1),
        TlsProtocol::Tls11 => VersionPin::Legacy(SslVersion::TLS1_1),
        TlsProtocol::Tls12 => VersionPin::Rustls(&rustls::version::TLS12),
        TlsProtocol::Tls13 => VersionPin::Rustls(&rustls::version::TLS13),
    }
}

/// Per-version handshake prober
pub struct ProtocolProber {
    tcp: TcpChecker,
    port: u16,
    timeout: Duration,
    concurrency: usize,
    provider: Arc<CryptoProvider>,
}

impl ProtocolProber {
    /// Create a new prober with the given settings
    pub fn new(settings: &ProbeSettings, port: u16) -> Self {
        Self {
            tcp: TcpChecker::new(settings.timeout()),
            port,
            timeout: settings.timeout(),
            concurrency: settings.concurrency.max(1),
            provider: Arc::new(rustls::crypto::ring::default_provider()),
        }
    }

    /// Probe every requested version.
    ///
    /// Always yields exactly one result per requested version, in request order.
    /// Up to `concurrency` handshakes are in flight at once.
    pub async fn probe(&self, hostname: &str, protocols: &[TlsProtocol]) -> Vec<ProbeResult> {
        stream::iter(protocols.iter().copied())
            .map(|protocol| self.probe_one(hostname, protocol))
            .buffered(self.concurrency)
            .collect()
            .await
    }

    /// Attempt a single handshake pinned to `protocol`.
    ///
    /// TCP errors, handshake errors and timeouts all count as rejected; the
    /// error text is kept for diagnostics.
    pub async fn probe_one(&self, hostname: &str, protocol: TlsProtocol) -> ProbeResult {
        let outcome = tokio::time::timeout(self.timeout, self.handshake(hostname, protocol)).await;

        let result = match outcome {
            Ok(Ok(())) => ProbeResult::accepted(protocol),
            Ok(Err(ProbeError::Unsupported { message })) => {
                tracing::warn!(
                    "{} cannot be offered by the local TLS library, {} not probed: {}",
                    protocol,
                    hostname,
                    message
                );
                ProbeResult::rejected(
                    protocol,
                    ProbeError::Unsupported { message }.to_string(),
                )
            }
            Ok(Err(e)) => ProbeResult::rejected(protocol, e.to_string()),
            Err(_) => ProbeResult::rejected(
                protocol,
                ProbeError::Timeout {
                    seconds: self.timeout.as_secs(),
                }
                .to_string(),
            ),
        };

        tracing::debug!(
            "{}:{} {} handshake {}",
            hostname,
            self.port,
            protocol,
            result.error.as_deref().unwrap_or("completed")
        );

        result
    }

    async fn handshake(&self, hostname: &str, protocol: TlsProtocol) -> Result<(), ProbeError> {
        match version_pin(protocol) {
            VersionPin::Rustls(version) => self.rustls_handshake(hostname, version).await,
            VersionPin::Legacy(version) => self.openssl_handshake(hostname, version).await,
        }
    }

    async fn rustls_handshake(
        &self,
        hostname: &str,
        version: &'static rustls::SupportedProtocolVersion,
    ) -> Result<(), ProbeError> {
        let config = ClientConfig::builder_with_provider(Arc::clone(&self.provider))
            .with_protocol_versions(&[version])
            .map_err(|e| ProbeError::Configuration {
                message: e.to_string(),
            })?
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(AcceptAnyCertVerifier))
            .with_no_client_auth();

        let server_name =
            ServerName::try_from(hostname.to_string()).map_err(|_| ProbeError::Configuration {
                message: format!("Invalid server name: {}", hostname),
            })?;

        let connector = tokio_rustls::TlsConnector::from(Arc::new(config));
        let stream = self.tcp.connect(hostname, self.port).await?;

        // Dropping the stream closes the connection without sending application data
        let _tls_stream = connector
            .connect(server_name, stream)
            .await
            .map_err(|e| ProbeError::HandshakeFailed {
                message: e.to_string(),
            })?;

        Ok(())
    }

    async fn openssl_handshake(
        &self,
        hostname: &str,
        version: SslVersion,
    ) -> Result<(), ProbeError> {
        let connector = legacy_connector(version).map_err(|e| ProbeError::Configuration {
            message: e.to_string(),
        })?;
        let ssl = connector
            .configure()
            .and_then(|config| config.verify_hostname(false).into_ssl(hostname))
            .map_err(|e| ProbeError::Configuration {
                message: e.to_string(),
            })?;

        let stream = self.tcp.connect(hostname, self.port).await?;
        let mut tls_stream = SslStream::new(ssl, stream).map_err(|e| ProbeError::Configuration {
            message: e.to_string(),
        })?;

        Pin::new(&mut tls_stream)
            .connect()
            .await
            .map_err(classify_openssl_error)
    }
}

/// Client context offering exactly `version`, with every cipher the library has
fn legacy_connector(version: SslVersion) -> Result<SslConnector, openssl::error::ErrorStack> {
    let mut builder = SslConnector::builder(SslMethod::tls_client())?;
    // The connector defaults switch SSLv3 off through options, not the version range
    builder.clear_options(SslOptions::NO_SSLV3 | SslOptions::NO_TLSV1 | SslOptions::NO_TLSV1_1);
    builder.set_min_proto_version(Some(version))?;
    builder.set_max_proto_version(Some(version))?;
    builder.set_security_level(0);
    builder.set_cipher_list("ALL:@SECLEVEL=0")?;
    builder.set_verify(SslVerifyMode::NONE);
    Ok(builder.build())
}

/// Tell "this client cannot speak the version" apart from a server rejection
fn classify_openssl_error(e: openssl::ssl::Error) -> ProbeError {
    let local = e.ssl_error().is_some_and(|stack| {
        stack
            .errors()
            .iter()
            .any(|err| err.reason_code() == NO_PROTOCOLS_AVAILABLE)
    });

    if local {
        ProbeError::Unsupported {
            message: e.to_string(),
        }
    } else {
        ProbeError::HandshakeFailed {
            message: e.to_string(),
        }
    }
}
