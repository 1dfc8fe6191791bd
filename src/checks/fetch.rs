//! HTTPS fetcher
//!
//! Performs the plain HTTPS GET of stage FETCH and captures the end-entity
//! certificate the server presented during that same handshake.

use crate::config::FetchSettings;
use crate::utils::FetchError;
use reqwest::redirect::Policy;
use reqwest::tls::TlsInfo;

/// Result of a successful HTTPS request
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub status: u16,
    /// DER encoded end-entity certificate
    pub peer_certificate: Vec<u8>,
}

/// HTTPS fetcher
pub struct HttpsFetcher {
    client: reqwest::Client,
    port: u16,
}

impl HttpsFetcher {
    /// Create a new fetcher for the given port
    pub fn new(settings: &FetchSettings, port: u16) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .tls_info(true)
            .timeout(settings.timeout())
            .redirect(Policy::none())
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Client {
                message: e.to_string(),
            })?;

        Ok(Self { client, port })
    }

    /// URL requested for a hostname
    pub fn url(&self, hostname: &str) -> String {
        if self.port == 443 {
            format!("https://{}/", hostname)
        } else {
            format!("https://{}:{}/", hostname, self.port)
        }
    }

    /// GET the hostname over HTTPS.
    ///
    /// Redirects are not followed; 4xx and 5xx responses are errors.
    pub async fn fetch(&self, hostname: &str) -> Result<FetchOutcome, FetchError> {
        let response = self
            .client
            .get(self.url(hostname))
            .send()
            .await
            .map_err(|e| FetchError::Request {
                hostname: hostname.to_string(),
                message: error_chain(&e),
            })?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(FetchError::Status {
                hostname: hostname.to_string(),
                status: status.as_u16(),
            });
        }

        let peer_certificate = response
            .extensions()
            .get::<TlsInfo>()
            .and_then(|info| info.peer_certificate())
            .map(|der| der.to_vec())
            .ok_or_else(|| FetchError::NoCertificate {
                hostname: hostname.to_string(),
            })?;

        Ok(FetchOutcome {
            status: status.as_u16(),
            peer_certificate,
        })
    }
}

/// reqwest hides the interesting part (DNS, TLS alert) in the source chain
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
