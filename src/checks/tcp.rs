//! TCP connectivity checker
//!
//! Opens the TCP connection each protocol probe runs its handshake over.

use crate::utils::TcpError;
use std::io;
use std::time::Duration;
use tokio::net::TcpStream;

/// TCP connectivity checker
#[derive(Debug, Clone)]
pub struct TcpChecker {
    timeout: Duration,
}

impl TcpChecker {
    /// Create a new TCP checker with the given timeout
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Connect to the given host and port, resolving the name first.
    ///
    /// Every resolved address is tried in turn before giving up.
    pub async fn connect(&self, host: &str, port: u16) -> Result<TcpStream, TcpError> {
        match tokio::time::timeout(self.timeout, TcpStream::connect((host, port))).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(e)) => Err(classify(host, port, &e)),
            Err(_) => Err(TcpError::Timeout {
                host: host.to_string(),
                port,
            }),
        }
    }
}

fn classify(host: &str, port: u16, e: &io::Error) -> TcpError {
    if e.kind() == io::ErrorKind::ConnectionRefused {
        return TcpError::ConnectionRefused {
            host: host.to_string(),
            port,
        };
    }

    let error_str = e.to_string().to_lowercase();
    if error_str.contains("unreachable") {
        if error_str.contains("network") {
            TcpError::NetworkUnreachable
        } else {
            TcpError::HostUnreachable {
                host: host.to_string(),
            }
        }
    } else {
        TcpError::ConnectionFailed {
            host: host.to_string(),
            port,
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_tcp_connect_local_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let checker = TcpChecker::new(Duration::from_secs(2));
        assert!(checker.connect("127.0.0.1", port).await.is_ok());
    }

    #[tokio::test]
    async fn test_tcp_connect_refused() {
        // Bind then drop to get a port nothing listens on
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().port()
        };

        let checker = TcpChecker::new(Duration::from_secs(2));
        let result = checker.connect("127.0.0.1", port).await;
        assert!(matches!(result, Err(TcpError::ConnectionRefused { .. })));
    }

    #[test]
    fn test_classify_unreachable() {
        let err = io::Error::new(io::ErrorKind::Other, "Network is unreachable");
        assert!(matches!(
            classify("example.com", 443, &err),
            TcpError::NetworkUnreachable
        ));

        let err = io::Error::new(io::ErrorKind::Other, "No route to host: host unreachable");
        assert!(matches!(
            classify("example.com", 443, &err),
            TcpError::HostUnreachable { .. }
        ));
    }
}
