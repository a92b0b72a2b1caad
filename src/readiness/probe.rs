//! TCP readiness probe.
//!
//! # Responsibilities
//! - Open one TCP connection to a service target
//! - Bound the attempt with a connect timeout
//! - Close the connection immediately; no protocol is spoken

use std::future::Future;
use std::io;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time;

use crate::config::ServiceTarget;

/// Something that can test whether a service accepts connections.
pub trait Connector {
    /// One connect attempt. `Ok` means the handshake completed.
    fn connect(&self, target: &ServiceTarget) -> impl Future<Output = io::Result<()>> + Send;
}

/// Real TCP connector used in production.
#[derive(Debug, Clone)]
pub struct TcpConnector {
    timeout: Duration,
}

impl TcpConnector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Connector for TcpConnector {
    fn connect(&self, target: &ServiceTarget) -> impl Future<Output = io::Result<()>> + Send {
        let authority = target.authority();
        let timeout = self.timeout;
        async move {
            // Name resolution counts against the same deadline.
            match time::timeout(timeout, TcpStream::connect(authority.as_str())).await {
                Ok(Ok(stream)) => {
                    drop(stream);
                    Ok(())
                }
                Ok(Err(e)) => Err(e),
                Err(_) => Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("connect timed out after {:?}", timeout),
                )),
            }
        }
    }
}
