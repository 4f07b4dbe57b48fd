use std::{fmt, time::Duration};

use reqwest::blocking::Client;

const USER_AGENT: &str = concat!("skindrop/", env!("CARGO_PKG_VERSION"));

#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking HTTP access used by the remote clients. Workers call it from their own thread.
pub trait HttpTransport: Send + Sync {
    fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, TransportError>;

    /// Returns only the status code of a header-only request.
    fn head(&self, url: &str, timeout: Duration) -> Result<u16, TransportError>;
}

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransportError::ClientSetup(e.to_string()))?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, TransportError> {
        let response = self.client.get(url).timeout(timeout).send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();
        Ok(HttpResponse { status, body })
    }

    fn head(&self, url: &str, timeout: Duration) -> Result<u16, TransportError> {
        let response = self.client.head(url).timeout(timeout).send()?;
        Ok(response.status().as_u16())
    }
}

#[derive(Debug)]
pub enum TransportError {
    Timeout(String),
    Connection(String),
    ClientSetup(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TransportError::Timeout(msg) => write!(f, "Request timed out: {}", msg),
            TransportError::Connection(msg) => write!(f, "Connection failed: {}", msg),
            TransportError::ClientSetup(msg) => write!(f, "Failed to create HTTP client: {}", msg),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else {
            Self::Connection(error.to_string())
        }
    }
}
