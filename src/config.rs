use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::ENDPOINT;
use crate::error::{Error, ImgbbResult};

/// Settings of an upload [`Client`](crate::Client).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Upload URL, overridable for tests and proxies
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Deadline for a whole upload exchange
    #[serde(default)]
    pub timeout: Option<Duration>,

    /// Capacity in bytes of the pipe between the body producer and the
    /// transport
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// Size of the body chunks handed to the transport
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_endpoint() -> String { ENDPOINT.to_string() }
fn default_buffer_size() -> usize { 64 * 1024 } // 64KB
fn default_chunk_size() -> usize { 16 * 1024 } // 16KB

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout: None,
            buffer_size: default_buffer_size(),
            chunk_size: default_chunk_size(),
        }
    }
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> ImgbbResult<()> {
        if self.endpoint.is_empty() {
            return Err(Error::config("Endpoint URL cannot be empty"));
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(Error::config("Endpoint URL must start with http:// or https://"));
        }

        if self.timeout == Some(Duration::ZERO) {
            return Err(Error::config("Timeout must be greater than 0"));
        }

        if self.buffer_size == 0 {
            return Err(Error::config("Buffer size must be greater than 0"));
        }
        if self.chunk_size == 0 {
            return Err(Error::config("Chunk size must be greater than 0"));
        }
        if self.chunk_size > self.buffer_size {
            return Err(Error::config("Chunk size cannot be larger than buffer size"));
        }

        Ok(())
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the pipe capacity and the chunk size read from it.
    pub fn with_buffer_settings(mut self, buffer_size: usize, chunk_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self.chunk_size = chunk_size;
        self
    }
}
