use std::fmt;

use thiserror::Error;
use url::Url;

/// Port used when the user has not configured one.
pub const DEFAULT_PORT: &str = "3000";

/// Fixed path that receives scanned barcodes on the server.
pub const SUBMISSION_PATH: &str = "/addProductByBarcode";

/// User-editable destination of scan submissions.
///
/// Nothing is checked on edit; [`ServerConfig::validate`] runs when a code is
/// about to be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("configure server address")]
    MissingHost,
    #[error("invalid server configuration")]
    InvalidEndpoint { reason: String },
}

/// A submission URL built from a validated [`ServerConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint(Url);

impl Endpoint {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: impl Into<String>) -> Self {
        let mut config = Self {
            host: host.into(),
            port: port.into(),
        };
        config.normalize();
        config
    }

    /// Empty ports fall back to [`DEFAULT_PORT`], like an unset setting.
    pub(crate) fn normalize(&mut self) {
        if self.port.trim().is_empty() {
            self.port = DEFAULT_PORT.to_string();
        }
    }

    pub fn validate(&self) -> Result<Endpoint, ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::MissingHost);
        }

        let raw = format!("http://{}:{}{}", self.host, self.port, SUBMISSION_PATH);
        let url = Url::parse(&raw).map_err(|err| ConfigError::InvalidEndpoint {
            reason: err.to_string(),
        })?;

        // A host like `example.com/x` or `user@host` still parses, but moves
        // parts of itself into the path or the credentials.
        let reason = if url.host_str().is_none() {
            Some("missing host")
        } else if !url.username().is_empty() || url.password().is_some() {
            Some("credentials are not allowed in the host")
        } else if url.path() != SUBMISSION_PATH || url.query().is_some() || url.fragment().is_some()
        {
            Some("host or port contains path characters")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ConfigError::InvalidEndpoint {
                reason: reason.to_string(),
            }),
            None => Ok(Endpoint(url)),
        }
    }
}
