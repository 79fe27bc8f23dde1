use crate::constants::limits::{MAX_PORT, MIN_PORT};
use crate::constants::network::SSH_DEFAULT_PORT;
use crate::errors::SshError;

/// Host and port a session connects to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SshTarget {
    pub host: String,
    pub port: u16,
}

impl SshTarget {
    /// `host:port`, bracketing IPv6 literals.
    pub fn address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

#[derive(Clone, Default)]
pub struct Validation;

impl Validation {
    pub fn new() -> Self {
        Self
    }

    pub fn ensure_string(&self, value: &str, label: &str) -> Result<String, SshError> {
        let normalized = value.trim();
        if normalized.is_empty() {
            return Err(SshError::invalid_request(format!(
                "{} must be a non-empty string",
                label
            )));
        }
        Ok(normalized.to_string())
    }

    pub fn ensure_port(&self, value: &str) -> Result<u16, SshError> {
        let numeric = value.trim().parse::<u32>().map_err(|_| {
            SshError::invalid_request(format!(
                "Port must be an integer between {} and {}",
                MIN_PORT, MAX_PORT
            ))
        })?;
        if numeric < MIN_PORT as u32 || numeric > MAX_PORT as u32 {
            return Err(SshError::invalid_request(format!(
                "Port must be an integer between {} and {}",
                MIN_PORT, MAX_PORT
            )));
        }
        Ok(numeric as u16)
    }

    /// Parses `host`, `host:port`, `[v6]` or `[v6]:port`.
    pub fn parse_target(&self, raw: &str) -> Result<SshTarget, SshError> {
        let raw = self.ensure_string(raw, "source.host")?;

        if let Some(rest) = raw.strip_prefix('[') {
            let (host, tail) = rest.split_once(']').ok_or_else(|| {
                SshError::invalid_request(format!("unterminated IPv6 literal in host: {}", raw))
            })?;
            let host = self.ensure_string(host, "source.host")?;
            let port = match tail {
                "" => SSH_DEFAULT_PORT,
                _ => {
                    let port = tail.strip_prefix(':').ok_or_else(|| {
                        SshError::invalid_request(format!("unexpected text after host: {}", raw))
                    })?;
                    self.ensure_port(port)?
                }
            };
            return Ok(SshTarget { host, port });
        }

        match raw.matches(':').count() {
            0 => Ok(SshTarget {
                host: raw,
                port: SSH_DEFAULT_PORT,
            }),
            1 => {
                let (host, port) = raw.split_once(':').unwrap_or((raw.as_str(), ""));
                Ok(SshTarget {
                    host: self.ensure_string(host, "source.host")?,
                    port: self.ensure_port(port)?,
                })
            }
            // Bare IPv6 literal without a port.
            _ => Ok(SshTarget {
                host: raw,
                port: SSH_DEFAULT_PORT,
            }),
        }
    }
}
