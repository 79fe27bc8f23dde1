use thiserror::Error;

/// Failures raised while authenticating against the remote host or running
/// the script there.
#[derive(Error, Debug)]
pub enum SshError {
    /// Required source or params fields are empty or malformed.
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// Neither a private key nor a non-empty password was supplied.
    #[error("no usable credential: set source.password or source.private_key")]
    MissingCredential,

    /// The supplied private key could not be parsed.
    #[error("invalid private key: {reason}")]
    InvalidCredential { reason: String },

    /// The host could not be resolved or reached.
    #[error("failed to connect to {target}: {reason}")]
    Connect { target: String, reason: String },

    /// Handshake or credential rejection by the remote host.
    #[error("SSH authentication failed for {user}@{target}")]
    AuthenticationFailed {
        user: String,
        target: String,
        #[source]
        source: Option<ssh2::Error>,
    },

    /// The server presented a host key that does not match the pinned one.
    #[error("SSH host key mismatch (expected {expected}, got {observed})")]
    HostKeyMismatch { expected: String, observed: String },

    #[error("remote command exited with status {exit_code}")]
    RemoteCommandFailed { exit_code: i32 },

    #[error("remote command terminated by signal {signal}")]
    RemoteCommandKilled { signal: String },

    /// Transport failure after the session was established.
    #[error("SSH channel error: {context}")]
    Channel {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl SshError {
    pub fn channel(context: impl Into<String>, source: impl Into<std::io::Error>) -> Self {
        SshError::Channel {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn invalid_request(reason: impl Into<String>) -> Self {
        SshError::InvalidRequest {
            reason: reason.into(),
        }
    }

    pub fn invalid_credential(reason: impl Into<String>) -> Self {
        SshError::InvalidCredential {
            reason: reason.into(),
        }
    }

    /// Exit code of the remote process when it ran and failed.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            SshError::RemoteCommandFailed { exit_code } => Some(*exit_code),
            _ => None,
        }
    }
}
