use crate::errors::SshError;
use crate::models::{Params, Source};
use crate::services::relay::RelaySender;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionResult {
    pub completed_at: DateTime<Utc>,
}

/// Runs one script on the host described by `source`, sending every line
/// of remote output to `relay` as it arrives. Dropping `relay` marks the
/// end of output.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(
        &self,
        source: &Source,
        params: &Params,
        relay: RelaySender,
    ) -> Result<ExecutionResult, SshError>;
}
