use crate::errors::SshError;
use crate::models::{Params, Source};
use crate::services::command_runner::{CommandRunner, ExecutionResult};
use crate::services::logger::Logger;
use crate::services::relay::RelaySender;
use crate::services::settings::Settings;
use crate::services::validation::Validation;
use async_trait::async_trait;

mod auth;
mod exec;

/// Runs scripts over SSH: one connection, one channel, one command per call.
#[derive(Clone)]
pub struct SshManager {
    logger: Logger,
    validation: Validation,
    settings: Settings,
}

impl SshManager {
    pub fn new(logger: Logger, validation: Validation, settings: Settings) -> Self {
        Self {
            logger: logger.child("ssh"),
            validation,
            settings,
        }
    }

    fn run_blocking(
        &self,
        source: &Source,
        params: &Params,
        relay: &RelaySender,
    ) -> Result<ExecutionResult, SshError> {
        let logger = self.logger.with_secrets(source.secrets());
        let interpreter = self
            .validation
            .ensure_string(&params.interpreter, "params.interpreter")?;
        let session = auth::authenticate(source, &self.validation, &self.settings, &logger)?;
        exec::run_script(session, &interpreter, &params.script, relay, &logger)
    }
}

#[async_trait]
impl CommandRunner for SshManager {
    async fn run(
        &self,
        source: &Source,
        params: &Params,
        relay: RelaySender,
    ) -> Result<ExecutionResult, SshError> {
        let manager = self.clone();
        let source = source.clone();
        let params = params.clone();
        tokio::task::spawn_blocking(move || manager.run_blocking(&source, &params, &relay))
            .await
            .map_err(|err| {
                SshError::channel(
                    "SSH exec task failed",
                    std::io::Error::new(std::io::ErrorKind::Other, err),
                )
            })?
    }
}
