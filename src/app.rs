use crate::errors::ResourceError;
use crate::managers::ssh::SshManager;
use crate::protocol::{check_command, in_command, out_command};
use crate::services::command_runner::CommandRunner;
use crate::services::logger::Logger;
use crate::services::settings::Settings;
use crate::services::validation::Validation;
use std::path::PathBuf;
use std::sync::Arc;

/// The three resource scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceCommand {
    Check,
    In { destination: Option<PathBuf> },
    Out { sources: Option<PathBuf> },
}

pub struct App {
    pub logger: Logger,
    pub runner: Arc<dyn CommandRunner>,
}

impl App {
    pub fn initialize() -> Self {
        let logger = Logger::new("ssh-resource");
        let settings = Settings::from_env();
        let runner = Arc::new(SshManager::new(
            logger.clone(),
            Validation::new(),
            settings,
        ));
        Self { logger, runner }
    }

    /// Runs one command against the process's standard streams.
    pub async fn run(&self, command: ResourceCommand) -> Result<(), ResourceError> {
        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut stderr = tokio::io::stderr();
        match command {
            ResourceCommand::Check => check_command(&self.logger, stdin, &mut stdout).await,
            ResourceCommand::In { destination } => {
                in_command(&self.logger, destination.as_deref(), stdin, &mut stdout).await
            }
            ResourceCommand::Out { sources } => {
                self.logger.debug(
                    "out invoked",
                    Some(&serde_json::json!({
                        "sources": sources.map(|p| p.display().to_string()),
                    })),
                );
                out_command(
                    self.runner.as_ref(),
                    &self.logger,
                    stdin,
                    &mut stdout,
                    &mut stderr,
                )
                .await
            }
        }
    }
}
