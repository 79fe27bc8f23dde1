use super::{read_request, write_response};
use crate::errors::ResourceError;
use crate::models::OutRequest;
use crate::services::command_runner::CommandRunner;
use crate::services::logger::Logger;
use crate::services::relay::{relay_channel, write_relay};
use crate::services::version::build_out_response;
use tokio::io::{AsyncRead, AsyncWrite};

/// Runs the requested script and reports the completion version.
///
/// Remote output is relayed to `stderr` while the command runs. `stdout`
/// receives exactly one JSON document on success and nothing on failure.
pub async fn out_command<R, W, E>(
    runner: &dyn CommandRunner,
    logger: &Logger,
    stdin: R,
    stdout: &mut W,
    stderr: &mut E,
) -> Result<(), ResourceError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + ?Sized,
    E: AsyncWrite + Unpin + ?Sized,
{
    let request: OutRequest = read_request(stdin).await?;
    let logger = logger.with_secrets(request.source.secrets());
    logger.debug(
        "out",
        Some(&serde_json::json!({
            "host": request.source.host,
            "user": request.source.user,
            "interpreter": request.params.interpreter,
        })),
    );

    let (tx, rx) = relay_channel();
    let (executed, relayed) = tokio::join!(
        runner.run(&request.source, &request.params, tx),
        write_relay(rx, stderr),
    );

    let execution = executed.map_err(|err| {
        logger.debug(
            "out failed",
            Some(&serde_json::json!({
                "error": err.to_string(),
                "exit_code": err.exit_code(),
            })),
        );
        ResourceError::command_execution(err)
    })?;
    let lines = relayed.map_err(ResourceError::relay)?;

    let response = build_out_response(execution.completed_at);
    logger.info(
        "out succeeded",
        Some(&serde_json::json!({
            "timestamp": response.version.timestamp,
            "relayed_lines": lines,
        })),
    );
    write_response(stdout, &response).await
}
