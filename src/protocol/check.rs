use super::{read_request, write_response};
use crate::errors::ResourceError;
use crate::models::{CheckRequest, Version};
use crate::services::logger::Logger;
use tokio::io::{AsyncRead, AsyncWrite};

/// The resource emits no versions of its own; `check` always answers `[]`.
pub async fn check_command<R, W>(
    logger: &Logger,
    stdin: R,
    stdout: &mut W,
) -> Result<(), ResourceError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + ?Sized,
{
    let request: CheckRequest = read_request(stdin).await?;
    logger.debug(
        "check",
        Some(&serde_json::json!({
            "host": request.source.host,
            "has_version": request.version.is_some(),
        })),
    );
    write_response(stdout, &Vec::<Version>::new()).await
}
