use super::{read_request, write_response};
use crate::errors::ResourceError;
use crate::models::{InRequest, InResponse};
use crate::services::logger::Logger;
use std::path::Path;
use tokio::io::{AsyncRead, AsyncWrite};

/// Echoes the requested version back. Nothing is fetched into `destination`.
pub async fn in_command<R, W>(
    logger: &Logger,
    destination: Option<&Path>,
    stdin: R,
    stdout: &mut W,
) -> Result<(), ResourceError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + ?Sized,
{
    let request: InRequest = read_request(stdin).await?;
    logger.debug(
        "in",
        Some(&serde_json::json!({
            "destination": destination.map(|p| p.display().to_string()),
            "has_params": request.params.is_some(),
        })),
    );
    let response = InResponse {
        version: request.version.unwrap_or_default(),
        metadata: Vec::new(),
    };
    write_response(stdout, &response).await
}
