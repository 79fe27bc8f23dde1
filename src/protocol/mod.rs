//! The `check`, `in` and `out` entry points: JSON on stdin, JSON on stdout.

use crate::errors::ResourceError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

mod check;
mod get;
mod out;

pub use check::check_command;
pub use get::in_command;
pub use out::out_command;

/// Reads all of `stdin` and decodes it as one JSON document.
pub(crate) async fn read_request<T, R>(mut stdin: R) -> Result<T, ResourceError>
where
    T: DeserializeOwned,
    R: AsyncRead + Unpin,
{
    let mut raw = Vec::new();
    stdin
        .read_to_end(&mut raw)
        .await
        .map_err(ResourceError::request_parse)?;
    serde_json::from_slice(&raw).map_err(ResourceError::request_parse)
}

/// Writes `response` as a single newline-terminated JSON document.
pub(crate) async fn write_response<T, W>(stdout: &mut W, response: &T) -> Result<(), ResourceError>
where
    T: Serialize + ?Sized,
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut payload = serde_json::to_vec(response)
        .map_err(|err| ResourceError::output(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))?;
    payload.push(b'\n');
    stdout
        .write_all(&payload)
        .await
        .map_err(ResourceError::output)?;
    stdout.flush().await.map_err(ResourceError::output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ResourceErrorKind;
    use crate::models::Version;

    #[tokio::test]
    async fn read_request_rejects_truncated_json() {
        let err = read_request::<Version, _>(&b"{"[..]).await.unwrap_err();
        assert_eq!(err.kind, ResourceErrorKind::RequestParse);
        assert_eq!(err.message, "unable to parse JSON from standard input");
    }

    #[tokio::test]
    async fn read_request_rejects_empty_input() {
        let err = read_request::<Version, _>(&b""[..]).await.unwrap_err();
        assert_eq!(err.kind, ResourceErrorKind::RequestParse);
    }

    #[tokio::test]
    async fn write_response_appends_newline() {
        let mut out: Vec<u8> = Vec::new();
        write_response(
            &mut out,
            &Version {
                timestamp: "t".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(out, b"{\"timestamp\":\"t\"}\n");
    }
}
