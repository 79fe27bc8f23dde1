use crate::constants::relay::{STDERR_TAG, STDOUT_TAG};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

pub type RelaySender = mpsc::UnboundedSender<OutputLine>;
pub type RelayReceiver = mpsc::UnboundedReceiver<OutputLine>;

pub fn relay_channel() -> (RelaySender, RelayReceiver) {
    mpsc::unbounded_channel()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

impl OutputStream {
    pub fn tag(self) -> &'static str {
        match self {
            OutputStream::Stdout => STDOUT_TAG,
            OutputStream::Stderr => STDERR_TAG,
        }
    }
}

/// One complete line of remote output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub stream: OutputStream,
    pub text: String,
}

impl OutputLine {
    pub fn new(stream: OutputStream, text: impl Into<String>) -> Self {
        Self {
            stream,
            text: text.into(),
        }
    }

    pub fn render(&self) -> String {
        format!("{}: {}\n", self.stream.tag(), self.text)
    }
}

/// Cuts a byte stream into lines. Chunks may split lines or UTF-8 sequences
/// anywhere; only complete lines are emitted.
#[derive(Debug)]
pub struct LineSplitter {
    stream: OutputStream,
    pending: Vec<u8>,
}

impl LineSplitter {
    pub fn new(stream: OutputStream) -> Self {
        Self {
            stream,
            pending: Vec::new(),
        }
    }

    pub fn push(&mut self, chunk: &[u8]) -> Vec<OutputLine> {
        self.pending.extend_from_slice(chunk);
        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = self.pending.drain(..=pos).collect();
            lines.push(self.decode(&raw[..raw.len() - 1]));
        }
        lines
    }

    /// Flushes an unterminated trailing fragment.
    pub fn finish(&mut self) -> Option<OutputLine> {
        if self.pending.is_empty() {
            return None;
        }
        let raw = std::mem::take(&mut self.pending);
        Some(self.decode(&raw))
    }

    fn decode(&self, raw: &[u8]) -> OutputLine {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        OutputLine::new(self.stream, String::from_utf8_lossy(raw))
    }
}

/// Single writer for relayed lines: each line lands with one `write_all`, so
/// lines from the two remote streams never interleave mid-line.
pub async fn write_relay<W>(mut rx: RelayReceiver, sink: &mut W) -> std::io::Result<usize>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut written = 0usize;
    while let Some(line) = rx.recv().await {
        sink.write_all(line.render().as_bytes()).await?;
        sink.flush().await?;
        written += 1;
    }
    Ok(written)
}
