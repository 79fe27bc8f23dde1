use crate::constants::limits::READ_CHUNK_BYTES;
use crate::constants::network::POLL_INTERVAL_MS;
use crate::errors::SshError;
use crate::services::command_runner::ExecutionResult;
use crate::services::logger::Logger;
use crate::services::relay::{LineSplitter, OutputLine, OutputStream, RelaySender};
use chrono::Utc;
use ssh2::{Channel, Session};
use std::io::{ErrorKind, Read, Write};
use std::time::{Duration, Instant};

/// Owns the live connection and disconnects it on every exit path.
struct ConnectionGuard {
    session: Session,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.session.set_blocking(true);
        let _ = self
            .session
            .disconnect(None, "ssh-resource: command finished", None);
    }
}

/// Where each remote stream's bytes go before they become relay lines.
struct StreamRelay<'a> {
    splitter: LineSplitter,
    relay: &'a RelaySender,
    bytes: u64,
}

impl<'a> StreamRelay<'a> {
    fn new(stream: OutputStream, relay: &'a RelaySender) -> Self {
        Self {
            splitter: LineSplitter::new(stream),
            relay,
            bytes: 0,
        }
    }

    fn forward(&mut self, chunk: &[u8]) {
        self.bytes += chunk.len() as u64;
        for line in self.splitter.push(chunk) {
            self.send(line);
        }
    }

    fn finish(&mut self) {
        if let Some(line) = self.splitter.finish() {
            self.send(line);
        }
    }

    fn send(&self, line: OutputLine) {
        // A closed receiver means the sink already failed; the dispatcher reports that.
        let _ = self.relay.send(line);
    }
}

/// Result of one non-blocking read attempt.
enum Poll {
    Data,
    Idle,
}

fn poll_read(
    reader: &mut impl Read,
    buf: &mut [u8],
    out: &mut StreamRelay<'_>,
    label: &str,
) -> Result<Poll, SshError> {
    match reader.read(buf) {
        Ok(0) => Ok(Poll::Idle),
        Ok(n) => {
            out.forward(&buf[..n]);
            Ok(Poll::Data)
        }
        Err(err) if err.kind() == ErrorKind::WouldBlock => Ok(Poll::Idle),
        Err(err) => Err(SshError::channel(format!("{} read failed", label), err)),
    }
}

/// Stdin side of the remote command.
trait ScriptSink: Write {
    fn close_stdin(&mut self) -> std::io::Result<()>;
    /// The remote end has sent EOF and reads nothing more.
    fn remote_eof(&self) -> bool;
}

impl ScriptSink for Channel {
    fn close_stdin(&mut self) -> std::io::Result<()> {
        self.send_eof().map_err(Into::into)
    }

    fn remote_eof(&self) -> bool {
        self.eof()
    }
}

/// Feeds the script to the interpreter's stdin, then EOF.
struct ScriptFeed<'a> {
    bytes: &'a [u8],
    offset: usize,
    done: bool,
}

impl<'a> ScriptFeed<'a> {
    fn new(script: &'a str) -> Self {
        Self {
            bytes: script.as_bytes(),
            offset: 0,
            done: false,
        }
    }

    /// One non-blocking step. Returns whether anything was written.
    fn pump(&mut self, sink: &mut impl ScriptSink) -> Result<bool, SshError> {
        if self.done {
            return Ok(false);
        }
        if self.offset < self.bytes.len() {
            return match sink.write(&self.bytes[self.offset..]) {
                Ok(n) => {
                    self.offset += n;
                    Ok(n > 0)
                }
                Err(err) => self.failed(&*sink, "writing script to stdin", err),
            };
        }
        match sink.close_stdin() {
            Ok(()) => {
                self.done = true;
                Ok(true)
            }
            Err(err) => self.failed(&*sink, "closing script stdin", err),
        }
    }

    fn failed(
        &mut self,
        sink: &impl ScriptSink,
        context: &str,
        err: std::io::Error,
    ) -> Result<bool, SshError> {
        if err.kind() == ErrorKind::WouldBlock {
            return Ok(false);
        }
        // An interpreter that exits without reading all of stdin is judged by its exit status.
        if sink.remote_eof() {
            self.done = true;
            return Ok(false);
        }
        Err(SshError::channel(context, err))
    }

    fn unsent(&self) -> usize {
        self.bytes.len() - self.offset
    }
}

/// Treats a keepalive that could not go out yet as sent on a later tick.
fn keepalive_outcome(result: Result<u32, ssh2::Error>) -> Result<(), SshError> {
    match result {
        Ok(_) => Ok(()),
        Err(err) => {
            let err: std::io::Error = err.into();
            if err.kind() == ErrorKind::WouldBlock {
                Ok(())
            } else {
                Err(SshError::channel("sending keepalive", err))
            }
        }
    }
}

/// Runs `script` through `interpreter` on an authenticated session. Output
/// is relayed line by line while the command runs; the connection is closed
/// before this returns, whatever the outcome.
pub(crate) fn run_script(
    session: Session,
    interpreter: &str,
    script: &str,
    relay: &RelaySender,
    logger: &Logger,
) -> Result<ExecutionResult, SshError> {
    let guard = ConnectionGuard { session };
    let session = &guard.session;

    let mut channel = session
        .channel_session()
        .map_err(|err| SshError::channel("opening session channel", err))?;
    channel
        .exec(interpreter)
        .map_err(|err| SshError::channel(format!("starting {}", interpreter), err))?;
    logger.debug(
        "exec started",
        Some(&serde_json::json!({
            "interpreter": interpreter,
            "script_bytes": script.len(),
        })),
    );

    session.set_blocking(false);
    let started = Instant::now();
    let mut feed = ScriptFeed::new(script);
    let mut stdout = StreamRelay::new(OutputStream::Stdout, relay);
    let mut stderr = StreamRelay::new(OutputStream::Stderr, relay);
    let mut stderr_stream = channel.stderr();
    let mut buf = vec![0u8; READ_CHUNK_BYTES];

    loop {
        // After remote EOF the interpreter no longer needs its stdin.
        let mut progressed = if channel.eof() {
            false
        } else {
            feed.pump(&mut channel)?
        };
        let out_poll = poll_read(&mut channel, &mut buf, &mut stdout, "stdout")?;
        let err_poll = poll_read(&mut stderr_stream, &mut buf, &mut stderr, "stderr")?;
        progressed |= matches!(out_poll, Poll::Data) || matches!(err_poll, Poll::Data);

        if channel.eof() {
            break;
        }
        if !progressed {
            keepalive_outcome(session.keepalive_send())?;
            std::thread::sleep(Duration::from_millis(POLL_INTERVAL_MS));
        }
    }
    // Data may have been buffered alongside the EOF packet.
    loop {
        let out_poll = poll_read(&mut channel, &mut buf, &mut stdout, "stdout")?;
        let err_poll = poll_read(&mut stderr_stream, &mut buf, &mut stderr, "stderr")?;
        if !matches!(out_poll, Poll::Data) && !matches!(err_poll, Poll::Data) {
            break;
        }
    }
    stdout.finish();
    stderr.finish();

    session.set_blocking(true);
    channel
        .close()
        .map_err(|err| SshError::channel("closing channel", err))?;
    channel
        .wait_close()
        .map_err(|err| SshError::channel("waiting for channel close", err))?;

    let signal = channel
        .exit_signal()
        .ok()
        .and_then(|sig| sig.exit_signal);
    let exit_code = channel
        .exit_status()
        .map_err(|err| SshError::channel("reading exit status", err))?;
    logger.info(
        "exec finished",
        Some(&serde_json::json!({
            "interpreter": interpreter,
            "exit_code": exit_code,
            "signal": signal,
            "stdout_bytes": stdout.bytes,
            "stderr_bytes": stderr.bytes,
            "stdin_unsent_bytes": feed.unsent(),
            "duration_ms": started.elapsed().as_millis() as u64,
        })),
    );

    if let Some(signal) = signal {
        return Err(SshError::RemoteCommandKilled { signal });
    }
    if exit_code != 0 {
        return Err(SshError::RemoteCommandFailed { exit_code });
    }
    Ok(ExecutionResult {
        completed_at: Utc::now(),
    })
}
