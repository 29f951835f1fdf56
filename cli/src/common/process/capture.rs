//! # Stream Drain (`common::process::capture`)
//!
//! File: cli/src/common/process/capture.rs
//!
//! ## Overview
//!
//! One [`drain_lines`] future runs per child output stream, inside its own
//! Tokio task. It reads the stream to end-of-file, one newline-delimited line
//! at a time, and for every line:
//!
//! 1. appends `line + "\n"` to the capture buffer (its own, or the shared
//!    buffer in combined mode),
//! 2. writes the line to the configured [`LineSink`], if any,
//! 3. logs the line when trace echo is on (`info` for stdout, `warn` for
//!    stderr).
//!
//! Lines have no length limit. A trailing `\r` is stripped and invalid UTF-8
//! is replaced rather than aborting the read. A read error ends the drain
//! early with whatever was captured so far; a sink write error disables only
//! that sink.
//!
use crate::common::fs::io::ensure_parent_dir;
use crate::common::process::spec::OutputSink;
use crate::common::ui::{self, Color, Target};
use crate::core::error::ExecError;
use std::borrow::Cow;
use std::sync::{Arc, Mutex};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};
use tracing::{debug, info, warn};

/// Which child stream a drain reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl StreamKind {
    pub fn name(self) -> &'static str {
        match self {
            StreamKind::Stdout => "stdout",
            StreamKind::Stderr => "stderr",
        }
    }

    fn color(self) -> Color {
        match self {
            StreamKind::Stdout => Color::White,
            StreamKind::Stderr => Color::Red,
        }
    }

    fn terminal(self) -> Target {
        match self {
            StreamKind::Stdout => Target::Stdout,
            StreamKind::Stderr => Target::Stderr,
        }
    }
}

/// Buffer shared by both drains in combined capture mode.
pub type SharedBuffer = Arc<Mutex<String>>;

/// An opened destination for mirrored lines.
pub struct LineSink {
    writer: Box<dyn AsyncWrite + Send + Unpin>,
    color: Option<Color>,
}

impl LineSink {
    /// Opens `sink` for lines of `stream`. File sinks are created (truncated)
    /// here, before the child exists.
    pub async fn open(sink: &OutputSink, stream: StreamKind) -> Result<Self, ExecError> {
        match sink {
            OutputSink::Terminal => {
                let writer: Box<dyn AsyncWrite + Send + Unpin> = match stream {
                    StreamKind::Stdout => Box::new(tokio::io::stdout()),
                    StreamKind::Stderr => Box::new(tokio::io::stderr()),
                };
                let color = ui::colors_enabled(stream.terminal()).then(|| stream.color());
                Ok(Self { writer, color })
            }
            OutputSink::File(path) => {
                ensure_parent_dir(path).map_err(|e| ExecError::Sink {
                    path: path.clone(),
                    reason: format!("{:#}", e),
                })?;
                let file = File::create(path).await.map_err(|e| ExecError::Sink {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
                Ok(Self {
                    writer: Box::new(BufWriter::new(file)),
                    color: None,
                })
            }
        }
    }

    /// Wraps an arbitrary writer without colour.
    pub fn from_writer(writer: impl AsyncWrite + Send + Unpin + 'static) -> Self {
        Self {
            writer: Box::new(writer),
            color: None,
        }
    }

    async fn write_line(&mut self, line: &str) -> std::io::Result<()> {
        let text = match self.color {
            Some(color) => Cow::Owned(ui::paint(line, color, true)),
            None => Cow::Borrowed(line),
        };
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.write_all(b"\n").await
    }
}

/// Everything a drain task needs besides the stream itself.
pub struct LineDrain {
    pub command: String,
    pub stream: StreamKind,
    pub log_lines: bool,
    pub sink: Option<LineSink>,
    pub shared: Option<SharedBuffer>,
}

/// Reads `reader` to end-of-file and returns the captured text.
///
/// In combined mode the lines go to `drain.shared` and the returned string is empty.
pub async fn drain_lines<R>(reader: R, mut drain: LineDrain) -> String
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut raw = Vec::new();
    let mut captured = String::new();
    let mut lines = 0usize;

    loop {
        raw.clear();
        match reader.read_until(b'\n', &mut raw).await {
            Ok(0) => break,
            Ok(_) => {
                let line = decode_line(&raw);
                lines += 1;

                match &drain.shared {
                    Some(shared) => {
                        let mut buffer = shared.lock().unwrap_or_else(|p| p.into_inner());
                        buffer.push_str(&line);
                        buffer.push('\n');
                    }
                    None => {
                        captured.push_str(&line);
                        captured.push('\n');
                    }
                }

                if let Some(sink) = drain.sink.as_mut() {
                    if let Err(e) = sink.write_line(&line).await {
                        warn!(
                            command = %drain.command,
                            stream = drain.stream.name(),
                            error = %e,
                            "Output sink write failed; disabling sink"
                        );
                        drain.sink = None;
                    }
                }

                if drain.log_lines {
                    match drain.stream {
                        StreamKind::Stdout => info!(command = %drain.command, "{}", line),
                        StreamKind::Stderr => warn!(command = %drain.command, "{}", line),
                    }
                }
            }
            Err(e) => {
                warn!(
                    command = %drain.command,
                    stream = drain.stream.name(),
                    error = %e,
                    "Reading output stream failed; keeping partial capture"
                );
                break;
            }
        }
    }

    if let Some(mut sink) = drain.sink.take() {
        if let Err(e) = sink.writer.flush().await {
            warn!(command = %drain.command, error = %e, "Flushing output sink failed");
        }
    }

    debug!(
        command = %drain.command,
        stream = drain.stream.name(),
        lines,
        "Stream drained"
    );
    captured
}

/// Strips the line terminator (`\n` or `\r\n`) and decodes lossily.
fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    let mut end = raw.len();
    if end > 0 && raw[end - 1] == b'\n' {
        end -= 1;
        if end > 0 && raw[end - 1] == b'\r' {
            end -= 1;
        }
    }
    String::from_utf8_lossy(&raw[..end])
}
