//! Frame sources and the consumer task
//!
//! A connection is modelled as a [`FrameSource`] feeding one `mpsc` channel,
//! with a single consumer task draining it into a [`Dispatcher`]. Handlers
//! never overlap: the consumer applies one frame at a time, in arrival order.

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use super::dispatch::Dispatcher;
use crate::dashboard::{Clock, Surface};
use crate::error::{DashboardError, DashboardResult};

/// Something that yields stream frames, one JSON envelope at a time
#[async_trait]
pub trait FrameSource: Send {
    /// Next frame, or `None` once the connection has ended
    async fn next_frame(&mut self) -> DashboardResult<Option<String>>;

    /// Adapt the source into a stream of frames
    fn into_stream(self) -> BoxStream<'static, DashboardResult<String>>
    where
        Self: Sized + 'static,
    {
        stream::unfold(Some(self), |source| async move {
            let mut source = source?;
            match source.next_frame().await {
                Ok(Some(frame)) => Some((Ok(frame), Some(source))),
                Ok(None) => None,
                Err(e) => Some((Err(e), None)),
            }
        })
        .boxed()
    }
}

/// Replays a captured stream: one frame per line. Blank lines and lines
/// starting with `#` are skipped.
///
/// Lines that are not valid UTF-8 are decoded lossily and still forwarded,
/// so the dispatcher rejects them like any other bad frame.
pub struct ReplaySource {
    path: PathBuf,
    reader: BufReader<File>,
    buf: Vec<u8>,
    line_no: usize,
}

impl ReplaySource {
    pub async fn open(path: impl AsRef<Path>) -> DashboardResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).await?;
        tracing::info!(path = %path.display(), "Replaying captured stream");

        Ok(Self {
            path,
            reader: BufReader::new(file),
            buf: Vec::new(),
            line_no: 0,
        })
    }

    /// Number of lines read so far
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

#[async_trait]
impl FrameSource for ReplaySource {
    async fn next_frame(&mut self) -> DashboardResult<Option<String>> {
        loop {
            self.buf.clear();
            if self.reader.read_until(b'\n', &mut self.buf).await? == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let line = match std::str::from_utf8(&self.buf) {
                Ok(line) => std::borrow::Cow::Borrowed(line),
                Err(e) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        line = self.line_no,
                        error = %e,
                        "Frame is not valid UTF-8"
                    );
                    String::from_utf8_lossy(&self.buf)
                }
            };
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            tracing::trace!(path = %self.path.display(), line = self.line_no, "Frame read");
            return Ok(Some(trimmed.to_string()));
        }
    }
}

/// What the consumer receives from a connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// One text frame
    Frame(String),
    /// The connection ended
    Disconnected,
}

/// Push every frame of `source` into `tx`, then signal the disconnect.
///
/// Returns the number of frames forwarded.
pub async fn forward<F>(source: F, tx: mpsc::Sender<Inbound>) -> DashboardResult<usize>
where
    F: FrameSource + 'static,
{
    let mut frames = source.into_stream();
    let mut forwarded = 0;

    while let Some(frame) = frames.next().await {
        let frame = frame?;
        tx.send(Inbound::Frame(frame))
            .await
            .map_err(|_| DashboardError::StreamClosed("consumer dropped".to_string()))?;
        forwarded += 1;
    }

    tx.send(Inbound::Disconnected)
        .await
        .map_err(|_| DashboardError::StreamClosed("consumer dropped".to_string()))?;

    tracing::debug!(forwarded, "Source exhausted");
    Ok(forwarded)
}

/// Drain `rx` into the dispatcher until every sender is gone.
///
/// `after_frame` runs after each frame is applied, successful or not.
pub async fn run_consumer<S, C, F>(
    mut rx: mpsc::Receiver<Inbound>,
    mut dispatcher: Dispatcher<S, C>,
    mut after_frame: F,
) -> Dispatcher<S, C>
where
    S: Surface,
    C: Clock,
    F: FnMut(&Dispatcher<S, C>),
{
    while let Some(inbound) = rx.recv().await {
        match inbound {
            Inbound::Frame(frame) => {
                // Errors are logged and counted by the dispatcher
                let _ = dispatcher.dispatch_frame(&frame);
                after_frame(&dispatcher);
            }
            Inbound::Disconnected => dispatcher.connection_lost(),
        }
    }

    let stats = dispatcher.stats();
    tracing::info!(
        snapshots = stats.snapshots,
        warnings = stats.warnings,
        rejected = stats.rejected_frames,
        "Stream consumer finished"
    );
    dispatcher
}
