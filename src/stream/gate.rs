//! Batch serialization
//!
//! Sink calls may suspend while the display redraws, and the pipe keeps
//! producing chunks meanwhile. Batches are therefore queued to a single
//! dispatch task that owns the [`Dispatcher`] and handles one batch at a
//! time, in arrival order.

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::common::{Error, Result};
use crate::display::StatusSink;

use super::dispatch::Dispatcher;
use super::lines::LineReassembler;

/// Batches queued ahead of the dispatcher before the reader waits
///
/// When the queue is full the pipe is left unread and the editor blocks on
/// its own output, instead of memory growing without bound.
pub const QUEUE_DEPTH: usize = 64;

/// Size of a single pipe read
const READ_CHUNK: usize = 8 * 1024;

/// Single-slot gate in front of a [`Dispatcher`]
pub struct Gate<S> {
    tx: mpsc::Sender<Vec<String>>,
    task: JoinHandle<Dispatcher<S>>,
}

impl<S: StatusSink + 'static> Gate<S> {
    /// Move `dispatcher` onto its own task
    pub fn open(mut dispatcher: Dispatcher<S>) -> Self {
        let (tx, mut rx) = mpsc::channel::<Vec<String>>(QUEUE_DEPTH);

        let task = tokio::spawn(async move {
            while let Some(batch) = rx.recv().await {
                dispatcher.dispatch_batch(&batch).await;
            }
            dispatcher
        });

        Self { tx, task }
    }

    /// Queue one batch behind those already submitted
    pub async fn submit(&self, batch: Vec<String>) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }
        self.tx
            .send(batch)
            .await
            .map_err(|_| Error::Internal("Dispatcher stopped before the stream ended".to_string()))
    }

    /// Close the gate and wait until every submitted batch is dispatched
    pub async fn drain(self) -> Result<Dispatcher<S>> {
        drop(self.tx);
        self.task
            .await
            .map_err(|e| Error::Internal(format!("Dispatcher task failed: {}", e)))
    }
}

/// Read `reader` to the end, submitting one batch per chunk
///
/// Returns the number of bytes read.
pub async fn pump<R, S>(mut reader: R, gate: &Gate<S>) -> Result<u64>
where
    R: AsyncRead + Unpin,
    S: StatusSink + 'static,
{
    let mut lines = LineReassembler::new();
    let mut buf = vec![0u8; READ_CHUNK];
    let mut total = 0u64;

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        total += n as u64;
        gate.submit(lines.feed(&buf[..n])).await?;
    }

    lines.finish();
    tracing::debug!(bytes = total, "Editor output closed");
    Ok(total)
}
