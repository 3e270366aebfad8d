//! Line-oriented request loop.
//!
//! Reads newline-delimited JSON requests, answers each with exactly one reply
//! line, and stops on end of input or when the shutdown future resolves. Every
//! successful mutation is followed by a snapshot save when a path is configured,
//! so a process killed between requests loses nothing that was acknowledged.

use crate::api::{self, LedgerReply};
use crate::handle::LedgerHandle;
use crate::snapshot::SnapshotError;
use std::io;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

/// Serves one ledger over a byte stream.
#[derive(Clone, Debug)]
pub struct LedgerServer {
    handle: LedgerHandle,
    snapshot_path: Option<PathBuf>,
}

impl LedgerServer {
    /// Serve `handle`, persisting to `snapshot_path` if given.
    #[must_use]
    pub const fn new(handle: LedgerHandle, snapshot_path: Option<PathBuf>) -> Self {
        Self {
            handle,
            snapshot_path,
        }
    }

    /// The served ledger.
    #[must_use]
    pub const fn handle(&self) -> &LedgerHandle {
        &self.handle
    }

    /// Answer requests from `reader` on `writer` until input ends or `shutdown` resolves.
    ///
    /// Lines that are not UTF-8 or not valid requests get an `Err` reply; they
    /// never stop the loop. Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if reading input or writing a reply fails.
    pub async fn run<R, W, S>(&self, mut reader: R, mut writer: W, shutdown: S) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut line = Vec::new();

        info!("Ledger ready, reading requests");

        loop {
            line.clear();
            tokio::select! {
                read = reader.read_until(b'\n', &mut line) => {
                    if read? == 0 {
                        info!("Input closed");
                        break;
                    }
                }
                () = &mut shutdown => {
                    info!("Shutdown signal received");
                    break;
                }
            }

            let request = trim_line_end(&line);
            if request.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            let reply = self.answer(request).await;
            writer.write_all(api::encode_reply(&reply).as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }

        Ok(())
    }

    async fn answer(&self, line: &[u8]) -> LedgerReply {
        let request = match api::parse_request(line) {
            Ok(request) => request,
            Err(message) => {
                warn!(error = %message, "Malformed request");
                return LedgerReply::Err(message);
            }
        };

        debug!(method = request.method(), "Dispatching request");
        let mutation = request.is_mutation();
        let reply = api::dispatch(&self.handle, request).await;

        if !mutation {
            return reply;
        }

        // A rejected delete still removes the record, so any mutation may have changed state
        if let Err(err) = self.persist().await {
            warn!(error = %err, "Failed to save snapshot after mutation");
        }
        reply
    }

    /// Save the current ledger to the snapshot path, if one is configured.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if the file cannot be written.
    pub async fn persist(&self) -> Result<(), SnapshotError> {
        let Some(path) = self.snapshot_path.clone() else {
            return Ok(());
        };

        let snapshot = self.handle.snapshot().await;
        tokio::task::spawn_blocking(move || snapshot.save(&path)).await??;
        debug!("Snapshot saved");
        Ok(())
    }
}

fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
