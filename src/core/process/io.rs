// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Output streaming for child processes.
//!
//! ```text
//! run_child()
//!   stdout/stderr reader tasks (BufReader.lines())
//!   mpsc channels drained concurrently
//!   wait
//!   --> ProcessOutput { exit_code, stdout, stderr }
//! ```

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::builder::{ProcessBuilder, ProcessOutput, StreamFlags};
use crate::error::{LayoutError, ProcessError, Result};

const LINE_BUFFER: usize = 256;

/// Spawns a reader task for one stream if its flags ask for the content.
fn spawn_reader<R>(
    stream: Option<R>,
    flags: StreamFlags,
    process_name: &str,
    stream_name: &'static str,
    tx: mpsc::Sender<String>,
) -> Option<JoinHandle<()>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    if !flags.intersects(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING) {
        return None;
    }
    let name = process_name.to_string();
    stream.map(|stream| {
        tokio::spawn(async move {
            read_stream(stream, flags, &name, stream_name, tx).await;
        })
    })
}

async fn read_stream<R>(
    reader: R,
    flags: StreamFlags,
    process_name: &str,
    stream_name: &str,
    tx: mpsc::Sender<String>,
) where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if flags.contains(StreamFlags::FORWARD_TO_LOG) {
            debug!(process = %process_name, stream = %stream_name, "{line}");
        }
        if flags.contains(StreamFlags::KEEP_IN_STRING) {
            let _ = tx.send(line).await;
        }
    }
}

impl ProcessBuilder {
    /// Streams the child's output and waits for it to exit.
    pub(super) async fn run_child(&self, name: &str, child: &mut Child) -> Result<ProcessOutput> {
        // Both channels are drained while the child runs; a full channel would
        // otherwise stall the reader and, through the pipe, the child.
        let (stdout_tx, stdout_rx) = mpsc::channel::<String>(LINE_BUFFER);
        let (stderr_tx, stderr_rx) = mpsc::channel::<String>(LINE_BUFFER);

        let stdout_handle = spawn_reader(
            child.stdout.take(),
            self.stdout_config(),
            name,
            "stdout",
            stdout_tx,
        );
        let stderr_handle = spawn_reader(
            child.stderr.take(),
            self.stderr_config(),
            name,
            "stderr",
            stderr_tx,
        );

        let (stdout, stderr, status) = tokio::join!(
            drain(stdout_handle, stdout_rx),
            drain(stderr_handle, stderr_rx),
            child.wait(),
        );
        let status = status.map_err(|source| {
            LayoutError::from(ProcessError::SpawnFailed {
                command: self.command_line(),
                source,
            })
        })?;

        Ok(ProcessOutput::new(
            status.code().unwrap_or(-1),
            stdout,
            stderr,
        ))
    }
}

/// Collects kept lines while the reader runs, then waits for it to finish.
///
/// The channel closes once the reader task drops its sender, so streams that
/// keep nothing yield an empty string.
async fn drain(handle: Option<JoinHandle<()>>, mut rx: mpsc::Receiver<String>) -> String {
    let mut lines = Vec::new();
    while let Some(line) = rx.recv().await {
        lines.push(line);
    }
    if let Some(handle) = handle {
        let _ = handle.await;
    }
    lines.join("\n")
}
