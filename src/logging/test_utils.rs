// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Log capture for unit tests.
//!
//! Stage code reports dry-run actions only through `tracing`, so tests
//! assert on the captured text.

use std::io::Write;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone)]
struct BufferWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer
            .lock()
            .map_err(|_| std::io::Error::other("buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[derive(Clone)]
struct BufferMakeWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl<'a> MakeWriter<'a> for BufferMakeWriter {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

/// Runs an async closure while capturing INFO-and-above tracing output.
///
/// Returns the closure's value together with the captured log text. The
/// closure's error, if any, is returned as-is so callers can assert on it.
pub(crate) async fn run_with_logs<F, Fut, T>(f: F) -> (Result<T>, String)
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    run_with_logs_at(Level::INFO, f).await
}

/// Like [`run_with_logs`], capturing everything at `level` and above.
///
/// Tasks spawned by the closure only log into the capture on a
/// current-thread runtime.
pub(crate) async fn run_with_logs_at<F, Fut, T>(level: Level, f: F) -> (Result<T>, String)
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_writer(BufferMakeWriter {
            buffer: Arc::clone(&buffer),
        })
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false)
        .with_level(false)
        .without_time()
        .finish();

    let result = {
        let _guard = tracing::subscriber::set_default(subscriber);
        f().await
    };

    let logs = buffer
        .lock()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default();
    (result, logs)
}
