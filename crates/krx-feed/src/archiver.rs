//! Archiver (AR, spec §4.2).
//!
//! Subscribes to all six bus channels and hands every envelope off to a
//! single dedicated blocking thread via a crossbeam channel — mirroring the
//! teacher's dedup-worker pattern of keeping the hot async path off of
//! filesystem I/O. The blocking thread owns one open file handle per logical
//! stream, rotated by local date, and only writes during the trading-hour
//! gate.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use krx_core::config::ArchiveConfig;
use krx_core::types::LogicalStream;
use krx_core::{time_util, KrxError};
use tracing::{error, info, warn};

/// One item handed from a bus subscriber task to the archive writer thread.
struct ArchiveItem {
    stream: LogicalStream,
    payload: Vec<u8>,
}

/// Spawn the six bus-subscriber tasks plus the dedicated writer thread.
///
/// Returns the writer thread's join handle; subscriber tasks run as detached
/// tokio tasks for the lifetime of the process.
pub fn spawn(bus: Arc<crate::bus::Bus>, config: ArchiveConfig) -> std::thread::JoinHandle<()> {
    let (tx, rx) = crossbeam_channel::bounded::<ArchiveItem>(16_384);

    for stream in LogicalStream::ALL {
        let mut receiver = bus.subscribe(stream);
        let tx = tx.clone();
        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(envelope) => {
                        if tx.send(ArchiveItem { stream, payload: envelope.payload }).is_err() {
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        warn!("archiver lagged {n} messages on {stream}");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }
    drop(tx);

    std::thread::spawn(move || run_writer(rx, config))
}

/// The writer thread body: one open [`File`] per (date, stream) pair,
/// reopened whenever the local date rolls over.
fn run_writer(rx: Receiver<ArchiveItem>, config: ArchiveConfig) {
    let mut open_files: HashMap<LogicalStream, (String, File)> = HashMap::new();

    info!("archiver writer thread started — base_dir={}", config.base_dir.display());

    while let Ok(item) = rx.recv() {
        let minute_of_day = time_util::local_minute_of_day();
        if !config.in_trading_window(minute_of_day) {
            continue;
        }

        let today = time_util::local_date_string();

        let needs_reopen = match open_files.get(&item.stream) {
            Some((date, _)) => *date != today,
            None => true,
        };

        if needs_reopen {
            match open_archive_file(&config.base_dir, &today, item.stream) {
                Ok(file) => {
                    open_files.insert(item.stream, (today.clone(), file));
                }
                Err(e) => {
                    error!("failed to open archive file for {}: {e}", item.stream);
                    continue;
                }
            }
        }

        if let Some((_, file)) = open_files.get_mut(&item.stream) {
            if let Err(e) = write_line(file, &item.payload) {
                error!("archive write failed for {}: {e}", item.stream);
            }
        }
    }

    info!("archiver writer thread exited");
}

fn open_archive_file(base_dir: &Path, date: &str, stream: LogicalStream) -> Result<File, KrxError> {
    let dir: PathBuf = base_dir.join(date);
    fs::create_dir_all(&dir).map_err(|e| KrxError::Archive(format!("create_dir_all {}: {e}", dir.display())))?;
    let path = dir.join(stream.archive_filename());
    OpenOptions::new().create(true).append(true).open(&path).map_err(|e| KrxError::Archive(format!("open {}: {e}", path.display())))
}

/// Append `payload` decoded as ASCII, non-ASCII bytes dropped (spec §6: the
/// record is ASCII with decode errors ignored, not passed through).
fn write_line(file: &mut File, payload: &[u8]) -> std::io::Result<()> {
    let ascii: Vec<u8> = payload.iter().copied().filter(u8::is_ascii).collect();
    file.write_all(&ascii)?;
    file.write_all(b"\n")?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_archive_file_creates_dated_directory() {
        let tmp = std::env::temp_dir().join(format!("krx-archiver-test-{}", std::process::id()));
        let _ = fs::remove_dir_all(&tmp);
        let file = open_archive_file(&tmp, "2026-07-30", LogicalStream::FuturesStock);
        assert!(file.is_ok());
        assert!(tmp.join("2026-07-30").join("futures_stock.log").exists());
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn write_line_appends_newline_terminated_payload() {
        let tmp = std::env::temp_dir().join(format!("krx-archiver-test2-{}", std::process::id()));
        let _ = fs::remove_dir_all(&tmp);
        let mut file = open_archive_file(&tmp, "2026-07-30", LogicalStream::OptionsCallStock).unwrap();
        write_line(&mut file, b"hello").unwrap();
        drop(file);
        let content = fs::read_to_string(tmp.join("2026-07-30").join("options_call_stock.log")).unwrap();
        assert_eq!(content, "hello\n");
        let _ = fs::remove_dir_all(&tmp);
    }
}
