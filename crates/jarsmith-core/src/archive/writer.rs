//! Writes walked entries into a zip (jar) stream.

use crate::JarsmithError;
use crate::Result;
use crate::archive::config::ArchiveConfig;
use crate::archive::report::CreationReport;
use crate::archive::walker::ArchiveEntry;
use crate::archive::walker::EntryKind;
use crate::progress::ProgressTracker;
use chrono::Datelike;
use chrono::Timelike;
use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use std::time::SystemTime;
use tracing::debug;
use tracing::warn;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;

/// Deflate level used when none is configured.
const DEFAULT_COMPRESSION_LEVEL: u8 = 6;

/// Writes `entries` in order into a new archive on `sink`.
///
/// The archive is finalized (central directory written, sink flushed) before
/// returning. On error the sink holds a truncated archive.
pub(crate) fn write_entries<W: Write + Seek>(
    sink: W,
    entries: &[ArchiveEntry],
    config: &ArchiveConfig,
    tracker: &mut ProgressTracker<'_>,
) -> Result<CreationReport> {
    let start = Instant::now();
    let mut zip = ZipWriter::new(sink);
    let mut report = CreationReport::default();
    let base_options = base_options(config);
    let mut buffer = vec![0u8; config.buffer_size.max(1)];

    for entry in entries {
        let display = Path::new(&entry.name);
        tracker.on_entry_start(display);

        let options = base_options.last_modified_time(zip_timestamp(entry.modified));
        match entry.kind {
            EntryKind::Directory => {
                debug!(entry = %entry.name, "adding directory");
                zip.add_directory(entry.name.as_str(), options)
                    .map_err(|e| sink_write_error(&entry.name, e))?;
                report.directories_added += 1;
            }
            EntryKind::File => {
                debug!(entry = %entry.name, size = entry.size, "adding file");
                let options = file_options(options, entry, config);
                let written = write_file(&mut zip, entry, options, &mut buffer, tracker)?;
                report.files_added += 1;
                report.bytes_written += written;
            }
            EntryKind::Symlink => {
                warn!(path = %entry.path.display(), "skipping symlink");
                report.files_skipped += 1;
                report.add_warning(format!("Skipped symlink: {}", entry.path.display()));
            }
        }

        tracker.on_entry_complete(display);
    }

    let mut sink = zip
        .finish()
        .map_err(|e| JarsmithError::SinkClose { source: zip_io_error(e) })?;
    sink.flush()
        .map_err(|source| JarsmithError::SinkClose { source })?;
    report.bytes_compressed = sink
        .stream_position()
        .map_err(|source| JarsmithError::SinkClose { source })?;
    report.duration = start.elapsed();

    tracker.on_complete();

    Ok(report)
}

/// Streams one file into the archive through `buffer`.
///
/// The source file handle is dropped on every return path.
fn write_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    entry: &ArchiveEntry,
    options: SimpleFileOptions,
    buffer: &mut [u8],
    tracker: &mut ProgressTracker<'_>,
) -> Result<u64> {
    let not_readable = |source| JarsmithError::FileNotReadable {
        path: entry.path.clone(),
        source,
    };

    let mut file = File::open(&entry.path).map_err(not_readable)?;

    zip.start_file(entry.name.as_str(), options)
        .map_err(|e| sink_write_error(&entry.name, e))?;

    let mut bytes_written = 0u64;
    loop {
        let bytes_read = file.read(buffer).map_err(not_readable)?;
        if bytes_read == 0 {
            break;
        }
        zip.write_all(&buffer[..bytes_read])
            .map_err(|source| JarsmithError::SinkWrite {
                entry: entry.name.clone(),
                source,
            })?;
        bytes_written += bytes_read as u64;
        tracker.on_bytes_written(bytes_read as u64);
    }

    Ok(bytes_written)
}

fn base_options(config: &ArchiveConfig) -> SimpleFileOptions {
    match config.compression_level {
        Some(0) => SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
        level => SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(i64::from(
                level.unwrap_or(DEFAULT_COMPRESSION_LEVEL),
            ))),
    }
}

fn file_options(
    options: SimpleFileOptions,
    entry: &ArchiveEntry,
    config: &ArchiveConfig,
) -> SimpleFileOptions {
    let options = options.large_file(entry.size >= u64::from(u32::MAX));
    match entry.mode {
        Some(mode) if config.preserve_permissions => options.unix_permissions(mode),
        _ => options,
    }
}

/// Converts a modification time to the zip DOS timestamp in local time.
///
/// Times outside the DOS range (1980-2107) or unknown times fall back to
/// 1980-01-01 00:00:00.
fn zip_timestamp(modified: Option<SystemTime>) -> zip::DateTime {
    modified
        .and_then(|time| {
            let local = chrono::DateTime::<chrono::Local>::from(time).naive_local();
            zip::DateTime::from_date_and_time(
                u16::try_from(local.year()).ok()?,
                u8::try_from(local.month()).ok()?,
                u8::try_from(local.day()).ok()?,
                u8::try_from(local.hour()).ok()?,
                u8::try_from(local.minute()).ok()?,
                u8::try_from(local.second()).ok()?,
            )
            .ok()
        })
        .unwrap_or_default()
}

fn sink_write_error(entry: &str, err: ZipError) -> JarsmithError {
    JarsmithError::SinkWrite {
        entry: entry.to_string(),
        source: zip_io_error(err),
    }
}

fn zip_io_error(err: ZipError) -> std::io::Error {
    match err {
        ZipError::Io(e) => e,
        other => std::io::Error::other(other),
    }
}
