//! File-backed transcript sink
//!
//! Appends one human-readable line per [`TranscriptEvent`], in the
//! original deployment's format:
//!
//! ```text
//! SEND | developer -> team-lead: SUBMIT_FOR_REVIEW | review_code | code (42 bytes): ...
//! RECEIVE | team-lead <- developer: SUBMIT_FOR_REVIEW | review_code | code (42 bytes): ...
//! TOKENS | code review: prompt=120, completion=30, total=150
//! ```
//!
//! Thread-safe via `Mutex<BufWriter<File>>`. Each line is flushed
//! immediately; the transcript is an audit artifact and must survive a
//! crash mid-run. Flushes again on `Drop`.

use conclave_application::ports::transcript::{TranscriptEvent, TranscriptSink};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

pub struct FileTranscript {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl FileTranscript {
    /// Open (or create) the transcript file for appending.
    ///
    /// Creates parent directories if needed. Returns `None` if the file
    /// cannot be opened; the caller degrades to a no-op sink.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(path = %parent.display(), error = %e, "Could not create transcript directory");
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not open transcript file");
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn format_line(event: &TranscriptEvent) -> String {
        match event {
            TranscriptEvent::Send {
                from,
                to,
                protocol,
                action,
                summary,
            } => format!("SEND | {from} -> {to}: {protocol} | {action} | {summary}"),
            TranscriptEvent::Receive {
                by,
                from,
                protocol,
                action,
                summary,
            } => format!("RECEIVE | {by} <- {from}: {protocol} | {action} | {summary}"),
            TranscriptEvent::TokenUsage {
                operation,
                prompt_tokens,
                completion_tokens,
            } => format!(
                "TOKENS | {operation}: prompt={prompt_tokens}, completion={completion_tokens}, total={}",
                prompt_tokens + completion_tokens
            ),
            TranscriptEvent::Note(text) => text.clone(),
        }
    }
}

impl TranscriptSink for FileTranscript {
    fn record(&self, event: TranscriptEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        let line = Self::format_line(&event);

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{timestamp} {line}");
            let _ = writer.flush();
        }
    }
}

impl Drop for FileTranscript {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
