//! Append-only session journal.
//!
//! Every published event is recorded as one JSON line. The journal is a
//! diagnostic artifact: a session's replication traffic can be replayed
//! through a client-side world to reproduce a reported desync.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::events::Event;

#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("journal io: {0}")]
    Io(#[from] std::io::Error),
    #[error("journal encode: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("journal line {line}: {source}")]
    Json {
        line: usize,
        source: serde_json::Error,
    },
}

/// JSON-lines event journal, one file per session.
pub struct EventJournal {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl EventJournal {
    /// Opens the journal for appending, creating the file if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, JournalError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, event: &Event) -> Result<(), JournalError> {
        let line = serde_json::to_string(event)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Reads every recorded event back, in append order.
    pub fn replay(path: impl AsRef<Path>) -> Result<Vec<Event>, JournalError> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let mut events = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let event = serde_json::from_str(&line).map_err(|source| JournalError::Json {
                line: index + 1,
                source,
            })?;
            events.push(event);
        }
        Ok(events)
    }
}
