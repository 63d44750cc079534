//! Append-only action log file.
//!
//! Stores one JSON document per line:
//! ```text
//! {"players":["a","b"],"seed":7,"boss":null}      <- BattleSetup header
//! {"nonce":0,"turn":0,"command":{...}}            <- ActionLogEntry
//! {"nonce":1,"turn":1,"command":{...}}
//! ...
//! ```

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::{ActionLogEntry, ActionRepository, BattleSetup, RepositoryError, Result};

/// Action log backed by a JSON-lines file.
pub struct FileActionLog {
    path: PathBuf,
    writer: BufWriter<File>,
    next_nonce: u64,
}

impl FileActionLog {
    /// Create a new log file at `base_dir/filename`.
    ///
    /// # Errors
    ///
    /// Returns error if the file already exists (prevents accidental overwrites).
    pub fn create(base_dir: impl AsRef<Path>, filename: impl AsRef<str>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        std::fs::create_dir_all(base_dir)?;

        let path = base_dir.join(filename.as_ref());
        if path.exists() {
            return Err(RepositoryError::LogAlreadyExists(
                path.display().to_string(),
            ));
        }

        let file = OpenOptions::new().create_new(true).write(true).open(&path)?;
        tracing::debug!("Created action log: {}", path.display());

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            next_nonce: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a complete log from disk.
    pub fn load(path: &Path) -> Result<(BattleSetup, Vec<ActionLogEntry>)> {
        let reader = BufReader::new(File::open(path)?);
        let mut lines = reader.lines().enumerate();

        let setup = match lines.next() {
            Some((_, line)) => serde_json::from_str::<BattleSetup>(&line?)?,
            None => return Err(RepositoryError::MissingHeader(path.display().to_string())),
        };

        let mut entries = Vec::new();
        for (index, line) in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let entry: ActionLogEntry =
                serde_json::from_str(&line).map_err(|e| RepositoryError::CorruptedData {
                    line: index + 1,
                    reason: e.to_string(),
                })?;
            if entry.nonce != entries.len() as u64 {
                return Err(RepositoryError::OutOfOrder {
                    expected: entries.len() as u64,
                    found: entry.nonce,
                });
            }
            entries.push(entry);
        }

        Ok((setup, entries))
    }

    fn write_line(&mut self, value: &impl Serialize) -> Result<()> {
        serde_json::to_writer(&mut self.writer, value)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

impl ActionRepository for FileActionLog {
    fn begin(&mut self, setup: &BattleSetup) -> Result<()> {
        self.write_line(setup)
    }

    fn append(&mut self, entry: &ActionLogEntry) -> Result<()> {
        if entry.nonce != self.next_nonce {
            return Err(RepositoryError::OutOfOrder {
                expected: self.next_nonce,
                found: entry.nonce,
            });
        }
        self.write_line(entry)?;
        self.next_nonce += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn read_all(&self) -> Result<Option<(BattleSetup, Vec<ActionLogEntry>)>> {
        match Self::load(&self.path) {
            Ok(log) => Ok(Some(log)),
            Err(RepositoryError::MissingHeader(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
