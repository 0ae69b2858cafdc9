use crate::core::entry::DrinkEntry;
use crate::store::EntryStore;
use crate::utils::fs::user_data_file;
use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One `<user>.csv` per user under a data directory.
#[derive(Debug, Clone)]
pub struct CsvStore {
    data_dir: PathBuf,
}

impl CsvStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn path_for(&self, user: &str) -> PathBuf {
        user_data_file(&self.data_dir, user)
    }
}

impl EntryStore for CsvStore {
    fn append(&mut self, user: &str, entry: &DrinkEntry) -> Result<()> {
        fs::create_dir_all(&self.data_dir)
            .with_context(|| format!("failed creating {}", self.data_dir.display()))?;

        let path = self.path_for(user);
        let len = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        let needs_header = len == 0;
        let unterminated = len > 0 && !ends_with_newline(&path)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed opening {}", path.display()))?;
        if unterminated {
            // a hand-edited file may lack the final newline
            file.write_all(b"\n")
                .with_context(|| format!("failed writing to {}", path.display()))?;
        }

        let mut writer = WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer
            .serialize(entry)
            .with_context(|| format!("failed writing entry to {}", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("failed flushing {}", path.display()))?;

        info!(
            user,
            date = %entry.date,
            units = entry.units,
            drinks = entry.drink_count,
            "appended entry"
        );
        Ok(())
    }

    fn read_all(&self, user: &str) -> Result<Vec<DrinkEntry>> {
        let path = self.path_for(user);
        if !path.exists() {
            debug!(user, path = %path.display(), "no log file yet");
            return Ok(Vec::new());
        }

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_path(&path)
            .with_context(|| format!("failed reading {}", path.display()))?;

        let mut entries = Vec::new();
        for (idx, record) in reader.deserialize::<DrinkEntry>().enumerate() {
            // header is line 1
            let entry = record
                .with_context(|| format!("failed parsing {} line {}", path.display(), idx + 2))?;
            entries.push(entry);
        }

        debug!(user, count = entries.len(), "loaded entries");
        Ok(entries)
    }
}

fn ends_with_newline(path: &Path) -> Result<bool> {
    let mut file =
        File::open(path).with_context(|| format!("failed opening {}", path.display()))?;
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))
        .and_then(|_| file.read_exact(&mut last))
        .with_context(|| format!("failed reading {}", path.display()))?;
    Ok(last[0] == b'\n')
}
