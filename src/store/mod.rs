use crate::core::entry::DrinkEntry;
use anyhow::Result;

pub mod csv_file;
#[cfg(test)]
pub mod memory;

/// Per-user append-only drink log.
pub trait EntryStore {
    /// Appends after everything previously stored for `user`.
    fn append(&mut self, user: &str, entry: &DrinkEntry) -> Result<()>;

    /// All entries for `user` in submission order; empty for a user who never
    /// logged anything.
    fn read_all(&self, user: &str) -> Result<Vec<DrinkEntry>>;
}
