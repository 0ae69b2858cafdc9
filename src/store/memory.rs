use crate::core::entry::DrinkEntry;
use crate::store::EntryStore;
use anyhow::Result;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<DrinkEntry>>,
}

impl EntryStore for MemoryStore {
    fn append(&mut self, user: &str, entry: &DrinkEntry) -> Result<()> {
        self.entries
            .entry(user.to_string())
            .or_default()
            .push(entry.clone());
        Ok(())
    }

    fn read_all(&self, user: &str) -> Result<Vec<DrinkEntry>> {
        Ok(self.entries.get(user).cloned().unwrap_or_default())
    }
}
