use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::KvBackend;
use crate::error::Result;

/// Process-local backend. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // a panicking writer cannot leave a half-written value behind
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KvBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.entries().keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_write_overwrite() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.read("k").unwrap(), None);

        backend.write("k", "[1]").unwrap();
        backend.write("k", "[1,2]").unwrap();
        backend.write("a", "[]").unwrap();

        assert_eq!(backend.read("k").unwrap().as_deref(), Some("[1,2]"));
        assert_eq!(backend.keys().unwrap(), vec!["a".to_string(), "k".to_string()]);
    }
}
