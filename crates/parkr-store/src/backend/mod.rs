//! Key/value backends.
//!
//! A backend is a flat string namespace: one key maps to one serialized
//! value, and a write replaces the whole value. The [`Store`](crate::Store)
//! never asks for anything finer grained.

mod memory;
mod sqlite;

pub use memory::MemoryBackend;
pub use sqlite::{default_path, SqliteBackend};

use crate::error::Result;

pub trait KvBackend: Send {
    /// Raw value stored under `key`, or `None` if the key was never written.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// All keys currently present, sorted.
    fn keys(&self) -> Result<Vec<String>>;
}
