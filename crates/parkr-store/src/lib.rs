//! # parkr-store
//!
//! Local persistence for the Parkr marketplace.
//!
//! Every entity collection lives under its own key as one JSON array inside a
//! single key/value namespace. The crate exposes a synchronous [`Store`]
//! handle that reads the whole collection, mutates it in memory and writes
//! the whole collection back, plus typed helpers for every domain model.
//! Mutations are announced on an [`EventBus`] so open views can refresh.

pub mod audit;
pub mod backend;
pub mod bookings;
pub mod chat;
pub mod events;
pub mod inbox;
pub mod migrations;
pub mod models;
pub mod pending;
pub mod seed;
pub mod spaces;
pub mod stats;
pub mod store;
pub mod users;

mod error;

pub use backend::{KvBackend, MemoryBackend, SqliteBackend};
pub use error::{Result, StoreError};
pub use events::{EventBus, StoreEvent};
pub use models::*;
pub use store::{Store, StoreOptions};
