//! Durable storage for decision logs.
//!
//! The store keeps the whole collection in memory and mirrors it into a
//! single named slot of a key-value backend. Backends implement
//! [`KeyValueSlot`]; time comes from an injected [`Clock`].

mod clock;
mod file_slot;
mod log_store;
mod memory_slot;
mod sqlite_slot;

pub use clock::{Clock, ManualClock, SystemClock};
pub use file_slot::FileSlot;
pub use log_store::{
    decode_logs, encode_logs, preserve_unreadable, DecisionLogStore, DEFAULT_SLOT_KEY,
    FREE_TIER_LIMIT,
};
pub use memory_slot::MemorySlot;
pub use sqlite_slot::SqliteSlot;

use crate::error::SlotError;

/// A local key-value store holding whole documents under named keys.
pub trait KeyValueSlot {
    /// Read the value stored under `key`, or `None` if the key was never written
    fn read(&self, key: &str) -> Result<Option<String>, SlotError>;

    /// Replace the value stored under `key`
    ///
    /// A failed write must leave the previous value in place.
    fn write(&mut self, key: &str, value: &str) -> Result<(), SlotError>;
}

impl<T: KeyValueSlot + ?Sized> KeyValueSlot for Box<T> {
    fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SlotError> {
        (**self).write(key, value)
    }
}
