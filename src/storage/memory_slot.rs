use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::KeyValueSlot;
use crate::error::SlotError;

#[derive(Debug, Default)]
struct MemoryState {
    entries: HashMap<String, String>,
    capacity: Option<usize>,
    failing: bool,
    writes: usize,
}

/// In-memory slot backend.
///
/// Clones share the same entries, so a test can keep a handle to inspect or
/// break the slot after handing it to a store. An optional byte capacity
/// mimics the quota of a browser storage area.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    state: Rc<RefCell<MemoryState>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot that rejects any write whose total stored size would exceed `bytes`
    pub fn with_capacity(bytes: usize) -> Self {
        let slot = Self::default();
        slot.state.borrow_mut().capacity = Some(bytes);
        slot
    }

    /// Seed a raw value, bypassing capacity checks
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.state
            .borrow_mut()
            .entries
            .insert(key.to_string(), value.to_string());
    }

    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.state.borrow().entries.get(key).cloned()
    }

    /// Make every subsequent read and write fail until switched back
    pub fn set_failing(&self, failing: bool) {
        self.state.borrow_mut().failing = failing;
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.state.borrow().writes
    }
}

impl KeyValueSlot for MemorySlot {
    fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        let state = self.state.borrow();
        if state.failing {
            return Err(SlotError::Unavailable("memory slot is failing".to_string()));
        }
        Ok(state.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SlotError> {
        let mut state = self.state.borrow_mut();
        if state.failing {
            return Err(SlotError::Unavailable("memory slot is failing".to_string()));
        }

        if let Some(capacity) = state.capacity {
            let others: usize = state
                .entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > capacity {
                return Err(SlotError::CapacityExceeded { needed, capacity });
            }
        }

        state.entries.insert(key.to_string(), value.to_string());
        state.writes += 1;
        Ok(())
    }
}
