use tracing::{debug, warn};

use super::{Clock, KeyValueSlot, SystemClock};
use crate::entity::{DecisionLog, DecisionLogUpdate, LogId, NewDecisionLog};
use crate::error::{SlotError, StoreError};

/// Maximum number of active (not yet reviewed) logs on the free tier
pub const FREE_TIER_LIMIT: usize = 3;

/// Slot key the collection is stored under unless configured otherwise
pub const DEFAULT_SLOT_KEY: &str = "resolve_decision_logs";

/// Serialize the whole collection as one JSON document
pub fn encode_logs(logs: &[DecisionLog]) -> Result<String, serde_json::Error> {
    serde_json::to_string(logs)
}

pub fn decode_logs(raw: &str) -> Result<Vec<DecisionLog>, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Copy an undecodable document under `key` to `<key>.bak`.
///
/// Returns the backup key when a copy exists. Run it before opening a store
/// whose first write would otherwise replace the unreadable bytes.
pub fn preserve_unreadable<S: KeyValueSlot + ?Sized>(
    slot: &mut S,
    key: &str,
) -> Result<Option<String>, SlotError> {
    // An unreadable slot has nothing to copy; opening the store reports it
    let raw = match slot.read(key) {
        Ok(Some(raw)) if !raw.trim().is_empty() && decode_logs(&raw).is_err() => raw,
        _ => return Ok(None),
    };

    let backup = format!("{}.bak", key);
    if slot.read(&backup)?.as_deref() != Some(raw.as_str()) {
        slot.write(&backup, &raw)?;
        warn!(key, backup = %backup, "copied unreadable decision logs aside");
    }
    Ok(Some(backup))
}

/// Owner of the decision-log collection.
///
/// Every mutation rewrites the whole collection into the slot before it is
/// committed in memory, so the in-memory mirror always matches the last
/// successful write.
pub struct DecisionLogStore<S, C = SystemClock> {
    slot: S,
    clock: C,
    key: String,
    logs: Vec<DecisionLog>,
    last_error: Option<StoreError>,
    load_error: Option<StoreError>,
}

impl<S: KeyValueSlot> DecisionLogStore<S> {
    /// Open the store on the default slot key with wall-clock time
    pub fn open(slot: S) -> Self {
        Self::with_clock(slot, SystemClock, DEFAULT_SLOT_KEY)
    }
}

impl<S: KeyValueSlot, C: Clock> DecisionLogStore<S, C> {
    /// Open the store, rehydrating from `key` in `slot`.
    ///
    /// Never fails: an unreadable or malformed slot yields an empty
    /// collection, with the cause available from [`Self::load_error`].
    pub fn with_clock(slot: S, clock: C, key: impl Into<String>) -> Self {
        let key = key.into();

        let (logs, load_error) = match slot.read(&key) {
            Ok(Some(raw)) if !raw.trim().is_empty() => match decode_logs(&raw) {
                Ok(logs) => (logs, None),
                Err(e) => (Vec::new(), Some(StoreError::DeserializationFailure(e.to_string()))),
            },
            Ok(_) => (Vec::new(), None),
            Err(e) => (Vec::new(), Some(StoreError::PersistenceFailure(e.to_string()))),
        };

        match &load_error {
            Some(err) => warn!(key = %key, error = %err, "starting with an empty decision log collection"),
            None => debug!(key = %key, count = logs.len(), "loaded decision logs"),
        }

        Self {
            slot,
            clock,
            key,
            logs,
            last_error: load_error.clone(),
            load_error,
        }
    }

    /// Create a new log, enforcing the active-log quota
    pub fn create(&mut self, input: NewDecisionLog) -> Result<DecisionLog, StoreError> {
        let active = self.active_count();
        if active >= FREE_TIER_LIMIT {
            warn!(active, limit = FREE_TIER_LIMIT, "rejected decision log: quota reached");
            return Err(self.fail(StoreError::QuotaExceeded {
                limit: FREE_TIER_LIMIT,
            }));
        }
        if let Err(e) = input.validate() {
            return Err(self.fail(e));
        }

        let log = DecisionLog::from_input(self.fresh_id(), input, self.clock.now());

        let mut next = self.logs.clone();
        next.push(log.clone());
        self.commit(next)?;

        debug!(id = %log.id, status = %log.status, "created decision log");
        Ok(log)
    }

    /// Merge `update` into the log with `id`.
    ///
    /// Unknown ids are ignored and nothing is written.
    pub fn update(&mut self, id: &LogId, update: DecisionLogUpdate) -> Result<(), StoreError> {
        let Some(pos) = self.position(id) else {
            debug!(id = %id, "update ignored: no such decision log");
            return Ok(());
        };
        if let Err(e) = update.validate() {
            return Err(self.fail(e));
        }

        let mut next = self.logs.clone();
        next[pos].apply(update, self.clock.now());
        self.commit(next)?;

        debug!(id = %id, "updated decision log");
        Ok(())
    }

    /// Remove the log with `id`; unknown ids are ignored and nothing is written
    pub fn delete(&mut self, id: &LogId) -> Result<(), StoreError> {
        let Some(pos) = self.position(id) else {
            debug!(id = %id, "delete ignored: no such decision log");
            return Ok(());
        };

        let mut next = self.logs.clone();
        next.remove(pos);
        self.commit(next)?;

        debug!(id = %id, "deleted decision log");
        Ok(())
    }

    /// Number of logs that count toward the quota
    pub fn active_count(&self) -> usize {
        self.logs.iter().filter(|log| log.is_active()).count()
    }

    pub fn is_quota_reached(&self) -> bool {
        self.active_count() >= FREE_TIER_LIMIT
    }

    pub fn free_tier_limit(&self) -> usize {
        FREE_TIER_LIMIT
    }

    /// All logs in insertion order
    pub fn logs(&self) -> &[DecisionLog] {
        &self.logs
    }

    pub fn get(&self, id: &LogId) -> Option<&DecisionLog> {
        self.logs.iter().find(|log| &log.id == id)
    }

    /// Logs whose id starts with `prefix`; an exact match wins outright
    pub fn find_by_prefix(&self, prefix: &str) -> Vec<&DecisionLog> {
        if let Some(exact) = self.logs.iter().find(|log| log.id.as_str() == prefix) {
            return vec![exact];
        }
        self.logs
            .iter()
            .filter(|log| !prefix.is_empty() && log.id.as_str().starts_with(prefix))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    /// Error from the most recent failed operation, cleared by the next successful write
    pub fn last_error(&self) -> Option<&StoreError> {
        self.last_error.as_ref()
    }

    /// Why the stored collection could not be restored at startup, if it could not
    pub fn load_error(&self) -> Option<&StoreError> {
        self.load_error.as_ref()
    }

    pub fn slot_key(&self) -> &str {
        &self.key
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    fn position(&self, id: &LogId) -> Option<usize> {
        self.logs.iter().position(|log| &log.id == id)
    }

    fn fresh_id(&self) -> LogId {
        loop {
            let id = LogId::generate();
            if self.position(&id).is_none() {
                return id;
            }
        }
    }

    fn fail(&mut self, err: StoreError) -> StoreError {
        self.last_error = Some(err.clone());
        err
    }

    /// Persist `next` and, only if that succeeds, make it the live collection
    fn commit(&mut self, next: Vec<DecisionLog>) -> Result<(), StoreError> {
        let encoded = match encode_logs(&next) {
            Ok(encoded) => encoded,
            Err(e) => return Err(self.fail(StoreError::PersistenceFailure(e.to_string()))),
        };

        if let Err(e) = self.slot.write(&self.key, &encoded) {
            warn!(key = %self.key, error = %e, "failed to persist decision logs");
            return Err(self.fail(StoreError::PersistenceFailure(e.to_string())));
        }

        self.logs = next;
        self.last_error = None;
        Ok(())
    }
}
