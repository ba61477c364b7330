use crate::{to_saved_steps, to_sequence_steps, KeyValueStore, SavedFlow, StoreError};
use mimic_model::{Sequence, Step};
use uuid::Uuid;

/// Key all flows are stored under.
pub const STORAGE_KEY: &str = "mimic-saved-flows";

/// CRUD over saved flows.
///
/// The whole list is read once on open and rewritten on every mutation.
/// A failed write is returned to the caller, but the in-memory list keeps
/// the change.
pub struct FlowRepository<S> {
    store: S,
    key: String,
    flows: Vec<SavedFlow>,
}

impl<S: KeyValueStore> FlowRepository<S> {
    /// Opens the repository; unreadable data yields an empty list.
    pub fn open(store: S) -> Self {
        Self::open_with_key(store, STORAGE_KEY)
    }

    pub fn open_with_key(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let flows = match store.get(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<SavedFlow>>(&raw) {
                Ok(flows) => flows,
                Err(e) => {
                    tracing::error!(key = %key, error = %e, "failed to parse saved flows, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!(key = %key, error = %e, "failed to load saved flows, starting empty");
                Vec::new()
            }
        };
        tracing::debug!(key = %key, flows = flows.len(), "saved flows loaded");

        Self { store, key, flows }
    }

    pub fn list(&self) -> &[SavedFlow] {
        &self.flows
    }

    pub fn get(&self, id: &str) -> Option<&SavedFlow> {
        self.flows.iter().find(|flow| flow.id == id)
    }

    /// Saves a snapshot of `steps` as a new flow.
    pub fn save(&mut self, name: &str, steps: &[Step]) -> Result<SavedFlow, StoreError> {
        let now = now_millis();
        let flow = SavedFlow {
            id: format!("flow-{}", Uuid::new_v4()),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
            items: to_saved_steps(steps),
        };
        self.flows.push(flow.clone());
        tracing::info!(flow = %flow.id, name = %flow.name, items = flow.items.len(), "flow saved");
        self.persist()?;
        Ok(flow)
    }

    /// Replaces name and items of an existing flow; `created_at` is kept.
    pub fn update(
        &mut self,
        id: &str,
        name: &str,
        steps: &[Step],
    ) -> Result<SavedFlow, StoreError> {
        let flow = self
            .flows
            .iter_mut()
            .find(|flow| flow.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        flow.name = name.to_string();
        flow.items = to_saved_steps(steps);
        flow.updated_at = now_millis().max(flow.updated_at);
        let updated = flow.clone();
        tracing::info!(flow = %id, name, "flow updated");
        self.persist()?;
        Ok(updated)
    }

    /// Returns whether a flow was removed.
    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let before = self.flows.len();
        self.flows.retain(|flow| flow.id != id);
        if self.flows.len() == before {
            return Ok(false);
        }
        tracing::info!(flow = %id, "flow deleted");
        self.persist()?;
        Ok(true)
    }

    /// A runnable copy of a saved flow: fresh instance ids, every step idle.
    pub fn load_sequence(&self, id: &str) -> Result<Sequence, StoreError> {
        let flow = self
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(Sequence::from_steps(to_sequence_steps(&flow.items))?)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.flows)?;
        self.store.set(&self.key, &raw).map_err(|e| {
            tracing::error!(key = %self.key, error = %e, "failed to persist saved flows");
            e
        })
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
