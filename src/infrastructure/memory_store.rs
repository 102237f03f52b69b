use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::store::{StoreError, TodoStore};
use crate::domain::todo::{Todo, TodoId};

/// Titles the collection starts with when seeded.
pub const SEED_TITLES: [&str; 3] = ["Go to the Gym", "Do homework", "Go to grocery store"];

/// When simulated requests should fail with a transport fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaultPolicy {
    #[default]
    Never,
    /// Forced failure on every operation.
    Always,
    /// Deterministic periodic failure: the n-th, 2n-th, ... operations fail.
    EveryNth(NonZeroU32),
}

/// Authoritative in-memory todo collection posing as a remote service:
/// every operation sleeps for the configured latency and may trip the
/// fault policy before touching the collection.
pub struct MemoryStore {
    inner: Mutex<Inner>,
    latency: Duration,
    policy: FaultPolicy,
    op_count: AtomicU32,
}

struct Inner {
    todos: Vec<Todo>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner { todos: Vec::new(), next_id: 1 }),
            latency: Duration::ZERO,
            policy: FaultPolicy::Never,
            op_count: AtomicU32::new(0),
        }
    }

    /// Collection pre-populated with the given titles, ids assigned from 1.
    pub fn seeded<I, T>(titles: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let store = Self::new();
        {
            let mut inner = store.locked();
            for title in titles {
                let id = TodoId(inner.next_id);
                inner.next_id += 1;
                inner.todos.push(Todo { id, title: title.into() });
            }
        }
        store
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_faults(mut self, policy: FaultPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn locked(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("store mutex poisoned")
    }

    /// Simulated network leg shared by every operation: latency first,
    /// then the fault policy.
    async fn round_trip(&self) -> Result<(), StoreError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let tripped = match self.policy {
            FaultPolicy::Never => false,
            FaultPolicy::Always => true,
            FaultPolicy::EveryNth(n) => {
                (self.op_count.fetch_add(1, Ordering::Relaxed) + 1) % n.get() == 0
            }
        };
        if tripped {
            tracing::warn!("injected transport fault");
            return Err(StoreError::Transport);
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        self.round_trip().await?;
        Ok(self.locked().todos.clone())
    }

    async fn create(&self, title: &str) -> Result<(), StoreError> {
        self.round_trip().await?;
        if title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }
        let mut inner = self.locked();
        // The counter only ever advances, so ids are never reused even
        // after deletions.
        let id = TodoId(inner.next_id);
        inner.next_id += 1;
        inner.todos.push(Todo { id, title: title.to_string() });
        tracing::debug!(%id, "created todo");
        Ok(())
    }

    async fn update(&self, id: TodoId, title: &str) -> Result<(), StoreError> {
        self.round_trip().await?;
        if title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }
        let mut inner = self.locked();
        let todo = inner
            .todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        todo.title = title.to_string();
        tracing::debug!(%id, "updated todo");
        Ok(())
    }

    async fn delete(&self, id: TodoId) -> Result<(), StoreError> {
        self.round_trip().await?;
        // Absent ids are a silent no-op.
        self.locked().todos.retain(|t| t.id != id);
        tracing::debug!(%id, "deleted todo");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(todos: &[Todo]) -> Vec<&str> {
        todos.iter().map(|t| t.title.as_str()).collect()
    }

    #[tokio::test]
    async fn seeded_collection_lists_in_insertion_order() {
        let store = MemoryStore::seeded(SEED_TITLES);
        let todos = store.list().await.unwrap();
        assert_eq!(
            titles(&todos),
            vec!["Go to the Gym", "Do homework", "Go to grocery store"]
        );
        assert_eq!(
            todos.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![TodoId(1), TodoId(2), TodoId(3)]
        );
    }

    #[tokio::test]
    async fn create_appends_with_next_id() {
        let store = MemoryStore::seeded(SEED_TITLES);
        store.create("Buy milk").await.unwrap();
        let todos = store.list().await.unwrap();
        assert_eq!(todos.len(), 4);
        assert_eq!(todos[3], Todo { id: TodoId(4), title: "Buy milk".into() });
    }

    #[tokio::test]
    async fn ids_are_never_reused_after_delete() {
        let store = MemoryStore::new();
        store.create("a").await.unwrap();
        store.create("b").await.unwrap();
        store.delete(TodoId(2)).await.unwrap();
        store.create("c").await.unwrap();
        let todos = store.list().await.unwrap();
        assert_eq!(
            todos.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![TodoId(1), TodoId(3)]
        );
    }

    #[tokio::test]
    async fn update_replaces_title_in_place() {
        let store = MemoryStore::seeded(SEED_TITLES);
        store.update(TodoId(2), "Do all homework").await.unwrap();
        let todos = store.list().await.unwrap();
        assert_eq!(todos[1], Todo { id: TodoId(2), title: "Do all homework".into() });
        assert_eq!(todos[0].title, "Go to the Gym");
        assert_eq!(todos[2].title, "Go to grocery store");
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found_and_leaves_collection_unchanged() {
        let store = MemoryStore::seeded(SEED_TITLES);
        let before = store.list().await.unwrap();
        let err = store.update(TodoId(99), "nope").await.unwrap_err();
        assert_eq!(err, StoreError::NotFound(TodoId(99)));
        assert_eq!(store.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn delete_missing_id_is_a_silent_no_op() {
        let store = MemoryStore::seeded(SEED_TITLES);
        let before = store.list().await.unwrap();
        store.delete(TodoId(99)).await.unwrap();
        assert_eq!(store.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn empty_title_is_rejected() {
        let store = MemoryStore::seeded(SEED_TITLES);
        assert_eq!(store.create("").await.unwrap_err(), StoreError::EmptyTitle);
        assert_eq!(store.update(TodoId(1), "").await.unwrap_err(), StoreError::EmptyTitle);
        assert_eq!(store.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn sequential_mutations_net_out_exactly() {
        let store = MemoryStore::seeded(SEED_TITLES);
        store.create("Buy milk").await.unwrap();
        store.update(TodoId(2), "Do all homework").await.unwrap();
        store.delete(TodoId(1)).await.unwrap();
        let todos = store.list().await.unwrap();
        assert_eq!(
            todos,
            vec![
                Todo { id: TodoId(2), title: "Do all homework".into() },
                Todo { id: TodoId(3), title: "Go to grocery store".into() },
                Todo { id: TodoId(4), title: "Buy milk".into() },
            ]
        );
    }

    #[tokio::test]
    async fn forced_faults_fail_every_operation() {
        let store = MemoryStore::seeded(SEED_TITLES).with_faults(FaultPolicy::Always);
        assert_eq!(store.list().await.unwrap_err(), StoreError::Transport);
        assert_eq!(store.create("x").await.unwrap_err(), StoreError::Transport);
        assert_eq!(store.update(TodoId(1), "x").await.unwrap_err(), StoreError::Transport);
        assert_eq!(store.delete(TodoId(1)).await.unwrap_err(), StoreError::Transport);
    }

    #[tokio::test]
    async fn every_nth_fault_is_periodic() {
        let store =
            MemoryStore::seeded(SEED_TITLES).with_faults(FaultPolicy::EveryNth(NonZeroU32::new(2).unwrap()));
        assert!(store.list().await.is_ok());
        assert_eq!(store.list().await.unwrap_err(), StoreError::Transport);
        assert!(store.list().await.is_ok());
        assert_eq!(store.list().await.unwrap_err(), StoreError::Transport);
    }

    #[tokio::test(start_paused = true)]
    async fn latency_delays_but_does_not_change_results() {
        let store = MemoryStore::seeded(SEED_TITLES).with_latency(Duration::from_millis(150));
        let todos = store.list().await.unwrap();
        assert_eq!(todos.len(), 3);
    }
}
