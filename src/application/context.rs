//! # Context Store
//!
//! Associates each user with the wizard step their next message belongs to.
//! Every user owns a slot guarded by its own lock: holding the slot serializes
//! that user's messages in arrival order without blocking anybody else.

use crate::application::dialog::DialogState;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

type Slot = Arc<Mutex<Option<DialogState>>>;

/// Exclusive access to one user's context for the duration of a message.
pub type ContextGuard = OwnedMutexGuard<Option<DialogState>>;

#[derive(Debug, Default)]
pub struct ContextStore {
    slots: Mutex<HashMap<String, Slot>>,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn slot(&self, user_id: &str) -> Slot {
        let mut slots = self.slots.lock().await;
        slots.entry(user_id.to_string()).or_default().clone()
    }

    /// Waits for the user's slot and keeps it until the guard is dropped.
    /// Waiters are served in the order they called `lock`.
    pub async fn lock(&self, user_id: &str) -> ContextGuard {
        self.slot(user_id).await.lock_owned().await
    }

    pub async fn get(&self, user_id: &str) -> Option<DialogState> {
        self.lock(user_id).await.clone()
    }

    /// Installs `state`, replacing whatever the user had.
    pub async fn set(&self, user_id: &str, state: DialogState) {
        *self.lock(user_id).await = Some(state);
    }

    pub async fn unset(&self, user_id: &str) {
        *self.lock(user_id).await = None;
        self.release(user_id).await;
    }

    /// Drops the user's slot if it is empty and nobody is holding or waiting on it.
    pub async fn release(&self, user_id: &str) {
        let mut slots = self.slots.lock().await;
        let idle = slots.get(user_id).is_some_and(|slot| {
            Arc::strong_count(slot) == 1 && slot.try_lock().is_ok_and(|state| state.is_none())
        });
        if idle {
            slots.remove(user_id);
        }
    }

    /// Number of users with an installed context.
    pub async fn active_users(&self) -> usize {
        let slots = self.slots.lock().await;
        slots
            .values()
            .filter(|slot| slot.try_lock().map_or(true, |state| state.is_some()))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::UserInfo;
    use std::time::Duration;

    fn naming(actor: &str) -> DialogState {
        DialogState::AwaitingTeamName {
            actor: UserInfo {
                id: format!("@{actor}:example.org"),
                name: actor.to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_set_get_unset() {
        let store = ContextStore::new();
        assert_eq!(store.get("alice").await, None);

        store.set("alice", naming("alice")).await;
        assert_eq!(store.get("alice").await, Some(naming("alice")));
        assert_eq!(store.active_users().await, 1);

        store.set("alice", naming("other")).await;
        assert_eq!(store.get("alice").await, Some(naming("other")));

        store.unset("alice").await;
        assert_eq!(store.get("alice").await, None);
        assert_eq!(store.active_users().await, 0);
    }

    #[tokio::test]
    async fn test_users_are_independent() {
        let store = ContextStore::new();
        store.set("alice", naming("alice")).await;
        store.set("bob", naming("bob")).await;
        store.unset("alice").await;

        assert_eq!(store.get("alice").await, None);
        assert_eq!(store.get("bob").await, Some(naming("bob")));
    }

    #[tokio::test]
    async fn test_other_users_not_blocked_while_locked() {
        let store = ContextStore::new();
        let _alice = store.lock("alice").await;

        let bob = tokio::time::timeout(Duration::from_secs(1), store.get("bob")).await;
        assert!(bob.is_ok());
    }

    #[tokio::test]
    async fn test_same_user_waits_for_guard() {
        let store = Arc::new(ContextStore::new());
        let mut guard = store.lock("alice").await;

        let waiter = {
            let store = store.clone();
            tokio::spawn(async move { store.get("alice").await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        *guard = Some(naming("alice"));
        drop(guard);

        assert_eq!(waiter.await.unwrap(), Some(naming("alice")));
    }

    #[tokio::test]
    async fn test_same_user_runs_in_arrival_order() {
        let store = Arc::new(ContextStore::new());
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));
        let first = store.lock("alice").await;

        let mut handles = Vec::new();
        for i in 0..5 {
            let store = store.clone();
            let order = order.clone();
            handles.push(tokio::spawn(async move {
                let _guard = store.lock("alice").await;
                order.lock().unwrap().push(i);
            }));
            // Let each task queue up before spawning the next one
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        drop(first);
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_release_keeps_busy_slot() {
        let store = ContextStore::new();
        let guard = store.lock("alice").await;
        store.release("alice").await;
        assert_eq!(store.slots.lock().await.len(), 1);

        drop(guard);
        store.release("alice").await;
        assert!(store.slots.lock().await.is_empty());
    }
}
