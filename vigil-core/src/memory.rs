//! In-memory task source.
//!
//! Canonical task copies live in a shared keyed map; handles write through
//! it, so a transition is visible to any query issued after the call
//! returns. Deployments wanting persistence implement `Tasker` over real
//! storage instead; this variant backs tests and single-process setups.
//! The mutex serializes access within one process only; cross-process
//! discipline stays with the deployment.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{anyhow, bail, Result};

use crate::escalation::Escalation;
use crate::task::{Task, TaskHandle, TaskStatus};
use crate::tasker::Tasker;

#[derive(Debug, Default)]
struct Store {
    tasks: BTreeMap<u64, Task>,
    next_key: u64,
}

fn lock(store: &Mutex<Store>) -> Result<MutexGuard<'_, Store>> {
    store.lock().map_err(|_| anyhow!("task store lock poisoned"))
}

#[derive(Debug, Default, Clone)]
pub struct MemoryTasker {
    store: Arc<Mutex<Store>>,
}

impl MemoryTasker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task, handing back the handle the driver acts through.
    /// The record carries no id; keys are internal to the store.
    pub fn insert(&self, task: Task) -> Result<MemoryTaskHandle> {
        let mut store = lock(&self.store)?;
        let key = store.next_key;
        store.next_key += 1;
        store.tasks.insert(key, task.clone());
        Ok(MemoryTaskHandle {
            key,
            task,
            store: Arc::clone(&self.store),
        })
    }

    /// Drop a task from the live set. Closure itself (ticketing, archival)
    /// happens outside this crate; the store just forgets the record.
    pub fn remove(&self, handle: &MemoryTaskHandle) -> Result<Option<Task>> {
        Ok(lock(&self.store)?.tasks.remove(&handle.key))
    }

    fn handles_with_status(&self, status: TaskStatus) -> Result<Vec<MemoryTaskHandle>> {
        let store = lock(&self.store)?;
        Ok(store
            .tasks
            .iter()
            .filter(|(_, t)| t.status == status)
            .map(|(&key, t)| MemoryTaskHandle {
                key,
                task: t.clone(),
                store: Arc::clone(&self.store),
            })
            .collect())
    }
}

impl Tasker for MemoryTasker {
    type Handle = MemoryTaskHandle;

    fn get_new_tasks(&self) -> Result<Vec<MemoryTaskHandle>> {
        self.handles_with_status(TaskStatus::Open)
    }

    fn get_active_tasks(&self) -> Result<Vec<MemoryTaskHandle>> {
        self.handles_with_status(TaskStatus::InProgress)
    }

    fn get_pending_tasks(&self) -> Result<Vec<MemoryTaskHandle>> {
        self.handles_with_status(TaskStatus::Verification)
    }
}

/// Handle over one stored task. Mutations hit the shared map before the
/// local copy, so `task()` reflects what the store has once a call returns.
#[derive(Debug, Clone)]
pub struct MemoryTaskHandle {
    key: u64,
    task: Task,
    store: Arc<Mutex<Store>>,
}

impl MemoryTaskHandle {
    fn set_status(&mut self, status: TaskStatus) -> Result<()> {
        let mut store = lock(&self.store)?;
        let Some(stored) = store.tasks.get_mut(&self.key) else {
            bail!("task '{}' no longer in store", self.task.title);
        };
        stored.status = status;
        drop(store);
        self.task.status = status;
        Ok(())
    }
}

impl TaskHandle for MemoryTaskHandle {
    fn task(&self) -> &Task {
        &self.task
    }

    fn set_open(&mut self) -> Result<()> {
        self.set_status(TaskStatus::Open)
    }

    fn set_in_progress(&mut self) -> Result<()> {
        self.set_status(TaskStatus::InProgress)
    }

    fn set_verifying(&mut self) -> Result<()> {
        self.set_status(TaskStatus::Verification)
    }

    fn set_escalated(&mut self, escalation: Escalation) -> Result<()> {
        let mut store = lock(&self.store)?;
        let Some(stored) = store.tasks.get_mut(&self.key) else {
            bail!("task '{}' no longer in store", self.task.title);
        };
        stored.escalation = Some(escalation.clone());
        drop(store);
        self.task.escalation = Some(escalation);
        Ok(())
    }
}
