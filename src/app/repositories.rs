use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Task, TaskId};

/// Defensive errors raised by a repository.
///
/// These never describe bad user input. The service rules out both cases
/// before calling into the repository, so seeing one means the service is
/// broken.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("task {0} does not exist")]
    NotFound(TaskId),
    #[error("invariant violated: task {0} already exists")]
    InvariantViolation(TaskId),
    #[error("tasks storage lock poisoned")]
    Poisoned,
}

/// Authoritative collection of tasks, keyed by id.
#[async_trait]
pub trait TasksRepository: Send + Sync {
    /// All tasks in insertion order.
    async fn list(&self) -> anyhow::Result<Vec<Task>>;

    async fn get(&self, id: TaskId) -> anyhow::Result<Option<Task>>;

    /// `max(existing ids) + 1`, or `1` for an empty collection. Computed from
    /// the current contents on every call.
    async fn next_id(&self) -> anyhow::Result<TaskId>;

    /// Appends a new task. Fails with [`StorageError::InvariantViolation`]
    /// if the id is taken.
    async fn save(&self, task: Task) -> anyhow::Result<Task>;

    /// Overwrites the task stored under `id`. Fails with
    /// [`StorageError::NotFound`] if there is none.
    async fn replace(&self, id: TaskId, task: Task) -> anyhow::Result<Task>;

    /// Removes the task, returning whether anything was removed.
    async fn delete(&self, id: TaskId) -> anyhow::Result<bool>;
}
