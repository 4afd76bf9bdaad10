use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::{
    app::repositories::{StorageError, TasksRepository},
    model::{Task, TaskId},
};

pub struct InMemoryTasks {
    // Linear scans keep insertion order; collections stay small.
    tasks: Mutex<Vec<Task>>,
}

impl InMemoryTasks {
    pub fn new() -> Self {
        Self::with_tasks(Vec::new())
    }

    /// Creates a repository that already holds `tasks`, in the given order.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Task>>, StorageError> {
        self.tasks.lock().map_err(|_| StorageError::Poisoned)
    }
}

impl Default for InMemoryTasks {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TasksRepository for InMemoryTasks {
    async fn list(&self) -> anyhow::Result<Vec<Task>> {
        Ok(self.lock()?.clone())
    }

    async fn get(&self, id: TaskId) -> anyhow::Result<Option<Task>> {
        let tasks = self.lock()?;

        Ok(tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn next_id(&self) -> anyhow::Result<TaskId> {
        let tasks = self.lock()?;

        let max_id = tasks
            .iter()
            .map(|t| t.id)
            .max()
            .unwrap_or(TaskId::from_raw(0));

        Ok(max_id.next())
    }

    async fn save(&self, task: Task) -> anyhow::Result<Task> {
        let mut tasks = self.lock()?;

        // Ensure no task with this ID exists.
        if tasks.iter().any(|t| t.id == task.id) {
            return Err(StorageError::InvariantViolation(task.id).into());
        }

        tasks.push(task.clone());
        log::debug!("stored task {}", task.id);

        Ok(task)
    }

    async fn replace(&self, id: TaskId, task: Task) -> anyhow::Result<Task> {
        let mut tasks = self.lock()?;

        let Some(slot) = tasks.iter_mut().find(|t| t.id == id) else {
            return Err(StorageError::NotFound(id).into());
        };

        *slot = task.clone();
        log::debug!("replaced task {}", id);

        Ok(task)
    }

    async fn delete(&self, id: TaskId) -> anyhow::Result<bool> {
        let mut tasks = self.lock()?;

        let before = tasks.len();
        tasks.retain(|t| t.id != id);

        Ok(tasks.len() != before)
    }
}
