use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;

use crate::model::{
    tasks::{normalize_title, TitleViolation, TITLE_MAX_CHARS, TITLE_MIN_CHARS},
    NewTask, Task, TaskId, TaskPatch,
};

use super::repositories::TasksRepository;

/// Business rule violations. These are the only errors a caller is expected
/// to handle; anything else coming out of the service is an internal error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("task {0} not found")]
    NotFound(TaskId),
}

impl TaskError {
    /// Conventional HTTP status for the error kind.
    pub const fn status_code(&self) -> u16 {
        match self {
            TaskError::Validation(_) => 400,
            TaskError::Conflict(_) => 409,
            TaskError::NotFound(_) => 404,
        }
    }
}

impl From<TitleViolation> for TaskError {
    fn from(violation: TitleViolation) -> Self {
        let message = match violation {
            TitleViolation::Empty => "title required".to_string(),
            TitleViolation::TooShort | TitleViolation::TooLong => format!(
                "title must be between {} and {} characters",
                TITLE_MIN_CHARS, TITLE_MAX_CHARS
            ),
        };

        TaskError::Validation(message)
    }
}

fn duplicate_title() -> TaskError {
    TaskError::Conflict("a task with that title already exists".to_string())
}

pub struct TasksService {
    tasks: Arc<dyn TasksRepository>,
    // Held for the whole read-modify-write cycle of every mutation.
    write_gate: Mutex<()>,
}

impl TasksService {
    pub fn new(tasks: Arc<dyn TasksRepository>) -> Self {
        Self {
            tasks,
            write_gate: Mutex::new(()),
        }
    }

    pub async fn list_tasks(&self, done: Option<bool>) -> anyhow::Result<Vec<Task>> {
        let mut tasks = self.tasks.list().await?;

        if let Some(done) = done {
            tasks.retain(|t| t.done == done);
        }

        log::debug!("listing {} tasks (done filter: {:?})", tasks.len(), done);

        Ok(tasks)
    }

    pub async fn get_task(&self, id: TaskId) -> anyhow::Result<Result<Task, TaskError>> {
        Ok(self.tasks.get(id).await?.ok_or(TaskError::NotFound(id)))
    }

    pub async fn create_task(&self, input: NewTask) -> anyhow::Result<Result<Task, TaskError>> {
        // Validate the title.
        let title = match normalize_title(&input.title) {
            Ok(title) => title,
            Err(violation) => return Ok(Err(violation.into())),
        };

        let _gate = self.write_gate.lock().await;

        // Check if a task with this title already exists.
        if self.title_taken(&title, None).await? {
            return Ok(Err(duplicate_title()));
        }

        let id = self.tasks.next_id().await?;
        let task = self
            .tasks
            .save(Task::new(id, title, input.done.unwrap_or(false)))
            .await?;

        log::info!("created task {}", task.id);

        Ok(Ok(task))
    }

    pub async fn update_task(
        &self,
        id: TaskId,
        mut patch: TaskPatch,
    ) -> anyhow::Result<Result<Task, TaskError>> {
        // Validate the title, if one was supplied.
        if let Some(raw) = patch.title.take() {
            match normalize_title(&raw) {
                Ok(title) => patch.title = Some(title),
                Err(violation) => return Ok(Err(violation.into())),
            }
        }

        let _gate = self.write_gate.lock().await;

        let Some(stored) = self.tasks.get(id).await? else {
            return Ok(Err(TaskError::NotFound(id)));
        };

        // A task may keep (or re-case) its own title, but not take another's.
        if let Some(title) = &patch.title {
            if self.title_taken(title, Some(id)).await? {
                return Ok(Err(duplicate_title()));
            }
        }

        if patch.is_empty() {
            log::debug!("empty patch for task {}, nothing to change", id);
        }

        let task = self.tasks.replace(id, stored.merged(&patch)).await?;

        log::info!("updated task {}", id);

        Ok(Ok(task))
    }

    pub async fn delete_task(&self, id: TaskId) -> anyhow::Result<Result<(), TaskError>> {
        let _gate = self.write_gate.lock().await;

        if !self.tasks.delete(id).await? {
            return Ok(Err(TaskError::NotFound(id)));
        }

        log::info!("deleted task {}", id);

        Ok(Ok(()))
    }

    async fn title_taken(&self, title: &str, except: Option<TaskId>) -> anyhow::Result<bool> {
        Ok(self
            .tasks
            .list()
            .await?
            .iter()
            .any(|t| Some(t.id) != except && t.has_same_title(title)))
    }
}
