use serde::{Deserialize, Serialize};

use super::TaskId;

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub done: bool,
}

impl Task {
    pub fn new(id: TaskId, title: impl Into<String>, done: bool) -> Self {
        Self {
            id,
            title: title.into(),
            done,
        }
    }

    /// Returns a copy of the task with every field present in `patch` applied.
    ///
    /// Fields absent from the patch keep their stored value. The id is never
    /// touched.
    pub fn merged(&self, patch: &TaskPatch) -> Task {
        Task {
            id: self.id,
            title: patch.title.clone().unwrap_or_else(|| self.title.clone()),
            done: patch.done.unwrap_or(self.done),
        }
    }

    pub fn has_same_title(&self, title: &str) -> bool {
        titles_collide(&self.title, title)
    }
}

/// Input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewTask {
    pub title: String,
    pub done: Option<bool>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            done: None,
        }
    }
}

#[cfg(test)]
impl NewTask {
    pub fn with_done(mut self, done: bool) -> Self {
        self.done = Some(done);
        self
    }
}

/// Partial update of a task. `None` means the field was not supplied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub done: Option<bool>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.done.is_none()
    }
}

#[cfg(test)]
impl TaskPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            done: None,
        }
    }

    pub fn done(done: bool) -> Self {
        Self {
            title: None,
            done: Some(done),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleViolation {
    Empty,
    TooShort,
    TooLong,
}

/// Trims `raw` and checks it against the title rules.
pub fn normalize_title(raw: &str) -> Result<String, TitleViolation> {
    let title = raw.trim();

    if title.is_empty() {
        return Err(TitleViolation::Empty);
    }

    // Length is counted in characters, not bytes.
    let length = title.chars().count();
    if length < TITLE_MIN_CHARS {
        return Err(TitleViolation::TooShort);
    }
    if length > TITLE_MAX_CHARS {
        return Err(TitleViolation::TooLong);
    }

    Ok(title.to_string())
}

pub fn titles_collide(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task() -> Task {
        Task::new(TaskId::from_raw(7), "Write report", false)
    }

    #[test]
    fn merge_with_done_only_keeps_title() {
        let merged = task().merged(&TaskPatch::done(true));

        assert_eq!(merged, Task::new(TaskId::from_raw(7), "Write report", true));
    }

    #[test]
    fn merge_with_title_only_keeps_done() {
        let mut original = task();
        original.done = true;

        let merged = original.merged(&TaskPatch::title("Read report"));

        assert_eq!(merged.title, "Read report");
        assert!(merged.done);
        assert_eq!(merged.id, original.id);
    }

    #[test]
    fn empty_patch_is_identity() {
        let patch = TaskPatch::default();

        assert!(patch.is_empty());
        assert_eq!(task().merged(&patch), task());
    }

    #[test]
    fn explicit_false_overwrites_true() {
        let mut original = task();
        original.done = true;

        assert!(!original.merged(&TaskPatch::done(false)).done);
    }

    #[test]
    fn normalize_title_trims() {
        assert_eq!(normalize_title("  Buy milk \n"), Ok("Buy milk".to_string()));
    }

    #[test]
    fn normalize_title_rejects_blank() {
        assert_eq!(normalize_title(""), Err(TitleViolation::Empty));
        assert_eq!(normalize_title("   \t"), Err(TitleViolation::Empty));
    }

    #[test]
    fn normalize_title_enforces_bounds() {
        assert_eq!(normalize_title(" ab "), Err(TitleViolation::TooShort));
        assert_eq!(normalize_title("abc"), Ok("abc".to_string()));
        assert_eq!(normalize_title(&"x".repeat(80)), Ok("x".repeat(80)));
        assert_eq!(normalize_title(&"x".repeat(81)), Err(TitleViolation::TooLong));
    }

    #[test]
    fn normalize_title_counts_characters() {
        // Three characters, six bytes.
        assert_eq!(normalize_title("ñáé"), Ok("ñáé".to_string()));
    }

    #[test]
    fn titles_collide_ignoring_case() {
        assert!(titles_collide("Buy milk", "buy MILK"));
        assert!(!titles_collide("Buy milk", "Buy milk!"));
        assert!(task().has_same_title("WRITE REPORT"));
    }
}
