pub mod tasks;
mod types;

pub use tasks::{NewTask, Task, TaskPatch};
pub use types::TaskId;
