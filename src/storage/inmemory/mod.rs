mod tasks;

pub use tasks::InMemoryTasks;
