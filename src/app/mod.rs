pub mod repositories;
pub mod tasks;
