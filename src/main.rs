#[macro_use]
extern crate rocket;

mod api;
mod app;
mod model;
mod storage;

use std::sync::Arc;

use api::{initialize_api, Context};
use app::{repositories::TasksRepository, tasks::TasksService};
use model::{Task, TaskId};
use storage::inmemory;

struct Environment {
    seed_tasks: bool,
}

fn read_environment() -> Environment {
    let seed_tasks = std::env::var("TASKS_SEED")
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false);

    Environment { seed_tasks }
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

fn demo_tasks() -> Vec<Task> {
    vec![
        Task::new(TaskId::from_raw(1), "Review status codes", false),
        Task::new(TaskId::from_raw(2), "Try the endpoints with curl", true),
    ]
}

fn create_repository(env: &Environment) -> Arc<dyn TasksRepository> {
    if env.seed_tasks {
        log::info!("Seeding in-memory repository with demo tasks.");
        Arc::new(inmemory::InMemoryTasks::with_tasks(demo_tasks()))
    } else {
        log::info!("Using an empty in-memory repository.");
        Arc::new(inmemory::InMemoryTasks::new())
    }
}

fn create_context(tasks: Arc<dyn TasksRepository>) -> Context {
    Context {
        tasks: Box::new(TasksService::new(tasks)),
    }
}

#[launch]
fn rocket() -> _ {
    init_logging();

    log::info!("Start");

    let environment = read_environment();

    let repository = create_repository(&environment);

    let context = Arc::new(create_context(repository));

    initialize_api(context)
}
