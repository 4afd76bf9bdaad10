use std::sync::Arc;

use rocket::{http::Status, serde::json::Json, Build, Request, Rocket};

mod context;
pub mod controllers;
mod response;

pub use context::{Context, ContextState};
pub use response::{ErrorBody, Response};

#[catch(default)]
fn default_catcher(status: Status, _request: &Request) -> (Status, Json<ErrorBody>) {
    (status, ErrorBody::json(status.reason().unwrap_or("Unknown error")))
}

/// Creates [`Rocket`] object that serves API requests using the provided context.
pub fn initialize_api(context: Arc<Context>) -> Rocket<Build> {
    let api_routes = routes![
        controllers::tasks::list_tasks,
        controllers::tasks::get_task,
        controllers::tasks::create_task,
        controllers::tasks::update_task,
        controllers::tasks::delete_task,
    ];

    rocket::build()
        .manage(context)
        .mount("/api", api_routes)
        .register("/", catchers![default_catcher])
}
