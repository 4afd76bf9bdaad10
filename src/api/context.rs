use std::sync::Arc;

use rocket::State;

use crate::app::tasks::TasksService;

pub type ContextState = State<Arc<Context>>;

/// Services shared by every request handler.
pub struct Context {
    pub tasks: Box<TasksService>,
}
