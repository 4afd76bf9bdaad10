use std::num::ParseIntError;

use rocket::{
    http::{ContentType, Status},
    request::FromParam,
    serde::json::{self, Json},
};
use serde::{Deserialize, Deserializer};

use crate::model::{NewTask, Task, TaskId, TaskPatch};

use super::super::{ContextState, Response};

impl<'a> FromParam<'a> for TaskId {
    type Error = ParseIntError;

    fn from_param(param: &'a str) -> Result<Self, Self::Error> {
        param.parse().map(TaskId::from_raw)
    }
}

/// Parses a boolean query flag the way HTML forms and curl users write it.
fn parse_bool_query(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[derive(Deserialize)]
pub struct CreateTaskData {
    title: String,
    #[serde(default)]
    done: Option<bool>,
}

impl From<CreateTaskData> for NewTask {
    fn from(data: CreateTaskData) -> Self {
        NewTask {
            done: data.done,
            ..NewTask::new(data.title)
        }
    }
}

/// Update body. The outer `Option` records whether the key was sent at all,
/// the inner one whether it was `null`.
#[derive(Deserialize)]
pub struct UpdateTaskData {
    #[serde(default, deserialize_with = "present")]
    title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    done: Option<Option<bool>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn not_null<T>(field: Option<Option<T>>, name: &str) -> Result<Option<T>, String> {
    match field {
        Some(None) => Err(format!("{} must not be null", name)),
        Some(value) => Ok(value),
        None => Ok(None),
    }
}

impl TryFrom<UpdateTaskData> for TaskPatch {
    type Error = String;

    fn try_from(data: UpdateTaskData) -> Result<Self, Self::Error> {
        Ok(TaskPatch {
            title: not_null(data.title, "title")?,
            done: not_null(data.done, "done")?,
        })
    }
}

/// Decodes a JSON request body. A missing or non-JSON content type and a
/// `null` body both count as no body at all.
fn decode_body<T, R>(
    content_type: Option<&ContentType>,
    data: Result<Json<Option<T>>, json::Error<'_>>,
) -> Result<T, Response<R>> {
    if !content_type.is_some_and(|ct| ct.is_json()) {
        return Err(Response::body_required());
    }

    match data {
        Ok(Json(Some(data))) => Ok(data),
        Ok(Json(None)) => Err(Response::body_required()),
        Err(error) => Err(Response::from_body_error(error)),
    }
}

#[get("/tasks?<done>")]
pub async fn list_tasks(context: &ContextState, done: Option<&str>) -> Response<Vec<Task>> {
    let done = match done {
        Some(raw) => match parse_bool_query(raw) {
            Some(flag) => Some(flag),
            None => return Response::from_error(Status::BadRequest, "done must be true or false"),
        },
        None => None,
    };

    match context.tasks.list_tasks(done).await {
        Ok(tasks) => Response::from_data(tasks),
        Err(error) => error.into(),
    }
}

#[get("/tasks/<task_id>")]
pub async fn get_task(context: &ContextState, task_id: TaskId) -> Response<Task> {
    let outcome = context.tasks.get_task(task_id).await;

    Response::from_outcome(outcome, Status::Ok)
}

#[post("/tasks", data = "<data>")]
pub async fn create_task(
    context: &ContextState,
    content_type: Option<&ContentType>,
    data: Result<Json<Option<CreateTaskData>>, json::Error<'_>>,
) -> Response<Task> {
    let data = match decode_body(content_type, data) {
        Ok(data) => data,
        Err(response) => return response,
    };

    let outcome = context.tasks.create_task(data.into()).await;

    Response::from_outcome(outcome, Status::Created)
}

#[put("/tasks/<task_id>", data = "<data>")]
pub async fn update_task(
    context: &ContextState,
    task_id: TaskId,
    content_type: Option<&ContentType>,
    data: Result<Json<Option<UpdateTaskData>>, json::Error<'_>>,
) -> Response<Task> {
    let data = match decode_body(content_type, data) {
        Ok(data) => data,
        Err(response) => return response,
    };

    let patch = match TaskPatch::try_from(data) {
        Ok(patch) => patch,
        Err(detail) => return Response::from_error(Status::UnprocessableEntity, detail),
    };

    let outcome = context.tasks.update_task(task_id, patch).await;

    Response::from_outcome(outcome, Status::Ok)
}

#[delete("/tasks/<task_id>")]
pub async fn delete_task(context: &ContextState, task_id: TaskId) -> Response<()> {
    match context.tasks.delete_task(task_id).await {
        Ok(Ok(())) => Response::NoContent,
        Ok(Err(error)) => Response::from_task_error(error),
        Err(error) => error.into(),
    }
}
