use rocket::{
    http::Status,
    response,
    serde::{
        json::{self, Json},
        Serialize,
    },
    Request,
};

use crate::app::tasks::TaskError;

#[derive(Debug)]
pub enum Response<T> {
    Success(Status, Json<T>),
    NoContent,
    Failure(Status, Json<ErrorBody>),
    ServerError(anyhow::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    detail: String,
}

impl ErrorBody {
    pub fn json(detail: impl Into<String>) -> Json<Self> {
        Json(Self {
            detail: detail.into(),
        })
    }
}

impl<T> Response<T> {
    pub fn from_data(data: T) -> Self {
        Self::Success(Status::Ok, Json(data))
    }

    pub fn from_error(status: Status, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        log::warn!("rejected request ({}): {}", status.code, detail);

        Self::Failure(status, ErrorBody::json(detail))
    }

    pub fn from_task_error(error: TaskError) -> Self {
        Self::from_error(Status::new(error.status_code()), error.to_string())
    }

    /// Maps a service outcome, answering `status` on success.
    pub fn from_outcome(outcome: anyhow::Result<Result<T, TaskError>>, status: Status) -> Self {
        match outcome {
            Ok(Ok(data)) => Self::Success(status, Json(data)),
            Ok(Err(error)) => Self::from_task_error(error),
            Err(error) => Self::ServerError(error),
        }
    }

    pub fn body_required() -> Self {
        Self::from_error(Status::BadRequest, "JSON body required")
    }

    /// Maps a JSON body that could not be decoded.
    pub fn from_body_error(error: json::Error<'_>) -> Self {
        match error {
            json::Error::Parse(raw, _) if raw.trim().is_empty() => Self::body_required(),
            json::Error::Parse(_, error) => {
                Self::from_error(Status::UnprocessableEntity, error.to_string())
            }
            json::Error::Io(error) => Self::from_error(Status::BadRequest, error.to_string()),
        }
    }
}

impl<T> From<anyhow::Error> for Response<T> {
    fn from(error: anyhow::Error) -> Self {
        Self::ServerError(error)
    }
}

impl<'r, 'o: 'r, T: Serialize> response::Responder<'r, 'o> for Response<T> {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'o> {
        match self {
            Response::Success(status, body) => (status, body).respond_to(request),
            Response::NoContent => Status::NoContent.respond_to(request),
            Response::Failure(status, body) => (status, body).respond_to(request),
            Response::ServerError(error) => {
                log::error!("ServerError: {:?}", error);
                (
                    Status::InternalServerError,
                    ErrorBody::json("internal server error"),
                )
                    .respond_to(request)
            }
        }
    }
}
