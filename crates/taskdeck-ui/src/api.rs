use std::fmt;

use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use taskdeck_core::task::{
    ParseRequest, ParseResponse, SuggestResponse, Task, TaskCreate,
    TaskListQuery, TaskListResponse, TaskPatch,
};

use crate::config::api_base_url;

/// Failure of a single request/response pair. Nothing is retried; callers
/// surface these as short inline messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    Transport(String),
    /// The server answered with a non-2xx status.
    Status(u16),
    /// The body did not match the documented contract.
    Decode(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status(404))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(detail) => {
                write!(f, "network error: {detail}")
            }
            ApiError::Status(status) => {
                write!(f, "server responded with status {status}")
            }
            ApiError::Decode(detail) => {
                write!(f, "unexpected response body: {detail}")
            }
        }
    }
}

fn tasks_url(suffix: &str) -> String {
    format!("{}/api/tasks{suffix}", api_base_url())
}

fn check_status(response: &Response) -> Result<(), ApiError> {
    if response.ok() {
        Ok(())
    } else {
        Err(ApiError::Status(response.status()))
    }
}

async fn decode_json<T: DeserializeOwned>(
    response: Response,
) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

/// `GET /api/tasks` with optional pagination and filter parameters.
pub async fn list_tasks(
    query: &TaskListQuery,
) -> Result<TaskListResponse, ApiError> {
    let mut url = tasks_url("");
    let pairs = query.query_pairs();
    if !pairs.is_empty() {
        let encoded: Vec<String> = pairs
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        url.push('?');
        url.push_str(&encoded.join("&"));
    }

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|err| ApiError::Transport(err.to_string()))?;
    check_status(&response)?;
    decode_json(response).await
}

/// `GET /api/tasks/{id}`; 404 when the task does not exist.
pub async fn get_task(id: &str) -> Result<Task, ApiError> {
    let response = Request::get(&tasks_url(&format!("/{id}")))
        .send()
        .await
        .map_err(|err| ApiError::Transport(err.to_string()))?;
    check_status(&response)?;
    decode_json(response).await
}

/// `POST /api/tasks`.
pub async fn create_task(body: &TaskCreate) -> Result<Task, ApiError> {
    let response = Request::post(&tasks_url(""))
        .json(body)
        .map_err(|err| ApiError::Decode(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Transport(err.to_string()))?;
    check_status(&response)?;
    decode_json(response).await
}

/// `PUT /api/tasks/{id}` with a partial body.
pub async fn update_task(
    id: &str,
    patch: &TaskPatch,
) -> Result<Task, ApiError> {
    let response = Request::put(&tasks_url(&format!("/{id}")))
        .json(patch)
        .map_err(|err| ApiError::Decode(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Transport(err.to_string()))?;
    check_status(&response)?;
    decode_json(response).await
}

/// `DELETE /api/tasks/{id}`; 404 when already absent.
pub async fn delete_task(id: &str) -> Result<(), ApiError> {
    let response = Request::delete(&tasks_url(&format!("/{id}")))
        .send()
        .await
        .map_err(|err| ApiError::Transport(err.to_string()))?;
    check_status(&response)
}

/// `POST /api/tasks/parse` — natural-language parse preview.
pub async fn parse_task_text(text: &str) -> Result<ParseResponse, ApiError> {
    let body = ParseRequest {
        text: text.to_string(),
    };
    let response = Request::post(&tasks_url("/parse"))
        .json(&body)
        .map_err(|err| ApiError::Decode(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Transport(err.to_string()))?;
    check_status(&response)?;
    decode_json(response).await
}

/// `GET /api/tasks/suggestions?count=N` — AI-sourced candidate tasks.
pub async fn fetch_suggestions(
    count: u32,
) -> Result<SuggestResponse, ApiError> {
    let response =
        Request::get(&tasks_url(&format!("/suggestions?count={count}")))
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
    check_status(&response)?;
    decode_json(response).await
}
