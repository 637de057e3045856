// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod identity;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State as AxumState,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use charity_tasks::{Caller, TaskAction};
use charity_tasks_api::{
    ApiError, AuthorizationService, BenefactorResponse, CharityResponse, CreateTaskRequest,
    DetailResponse, RegisterBenefactorRequest, RegisterCharityRequest, RespondToTaskRequest,
    TaskEventsResponse, TaskResponse, new_cause,
};
use charity_tasks_persistence::{Persistence, PersistenceError};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::identity::Identity;

/// Charity Tasks Server - HTTP server for the charity task system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "CHARITY_TASKS_DATABASE")]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, env = "CHARITY_TASKS_BIND", default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Port to bind the server to
    #[arg(short, long, env = "CHARITY_TASKS_PORT", default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// Every operation runs its store transaction while holding the lock; the
/// conditional update keeps transitions correct even without it.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Machine-checkable category.
    error: String,
    /// Human-readable message.
    detail: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    status: StatusCode,
    category: &'static str,
    detail: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: self.category.to_string(),
            detail: self.detail,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } | ApiError::InvalidState { .. } => {
                StatusCode::NOT_FOUND
            }
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            category: err.category(),
            detail: err.to_string(),
        }
    }
}

/// Checks the role a body-reading route requires before its body is read.
///
/// Bodyless routes leave authorization to the API handler. Routes with a
/// body check here as well so that a caller without the role gets 401 or
/// 403, never 400 for a body it had no right to send.
fn authorize_route(caller: &Caller, action: TaskAction) -> Result<(), HttpError> {
    AuthorizationService::authorize(caller, action)
        .map_err(|err| HttpError::from(ApiError::from(err)))
}

/// Authorizes a body-reading route, then unwraps its JSON body.
///
/// Malformed input maps to 400.
fn gated_json_body<T>(
    caller: &Caller,
    action: TaskAction,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, HttpError> {
    authorize_route(caller, action)?;
    payload.map(|Json(body)| body).map_err(|rejection| {
        warn!(error = %rejection, "Rejected request body");
        HttpError::from(ApiError::InvalidInput {
            field: String::from("body"),
            message: rejection.body_text(),
        })
    })
}

/// Unwraps a task id path segment. A non-numeric id names no task.
fn parse_task_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, HttpError> {
    path.map(|Path(task_id)| task_id).map_err(|_| {
        HttpError::from(ApiError::ResourceNotFound {
            resource_type: String::from("Task"),
            message: String::from("Task not found"),
        })
    })
}

/// Handler for POST `/charities` endpoint.
async fn handle_register_charity(
    AxumState(app_state): AxumState<AppState>,
    Identity(caller): Identity,
    payload: Result<Json<RegisterCharityRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CharityResponse>), HttpError> {
    info!(user_id = ?caller.user_id(), "Handling register_charity request");

    let request: RegisterCharityRequest =
        gated_json_body(&caller, TaskAction::RegisterCharity, payload)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: CharityResponse =
        charity_tasks_api::register_charity(&mut persistence, &caller, request)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/benefactors` endpoint.
async fn handle_register_benefactor(
    AxumState(app_state): AxumState<AppState>,
    Identity(caller): Identity,
    payload: Result<Json<RegisterBenefactorRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BenefactorResponse>), HttpError> {
    info!(user_id = ?caller.user_id(), "Handling register_benefactor request");

    let request: RegisterBenefactorRequest =
        gated_json_body(&caller, TaskAction::RegisterBenefactor, payload)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: BenefactorResponse =
        charity_tasks_api::register_benefactor(&mut persistence, &caller, &request)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/tasks` endpoint.
///
/// Query parameters narrow the caller's visible set; unknown or malformed
/// parameters are ignored.
async fn handle_list_tasks(
    AxumState(app_state): AxumState<AppState>,
    Identity(caller): Identity,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<TaskResponse>>, HttpError> {
    info!(
        user_id = ?caller.user_id(),
        params = params.len(),
        "Handling list_tasks request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let tasks: Vec<TaskResponse> =
        charity_tasks_api::list_tasks(&mut persistence, &caller, &params)?;
    drop(persistence);

    Ok(Json(tasks))
}

/// Handler for POST `/tasks` endpoint.
async fn handle_create_task(
    AxumState(app_state): AxumState<AppState>,
    Identity(caller): Identity,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskResponse>), HttpError> {
    info!(user_id = ?caller.user_id(), "Handling create_task request");

    let request: CreateTaskRequest = gated_json_body(&caller, TaskAction::CreateTask, payload)?;

    let mut persistence = app_state.persistence.lock().await;
    let task: TaskResponse = charity_tasks_api::create_task(
        &mut persistence,
        &caller,
        request,
        new_cause("POST /tasks"),
    )?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(task)))
}

/// Handler for GET `/tasks/{id}` endpoint.
async fn handle_get_task(
    AxumState(app_state): AxumState<AppState>,
    Identity(caller): Identity,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<TaskResponse>, HttpError> {
    let task_id: i64 = parse_task_id(path)?;
    info!(user_id = ?caller.user_id(), task_id, "Handling get_task request");

    let mut persistence = app_state.persistence.lock().await;
    let task: TaskResponse = charity_tasks_api::get_task(&mut persistence, &caller, task_id)?;
    drop(persistence);

    Ok(Json(task))
}

/// Handler for GET `/tasks/{id}/request` endpoint.
async fn handle_request_task(
    AxumState(app_state): AxumState<AppState>,
    Identity(caller): Identity,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<DetailResponse>, HttpError> {
    let task_id: i64 = parse_task_id(path)?;
    info!(user_id = ?caller.user_id(), task_id, "Handling request_task request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DetailResponse = charity_tasks_api::request_task(
        &mut persistence,
        &caller,
        task_id,
        new_cause(&format!("GET /tasks/{task_id}/request")),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/tasks/{id}/response` endpoint.
///
/// A caller without a charity gets 403 whatever body it sent.
async fn handle_respond_to_task(
    AxumState(app_state): AxumState<AppState>,
    Identity(caller): Identity,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<RespondToTaskRequest>, JsonRejection>,
) -> Result<Json<DetailResponse>, HttpError> {
    let task_id: i64 = parse_task_id(path)?;
    info!(user_id = ?caller.user_id(), task_id, "Handling respond_to_task request");

    authorize_route(&caller, TaskAction::RespondToTask)?;
    // An unreadable body carries no decision; the handler reports that.
    let request: RespondToTaskRequest = payload.map(|Json(body)| body).unwrap_or_default();

    let mut persistence = app_state.persistence.lock().await;
    let response: DetailResponse = charity_tasks_api::respond_to_task(
        &mut persistence,
        &caller,
        task_id,
        &request,
        new_cause(&format!("POST /tasks/{task_id}/response")),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/tasks/{id}/done` endpoint.
async fn handle_complete_task(
    AxumState(app_state): AxumState<AppState>,
    Identity(caller): Identity,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<DetailResponse>, HttpError> {
    let task_id: i64 = parse_task_id(path)?;
    info!(user_id = ?caller.user_id(), task_id, "Handling complete_task request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DetailResponse = charity_tasks_api::complete_task(
        &mut persistence,
        &caller,
        task_id,
        new_cause(&format!("POST /tasks/{task_id}/done")),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/tasks/{id}/events` endpoint.
async fn handle_list_task_events(
    AxumState(app_state): AxumState<AppState>,
    Identity(caller): Identity,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<TaskEventsResponse>, HttpError> {
    let task_id: i64 = parse_task_id(path)?;
    info!(user_id = ?caller.user_id(), task_id, "Handling list_task_events request");

    let mut persistence = app_state.persistence.lock().await;
    let response: TaskEventsResponse =
        charity_tasks_api::list_task_events(&mut persistence, &caller, task_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/charities", post(handle_register_charity))
        .route("/benefactors", post(handle_register_benefactor))
        .route("/tasks", get(handle_list_tasks).post(handle_create_task))
        .route("/tasks/{task_id}", get(handle_get_task))
        .route("/tasks/{task_id}/request", get(handle_request_task))
        .route("/tasks/{task_id}/response", post(handle_respond_to_task))
        .route("/tasks/{task_id}/done", post(handle_complete_task))
        .route("/tasks/{task_id}/events", get(handle_list_task_events))
        .with_state(app_state)
}

/// Opens the configured database, or an in-memory one.
fn open_persistence(database: Option<&str>) -> Result<Persistence, PersistenceError> {
    database.map_or_else(
        || {
            info!("Using in-memory database");
            Persistence::new_in_memory()
        },
        |db_path| {
            info!("Using file-based database at: {db_path}");
            Persistence::new_with_file(db_path)
        },
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Charity Tasks Server");

    let persistence: Persistence = open_persistence(args.database.as_deref())?;
    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    let app: Router = build_router(app_state);

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
