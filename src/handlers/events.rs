// src/handlers/events.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{class_scope::ClassContext, i18n::Locale, rbac::RequireAdmin},
    models::{
        budget::BudgetSummary,
        event::{Event, EventSelection, UpdateEventRequest},
    },
};

// GET /api/class/events
#[utoipa::path(
    get,
    path = "/api/class/events",
    tag = "Budget",
    responses((status = 200, description = "Eventos com alocação (datados primeiro)", body = Vec<Event>)),
    params(("x-class-id" = Uuid, Header, description = "ID da Turma")),
    security(("api_jwt" = []))
)]
pub async fn list_events(
    State(app_state): State<AppState>,
    locale: Locale,
    class: ClassContext,
) -> Result<impl IntoResponse, ApiError> {
    let events = app_state
        .budget_service
        .list_events(class.class_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(events)))
}

// POST /api/class/events
#[utoipa::path(
    post,
    path = "/api/class/events",
    tag = "Budget",
    request_body = EventSelection,
    responses(
        (status = 201, description = "Evento criado", body = Event),
        (status = 409, description = "A alocação passaria do orçamento total")
    ),
    params(("x-class-id" = Uuid, Header, description = "ID da Turma")),
    security(("api_jwt" = []))
)]
pub async fn create_event(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireAdmin(class): RequireAdmin,
    Json(payload): Json<EventSelection>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let event = app_state
        .budget_service
        .create_event(class.class_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(event)))
}

// PUT /api/class/events/{event_id}
#[utoipa::path(
    put,
    path = "/api/class/events/{event_id}",
    tag = "Budget",
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Evento atualizado", body = Event),
        (status = 409, description = "A alocação passaria do orçamento total")
    ),
    params(
        ("event_id" = Uuid, Path, description = "ID do Evento"),
        ("x-class-id" = Uuid, Header, description = "ID da Turma")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_event(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireAdmin(class): RequireAdmin,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let event = app_state
        .budget_service
        .update_event(class.class_id, event_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(event)))
}

// DELETE /api/class/events/{event_id}
#[utoipa::path(
    delete,
    path = "/api/class/events/{event_id}",
    tag = "Budget",
    responses((status = 204, description = "Evento removido")),
    params(
        ("event_id" = Uuid, Path, description = "ID do Evento"),
        ("x-class-id" = Uuid, Header, description = "ID da Turma")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_event(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireAdmin(class): RequireAdmin,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .budget_service
        .delete_event(class.class_id, event_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/class/budget/summary
#[utoipa::path(
    get,
    path = "/api/class/budget/summary",
    tag = "Budget",
    responses((status = 200, description = "Total, alocado, gasto e saldo", body = BudgetSummary)),
    params(("x-class-id" = Uuid, Header, description = "ID da Turma")),
    security(("api_jwt" = []))
)]
pub async fn get_budget_summary(
    State(app_state): State<AppState>,
    locale: Locale,
    class: ClassContext,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state
        .budget_service
        .summary(class.class_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(summary)))
}
