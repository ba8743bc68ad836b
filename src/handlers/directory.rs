// src/handlers/directory.rs

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
    models::directory::{
        ChildInput, ChildWithParents, Directory, Staff, StaffInput, UpdateChildRequest,
        UpdateStaffRequest,
    },
};

// GET /api/class/directory
#[utoipa::path(
    get,
    path = "/api/class/directory",
    tag = "Directory",
    responses((status = 200, description = "Crianças com responsáveis e equipe", body = Directory)),
    params(("x-class-id" = Uuid, Header, description = "ID da Turma")),
    security(("api_jwt" = []))
)]
pub async fn get_directory(
    State(app_state): State<AppState>,
    locale: Locale,
    class: ClassContext,
) -> Result<impl IntoResponse, ApiError> {
    let directory = app_state
        .directory_service
        .list_directory(class.class_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(directory)))
}

// =============================================================================
//  1. CRIANÇAS
// =============================================================================

// POST /api/class/children
#[utoipa::path(
    post,
    path = "/api/class/children",
    tag = "Directory",
    request_body = ChildInput,
    responses(
        (status = 201, description = "Criança cadastrada com seus responsáveis", body = ChildWithParents),
        (status = 400, description = "Telefone ou aniversário inválido")
    ),
    params(("x-class-id" = Uuid, Header, description = "ID da Turma")),
    security(("api_jwt" = []))
)]
pub async fn add_child(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireAdmin(class): RequireAdmin,
    Json(payload): Json<ChildInput>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let child = app_state
        .directory_service
        .add_child(class.class_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(child)))
}

// PUT /api/class/children/{child_id}
#[utoipa::path(
    put,
    path = "/api/class/children/{child_id}",
    tag = "Directory",
    request_body = UpdateChildRequest,
    responses((status = 200, description = "Criança atualizada", body = ChildWithParents)),
    params(
        ("child_id" = Uuid, Path, description = "ID da Criança"),
        ("x-class-id" = Uuid, Header, description = "ID da Turma")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_child(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireAdmin(class): RequireAdmin,
    Path(child_id): Path<Uuid>,
    Json(payload): Json<UpdateChildRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let child = app_state
        .directory_service
        .update_child(class.class_id, child_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(child)))
}

// DELETE /api/class/children/{child_id}
#[utoipa::path(
    delete,
    path = "/api/class/children/{child_id}",
    tag = "Directory",
    responses((status = 204, description = "Criança removida (e responsáveis sem outros filhos)")),
    params(
        ("child_id" = Uuid, Path, description = "ID da Criança"),
        ("x-class-id" = Uuid, Header, description = "ID da Turma")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_child(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireAdmin(class): RequireAdmin,
    Path(child_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .directory_service
        .delete_child(class.class_id, child_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  2. EQUIPE
// =============================================================================

// POST /api/class/staff
#[utoipa::path(
    post,
    path = "/api/class/staff",
    tag = "Directory",
    request_body = StaffInput,
    responses((status = 201, description = "Funcionário cadastrado", body = Staff)),
    params(("x-class-id" = Uuid, Header, description = "ID da Turma")),
    security(("api_jwt" = []))
)]
pub async fn add_staff(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireAdmin(class): RequireAdmin,
    Json(payload): Json<StaffInput>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let staff = app_state
        .directory_service
        .add_staff(class.class_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(staff)))
}

// PUT /api/class/staff/{staff_id}
#[utoipa::path(
    put,
    path = "/api/class/staff/{staff_id}",
    tag = "Directory",
    request_body = UpdateStaffRequest,
    responses((status = 200, description = "Funcionário atualizado", body = Staff)),
    params(
        ("staff_id" = Uuid, Path, description = "ID do Funcionário"),
        ("x-class-id" = Uuid, Header, description = "ID da Turma")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_staff(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireAdmin(class): RequireAdmin,
    Path(staff_id): Path<Uuid>,
    Json(payload): Json<UpdateStaffRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let staff = app_state
        .directory_service
        .update_staff(class.class_id, staff_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(staff)))
}

// DELETE /api/class/staff/{staff_id}
#[utoipa::path(
    delete,
    path = "/api/class/staff/{staff_id}",
    tag = "Directory",
    responses((status = 204, description = "Funcionário removido")),
    params(
        ("staff_id" = Uuid, Path, description = "ID do Funcionário"),
        ("x-class-id" = Uuid, Header, description = "ID da Turma")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_staff(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireAdmin(class): RequireAdmin,
    Path(staff_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .directory_service
        .delete_staff(class.class_id, staff_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
