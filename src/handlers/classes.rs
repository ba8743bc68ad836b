// src/handlers/classes.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser, class_scope::ClassContext, i18n::Locale, rbac::RequireAdmin,
    },
    models::class::{
        AddMemberRequest, Class, ClassMember, CreateClassRequest, CreateClassResponse,
        DirectorySettings, UpdateBudgetRequest, UpdateClassRequest, UpdateDirectorySettingsRequest,
    },
};

// =============================================================================
//  1. ABERTURA DA TURMA (WIZARD)
// =============================================================================

// POST /api/classes
#[utoipa::path(
    post,
    path = "/api/classes",
    tag = "Classes",
    request_body = CreateClassRequest,
    responses(
        (status = 201, description = "Turma criada com crianças, equipe e eventos", body = CreateClassResponse),
        (status = 400, description = "Campos inválidos; nada foi gravado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_class(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<CreateClassRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let created = app_state
        .class_service
        .create_class(user.0.id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(created)))
}

// =============================================================================
//  2. DADOS DA TURMA
// =============================================================================

// GET /api/class
#[utoipa::path(
    get,
    path = "/api/class",
    tag = "Classes",
    responses((status = 200, description = "Turma atual", body = Class)),
    params(("x-class-id" = Uuid, Header, description = "ID da Turma")),
    security(("api_jwt" = []))
)]
pub async fn get_class(
    State(app_state): State<AppState>,
    locale: Locale,
    class: ClassContext,
) -> Result<impl IntoResponse, ApiError> {
    let class = app_state
        .class_service
        .get_class(class.class_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(class)))
}

// PUT /api/class
#[utoipa::path(
    put,
    path = "/api/class",
    tag = "Classes",
    request_body = UpdateClassRequest,
    responses((status = 200, description = "Turma atualizada", body = Class)),
    params(("x-class-id" = Uuid, Header, description = "ID da Turma")),
    security(("api_jwt" = []))
)]
pub async fn update_class(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireAdmin(class): RequireAdmin,
    Json(payload): Json<UpdateClassRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let updated = app_state
        .class_service
        .update_class_details(class.class_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(updated)))
}

// PUT /api/class/budget
#[utoipa::path(
    put,
    path = "/api/class/budget",
    tag = "Budget",
    request_body = UpdateBudgetRequest,
    responses(
        (status = 200, description = "Plano de orçamento atualizado", body = Class),
        (status = 409, description = "Novo total abaixo do já alocado")
    ),
    params(("x-class-id" = Uuid, Header, description = "ID da Turma")),
    security(("api_jwt" = []))
)]
pub async fn update_budget(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireAdmin(class): RequireAdmin,
    Json(payload): Json<UpdateBudgetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let updated = app_state
        .class_service
        .update_budget_settings(class.class_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(updated)))
}

// POST /api/class/invite-code
#[utoipa::path(
    post,
    path = "/api/class/invite-code",
    tag = "Classes",
    responses((status = 200, description = "Novo código de convite; o antigo deixa de valer", body = Class)),
    params(("x-class-id" = Uuid, Header, description = "ID da Turma")),
    security(("api_jwt" = []))
)]
pub async fn regenerate_invite_code(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireAdmin(class): RequireAdmin,
) -> Result<impl IntoResponse, ApiError> {
    let updated = app_state
        .class_service
        .regenerate_invite_code(class.class_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(updated)))
}

// =============================================================================
//  3. MEMBROS
// =============================================================================

// GET /api/class/members
#[utoipa::path(
    get,
    path = "/api/class/members",
    tag = "Classes",
    responses((status = 200, description = "Membros do comitê", body = Vec<ClassMember>)),
    params(("x-class-id" = Uuid, Header, description = "ID da Turma")),
    security(("api_jwt" = []))
)]
pub async fn list_members(
    State(app_state): State<AppState>,
    locale: Locale,
    class: ClassContext,
) -> Result<impl IntoResponse, ApiError> {
    let members = app_state
        .class_service
        .list_members(class.class_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(members)))
}

// POST /api/class/members
#[utoipa::path(
    post,
    path = "/api/class/members",
    tag = "Classes",
    request_body = AddMemberRequest,
    responses(
        (status = 201, description = "Membro adicionado", body = ClassMember),
        (status = 409, description = "Usuário já é membro")
    ),
    params(("x-class-id" = Uuid, Header, description = "ID da Turma")),
    security(("api_jwt" = []))
)]
pub async fn add_member(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireAdmin(class): RequireAdmin,
    Json(payload): Json<AddMemberRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let member = app_state
        .class_service
        .add_member(class.class_id, payload.user_id, payload.role)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(member)))
}

// =============================================================================
//  4. VISÃO PÚBLICA (CONFIGURAÇÃO)
// =============================================================================

// GET /api/class/directory-settings
#[utoipa::path(
    get,
    path = "/api/class/directory-settings",
    tag = "Classes",
    responses((status = 200, description = "O que a visão pública mostra", body = DirectorySettings)),
    params(("x-class-id" = Uuid, Header, description = "ID da Turma")),
    security(("api_jwt" = []))
)]
pub async fn get_directory_settings(
    State(app_state): State<AppState>,
    locale: Locale,
    class: ClassContext,
) -> Result<impl IntoResponse, ApiError> {
    let settings = app_state
        .class_service
        .get_directory_settings(class.class_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(settings)))
}

// PUT /api/class/directory-settings
#[utoipa::path(
    put,
    path = "/api/class/directory-settings",
    tag = "Classes",
    request_body = UpdateDirectorySettingsRequest,
    responses((status = 200, description = "Configurações salvas", body = DirectorySettings)),
    params(("x-class-id" = Uuid, Header, description = "ID da Turma")),
    security(("api_jwt" = []))
)]
pub async fn update_directory_settings(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireAdmin(class): RequireAdmin,
    Json(payload): Json<UpdateDirectorySettingsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let settings = app_state
        .class_service
        .update_directory_settings(class.class_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(settings)))
}
