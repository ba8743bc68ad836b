// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::{auth::CurrentUser, class::MyClass},
};

// GET /api/me
#[utoipa::path(
    get,
    path = "/api/me",
    tag = "Users",
    responses(
        (status = 200, description = "Usuário do token", body = CurrentUser),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<CurrentUser> {
    Json(user)
}

// GET /api/me/classes
#[utoipa::path(
    get,
    path = "/api/me/classes",
    tag = "Users",
    responses(
        (status = 200, description = "Turmas das quais o usuário é membro", body = Vec<MyClass>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_my_classes(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let classes = app_state
        .class_service
        .list_my_classes(user.0.id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(classes)))
}
