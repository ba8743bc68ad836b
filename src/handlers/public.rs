// src/handlers/public.rs

// Rotas abertas (sem token): tudo é encontrado pelo código de convite.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        invite_code::normalize_invite_code,
    },
    config::AppState,
    handlers::holidays::MonthQuery,
    middleware::i18n::Locale,
    models::{
        calendar::{IntakeReceipt, ParentFormInfo, PublicCalendar, PublicClass, PublicDirectory},
        directory::ChildInput,
    },
};

// GET /api/public/{code}
#[utoipa::path(
    get,
    path = "/api/public/{code}",
    tag = "Public",
    params(("code" = String, Path, description = "Código de convite")),
    responses(
        (status = 200, description = "Cartão da turma", body = PublicClass),
        (status = 404, description = "Código desconhecido")
    )
)]
pub async fn get_class_card(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let card = app_state
        .public_service
        .class_card(&code)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(card)))
}

// GET /api/public/{code}/calendar?year=2026&month=3
#[utoipa::path(
    get,
    path = "/api/public/{code}/calendar",
    tag = "Public",
    params(("code" = String, Path, description = "Código de convite"), MonthQuery),
    responses((status = 200, description = "Eventos, aniversários e feriados do mês", body = PublicCalendar))
)]
pub async fn get_calendar(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(code): Path<String>,
    Query(query): Query<MonthQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let calendar = app_state
        .public_service
        .calendar(&code, query.year, query.month)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(calendar)))
}

// GET /api/public/{code}/directory
#[utoipa::path(
    get,
    path = "/api/public/{code}/directory",
    tag = "Public",
    params(("code" = String, Path, description = "Código de convite")),
    responses((status = 200, description = "Nomes e aniversários, sem contatos", body = PublicDirectory))
)]
pub async fn get_directory(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let directory = app_state
        .public_service
        .directory(&code)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(directory)))
}

// GET /api/public/{code}/parent-form
#[utoipa::path(
    get,
    path = "/api/public/{code}/parent-form",
    tag = "Public",
    params(("code" = String, Path, description = "Código de convite")),
    responses((status = 200, description = "Turma e se o formulário está aberto", body = ParentFormInfo))
)]
pub async fn get_parent_form(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let form = app_state
        .public_service
        .parent_form(&code)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(form)))
}

// POST /api/public/{code}/parent-form
#[utoipa::path(
    post,
    path = "/api/public/{code}/parent-form",
    tag = "Public",
    request_body = ChildInput,
    params(("code" = String, Path, description = "Código de convite")),
    responses(
        (status = 201, description = "Criança cadastrada", body = IntakeReceipt),
        (status = 200, description = "Criança com o mesmo nome atualizada", body = IntakeReceipt),
        (status = 403, description = "Formulário fechado pela turma")
    )
)]
pub async fn submit_parent_form(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(code): Path<String>,
    Json(payload): Json<ChildInput>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let receipt = app_state
        .public_service
        .submit_parent_form(&code, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let status = if receipt.created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(receipt)))
}

// GET /join/{code} -> link curto do QR code
pub async fn join(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(code): Path<String>,
) -> Result<Redirect, ApiError> {
    let code = normalize_invite_code(&code)
        .ok_or_else(|| AppError::InviteCodeNotFound.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Redirect::temporary(&format!("/parent-form/{}", code)))
}
