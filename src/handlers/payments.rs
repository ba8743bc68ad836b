// src/handlers/payments.rs

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
    models::payment::{CreatePaymentRequest, Payment, PaymentSummary, UpdatePaymentStatusRequest},
};

// GET /api/class/payments
#[utoipa::path(
    get,
    path = "/api/class/payments",
    tag = "Payments",
    responses((status = 200, description = "Pagamentos (mais recentes primeiro)", body = Vec<Payment>)),
    params(("x-class-id" = Uuid, Header, description = "ID da Turma")),
    security(("api_jwt" = []))
)]
pub async fn list_payments(
    State(app_state): State<AppState>,
    locale: Locale,
    class: ClassContext,
) -> Result<impl IntoResponse, ApiError> {
    let payments = app_state
        .payment_service
        .list_payments(class.class_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(payments)))
}

// POST /api/class/payments
#[utoipa::path(
    post,
    path = "/api/class/payments",
    tag = "Payments",
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Pagamento registrado", body = Payment),
        (status = 404, description = "Responsável não pertence à turma")
    ),
    params(("x-class-id" = Uuid, Header, description = "ID da Turma")),
    security(("api_jwt" = []))
)]
pub async fn record_payment(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireAdmin(class): RequireAdmin,
    Json(payload): Json<CreatePaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let payment = app_state
        .payment_service
        .record_payment(class.class_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(payment)))
}

// PUT /api/class/payments/{payment_id}/status
#[utoipa::path(
    put,
    path = "/api/class/payments/{payment_id}/status",
    tag = "Payments",
    request_body = UpdatePaymentStatusRequest,
    responses((status = 200, description = "Status alterado", body = Payment)),
    params(
        ("payment_id" = Uuid, Path, description = "ID do Pagamento"),
        ("x-class-id" = Uuid, Header, description = "ID da Turma")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_payment_status(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireAdmin(class): RequireAdmin,
    Path(payment_id): Path<Uuid>,
    Json(payload): Json<UpdatePaymentStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let payment = app_state
        .payment_service
        .update_payment_status(class.class_id, payment_id, payload.status)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(payment)))
}

// GET /api/class/payments/summary
#[utoipa::path(
    get,
    path = "/api/class/payments/summary",
    tag = "Payments",
    responses((status = 200, description = "Arrecadado x esperado", body = PaymentSummary)),
    params(("x-class-id" = Uuid, Header, description = "ID da Turma")),
    security(("api_jwt" = []))
)]
pub async fn get_payment_summary(
    State(app_state): State<AppState>,
    locale: Locale,
    class: ClassContext,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state
        .payment_service
        .payment_summary(class.class_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(summary)))
}
