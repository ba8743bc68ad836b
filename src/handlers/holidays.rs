// src/handlers/holidays.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Datelike;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::{calendar::Holiday, event::CatalogEntry},
    services::{directory_service::today, event_catalog},
};

/// Mês do calendário. Sem parâmetros = mês atual.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MonthQuery {
    #[param(example = 2026)]
    pub year: Option<i32>,
    #[param(example = 3, minimum = 1, maximum = 12)]
    pub month: Option<u32>,
}

impl MonthQuery {
    pub fn resolve(&self) -> (i32, u32) {
        let now = today();
        (self.year.unwrap_or(now.year()), self.month.unwrap_or(now.month()))
    }
}

// GET /api/holidays?year=2026&month=3
#[utoipa::path(
    get,
    path = "/api/holidays",
    tag = "Calendar",
    params(MonthQuery),
    responses(
        (status = 200, description = "Feriados judaicos do mês", body = Vec<Holiday>),
        (status = 400, description = "Mês fora de 1..12")
    )
)]
pub async fn get_holidays(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<MonthQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (year, month) = query.resolve();

    let holidays = app_state
        .holiday_service
        .get_holidays_for_month(year, month)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(holidays)))
}

// GET /api/event-catalog
#[utoipa::path(
    get,
    path = "/api/event-catalog",
    tag = "Calendar",
    responses((status = 200, description = "Eventos que o wizard oferece", body = Vec<CatalogEntry>))
)]
pub async fn get_event_catalog() -> Json<&'static [CatalogEntry]> {
    Json(event_catalog::catalog())
}
