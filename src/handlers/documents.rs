// src/handlers/documents.rs

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{class_scope::ClassContext, i18n::Locale},
    services::document_service::QrFormat,
};

#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum QrFormatParam {
    #[default]
    Png,
    Svg,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InviteQrQuery {
    #[serde(default)]
    pub format: QrFormatParam,
}

// GET /api/class/invite-qr?format=png|svg
#[utoipa::path(
    get,
    path = "/api/class/invite-qr",
    tag = "Classes",
    params(InviteQrQuery, ("x-class-id" = Uuid, Header, description = "ID da Turma")),
    responses(
        (status = 200, description = "QR code do link de convite (PNG ou SVG)", content_type = "image/png")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_invite_qr(
    State(app_state): State<AppState>,
    locale: Locale,
    class: ClassContext,
    Query(query): Query<InviteQrQuery>,
) -> Result<Response, ApiError> {
    let class = app_state
        .class_service
        .get_class(class.class_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let format = match query.format {
        QrFormatParam::Png => QrFormat::Png,
        QrFormatParam::Svg => QrFormat::Svg,
    };

    let bytes = app_state
        .document_service
        .invite_qr(&class.invite_code, format)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    // O navegador mostra direto (ou salva para imprimir)
    let headers = [(header::CONTENT_TYPE, format.content_type())];

    Ok((headers, bytes).into_response())
}
