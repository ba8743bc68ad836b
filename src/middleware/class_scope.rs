// src/middleware/class_scope.rs

use axum::{
    body::Body,
    extract::{FromRef, FromRequestParts, State},
    http::{request::Parts, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::authenticate, i18n::Locale},
    models::class::MemberRole,
};

// O nome do nosso cabeçalho HTTP customizado
pub const CLASS_ID_HEADER: &str = "x-class-id";

/// Turma em que a requisição opera e o papel do usuário nela.
#[derive(Debug, Clone, Copy)]
pub struct ClassContext {
    pub class_id: Uuid,
    pub role: MemberRole,
}

fn class_id_from(headers: &HeaderMap) -> Result<Uuid, AppError> {
    let value = headers
        .get(CLASS_ID_HEADER)
        .ok_or(AppError::MissingClassHeader)?;
    let value = value.to_str().map_err(|_| AppError::InvalidClassHeader)?;
    Uuid::parse_str(value.trim()).map_err(|_| AppError::InvalidClassHeader)
}

// Autenticação + turma + filiação, nessa ordem
pub async fn class_guard(
    State(app_state): State<AppState>,
    locale: Locale,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let user = authenticate(&app_state, request.headers()).map_err(to_api)?;
    let class_id = class_id_from(request.headers()).map_err(to_api)?;

    let member = app_state
        .class_service
        .find_member(class_id, user.id)
        .await
        .map_err(to_api)?
        .ok_or_else(|| {
            tracing::warn!("⛔ Usuário {} tentou acessar a turma {}", user.id, class_id);
            to_api(AppError::NotClassMember)
        })?;

    request.extensions_mut().insert(ClassContext {
        class_id,
        role: member.role,
    });
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for ClassContext
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(context) = parts.extensions.get::<ClassContext>() {
            return Ok(*context);
        }

        let app_state = AppState::from_ref(state);
        let Ok(locale) = Locale::from_request_parts(parts, state).await;
        Err(AppError::MissingClassHeader.to_api_error(&locale, &app_state.i18n_store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_class_header() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        assert!(matches!(class_id_from(&headers), Err(AppError::MissingClassHeader)));

        headers.insert(CLASS_ID_HEADER, "not-a-uuid".parse().unwrap());
        assert!(matches!(class_id_from(&headers), Err(AppError::InvalidClassHeader)));

        headers.insert(CLASS_ID_HEADER, id.to_string().parse().unwrap());
        assert_eq!(class_id_from(&headers).unwrap(), id);
    }
}
