// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{class_scope::ClassContext, i18n::Locale},
    models::class::MemberRole,
};

/// Guardião das rotas de administração da turma.
/// Precisa rodar depois do `class_guard`.
pub struct RequireAdmin(pub ClassContext);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let context = ClassContext::from_request_parts(parts, state).await?;

        if context.role != MemberRole::Admin {
            let app_state = AppState::from_ref(state);
            let Ok(locale) = Locale::from_request_parts(parts, state).await;
            return Err(AppError::AdminRequired.to_api_error(&locale, &app_state.i18n_store));
        }

        Ok(RequireAdmin(context))
    }
}
