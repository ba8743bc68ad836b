// src/routes.rs

use anyhow::Context;
use axum::{
    http::HeaderValue,
    middleware as axum_middleware,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    config::AppState,
    docs::ApiDoc,
    handlers,
    middleware::{auth::auth_guard, class_scope::class_guard},
};

fn cors_layer(allowed_origin: Option<&str>) -> anyhow::Result<CorsLayer> {
    let layer = match allowed_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("CORS_ALLOWED_ORIGIN inválido: '{}'", origin))?,
            )
            .allow_methods(Any)
            .allow_headers(Any),
        // Sem origem configurada: qualquer uma (desenvolvimento)
        None => CorsLayer::permissive(),
    };
    Ok(layer)
}

pub fn build_router(app_state: AppState) -> anyhow::Result<Router> {
    // Rotas do usuário (só token)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route("/me/classes", get(handlers::auth::get_my_classes))
        .route("/classes", post(handlers::classes::create_class))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Rotas da turma (token + x-class-id + filiação)
    let class_routes = Router::new()
        .route(
            "/",
            get(handlers::classes::get_class).put(handlers::classes::update_class),
        )
        .route("/budget", put(handlers::classes::update_budget))
        .route("/budget/summary", get(handlers::events::get_budget_summary))
        .route("/invite-code", post(handlers::classes::regenerate_invite_code))
        .route("/invite-qr", get(handlers::documents::get_invite_qr))
        .route(
            "/members",
            get(handlers::classes::list_members).post(handlers::classes::add_member),
        )
        .route(
            "/directory-settings",
            get(handlers::classes::get_directory_settings)
                .put(handlers::classes::update_directory_settings),
        )
        // Diretório
        .route("/directory", get(handlers::directory::get_directory))
        .route("/children", post(handlers::directory::add_child))
        .route(
            "/children/{child_id}",
            put(handlers::directory::update_child).delete(handlers::directory::delete_child),
        )
        .route("/staff", post(handlers::directory::add_staff))
        .route(
            "/staff/{staff_id}",
            put(handlers::directory::update_staff).delete(handlers::directory::delete_staff),
        )
        // Eventos e orçamento
        .route(
            "/events",
            get(handlers::events::list_events).post(handlers::events::create_event),
        )
        .route(
            "/events/{event_id}",
            put(handlers::events::update_event).delete(handlers::events::delete_event),
        )
        // Pagamentos
        .route(
            "/payments",
            get(handlers::payments::list_payments).post(handlers::payments::record_payment),
        )
        .route("/payments/summary", get(handlers::payments::get_payment_summary))
        .route(
            "/payments/{payment_id}/status",
            put(handlers::payments::update_payment_status),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            class_guard,
        ));

    // Rotas abertas, pelo código de convite
    let public_routes = Router::new()
        .route("/{code}", get(handlers::public::get_class_card))
        .route("/{code}/calendar", get(handlers::public::get_calendar))
        .route("/{code}/directory", get(handlers::public::get_directory))
        .route(
            "/{code}/parent-form",
            get(handlers::public::get_parent_form).post(handlers::public::submit_parent_form),
        );

    let cors = cors_layer(app_state.cors_allowed_origin.as_deref())?;

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/holidays", get(handlers::holidays::get_holidays))
        .route("/api/event-catalog", get(handlers::holidays::get_event_catalog))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route("/join/{code}", get(handlers::public::join))
        .nest("/api", user_routes)
        .nest("/api/class", class_routes)
        .nest("/api/public", public_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    Ok(app)
}
