// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::i18n::I18nStore,
    db::{MemoryStore, Store},
    services::{
        auth::AuthService, budget_service::BudgetService, class_service::ClassService,
        directory_service::DirectoryService, document_service::DocumentService,
        hebrew_calendar::HebrewCalendar, holiday_service::HolidayService,
        payment_service::PaymentService, public_service::PublicService,
    },
};

/// Onde os dados ficam guardados.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres { database_url: String, max_connections: u32 },
    // Só para desenvolvimento local: some ao reiniciar
    Memory,
}

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Settings {
    pub storage: StorageBackend,
    pub jwt_secret: String,
    pub jwt_audience: String,
    pub bind_addr: String,
    pub public_base_url: String,
    pub cors_allowed_origin: Option<String>,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let storage = match var_or("STORAGE_BACKEND", "postgres").as_str() {
            "memory" => StorageBackend::Memory,
            "postgres" => StorageBackend::Postgres {
                database_url: env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?,
                max_connections: var_or("DATABASE_MAX_CONNECTIONS", "5")
                    .parse()
                    .context("DATABASE_MAX_CONNECTIONS deve ser um número")?,
            },
            other => anyhow::bail!("STORAGE_BACKEND desconhecido: '{}'", other),
        };

        let bind_addr = var_or("BIND_ADDR", "0.0.0.0:3000");

        Ok(Self {
            storage,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?,
            jwt_audience: var_or("JWT_AUDIENCE", "authenticated"),
            public_base_url: var_or("PUBLIC_BASE_URL", "http://localhost:3000"),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN").ok().filter(|v| !v.trim().is_empty()),
            bind_addr,
        })
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    // Só existe no backend Postgres (migrações)
    pub db_pool: Option<PgPool>,
    pub i18n_store: Arc<I18nStore>,
    pub cors_allowed_origin: Option<String>,

    pub auth_service: AuthService,
    pub class_service: ClassService,
    pub directory_service: DirectoryService,
    pub budget_service: BudgetService,
    pub payment_service: PaymentService,
    pub public_service: PublicService,
    pub holiday_service: HolidayService,
    pub document_service: DocumentService,
}

impl AppState {
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        let (store, db_pool) = match &settings.storage {
            StorageBackend::Postgres { database_url, max_connections } => {
                // Conecta ao banco de dados, usando '?' para propagar erros
                let db_pool = PgPoolOptions::new()
                    .max_connections(*max_connections)
                    .acquire_timeout(Duration::from_secs(3))
                    .connect(database_url)
                    .await
                    .context("Falha ao conectar ao banco de dados")?;

                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
                (Store::postgres(db_pool.clone()), Some(db_pool))
            }
            StorageBackend::Memory => {
                tracing::warn!("⚠️ Usando armazenamento em memória: os dados somem ao reiniciar");
                (Store::memory(Arc::new(MemoryStore::new())), None)
            }
        };

        let mut state = Self::from_store(store, settings)?;
        state.db_pool = db_pool;
        Ok(state)
    }

    /// Monta o gráfico de dependências sobre um `Store` já pronto.
    pub fn from_store(store: Store, settings: &Settings) -> anyhow::Result<Self> {
        let i18n_store = Arc::new(I18nStore::load()?);

        let holiday_service = HolidayService::new(Arc::new(HebrewCalendar::new()));
        let directory_service = DirectoryService::new(store.clone());
        let public_service =
            PublicService::new(store.clone(), directory_service.clone(), holiday_service.clone());

        Ok(Self {
            auth_service: AuthService::new(settings.jwt_secret.clone(), settings.jwt_audience.clone()),
            class_service: ClassService::new(store.clone()),
            budget_service: BudgetService::new(store.clone()),
            payment_service: PaymentService::new(store.clone()),
            document_service: DocumentService::new(settings.public_base_url.clone()),
            directory_service,
            public_service,
            holiday_service,
            i18n_store,
            cors_allowed_origin: settings.cors_allowed_origin.clone(),
            db_pool: None,
            store,
        })
    }
}
