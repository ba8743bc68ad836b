// src/models/event.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::validate_amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "event_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Holiday,
    Birthday,
    Trip,
    Gift,
    Party,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub class_id: Uuid,

    #[schema(example = "פורים")]
    pub name: String,

    // Id do catálogo (ex: "purim"); tipos livres ficam com ícone 📅
    #[schema(example = "purim")]
    pub event_type: String,

    pub category: EventCategory,

    #[schema(example = "🎭")]
    pub icon: String,

    #[schema(value_type = Option<String>, format = Date, example = "2026-03-03")]
    pub event_date: Option<NaiveDate>,

    // Valores unitários
    pub amount_per_kid: Decimal,
    pub amount_per_staff: Decimal,

    // Valores calculados
    pub allocated_for_kids: Decimal,
    pub allocated_for_staff: Decimal,
    pub allocated_budget: Decimal,

    pub spent_amount: Decimal,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub event_type: String,
    pub category: EventCategory,
    pub icon: String,
    pub event_date: Option<NaiveDate>,
    pub amount_per_kid: Decimal,
    pub amount_per_staff: Decimal,
    pub allocated_for_kids: Decimal,
    pub allocated_for_staff: Decimal,
    pub allocated_budget: Decimal,
}

// O serviço já entrega os valores recalculados
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub name: Option<String>,
    pub event_date: Option<Option<NaiveDate>>,
    pub amount_per_kid: Option<Decimal>,
    pub amount_per_staff: Option<Decimal>,
    pub allocated_for_kids: Option<Decimal>,
    pub allocated_for_staff: Option<Decimal>,
    pub allocated_budget: Option<Decimal>,
    pub spent_amount: Option<Decimal>,
}

/// Item do catálogo fixo de eventos oferecido no wizard.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[schema(value_type = String)]
    pub id: &'static str,
    #[schema(value_type = String)]
    pub name: &'static str,
    #[schema(value_type = String)]
    pub icon: &'static str,
    pub category: EventCategory,
    // Mês/dia estimado dentro do ano letivo
    pub estimated_month: Option<u32>,
    pub estimated_day: Option<u32>,
}

// --- PAYLOADS ---

/// Evento escolhido (wizard ou painel) com os valores por criança/funcionário.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventSelection {
    #[validate(length(min = 1, max = 60, message = "required"))]
    #[schema(example = "purim")]
    pub event_type: String,

    // Obrigatório para tipos fora do catálogo
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,

    #[schema(value_type = Option<String>, format = Date)]
    pub event_date: Option<NaiveDate>,

    #[serde(default)]
    #[validate(custom(function = "validate_amount"))]
    pub amount_per_kid: Decimal,

    #[serde(default)]
    #[validate(custom(function = "validate_amount"))]
    pub amount_per_staff: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 120, message = "required"))]
    pub name: Option<String>,

    #[schema(value_type = Option<String>, format = Date)]
    pub event_date: Option<NaiveDate>,

    // Remove a data (evento "sem data")
    #[serde(default)]
    pub clear_date: bool,

    #[validate(custom(function = "validate_amount"))]
    pub amount_per_kid: Option<Decimal>,

    #[validate(custom(function = "validate_amount"))]
    pub amount_per_staff: Option<Decimal>,

    #[validate(custom(function = "validate_amount"))]
    pub spent_amount: Option<Decimal>,
}
