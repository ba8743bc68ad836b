// src/models/payment.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::validate_positive_amount;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,   // Aguardando
    Completed, // Pago
    Failed,    // Falhou
    Refunded,  // Estornado
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,

    #[schema(ignore)]
    pub class_id: Uuid,

    pub parent_id: Uuid,

    #[schema(example = "250")]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2025-09-10")]
    pub payment_date: NaiveDate,

    pub status: PaymentStatus,

    #[schema(example = "bit")]
    pub method: Option<String>,
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub parent_id: Uuid,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    pub status: PaymentStatus,
    pub method: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: PaymentStatus,
    pub count: i64,
    pub amount: Decimal,
}

/// Agregado para o painel de cobranças.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    pub expected: Decimal,  // valor por criança x crianças (modo por criança)
    pub collected: Decimal, // somente Completed
    pub pending: Decimal,
    pub refunded: Decimal,
    pub outstanding: Decimal, // expected - collected, mínimo zero
    pub by_status: Vec<StatusCount>,
}

// --- PAYLOADS ---

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub parent_id: Uuid,

    #[validate(custom(function = "validate_positive_amount"))]
    pub amount: Decimal,

    // Padrão: hoje
    #[schema(value_type = Option<String>, format = Date)]
    pub payment_date: Option<NaiveDate>,

    // Padrão: Pending
    pub status: Option<PaymentStatus>,

    #[validate(length(max = 40))]
    pub method: Option<String>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentStatusRequest {
    pub status: PaymentStatus,
}
