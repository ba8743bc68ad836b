// src/models/directory.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "parent_relationship", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Parent1,
    Parent2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "staff_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Teacher,   // גננת / מחנכת
    Assistant, // סייעת
}

// --- CRIANÇA ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub id: Uuid,
    pub class_id: Uuid,
    #[schema(example = "נועה כהן")]
    pub name: String,
    pub address: Option<String>,
    #[schema(value_type = Option<String>, format = Date, example = "2020-03-15")]
    pub birthday: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewChild {
    pub name: String,
    pub address: Option<String>,
    pub birthday: Option<NaiveDate>,
}

// `None` = não mexe. Para limpar um campo use `Some(None)`.
#[derive(Debug, Clone, Default)]
pub struct ChildPatch {
    pub name: Option<String>,
    pub address: Option<Option<String>>,
    pub birthday: Option<Option<NaiveDate>>,
}

// --- RESPONSÁVEL ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Parent {
    pub id: Uuid,
    pub class_id: Uuid,
    pub name: String,
    #[schema(example = "050-1234567")]
    pub phone: Option<String>,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewParent {
    pub name: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChildParentLink {
    pub child_id: Uuid,
    pub parent_id: Uuid,
    pub relationship: Relationship,
    pub created_at: DateTime<Utc>,
}

/// Responsável já resolvido junto com o vínculo (listagem do diretório).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkedParent {
    pub child_id: Uuid,
    pub parent_id: Uuid,
    pub relationship: Relationship,
    pub name: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChildWithParents {
    #[serde(flatten)]
    pub child: Child,
    pub parents: Vec<LinkedParent>,
}

// --- EQUIPE ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: Uuid,
    pub class_id: Uuid,
    pub name: String,
    pub role: StaffRole,
    #[schema(value_type = Option<String>, format = Date)]
    pub birthday: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewStaff {
    pub name: String,
    pub role: StaffRole,
    pub birthday: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct StaffPatch {
    pub name: Option<String>,
    pub role: Option<StaffRole>,
    pub birthday: Option<Option<NaiveDate>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Directory {
    pub children: Vec<ChildWithParents>,
    pub staff: Vec<Staff>,
}

// --- PAYLOADS ---

/// Criança com até dois responsáveis, como digitada no wizard,
/// no formulário público ou no diretório. Datas ainda em texto.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChildInput {
    #[validate(length(min = 1, max = 120, message = "required"))]
    pub name: String,
    pub address: Option<String>,
    /// `DD/MM/YYYY`, `DD/MM` ou `YYYY-MM-DD`
    #[schema(example = "15/03/2020")]
    pub birthday: Option<String>,
    #[validate(length(max = 120))]
    pub parent1_name: Option<String>,
    pub parent1_phone: Option<String>,
    #[validate(length(max = 120))]
    pub parent2_name: Option<String>,
    pub parent2_phone: Option<String>,
}

/// Alteração parcial. Campo ausente = não mexe; texto vazio limpa
/// endereço/aniversário/telefone.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChildRequest {
    #[validate(length(min = 1, max = 120, message = "required"))]
    pub name: Option<String>,
    pub address: Option<String>,
    pub birthday: Option<String>,
    #[validate(length(max = 120))]
    pub parent1_name: Option<String>,
    pub parent1_phone: Option<String>,
    #[validate(length(max = 120))]
    pub parent2_name: Option<String>,
    pub parent2_phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffInput {
    // Em branco no wizard = linha ignorada
    #[serde(default)]
    #[validate(length(max = 120))]
    pub name: String,
    pub role: StaffRole,
    #[schema(example = "03/11")]
    pub birthday: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStaffRequest {
    #[validate(length(min = 1, max = 120, message = "required"))]
    pub name: Option<String>,
    pub role: Option<StaffRole>,
    pub birthday: Option<String>,
}
