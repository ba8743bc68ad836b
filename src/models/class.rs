// src/models/class.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::validate_amount;
use crate::models::{
    directory::{ChildInput, StaffInput},
    event::EventSelection,
};

// --- ENUMS ---

// Mapeia o CREATE TYPE budget_type do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "budget_type", rename_all = "snake_case")]
#[serde(rename_all = "kebab-case")]
pub enum BudgetType {
    PerChild, // valor por criança x número de crianças
    Total,    // valor fixo
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "member_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Admin,
    Member,
}

// ---
// 1. Class (A "Turma")
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: Uuid,

    #[schema(example = "גן חבצלת")]
    pub name: String,

    #[schema(example = "בית ספר הרצל")]
    pub school_name: Option<String>,

    #[schema(example = "תל אביב")]
    pub city: Option<String>,

    // Ano em que o ano letivo começa (2025 = 2025/26)
    #[schema(example = 2025)]
    pub school_year: i32,

    pub budget_type: BudgetType,

    #[schema(example = "100")]
    pub budget_amount: Decimal,

    pub estimated_children: i32,
    pub estimated_staff: i32,

    // Calculado no bootstrap e nas alterações de orçamento
    #[schema(example = "2500")]
    pub total_budget: Decimal,

    #[schema(example = "k3x9a0qz")]
    pub invite_code: String,

    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Dados para inserir a linha da turma.
#[derive(Debug, Clone)]
pub struct NewClass {
    pub name: String,
    pub school_name: Option<String>,
    pub city: Option<String>,
    pub school_year: i32,
    pub budget_type: BudgetType,
    pub budget_amount: Decimal,
    pub estimated_children: i32,
    pub estimated_staff: i32,
    pub total_budget: Decimal,
    pub invite_code: String,
    pub owner_id: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct ClassDetailsPatch {
    pub name: Option<String>,
    pub school_name: Option<String>,
    pub city: Option<String>,
    pub school_year: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct BudgetSettings {
    pub budget_type: BudgetType,
    pub budget_amount: Decimal,
    pub estimated_children: i32,
    pub estimated_staff: i32,
    pub total_budget: Decimal,
}

// ---
// 2. ClassMember (A "Ponte" Usuário-Turma)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassMember {
    pub class_id: Uuid,
    pub user_id: Uuid,
    pub role: MemberRole,
    pub created_at: DateTime<Utc>,
}

/// Turma vista por um membro (lista "minhas turmas").
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MyClass {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub class: Class,
    pub role: MemberRole,
}

// ---
// 3. Configurações da visão pública
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DirectorySettings {
    #[schema(ignore)]
    pub class_id: Uuid,
    pub show_children: bool,
    pub show_birthdays: bool,
    pub show_staff: bool,
    pub show_events: bool,
    pub show_event_budgets: bool,
    pub allow_parent_intake: bool,
    pub updated_at: DateTime<Utc>,
}

impl DirectorySettings {
    pub fn defaults(class_id: Uuid) -> Self {
        Self {
            class_id,
            show_children: true,
            show_birthdays: true,
            show_staff: true,
            show_events: true,
            show_event_budgets: false,
            allow_parent_intake: true,
            updated_at: Utc::now(),
        }
    }

    pub fn apply(mut self, patch: &UpdateDirectorySettingsRequest) -> Self {
        if let Some(v) = patch.show_children {
            self.show_children = v;
        }
        if let Some(v) = patch.show_birthdays {
            self.show_birthdays = v;
        }
        if let Some(v) = patch.show_staff {
            self.show_staff = v;
        }
        if let Some(v) = patch.show_events {
            self.show_events = v;
        }
        if let Some(v) = patch.show_event_budgets {
            self.show_event_budgets = v;
        }
        if let Some(v) = patch.allow_parent_intake {
            self.allow_parent_intake = v;
        }
        self.updated_at = Utc::now();
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDirectorySettingsRequest {
    pub show_children: Option<bool>,
    pub show_birthdays: Option<bool>,
    pub show_staff: Option<bool>,
    pub show_events: Option<bool>,
    pub show_event_budgets: Option<bool>,
    pub allow_parent_intake: Option<bool>,
}

// ---
// 4. Respostas do wizard de onboarding (auditoria)
// ---
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingResponse {
    pub id: Uuid,
    pub class_id: Uuid,
    pub user_id: Uuid,
    #[schema(value_type = Object)]
    pub responses: Value,
    pub created_at: DateTime<Utc>,
}

// ---
// 5. Payloads
// ---

/// Tudo que o wizard de abertura coleta, enviado de uma vez.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassRequest {
    #[validate(length(min = 1, max = 120, message = "required"))]
    pub name: String,
    pub school_name: Option<String>,
    pub city: Option<String>,

    #[validate(range(min = 2000, max = 2100))]
    pub school_year: i32,

    pub budget_type: BudgetType,

    #[validate(custom(function = "validate_amount"))]
    pub budget_amount: Decimal,

    #[serde(default)]
    #[validate(range(min = 0, max = 500))]
    pub estimated_children: i32,

    #[serde(default)]
    #[validate(range(min = 0, max = 50))]
    pub estimated_staff: i32,

    #[serde(default)]
    #[validate(nested)]
    pub children: Vec<ChildInput>,

    #[serde(default)]
    #[validate(nested)]
    pub staff: Vec<StaffInput>,

    #[serde(default)]
    #[validate(nested)]
    pub events: Vec<EventSelection>,
}

/// Resultado do bootstrap: a turma criada e os avisos (responsáveis pulados).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassResponse {
    pub class: Class,
    pub children_created: usize,
    pub parents_created: usize,
    pub staff_created: usize,
    pub events_created: usize,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassRequest {
    #[validate(length(min = 1, max = 120, message = "required"))]
    pub name: Option<String>,
    pub school_name: Option<String>,
    pub city: Option<String>,
    #[validate(range(min = 2000, max = 2100))]
    pub school_year: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBudgetRequest {
    pub budget_type: BudgetType,
    #[validate(custom(function = "validate_amount"))]
    pub budget_amount: Decimal,
    #[serde(default)]
    #[validate(range(min = 0, max = 500))]
    pub estimated_children: i32,
    #[serde(default)]
    #[validate(range(min = 0, max = 50))]
    pub estimated_staff: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    pub user_id: Uuid,
    #[serde(default = "default_member_role")]
    pub role: MemberRole,
}

fn default_member_role() -> MemberRole {
    MemberRole::Member
}
