// src/models/calendar.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::directory::StaffRole;
use crate::models::event::EventCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HolidayCategory {
    Major,
    Minor,
    Memorial,
    National,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    #[schema(example = "פורים")]
    pub name: String,
    #[schema(value_type = String, format = Date, example = "2026-03-03")]
    pub date: NaiveDate,
    #[schema(example = "🎭")]
    pub icon: String,
    pub is_school_off: bool,
    pub category: HolidayCategory,
}

// --- Projeções públicas (sem telefone nem endereço) ---

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicClass {
    pub name: String,
    pub school_name: Option<String>,
    pub city: Option<String>,
    pub school_year: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicEvent {
    pub name: String,
    pub event_type: String,
    pub category: EventCategory,
    pub icon: String,
    #[schema(value_type = Option<String>, format = Date)]
    pub date: Option<NaiveDate>,
    // Só aparece se a turma liberar
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocated_budget: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicBirthday {
    pub name: String,
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    pub is_staff: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicCalendar {
    pub class: PublicClass,
    pub events: Vec<PublicEvent>,
    pub birthdays: Vec<PublicBirthday>,
    pub holidays: Vec<Holiday>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicChild {
    pub name: String,
    #[schema(value_type = Option<String>, format = Date)]
    pub birthday: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicStaff {
    pub name: String,
    pub role: StaffRole,
    #[schema(value_type = Option<String>, format = Date)]
    pub birthday: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicDirectory {
    pub class: PublicClass,
    pub children: Vec<PublicChild>,
    pub staff: Vec<PublicStaff>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParentFormInfo {
    pub class: PublicClass,
    pub is_open: bool,
}

/// Resposta do formulário público: o nome salvo e se foi cadastro novo.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntakeReceipt {
    pub child_name: String,
    pub created: bool,
}
