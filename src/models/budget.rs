// src/models/budget.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// Resumo do orçamento (os cards do topo do painel).
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub total: Decimal,
    pub allocated: Decimal, // soma de allocated_budget dos eventos
    pub spent: Decimal,     // gasto real
    pub remaining: Decimal, // total - allocated (pode ficar negativo)
    pub over_allocated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventAllocation {
    pub for_kids: Decimal,
    pub for_staff: Decimal,
    pub total: Decimal,
}
