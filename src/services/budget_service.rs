// src/services/budget_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{contact::non_blank, error::AppError},
    db::Store,
    models::{
        budget::{BudgetSummary, EventAllocation},
        class::{BudgetType, Class},
        event::{Event, EventPatch, EventSelection, NewEvent, UpdateEventRequest},
    },
    services::event_catalog,
};

// =============================================================================
//  CALCULADORA (funções puras)
// =============================================================================

/// Orçamento total da turma. No modo por criança: valor x crianças.
pub fn total_budget(budget_type: BudgetType, amount: Decimal, child_count: i64) -> Decimal {
    match budget_type {
        BudgetType::PerChild => amount * Decimal::from(child_count.max(0)),
        BudgetType::Total => amount,
    }
}

pub fn event_allocation(
    amount_per_kid: Decimal,
    amount_per_staff: Decimal,
    children: i64,
    staff: i64,
) -> EventAllocation {
    let for_kids = amount_per_kid * Decimal::from(children.max(0));
    let for_staff = amount_per_staff * Decimal::from(staff.max(0));
    EventAllocation { for_kids, for_staff, total: for_kids + for_staff }
}

/// Alocado/gasto/restante. O restante pode ficar negativo: só sinalizamos.
pub fn summarize(total: Decimal, events: &[Event]) -> BudgetSummary {
    let allocated: Decimal = events.iter().map(|e| e.allocated_budget).sum();
    let spent: Decimal = events.iter().map(|e| e.spent_amount).sum();
    let remaining = total - allocated;
    BudgetSummary {
        total,
        allocated,
        spent,
        remaining,
        over_allocated: remaining < Decimal::ZERO,
    }
}

/// Quantidade de crianças usada nas contas: as cadastradas, ou a estimativa
/// enquanto a lista estiver vazia.
pub fn effective_count(actual: i64, estimated: i32) -> i64 {
    if actual > 0 { actual } else { i64::from(estimated.max(0)) }
}

/// Monta a linha do evento a partir da escolha do usuário e do catálogo.
pub fn build_event(
    selection: &EventSelection,
    school_year: i32,
    children: i64,
    staff: i64,
) -> Result<NewEvent, AppError> {
    let event_type = selection.event_type.trim().to_lowercase();
    if event_type.is_empty() {
        return Err(AppError::field("eventType", "required"));
    }
    let entry = event_catalog::lookup(&event_type);

    // Tipo fora do catálogo sem nome: usa o próprio id
    let name = non_blank(selection.name.as_deref())
        .or_else(|| entry.map(|e| e.name.to_string()))
        .unwrap_or_else(|| event_type.clone());

    let allocation = event_allocation(selection.amount_per_kid, selection.amount_per_staff, children, staff);

    Ok(NewEvent {
        name,
        icon: event_catalog::get_event_icon(&event_type).to_string(),
        category: event_catalog::get_event_category(&event_type),
        event_date: selection
            .event_date
            .or_else(|| event_catalog::estimated_date(&event_type, school_year)),
        event_type,
        amount_per_kid: selection.amount_per_kid,
        amount_per_staff: selection.amount_per_staff,
        allocated_for_kids: allocation.for_kids,
        allocated_for_staff: allocation.for_staff,
        allocated_budget: allocation.total,
    })
}

// =============================================================================
//  SERVIÇO (eventos e resumo ao vivo)
// =============================================================================

#[derive(Clone)]
pub struct BudgetService {
    store: Store,
}

impl BudgetService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    async fn load_class(&self, class_id: Uuid) -> Result<Class, AppError> {
        self.store
            .classes
            .find_by_id(class_id)
            .await?
            .ok_or(AppError::ClassNotFound)
    }

    /// (crianças, equipe) efetivos para as contas da turma.
    async fn headcount(&self, class: &Class) -> Result<(i64, i64), AppError> {
        let children = self.store.directory.count_children(class.id).await?;
        let staff = self.store.directory.list_staff(class.id).await?.len() as i64;
        Ok((
            effective_count(children, class.estimated_children),
            effective_count(staff, class.estimated_staff),
        ))
    }

    /// Total recalculado com o número atual de crianças.
    pub async fn live_total(&self, class: &Class) -> Result<Decimal, AppError> {
        let (children, _) = self.headcount(class).await?;
        Ok(total_budget(class.budget_type, class.budget_amount, children))
    }

    pub async fn summary(&self, class_id: Uuid) -> Result<BudgetSummary, AppError> {
        let class = self.load_class(class_id).await?;
        let total = self.live_total(&class).await?;
        let events = self.store.events.list_events(class_id).await?;
        Ok(summarize(total, &events))
    }

    pub async fn list_events(&self, class_id: Uuid) -> Result<Vec<Event>, AppError> {
        self.store.events.list_events(class_id).await
    }

    pub async fn create_event(&self, class_id: Uuid, selection: &EventSelection) -> Result<Event, AppError> {
        let class = self.load_class(class_id).await?;
        let (children, staff) = self.headcount(&class).await?;
        let new_event = build_event(selection, class.school_year, children, staff)?;

        let total = total_budget(class.budget_type, class.budget_amount, children);
        let events = self.store.events.list_events(class_id).await?;
        let allocated = summarize(total, &events).allocated + new_event.allocated_budget;
        // Evento sem custo entra mesmo com a turma já estourada
        if new_event.allocated_budget > Decimal::ZERO && allocated > total {
            return Err(AppError::AllocationExceedsBudget { total, allocated });
        }

        let mut created = self.store.events.insert_events(class_id, vec![new_event]).await?;
        let event = created
            .pop()
            .ok_or_else(|| anyhow::anyhow!("insert de evento não retornou linha"))?;

        tracing::info!("🎉 Evento '{}' criado na turma {}", event.name, class_id);
        Ok(event)
    }

    pub async fn update_event(
        &self,
        class_id: Uuid,
        event_id: Uuid,
        request: &UpdateEventRequest,
    ) -> Result<Event, AppError> {
        let class = self.load_class(class_id).await?;
        let current = self
            .store
            .events
            .find_event(class_id, event_id)
            .await?
            .ok_or(AppError::EventNotFound)?;

        let mut patch = EventPatch {
            name: non_blank(request.name.as_deref()),
            event_date: if request.clear_date {
                Some(None)
            } else {
                request.event_date.map(Some)
            },
            spent_amount: request.spent_amount,
            ..Default::default()
        };

        let (children, staff) = self.headcount(&class).await?;
        let total = total_budget(class.budget_type, class.budget_amount, children);

        if request.amount_per_kid.is_some() || request.amount_per_staff.is_some() {
            let per_kid = request.amount_per_kid.unwrap_or(current.amount_per_kid);
            let per_staff = request.amount_per_staff.unwrap_or(current.amount_per_staff);
            let allocation = event_allocation(per_kid, per_staff, children, staff);

            // Soma dos outros eventos + o novo valor deste
            let events = self.store.events.list_events(class_id).await?;
            let others: Decimal = events
                .iter()
                .filter(|e| e.id != event_id)
                .map(|e| e.allocated_budget)
                .sum();
            let allocated = others + allocation.total;
            if allocated > total && allocation.total > current.allocated_budget {
                return Err(AppError::AllocationExceedsBudget { total, allocated });
            }

            patch.amount_per_kid = Some(per_kid);
            patch.amount_per_staff = Some(per_staff);
            patch.allocated_for_kids = Some(allocation.for_kids);
            patch.allocated_for_staff = Some(allocation.for_staff);
            patch.allocated_budget = Some(allocation.total);
        }

        self.store.events.update_event(class_id, event_id, patch).await
    }

    pub async fn delete_event(&self, class_id: Uuid, event_id: Uuid) -> Result<(), AppError> {
        self.store.events.delete_event(class_id, event_id).await?;
        tracing::info!("🗑️ Evento {} removido da turma {}", event_id, class_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn event(allocated: i64, spent: i64) -> Event {
        let now = Utc::now();
        Event {
            id: Uuid::new_v4(),
            class_id: Uuid::new_v4(),
            name: "x".into(),
            event_type: "custom".into(),
            category: crate::models::event::EventCategory::Other,
            icon: "📅".into(),
            event_date: None,
            amount_per_kid: Decimal::ZERO,
            amount_per_staff: Decimal::ZERO,
            allocated_for_kids: Decimal::from(allocated),
            allocated_for_staff: Decimal::ZERO,
            allocated_budget: Decimal::from(allocated),
            spent_amount: Decimal::from(spent),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn per_child_budget_multiplies_by_children() {
        assert_eq!(total_budget(BudgetType::PerChild, Decimal::from(100), 5), Decimal::from(500));
        assert_eq!(total_budget(BudgetType::Total, Decimal::from(3000), 25), Decimal::from(3000));
    }

    #[test]
    fn allocation_splits_kids_and_staff() {
        let a = event_allocation(Decimal::from(20), Decimal::from(50), 25, 2);
        assert_eq!(a.for_kids, Decimal::from(500));
        assert_eq!(a.for_staff, Decimal::from(100));
        assert_eq!(a.total, Decimal::from(600));
    }

    #[test]
    fn summary_flags_over_allocation_without_clamping() {
        let s = summarize(Decimal::from(1000), &[event(700, 100), event(500, 0)]);
        assert_eq!(s.allocated, Decimal::from(1200));
        assert_eq!(s.spent, Decimal::from(100));
        assert_eq!(s.remaining, Decimal::from(-200));
        assert!(s.over_allocated);
    }

    #[test]
    fn effective_count_falls_back_to_estimate() {
        assert_eq!(effective_count(0, 22), 22);
        assert_eq!(effective_count(18, 22), 18);
    }

    #[test]
    fn build_event_uses_catalog_and_falls_back_for_unknown_types() {
        let purim = EventSelection {
            event_type: "purim".into(),
            name: None,
            event_date: None,
            amount_per_kid: Decimal::from(30),
            amount_per_staff: Decimal::from(50),
        };
        let e = build_event(&purim, 2025, 20, 2).unwrap();
        assert_eq!(e.icon, "🎭");
        assert_eq!(e.name, "פורים");
        assert_eq!(e.allocated_budget, Decimal::from(700));
        assert_eq!(e.event_date, chrono::NaiveDate::from_ymd_opt(2026, 3, 10));

        let custom = EventSelection { event_type: "bowling".into(), ..purim.clone() };
        let e = build_event(&custom, 2025, 20, 2).unwrap();
        assert_eq!(e.name, "bowling");
        assert_eq!(e.icon, "📅");
        assert_eq!(e.category, crate::models::event::EventCategory::Other);
        assert_eq!(e.event_date, None);

        let named = EventSelection { name: Some("באולינג".into()), ..custom };
        assert_eq!(build_event(&named, 2025, 20, 2).unwrap().name, "באולינג");
    }
}
