// src/services/payment_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{contact::non_blank, error::AppError},
    db::Store,
    models::{
        class::{BudgetType, Class},
        payment::{
            CreatePaymentRequest, NewPayment, Payment, PaymentStatus, PaymentSummary, StatusCount,
        },
    },
    services::{
        budget_service::effective_count,
        directory_service::today,
    },
};

const STATUSES: [PaymentStatus; 4] = [
    PaymentStatus::Pending,
    PaymentStatus::Completed,
    PaymentStatus::Failed,
    PaymentStatus::Refunded,
];

/// Valor esperado de cobrança. Por criança: valor x crianças (ou a estimativa);
/// no modo total não há valor por criança e o esperado é o próprio total.
pub fn expected_collection(class: &Class, child_count: i64) -> Decimal {
    match class.budget_type {
        BudgetType::PerChild => {
            class.budget_amount * Decimal::from(effective_count(child_count, class.estimated_children))
        }
        BudgetType::Total => class.total_budget,
    }
}

pub fn summarize_payments(expected: Decimal, payments: &[Payment]) -> PaymentSummary {
    let sum_of = |status: PaymentStatus| -> Decimal {
        payments.iter().filter(|p| p.status == status).map(|p| p.amount).sum()
    };

    let by_status = STATUSES
        .iter()
        .map(|&status| StatusCount {
            status,
            count: payments.iter().filter(|p| p.status == status).count() as i64,
            amount: sum_of(status),
        })
        .collect();

    let collected = sum_of(PaymentStatus::Completed);
    PaymentSummary {
        expected,
        collected,
        pending: sum_of(PaymentStatus::Pending),
        refunded: sum_of(PaymentStatus::Refunded),
        outstanding: (expected - collected).max(Decimal::ZERO),
        by_status,
    }
}

/// Cobranças dos responsáveis.
#[derive(Clone)]
pub struct PaymentService {
    store: Store,
}

impl PaymentService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn record_payment(&self, class_id: Uuid, request: &CreatePaymentRequest) -> Result<Payment, AppError> {
        // O responsável precisa ser desta turma
        self.store
            .directory
            .find_parent(class_id, request.parent_id)
            .await?
            .ok_or(AppError::ParentNotFound)?;

        let payment = NewPayment {
            parent_id: request.parent_id,
            amount: request.amount,
            payment_date: request.payment_date.unwrap_or_else(today),
            status: request.status.unwrap_or(PaymentStatus::Pending),
            method: non_blank(request.method.as_deref()),
            notes: non_blank(request.notes.as_deref()),
        };

        let saved = self.store.payments.insert_payment(class_id, payment).await?;
        tracing::info!("💳 Pagamento de {} registrado na turma {}", saved.amount, class_id);
        Ok(saved)
    }

    pub async fn list_payments(&self, class_id: Uuid) -> Result<Vec<Payment>, AppError> {
        self.store.payments.list_payments(class_id).await
    }

    pub async fn update_payment_status(
        &self,
        class_id: Uuid,
        payment_id: Uuid,
        status: PaymentStatus,
    ) -> Result<Payment, AppError> {
        self.store.payments.update_status(class_id, payment_id, status).await
    }

    pub async fn payment_summary(&self, class_id: Uuid) -> Result<PaymentSummary, AppError> {
        let class = self
            .store
            .classes
            .find_by_id(class_id)
            .await?
            .ok_or(AppError::ClassNotFound)?;
        let children = self.store.directory.count_children(class_id).await?;
        let payments = self.store.payments.list_payments(class_id).await?;
        Ok(summarize_payments(expected_collection(&class, children), &payments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn payment(amount: i64, status: PaymentStatus) -> Payment {
        let now = Utc::now();
        Payment {
            id: Uuid::new_v4(),
            class_id: Uuid::new_v4(),
            parent_id: Uuid::new_v4(),
            amount: Decimal::from(amount),
            payment_date: NaiveDate::from_ymd_opt(2025, 9, 10).unwrap(),
            status,
            method: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn summary_counts_only_completed_as_collected() {
        let payments = vec![
            payment(100, PaymentStatus::Completed),
            payment(100, PaymentStatus::Completed),
            payment(100, PaymentStatus::Pending),
            payment(50, PaymentStatus::Refunded),
        ];
        let s = summarize_payments(Decimal::from(500), &payments);

        assert_eq!(s.collected, Decimal::from(200));
        assert_eq!(s.pending, Decimal::from(100));
        assert_eq!(s.refunded, Decimal::from(50));
        assert_eq!(s.outstanding, Decimal::from(300));
        assert_eq!(s.by_status.len(), 4);
        assert_eq!(s.by_status[1].count, 2);
    }

    fn class(budget_type: BudgetType, amount: i64, estimated: i32) -> Class {
        let now = Utc::now();
        Class {
            id: Uuid::new_v4(),
            name: "גן".into(),
            school_name: None,
            city: None,
            school_year: 2025,
            budget_type,
            budget_amount: Decimal::from(amount),
            estimated_children: estimated,
            estimated_staff: 0,
            total_budget: Decimal::from(amount),
            invite_code: "abcd1234".into(),
            owner_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn expected_follows_budget_mode() {
        let per_child = class(BudgetType::PerChild, 100, 20);
        assert_eq!(expected_collection(&per_child, 5), Decimal::from(500));
        assert_eq!(expected_collection(&per_child, 0), Decimal::from(2000));

        let total = class(BudgetType::Total, 3000, 20);
        assert_eq!(expected_collection(&total, 5), Decimal::from(3000));
    }

    #[test]
    fn outstanding_never_goes_negative() {
        let s = summarize_payments(Decimal::from(100), &[payment(150, PaymentStatus::Completed)]);
        assert_eq!(s.outstanding, Decimal::ZERO);
    }
}
