// src/db/payment_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::repository::PaymentRepository,
    models::payment::{NewPayment, Payment, PaymentStatus},
};

#[derive(Clone)]
pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    async fn insert_payment(&self, class_id: Uuid, payment: NewPayment) -> Result<Payment, AppError> {
        let row = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (class_id, parent_id, amount, payment_date, status, method, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(class_id)
        .bind(payment.parent_id)
        .bind(payment.amount)
        .bind(payment.payment_date)
        .bind(payment.status)
        .bind(payment.method)
        .bind(payment.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_payments(&self, class_id: Uuid) -> Result<Vec<Payment>, AppError> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE class_id = $1 ORDER BY payment_date DESC, created_at DESC",
        )
        .bind(class_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(payments)
    }

    async fn update_status(&self, class_id: Uuid, payment_id: Uuid, status: PaymentStatus) -> Result<Payment, AppError> {
        sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments SET status = $3, updated_at = NOW()
            WHERE class_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(class_id)
        .bind(payment_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::PaymentNotFound)
    }
}
