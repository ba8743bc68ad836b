// src/db/event_repo.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::repository::EventRepository,
    models::event::{Event, EventPatch, NewEvent},
};

#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn insert_events(&self, class_id: Uuid, events: Vec<NewEvent>) -> Result<Vec<Event>, AppError> {
        if events.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            r#"INSERT INTO events (
                class_id, name, event_type, category, icon, event_date,
                amount_per_kid, amount_per_staff,
                allocated_for_kids, allocated_for_staff, allocated_budget
            ) "#,
        );
        builder.push_values(events, |mut row, event| {
            row.push_bind(class_id)
                .push_bind(event.name)
                .push_bind(event.event_type)
                .push_bind(event.category)
                .push_bind(event.icon)
                .push_bind(event.event_date)
                .push_bind(event.amount_per_kid)
                .push_bind(event.amount_per_staff)
                .push_bind(event.allocated_for_kids)
                .push_bind(event.allocated_for_staff)
                .push_bind(event.allocated_budget);
        });
        builder.push(" RETURNING *");

        let rows = builder
            .build_query_as::<Event>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_event(&self, class_id: Uuid, event_id: Uuid) -> Result<Option<Event>, AppError> {
        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE class_id = $1 AND id = $2")
            .bind(class_id)
            .bind(event_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(event)
    }

    async fn list_events(&self, class_id: Uuid) -> Result<Vec<Event>, AppError> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT * FROM events
            WHERE class_id = $1
            ORDER BY event_date ASC NULLS LAST, name ASC
            "#,
        )
        .bind(class_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(events)
    }

    async fn update_event(&self, class_id: Uuid, event_id: Uuid, patch: EventPatch) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            r#"
            UPDATE events SET
                name = COALESCE($3, name),
                event_date = CASE WHEN $4 THEN $5 ELSE event_date END,
                amount_per_kid = COALESCE($6, amount_per_kid),
                amount_per_staff = COALESCE($7, amount_per_staff),
                allocated_for_kids = COALESCE($8, allocated_for_kids),
                allocated_for_staff = COALESCE($9, allocated_for_staff),
                allocated_budget = COALESCE($10, allocated_budget),
                spent_amount = COALESCE($11, spent_amount),
                updated_at = NOW()
            WHERE class_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(class_id)
        .bind(event_id)
        .bind(patch.name)
        .bind(patch.event_date.is_some())
        .bind(patch.event_date.flatten())
        .bind(patch.amount_per_kid)
        .bind(patch.amount_per_staff)
        .bind(patch.allocated_for_kids)
        .bind(patch.allocated_for_staff)
        .bind(patch.allocated_budget)
        .bind(patch.spent_amount)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::EventNotFound)
    }

    async fn delete_event(&self, class_id: Uuid, event_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM events WHERE class_id = $1 AND id = $2")
            .bind(class_id)
            .bind(event_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::EventNotFound);
        }
        Ok(())
    }
}
