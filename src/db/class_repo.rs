// src/db/class_repo.rs

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::repository::ClassRepository,
    models::class::{
        BudgetSettings, Class, ClassDetailsPatch, ClassMember, DirectorySettings, MemberRole,
        MyClass, NewClass, OnboardingResponse,
    },
};

// O repositório de turmas, responsável pelas tabelas 'classes', 'class_members',
// 'onboarding_responses' e 'directory_settings'
#[derive(Clone)]
pub struct PgClassRepository {
    pool: PgPool,
}

impl PgClassRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Converte erro de violação de chave única em um erro mais amigável
fn unique_violation(e: sqlx::Error, what: &str) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::UniqueConstraintViolation(what.to_string());
        }
    }
    e.into()
}

#[async_trait]
impl ClassRepository for PgClassRepository {
    async fn create_class(&self, new_class: NewClass) -> Result<Class, AppError> {
        sqlx::query_as::<_, Class>(
            r#"
            INSERT INTO classes (
                name, school_name, city, school_year,
                budget_type, budget_amount, estimated_children, estimated_staff,
                total_budget, invite_code, owner_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&new_class.name)
        .bind(&new_class.school_name)
        .bind(&new_class.city)
        .bind(new_class.school_year)
        .bind(new_class.budget_type)
        .bind(new_class.budget_amount)
        .bind(new_class.estimated_children)
        .bind(new_class.estimated_staff)
        .bind(new_class.total_budget)
        .bind(&new_class.invite_code)
        .bind(new_class.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_violation(e, "invite_code"))
    }

    async fn delete_class(&self, class_id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM classes WHERE id = $1")
            .bind(class_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_by_id(&self, class_id: Uuid) -> Result<Option<Class>, AppError> {
        let class = sqlx::query_as::<_, Class>("SELECT * FROM classes WHERE id = $1")
            .bind(class_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(class)
    }

    async fn find_by_invite_code(&self, code: &str) -> Result<Option<Class>, AppError> {
        let class = sqlx::query_as::<_, Class>("SELECT * FROM classes WHERE invite_code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(class)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<MyClass>, AppError> {
        let classes = sqlx::query_as::<_, MyClass>(
            r#"
            SELECT c.*, m.role
            FROM classes c
            INNER JOIN class_members m ON m.class_id = c.id
            WHERE m.user_id = $1
            ORDER BY c.school_year DESC, c.name ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(classes)
    }

    async fn update_details(&self, class_id: Uuid, patch: ClassDetailsPatch) -> Result<Class, AppError> {
        sqlx::query_as::<_, Class>(
            r#"
            UPDATE classes SET
                name = COALESCE($2, name),
                school_name = COALESCE($3, school_name),
                city = COALESCE($4, city),
                school_year = COALESCE($5, school_year),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(class_id)
        .bind(patch.name)
        .bind(patch.school_name)
        .bind(patch.city)
        .bind(patch.school_year)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::ClassNotFound)
    }

    async fn update_budget_settings(&self, class_id: Uuid, settings: BudgetSettings) -> Result<Class, AppError> {
        sqlx::query_as::<_, Class>(
            r#"
            UPDATE classes SET
                budget_type = $2,
                budget_amount = $3,
                estimated_children = $4,
                estimated_staff = $5,
                total_budget = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(class_id)
        .bind(settings.budget_type)
        .bind(settings.budget_amount)
        .bind(settings.estimated_children)
        .bind(settings.estimated_staff)
        .bind(settings.total_budget)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::ClassNotFound)
    }

    async fn update_invite_code(&self, class_id: Uuid, code: &str) -> Result<Class, AppError> {
        sqlx::query_as::<_, Class>(
            "UPDATE classes SET invite_code = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(class_id)
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| unique_violation(e, "invite_code"))?
        .ok_or(AppError::ClassNotFound)
    }

    async fn add_member(&self, class_id: Uuid, user_id: Uuid, role: MemberRole) -> Result<ClassMember, AppError> {
        sqlx::query_as::<_, ClassMember>(
            r#"
            INSERT INTO class_members (class_id, user_id, role)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(class_id)
        .bind(user_id)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_violation(e, "class_member"))
    }

    async fn find_member(&self, class_id: Uuid, user_id: Uuid) -> Result<Option<ClassMember>, AppError> {
        let member = sqlx::query_as::<_, ClassMember>(
            "SELECT * FROM class_members WHERE class_id = $1 AND user_id = $2",
        )
        .bind(class_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(member)
    }

    async fn list_members(&self, class_id: Uuid) -> Result<Vec<ClassMember>, AppError> {
        let members = sqlx::query_as::<_, ClassMember>(
            "SELECT * FROM class_members WHERE class_id = $1 ORDER BY created_at ASC",
        )
        .bind(class_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }

    async fn save_onboarding_response(
        &self,
        class_id: Uuid,
        user_id: Uuid,
        responses: Value,
    ) -> Result<OnboardingResponse, AppError> {
        let row = sqlx::query_as::<_, OnboardingResponse>(
            r#"
            INSERT INTO onboarding_responses (class_id, user_id, responses)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(class_id)
        .bind(user_id)
        .bind(responses)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn get_directory_settings(&self, class_id: Uuid) -> Result<Option<DirectorySettings>, AppError> {
        let settings = sqlx::query_as::<_, DirectorySettings>(
            "SELECT * FROM directory_settings WHERE class_id = $1",
        )
        .bind(class_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(settings)
    }

    async fn upsert_directory_settings(&self, settings: &DirectorySettings) -> Result<DirectorySettings, AppError> {
        let saved = sqlx::query_as::<_, DirectorySettings>(
            r#"
            INSERT INTO directory_settings (
                class_id, show_children, show_birthdays, show_staff,
                show_events, show_event_budgets, allow_parent_intake, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            ON CONFLICT (class_id) DO UPDATE SET
                show_children = EXCLUDED.show_children,
                show_birthdays = EXCLUDED.show_birthdays,
                show_staff = EXCLUDED.show_staff,
                show_events = EXCLUDED.show_events,
                show_event_budgets = EXCLUDED.show_event_budgets,
                allow_parent_intake = EXCLUDED.allow_parent_intake,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(settings.class_id)
        .bind(settings.show_children)
        .bind(settings.show_birthdays)
        .bind(settings.show_staff)
        .bind(settings.show_events)
        .bind(settings.show_event_budgets)
        .bind(settings.allow_parent_intake)
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }
}
