// src/db/directory_repo.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::repository::DirectoryRepository,
    models::directory::{
        Child, ChildParentLink, ChildPatch, LinkedParent, NewChild, NewParent, NewStaff, Parent,
        Relationship, Staff, StaffPatch,
    },
};

// Crianças, responsáveis (e seus vínculos) e equipe
#[derive(Clone)]
pub struct PgDirectoryRepository {
    pool: PgPool,
}

impl PgDirectoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DirectoryRepository for PgDirectoryRepository {
    // =========================================================================
    //  CRIANÇAS
    // =========================================================================

    async fn insert_children(&self, class_id: Uuid, children: Vec<NewChild>) -> Result<Vec<Child>, AppError> {
        if children.is_empty() {
            return Ok(Vec::new());
        }

        // INSERT ... VALUES (...), (...) RETURNING * mantém a ordem dos VALUES
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO children (class_id, name, address, birthday) ");
        builder.push_values(children, |mut row, child| {
            row.push_bind(class_id)
                .push_bind(child.name)
                .push_bind(child.address)
                .push_bind(child.birthday);
        });
        builder.push(" RETURNING *");

        let rows = builder
            .build_query_as::<Child>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_child(&self, class_id: Uuid, child_id: Uuid) -> Result<Option<Child>, AppError> {
        let child = sqlx::query_as::<_, Child>("SELECT * FROM children WHERE class_id = $1 AND id = $2")
            .bind(class_id)
            .bind(child_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(child)
    }

    async fn find_child_by_name(&self, class_id: Uuid, name: &str) -> Result<Option<Child>, AppError> {
        let child = sqlx::query_as::<_, Child>(
            r#"
            SELECT * FROM children
            WHERE class_id = $1 AND lower(btrim(name)) = lower(btrim($2))
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(class_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(child)
    }

    async fn update_child(&self, class_id: Uuid, child_id: Uuid, patch: ChildPatch) -> Result<Child, AppError> {
        // Campos anuláveis: flag "foi enviado?" + valor
        sqlx::query_as::<_, Child>(
            r#"
            UPDATE children SET
                name = COALESCE($3, name),
                address = CASE WHEN $4 THEN $5 ELSE address END,
                birthday = CASE WHEN $6 THEN $7 ELSE birthday END,
                updated_at = NOW()
            WHERE class_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(class_id)
        .bind(child_id)
        .bind(patch.name)
        .bind(patch.address.is_some())
        .bind(patch.address.flatten())
        .bind(patch.birthday.is_some())
        .bind(patch.birthday.flatten())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::ChildNotFound)
    }

    async fn delete_child(&self, class_id: Uuid, child_id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let parent_ids: Vec<Uuid> =
            sqlx::query_scalar("SELECT parent_id FROM child_parents WHERE child_id = $1")
                .bind(child_id)
                .fetch_all(&mut *tx)
                .await?;

        let deleted = sqlx::query("DELETE FROM children WHERE class_id = $1 AND id = $2")
            .bind(class_id)
            .bind(child_id)
            .execute(&mut *tx)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::ChildNotFound); // rollback no drop
        }

        // Os vínculos caem por cascade; sobram os responsáveis órfãos
        sqlx::query(
            r#"
            DELETE FROM parents p
            WHERE p.id = ANY($1)
              AND NOT EXISTS (SELECT 1 FROM child_parents cp WHERE cp.parent_id = p.id)
            "#,
        )
        .bind(&parent_ids[..])
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn list_children(&self, class_id: Uuid) -> Result<Vec<Child>, AppError> {
        let children = sqlx::query_as::<_, Child>(
            "SELECT * FROM children WHERE class_id = $1 ORDER BY name ASC",
        )
        .bind(class_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(children)
    }

    async fn count_children(&self, class_id: Uuid) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM children WHERE class_id = $1")
            .bind(class_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    // =========================================================================
    //  RESPONSÁVEIS
    // =========================================================================

    async fn insert_parent(&self, class_id: Uuid, parent: NewParent) -> Result<Parent, AppError> {
        let row = sqlx::query_as::<_, Parent>(
            "INSERT INTO parents (class_id, name, phone) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(class_id)
        .bind(parent.name)
        .bind(parent.phone)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_parent(&self, class_id: Uuid, parent_id: Uuid, parent: NewParent) -> Result<Parent, AppError> {
        sqlx::query_as::<_, Parent>(
            r#"
            UPDATE parents SET name = $3, phone = $4, updated_at = NOW()
            WHERE class_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(class_id)
        .bind(parent_id)
        .bind(parent.name)
        .bind(parent.phone)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::ParentNotFound)
    }

    async fn find_parent(&self, class_id: Uuid, parent_id: Uuid) -> Result<Option<Parent>, AppError> {
        let parent = sqlx::query_as::<_, Parent>("SELECT * FROM parents WHERE class_id = $1 AND id = $2")
            .bind(class_id)
            .bind(parent_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(parent)
    }

    async fn link_parent(
        &self,
        child_id: Uuid,
        parent_id: Uuid,
        relationship: Relationship,
    ) -> Result<ChildParentLink, AppError> {
        let link = sqlx::query_as::<_, ChildParentLink>(
            r#"
            INSERT INTO child_parents (child_id, parent_id, relationship)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(child_id)
        .bind(parent_id)
        .bind(relationship)
        .fetch_one(&self.pool)
        .await?;
        Ok(link)
    }

    async fn list_linked_parents(&self, class_id: Uuid) -> Result<Vec<LinkedParent>, AppError> {
        let parents = sqlx::query_as::<_, LinkedParent>(
            r#"
            SELECT cp.child_id, cp.parent_id, cp.relationship, p.name, p.phone
            FROM child_parents cp
            INNER JOIN parents p ON p.id = cp.parent_id
            WHERE p.class_id = $1
            ORDER BY cp.relationship ASC
            "#,
        )
        .bind(class_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(parents)
    }

    // =========================================================================
    //  EQUIPE
    // =========================================================================

    async fn insert_staff(&self, class_id: Uuid, staff: Vec<NewStaff>) -> Result<Vec<Staff>, AppError> {
        if staff.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO staff (class_id, name, role, birthday) ");
        builder.push_values(staff, |mut row, member| {
            row.push_bind(class_id)
                .push_bind(member.name)
                .push_bind(member.role)
                .push_bind(member.birthday);
        });
        builder.push(" RETURNING *");

        let rows = builder
            .build_query_as::<Staff>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update_staff(&self, class_id: Uuid, staff_id: Uuid, patch: StaffPatch) -> Result<Staff, AppError> {
        sqlx::query_as::<_, Staff>(
            r#"
            UPDATE staff SET
                name = COALESCE($3, name),
                role = COALESCE($4, role),
                birthday = CASE WHEN $5 THEN $6 ELSE birthday END,
                updated_at = NOW()
            WHERE class_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(class_id)
        .bind(staff_id)
        .bind(patch.name)
        .bind(patch.role)
        .bind(patch.birthday.is_some())
        .bind(patch.birthday.flatten())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::StaffNotFound)
    }

    async fn delete_staff(&self, class_id: Uuid, staff_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM staff WHERE class_id = $1 AND id = $2")
            .bind(class_id)
            .bind(staff_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::StaffNotFound);
        }
        Ok(())
    }

    async fn list_staff(&self, class_id: Uuid) -> Result<Vec<Staff>, AppError> {
        let staff = sqlx::query_as::<_, Staff>(
            "SELECT * FROM staff WHERE class_id = $1 ORDER BY role ASC, name ASC",
        )
        .bind(class_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(staff)
    }
}
