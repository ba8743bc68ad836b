// src/db/repository.rs

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        class_repo::PgClassRepository, directory_repo::PgDirectoryRepository,
        event_repo::PgEventRepository, memory::MemoryStore, payment_repo::PgPaymentRepository,
    },
    models::{
        class::{
            BudgetSettings, Class, ClassDetailsPatch, ClassMember, DirectorySettings, MemberRole,
            MyClass, NewClass, OnboardingResponse,
        },
        directory::{
            Child, ChildParentLink, ChildPatch, LinkedParent, NewChild, NewParent, NewStaff,
            Parent, Relationship, Staff, StaffPatch,
        },
        event::{Event, EventPatch, NewEvent},
        payment::{NewPayment, Payment, PaymentStatus},
    },
};

// Os serviços só enxergam estes traits. Postgres em produção,
// `MemoryStore` para testes e para rodar sem banco (STORAGE_BACKEND=memory).

#[async_trait]
pub trait ClassRepository: Send + Sync {
    async fn create_class(&self, new_class: NewClass) -> Result<Class, AppError>;
    /// Remove a turma e tudo que depende dela (cascade).
    async fn delete_class(&self, class_id: Uuid) -> Result<(), AppError>;
    async fn find_by_id(&self, class_id: Uuid) -> Result<Option<Class>, AppError>;
    async fn find_by_invite_code(&self, code: &str) -> Result<Option<Class>, AppError>;
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<MyClass>, AppError>;
    async fn update_details(&self, class_id: Uuid, patch: ClassDetailsPatch) -> Result<Class, AppError>;
    async fn update_budget_settings(&self, class_id: Uuid, settings: BudgetSettings) -> Result<Class, AppError>;
    async fn update_invite_code(&self, class_id: Uuid, code: &str) -> Result<Class, AppError>;

    async fn add_member(&self, class_id: Uuid, user_id: Uuid, role: MemberRole) -> Result<ClassMember, AppError>;
    async fn find_member(&self, class_id: Uuid, user_id: Uuid) -> Result<Option<ClassMember>, AppError>;
    async fn list_members(&self, class_id: Uuid) -> Result<Vec<ClassMember>, AppError>;

    async fn save_onboarding_response(
        &self,
        class_id: Uuid,
        user_id: Uuid,
        responses: Value,
    ) -> Result<OnboardingResponse, AppError>;

    async fn get_directory_settings(&self, class_id: Uuid) -> Result<Option<DirectorySettings>, AppError>;
    async fn upsert_directory_settings(&self, settings: &DirectorySettings) -> Result<DirectorySettings, AppError>;
}

#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// Inserção em lote; devolve as linhas na mesma ordem da entrada.
    async fn insert_children(&self, class_id: Uuid, children: Vec<NewChild>) -> Result<Vec<Child>, AppError>;
    async fn find_child(&self, class_id: Uuid, child_id: Uuid) -> Result<Option<Child>, AppError>;
    /// Busca por nome ignorando maiúsculas e espaços nas pontas.
    async fn find_child_by_name(&self, class_id: Uuid, name: &str) -> Result<Option<Child>, AppError>;
    async fn update_child(&self, class_id: Uuid, child_id: Uuid, patch: ChildPatch) -> Result<Child, AppError>;
    /// Remove a criança, os vínculos e os responsáveis que ficarem sem filhos.
    async fn delete_child(&self, class_id: Uuid, child_id: Uuid) -> Result<(), AppError>;
    async fn list_children(&self, class_id: Uuid) -> Result<Vec<Child>, AppError>;
    async fn count_children(&self, class_id: Uuid) -> Result<i64, AppError>;

    async fn insert_parent(&self, class_id: Uuid, parent: NewParent) -> Result<Parent, AppError>;
    async fn update_parent(&self, class_id: Uuid, parent_id: Uuid, parent: NewParent) -> Result<Parent, AppError>;
    async fn find_parent(&self, class_id: Uuid, parent_id: Uuid) -> Result<Option<Parent>, AppError>;
    async fn link_parent(
        &self,
        child_id: Uuid,
        parent_id: Uuid,
        relationship: Relationship,
    ) -> Result<ChildParentLink, AppError>;
    async fn list_linked_parents(&self, class_id: Uuid) -> Result<Vec<LinkedParent>, AppError>;

    async fn insert_staff(&self, class_id: Uuid, staff: Vec<NewStaff>) -> Result<Vec<Staff>, AppError>;
    async fn update_staff(&self, class_id: Uuid, staff_id: Uuid, patch: StaffPatch) -> Result<Staff, AppError>;
    async fn delete_staff(&self, class_id: Uuid, staff_id: Uuid) -> Result<(), AppError>;
    async fn list_staff(&self, class_id: Uuid) -> Result<Vec<Staff>, AppError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn insert_events(&self, class_id: Uuid, events: Vec<NewEvent>) -> Result<Vec<Event>, AppError>;
    async fn find_event(&self, class_id: Uuid, event_id: Uuid) -> Result<Option<Event>, AppError>;
    /// Ordenado por data (sem data por último) e nome.
    async fn list_events(&self, class_id: Uuid) -> Result<Vec<Event>, AppError>;
    async fn update_event(&self, class_id: Uuid, event_id: Uuid, patch: EventPatch) -> Result<Event, AppError>;
    async fn delete_event(&self, class_id: Uuid, event_id: Uuid) -> Result<(), AppError>;
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn insert_payment(&self, class_id: Uuid, payment: NewPayment) -> Result<Payment, AppError>;
    async fn list_payments(&self, class_id: Uuid) -> Result<Vec<Payment>, AppError>;
    async fn update_status(&self, class_id: Uuid, payment_id: Uuid, status: PaymentStatus) -> Result<Payment, AppError>;
}

/// O conjunto de repositórios injetado nos serviços.
#[derive(Clone)]
pub struct Store {
    pub classes: Arc<dyn ClassRepository>,
    pub directory: Arc<dyn DirectoryRepository>,
    pub events: Arc<dyn EventRepository>,
    pub payments: Arc<dyn PaymentRepository>,
}

impl Store {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            classes: Arc::new(PgClassRepository::new(pool.clone())),
            directory: Arc::new(PgDirectoryRepository::new(pool.clone())),
            events: Arc::new(PgEventRepository::new(pool.clone())),
            payments: Arc::new(PgPaymentRepository::new(pool)),
        }
    }

    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self {
            classes: store.clone(),
            directory: store.clone(),
            events: store.clone(),
            payments: store,
        }
    }
}
