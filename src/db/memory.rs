// src/db/memory.rs

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::repository::{ClassRepository, DirectoryRepository, EventRepository, PaymentRepository},
    models::{
        class::{
            BudgetSettings, Class, ClassDetailsPatch, ClassMember, DirectorySettings, MemberRole,
            MyClass, NewClass, OnboardingResponse,
        },
        directory::{
            Child, ChildParentLink, ChildPatch, LinkedParent, NewChild, NewParent, NewStaff,
            Parent, Relationship, Staff, StaffPatch, StaffRole,
        },
        event::{Event, EventPatch, NewEvent},
        payment::{NewPayment, Payment, PaymentStatus},
    },
};

#[derive(Default)]
struct Tables {
    classes: Vec<Class>,
    members: Vec<ClassMember>,
    children: Vec<Child>,
    parents: Vec<Parent>,
    links: Vec<ChildParentLink>,
    staff: Vec<Staff>,
    events: Vec<Event>,
    payments: Vec<Payment>,
    onboarding: Vec<OnboardingResponse>,
    settings: Vec<DirectorySettings>,
    // Tabelas cujos INSERTs devem falhar (simulação de erro do banco)
    failing: HashSet<&'static str>,
}

impl Tables {
    fn check_insert(&self, table: &'static str) -> Result<(), AppError> {
        if self.failing.contains(table) {
            return Err(AppError::StoreFailure(format!("insert em '{}' rejeitado", table)));
        }
        Ok(())
    }

    // Espelha as foreign keys para classes(id)
    fn check_class(&self, class_id: Uuid) -> Result<(), AppError> {
        if self.classes.iter().any(|c| c.id == class_id) {
            Ok(())
        } else {
            Err(AppError::StoreFailure(format!("turma {} inexistente", class_id)))
        }
    }

    fn remove_orphan_parents(&mut self, candidates: &[Uuid]) {
        let links = &self.links;
        self.parents.retain(|p| {
            !candidates.contains(&p.id) || links.iter().any(|l| l.parent_id == p.id)
        });
    }
}

/// Store em memória com a mesma semântica das tabelas Postgres
/// (cascades, unicidade, ordenação). Usado nos testes e em `STORAGE_BACKEND=memory`.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Faz todo INSERT seguinte na tabela falhar.
    pub async fn fail_inserts_into(&self, table: &'static str) {
        self.tables.write().await.failing.insert(table);
    }
}

fn staff_role_order(role: StaffRole) -> u8 {
    match role {
        StaffRole::Teacher => 0,
        StaffRole::Assistant => 1,
    }
}

#[async_trait]
impl ClassRepository for MemoryStore {
    async fn create_class(&self, new_class: NewClass) -> Result<Class, AppError> {
        let mut t = self.tables.write().await;
        t.check_insert("classes")?;
        if t.classes.iter().any(|c| c.invite_code == new_class.invite_code) {
            return Err(AppError::UniqueConstraintViolation("invite_code".into()));
        }

        let now = Utc::now();
        let class = Class {
            id: Uuid::new_v4(),
            name: new_class.name,
            school_name: new_class.school_name,
            city: new_class.city,
            school_year: new_class.school_year,
            budget_type: new_class.budget_type,
            budget_amount: new_class.budget_amount,
            estimated_children: new_class.estimated_children,
            estimated_staff: new_class.estimated_staff,
            total_budget: new_class.total_budget,
            invite_code: new_class.invite_code,
            owner_id: new_class.owner_id,
            created_at: now,
            updated_at: now,
        };
        t.classes.push(class.clone());
        Ok(class)
    }

    async fn delete_class(&self, class_id: Uuid) -> Result<(), AppError> {
        let mut t = self.tables.write().await;
        let child_ids: Vec<Uuid> = t
            .children
            .iter()
            .filter(|c| c.class_id == class_id)
            .map(|c| c.id)
            .collect();

        t.classes.retain(|c| c.id != class_id);
        t.members.retain(|m| m.class_id != class_id);
        t.children.retain(|c| c.class_id != class_id);
        t.links.retain(|l| !child_ids.contains(&l.child_id));
        t.parents.retain(|p| p.class_id != class_id);
        t.staff.retain(|s| s.class_id != class_id);
        t.events.retain(|e| e.class_id != class_id);
        t.payments.retain(|p| p.class_id != class_id);
        t.onboarding.retain(|o| o.class_id != class_id);
        t.settings.retain(|s| s.class_id != class_id);
        Ok(())
    }

    async fn find_by_id(&self, class_id: Uuid) -> Result<Option<Class>, AppError> {
        let t = self.tables.read().await;
        Ok(t.classes.iter().find(|c| c.id == class_id).cloned())
    }

    async fn find_by_invite_code(&self, code: &str) -> Result<Option<Class>, AppError> {
        let t = self.tables.read().await;
        Ok(t.classes.iter().find(|c| c.invite_code == code).cloned())
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<MyClass>, AppError> {
        let t = self.tables.read().await;
        let mut classes: Vec<MyClass> = t
            .members
            .iter()
            .filter(|m| m.user_id == user_id)
            .filter_map(|m| {
                t.classes
                    .iter()
                    .find(|c| c.id == m.class_id)
                    .map(|c| MyClass { class: c.clone(), role: m.role })
            })
            .collect();
        classes.sort_by(|a, b| {
            b.class
                .school_year
                .cmp(&a.class.school_year)
                .then_with(|| a.class.name.cmp(&b.class.name))
        });
        Ok(classes)
    }

    async fn update_details(&self, class_id: Uuid, patch: ClassDetailsPatch) -> Result<Class, AppError> {
        let mut t = self.tables.write().await;
        let class = t
            .classes
            .iter_mut()
            .find(|c| c.id == class_id)
            .ok_or(AppError::ClassNotFound)?;

        if let Some(name) = patch.name {
            class.name = name;
        }
        if let Some(school_name) = patch.school_name {
            class.school_name = Some(school_name);
        }
        if let Some(city) = patch.city {
            class.city = Some(city);
        }
        if let Some(year) = patch.school_year {
            class.school_year = year;
        }
        class.updated_at = Utc::now();
        Ok(class.clone())
    }

    async fn update_budget_settings(&self, class_id: Uuid, settings: BudgetSettings) -> Result<Class, AppError> {
        let mut t = self.tables.write().await;
        let class = t
            .classes
            .iter_mut()
            .find(|c| c.id == class_id)
            .ok_or(AppError::ClassNotFound)?;

        class.budget_type = settings.budget_type;
        class.budget_amount = settings.budget_amount;
        class.estimated_children = settings.estimated_children;
        class.estimated_staff = settings.estimated_staff;
        class.total_budget = settings.total_budget;
        class.updated_at = Utc::now();
        Ok(class.clone())
    }

    async fn update_invite_code(&self, class_id: Uuid, code: &str) -> Result<Class, AppError> {
        let mut t = self.tables.write().await;
        if t.classes.iter().any(|c| c.id != class_id && c.invite_code == code) {
            return Err(AppError::UniqueConstraintViolation("invite_code".into()));
        }
        let class = t
            .classes
            .iter_mut()
            .find(|c| c.id == class_id)
            .ok_or(AppError::ClassNotFound)?;
        class.invite_code = code.to_string();
        class.updated_at = Utc::now();
        Ok(class.clone())
    }

    async fn add_member(&self, class_id: Uuid, user_id: Uuid, role: MemberRole) -> Result<ClassMember, AppError> {
        let mut t = self.tables.write().await;
        t.check_insert("class_members")?;
        t.check_class(class_id)?;
        if t.members.iter().any(|m| m.class_id == class_id && m.user_id == user_id) {
            return Err(AppError::UniqueConstraintViolation("class_member".into()));
        }
        let member = ClassMember { class_id, user_id, role, created_at: Utc::now() };
        t.members.push(member.clone());
        Ok(member)
    }

    async fn find_member(&self, class_id: Uuid, user_id: Uuid) -> Result<Option<ClassMember>, AppError> {
        let t = self.tables.read().await;
        Ok(t
            .members
            .iter()
            .find(|m| m.class_id == class_id && m.user_id == user_id)
            .cloned())
    }

    async fn list_members(&self, class_id: Uuid) -> Result<Vec<ClassMember>, AppError> {
        let t = self.tables.read().await;
        Ok(t.members.iter().filter(|m| m.class_id == class_id).cloned().collect())
    }

    async fn save_onboarding_response(
        &self,
        class_id: Uuid,
        user_id: Uuid,
        responses: Value,
    ) -> Result<OnboardingResponse, AppError> {
        let mut t = self.tables.write().await;
        t.check_insert("onboarding_responses")?;
        t.check_class(class_id)?;
        let row = OnboardingResponse {
            id: Uuid::new_v4(),
            class_id,
            user_id,
            responses,
            created_at: Utc::now(),
        };
        t.onboarding.push(row.clone());
        Ok(row)
    }

    async fn get_directory_settings(&self, class_id: Uuid) -> Result<Option<DirectorySettings>, AppError> {
        let t = self.tables.read().await;
        Ok(t.settings.iter().find(|s| s.class_id == class_id).cloned())
    }

    async fn upsert_directory_settings(&self, settings: &DirectorySettings) -> Result<DirectorySettings, AppError> {
        let mut t = self.tables.write().await;
        t.check_insert("directory_settings")?;
        t.check_class(settings.class_id)?;
        let mut saved = settings.clone();
        saved.updated_at = Utc::now();
        t.settings.retain(|s| s.class_id != settings.class_id);
        t.settings.push(saved.clone());
        Ok(saved)
    }
}

#[async_trait]
impl DirectoryRepository for MemoryStore {
    async fn insert_children(&self, class_id: Uuid, children: Vec<NewChild>) -> Result<Vec<Child>, AppError> {
        let mut t = self.tables.write().await;
        t.check_insert("children")?;
        t.check_class(class_id)?;

        let now = Utc::now();
        let rows: Vec<Child> = children
            .into_iter()
            .map(|c| Child {
                id: Uuid::new_v4(),
                class_id,
                name: c.name,
                address: c.address,
                birthday: c.birthday,
                created_at: now,
                updated_at: now,
            })
            .collect();
        t.children.extend(rows.iter().cloned());
        Ok(rows)
    }

    async fn find_child(&self, class_id: Uuid, child_id: Uuid) -> Result<Option<Child>, AppError> {
        let t = self.tables.read().await;
        Ok(t
            .children
            .iter()
            .find(|c| c.class_id == class_id && c.id == child_id)
            .cloned())
    }

    async fn find_child_by_name(&self, class_id: Uuid, name: &str) -> Result<Option<Child>, AppError> {
        let wanted = name.trim().to_lowercase();
        let t = self.tables.read().await;
        Ok(t
            .children
            .iter()
            .find(|c| c.class_id == class_id && c.name.trim().to_lowercase() == wanted)
            .cloned())
    }

    async fn update_child(&self, class_id: Uuid, child_id: Uuid, patch: ChildPatch) -> Result<Child, AppError> {
        let mut t = self.tables.write().await;
        let child = t
            .children
            .iter_mut()
            .find(|c| c.class_id == class_id && c.id == child_id)
            .ok_or(AppError::ChildNotFound)?;

        if let Some(name) = patch.name {
            child.name = name;
        }
        if let Some(address) = patch.address {
            child.address = address;
        }
        if let Some(birthday) = patch.birthday {
            child.birthday = birthday;
        }
        child.updated_at = Utc::now();
        Ok(child.clone())
    }

    async fn delete_child(&self, class_id: Uuid, child_id: Uuid) -> Result<(), AppError> {
        let mut t = self.tables.write().await;
        let before = t.children.len();
        t.children.retain(|c| !(c.class_id == class_id && c.id == child_id));
        if t.children.len() == before {
            return Err(AppError::ChildNotFound);
        }

        let parent_ids: Vec<Uuid> = t
            .links
            .iter()
            .filter(|l| l.child_id == child_id)
            .map(|l| l.parent_id)
            .collect();
        t.links.retain(|l| l.child_id != child_id);
        t.remove_orphan_parents(&parent_ids);
        Ok(())
    }

    async fn list_children(&self, class_id: Uuid) -> Result<Vec<Child>, AppError> {
        let t = self.tables.read().await;
        let mut children: Vec<Child> =
            t.children.iter().filter(|c| c.class_id == class_id).cloned().collect();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }

    async fn count_children(&self, class_id: Uuid) -> Result<i64, AppError> {
        let t = self.tables.read().await;
        Ok(t.children.iter().filter(|c| c.class_id == class_id).count() as i64)
    }

    async fn insert_parent(&self, class_id: Uuid, parent: NewParent) -> Result<Parent, AppError> {
        let mut t = self.tables.write().await;
        t.check_insert("parents")?;
        t.check_class(class_id)?;

        let now = Utc::now();
        let row = Parent {
            id: Uuid::new_v4(),
            class_id,
            name: parent.name,
            phone: parent.phone,
            user_id: None,
            created_at: now,
            updated_at: now,
        };
        t.parents.push(row.clone());
        Ok(row)
    }

    async fn update_parent(&self, class_id: Uuid, parent_id: Uuid, parent: NewParent) -> Result<Parent, AppError> {
        let mut t = self.tables.write().await;
        let row = t
            .parents
            .iter_mut()
            .find(|p| p.class_id == class_id && p.id == parent_id)
            .ok_or(AppError::ParentNotFound)?;
        row.name = parent.name;
        row.phone = parent.phone;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn find_parent(&self, class_id: Uuid, parent_id: Uuid) -> Result<Option<Parent>, AppError> {
        let t = self.tables.read().await;
        Ok(t
            .parents
            .iter()
            .find(|p| p.class_id == class_id && p.id == parent_id)
            .cloned())
    }

    async fn link_parent(
        &self,
        child_id: Uuid,
        parent_id: Uuid,
        relationship: Relationship,
    ) -> Result<ChildParentLink, AppError> {
        let mut t = self.tables.write().await;
        t.check_insert("child_parents")?;
        if !t.children.iter().any(|c| c.id == child_id) || !t.parents.iter().any(|p| p.id == parent_id) {
            return Err(AppError::StoreFailure("vínculo com criança/responsável inexistente".into()));
        }
        if t.links.iter().any(|l| l.child_id == child_id && l.parent_id == parent_id) {
            return Err(AppError::UniqueConstraintViolation("child_parent".into()));
        }
        let link = ChildParentLink { child_id, parent_id, relationship, created_at: Utc::now() };
        t.links.push(link.clone());
        Ok(link)
    }

    async fn list_linked_parents(&self, class_id: Uuid) -> Result<Vec<LinkedParent>, AppError> {
        let t = self.tables.read().await;
        let mut parents: Vec<LinkedParent> = t
            .links
            .iter()
            .filter_map(|l| {
                t.parents
                    .iter()
                    .find(|p| p.id == l.parent_id && p.class_id == class_id)
                    .map(|p| LinkedParent {
                        child_id: l.child_id,
                        parent_id: p.id,
                        relationship: l.relationship,
                        name: p.name.clone(),
                        phone: p.phone.clone(),
                    })
            })
            .collect();
        parents.sort_by_key(|p| p.relationship == Relationship::Parent2);
        Ok(parents)
    }

    async fn insert_staff(&self, class_id: Uuid, staff: Vec<NewStaff>) -> Result<Vec<Staff>, AppError> {
        let mut t = self.tables.write().await;
        t.check_insert("staff")?;
        t.check_class(class_id)?;

        let now = Utc::now();
        let rows: Vec<Staff> = staff
            .into_iter()
            .map(|s| Staff {
                id: Uuid::new_v4(),
                class_id,
                name: s.name,
                role: s.role,
                birthday: s.birthday,
                created_at: now,
                updated_at: now,
            })
            .collect();
        t.staff.extend(rows.iter().cloned());
        Ok(rows)
    }

    async fn update_staff(&self, class_id: Uuid, staff_id: Uuid, patch: StaffPatch) -> Result<Staff, AppError> {
        let mut t = self.tables.write().await;
        let member = t
            .staff
            .iter_mut()
            .find(|s| s.class_id == class_id && s.id == staff_id)
            .ok_or(AppError::StaffNotFound)?;

        if let Some(name) = patch.name {
            member.name = name;
        }
        if let Some(role) = patch.role {
            member.role = role;
        }
        if let Some(birthday) = patch.birthday {
            member.birthday = birthday;
        }
        member.updated_at = Utc::now();
        Ok(member.clone())
    }

    async fn delete_staff(&self, class_id: Uuid, staff_id: Uuid) -> Result<(), AppError> {
        let mut t = self.tables.write().await;
        let before = t.staff.len();
        t.staff.retain(|s| !(s.class_id == class_id && s.id == staff_id));
        if t.staff.len() == before {
            return Err(AppError::StaffNotFound);
        }
        Ok(())
    }

    async fn list_staff(&self, class_id: Uuid) -> Result<Vec<Staff>, AppError> {
        let t = self.tables.read().await;
        let mut staff: Vec<Staff> = t.staff.iter().filter(|s| s.class_id == class_id).cloned().collect();
        staff.sort_by(|a, b| {
            staff_role_order(a.role)
                .cmp(&staff_role_order(b.role))
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(staff)
    }
}

#[async_trait]
impl EventRepository for MemoryStore {
    async fn insert_events(&self, class_id: Uuid, events: Vec<NewEvent>) -> Result<Vec<Event>, AppError> {
        let mut t = self.tables.write().await;
        t.check_insert("events")?;
        t.check_class(class_id)?;

        let now = Utc::now();
        let rows: Vec<Event> = events
            .into_iter()
            .map(|e| Event {
                id: Uuid::new_v4(),
                class_id,
                name: e.name,
                event_type: e.event_type,
                category: e.category,
                icon: e.icon,
                event_date: e.event_date,
                amount_per_kid: e.amount_per_kid,
                amount_per_staff: e.amount_per_staff,
                allocated_for_kids: e.allocated_for_kids,
                allocated_for_staff: e.allocated_for_staff,
                allocated_budget: e.allocated_budget,
                spent_amount: Decimal::ZERO,
                created_at: now,
                updated_at: now,
            })
            .collect();
        t.events.extend(rows.iter().cloned());
        Ok(rows)
    }

    async fn find_event(&self, class_id: Uuid, event_id: Uuid) -> Result<Option<Event>, AppError> {
        let t = self.tables.read().await;
        Ok(t
            .events
            .iter()
            .find(|e| e.class_id == class_id && e.id == event_id)
            .cloned())
    }

    async fn list_events(&self, class_id: Uuid) -> Result<Vec<Event>, AppError> {
        let t = self.tables.read().await;
        let mut events: Vec<Event> = t.events.iter().filter(|e| e.class_id == class_id).cloned().collect();
        // NULLS LAST
        events.sort_by(|a, b| {
            (a.event_date.is_none(), a.event_date, &a.name).cmp(&(b.event_date.is_none(), b.event_date, &b.name))
        });
        Ok(events)
    }

    async fn update_event(&self, class_id: Uuid, event_id: Uuid, patch: EventPatch) -> Result<Event, AppError> {
        let mut t = self.tables.write().await;
        let event = t
            .events
            .iter_mut()
            .find(|e| e.class_id == class_id && e.id == event_id)
            .ok_or(AppError::EventNotFound)?;

        if let Some(name) = patch.name {
            event.name = name;
        }
        if let Some(date) = patch.event_date {
            event.event_date = date;
        }
        if let Some(v) = patch.amount_per_kid {
            event.amount_per_kid = v;
        }
        if let Some(v) = patch.amount_per_staff {
            event.amount_per_staff = v;
        }
        if let Some(v) = patch.allocated_for_kids {
            event.allocated_for_kids = v;
        }
        if let Some(v) = patch.allocated_for_staff {
            event.allocated_for_staff = v;
        }
        if let Some(v) = patch.allocated_budget {
            event.allocated_budget = v;
        }
        if let Some(v) = patch.spent_amount {
            event.spent_amount = v;
        }
        event.updated_at = Utc::now();
        Ok(event.clone())
    }

    async fn delete_event(&self, class_id: Uuid, event_id: Uuid) -> Result<(), AppError> {
        let mut t = self.tables.write().await;
        let before = t.events.len();
        t.events.retain(|e| !(e.class_id == class_id && e.id == event_id));
        if t.events.len() == before {
            return Err(AppError::EventNotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PaymentRepository for MemoryStore {
    async fn insert_payment(&self, class_id: Uuid, payment: NewPayment) -> Result<Payment, AppError> {
        let mut t = self.tables.write().await;
        t.check_insert("payments")?;
        t.check_class(class_id)?;
        if !t.parents.iter().any(|p| p.id == payment.parent_id) {
            return Err(AppError::StoreFailure("responsável inexistente".into()));
        }

        let now = Utc::now();
        let row = Payment {
            id: Uuid::new_v4(),
            class_id,
            parent_id: payment.parent_id,
            amount: payment.amount,
            payment_date: payment.payment_date,
            status: payment.status,
            method: payment.method,
            notes: payment.notes,
            created_at: now,
            updated_at: now,
        };
        t.payments.push(row.clone());
        Ok(row)
    }

    async fn list_payments(&self, class_id: Uuid) -> Result<Vec<Payment>, AppError> {
        let t = self.tables.read().await;
        let mut payments: Vec<Payment> =
            t.payments.iter().filter(|p| p.class_id == class_id).cloned().collect();
        payments.sort_by(|a, b| {
            b.payment_date
                .cmp(&a.payment_date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(payments)
    }

    async fn update_status(&self, class_id: Uuid, payment_id: Uuid, status: PaymentStatus) -> Result<Payment, AppError> {
        let mut t = self.tables.write().await;
        let payment = t
            .payments
            .iter_mut()
            .find(|p| p.class_id == class_id && p.id == payment_id)
            .ok_or(AppError::PaymentNotFound)?;
        payment.status = status;
        payment.updated_at = Utc::now();
        Ok(payment.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_class(code: &str) -> NewClass {
        NewClass {
            name: "גן רימון".into(),
            school_name: None,
            city: None,
            school_year: 2025,
            budget_type: crate::models::class::BudgetType::Total,
            budget_amount: Decimal::from(1000),
            estimated_children: 0,
            estimated_staff: 0,
            total_budget: Decimal::from(1000),
            invite_code: code.into(),
            owner_id: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn invite_codes_are_unique() {
        let store = MemoryStore::new();
        store.create_class(new_class("aaaa1111")).await.unwrap();

        let err = store.create_class(new_class("aaaa1111")).await.unwrap_err();
        assert!(matches!(err, AppError::UniqueConstraintViolation(_)));
    }

    #[tokio::test]
    async fn deleting_a_class_cascades() {
        let store = MemoryStore::new();
        let class = store.create_class(new_class("bbbb2222")).await.unwrap();
        let children = store
            .insert_children(class.id, vec![NewChild { name: "יואב".into(), address: None, birthday: None }])
            .await
            .unwrap();
        let parent = store
            .insert_parent(class.id, NewParent { name: "רונית".into(), phone: None })
            .await
            .unwrap();
        store.link_parent(children[0].id, parent.id, Relationship::Parent1).await.unwrap();

        store.delete_class(class.id).await.unwrap();

        assert!(store.find_by_id(class.id).await.unwrap().is_none());
        assert_eq!(store.count_children(class.id).await.unwrap(), 0);
        assert!(store.list_linked_parents(class.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_a_child_keeps_parents_shared_with_siblings() {
        let store = MemoryStore::new();
        let class = store.create_class(new_class("cccc3333")).await.unwrap();
        let kids = store
            .insert_children(
                class.id,
                vec![
                    NewChild { name: "תמר".into(), address: None, birthday: None },
                    NewChild { name: "איתי".into(), address: None, birthday: None },
                ],
            )
            .await
            .unwrap();
        let shared = store
            .insert_parent(class.id, NewParent { name: "מיכל".into(), phone: None })
            .await
            .unwrap();
        let only_first = store
            .insert_parent(class.id, NewParent { name: "אבי".into(), phone: None })
            .await
            .unwrap();
        store.link_parent(kids[0].id, shared.id, Relationship::Parent1).await.unwrap();
        store.link_parent(kids[1].id, shared.id, Relationship::Parent1).await.unwrap();
        store.link_parent(kids[0].id, only_first.id, Relationship::Parent2).await.unwrap();

        store.delete_child(class.id, kids[0].id).await.unwrap();

        assert!(store.find_parent(class.id, shared.id).await.unwrap().is_some());
        assert!(store.find_parent(class.id, only_first.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn injected_failures_reject_inserts() {
        let store = MemoryStore::new();
        let class = store.create_class(new_class("dddd4444")).await.unwrap();
        store.fail_inserts_into("parents").await;

        let err = store
            .insert_parent(class.id, NewParent { name: "x".into(), phone: None })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::StoreFailure(_)));
    }
}
