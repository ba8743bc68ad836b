// src/services/class_service.rs

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{error::AppError, invite_code::generate_invite_code},
    db::Store,
    models::{
        class::{
            BudgetSettings, Class, ClassDetailsPatch, ClassMember, CreateClassRequest,
            CreateClassResponse, DirectorySettings, MemberRole, MyClass, NewClass,
            UpdateBudgetRequest, UpdateClassRequest, UpdateDirectorySettingsRequest,
        },
        directory::{NewStaff, Relationship},
        event::NewEvent,
    },
    services::{
        budget_service::{build_event, effective_count, summarize, total_budget},
        directory_service::{into_result, parse_child_input, parse_staff_input, today, ParsedChild},
    },
};

const INVITE_CODE_ATTEMPTS: usize = 3;

fn relationship_label(relationship: Relationship) -> &'static str {
    match relationship {
        Relationship::Parent1 => "parent1",
        Relationship::Parent2 => "parent2",
    }
}

/// Linhas já validadas do wizard, prontas para gravar.
struct BootstrapRows {
    children: Vec<ParsedChild>,
    staff: Vec<NewStaff>,
    events: Vec<NewEvent>,
}

#[derive(Default)]
struct BootstrapCounts {
    children: usize,
    parents: usize,
    staff: usize,
    events: usize,
    warnings: Vec<String>,
}

#[derive(Clone)]
pub struct ClassService {
    store: Store,
}

impl ClassService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    // =========================================================================
    //  BOOTSTRAP (wizard de abertura)
    // =========================================================================

    /// Grava a turma inteira a partir do wizard.
    ///
    /// Tudo é validado antes da primeira escrita. Responsáveis que falham são
    /// pulados e voltam como aviso; qualquer outra falha depois do insert da
    /// turma apaga a turma (os dependentes caem em cascade) e devolve o erro.
    pub async fn create_class(
        &self,
        owner_id: Uuid,
        request: &CreateClassRequest,
    ) -> Result<CreateClassResponse, AppError> {
        // 1. Validação completa
        let today = today();
        let mut errors = HashMap::new();
        let children: Vec<ParsedChild> = request
            .children
            .iter()
            .enumerate()
            .map(|(i, c)| parse_child_input(c, today, &format!("children[{i}]."), &mut errors))
            .collect();
        let staff: Vec<NewStaff> = request
            .staff
            .iter()
            .enumerate()
            .filter_map(|(i, s)| parse_staff_input(s, today, &format!("staff[{i}]."), &mut errors))
            .collect();

        let child_count = effective_count(children.len() as i64, request.estimated_children);
        let staff_count = effective_count(staff.len() as i64, request.estimated_staff);

        let mut events = Vec::with_capacity(request.events.len());
        for (i, selection) in request.events.iter().enumerate() {
            match build_event(selection, request.school_year, child_count, staff_count) {
                Ok(event) => events.push(event),
                Err(_) => {
                    errors.insert(format!("events[{i}].eventType"), "required".into());
                }
            }
        }
        let rows = into_result(BootstrapRows { children, staff, events }, errors)?;

        // 2. Linha da turma (a soma das alocações não pode passar do total)
        let total = total_budget(request.budget_type, request.budget_amount, child_count);
        let allocated: Decimal = rows.events.iter().map(|e| e.allocated_budget).sum();
        if allocated > total {
            return Err(AppError::AllocationExceedsBudget { total, allocated });
        }
        let new_class = NewClass {
            name: request.name.trim().to_string(),
            school_name: request.school_name.clone(),
            city: request.city.clone(),
            school_year: request.school_year,
            budget_type: request.budget_type,
            budget_amount: request.budget_amount,
            estimated_children: request.estimated_children,
            estimated_staff: request.estimated_staff,
            total_budget: total,
            invite_code: String::new(),
            owner_id,
        };
        let class = self.insert_with_fresh_code(new_class).await?;

        // 3..9. Dependentes (com compensação em caso de falha)
        let counts = match self.populate(&class, owner_id, rows).await {
            Ok(counts) => counts,
            Err(e) => {
                tracing::error!("❌ Bootstrap da turma {} falhou, desfazendo: {:?}", class.id, e);
                if let Err(cleanup) = self.store.classes.delete_class(class.id).await {
                    tracing::error!("🔥 Falha ao remover turma {} após erro: {:?}", class.id, cleanup);
                }
                return Err(e);
            }
        };

        // Auditoria (não bloqueia)
        match serde_json::to_value(request) {
            Ok(raw) => {
                if let Err(e) = self.store.classes.save_onboarding_response(class.id, owner_id, raw).await {
                    tracing::warn!("⚠️ Respostas do onboarding não salvas para {}: {:?}", class.id, e);
                }
            }
            Err(e) => tracing::warn!("⚠️ Falha ao serializar onboarding: {}", e),
        }

        if let Err(e) = self
            .store
            .classes
            .upsert_directory_settings(&DirectorySettings::defaults(class.id))
            .await
        {
            tracing::warn!("⚠️ Configurações padrão do diretório não criadas para {}: {:?}", class.id, e);
        }

        tracing::info!(
            "🏫 Turma '{}' criada ({} crianças, {} responsáveis, {} equipe, {} eventos, {} avisos)",
            class.name,
            counts.children,
            counts.parents,
            counts.staff,
            counts.events,
            counts.warnings.len()
        );

        Ok(CreateClassResponse {
            class,
            children_created: counts.children,
            parents_created: counts.parents,
            staff_created: counts.staff,
            events_created: counts.events,
            warnings: counts.warnings,
        })
    }

    async fn insert_with_fresh_code(&self, new_class: NewClass) -> Result<Class, AppError> {
        let mut attempt = 1;
        loop {
            let candidate = NewClass { invite_code: generate_invite_code(), ..new_class.clone() };
            match self.store.classes.create_class(candidate).await {
                Err(AppError::UniqueConstraintViolation(what))
                    if what == "invite_code" && attempt < INVITE_CODE_ATTEMPTS =>
                {
                    tracing::warn!("🔁 Colisão de código de convite, tentativa {}", attempt);
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn populate(&self, class: &Class, owner_id: Uuid, rows: BootstrapRows) -> Result<BootstrapCounts, AppError> {
        let mut counts = BootstrapCounts::default();

        if !rows.children.is_empty() {
            let (new_children, parent_sets): (Vec<_>, Vec<_>) =
                rows.children.into_iter().map(|p| (p.child, p.parents)).unzip();
            let children = self.store.directory.insert_children(class.id, new_children).await?;
            counts.children = children.len();

            // Responsáveis: falha aqui só vira aviso
            for (i, (child, parents)) in children.iter().zip(parent_sets).enumerate() {
                for (relationship, new_parent) in parents {
                    let label = relationship_label(relationship);
                    let parent = match self.store.directory.insert_parent(class.id, new_parent).await {
                        Ok(parent) => parent,
                        Err(e) => {
                            tracing::warn!("⚠️ Responsável {} de '{}' ignorado: {:?}", label, child.name, e);
                            counts.warnings.push(format!("children[{i}].{label}: not saved"));
                            continue;
                        }
                    };
                    if let Err(e) = self.store.directory.link_parent(child.id, parent.id, relationship).await {
                        tracing::warn!("⚠️ Vínculo {} de '{}' ignorado: {:?}", label, child.name, e);
                        counts.warnings.push(format!("children[{i}].{label}: not linked"));
                        continue;
                    }
                    counts.parents += 1;
                }
            }
        }

        if !rows.staff.is_empty() {
            counts.staff = self.store.directory.insert_staff(class.id, rows.staff).await?.len();
        }

        if !rows.events.is_empty() {
            counts.events = self.store.events.insert_events(class.id, rows.events).await?.len();
        }

        self.store
            .classes
            .add_member(class.id, owner_id, MemberRole::Admin)
            .await?;

        Ok(counts)
    }

    // =========================================================================
    //  ADMINISTRAÇÃO
    // =========================================================================

    pub async fn list_my_classes(&self, user_id: Uuid) -> Result<Vec<MyClass>, AppError> {
        self.store.classes.list_for_user(user_id).await
    }

    pub async fn get_class(&self, class_id: Uuid) -> Result<Class, AppError> {
        self.store
            .classes
            .find_by_id(class_id)
            .await?
            .ok_or(AppError::ClassNotFound)
    }

    pub async fn find_member(&self, class_id: Uuid, user_id: Uuid) -> Result<Option<ClassMember>, AppError> {
        self.store.classes.find_member(class_id, user_id).await
    }

    pub async fn update_class_details(&self, class_id: Uuid, request: &UpdateClassRequest) -> Result<Class, AppError> {
        let patch = ClassDetailsPatch {
            name: request.name.as_deref().map(str::trim).map(str::to_string),
            school_name: request.school_name.clone(),
            city: request.city.clone(),
            school_year: request.school_year,
        };
        self.store.classes.update_details(class_id, patch).await
    }

    /// Troca o plano de orçamento. Não aceita total abaixo do já alocado.
    pub async fn update_budget_settings(
        &self,
        class_id: Uuid,
        request: &UpdateBudgetRequest,
    ) -> Result<Class, AppError> {
        self.get_class(class_id).await?;

        let children = self.store.directory.count_children(class_id).await?;
        let total = total_budget(
            request.budget_type,
            request.budget_amount,
            effective_count(children, request.estimated_children),
        );

        let events = self.store.events.list_events(class_id).await?;
        let allocated = summarize(total, &events).allocated;
        if total < allocated {
            return Err(AppError::BudgetBelowAllocated { total, allocated });
        }

        let settings = BudgetSettings {
            budget_type: request.budget_type,
            budget_amount: request.budget_amount,
            estimated_children: request.estimated_children,
            estimated_staff: request.estimated_staff,
            total_budget: total,
        };
        let class = self.store.classes.update_budget_settings(class_id, settings).await?;
        tracing::info!("💰 Orçamento da turma {} atualizado para {}", class_id, class.total_budget);
        Ok(class)
    }

    pub async fn regenerate_invite_code(&self, class_id: Uuid) -> Result<Class, AppError> {
        let mut attempt = 1;
        loop {
            match self.store.classes.update_invite_code(class_id, &generate_invite_code()).await {
                Err(AppError::UniqueConstraintViolation(what))
                    if what == "invite_code" && attempt < INVITE_CODE_ATTEMPTS =>
                {
                    attempt += 1;
                }
                Ok(class) => {
                    tracing::info!("🔑 Novo código de convite para a turma {}", class_id);
                    return Ok(class);
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub async fn list_members(&self, class_id: Uuid) -> Result<Vec<ClassMember>, AppError> {
        self.store.classes.list_members(class_id).await
    }

    pub async fn add_member(&self, class_id: Uuid, user_id: Uuid, role: MemberRole) -> Result<ClassMember, AppError> {
        self.store.classes.add_member(class_id, user_id, role).await
    }

    /// Configurações salvas ou os padrões (turmas antigas não têm linha).
    pub async fn get_directory_settings(&self, class_id: Uuid) -> Result<DirectorySettings, AppError> {
        Ok(self
            .store
            .classes
            .get_directory_settings(class_id)
            .await?
            .unwrap_or_else(|| DirectorySettings::defaults(class_id)))
    }

    pub async fn update_directory_settings(
        &self,
        class_id: Uuid,
        request: &UpdateDirectorySettingsRequest,
    ) -> Result<DirectorySettings, AppError> {
        let updated = self.get_directory_settings(class_id).await?.apply(request);
        self.store.classes.upsert_directory_settings(&updated).await
    }
}
