// src/services/directory_service.rs

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    common::{
        contact::{non_blank, normalize_phone},
        dates::parse_birthday,
        error::AppError,
    },
    db::Store,
    models::directory::{
        Child, ChildInput, ChildPatch, ChildWithParents, Directory, LinkedParent, NewChild,
        NewParent, NewStaff, Relationship, Staff, StaffInput, StaffPatch, UpdateChildRequest,
        UpdateStaffRequest,
    },
};

// =============================================================================
//  PARSING DOS FORMULÁRIOS (antes de qualquer escrita)
// =============================================================================

/// Criança pronta para inserir, com os responsáveis que tiverem nome.
#[derive(Debug, Clone)]
pub struct ParsedChild {
    pub child: NewChild,
    pub parents: Vec<(Relationship, NewParent)>,
}

// Erros vão para `errors` com a chave `<prefix><campo>` (ex: "children[2].birthday")
fn parse_phone(raw: Option<&str>, key: String, errors: &mut HashMap<String, String>) -> Option<String> {
    match raw.map(normalize_phone) {
        Some(Ok(phone)) => phone,
        Some(Err(_)) => {
            errors.insert(key, "invalid_phone".into());
            None
        }
        None => None,
    }
}

fn parse_date(raw: Option<&str>, today: NaiveDate, key: String, errors: &mut HashMap<String, String>) -> Option<NaiveDate> {
    match raw.map(|text| parse_birthday(text, today)) {
        Some(Ok(date)) => date,
        Some(Err(_)) => {
            errors.insert(key, "invalid_birthday".into());
            None
        }
        None => None,
    }
}

pub fn parse_child_input(
    input: &ChildInput,
    today: NaiveDate,
    prefix: &str,
    errors: &mut HashMap<String, String>,
) -> ParsedChild {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        errors.insert(format!("{prefix}name"), "required".into());
    }

    let birthday = parse_date(input.birthday.as_deref(), today, format!("{prefix}birthday"), errors);

    let slots = [
        (Relationship::Parent1, &input.parent1_name, &input.parent1_phone, "parent1Phone"),
        (Relationship::Parent2, &input.parent2_name, &input.parent2_phone, "parent2Phone"),
    ];
    let mut parents = Vec::new();
    for (relationship, parent_name, phone, phone_field) in slots {
        let phone = parse_phone(phone.as_deref(), format!("{prefix}{phone_field}"), errors);
        if let Some(parent_name) = non_blank(parent_name.as_deref()) {
            parents.push((relationship, NewParent { name: parent_name, phone }));
        }
    }

    ParsedChild {
        child: NewChild {
            name,
            address: non_blank(input.address.as_deref()),
            birthday,
        },
        parents,
    }
}

/// `None` para linhas com nome em branco (ignoradas no wizard).
pub fn parse_staff_input(
    input: &StaffInput,
    today: NaiveDate,
    prefix: &str,
    errors: &mut HashMap<String, String>,
) -> Option<NewStaff> {
    let name = non_blank(Some(input.name.as_str()))?;
    let birthday = parse_date(input.birthday.as_deref(), today, format!("{prefix}birthday"), errors);
    Some(NewStaff { name, role: input.role, birthday })
}

pub fn into_result<T>(value: T, errors: HashMap<String, String>) -> Result<T, AppError> {
    if errors.is_empty() {
        Ok(value)
    } else {
        Err(AppError::FieldValidationError(errors))
    }
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Agrupa os responsáveis por criança mantendo a ordem das crianças.
pub fn group_parents(children: Vec<Child>, parents: Vec<LinkedParent>) -> Vec<ChildWithParents> {
    let mut by_child: HashMap<Uuid, Vec<LinkedParent>> = HashMap::new();
    for parent in parents {
        by_child.entry(parent.child_id).or_default().push(parent);
    }
    children
        .into_iter()
        .map(|child| {
            let mut parents = by_child.remove(&child.id).unwrap_or_default();
            parents.sort_by_key(|p| p.relationship == Relationship::Parent2);
            ChildWithParents { child, parents }
        })
        .collect()
}

// =============================================================================
//  SERVIÇO
// =============================================================================

#[derive(Clone)]
pub struct DirectoryService {
    store: Store,
}

impl DirectoryService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list_directory(&self, class_id: Uuid) -> Result<Directory, AppError> {
        let children = self.store.directory.list_children(class_id).await?;
        let parents = self.store.directory.list_linked_parents(class_id).await?;
        let staff = self.store.directory.list_staff(class_id).await?;
        Ok(Directory {
            children: group_parents(children, parents),
            staff,
        })
    }

    async fn child_with_parents(&self, class_id: Uuid, child: Child) -> Result<ChildWithParents, AppError> {
        let parents = self
            .store
            .directory
            .list_linked_parents(class_id)
            .await?
            .into_iter()
            .filter(|p| p.child_id == child.id)
            .collect();
        group_parents(vec![child], parents)
            .pop()
            .ok_or_else(|| anyhow::anyhow!("agrupamento de responsáveis vazio").into())
    }

    // =========================================================================
    //  CRIANÇAS
    // =========================================================================

    /// Cria a criança e um responsável + vínculo para cada nome informado.
    pub async fn add_child(&self, class_id: Uuid, input: &ChildInput) -> Result<ChildWithParents, AppError> {
        let mut errors = HashMap::new();
        let parsed = parse_child_input(input, today(), "", &mut errors);
        let parsed = into_result(parsed, errors)?;

        let child = self
            .store
            .directory
            .insert_children(class_id, vec![parsed.child])
            .await?
            .pop()
            .ok_or_else(|| anyhow::anyhow!("insert de criança não retornou linha"))?;

        for (relationship, new_parent) in parsed.parents {
            let parent = self.store.directory.insert_parent(class_id, new_parent).await?;
            self.store
                .directory
                .link_parent(child.id, parent.id, relationship)
                .await?;
        }

        tracing::info!("👶 Criança '{}' adicionada à turma {}", child.name, class_id);
        self.child_with_parents(class_id, child).await
    }

    /// Atualiza a criança; responsáveis existentes são atualizados no lugar,
    /// os que faltam são criados quando vier um nome.
    pub async fn update_child(
        &self,
        class_id: Uuid,
        child_id: Uuid,
        request: &UpdateChildRequest,
    ) -> Result<ChildWithParents, AppError> {
        let today = today();
        let mut errors = HashMap::new();

        if matches!(request.name.as_deref().map(str::trim), Some("")) {
            errors.insert("name".to_string(), "required".to_string());
        }
        let birthday = request
            .birthday
            .as_deref()
            .map(|text| parse_date(Some(text), today, "birthday".into(), &mut errors));
        let phone1 = request
            .parent1_phone
            .as_deref()
            .map(|p| parse_phone(Some(p), "parent1Phone".into(), &mut errors));
        let phone2 = request
            .parent2_phone
            .as_deref()
            .map(|p| parse_phone(Some(p), "parent2Phone".into(), &mut errors));
        into_result((), errors)?;

        // Criança de outra turma (ou inexistente) para aqui, antes de mexer nos responsáveis
        self.store
            .directory
            .find_child(class_id, child_id)
            .await?
            .ok_or(AppError::ChildNotFound)?;

        let patch = ChildPatch {
            name: non_blank(request.name.as_deref()),
            address: request.address.as_deref().map(|a| non_blank(Some(a))),
            birthday,
        };
        let child = self.store.directory.update_child(class_id, child_id, patch).await?;

        let linked: Vec<LinkedParent> = self
            .store
            .directory
            .list_linked_parents(class_id)
            .await?
            .into_iter()
            .filter(|p| p.child_id == child_id)
            .collect();

        let slots = [
            (Relationship::Parent1, non_blank(request.parent1_name.as_deref()), phone1),
            (Relationship::Parent2, non_blank(request.parent2_name.as_deref()), phone2),
        ];
        for (relationship, name, phone) in slots {
            match linked.iter().find(|p| p.relationship == relationship) {
                Some(existing) if name.is_some() || phone.is_some() => {
                    let updated = NewParent {
                        name: name.unwrap_or_else(|| existing.name.clone()),
                        phone: phone.unwrap_or_else(|| existing.phone.clone()),
                    };
                    self.store
                        .directory
                        .update_parent(class_id, existing.parent_id, updated)
                        .await?;
                }
                Some(_) => {}
                None => {
                    if let Some(name) = name {
                        let parent = self
                            .store
                            .directory
                            .insert_parent(class_id, NewParent { name, phone: phone.flatten() })
                            .await?;
                        self.store
                            .directory
                            .link_parent(child_id, parent.id, relationship)
                            .await?;
                    }
                }
            }
        }

        self.child_with_parents(class_id, child).await
    }

    /// Cria ou atualiza pelo nome (formulário público). Duas submissões
    /// simultâneas com o mesmo nome ainda podem gerar duplicata.
    pub async fn upsert_child_by_name(
        &self,
        class_id: Uuid,
        input: &ChildInput,
    ) -> Result<(ChildWithParents, bool), AppError> {
        match self.store.directory.find_child_by_name(class_id, &input.name).await? {
            Some(existing) => {
                let request = UpdateChildRequest {
                    name: None,
                    address: input.address.clone(),
                    birthday: input.birthday.clone(),
                    parent1_name: input.parent1_name.clone(),
                    parent1_phone: input.parent1_phone.clone(),
                    parent2_name: input.parent2_name.clone(),
                    parent2_phone: input.parent2_phone.clone(),
                };
                let updated = self.update_child(class_id, existing.id, &request).await?;
                Ok((updated, false))
            }
            None => Ok((self.add_child(class_id, input).await?, true)),
        }
    }

    pub async fn delete_child(&self, class_id: Uuid, child_id: Uuid) -> Result<(), AppError> {
        self.store.directory.delete_child(class_id, child_id).await?;
        tracing::info!("🗑️ Criança {} removida da turma {}", child_id, class_id);
        Ok(())
    }

    // =========================================================================
    //  EQUIPE
    // =========================================================================

    pub async fn add_staff(&self, class_id: Uuid, input: &StaffInput) -> Result<Staff, AppError> {
        let mut errors = HashMap::new();
        let parsed = parse_staff_input(input, today(), "", &mut errors);
        let Some(new_staff) = into_result(parsed, errors)? else {
            return Err(AppError::field("name", "required"));
        };

        self.store
            .directory
            .insert_staff(class_id, vec![new_staff])
            .await?
            .pop()
            .ok_or_else(|| anyhow::anyhow!("insert de funcionário não retornou linha").into())
    }

    pub async fn update_staff(
        &self,
        class_id: Uuid,
        staff_id: Uuid,
        request: &UpdateStaffRequest,
    ) -> Result<Staff, AppError> {
        let mut errors = HashMap::new();
        if matches!(request.name.as_deref().map(str::trim), Some("")) {
            errors.insert("name".to_string(), "required".to_string());
        }
        let birthday = request
            .birthday
            .as_deref()
            .map(|text| parse_date(Some(text), today(), "birthday".into(), &mut errors));
        into_result((), errors)?;

        let patch = StaffPatch {
            name: non_blank(request.name.as_deref()),
            role: request.role,
            birthday,
        };
        self.store.directory.update_staff(class_id, staff_id, patch).await
    }

    pub async fn delete_staff(&self, class_id: Uuid, staff_id: Uuid) -> Result<(), AppError> {
        self.store.directory.delete_staff(class_id, staff_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn child_with_only_first_parent_yields_one_parent() {
        let input = ChildInput {
            name: " נועה ".into(),
            parent1_name: Some("דנה".into()),
            parent1_phone: Some("050-1234567".into()),
            parent2_name: Some("  ".into()),
            ..Default::default()
        };
        let mut errors = HashMap::new();
        let parsed = parse_child_input(&input, today(), "", &mut errors);

        assert!(errors.is_empty());
        assert_eq!(parsed.child.name, "נועה");
        assert_eq!(parsed.parents.len(), 1);
        assert_eq!(parsed.parents[0].0, Relationship::Parent1);
    }

    #[test]
    fn bad_fields_are_reported_with_prefix() {
        let input = ChildInput {
            name: "עומר".into(),
            birthday: Some("32/13".into()),
            parent2_name: Some("יוסי".into()),
            parent2_phone: Some("abc".into()),
            ..Default::default()
        };
        let mut errors = HashMap::new();
        parse_child_input(&input, today(), "children[3].", &mut errors);

        assert_eq!(errors.get("children[3].birthday").map(String::as_str), Some("invalid_birthday"));
        assert_eq!(errors.get("children[3].parent2Phone").map(String::as_str), Some("invalid_phone"));
    }

    #[test]
    fn staff_rows_without_name_are_skipped() {
        let blank = StaffInput {
            name: "  ".into(),
            role: crate::models::directory::StaffRole::Assistant,
            birthday: Some("garbage".into()),
        };
        let mut errors = HashMap::new();
        assert!(parse_staff_input(&blank, today(), "", &mut errors).is_none());
        assert!(errors.is_empty());

        let teacher = StaffInput { name: "רותי".into(), birthday: Some("3/3".into()), ..blank };
        let staff = parse_staff_input(&teacher, today(), "", &mut errors).unwrap();
        assert_eq!(staff.birthday, NaiveDate::from_ymd_opt(2026, 3, 3));
    }
}
