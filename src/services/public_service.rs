// src/services/public_service.rs

use chrono::{Datelike, NaiveDate};

use crate::{
    common::{dates::same_day_in_year, error::AppError, invite_code::normalize_invite_code},
    db::Store,
    models::{
        calendar::{
            IntakeReceipt, ParentFormInfo, PublicBirthday, PublicCalendar, PublicChild, PublicClass,
            PublicDirectory, PublicEvent, PublicStaff,
        },
        class::{Class, DirectorySettings},
        directory::ChildInput,
    },
    services::{
        directory_service::{today, DirectoryService},
        holiday_service::HolidayService,
    },
};

fn public_class(class: &Class) -> PublicClass {
    PublicClass {
        name: class.name.clone(),
        school_name: class.school_name.clone(),
        city: class.city.clone(),
        school_year: class.school_year,
    }
}

fn in_month(date: NaiveDate, year: i32, month: u32) -> bool {
    date.year() == year && date.month() == month
}

/// Visões somente-leitura abertas pelo código de convite.
/// Nunca expõem telefone, endereço ou dados dos responsáveis.
#[derive(Clone)]
pub struct PublicService {
    store: Store,
    directory: DirectoryService,
    holidays: HolidayService,
}

impl PublicService {
    pub fn new(store: Store, directory: DirectoryService, holidays: HolidayService) -> Self {
        Self { store, directory, holidays }
    }

    async fn resolve(&self, code: &str) -> Result<(Class, DirectorySettings), AppError> {
        let code = normalize_invite_code(code).ok_or(AppError::InviteCodeNotFound)?;
        let class = self
            .store
            .classes
            .find_by_invite_code(&code)
            .await?
            .ok_or(AppError::InviteCodeNotFound)?;
        let settings = self
            .store
            .classes
            .get_directory_settings(class.id)
            .await?
            .unwrap_or_else(|| DirectorySettings::defaults(class.id));
        Ok((class, settings))
    }

    pub async fn class_card(&self, code: &str) -> Result<PublicClass, AppError> {
        let (class, _) = self.resolve(code).await?;
        Ok(public_class(&class))
    }

    /// Eventos, aniversários e feriados do mês (padrão: mês atual).
    pub async fn calendar(&self, code: &str, year: Option<i32>, month: Option<u32>) -> Result<PublicCalendar, AppError> {
        let (class, settings) = self.resolve(code).await?;
        let now = today();
        let year = year.unwrap_or(now.year());
        let month = month.unwrap_or(now.month());

        // Valida mês e ano antes de tocar no resto
        let holidays = self.holidays.get_holidays_for_month(year, month)?;

        let events = if settings.show_events {
            self.store
                .events
                .list_events(class.id)
                .await?
                .into_iter()
                .filter(|e| e.event_date.is_some_and(|d| in_month(d, year, month)))
                .map(|e| PublicEvent {
                    name: e.name,
                    event_type: e.event_type,
                    category: e.category,
                    icon: e.icon,
                    date: e.event_date,
                    allocated_budget: settings.show_event_budgets.then_some(e.allocated_budget),
                })
                .collect()
        } else {
            Vec::new()
        };

        let mut birthdays = Vec::new();
        if settings.show_birthdays {
            if settings.show_children {
                let children = self.store.directory.list_children(class.id).await?;
                birthdays.extend(children.into_iter().filter_map(|c| {
                    let date = same_day_in_year(c.birthday?, year);
                    in_month(date, year, month).then(|| PublicBirthday { name: c.name, date, is_staff: false })
                }));
            }
            if settings.show_staff {
                let staff = self.store.directory.list_staff(class.id).await?;
                birthdays.extend(staff.into_iter().filter_map(|s| {
                    let date = same_day_in_year(s.birthday?, year);
                    in_month(date, year, month).then(|| PublicBirthday { name: s.name, date, is_staff: true })
                }));
            }
            birthdays.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.name.cmp(&b.name)));
        }

        Ok(PublicCalendar {
            class: public_class(&class),
            events,
            birthdays,
            holidays,
        })
    }

    /// Lista pública: nome e aniversário das crianças, nome/função da equipe.
    pub async fn directory(&self, code: &str) -> Result<PublicDirectory, AppError> {
        let (class, settings) = self.resolve(code).await?;

        let children = if settings.show_children {
            self.store
                .directory
                .list_children(class.id)
                .await?
                .into_iter()
                .map(|c| PublicChild {
                    name: c.name,
                    birthday: c.birthday.filter(|_| settings.show_birthdays),
                })
                .collect()
        } else {
            Vec::new()
        };

        let staff = if settings.show_staff {
            self.store
                .directory
                .list_staff(class.id)
                .await?
                .into_iter()
                .map(|s| PublicStaff {
                    name: s.name,
                    role: s.role,
                    birthday: s.birthday.filter(|_| settings.show_birthdays),
                })
                .collect()
        } else {
            Vec::new()
        };

        Ok(PublicDirectory {
            class: public_class(&class),
            children,
            staff,
        })
    }

    pub async fn parent_form(&self, code: &str) -> Result<ParentFormInfo, AppError> {
        let (class, settings) = self.resolve(code).await?;
        Ok(ParentFormInfo {
            class: public_class(&class),
            is_open: settings.allow_parent_intake,
        })
    }

    /// Cadastro feito pelos próprios pais. Mesmo nome (sem diferenciar
    /// maiúsculas/espaços) atualiza a criança existente.
    pub async fn submit_parent_form(&self, code: &str, input: &ChildInput) -> Result<IntakeReceipt, AppError> {
        let (class, settings) = self.resolve(code).await?;
        if !settings.allow_parent_intake {
            return Err(AppError::IntakeClosed);
        }

        let (saved, created) = self.directory.upsert_child_by_name(class.id, input).await?;
        tracing::info!(
            "📝 Formulário dos pais: '{}' {} na turma {}",
            saved.child.name,
            if created { "cadastrada" } else { "atualizada" },
            class.id
        );

        Ok(IntakeReceipt {
            child_name: saved.child.name,
            created,
        })
    }
}
