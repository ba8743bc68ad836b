// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Users ---
        handlers::auth::get_me,
        handlers::auth::get_my_classes,

        // --- Classes ---
        handlers::classes::create_class,
        handlers::classes::get_class,
        handlers::classes::update_class,
        handlers::classes::regenerate_invite_code,
        handlers::classes::list_members,
        handlers::classes::add_member,
        handlers::classes::get_directory_settings,
        handlers::classes::update_directory_settings,
        handlers::documents::get_invite_qr,

        // --- Budget ---
        handlers::classes::update_budget,
        handlers::events::list_events,
        handlers::events::create_event,
        handlers::events::update_event,
        handlers::events::delete_event,
        handlers::events::get_budget_summary,

        // --- Directory ---
        handlers::directory::get_directory,
        handlers::directory::add_child,
        handlers::directory::update_child,
        handlers::directory::delete_child,
        handlers::directory::add_staff,
        handlers::directory::update_staff,
        handlers::directory::delete_staff,

        // --- Payments ---
        handlers::payments::list_payments,
        handlers::payments::record_payment,
        handlers::payments::update_payment_status,
        handlers::payments::get_payment_summary,

        // --- Calendar ---
        handlers::holidays::get_holidays,
        handlers::holidays::get_event_catalog,

        // --- Public ---
        handlers::public::get_class_card,
        handlers::public::get_calendar,
        handlers::public::get_directory,
        handlers::public::get_parent_form,
        handlers::public::submit_parent_form,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::CurrentUser,

            // --- Classes ---
            models::class::BudgetType,
            models::class::MemberRole,
            models::class::Class,
            models::class::ClassMember,
            models::class::MyClass,
            models::class::DirectorySettings,
            models::class::CreateClassRequest,
            models::class::CreateClassResponse,
            models::class::UpdateClassRequest,
            models::class::UpdateBudgetRequest,
            models::class::AddMemberRequest,
            models::class::UpdateDirectorySettingsRequest,

            // --- Directory ---
            models::directory::Relationship,
            models::directory::StaffRole,
            models::directory::Child,
            models::directory::Parent,
            models::directory::LinkedParent,
            models::directory::ChildWithParents,
            models::directory::Staff,
            models::directory::Directory,
            models::directory::ChildInput,
            models::directory::UpdateChildRequest,
            models::directory::StaffInput,
            models::directory::UpdateStaffRequest,

            // --- Events / Budget ---
            models::event::EventCategory,
            models::event::Event,
            models::event::CatalogEntry,
            models::event::EventSelection,
            models::event::UpdateEventRequest,
            models::budget::BudgetSummary,

            // --- Payments ---
            models::payment::PaymentStatus,
            models::payment::Payment,
            models::payment::StatusCount,
            models::payment::PaymentSummary,
            models::payment::CreatePaymentRequest,
            models::payment::UpdatePaymentStatusRequest,

            // --- Calendar / Public ---
            models::calendar::HolidayCategory,
            models::calendar::Holiday,
            models::calendar::PublicClass,
            models::calendar::PublicEvent,
            models::calendar::PublicBirthday,
            models::calendar::PublicCalendar,
            models::calendar::PublicChild,
            models::calendar::PublicStaff,
            models::calendar::PublicDirectory,
            models::calendar::ParentFormInfo,
            models::calendar::IntakeReceipt,
            handlers::documents::QrFormatParam,
        )
    ),
    tags(
        (name = "Users", description = "Usuário do token e suas turmas"),
        (name = "Classes", description = "Abertura e administração da turma"),
        (name = "Budget", description = "Orçamento e eventos"),
        (name = "Directory", description = "Crianças, responsáveis e equipe"),
        (name = "Payments", description = "Cobranças dos responsáveis"),
        (name = "Calendar", description = "Feriados judaicos e catálogo de eventos"),
        (name = "Public", description = "Visões abertas pelo código de convite")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
