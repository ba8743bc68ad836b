// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use thiserror::Error;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

// Erro interno da aplicação. Nunca vai direto para o cliente:
// os handlers convertem com `to_api_error`, que traduz a mensagem.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Validação de domínio (datas, telefones) -> campo: código do erro
    #[error("Erro de validação de campos: {0:?}")]
    FieldValidationError(HashMap<String, String>),

    #[error("Token inválido")]
    InvalidToken,

    #[error("Cabeçalho x-class-id ausente")]
    MissingClassHeader,

    #[error("Cabeçalho x-class-id inválido")]
    InvalidClassHeader,

    #[error("Usuário não é membro da turma")]
    NotClassMember,

    #[error("Ação restrita a administradores da turma")]
    AdminRequired,

    #[error("Turma não encontrada")]
    ClassNotFound,

    #[error("Código de convite não encontrado")]
    InviteCodeNotFound,

    #[error("Criança não encontrada")]
    ChildNotFound,

    #[error("Responsável não encontrado")]
    ParentNotFound,

    #[error("Funcionário não encontrado")]
    StaffNotFound,

    #[error("Evento não encontrado")]
    EventNotFound,

    #[error("Pagamento não encontrado")]
    PaymentNotFound,

    #[error("Orçamento total {total} menor que o já alocado {allocated}")]
    BudgetBelowAllocated { total: Decimal, allocated: Decimal },

    #[error("Alocação {allocated} excede o orçamento total {total}")]
    AllocationExceedsBudget { total: Decimal, allocated: Decimal },

    #[error("Formulário de pais fechado")]
    IntakeClosed,

    #[error("Violação de unicidade: {0}")]
    UniqueConstraintViolation(String),

    // Falha reportada pelo store em memória (espelha erros de constraint do banco)
    #[error("Falha no armazenamento: {0}")]
    StoreFailure(String),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

/// Erro pronto para a resposta HTTP.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub code: String,
    pub details: Option<Value>,
}

impl AppError {
    /// Código estável usado como chave de tradução e devolvido ao frontend.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) | AppError::FieldValidationError(_) => "validation_failed",
            AppError::InvalidToken | AppError::JwtError(_) => "invalid_token",
            AppError::MissingClassHeader => "missing_class_header",
            AppError::InvalidClassHeader => "invalid_class_header",
            AppError::NotClassMember => "not_class_member",
            AppError::AdminRequired => "admin_required",
            AppError::ClassNotFound => "class_not_found",
            AppError::InviteCodeNotFound => "invite_code_not_found",
            AppError::ChildNotFound => "child_not_found",
            AppError::ParentNotFound => "parent_not_found",
            AppError::StaffNotFound => "staff_not_found",
            AppError::EventNotFound => "event_not_found",
            AppError::PaymentNotFound => "payment_not_found",
            AppError::BudgetBelowAllocated { .. } => "budget_below_allocated",
            AppError::AllocationExceedsBudget { .. } => "allocation_exceeds_budget",
            AppError::IntakeClosed => "intake_closed",
            AppError::UniqueConstraintViolation(_) => "unique_violation",
            AppError::StoreFailure(_)
            | AppError::DatabaseError(_)
            | AppError::InternalServerError(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::FieldValidationError(_)
            | AppError::MissingClassHeader
            | AppError::InvalidClassHeader => StatusCode::BAD_REQUEST,
            AppError::InvalidToken | AppError::JwtError(_) => StatusCode::UNAUTHORIZED,
            AppError::NotClassMember | AppError::AdminRequired | AppError::IntakeClosed => {
                StatusCode::FORBIDDEN
            }
            AppError::ClassNotFound
            | AppError::InviteCodeNotFound
            | AppError::ChildNotFound
            | AppError::ParentNotFound
            | AppError::StaffNotFound
            | AppError::EventNotFound
            | AppError::PaymentNotFound => StatusCode::NOT_FOUND,
            AppError::BudgetBelowAllocated { .. }
            | AppError::AllocationExceedsBudget { .. }
            | AppError::UniqueConstraintViolation(_) => StatusCode::CONFLICT,
            AppError::StoreFailure(_)
            | AppError::DatabaseError(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Atalho para erro de um único campo.
    pub fn field(field: &str, code: &str) -> Self {
        let mut errors = HashMap::new();
        errors.insert(field.to_string(), code.to_string());
        AppError::FieldValidationError(errors)
    }

    pub fn to_api_error(&self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let status = self.status();
        let code = self.code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            // O detalhe fica só no log
            tracing::error!("🔥 Erro Interno do Servidor: {:?}", self);
        }

        let args: Vec<(&str, String)> = match self {
            AppError::BudgetBelowAllocated { total, allocated }
            | AppError::AllocationExceedsBudget { total, allocated } => {
                vec![("total", total.to_string()), ("allocated", allocated.to_string())]
            }
            _ => Vec::new(),
        };

        let details = match self {
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                Some(json!(details))
            }
            AppError::FieldValidationError(errors) => Some(json!(errors)),
            _ => None,
        };

        ApiError {
            status,
            error: i18n.translate(&locale.0, code, &args),
            code: code.to_string(),
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "code": self.code, "details": details }),
            None => json!({ "error": self.error, "code": self.code }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_errors_carry_amounts_into_message() {
        let i18n = I18nStore::load().unwrap();
        let err = AppError::BudgetBelowAllocated {
            total: Decimal::from(300),
            allocated: Decimal::from(450),
        };

        let api = err.to_api_error(&Locale("en".into()), &i18n);

        assert_eq!(api.status, StatusCode::CONFLICT);
        assert_eq!(api.code, "budget_below_allocated");
        assert!(api.error.contains("300"));
        assert!(api.error.contains("450"));
    }

    #[test]
    fn field_errors_become_details() {
        let i18n = I18nStore::load().unwrap();
        let api = AppError::field("birthday", "invalid_birthday")
            .to_api_error(&Locale("he".into()), &i18n);

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.details.unwrap()["birthday"], "invalid_birthday");
    }
}
