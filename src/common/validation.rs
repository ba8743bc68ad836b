// src/common/validation.rs

use rust_decimal::Decimal;
use validator::ValidationError;

// Validações customizadas usadas pelos payloads (`#[validate(custom(...))]`)

// Teto de qualquer valor em dinheiro vindo do cliente. Mantém as
// multiplicações por contagem de crianças/funcionários longe do overflow.
pub const MAX_AMOUNT: i64 = 1_000_000;

fn above_max(val: &Decimal) -> Option<ValidationError> {
    if *val > Decimal::from(MAX_AMOUNT) {
        let mut err = ValidationError::new("range");
        err.add_param("max".into(), &MAX_AMOUNT);
        err.message = Some("too_large".into());
        return Some(err);
    }
    None
}

/// Valor em dinheiro: 0..=MAX_AMOUNT.
pub fn validate_amount(val: &Decimal) -> Result<(), ValidationError> {
    validate_not_negative(val)?;
    above_max(val).map_or(Ok(()), Err)
}

/// Valor em dinheiro estritamente positivo, até MAX_AMOUNT.
pub fn validate_positive_amount(val: &Decimal) -> Result<(), ValidationError> {
    validate_positive(val)?;
    above_max(val).map_or(Ok(()), Err)
}

pub fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("must_not_be_negative".into());
        return Err(err);
    }
    Ok(())
}

pub fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("must_be_positive".into());
        return Err(err);
    }
    Ok(())
}
