// src/common/contact.rs

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("telefone inválido")]
pub struct InvalidPhone;

/// Normaliza um telefone digitado no formulário.
///
/// Em branco vira `None`. Aceita dígitos, espaços, `-`, `(`, `)` e um `+` inicial,
/// com 9 a 15 dígitos no total (celular israelense: 10; com +972: 12).
pub fn normalize_phone(input: &str) -> Result<Option<String>, InvalidPhone> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let mut digits = 0;
    for (i, c) in trimmed.chars().enumerate() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' | '(' | ')' => {}
            '+' if i == 0 => {}
            _ => return Err(InvalidPhone),
        }
    }

    if !(9..=15).contains(&digits) {
        return Err(InvalidPhone);
    }
    Ok(Some(trimmed.to_string()))
}

/// Texto opcional em branco vira `None`.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_local_and_international_formats() {
        assert_eq!(normalize_phone("050-1234567"), Ok(Some("050-1234567".into())));
        assert_eq!(normalize_phone(" +972 50 123 4567 "), Ok(Some("+972 50 123 4567".into())));
        assert_eq!(normalize_phone(""), Ok(None));
    }

    #[test]
    fn rejects_letters_and_short_numbers() {
        assert!(normalize_phone("050-ABC").is_err());
        assert!(normalize_phone("1234").is_err());
        assert!(normalize_phone("05+01234567").is_err());
    }

    #[test]
    fn non_blank_trims() {
        assert_eq!(non_blank(Some("  Dana ")), Some("Dana".into()));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
