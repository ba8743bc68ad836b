// src/common/dates.rs

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("data de aniversário inválida: '{0}'")]
pub struct InvalidBirthday(pub String);

/// Converte o texto de aniversário digitado nos formulários.
///
/// Aceita `DD/MM/YYYY`, `DD/MM` (assume o ano de `today`) e ISO `YYYY-MM-DD`.
/// Texto em branco vira `None`; qualquer outra coisa é erro.
/// `29/02` sem ano em ano não bissexto cai para 28/02.
pub fn parse_birthday(input: &str, today: NaiveDate) -> Result<Option<NaiveDate>, InvalidBirthday> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(Some(date));
    }

    let invalid = || InvalidBirthday(trimmed.to_string());
    let parts: Vec<&str> = trimmed.split('/').map(str::trim).collect();

    let number = |s: &str| -> Result<u32, InvalidBirthday> {
        if s.is_empty() || s.len() > 4 || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        s.parse::<u32>().map_err(|_| invalid())
    };

    match parts.as_slice() {
        [day, month] => {
            let (day, month) = (number(day)?, number(month)?);
            match NaiveDate::from_ymd_opt(today.year(), month, day) {
                Some(date) => Ok(Some(date)),
                None if day == 29 && month == 2 => {
                    Ok(NaiveDate::from_ymd_opt(today.year(), 2, 28))
                }
                None => Err(invalid()),
            }
        }
        [day, month, year] => {
            if year.len() != 4 {
                return Err(invalid());
            }
            let (day, month, year) = (number(day)?, number(month)?, number(year)?);
            NaiveDate::from_ymd_opt(year as i32, month, day)
                .map(Some)
                .ok_or_else(invalid)
        }
        _ => Err(invalid()),
    }
}

/// Mesmo dia/mês em outro ano (aniversários recorrentes no calendário).
pub fn same_day_in_year(date: NaiveDate, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn day_month_uses_current_year() {
        let date = parse_birthday("15/03", today()).unwrap().unwrap();
        assert_eq!(date.to_string(), "2026-03-15");
    }

    #[test]
    fn single_digits_are_padded() {
        let date = parse_birthday("3/3", today()).unwrap().unwrap();
        assert_eq!(date.to_string(), "2026-03-03");
    }

    #[test]
    fn full_dates_and_iso_are_accepted() {
        assert_eq!(
            parse_birthday("07/11/2019", today()).unwrap(),
            NaiveDate::from_ymd_opt(2019, 11, 7)
        );
        assert_eq!(
            parse_birthday("2019-11-07", today()).unwrap(),
            NaiveDate::from_ymd_opt(2019, 11, 7)
        );
    }

    #[test]
    fn blank_is_none() {
        assert_eq!(parse_birthday("   ", today()), Ok(None));
    }

    #[test]
    fn garbage_and_out_of_range_are_rejected() {
        assert!(parse_birthday("32/01", today()).is_err());
        assert!(parse_birthday("10/13", today()).is_err());
        assert!(parse_birthday("abc", today()).is_err());
        assert!(parse_birthday("1/2/19", today()).is_err());
        assert!(parse_birthday("1/2/3/4", today()).is_err());
    }

    #[test]
    fn leap_day_without_year_falls_back() {
        let date = parse_birthday("29/02", today()).unwrap().unwrap();
        assert_eq!(date.to_string(), "2026-02-28");
    }
}
