// src/services/holiday_service.rs

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use crate::{
    common::error::AppError,
    models::calendar::{Holiday, HolidayCategory},
    services::hebrew_calendar::CalendarEngine,
};

struct HolidayMeta {
    engine_name: &'static str,
    name: &'static str,
    icon: &'static str,
    is_school_off: bool,
    category: HolidayCategory,
}

const fn meta(
    engine_name: &'static str,
    name: &'static str,
    icon: &'static str,
    is_school_off: bool,
    category: HolidayCategory,
) -> HolidayMeta {
    HolidayMeta { engine_name, name, icon, is_school_off, category }
}

use HolidayCategory::{Major, Memorial, Minor, National};

// Só o que aparece no calendário da turma. Jejuns menores (Asara B'Tevet,
// Ta'anit Esther, Tish'a B'Av), Shushan Purim e Hoshana Raba ficam de fora.
static HOLIDAYS: &[HolidayMeta] = &[
    meta("Rosh Hashana", "ראש השנה", "🍎", true, Major),
    meta("Rosh Hashana II", "ראש השנה ב׳", "🍎", true, Major),
    meta("Yom Kippur", "יום כיפור", "🕊️", true, Major),
    meta("Sukkot I", "סוכות", "🌿", true, Major),
    meta("Sukkot II (CH''M)", "חול המועד סוכות", "🌿", true, Minor),
    meta("Sukkot III (CH''M)", "חול המועד סוכות", "🌿", true, Minor),
    meta("Sukkot IV (CH''M)", "חול המועד סוכות", "🌿", true, Minor),
    meta("Sukkot V (CH''M)", "חול המועד סוכות", "🌿", true, Minor),
    meta("Sukkot VI (CH''M)", "חול המועד סוכות", "🌿", true, Minor),
    meta("Shmini Atzeret", "שמחת תורה", "📜", true, Major),
    meta("Chanukah: 1 Candle", "חנוכה - נר ראשון", "🕎", true, Minor),
    meta("Chanukah: 2 Candles", "חנוכה - נר שני", "🕎", true, Minor),
    meta("Chanukah: 3 Candles", "חנוכה - נר שלישי", "🕎", true, Minor),
    meta("Chanukah: 4 Candles", "חנוכה - נר רביעי", "🕎", true, Minor),
    meta("Chanukah: 5 Candles", "חנוכה - נר חמישי", "🕎", true, Minor),
    meta("Chanukah: 6 Candles", "חנוכה - נר שישי", "🕎", true, Minor),
    meta("Chanukah: 7 Candles", "חנוכה - נר שביעי", "🕎", true, Minor),
    meta("Chanukah: 8 Candles", "חנוכה - נר שמיני", "🕎", true, Minor),
    meta("Tu BiShvat", "ט״ו בשבט", "🌳", false, Minor),
    meta("Purim", "פורים", "🎭", true, Minor),
    meta("Pesach I", "פסח", "🍷", true, Major),
    meta("Pesach II (CH''M)", "חול המועד פסח", "🍷", true, Minor),
    meta("Pesach III (CH''M)", "חול המועד פסח", "🍷", true, Minor),
    meta("Pesach IV (CH''M)", "חול המועד פסח", "🍷", true, Minor),
    meta("Pesach V (CH''M)", "חול המועד פסח", "🍷", true, Minor),
    meta("Pesach VI (CH''M)", "חול המועד פסח", "🍷", true, Minor),
    meta("Pesach VII", "שביעי של פסח", "🍷", true, Major),
    meta("Yom HaShoah", "יום השואה", "🕯️", false, Memorial),
    meta("Yom HaZikaron", "יום הזיכרון", "🕯️", false, Memorial),
    meta("Yom HaAtzma'ut", "יום העצמאות", "🇮🇱", true, National),
    meta("Lag BaOmer", "ל״ג בעומר", "🔥", true, Minor),
    meta("Yom Yerushalayim", "יום ירושלים", "🏙️", false, National),
    meta("Shavuot", "שבועות", "🌾", true, Major),
];

fn lookup(engine_name: &str) -> Option<&'static HolidayMeta> {
    HOLIDAYS.iter().find(|m| m.engine_name == engine_name)
}

// Anos aceitos nas consultas de calendário
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1900..=2200;

/// Ano em que começa o ano letivo que contém o mês (setembro vira o ano).
pub fn school_year_start(year: i32, month: u32) -> i32 {
    if month >= 9 { year } else { year - 1 }
}

/// Feriados judaicos para o calendário da turma.
#[derive(Clone)]
pub struct HolidayService {
    engine: Arc<dyn CalendarEngine>,
}

impl HolidayService {
    pub fn new(engine: Arc<dyn CalendarEngine>) -> Self {
        Self { engine }
    }

    /// Feriados do mês pedido. O motor roda sobre a janela do ano letivo
    /// (1º de setembro até 31 de dezembro do ano seguinte) e o resultado é
    /// filtrado pela tabela acima; nomes desconhecidos são descartados.
    pub fn get_holidays_for_month(&self, year: i32, month: u32) -> Result<Vec<Holiday>, AppError> {
        if !(1..=12).contains(&month) {
            return Err(AppError::field("month", "invalid_month"));
        }
        if !YEAR_RANGE.contains(&year) {
            return Err(AppError::field("year", "invalid_year"));
        }

        let start_year = school_year_start(year, month);
        let window_start = NaiveDate::from_ymd_opt(start_year, 9, 1);
        let window_end = NaiveDate::from_ymd_opt(start_year + 1, 12, 31);
        let (Some(window_start), Some(window_end)) = (window_start, window_end) else {
            return Err(AppError::field("year", "invalid_year"));
        };

        let holidays: Vec<Holiday> = self
            .engine
            .events_between(window_start, window_end)
            .into_iter()
            .filter(|e| e.date.year() == year && e.date.month() == month)
            .filter_map(|e| {
                lookup(e.name).map(|m| Holiday {
                    name: m.name.to_string(),
                    date: e.date,
                    icon: m.icon.to_string(),
                    is_school_off: m.is_school_off,
                    category: m.category,
                })
            })
            .collect();

        tracing::debug!("📅 {} feriados em {}/{}", holidays.len(), month, year);
        Ok(holidays)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::hebrew_calendar::{CalendarEvent, HebrewCalendar};

    fn service() -> HolidayService {
        HolidayService::new(Arc::new(HebrewCalendar::new()))
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn march_2026_has_purim_but_not_fasts() {
        let holidays = service().get_holidays_for_month(2026, 3).unwrap();

        let purim = holidays.iter().find(|h| h.icon == "🎭").unwrap();
        assert_eq!(purim.name, "פורים");
        assert_eq!(purim.date, ymd(2026, 3, 3));
        assert!(purim.is_school_off);
        // Ta'anit Esther (2026-03-02) e Shushan Purim não entram
        assert!(holidays.iter().all(|h| h.date != ymd(2026, 3, 2)));
        assert!(holidays.iter().all(|h| h.date != ymd(2026, 3, 4)));
    }

    #[test]
    fn september_2025_starts_with_rosh_hashana() {
        let holidays = service().get_holidays_for_month(2025, 9).unwrap();

        assert_eq!(holidays[0].date, ymd(2025, 9, 23));
        assert_eq!(holidays[0].category, HolidayCategory::Major);
        assert!(holidays.iter().all(|h| h.date.month() == 9));
    }

    #[test]
    fn memorial_days_are_not_school_off() {
        let holidays = service().get_holidays_for_month(2026, 4).unwrap();

        let zikaron = holidays.iter().find(|h| h.name == "יום הזיכרון").unwrap();
        assert_eq!(zikaron.category, HolidayCategory::Memorial);
        assert!(!zikaron.is_school_off);

        let atzmaut = holidays.iter().find(|h| h.name == "יום העצמאות").unwrap();
        assert_eq!(atzmaut.date, ymd(2026, 4, 22));
        assert!(atzmaut.is_school_off);
    }

    #[test]
    fn invalid_month_is_rejected() {
        assert!(service().get_holidays_for_month(2026, 13).is_err());
        assert!(service().get_holidays_for_month(2026, 0).is_err());
    }

    struct FixedEngine(Vec<CalendarEvent>);

    impl CalendarEngine for FixedEngine {
        fn events_between(&self, _start: NaiveDate, _end: NaiveDate) -> Vec<CalendarEvent> {
            self.0.clone()
        }
    }

    #[test]
    fn years_outside_range_are_rejected() {
        for year in [i32::MAX, i32::MIN, 1899, 2201] {
            let err = service().get_holidays_for_month(year, 9).unwrap_err();
            assert!(matches!(err, AppError::FieldValidationError(ref f) if f["year"] == "invalid_year"));
        }
        assert!(service().get_holidays_for_month(2200, 12).is_ok());
    }

    #[test]
    fn unknown_engine_names_are_dropped() {
        let engine = FixedEngine(vec![
            CalendarEvent { name: "Rosh Chodesh Adar", date: ymd(2026, 2, 18) },
            CalendarEvent { name: "Tu BiShvat", date: ymd(2026, 2, 2) },
        ]);
        let holidays = HolidayService::new(Arc::new(engine))
            .get_holidays_for_month(2026, 2)
            .unwrap();

        assert_eq!(holidays.len(), 1);
        assert_eq!(holidays[0].icon, "🌳");
        assert!(!holidays[0].is_school_off);
    }
}
