// src/services/hebrew_calendar.rs

use chrono::{Datelike, NaiveDate, Weekday};

// Motor de calendário hebraico (aritmética do molad + regras de adiamento).
// Dias são contados em "R.D." (rata die): 0001-01-01 = 1, igual ao
// `num_days_from_ce` do chrono.

/// Um evento bruto do motor: nome interno (inglês) e data gregoriana.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub name: &'static str,
    pub date: NaiveDate,
}

/// Fonte de feriados judaicos. O serviço de feriados só conhece este trait.
pub trait CalendarEngine: Send + Sync {
    /// Todos os eventos entre `start` e `end` (inclusive), em ordem de data.
    fn events_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<CalendarEvent>;
}

// Meses hebraicos (Nisan = 1 ... Adar = 12, Adar II = 13)
pub const NISAN: u32 = 1;
pub const IYAR: u32 = 2;
pub const SIVAN: u32 = 3;
pub const AV: u32 = 5;
pub const TISHRI: u32 = 7;
pub const KISLEV: u32 = 9;
pub const TEVET: u32 = 10;
pub const SHVAT: u32 = 11;
pub const ADAR: u32 = 12;
pub const ADAR_II: u32 = 13;

const HEBREW_EPOCH: i64 = -1_373_427;

/// Calendário hebraico com o calendário de feriados de Israel.
#[derive(Debug, Clone, Copy, Default)]
pub struct HebrewCalendar;

impl HebrewCalendar {
    pub fn new() -> Self {
        Self
    }

    pub fn is_leap_year(year: i64) -> bool {
        (7 * year + 1).rem_euclid(19) < 7
    }

    fn last_month(year: i64) -> u32 {
        if Self::is_leap_year(year) { ADAR_II } else { ADAR }
    }

    fn elapsed_days(year: i64) -> i64 {
        let months = (235 * year - 234).div_euclid(19);
        let parts = 12_084 + 13_753 * months;
        let day = 29 * months + parts.div_euclid(25_920);
        if (3 * (day + 1)).rem_euclid(7) < 3 { day + 1 } else { day }
    }

    fn year_length_correction(year: i64) -> i64 {
        let ny0 = Self::elapsed_days(year - 1);
        let ny1 = Self::elapsed_days(year);
        let ny2 = Self::elapsed_days(year + 1);
        if ny2 - ny1 == 356 {
            2
        } else if ny1 - ny0 == 382 {
            1
        } else {
            0
        }
    }

    /// R.D. de 1 Tishri do ano.
    fn new_year(year: i64) -> i64 {
        HEBREW_EPOCH + Self::elapsed_days(year) + Self::year_length_correction(year)
    }

    pub fn days_in_year(year: i64) -> i64 {
        Self::new_year(year + 1) - Self::new_year(year)
    }

    fn days_in_month(month: u32, year: i64) -> i64 {
        let short = match month {
            2 | 4 | 6 | 10 | ADAR_II => true,
            ADAR => !Self::is_leap_year(year),
            // Cheshvan longo só em anos "completos"
            8 => Self::days_in_year(year) % 10 != 5,
            // Kislev curto só em anos "deficientes"
            9 => Self::days_in_year(year) % 10 == 3,
            _ => false,
        };
        if short { 29 } else { 30 }
    }

    fn to_fixed(year: i64, month: u32, day: u32) -> i64 {
        let mut days = Self::new_year(year) + i64::from(day) - 1;
        if month < TISHRI {
            for m in TISHRI..=Self::last_month(year) {
                days += Self::days_in_month(m, year);
            }
            for m in NISAN..month {
                days += Self::days_in_month(m, year);
            }
        } else {
            for m in TISHRI..month {
                days += Self::days_in_month(m, year);
            }
        }
        days
    }

    /// Data gregoriana de um dia hebraico. `None` só fora do alcance do chrono.
    pub fn to_gregorian(year: i64, month: u32, day: u32) -> Option<NaiveDate> {
        let fixed = Self::to_fixed(year, month, day);
        i32::try_from(fixed)
            .ok()
            .and_then(NaiveDate::from_num_days_from_ce_opt)
    }

    /// Ano hebraico cujo Rosh Hashana cai no outono do ano gregoriano dado.
    pub fn year_starting_in(gregorian_year: i32) -> i64 {
        i64::from(gregorian_year) + 3761
    }

    /// Todos os feriados de um ano hebraico (Tishri a Elul).
    pub fn holidays_of_year(year: i64) -> Vec<CalendarEvent> {
        let mut events = Vec::new();
        let mut push = |name: &'static str, date: Option<NaiveDate>| {
            if let Some(date) = date {
                events.push(CalendarEvent { name, date });
            }
        };
        let on = |month: u32, day: u32| Self::to_gregorian(year, month, day);

        // --- Tishri ---
        push("Rosh Hashana", on(TISHRI, 1));
        push("Rosh Hashana II", on(TISHRI, 2));
        push("Yom Kippur", on(TISHRI, 10));
        push("Sukkot I", on(TISHRI, 15));
        push("Sukkot II (CH''M)", on(TISHRI, 16));
        push("Sukkot III (CH''M)", on(TISHRI, 17));
        push("Sukkot IV (CH''M)", on(TISHRI, 18));
        push("Sukkot V (CH''M)", on(TISHRI, 19));
        push("Sukkot VI (CH''M)", on(TISHRI, 20));
        push("Sukkot VII (Hoshana Raba)", on(TISHRI, 21));
        push("Shmini Atzeret", on(TISHRI, 22));

        // --- Chanukah (atravessa Kislev/Tevet) ---
        const CHANUKAH: [&str; 8] = [
            "Chanukah: 1 Candle",
            "Chanukah: 2 Candles",
            "Chanukah: 3 Candles",
            "Chanukah: 4 Candles",
            "Chanukah: 5 Candles",
            "Chanukah: 6 Candles",
            "Chanukah: 7 Candles",
            "Chanukah: 8 Candles",
        ];
        if let Some(first) = on(KISLEV, 25) {
            for (offset, name) in CHANUKAH.into_iter().enumerate() {
                push(name, first.checked_add_days(chrono::Days::new(offset as u64)));
            }
        }

        push("Asara B'Tevet", on(TEVET, 10));
        push("Tu BiShvat", on(SHVAT, 15));

        // --- Adar (Adar II em ano embolismal) ---
        let adar = Self::last_month(year);
        let esther = match on(adar, 13) {
            Some(d) if d.weekday() == Weekday::Sat => on(adar, 11),
            other => other,
        };
        push("Ta'anit Esther", esther);
        push("Purim", on(adar, 14));
        push("Shushan Purim", on(adar, 15));

        // --- Nisan ---
        push("Pesach I", on(NISAN, 15));
        push("Pesach II (CH''M)", on(NISAN, 16));
        push("Pesach III (CH''M)", on(NISAN, 17));
        push("Pesach IV (CH''M)", on(NISAN, 18));
        push("Pesach V (CH''M)", on(NISAN, 19));
        push("Pesach VI (CH''M)", on(NISAN, 20));
        push("Pesach VII", on(NISAN, 21));

        let shoah = match on(NISAN, 27) {
            Some(d) if d.weekday() == Weekday::Fri => on(NISAN, 26),
            Some(d) if d.weekday() == Weekday::Sun => on(NISAN, 28),
            other => other,
        };
        push("Yom HaShoah", shoah);

        // --- Iyar: Zikaron/Atzmaut nunca encostam no Shabbat ---
        let atzmaut = match on(IYAR, 5) {
            Some(d) if d.weekday() == Weekday::Fri => on(IYAR, 4),
            Some(d) if d.weekday() == Weekday::Sat => on(IYAR, 3),
            Some(d) if d.weekday() == Weekday::Mon => on(IYAR, 6),
            other => other,
        };
        push("Yom HaZikaron", atzmaut.and_then(|d| d.pred_opt()));
        push("Yom HaAtzma'ut", atzmaut);
        push("Lag BaOmer", on(IYAR, 18));
        push("Yom Yerushalayim", on(IYAR, 28));

        push("Shavuot", on(SIVAN, 6));

        let tisha_bav = match on(AV, 9) {
            Some(d) if d.weekday() == Weekday::Sat => on(AV, 10),
            other => other,
        };
        push("Tish'a B'Av", tisha_bav);

        events
    }
}

impl CalendarEngine for HebrewCalendar {
    fn events_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<CalendarEvent> {
        if end < start {
            return Vec::new();
        }

        // O ano hebraico que começou no outono anterior cobre janeiro-setembro
        let first = Self::year_starting_in(start.year()) - 1;
        let last = Self::year_starting_in(end.year());

        let mut events: Vec<CalendarEvent> = (first..=last)
            .flat_map(Self::holidays_of_year)
            .filter(|e| e.date >= start && e.date <= end)
            .collect();
        events.sort_by_key(|e| e.date);
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn find(year: i64, name: &str) -> NaiveDate {
        HebrewCalendar::holidays_of_year(year)
            .into_iter()
            .find(|e| e.name == name)
            .map(|e| e.date)
            .unwrap_or_else(|| panic!("{name} ausente em {year}"))
    }

    #[test]
    fn rosh_hashana_dates() {
        assert_eq!(find(5785, "Rosh Hashana"), ymd(2024, 10, 3));
        assert_eq!(find(5786, "Rosh Hashana"), ymd(2025, 9, 23));
        assert_eq!(find(5787, "Rosh Hashana"), ymd(2026, 9, 12));
    }

    #[test]
    fn year_5786_holidays() {
        assert_eq!(find(5786, "Yom Kippur"), ymd(2025, 10, 2));
        assert_eq!(find(5786, "Chanukah: 1 Candle"), ymd(2025, 12, 15));
        assert_eq!(find(5786, "Chanukah: 8 Candles"), ymd(2025, 12, 22));
        assert_eq!(find(5786, "Purim"), ymd(2026, 3, 3));
        assert_eq!(find(5786, "Pesach I"), ymd(2026, 4, 2));
        assert_eq!(find(5786, "Shavuot"), ymd(2026, 5, 22));
    }

    #[test]
    fn purim_falls_in_adar_ii_of_leap_years() {
        assert!(HebrewCalendar::is_leap_year(5784));
        assert!(!HebrewCalendar::is_leap_year(5785));
        assert_eq!(find(5784, "Purim"), ymd(2024, 3, 24));
        assert_eq!(find(5785, "Purim"), ymd(2025, 3, 14));
    }

    #[test]
    fn independence_day_moves_away_from_weekend_and_monday() {
        // 5 Iyar numa quarta: sem mudança
        assert_eq!(find(5786, "Yom HaAtzma'ut"), ymd(2026, 4, 22));
        assert_eq!(find(5786, "Yom HaZikaron"), ymd(2026, 4, 21));
        // 5 Iyar num sábado -> quinta
        assert_eq!(find(5785, "Yom HaAtzma'ut"), ymd(2025, 5, 1));
        assert_eq!(find(5785, "Yom HaZikaron"), ymd(2025, 4, 30));
        // 5 Iyar numa segunda -> terça
        assert_eq!(find(5784, "Yom HaAtzma'ut"), ymd(2024, 5, 14));
    }

    #[test]
    fn year_lengths_are_valid() {
        for year in 5700..5900 {
            let len = HebrewCalendar::days_in_year(year);
            assert!(
                [353, 354, 355, 383, 384, 385].contains(&len),
                "ano {year} com {len} dias"
            );
        }
    }

    #[test]
    fn events_between_is_sorted_and_bounded() {
        let engine = HebrewCalendar::new();
        let events = engine.events_between(ymd(2025, 9, 1), ymd(2025, 10, 31));

        assert!(events.windows(2).all(|w| w[0].date <= w[1].date));
        assert!(events.iter().all(|e| e.date.month() >= 9 && e.date.year() == 2025));
        assert_eq!(events.first().map(|e| e.name), Some("Rosh Hashana"));
    }
}
