// src/services/event_catalog.rs

use chrono::NaiveDate;

use crate::models::event::{CatalogEntry, EventCategory};

pub const FALLBACK_ICON: &str = "📅";

const fn entry(
    id: &'static str,
    name: &'static str,
    icon: &'static str,
    category: EventCategory,
    estimated: Option<(u32, u32)>,
) -> CatalogEntry {
    let (estimated_month, estimated_day) = match estimated {
        Some((month, day)) => (Some(month), Some(day)),
        None => (None, None),
    };
    CatalogEntry { id, name, icon, category, estimated_month, estimated_day }
}

// Eventos oferecidos no wizard de abertura da turma.
// A data é uma estimativa fixa dentro do ano letivo (a real é editável depois).
static CATALOG: &[CatalogEntry] = &[
    entry("rosh_hashana", "ראש השנה", "🍎", EventCategory::Holiday, Some((9, 20))),
    entry("sukkot", "סוכות", "🌿", EventCategory::Holiday, Some((10, 5))),
    entry("hanukkah", "חנוכה", "🕎", EventCategory::Holiday, Some((12, 20))),
    entry("tu_bishvat", "ט״ו בשבט", "🌳", EventCategory::Holiday, Some((2, 1))),
    entry("purim", "פורים", "🎭", EventCategory::Holiday, Some((3, 10))),
    entry("passover", "פסח", "🍷", EventCategory::Holiday, Some((4, 10))),
    entry("independence_day", "יום העצמאות", "🇮🇱", EventCategory::Holiday, Some((5, 1))),
    entry("lag_baomer", "ל״ג בעומר", "🔥", EventCategory::Holiday, Some((5, 15))),
    entry("shavuot", "שבועות", "🌾", EventCategory::Holiday, Some((6, 1))),
    entry("end_of_year", "מסיבת סוף שנה", "🎓", EventCategory::Party, Some((6, 25))),
    entry("birthdays", "ימי הולדת", "🎂", EventCategory::Birthday, None),
    entry("teacher_gifts", "מתנות לצוות", "🎁", EventCategory::Gift, Some((6, 20))),
    entry("school_trip", "טיול", "🚌", EventCategory::Trip, None),
];

pub fn catalog() -> &'static [CatalogEntry] {
    CATALOG
}

pub fn lookup(event_type: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.id == event_type)
}

/// Ícone fixo do tipo de evento; tipos desconhecidos recebem `📅`.
pub fn get_event_icon(event_type: &str) -> &'static str {
    lookup(event_type).map(|e| e.icon).unwrap_or(FALLBACK_ICON)
}

pub fn get_event_category(event_type: &str) -> EventCategory {
    lookup(event_type).map(|e| e.category).unwrap_or(EventCategory::Other)
}

/// Data estimada do evento no ano letivo que começa em `school_year`.
/// Setembro-dezembro caem no próprio ano; janeiro-agosto no seguinte.
pub fn estimated_date(event_type: &str, school_year: i32) -> Option<NaiveDate> {
    let entry = lookup(event_type)?;
    let (month, day) = (entry.estimated_month?, entry.estimated_day?);
    let year = if month >= 9 { school_year } else { school_year + 1 };
    NaiveDate::from_ymd_opt(year, month, day)
}
