//! Date rendering used across the dashboards, always in the viewer's offset.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc, Weekday};

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

pub fn month_name_es(month: u32) -> &'static str {
    MONTHS_ES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("")
}

pub fn weekday_name_es(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "lunes",
        Weekday::Tue => "martes",
        Weekday::Wed => "miércoles",
        Weekday::Thu => "jueves",
        Weekday::Fri => "viernes",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

/// `dd/MM/yy`
pub fn format_short_date(value: &DateTime<Utc>, offset: &FixedOffset) -> String {
    value.with_timezone(offset).format("%d/%m/%y").to_string()
}

/// `dd/MM/yyyy`
pub fn format_long_date(value: &DateTime<Utc>, offset: &FixedOffset) -> String {
    value.with_timezone(offset).format("%d/%m/%Y").to_string()
}

/// `dd/MM/yyyy HH:mm`
pub fn format_date_time(value: &DateTime<Utc>, offset: &FixedOffset) -> String {
    value.with_timezone(offset).format("%d/%m/%Y %H:%M").to_string()
}

/// `dd/MM/yyyy HH:mm:ss`
pub fn format_full_date_time(value: &DateTime<Utc>, offset: &FixedOffset) -> String {
    value.with_timezone(offset).format("%d/%m/%Y %H:%M:%S").to_string()
}

/// `HH:mm`
pub fn format_time(value: &DateTime<Utc>, offset: &FixedOffset) -> String {
    value.with_timezone(offset).format("%H:%M").to_string()
}

/// e.g. "lunes 15 octubre"
pub fn format_day_month(value: &DateTime<Utc>, offset: &FixedOffset) -> String {
    format_day_month_date(value.with_timezone(offset).date_naive())
}

pub fn format_day_month_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        weekday_name_es(date.weekday()),
        date.day(),
        month_name_es(date.month())
    )
}

/// e.g. "octubre de 2025"
pub fn format_month_year(year: i32, month: u32) -> String {
    format!("{} de {}", month_name_es(month), year)
}
