//! Spanish month and weekday names, as accepted by the count endpoints.
//!
//! Matching ignores case and accents, so `Miércoles`, `miercoles` and
//! `MIERCOLES` all resolve to Wednesday.

use chrono::Weekday;

const MONTHS: [(&str, u32); 13] = [
    ("enero", 1),
    ("febrero", 2),
    ("marzo", 3),
    ("abril", 4),
    ("mayo", 5),
    ("junio", 6),
    ("julio", 7),
    ("agosto", 8),
    ("septiembre", 9),
    ("setiembre", 9),
    ("octubre", 10),
    ("noviembre", 11),
    ("diciembre", 12),
];

const WEEKDAYS: [(&str, Weekday); 7] = [
    ("lunes", Weekday::Mon),
    ("martes", Weekday::Tue),
    ("miercoles", Weekday::Wed),
    ("jueves", Weekday::Thu),
    ("viernes", Weekday::Fri),
    ("sabado", Weekday::Sat),
    ("domingo", Weekday::Sun),
];

/// Month number (1-12) for a Spanish month name
pub fn month_from_name(name: &str) -> Option<u32> {
    let key = fold(name);
    MONTHS
        .iter()
        .find(|(month, _)| *month == key)
        .map(|&(_, number)| number)
}

/// Weekday for a Spanish day name
pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    let key = fold(name);
    WEEKDAYS
        .iter()
        .find(|(day, _)| *day == key)
        .map(|&(_, weekday)| weekday)
}

fn fold(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' | 'ü' => 'u',
            other => other,
        })
        .collect()
}
