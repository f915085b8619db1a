//! Calendar helpers: ages, birthdays and month windows.

use chrono::{Datelike, Months, NaiveDate, Utc};

const MONTH_ABBREVIATIONS_PT_BR: [&str; 12] = [
    "jan.", "fev.", "mar.", "abr.", "mai.", "jun.", "jul.", "ago.", "set.", "out.", "nov.", "dez.",
];

/// Current UTC date. Day boundaries everywhere are UTC midnight.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Age in whole years on `today` for someone born on `birth`.
///
/// The age increases on the birthday as given by [`birthday_in_year`], so
/// someone born on 29 February turns a year older on 28 February in
/// non-leap years.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let age = today.year() - birth.year();
    match birthday_in_year(birth, today.year()) {
        Some(birthday) if today < birthday => age - 1,
        _ => age,
    }
}

/// The date a birthday is celebrated in `year` (29 Feb falls back to 28 Feb).
pub fn birthday_in_year(birth: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, birth.month(), birth.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
}

/// Days from `today` until the next birthday (0 when it is today).
pub fn days_until_birthday(birth: NaiveDate, today: NaiveDate) -> Option<i64> {
    let this_year = birthday_in_year(birth, today.year())?;
    let next = if this_year >= today {
        this_year
    } else {
        birthday_in_year(birth, today.year() + 1)?
    };
    Some((next - today).num_days())
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// `[start, end)` bounds of the month `months_back` months before the one containing `today`.
pub fn month_window(today: NaiveDate, months_back: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = month_start(today).checked_sub_months(Months::new(months_back))?;
    let end = start.checked_add_months(Months::new(1))?;
    Some((start, end))
}

/// Short pt-BR month label, e.g. `out. de 2026`.
pub fn month_label_pt_br(date: NaiveDate) -> String {
    format!(
        "{} de {}",
        MONTH_ABBREVIATIONS_PT_BR[date.month0() as usize],
        date.year()
    )
}
