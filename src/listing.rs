// 🎉 Listing - table rows with the birthday-of-the-month marker
// Derived on every refresh, never persisted

use crate::record::CollaboratorRecord;
use crate::validation::parse_date;
use chrono::{Datelike, Local};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub name: String,
    pub birth_date: String,
    pub payment_date: String,
    pub paid_label: &'static str,
    pub birthday_this_month: bool,
}

/// Calendar month (1-12) of the local clock.
pub fn current_month() -> u32 {
    Local::now().month()
}

/// True when the birth date parses and falls in `month`.
pub fn is_birthday_month(record: &CollaboratorRecord, month: u32) -> bool {
    parse_date(&record.birth_date)
        .map(|date| date.month() == month)
        .unwrap_or(false)
}

pub fn build_listing(records: &[CollaboratorRecord], month: u32) -> Vec<ListingRow> {
    records
        .iter()
        .map(|record| ListingRow {
            name: record.name.clone(),
            birth_date: record.birth_date.clone(),
            payment_date: record.payment_date.clone(),
            paid_label: record.paid_label(),
            birthday_this_month: is_birthday_month(record, month),
        })
        .collect()
}
