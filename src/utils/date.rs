use chrono::{Local, NaiveDate};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// YYYY-MM-DD → DD/MM/YYYY. Anything unparsable is returned unchanged.
pub fn to_br_date(iso: &str) -> String {
    match parse_date(iso.trim()) {
        Some(d) => d.format("%d/%m/%Y").to_string(),
        None => iso.to_string(),
    }
}

/// DD/MM/YYYY → YYYY-MM-DD. Anything unparsable is returned unchanged.
pub fn from_br_date(br: &str) -> String {
    match NaiveDate::parse_from_str(br.trim(), "%d/%m/%Y") {
        Ok(d) => d.format("%Y-%m-%d").to_string(),
        Err(_) => br.to_string(),
    }
}

/// Current local time in ISO 8601.
pub fn now_rfc3339() -> String {
    Local::now().to_rfc3339()
}

/// Millisecond timestamp used as a locally generated record id.
pub fn now_millis_id() -> String {
    Local::now().timestamp_millis().to_string()
}
