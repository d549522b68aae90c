//! Weekly timesheet of one operator, built from the registration history.

use crate::models::catalog::find_service;
use crate::models::hours::HoursRecord;
use crate::utils::date;
use chrono::{Datelike, Duration, NaiveDate};

pub const WEEK_DAYS: [&str; 7] = [
    "Segunda-feira",
    "Terça-feira",
    "Quarta-feira",
    "Quinta-feira",
    "Sexta-feira",
    "Sábado",
    "Domingo",
];

/// Monday and Sunday of the week containing `today`, moved by `offset`
/// weeks (negative means past weeks).
pub fn week_range(today: NaiveDate, offset: i64) -> (NaiveDate, NaiveDate) {
    let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
    let start = monday + Duration::weeks(offset);
    (start, start + Duration::days(6))
}

/// Machine hours of one record. Accepts a decimal comma; anything else
/// that does not parse counts as zero.
pub fn record_hours(record: &HoursRecord) -> f64 {
    record
        .fields
        .total_servico
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|h| h.is_finite())
        .unwrap_or(0.0)
}

pub fn format_hours(h: f64) -> String {
    format!("{h:.1}h")
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayRow {
    pub label: &'static str,
    pub date: NaiveDate,
    /// `HORA_FINAL` of the last record of the day.
    pub end_time: Option<String>,
    pub hours: f64,
    /// Unique service labels, in order of appearance.
    pub services: Vec<String>,
}

impl DayRow {
    pub fn hours_label(&self) -> String {
        if self.hours > 0.0 { format_hours(self.hours) } else { "-".into() }
    }

    pub fn description(&self) -> String {
        if self.services.is_empty() { "-".into() } else { self.services.join("; ") }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyReport {
    pub matricula: String,
    pub name: Option<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: Vec<DayRow>,
    pub total: f64,
    /// Location of the most recent record of the week.
    pub location: Option<String>,
    pub observations: Vec<String>,
    pub entries: usize,
}

impl WeeklyReport {
    /// Records of `matricula` whose `DATA` falls in the week starting at
    /// `start`. Records with an unreadable date are skipped.
    pub fn build(records: &[HoursRecord], matricula: &str, start: NaiveDate) -> Self {
        let matricula = matricula.trim();
        let end = start + Duration::days(6);

        let mut week: Vec<(NaiveDate, &HoursRecord)> = records
            .iter()
            .filter(|r| r.fields.operador_matricula.trim() == matricula)
            .filter_map(|r| date::parse_date(r.fields.data.trim()).map(|d| (d, r)))
            .filter(|(d, _)| *d >= start && *d <= end)
            .collect();
        week.sort_by_key(|(d, _)| *d);

        let name = records
            .iter()
            .filter(|r| r.fields.operador_matricula.trim() == matricula)
            .map(|r| r.fields.operador_nome.trim())
            .find(|n| !n.is_empty())
            .map(str::to_string);

        let days = WEEK_DAYS
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let day = start + Duration::days(i as i64);
                let entries: Vec<&HoursRecord> =
                    week.iter().filter(|(d, _)| *d == day).map(|(_, r)| *r).collect();
                day_row(label, day, &entries)
            })
            .collect();

        let location = week
            .last()
            .map(|(_, r)| r.fields.local_servico.trim().to_string())
            .filter(|l| !l.is_empty());
        let observations = week
            .iter()
            .map(|(_, r)| r.fields.observacao.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        Self {
            matricula: matricula.to_string(),
            name,
            start,
            end,
            days,
            total: week.iter().map(|(_, r)| record_hours(r)).sum(),
            location,
            observations,
            entries: week.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// "03/11/2025 a 09/11/2025"
    pub fn period_label(&self) -> String {
        format!("{} a {}", self.start.format("%d/%m/%Y"), self.end.format("%d/%m/%Y"))
    }
}

fn day_row(label: &'static str, date: NaiveDate, entries: &[&HoursRecord]) -> DayRow {
    let mut services: Vec<String> = Vec::new();
    for r in entries {
        for id in r.fields.sevico_realizado.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let label = find_service(id).map_or(id, |s| s.label).to_string();
            if !services.contains(&label) {
                services.push(label);
            }
        }
    }

    DayRow {
        label,
        date,
        end_time: entries
            .last()
            .map(|r| r.fields.hora_final.trim().to_string())
            .filter(|t| !t.is_empty()),
        hours: entries.iter().map(|r| record_hours(r)).sum(),
        services,
    }
}
