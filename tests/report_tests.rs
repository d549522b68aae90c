use chrono::NaiveDate;
use rhtlogger::core::report::{WeeklyReport, record_hours, week_range};
use rhtlogger::models::hours::{HoursFields, HoursRecord};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn record(matricula: &str, date: &str, end: &str, total: &str, services: &str) -> HoursRecord {
    HoursRecord {
        id: None,
        fields: HoursFields {
            operador_nome: "Ana Souza".into(),
            operador_matricula: matricula.into(),
            local_servico: "Sítio Boa Vista".into(),
            data: date.into(),
            hora_final: end.into(),
            total_servico: total.into(),
            sevico_realizado: services.into(),
            ..Default::default()
        },
        created_at: None,
    }
}

#[test]
fn week_starts_on_monday() {
    // Wednesday
    assert_eq!(week_range(day(2025, 11, 5), 0), (day(2025, 11, 3), day(2025, 11, 9)));
    // Sunday still belongs to the week that started six days before
    assert_eq!(week_range(day(2025, 11, 9), 0), (day(2025, 11, 3), day(2025, 11, 9)));
    assert_eq!(week_range(day(2025, 11, 3), 0).0, day(2025, 11, 3));
}

#[test]
fn offset_moves_whole_weeks() {
    assert_eq!(week_range(day(2025, 11, 5), -1), (day(2025, 10, 27), day(2025, 11, 2)));
    assert_eq!(week_range(day(2025, 1, 1), -1).0, day(2024, 12, 23));
}

#[test]
fn hours_accept_a_decimal_comma() {
    assert_eq!(record_hours(&record("001", "", "", "6,5", "")), 6.5);
    assert_eq!(record_hours(&record("001", "", "", " 4.0 ", "")), 4.0);
    assert_eq!(record_hours(&record("001", "", "", "seis", "")), 0.0);
    assert_eq!(record_hours(&record("001", "", "", "", "")), 0.0);
}

#[test]
fn report_groups_one_operator_by_weekday() {
    let records = vec![
        record("001", "2025-11-04", "11:45", "6.0", "gradagem"),
        record("001", "2025-11-04", "17:10", "2.5", "gradagem,aracao"),
        record("001", "2025-11-07", "", "3", "terreno_x"),
        // other operator, same week
        record("002", "2025-11-04", "12:00", "9.0", "rocagem"),
        // same operator, previous week
        record("001", "2025-10-31", "10:00", "5.0", "plantio"),
        // unreadable date
        record("001", "04/11/2025", "10:00", "5.0", "plantio"),
    ];

    let report = WeeklyReport::build(&records, "001", day(2025, 11, 3));
    assert_eq!(report.entries, 3);
    assert_eq!(report.total, 11.5);
    assert_eq!(report.name.as_deref(), Some("Ana Souza"));
    assert_eq!(report.period_label(), "03/11/2025 a 09/11/2025");
    assert_eq!(report.days.len(), 7);

    let tuesday = &report.days[1];
    assert_eq!(tuesday.label, "Terça-feira");
    assert_eq!(tuesday.end_time.as_deref(), Some("17:10"));
    assert_eq!(tuesday.hours_label(), "8.5h");
    assert_eq!(tuesday.description(), "Gradagem; Aração");

    let friday = &report.days[4];
    assert_eq!(friday.end_time, None);
    assert_eq!(friday.description(), "terreno_x");

    let monday = &report.days[0];
    assert_eq!(monday.hours_label(), "-");
    assert_eq!(monday.description(), "-");
    assert_eq!(report.days[6].label, "Domingo");
    assert_eq!(report.days[6].date, day(2025, 11, 9));
}

#[test]
fn empty_week_still_knows_the_operator() {
    let records = vec![record("001", "2025-10-31", "10:00", "5.0", "plantio")];
    let report = WeeklyReport::build(&records, " 001 ", day(2025, 11, 3));
    assert!(report.is_empty());
    assert_eq!(report.total, 0.0);
    assert_eq!(report.name.as_deref(), Some("Ana Souza"));
    assert!(report.location.is_none());
    assert!(report.days.iter().all(|d| d.hours_label() == "-"));
}
