mod common;

use common::{
    StubServer, client_with, client_with_timeout, complete_draft, silent_server, unreachable_url,
};
use rhtlogger::config::Endpoint;
use rhtlogger::errors::AppError;
use rhtlogger::models::employee::{EmployeeRecord, NewEmployee};
use std::time::Duration;

fn ana() -> EmployeeRecord {
    EmployeeRecord {
        id: "7".into(),
        name: "Ana Souza".into(),
        matricula: "001".into(),
        birth_date: "1990-03-15".into(),
        created_at: String::new(),
        updated_at: None,
    }
}

#[test]
fn submit_accepts_boolean_and_string_sentinels() {
    let stub = StubServer::start(vec![(200, r#"{"RHT": true}"#), (200, r#"[{"RHT": "True"}]"#)]);
    let client = client_with(&[(Endpoint::SubmitHours, stub.url("/rht"))]);

    client.submit_hours(&complete_draft()).expect("boolean sentinel");
    client.submit_hours(&complete_draft()).expect("string sentinel");
    assert_eq!(stub.finish().len(), 2);
}

#[test]
fn submit_posts_the_upper_case_payload() {
    let stub = StubServer::start(vec![(200, r#"{"RHT": true}"#)]);
    let client = client_with(&[(Endpoint::SubmitHours, stub.url("/webhook/rht"))]);
    client.submit_hours(&complete_draft()).unwrap();

    let reqs = stub.finish();
    assert_eq!(reqs[0].method, "POST");
    assert_eq!(reqs[0].path, "/webhook/rht");

    let body: serde_json::Value = serde_json::from_str(&reqs[0].body).unwrap();
    assert_eq!(body["OPERADOR_NOME"], "Ana Souza");
    assert_eq!(body["OPERADOR_MATRICULA"], "001");
    assert_eq!(body["RA"], "IV");
    assert_eq!(body["HORA_FINAL"], "11:45");
    assert_eq!(body["TOTAL_SERVICO"], "6.0");
    assert_eq!(body["SEVICO_REALIZADO"], "gradagem");
    assert_eq!(body.as_object().map(|o| o.len()), Some(16));
}

#[test]
fn rht_false_is_a_business_rule_failure() {
    let stub = StubServer::start(vec![(200, r#"{"RHT": false}"#)]);
    let client = client_with(&[(Endpoint::SubmitHours, stub.url("/rht"))]);

    let err = client.submit_hours(&complete_draft()).unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)), "got {err:?}");
    assert_eq!(err.to_string(), "A API retornou falha no registro (RHT: false)");
}

#[test]
fn http_500_is_an_http_error() {
    let stub = StubServer::start(vec![(500, r#"{"RHT": true}"#)]);
    let client = client_with(&[(Endpoint::SubmitHours, stub.url("/rht"))]);

    let err = client.submit_hours(&complete_draft()).unwrap_err();
    match err {
        AppError::Http { status, .. } => assert_eq!(status, 500),
        other => panic!("expected HTTP error, got {other:?}"),
    }
}

#[test]
fn unreachable_endpoint_is_a_network_error() {
    let client = client_with(&[(Endpoint::SubmitHours, unreachable_url())]);

    let err = client.submit_hours(&complete_draft()).unwrap_err();
    assert!(matches!(err, AppError::Network(_)), "got {err:?}");
    assert!(err.to_string().contains("Verifique sua internet"));
}

#[test]
fn silent_endpoint_times_out() {
    let client = client_with_timeout(
        &[(Endpoint::SubmitHours, silent_server())],
        Duration::from_millis(300),
    );

    let err = client.submit_hours(&complete_draft()).unwrap_err();
    assert!(matches!(err, AppError::Timeout(_)), "got {err:?}");
}

#[test]
fn missing_endpoint_fails_before_any_request() {
    let client = client_with(&[]);

    let err = client.submit_hours(&complete_draft()).unwrap_err();
    assert!(matches!(err, AppError::Configuration("submit_hours", "RHT_SUBMIT_HOURS_URL")));
    assert!(err.is_configuration());
}

#[test]
fn blank_endpoint_counts_as_missing() {
    let client = client_with(&[(Endpoint::ListEmployees, "   ".into())]);
    assert!(client.list_employees().unwrap_err().is_configuration());
}

#[test]
fn malformed_body_is_a_parse_error() {
    let stub = StubServer::start(vec![(200, "<html>oops</html>"), (200, r#"{"ok": 1}"#)]);
    let client = client_with(&[(Endpoint::SubmitHours, stub.url("/rht"))]);

    let err = client.submit_hours(&complete_draft()).unwrap_err();
    assert!(matches!(err, AppError::Parse(_)), "got {err:?}");

    // well-formed but without the flag
    let err = client.submit_hours(&complete_draft()).unwrap_err();
    assert!(matches!(err, AppError::Parse(_)), "got {err:?}");
}

#[test]
fn delete_false_string_is_a_business_rule_failure() {
    let stub = StubServer::start(vec![(200, r#"{"delete": "False"}"#)]);
    let client = client_with(&[(Endpoint::DeleteEmployee, stub.url("/del"))]);

    let err = client.delete_employee(&ana()).unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)), "got {err:?}");

    let reqs = stub.finish();
    let body: serde_json::Value = serde_json::from_str(&reqs[0].body).unwrap();
    assert_eq!(body["nomeCompleto"], "Ana Souza");
    assert_eq!(body["data_nascimento"], "15/03/1990");
}

#[test]
fn register_employee_accepts_an_opaque_or_empty_answer() {
    let stub = StubServer::start(vec![
        (200, r#"{"success": "True", "id": 42, "row": 3}"#),
        (200, ""),
    ]);
    let client = client_with(&[(Endpoint::RegisterEmployee, stub.url("/emp"))]);
    let new = NewEmployee::new("Bia Lima", "002", "1992-07-01").unwrap();

    let resp = client.register_employee(&new).unwrap();
    assert_eq!(resp.id.as_deref(), Some("42"));
    assert!(resp.extra.contains_key("row"));

    let resp = client.register_employee(&new).unwrap();
    assert!(resp.id.is_none());

    let reqs = stub.finish();
    let body: serde_json::Value = serde_json::from_str(&reqs[0].body).unwrap();
    assert_eq!(body["matricula"], "002");
    assert_eq!(body["data_nascimento"], "01/07/1992");
}

#[test]
fn list_employees_maps_remote_rows() {
    let stub = StubServer::start(vec![
        (
            200,
            r#"[{"NOME":"Ana Souza","MATRICULA":1,"DATA_NASCIMENTO":"15/03/1990","id":7,"createdAt":"2025-01-01"}]"#,
        ),
        (200, "[]"),
    ]);
    let client = client_with(&[(Endpoint::ListEmployees, stub.url("/list"))]);

    let list = client.list_employees().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].name, "Ana Souza");
    assert_eq!(list[0].matricula, "1");
    assert_eq!(list[0].id, "7");
    assert_eq!(list[0].birth_date, "1990-03-15");

    assert!(client.list_employees().unwrap().is_empty());
    assert_eq!(stub.finish()[0].method, "GET");
}

#[test]
fn hours_by_employee_treats_empty_body_as_no_records() {
    let stub = StubServer::start(vec![(200, ""), (200, r#"{"OPERADOR_NOME":"Ana","DATA":"2025-11-04","TOTAL_SERVICO":6}"#)]);
    let client = client_with(&[(Endpoint::HoursByEmployee, stub.url("/hours"))]);

    assert!(client.hours_by_employee(" Ana ", "001").unwrap().is_empty());

    let one = client.hours_by_employee("Ana", "001").unwrap();
    assert_eq!(one.len(), 1);
    assert_eq!(one[0].fields.total_servico, "6");

    let reqs = stub.finish();
    let body: serde_json::Value = serde_json::from_str(&reqs[0].body).unwrap();
    assert_eq!(body["OPERADOR_NOME"], "Ana");
    assert_eq!(body["OPERADOR_MATRICULA"], "001");
}

#[test]
fn global_history_parses_rows_with_extra_columns() {
    let stub = StubServer::start(vec![(
        200,
        r#"[{"row_number":2,"id":"a1","OPERADOR_NOME":"Bia","LOCAL_SERVICO":"Sítio","DATA":"2025-11-03","ABASTECIMENTO":null}]"#,
    )]);
    let client = client_with(&[(Endpoint::GlobalHistory, stub.url("/history"))]);

    let rows = client.global_history().unwrap();
    assert_eq!(rows[0].id.as_deref(), Some("a1"));
    assert_eq!(rows[0].fields.local_servico, "Sítio");
    assert_eq!(rows[0].fields.abastecimento, "");
}
