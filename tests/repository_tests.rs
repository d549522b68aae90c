mod common;

use common::{StubServer, client_with, complete_draft, setup_test_store, unreachable_url};
use rhtlogger::config::Endpoint;
use rhtlogger::db::store::{KEY_EMPLOYEES, KEY_HOURS_BACKUP, LocalStore};
use rhtlogger::errors::AppError;
use rhtlogger::models::draft::DraftField;
use rhtlogger::models::employee::{EmployeeRecord, NewEmployee};
use rhtlogger::models::hours::BackupRecord;
use rhtlogger::repository::{
    EmployeeRepository, HoursRepository, RemoteEmployeeRepository, RemoteHoursRepository,
};

fn employee(id: &str, name: &str, matricula: &str) -> EmployeeRecord {
    EmployeeRecord {
        id: id.into(),
        name: name.into(),
        matricula: matricula.into(),
        birth_date: "1990-01-01".into(),
        created_at: "2025-01-01T00:00:00Z".into(),
        updated_at: None,
    }
}

#[test]
fn rejected_delete_keeps_the_roster_mirror() {
    let store = LocalStore::in_memory().unwrap();
    let roster = vec![employee("1", "Ana", "001"), employee("2", "Bia", "002")];
    store.write_list(KEY_EMPLOYEES, &roster).unwrap();

    let stub = StubServer::start(vec![(200, r#"{"delete": "False"}"#)]);
    let client = client_with(&[(Endpoint::DeleteEmployee, stub.url("/del"))]);
    let repo = RemoteEmployeeRepository::new(&client, &store);

    let err = repo.delete(&roster[0]).unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));
    assert_eq!(repo.cached(), roster);
}

#[test]
fn accepted_delete_removes_only_that_employee() {
    let store = LocalStore::in_memory().unwrap();
    let roster = vec![employee("1", "Ana", "001"), employee("2", "Bia", "002")];
    store.write_list(KEY_EMPLOYEES, &roster).unwrap();

    let stub = StubServer::start(vec![(200, r#"{"delete": "True"}"#)]);
    let client = client_with(&[(Endpoint::DeleteEmployee, stub.url("/del"))]);
    let repo = RemoteEmployeeRepository::new(&client, &store);

    repo.delete(&roster[0]).unwrap();
    assert_eq!(repo.cached(), vec![roster[1].clone()]);
}

#[test]
fn list_refreshes_the_mirror_and_falls_back_when_unconfigured() {
    let store = LocalStore::in_memory().unwrap();
    let stub = StubServer::start(vec![(
        200,
        r#"[{"NOME":"Ana","MATRICULA":"001","DATA_NASCIMENTO":"01/01/1990","id":"1"}]"#,
    )]);
    let client = client_with(&[(Endpoint::ListEmployees, stub.url("/list"))]);
    let repo = RemoteEmployeeRepository::new(&client, &store);
    assert_eq!(repo.list().unwrap().len(), 1);

    let offline = client_with(&[]);
    let cached = RemoteEmployeeRepository::new(&offline, &store).list().unwrap();
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].name, "Ana");
}

#[test]
fn list_does_not_hide_network_failures() {
    let store = LocalStore::in_memory().unwrap();
    let client = client_with(&[(Endpoint::ListEmployees, unreachable_url())]);
    let repo = RemoteEmployeeRepository::new(&client, &store);
    assert!(matches!(repo.list(), Err(AppError::Network(_))));
}

#[test]
fn register_appends_to_the_mirror_with_the_remote_id() {
    let store = LocalStore::in_memory().unwrap();
    let stub = StubServer::start(vec![(200, r#"{"id": 99}"#)]);
    let client = client_with(&[(Endpoint::RegisterEmployee, stub.url("/emp"))]);
    let repo = RemoteEmployeeRepository::new(&client, &store);

    let new = NewEmployee::new("Carla Dias", "003", "1988-09-30").unwrap();
    let record = repo.register(&new).unwrap();
    assert_eq!(record.id, "99");
    assert_eq!(repo.cached(), vec![record]);
}

#[test]
fn accepted_changes_survive_a_broken_mirror() {
    let store = LocalStore::in_memory().unwrap();
    store.conn().execute_batch("DROP TABLE kv").unwrap();

    let stub = StubServer::start(vec![
        (200, r#"{"id": 7}"#),
        (200, r#"{"delete": "True"}"#),
        (200, r#"{"RHT": true}"#),
    ]);
    let client = client_with(&[
        (Endpoint::RegisterEmployee, stub.url("/emp")),
        (Endpoint::DeleteEmployee, stub.url("/del")),
        (Endpoint::SubmitHours, stub.url("/rht")),
    ]);
    let employees = RemoteEmployeeRepository::new(&client, &store);

    let new = NewEmployee::new("Davi Rocha", "004", "1991-02-14").unwrap();
    let record = employees.register(&new).unwrap();
    assert_eq!(record.id, "7");
    employees.delete(&record).unwrap();
    assert!(employees.cached().is_empty());

    let hours = RemoteHoursRepository::new(&client, &store);
    assert!(hours.submit(&complete_draft()).unwrap().rht_status);
    assert!(hours.backups().is_empty());
    assert_eq!(stub.finish().len(), 3);
}

#[test]
fn submitted_draft_round_trips_through_the_backup() {
    let store = LocalStore::in_memory().unwrap();
    let stub = StubServer::start(vec![(200, r#"{"RHT": true}"#)]);
    let client = client_with(&[(Endpoint::SubmitHours, stub.url("/rht"))]);
    let repo = RemoteHoursRepository::new(&client, &store);

    let draft = complete_draft();
    let saved = repo.submit(&draft).unwrap();
    assert!(saved.rht_status);

    let backups = repo.backups();
    assert_eq!(backups.len(), 1);
    assert_eq!(backups[0].draft, draft);
    for field in DraftField::ALL {
        assert_eq!(backups[0].draft.value(field), draft.value(field), "{}", field.key());
    }
}

#[test]
fn failed_submit_writes_no_backup() {
    let store = LocalStore::in_memory().unwrap();
    let stub = StubServer::start(vec![(200, r#"{"RHT": false}"#), (500, "")]);
    let client = client_with(&[(Endpoint::SubmitHours, stub.url("/rht"))]);
    let repo = RemoteHoursRepository::new(&client, &store);

    assert!(matches!(repo.submit(&complete_draft()), Err(AppError::BusinessRule(_))));
    assert!(matches!(repo.submit(&complete_draft()), Err(AppError::Http { status: 500, .. })));
    assert!(repo.backups().is_empty());
}

#[test]
fn history_reads_the_backup_when_unconfigured() {
    let store = LocalStore::in_memory().unwrap();
    let stub = StubServer::start(vec![(200, r#"{"RHT": true}"#)]);
    let client = client_with(&[(Endpoint::SubmitHours, stub.url("/rht"))]);
    let repo = RemoteHoursRepository::new(&client, &store);
    repo.submit(&complete_draft()).unwrap();

    let history = repo.history().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].fields.operador_nome, "Ana Souza");
    assert_eq!(history[0].fields.sevico_realizado, "gradagem");
}

#[test]
fn corrupt_backup_reads_as_empty() {
    let store = LocalStore::in_memory().unwrap();
    store.put(KEY_HOURS_BACKUP, &"not a list").unwrap();
    assert!(store.read_list::<BackupRecord>(KEY_HOURS_BACKUP).is_empty());
}

#[test]
fn interleaved_appends_lose_an_update() {
    let path = setup_test_store("lost_update");
    let a = LocalStore::open(&path).unwrap();
    let b = LocalStore::open(&path).unwrap();

    // both handles read the same snapshot before either writes
    let mut seen_by_a: Vec<String> = a.read_list("ids");
    let mut seen_by_b: Vec<String> = b.read_list("ids");
    seen_by_a.push("from-a".into());
    seen_by_b.push("from-b".into());
    a.write_list("ids", &seen_by_a).unwrap();
    b.write_list("ids", &seen_by_b).unwrap();

    let stored: Vec<String> = a.read_list("ids");
    assert_eq!(stored, vec!["from-b".to_string()]);

    // sequential appends keep both
    a.append("ids", "again-a".to_string()).unwrap();
    b.append("ids", "again-b".to_string()).unwrap();
    let stored: Vec<String> = a.read_list("ids");
    assert_eq!(stored, vec!["from-b", "again-a", "again-b"]);
}
