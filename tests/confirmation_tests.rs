mod common;

use common::complete_draft;
use rhtlogger::core::confirmation::{ConfirmationStep, SubmitStatus};
use chrono::NaiveDate;
use rhtlogger::core::wizard::{Transition, Wizard, WizardStep};
use rhtlogger::errors::{AppError, AppResult};
use rhtlogger::models::draft::{DraftField, RegistrationDraft, UnitOfMeasure};
use rhtlogger::models::hours::{BackupRecord, HoursRecord};
use rhtlogger::repository::HoursRepository;
use std::cell::RefCell;

/// Records submitted drafts; fails while `fail` is set.
struct FakeHours {
    fail: RefCell<Option<AppError>>,
    submitted: RefCell<Vec<RegistrationDraft>>,
}

impl FakeHours {
    fn ok() -> Self {
        Self {
            fail: RefCell::new(None),
            submitted: RefCell::new(Vec::new()),
        }
    }

    fn failing(e: AppError) -> Self {
        Self {
            fail: RefCell::new(Some(e)),
            submitted: RefCell::new(Vec::new()),
        }
    }
}

impl HoursRepository for FakeHours {
    fn submit(&self, draft: &RegistrationDraft) -> AppResult<BackupRecord> {
        if let Some(e) = self.fail.borrow_mut().take() {
            return Err(e);
        }
        self.submitted.borrow_mut().push(draft.clone());
        Ok(BackupRecord {
            id: "1".into(),
            draft: draft.clone(),
            created_at: "2025-11-04T12:00:00-03:00".into(),
            rht_status: true,
        })
    }

    fn by_employee(&self, _name: &str, _matricula: &str) -> AppResult<Vec<HoursRecord>> {
        Ok(Vec::new())
    }

    fn history(&self) -> AppResult<Vec<HoursRecord>> {
        Ok(Vec::new())
    }

    fn backups(&self) -> Vec<BackupRecord> {
        Vec::new()
    }
}

fn row_value(step: &ConfirmationStep, field: DraftField) -> String {
    step.review()
        .into_iter()
        .find(|r| r.field == field)
        .map(|r| r.value)
        .expect("row present")
}

#[test]
fn review_lists_every_field_grouped_by_step() {
    let step = ConfirmationStep::new(complete_draft());
    let rows = step.review();
    assert_eq!(rows.len(), DraftField::ALL.len());
    assert_eq!(rows[0].section, WizardStep::PersonalInfo.title());
    assert_eq!(rows.last().map(|r| r.field), Some(DraftField::Notes));
}

#[test]
fn review_renders_region_and_services_from_the_catalog() {
    let step = ConfirmationStep::new(complete_draft());
    assert_eq!(row_value(&step, DraftField::RegionCode), "IV - Brazlândia");
    assert_eq!(row_value(&step, DraftField::Services), "Gradagem (ha)");
    assert_eq!(row_value(&step, DraftField::Unit), "ha");
}

#[test]
fn inline_edit_commits_on_enter() {
    let mut step = ConfirmationStep::new(complete_draft());
    assert!(step.begin_edit(DraftField::EndTime));
    assert_eq!(step.editing(), Some(DraftField::EndTime));
    assert_eq!(step.edit_buffer(), Some("11:45"));

    step.commit_edit("12:10").unwrap();
    assert_eq!(step.editing(), None);
    assert_eq!(step.draft().hora_fim, "12:10");
}

#[test]
fn inline_edit_sanitizes_horimeters_without_rederiving_total() {
    let mut step = ConfirmationStep::new(complete_draft());
    step.begin_edit(DraftField::FinalHorimeter);
    step.commit_edit("1x2y1z0").unwrap();
    assert_eq!(step.draft().horimetro_final, "1210");
    assert_eq!(step.draft().total_servico, "6.0");
}

#[test]
fn invalid_unit_edit_keeps_the_previous_value() {
    let mut step = ConfirmationStep::new(complete_draft());
    step.begin_edit(DraftField::Unit);
    assert!(step.commit_edit("léguas").is_err());
    assert_eq!(step.draft().unidade_servico, Some(UnitOfMeasure::Hectare));

    step.begin_edit(DraftField::Unit);
    step.commit_edit("m3").unwrap();
    assert_eq!(step.draft().unidade_servico, Some(UnitOfMeasure::CubicMeter));
}

#[test]
fn cancel_edit_discards_the_buffer() {
    let mut step = ConfirmationStep::new(complete_draft());
    step.begin_edit(DraftField::Notes);
    step.cancel_edit();
    step.commit_edit("ignored").unwrap();
    assert_eq!(step.draft().observacoes, "Solo úmido na parte baixa");
}

#[test]
fn services_are_not_edited_inline() {
    let mut step = ConfirmationStep::new(complete_draft());
    assert!(!step.begin_edit(DraftField::Services));
    assert_eq!(step.editing(), None);
}

#[test]
fn back_to_wizard_keeps_all_data() {
    let mut step = ConfirmationStep::new(complete_draft());
    step.begin_edit(DraftField::Fuel);
    step.commit_edit("55").unwrap();

    let w = step.back_to_wizard();
    assert_eq!(w.step(), WizardStep::Conclusion);
    assert_eq!(w.draft().abastecimento, "55");
    assert_eq!(w.draft().operador, "Ana Souza");
}

#[test]
fn successful_submit_sends_the_edited_draft() {
    let repo = FakeHours::ok();
    let mut step = ConfirmationStep::new(complete_draft());
    step.begin_edit(DraftField::Notes);
    step.commit_edit("Concluído").unwrap();

    assert!(matches!(step.submit(&repo), SubmitStatus::Submitted(_)));
    let sent = repo.submitted.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].observacoes, "Concluído");
}

#[test]
fn failed_submit_keeps_the_form_for_a_manual_retry() {
    let repo = FakeHours::failing(AppError::BusinessRule(
        "A API retornou falha no registro (RHT: false)".into(),
    ));
    let mut step = ConfirmationStep::new(complete_draft());

    match step.submit(&repo) {
        SubmitStatus::Failed(msg) => assert!(msg.contains("RHT: false")),
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(step.draft(), &complete_draft());
    assert!(repo.submitted.borrow().is_empty());

    assert!(matches!(step.submit(&repo), SubmitStatus::Submitted(_)));
    assert_eq!(repo.submitted.borrow().len(), 1);
}

#[test]
fn malformed_date_or_time_edit_keeps_the_previous_value() {
    let mut step = ConfirmationStep::new(complete_draft());
    step.begin_edit(DraftField::Date);
    assert!(matches!(step.commit_edit("ontem"), Err(AppError::InvalidDate(_))));
    assert_eq!(step.draft().data, "2025-11-04");

    step.begin_edit(DraftField::EndTime);
    assert!(matches!(step.commit_edit("25:99"), Err(AppError::InvalidTime(_))));
    assert_eq!(step.draft().hora_fim, "11:45");

    step.begin_edit(DraftField::Date);
    step.commit_edit("2025-11-05").unwrap();
    assert_eq!(step.draft().data, "2025-11-05");
}

#[test]
fn typed_total_stays_manual_after_returning_to_the_wizard() {
    let start = NaiveDate::from_ymd_opt(2025, 11, 4)
        .and_then(|d| d.and_hms_opt(7, 0, 0))
        .expect("valid datetime");
    let mut w = Wizard::new(start);
    w.set_field(DraftField::InitialHorimeter, "10").unwrap();
    w.set_field(DraftField::FinalHorimeter, "25").unwrap();
    w.set_field(DraftField::TotalService, "15.0").unwrap();
    assert!(!w.auto_total_enabled());

    let step = ConfirmationStep::from_wizard(&w, w.draft().clone());
    assert!(!step.auto_total_enabled());

    let mut back = step.back_to_wizard();
    back.set_field(DraftField::FinalHorimeter, "40").unwrap();
    assert_eq!(back.draft().total_servico, "15.0");
}

#[test]
fn inline_total_edit_turns_derivation_off() {
    let mut step = ConfirmationStep::new(complete_draft());
    assert!(step.auto_total_enabled());
    step.begin_edit(DraftField::TotalService);
    step.commit_edit("7.5").unwrap();
    assert!(!step.auto_total_enabled());

    let mut w = step.back_to_wizard();
    w.set_field(DraftField::FinalHorimeter, "1300").unwrap();
    assert_eq!(w.draft().total_servico, "7.5");
}

#[test]
fn untouched_total_keeps_following_the_horimeters() {
    let start = NaiveDate::from_ymd_opt(2025, 11, 4)
        .and_then(|d| d.and_hms_opt(7, 0, 0))
        .expect("valid datetime");
    let mut w = Wizard::new(start);
    w.set_field(DraftField::InitialHorimeter, "10").unwrap();
    w.set_field(DraftField::FinalHorimeter, "25").unwrap();
    assert!(!matches!(w.next(), Transition::Completed(_)));

    let mut back = ConfirmationStep::from_wizard(&w, w.draft().clone()).back_to_wizard();
    back.set_field(DraftField::FinalHorimeter, "40").unwrap();
    assert_eq!(back.draft().total_servico, "30.0");
}
