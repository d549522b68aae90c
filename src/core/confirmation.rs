use crate::core::wizard::{Wizard, WizardStep};
use crate::errors::AppResult;
use crate::models::catalog::{find_service, region_full_name};
use crate::models::draft::{DraftField, RegistrationDraft};
use crate::models::hours::BackupRecord;
use crate::repository::HoursRepository;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStatus {
    Idle,
    Submitted(BackupRecord),
    /// Message shown inline; the draft is kept for a manual retry.
    Failed(String),
}

/// One line of the read-only review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    pub section: &'static str,
    pub field: DraftField,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
struct PendingEdit {
    field: DraftField,
    buffer: String,
}

pub struct ConfirmationStep {
    draft: RegistrationDraft,
    editing: Option<PendingEdit>,
    status: SubmitStatus,
    auto_total: bool,
}

impl ConfirmationStep {
    pub fn new(draft: RegistrationDraft) -> Self {
        Self {
            draft,
            editing: None,
            status: SubmitStatus::Idle,
            auto_total: true,
        }
    }

    /// Review of a draft leaving the wizard, keeping its total mode.
    pub fn from_wizard(wizard: &Wizard, draft: RegistrationDraft) -> Self {
        Self {
            auto_total: wizard.auto_total_enabled(),
            ..Self::new(draft)
        }
    }

    pub fn auto_total_enabled(&self) -> bool {
        self.auto_total
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn editing(&self) -> Option<DraftField> {
        self.editing.as_ref().map(|e| e.field)
    }

    /// Value the open editor was seeded with.
    pub fn edit_buffer(&self) -> Option<&str> {
        self.editing.as_ref().map(|e| e.buffer.as_str())
    }

    /// Open the inline editor of a field, seeded with its current value.
    /// Services are toggled in the wizard, not typed.
    pub fn begin_edit(&mut self, field: DraftField) -> bool {
        if field == DraftField::Services {
            return false;
        }
        self.editing = Some(PendingEdit {
            field,
            buffer: self.draft.value(field),
        });
        true
    }

    /// Blur/Enter: write the edited value into the draft. An invalid value
    /// leaves the field unchanged and closes the editor.
    pub fn commit_edit(&mut self, value: &str) -> AppResult<()> {
        let Some(pending) = self.editing.take() else {
            return Ok(());
        };
        if let Err(e) = self.draft.apply_edit(pending.field, value) {
            warn!(field = pending.field.key(), error = %e, "inline edit rejected");
            return Err(e);
        }
        if pending.field == DraftField::TotalService && !value.trim().is_empty() {
            self.auto_total = false;
        }
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn review(&self) -> Vec<ReviewRow> {
        let mut rows = Vec::new();
        for step in WizardStep::ALL {
            for field in step.fields() {
                rows.push(ReviewRow {
                    section: step.title(),
                    field: *field,
                    label: field.label(),
                    value: self.display_value(*field),
                });
            }
        }
        rows
    }

    fn display_value(&self, field: DraftField) -> String {
        match field {
            DraftField::RegionCode if !self.draft.ra_signla.trim().is_empty() => {
                region_full_name(self.draft.ra_signla.trim())
            }
            DraftField::Services => self
                .draft
                .selected_service_ids()
                .iter()
                .map(|id| match find_service(id) {
                    Some(s) => format!("{} ({})", s.label, s.unit),
                    None => id.clone(),
                })
                .collect::<Vec<_>>()
                .join(", "),
            other => self.draft.value(other),
        }
    }

    /// Hand the draft back to the wizard, nothing is discarded.
    pub fn back_to_wizard(self) -> Wizard {
        Wizard::resume(self.draft, self.auto_total)
    }

    pub fn submit(&mut self, repo: &dyn HoursRepository) -> &SubmitStatus {
        self.editing = None;
        self.status = match repo.submit(&self.draft) {
            Ok(record) => {
                info!(id = %record.id, "registration submitted");
                SubmitStatus::Submitted(record)
            }
            Err(e) => {
                warn!(error = %e, "registration submit failed");
                SubmitStatus::Failed(e.to_string())
            }
        };
        &self.status
    }
}
