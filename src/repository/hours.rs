use crate::api::RemoteClient;
use crate::db::store::{KEY_HOURS_BACKUP, LocalStore};
use crate::errors::AppResult;
use crate::models::draft::RegistrationDraft;
use crate::models::hours::{BackupRecord, HoursRecord};
use crate::utils::date;
use tracing::warn;

pub trait HoursRepository {
    /// Submit a registration; the backup copy is written only on success.
    fn submit(&self, draft: &RegistrationDraft) -> AppResult<BackupRecord>;
    fn by_employee(&self, name: &str, matricula: &str) -> AppResult<Vec<HoursRecord>>;
    /// Global history, read from the backup mirror when the history
    /// endpoint is not configured.
    fn history(&self) -> AppResult<Vec<HoursRecord>>;
    fn backups(&self) -> Vec<BackupRecord>;
}

pub struct RemoteHoursRepository<'a> {
    client: &'a RemoteClient,
    store: &'a LocalStore,
}

impl<'a> RemoteHoursRepository<'a> {
    pub fn new(client: &'a RemoteClient, store: &'a LocalStore) -> Self {
        Self { client, store }
    }
}

impl HoursRepository for RemoteHoursRepository<'_> {
    fn submit(&self, draft: &RegistrationDraft) -> AppResult<BackupRecord> {
        self.client.submit_hours(draft)?;

        let record = BackupRecord {
            id: date::now_millis_id(),
            draft: draft.clone(),
            created_at: date::now_rfc3339(),
            rht_status: true,
        };

        // backup failures are logged, never raised
        if let Err(e) = self.store.append(KEY_HOURS_BACKUP, record.clone()) {
            warn!(error = %e, "failed to save local backup");
        }
        self.store.audit(
            "submit",
            &draft.matricula,
            &format!("Hours of {} on {} submitted", draft.operador, draft.data),
        );
        Ok(record)
    }

    fn by_employee(&self, name: &str, matricula: &str) -> AppResult<Vec<HoursRecord>> {
        self.client.hours_by_employee(name, matricula)
    }

    fn history(&self) -> AppResult<Vec<HoursRecord>> {
        match self.client.global_history() {
            Ok(records) => Ok(records),
            Err(e) if e.is_configuration() => {
                warn!(error = %e, "history endpoint not configured, reading local backup");
                Ok(self.backups().iter().map(HoursRecord::from).collect())
            }
            Err(e) => Err(e),
        }
    }

    fn backups(&self) -> Vec<BackupRecord> {
        self.store.read_list(KEY_HOURS_BACKUP)
    }
}
