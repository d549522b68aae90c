use crate::api::RemoteClient;
use crate::db::store::{KEY_EMPLOYEES, LocalStore};
use crate::errors::AppResult;
use crate::models::employee::{EmployeeRecord, NewEmployee};
use crate::utils::date;
use tracing::warn;

/// Once the service has accepted a change, local mirror failures are
/// logged and never returned.
pub trait EmployeeRepository {
    /// Full roster; refreshes the local cache.
    fn list(&self) -> AppResult<Vec<EmployeeRecord>>;
    fn register(&self, employee: &NewEmployee) -> AppResult<EmployeeRecord>;
    /// Remote delete first; the cache is touched only when the service agrees.
    fn delete(&self, employee: &EmployeeRecord) -> AppResult<()>;
    /// Last cached roster, without any network call.
    fn cached(&self) -> Vec<EmployeeRecord>;
}

pub struct RemoteEmployeeRepository<'a> {
    client: &'a RemoteClient,
    store: &'a LocalStore,
}

impl<'a> RemoteEmployeeRepository<'a> {
    pub fn new(client: &'a RemoteClient, store: &'a LocalStore) -> Self {
        Self { client, store }
    }
}

impl EmployeeRepository for RemoteEmployeeRepository<'_> {
    fn list(&self) -> AppResult<Vec<EmployeeRecord>> {
        match self.client.list_employees() {
            Ok(remote) => {
                if let Err(e) = self.store.write_list(KEY_EMPLOYEES, &remote) {
                    warn!(error = %e, "failed to refresh local roster");
                }
                Ok(remote)
            }
            Err(e) if e.is_configuration() => {
                warn!(error = %e, "employee list endpoint not configured, using local roster");
                Ok(self.cached())
            }
            Err(e) => Err(e),
        }
    }

    fn register(&self, employee: &NewEmployee) -> AppResult<EmployeeRecord> {
        let resp = self.client.register_employee(employee)?;

        let record = EmployeeRecord {
            id: resp.id.unwrap_or_else(date::now_millis_id),
            name: employee.name.clone(),
            matricula: employee.matricula.clone(),
            birth_date: employee.birth_date.clone(),
            created_at: date::now_rfc3339(),
            updated_at: None,
        };

        if let Err(e) = self.store.append(KEY_EMPLOYEES, record.clone()) {
            warn!(error = %e, "failed to save employee in local roster");
        }
        self.store
            .audit("employee_add", &record.matricula, &format!("Employee {} registered", record.name));
        Ok(record)
    }

    fn delete(&self, employee: &EmployeeRecord) -> AppResult<()> {
        self.client.delete_employee(employee)?;

        let remaining: Vec<EmployeeRecord> = self
            .cached()
            .into_iter()
            .filter(|e| e.id != employee.id)
            .collect();
        if let Err(e) = self.store.write_list(KEY_EMPLOYEES, &remaining) {
            warn!(error = %e, "failed to drop employee from local roster");
        }
        self.store
            .audit("employee_del", &employee.matricula, &format!("Employee {} deleted", employee.name));
        Ok(())
    }

    fn cached(&self) -> Vec<EmployeeRecord> {
        self.store.read_list(KEY_EMPLOYEES)
    }
}
