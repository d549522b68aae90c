//! Roster and history list views.
//!
//! Each view fetches the full collection once and filters it in memory.
//! Loads go through a [`LoadState`] so a result arriving after the view
//! was reloaded or disposed is dropped instead of applied.

use crate::errors::{AppError, AppResult};
use crate::models::employee::EmployeeRecord;
use crate::models::hours::HoursRecord;
use crate::repository::{EmployeeRepository, HoursRepository};
use crate::utils::date;
use tracing::debug;

/// Handed out by [`LoadState::begin`], checked back in by `accept`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Default)]
pub struct LoadState {
    generation: u64,
    loading: bool,
    disposed: bool,
}

impl LoadState {
    pub fn begin(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        LoadTicket(self.generation)
    }

    /// True only for the most recent ticket of a live view.
    pub fn accept(&mut self, ticket: LoadTicket) -> bool {
        if self.disposed || ticket.0 != self.generation {
            debug!(ticket = ticket.0, current = self.generation, "late load result ignored");
            return false;
        }
        self.loading = false;
        true
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
        self.loading = false;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct RosterView {
    employees: Vec<EmployeeRecord>,
    search: String,
    error: Option<AppError>,
    state: LoadState,
}

impl RosterView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, repo: &dyn EmployeeRepository) {
        let ticket = self.state.begin();
        let result = repo.list();
        self.finish(ticket, result);
    }

    /// Apply a load result, unless the ticket is stale.
    pub fn finish(&mut self, ticket: LoadTicket, result: AppResult<Vec<EmployeeRecord>>) {
        if !self.state.accept(ticket) {
            return;
        }
        match result {
            Ok(list) => {
                self.employees = list;
                self.error = None;
            }
            Err(e) => self.error = Some(e),
        }
    }

    pub fn state(&mut self) -> &mut LoadState {
        &mut self.state
    }

    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_string();
    }

    pub fn all(&self) -> &[EmployeeRecord] {
        &self.employees
    }

    pub fn filtered(&self) -> Vec<&EmployeeRecord> {
        self.employees
            .iter()
            .filter(|e| e.matches(&self.search))
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<&EmployeeRecord> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Remote delete, then a full reload. Returns whether the service
    /// deleted the employee. On a rejected delete the list is untouched; a
    /// failed reload only drops the deleted row. Either error is kept for
    /// display.
    pub fn delete(&mut self, repo: &dyn EmployeeRepository, id: &str) -> bool {
        let Some(target) = self.find(id).cloned() else {
            self.error = Some(AppError::InvalidInput(format!(
                "funcionário {id} não encontrado"
            )));
            return false;
        };

        if let Err(e) = repo.delete(&target) {
            self.error = Some(e);
            return false;
        }
        self.employees.retain(|e| e.id != target.id);
        self.error = None;
        self.load(repo);
        true
    }

    pub fn error(&self) -> Option<&AppError> {
        self.error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<AppError> {
        self.error.take()
    }
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct HistoryView {
    records: Vec<HoursRecord>,
    search: String,
    date: Option<String>,
    error: Option<AppError>,
    state: LoadState,
}

impl HistoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, repo: &dyn HoursRepository) {
        let ticket = self.state.begin();
        let result = repo.history();
        self.finish(ticket, result);
    }

    pub fn load_for_employee(&mut self, repo: &dyn HoursRepository, query: &ConsultQuery) {
        let ticket = self.state.begin();
        let result = repo.by_employee(&query.name, &query.matricula);
        self.finish(ticket, result);
    }

    pub fn finish(&mut self, ticket: LoadTicket, result: AppResult<Vec<HoursRecord>>) {
        if !self.state.accept(ticket) {
            return;
        }
        match result {
            Ok(list) => {
                self.records = list;
                self.error = None;
            }
            Err(e) => self.error = Some(e),
        }
    }

    pub fn state(&mut self) -> &mut LoadState {
        &mut self.state
    }

    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_string();
    }

    /// Exact `DATA` filter; blank clears it.
    pub fn set_date(&mut self, date: Option<&str>) {
        self.date = date
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);
    }

    pub fn all(&self) -> &[HoursRecord] {
        &self.records
    }

    pub fn filtered(&self) -> Vec<&HoursRecord> {
        self.records
            .iter()
            .filter(|r| r.matches(&self.search))
            .filter(|r| self.date.as_deref().is_none_or(|d| r.on_date(d)))
            .collect()
    }

    pub fn error(&self) -> Option<&AppError> {
        self.error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<AppError> {
        self.error.take()
    }
}

// ---------------------------------------------------------------------------
// Consult form
// ---------------------------------------------------------------------------

/// Identity an operator gives to look up their own registrations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsultQuery {
    pub name: String,
    pub matricula: String,
    /// YYYY-MM-DD
    pub birth_date: String,
}

/// Per-field validation messages of the consult form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsultErrors {
    pub name: Option<&'static str>,
    pub matricula: Option<&'static str>,
    pub birth_date: Option<&'static str>,
}

impl ConsultErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.matricula.is_none() && self.birth_date.is_none()
    }

    pub fn messages(&self) -> Vec<&'static str> {
        [self.name, self.matricula, self.birth_date]
            .into_iter()
            .flatten()
            .collect()
    }
}

impl ConsultQuery {
    pub fn parse(name: &str, matricula: &str, birth_date: &str) -> Result<Self, ConsultErrors> {
        let mut errors = ConsultErrors::default();

        if name.trim().is_empty() {
            errors.name = Some("Informe o nome completo");
        }
        if matricula.trim().is_empty() {
            errors.matricula = Some("Informe a matrícula");
        }
        let birth = birth_date.trim();
        if birth.is_empty() {
            errors.birth_date = Some("Informe a data de nascimento");
        } else if date::parse_date(birth).is_none() {
            errors.birth_date = Some("Data de nascimento inválida (use AAAA-MM-DD)");
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Self {
            name: name.trim().to_string(),
            matricula: matricula.trim().to_string(),
            birth_date: birth.to_string(),
        })
    }
}
