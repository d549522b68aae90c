//! Five-step registration wizard.
//!
//! The wizard owns the draft while it is being filled in. Forward
//! navigation is gated on the required fields of the current step; the
//! last `next()` hands a copy of the draft to the caller, which moves on to
//! the confirmation step.

use crate::errors::AppResult;
use crate::models::catalog::{REGIONS, Region};
use crate::models::draft::{DraftField, RegistrationDraft};
use crate::models::employee::EmployeeRecord;
use chrono::NaiveDateTime;
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    PersonalInfo,
    ServiceDetails,
    MachineInfo,
    HorimetersAndServices,
    Conclusion,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::PersonalInfo,
        WizardStep::ServiceDetails,
        WizardStep::MachineInfo,
        WizardStep::HorimetersAndServices,
        WizardStep::Conclusion,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::PersonalInfo => "Informações Pessoais",
            WizardStep::ServiceDetails => "Detalhes do Serviço",
            WizardStep::MachineInfo => "Máquinas e Implementos",
            WizardStep::HorimetersAndServices => "Horimetros e Serviços",
            WizardStep::Conclusion => "Conclusão",
        }
    }

    /// Fields shown on this step, in prompt order.
    pub fn fields(&self) -> &'static [DraftField] {
        match self {
            WizardStep::PersonalInfo => &[
                DraftField::Operator,
                DraftField::Matricula,
                DraftField::Location,
                DraftField::RegionCode,
                DraftField::Community,
            ],
            WizardStep::ServiceDetails => &[
                DraftField::Process,
                DraftField::Date,
                DraftField::StartTime,
                DraftField::EndTime,
            ],
            WizardStep::MachineInfo => &[
                DraftField::Machine,
                DraftField::MachinePrefix,
                DraftField::Implement,
                DraftField::ImplementPrefix,
            ],
            WizardStep::HorimetersAndServices => &[
                DraftField::InitialHorimeter,
                DraftField::FinalHorimeter,
                DraftField::TotalService,
                DraftField::Unit,
                DraftField::Fuel,
                DraftField::Services,
            ],
            WizardStep::Conclusion => &[DraftField::Notes],
        }
    }

    /// Fields that must be filled before leaving this step.
    pub fn required_fields(&self) -> &'static [DraftField] {
        match self {
            WizardStep::PersonalInfo => &[
                DraftField::Operator,
                DraftField::Matricula,
                DraftField::Location,
                DraftField::RegionCode,
                DraftField::Community,
            ],
            WizardStep::ServiceDetails => {
                &[DraftField::Date, DraftField::StartTime, DraftField::EndTime]
            }
            WizardStep::MachineInfo => &[],
            WizardStep::HorimetersAndServices => &[
                DraftField::InitialHorimeter,
                DraftField::FinalHorimeter,
                DraftField::TotalService,
                DraftField::Unit,
                DraftField::Services,
            ],
            WizardStep::Conclusion => &[],
        }
    }

    pub fn is_last(&self) -> bool {
        *self == WizardStep::Conclusion
    }
}

/// Outcome of [`Wizard::next`].
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Advanced(WizardStep),
    Blocked(Vec<DraftField>),
    /// Last step confirmed: the assembled draft goes to the caller.
    Completed(RegistrationDraft),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    PermissionDenied,
    Unavailable,
}

pub trait Geolocator {
    fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// Reads `RHT_GPS_POSITION="lat,lon"`; unset means no positioning available.
pub struct EnvGeolocator;

impl Geolocator for EnvGeolocator {
    fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        let raw = env::var("RHT_GPS_POSITION").map_err(|_| GeolocationError::Unavailable)?;
        let (lat, lon) = raw
            .split_once(',')
            .ok_or(GeolocationError::PermissionDenied)?;
        let latitude = lat
            .trim()
            .parse()
            .map_err(|_| GeolocationError::PermissionDenied)?;
        let longitude = lon
            .trim()
            .parse()
            .map_err(|_| GeolocationError::PermissionDenied)?;
        Ok(Coordinates {
            latitude,
            longitude,
        })
    }
}

/// Dismissable, non-blocking notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert(pub String);

pub const GPS_ALERT: &str = "Erro ao obter localização. Verifique as permissões.";

pub struct Wizard {
    draft: RegistrationDraft,
    step: WizardStep,
    step_attempted: bool,
    auto_total: bool,
    operators: Vec<EmployeeRecord>,
}

impl Wizard {
    /// Empty draft with date and start time defaulted to `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        let draft = RegistrationDraft {
            data: now.format("%Y-%m-%d").to_string(),
            hora_inicio: now.format("%H:%M").to_string(),
            ..Default::default()
        };
        Self {
            draft,
            step: WizardStep::PersonalInfo,
            step_attempted: false,
            auto_total: true,
            operators: Vec::new(),
        }
    }

    /// Re-enter the wizard with a draft coming back from the review step.
    /// A total typed by hand stays manual for the rest of the session.
    pub fn resume(draft: RegistrationDraft, auto_total: bool) -> Self {
        Self {
            draft,
            step: WizardStep::Conclusion,
            step_attempted: false,
            auto_total,
            operators: Vec::new(),
        }
    }

    /// Employee list used by the operator typeahead.
    pub fn with_operators(mut self, operators: Vec<EmployeeRecord>) -> Self {
        self.operators = operators;
        self
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn step_attempted(&self) -> bool {
        self.step_attempted
    }

    pub fn auto_total_enabled(&self) -> bool {
        self.auto_total
    }

    pub fn progress(&self) -> u8 {
        ((self.step.index() + 1) * 100 / WizardStep::ALL.len()) as u8
    }

    pub fn missing_fields(&self, step: WizardStep) -> Vec<DraftField> {
        step.required_fields()
            .iter()
            .copied()
            .filter(|f| !self.draft.is_filled(*f))
            .collect()
    }

    pub fn can_proceed(&self) -> bool {
        self.missing_fields(self.step).is_empty()
    }

    pub fn next(&mut self) -> Transition {
        let missing = self.missing_fields(self.step);
        if !missing.is_empty() {
            self.step_attempted = true;
            return Transition::Blocked(missing);
        }

        self.step_attempted = false;
        match WizardStep::from_index(self.step.index() + 1) {
            Some(next) => {
                self.step = next;
                Transition::Advanced(next)
            }
            None => Transition::Completed(self.draft.clone()),
        }
    }

    pub fn prev(&mut self) -> WizardStep {
        self.step = WizardStep::from_index(self.step.index().saturating_sub(1))
            .unwrap_or(WizardStep::PersonalInfo);
        self.step_attempted = false;
        self.step
    }

    /// Keystroke-level field update.
    pub fn set_field(&mut self, field: DraftField, value: &str) -> AppResult<()> {
        self.draft.apply_edit(field, value)?;

        match field {
            DraftField::InitialHorimeter | DraftField::FinalHorimeter => self.recompute_total(),
            DraftField::TotalService if !value.trim().is_empty() => self.auto_total = false,
            _ => {}
        }
        Ok(())
    }

    fn recompute_total(&mut self) {
        if !self.auto_total {
            return;
        }
        if let Some(total) = self.draft.derived_total() {
            self.draft.total_servico = total;
        }
    }

    pub fn toggle_service(&mut self, id: &str) -> AppResult<bool> {
        self.draft.toggle_service(id)
    }

    pub fn operator_suggestions(&self) -> Vec<&EmployeeRecord> {
        let query = self.draft.operador.trim();
        if query.is_empty() {
            return Vec::new();
        }
        self.operators.iter().filter(|e| e.matches(query)).collect()
    }

    /// Fills name and matricula together.
    pub fn select_operator(&mut self, operator: &EmployeeRecord) {
        self.draft.operador = operator.name.clone();
        self.draft.matricula = operator.matricula.clone();
    }

    pub fn region_suggestions(&self) -> Vec<&'static Region> {
        let query = self.draft.ra_signla.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        REGIONS
            .iter()
            .filter(|r| {
                r.code.to_lowercase().contains(&query) || r.name.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Fills region code and community together.
    pub fn select_region(&mut self, region: &Region) {
        self.draft.ra_signla = region.code.to_string();
        self.draft.comunidade = region.name.to_string();
    }

    /// Fill the location from the geolocator, or return the alert to show.
    pub fn use_gps(&mut self, locator: &dyn Geolocator) -> Option<Alert> {
        match locator.current_position() {
            Ok(c) => {
                self.draft.local_servico = format!("{:.4}, {:.4}", c.latitude, c.longitude);
                None
            }
            Err(_) => Some(Alert(GPS_ALERT.to_string())),
        }
    }
}
