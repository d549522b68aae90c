use super::catalog::{self, SERVICES};
use crate::errors::{AppError, AppResult};
use crate::utils::{date, time};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Maximum number of digits accepted by a horimeter reading.
pub const HORIMETER_MAX_DIGITS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitOfMeasure {
    Meter,       // m
    SquareMeter, // m²
    CubicMeter,  // m³
    Kilometer,   // km
    Hectare,     // ha
    Unit,        // UD
    MachineHour, // HM
}

impl UnitOfMeasure {
    pub const ALL: [UnitOfMeasure; 7] = [
        UnitOfMeasure::Meter,
        UnitOfMeasure::SquareMeter,
        UnitOfMeasure::CubicMeter,
        UnitOfMeasure::Kilometer,
        UnitOfMeasure::Hectare,
        UnitOfMeasure::Unit,
        UnitOfMeasure::MachineHour,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            UnitOfMeasure::Meter => "m",
            UnitOfMeasure::SquareMeter => "m²",
            UnitOfMeasure::CubicMeter => "m³",
            UnitOfMeasure::Kilometer => "km",
            UnitOfMeasure::Hectare => "ha",
            UnitOfMeasure::Unit => "UD",
            UnitOfMeasure::MachineHour => "HM",
        }
    }

    /// Parse a unit symbol, case-insensitively. `m2`/`m3` are accepted for
    /// terminals without superscript input.
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "m" => Some(UnitOfMeasure::Meter),
            "m²" | "m2" => Some(UnitOfMeasure::SquareMeter),
            "m³" | "m3" => Some(UnitOfMeasure::CubicMeter),
            "km" => Some(UnitOfMeasure::Kilometer),
            "ha" => Some(UnitOfMeasure::Hectare),
            "ud" => Some(UnitOfMeasure::Unit),
            "hm" => Some(UnitOfMeasure::MachineHour),
            _ => None,
        }
    }
}

impl fmt::Display for UnitOfMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Serialize for UnitOfMeasure {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.symbol())
    }
}

impl<'de> Deserialize<'de> for UnitOfMeasure {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        UnitOfMeasure::from_symbol(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown unit '{raw}'")))
    }
}

/// `""` is how an unset unit is stored, so it reads back as `None`.
fn de_optional_unit<'de, D: Deserializer<'de>>(d: D) -> Result<Option<UnitOfMeasure>, D::Error> {
    let raw: Option<String> = Option::deserialize(d)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => UnitOfMeasure::from_symbol(s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown unit '{s}'"))),
    }
}

fn ser_optional_unit<S: Serializer>(u: &Option<UnitOfMeasure>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(u.map(|u| u.symbol()).unwrap_or(""))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceFlag {
    pub selected: bool,
    pub unidade: UnitOfMeasure,
}

/// Every field of the registration form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Operator,
    Matricula,
    Location,
    RegionCode,
    Community,
    Process,
    Date,
    StartTime,
    EndTime,
    Machine,
    MachinePrefix,
    Implement,
    ImplementPrefix,
    InitialHorimeter,
    FinalHorimeter,
    TotalService,
    Unit,
    Fuel,
    Services,
    Notes,
}

impl DraftField {
    pub const ALL: [DraftField; 20] = [
        DraftField::Operator,
        DraftField::Matricula,
        DraftField::Location,
        DraftField::RegionCode,
        DraftField::Community,
        DraftField::Process,
        DraftField::Date,
        DraftField::StartTime,
        DraftField::EndTime,
        DraftField::Machine,
        DraftField::MachinePrefix,
        DraftField::Implement,
        DraftField::ImplementPrefix,
        DraftField::InitialHorimeter,
        DraftField::FinalHorimeter,
        DraftField::TotalService,
        DraftField::Unit,
        DraftField::Fuel,
        DraftField::Services,
        DraftField::Notes,
    ];

    /// Key used in the persisted draft (and accepted by `edit <key>`).
    pub fn key(&self) -> &'static str {
        match self {
            DraftField::Operator => "operador",
            DraftField::Matricula => "matricula",
            DraftField::Location => "localServico",
            DraftField::RegionCode => "raSignla",
            DraftField::Community => "comunidade",
            DraftField::Process => "processo",
            DraftField::Date => "data",
            DraftField::StartTime => "horaInicio",
            DraftField::EndTime => "horaFim",
            DraftField::Machine => "maquina",
            DraftField::MachinePrefix => "prefixoMaquina",
            DraftField::Implement => "implementos",
            DraftField::ImplementPrefix => "prefixoImplementos",
            DraftField::InitialHorimeter => "horimetroInicial",
            DraftField::FinalHorimeter => "horimetroFinal",
            DraftField::TotalService => "totalServico",
            DraftField::Unit => "unidadeServico",
            DraftField::Fuel => "abastecimento",
            DraftField::Services => "servicos",
            DraftField::Notes => "observacoes",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Operator => "Operador",
            DraftField::Matricula => "Matrícula",
            DraftField::Location => "Local do Serviço",
            DraftField::RegionCode => "Sigla RA",
            DraftField::Community => "Comunidade/Região",
            DraftField::Process => "Processo SEI",
            DraftField::Date => "Data",
            DraftField::StartTime => "Início",
            DraftField::EndTime => "Fim",
            DraftField::Machine => "Máquina",
            DraftField::MachinePrefix => "Prefixo Máquina",
            DraftField::Implement => "Implementos",
            DraftField::ImplementPrefix => "Prefixo Implementos",
            DraftField::InitialHorimeter => "Horimetro Inicial",
            DraftField::FinalHorimeter => "Horimetro Final",
            DraftField::TotalService => "Total do Serviço",
            DraftField::Unit => "Unidade",
            DraftField::Fuel => "Abastecimento (litros)",
            DraftField::Services => "Serviços Realizados",
            DraftField::Notes => "Observações",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        DraftField::ALL.iter().copied().find(|f| f.key() == key.trim())
    }
}

/// In-progress state of one hours registration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationDraft {
    pub operador: String,
    pub matricula: String,
    pub local_servico: String,
    pub ra_signla: String,
    pub comunidade: String,
    pub processo: String,
    pub data: String,
    pub hora_inicio: String,
    pub hora_fim: String,
    pub maquina: String,
    pub prefixo_maquina: String,
    pub implementos: String,
    pub prefixo_implementos: String,
    pub horimetro_inicial: String,
    pub horimetro_final: String,
    pub total_servico: String,
    #[serde(
        deserialize_with = "de_optional_unit",
        serialize_with = "ser_optional_unit"
    )]
    pub unidade_servico: Option<UnitOfMeasure>,
    pub abastecimento: String,
    pub servicos: BTreeMap<String, ServiceFlag>,
    pub observacoes: String,
}

/// Keep only digits, truncated to [`HORIMETER_MAX_DIGITS`].
pub fn sanitize_horimeter(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(HORIMETER_MAX_DIGITS)
        .collect()
}

impl RegistrationDraft {
    fn text_slot(&mut self, field: DraftField) -> Option<&mut String> {
        let slot = match field {
            DraftField::Operator => &mut self.operador,
            DraftField::Matricula => &mut self.matricula,
            DraftField::Location => &mut self.local_servico,
            DraftField::RegionCode => &mut self.ra_signla,
            DraftField::Community => &mut self.comunidade,
            DraftField::Process => &mut self.processo,
            DraftField::Date => &mut self.data,
            DraftField::StartTime => &mut self.hora_inicio,
            DraftField::EndTime => &mut self.hora_fim,
            DraftField::Machine => &mut self.maquina,
            DraftField::MachinePrefix => &mut self.prefixo_maquina,
            DraftField::Implement => &mut self.implementos,
            DraftField::ImplementPrefix => &mut self.prefixo_implementos,
            DraftField::InitialHorimeter => &mut self.horimetro_inicial,
            DraftField::FinalHorimeter => &mut self.horimetro_final,
            DraftField::TotalService => &mut self.total_servico,
            DraftField::Fuel => &mut self.abastecimento,
            DraftField::Notes => &mut self.observacoes,
            DraftField::Unit | DraftField::Services => return None,
        };
        Some(slot)
    }

    /// Textual value of a field (unit symbol, comma-joined service ids).
    pub fn value(&self, field: DraftField) -> String {
        match field {
            DraftField::Operator => self.operador.clone(),
            DraftField::Matricula => self.matricula.clone(),
            DraftField::Location => self.local_servico.clone(),
            DraftField::RegionCode => self.ra_signla.clone(),
            DraftField::Community => self.comunidade.clone(),
            DraftField::Process => self.processo.clone(),
            DraftField::Date => self.data.clone(),
            DraftField::StartTime => self.hora_inicio.clone(),
            DraftField::EndTime => self.hora_fim.clone(),
            DraftField::Machine => self.maquina.clone(),
            DraftField::MachinePrefix => self.prefixo_maquina.clone(),
            DraftField::Implement => self.implementos.clone(),
            DraftField::ImplementPrefix => self.prefixo_implementos.clone(),
            DraftField::InitialHorimeter => self.horimetro_inicial.clone(),
            DraftField::FinalHorimeter => self.horimetro_final.clone(),
            DraftField::TotalService => self.total_servico.clone(),
            DraftField::Unit => self
                .unidade_servico
                .map(|u| u.symbol().to_string())
                .unwrap_or_default(),
            DraftField::Fuel => self.abastecimento.clone(),
            DraftField::Services => self.services_csv(),
            DraftField::Notes => self.observacoes.clone(),
        }
    }

    pub fn is_filled(&self, field: DraftField) -> bool {
        match field {
            DraftField::Services => self.servicos.values().any(|s| s.selected),
            DraftField::Unit => self.unidade_servico.is_some(),
            other => !self.value(other).trim().is_empty(),
        }
    }

    /// Raw field write. Horimeters are sanitized, units must parse, and the
    /// date and times must be `YYYY-MM-DD` / `HH:MM` (blank clears them);
    /// services are toggled through [`RegistrationDraft::toggle_service`].
    /// A rejected value leaves the field unchanged.
    pub fn apply_edit(&mut self, field: DraftField, value: &str) -> AppResult<()> {
        match field {
            DraftField::Date if !value.trim().is_empty() && date::parse_date(value.trim()).is_none() => {
                Err(AppError::InvalidDate(value.trim().to_string()))
            }
            DraftField::StartTime | DraftField::EndTime
                if time::parse_optional_time(Some(value)).is_err() =>
            {
                Err(AppError::InvalidTime(value.trim().to_string()))
            }
            DraftField::Unit => {
                self.unidade_servico = if value.trim().is_empty() {
                    None
                } else {
                    Some(UnitOfMeasure::from_symbol(value).ok_or_else(|| {
                        AppError::InvalidInput(format!(
                            "unidade '{}' inválida (use m, m², m³, km, ha, UD, HM)",
                            value.trim()
                        ))
                    })?)
                };
                Ok(())
            }
            DraftField::Services => Err(AppError::InvalidInput(
                "serviços são alterados por seleção, não por texto".into(),
            )),
            DraftField::InitialHorimeter | DraftField::FinalHorimeter => {
                if let Some(slot) = self.text_slot(field) {
                    *slot = sanitize_horimeter(value);
                }
                Ok(())
            }
            other => {
                if let Some(slot) = self.text_slot(other) {
                    *slot = value.to_string();
                }
                Ok(())
            }
        }
    }

    /// Flip a service flag. Returns the new selection state.
    pub fn toggle_service(&mut self, id: &str) -> AppResult<bool> {
        let service = catalog::find_service(id)
            .ok_or_else(|| AppError::InvalidInput(format!("serviço desconhecido '{id}'")))?;

        let entry = self
            .servicos
            .entry(service.id.to_string())
            .or_insert(ServiceFlag {
                selected: false,
                unidade: service.unit,
            });
        entry.selected = !entry.selected;
        entry.unidade = service.unit;
        let selected = entry.selected;

        if selected && self.unidade_servico.is_none() {
            self.unidade_servico = Some(service.unit);
        }
        Ok(selected)
    }

    /// Selected service ids, catalog order first, then ids unknown to the catalog.
    pub fn selected_service_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = SERVICES
            .iter()
            .filter(|s| self.servicos.get(s.id).is_some_and(|f| f.selected))
            .map(|s| s.id.to_string())
            .collect();

        for (id, flag) in &self.servicos {
            if flag.selected && catalog::find_service(id).is_none() {
                ids.push(id.clone());
            }
        }
        ids
    }

    pub fn services_csv(&self) -> String {
        self.selected_service_ids().join(", ")
    }

    /// `final - initial` to one decimal place, when both readings parse
    /// and the final one is not below the initial one.
    pub fn derived_total(&self) -> Option<String> {
        let initial: f64 = self.horimetro_inicial.trim().parse().ok()?;
        let fin: f64 = self.horimetro_final.trim().parse().ok()?;
        if fin < initial {
            return None;
        }
        Some(format!("{:.1}", fin - initial))
    }
}
