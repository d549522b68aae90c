//! Wire shapes of the webhook requests and responses.

use super::sentinel::Sentinel;
use crate::models::employee::{EmployeeRecord, NewEmployee};
use crate::models::hours::{lenient_opt_string, lenient_string};
use crate::utils::date;
use serde::{Deserialize, Serialize};

/// Payload shared by employee registration and deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeePayload {
    #[serde(rename = "nomeCompleto")]
    pub nome_completo: String,
    pub matricula: String,
    /// DD/MM/YYYY
    pub data_nascimento: String,
}

impl From<&NewEmployee> for EmployeePayload {
    fn from(e: &NewEmployee) -> Self {
        Self {
            nome_completo: e.name.clone(),
            matricula: e.matricula.clone(),
            data_nascimento: e.birth_date_br(),
        }
    }
}

impl From<&EmployeeRecord> for EmployeePayload {
    fn from(e: &EmployeeRecord) -> Self {
        Self {
            nome_completo: e.name.clone(),
            matricula: e.matricula.clone(),
            data_nascimento: date::to_br_date(&e.birth_date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoursQuery {
    #[serde(rename = "OPERADOR_NOME")]
    pub operador_nome: String,
    #[serde(rename = "OPERADOR_MATRICULA")]
    pub operador_matricula: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitHoursResponse {
    #[serde(rename = "RHT")]
    pub rht: Option<Sentinel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteEmployeeResponse {
    pub delete: Option<Sentinel>,
}

/// Opaque answer of the registration webhook; nothing in it is enforced.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RegisterEmployeeResponse {
    #[serde(default)]
    pub success: Option<Sentinel>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Roster row as returned by the list webhook.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteEmployee {
    #[serde(rename = "NOME", default, deserialize_with = "lenient_string")]
    pub nome: String,
    #[serde(rename = "MATRICULA", default, deserialize_with = "lenient_string")]
    pub matricula: String,
    #[serde(rename = "DATA_NASCIMENTO", default, deserialize_with = "lenient_string")]
    pub data_nascimento: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(rename = "createdAt", default, deserialize_with = "lenient_string")]
    pub created_at: String,
    #[serde(rename = "updatedAt", default, deserialize_with = "lenient_opt_string")]
    pub updated_at: Option<String>,
}

impl From<RemoteEmployee> for EmployeeRecord {
    fn from(r: RemoteEmployee) -> Self {
        Self {
            id: r.id,
            name: r.nome,
            matricula: r.matricula,
            birth_date: date::from_br_date(&r.data_nascimento),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
