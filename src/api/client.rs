use super::payload::{
    DeleteEmployeeResponse, EmployeePayload, HoursQuery, RegisterEmployeeResponse,
    RemoteEmployee, SubmitHoursResponse,
};
use super::sentinel::{self, OneOrMany};
use crate::config::{Config, Endpoint, Endpoints};
use crate::errors::{AppError, AppResult};
use crate::models::draft::RegistrationDraft;
use crate::models::employee::{EmployeeRecord, NewEmployee};
use crate::models::hours::{HoursFields, HoursRecord};
use reqwest::blocking::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Thin blocking client, one configured URL per operation.
pub struct RemoteClient {
    http: Client,
    endpoints: Endpoints,
}

fn transport_error(url: &str, e: reqwest::Error) -> AppError {
    if e.is_timeout() {
        AppError::Timeout(url.to_string())
    } else {
        AppError::Network(e.to_string())
    }
}

fn parse_json<T: DeserializeOwned>(body: &str) -> AppResult<T> {
    serde_json::from_str(body).map_err(|e| AppError::Parse(e.to_string()))
}

/// Parse a list body where an empty body means "no records".
fn parse_list<T: DeserializeOwned>(body: &str) -> AppResult<Vec<T>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(parse_json::<OneOrMany<T>>(body)?.into_vec())
}

impl RemoteClient {
    pub fn new(cfg: &Config) -> AppResult<Self> {
        Self::with_endpoints(
            cfg.endpoints.clone(),
            Duration::from_secs(cfg.request_timeout_secs),
        )
    }

    pub fn with_endpoints(endpoints: Endpoints, timeout: Duration) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Other(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn url(&self, ep: Endpoint) -> AppResult<&str> {
        self.endpoints
            .url(ep)
            .ok_or(AppError::Configuration(ep.name(), ep.env_var()))
    }

    /// Send a request and return the body of a 2xx response.
    fn send(&self, url: &str, req: RequestBuilder) -> AppResult<String> {
        let resp = req.send().map_err(|e| transport_error(url, e))?;
        let status = resp.status();

        if !status.is_success() {
            warn!(url, status = status.as_u16(), "remote call returned an error status");
            return Err(AppError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        resp.text().map_err(|e| transport_error(url, e))
    }

    fn post<T: Serialize>(&self, ep: Endpoint, body: &T) -> AppResult<String> {
        let url = self.url(ep)?;
        debug!(endpoint = ep.name(), url, "POST");
        self.send(url, self.http.post(url).json(body))
    }

    fn get(&self, ep: Endpoint) -> AppResult<String> {
        let url = self.url(ep)?;
        debug!(endpoint = ep.name(), url, "GET");
        self.send(url, self.http.get(url))
    }

    /// Submit one hours registration. `RHT: false` is a business-rule failure.
    pub fn submit_hours(&self, draft: &RegistrationDraft) -> AppResult<()> {
        let payload = HoursFields::from(draft);
        let body = self.post(Endpoint::SubmitHours, &payload)?;

        let resp = parse_json::<OneOrMany<SubmitHoursResponse>>(&body)?
            .into_first()
            .ok_or_else(|| AppError::Parse("resposta vazia".into()))?;

        sentinel::require(
            "RHT",
            resp.rht.as_ref(),
            "A API retornou falha no registro (RHT: false)",
        )?;
        info!(operator = %draft.operador, date = %draft.data, "hours registration accepted");
        Ok(())
    }

    pub fn register_employee(&self, employee: &NewEmployee) -> AppResult<RegisterEmployeeResponse> {
        let body = self.post(Endpoint::RegisterEmployee, &EmployeePayload::from(employee))?;
        if body.trim().is_empty() {
            return Ok(RegisterEmployeeResponse::default());
        }
        Ok(parse_json::<OneOrMany<RegisterEmployeeResponse>>(&body)?
            .into_first()
            .unwrap_or_default())
    }

    pub fn list_employees(&self) -> AppResult<Vec<EmployeeRecord>> {
        let body = self.get(Endpoint::ListEmployees)?;
        let rows: Vec<RemoteEmployee> = parse_list(&body)?;
        Ok(rows.into_iter().map(EmployeeRecord::from).collect())
    }

    /// Delete an employee. `delete: "False"` is a business-rule failure.
    pub fn delete_employee(&self, employee: &EmployeeRecord) -> AppResult<()> {
        let body = self.post(Endpoint::DeleteEmployee, &EmployeePayload::from(employee))?;

        let resp = parse_json::<OneOrMany<DeleteEmployeeResponse>>(&body)?
            .into_first()
            .ok_or_else(|| AppError::Parse("resposta vazia".into()))?;

        sentinel::require(
            "delete",
            resp.delete.as_ref(),
            "Não foi possível excluir o funcionário.",
        )
    }

    /// Records of one employee. An empty body means no matching records.
    pub fn hours_by_employee(&self, name: &str, matricula: &str) -> AppResult<Vec<HoursRecord>> {
        let query = HoursQuery {
            operador_nome: name.trim().to_string(),
            operador_matricula: matricula.trim().to_string(),
        };
        let body = self.post(Endpoint::HoursByEmployee, &query)?;
        parse_list(&body)
    }

    pub fn global_history(&self) -> AppResult<Vec<HoursRecord>> {
        let body = self.get(Endpoint::GlobalHistory)?;
        parse_list(&body)
    }
}
