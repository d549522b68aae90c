//! Unified application error type.
//! All modules (db, api, core, cli) return AppError to keep the error
//! handling consistent and easy to render as a single inline message.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Local store
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Remote service
    // ---------------------------
    /// Endpoint URL not configured: raised before any network call.
    #[error("URL da API não configurada para '{0}'. Verifique a variável {1}")]
    Configuration(&'static str, &'static str),

    #[error("Erro de conexão. Verifique sua internet e tente novamente. ({0})")]
    Network(String),

    #[error("Tempo limite excedido ao contactar {0}")]
    Timeout(String),

    #[error("Erro HTTP: {status} - {reason}")]
    Http { status: u16, reason: String },

    #[error("Resposta inválida do servidor: {0}")]
    Parse(String),

    /// Well-formed response whose sentinel field signals failure.
    #[error("{0}")]
    BusinessRule(String),

    // ---------------------------
    // Input errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Campos obrigatórios não preenchidos: {0}")]
    MissingFields(String),

    // ---------------------------
    // Session
    // ---------------------------
    #[error("Login required to access {0}")]
    NotLoggedIn(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True for the failures produced by the remote client.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            AppError::Configuration(..)
                | AppError::Network(_)
                | AppError::Timeout(_)
                | AppError::Http { .. }
                | AppError::Parse(_)
                | AppError::BusinessRule(_)
        )
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, AppError::Configuration(..))
    }
}

pub type AppResult<T> = Result<T, AppError>;
