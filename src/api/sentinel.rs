//! Success flags carried in response bodies.
//!
//! The service reports the outcome of an operation in a body field, not in
//! the HTTP status, and the field is either a JSON boolean or one of the
//! strings `"True"` / `"False"`. Both shapes are folded into one `bool`
//! right after deserialization.

use crate::errors::{AppError, AppResult};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Sentinel {
    Flag(bool),
    Text(String),
}

impl Sentinel {
    pub fn as_bool(&self) -> AppResult<bool> {
        match self {
            Sentinel::Flag(b) => Ok(*b),
            Sentinel::Text(s) => match s.trim().to_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                other => Err(AppError::Parse(format!("valor de status inesperado '{other}'"))),
            },
        }
    }
}

/// Check a sentinel, turning `false` into a business-rule failure.
pub fn require(field: &str, value: Option<&Sentinel>, failure: &str) -> AppResult<()> {
    let sentinel =
        value.ok_or_else(|| AppError::Parse(format!("resposta sem o campo '{field}'")))?;
    if sentinel.as_bool()? {
        Ok(())
    } else {
        Err(AppError::BusinessRule(failure.to_string()))
    }
}

/// A body that is either one object or an array of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(v) => v,
            OneOrMany::One(t) => vec![t],
        }
    }

    pub fn into_first(self) -> Option<T> {
        self.into_vec().into_iter().next()
    }
}
