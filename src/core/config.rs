use crate::config::{Config, Endpoint};
use crate::errors::{AppError, AppResult};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    /// YAML rendering of the effective configuration (file + env overrides),
    /// followed by the state of each endpoint.
    pub fn render(cfg: &Config) -> AppResult<String> {
        let mut out = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
        out.push('\n');
        for ep in Endpoint::ALL {
            let state = if cfg.endpoints.url(ep).is_some() {
                "configured"
            } else {
                "missing"
            };
            out.push_str(&format!("# {:<20} {:<8} ({})\n", ep.name(), state, ep.env_var()));
        }
        Ok(out)
    }

    pub fn default_editor() -> String {
        std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            })
    }

    /// Open the file with the requested editor, falling back to the default one.
    /// Returns the editor that succeeded.
    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<String> {
        let fallback = Self::default_editor();
        let requested = editor.map(str::to_string).unwrap_or_else(|| fallback.clone());

        if matches!(Command::new(&requested).arg(path).status(), Ok(s) if s.success()) {
            return Ok(requested);
        }
        if requested != fallback
            && matches!(Command::new(&fallback).arg(path).status(), Ok(s) if s.success())
        {
            return Ok(fallback);
        }
        Err(AppError::Config(format!(
            "failed to edit {} with '{requested}'",
            path.display()
        )))
    }
}
