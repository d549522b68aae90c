use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// One remote operation and where its URL comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    SubmitHours,
    RegisterEmployee,
    ListEmployees,
    DeleteEmployee,
    HoursByEmployee,
    GlobalHistory,
}

impl Endpoint {
    pub const ALL: [Endpoint; 6] = [
        Endpoint::SubmitHours,
        Endpoint::RegisterEmployee,
        Endpoint::ListEmployees,
        Endpoint::DeleteEmployee,
        Endpoint::HoursByEmployee,
        Endpoint::GlobalHistory,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::SubmitHours => "submit_hours",
            Endpoint::RegisterEmployee => "register_employee",
            Endpoint::ListEmployees => "list_employees",
            Endpoint::DeleteEmployee => "delete_employee",
            Endpoint::HoursByEmployee => "hours_by_employee",
            Endpoint::GlobalHistory => "global_history",
        }
    }

    /// Environment variable overriding the configured URL.
    pub fn env_var(&self) -> &'static str {
        match self {
            Endpoint::SubmitHours => "RHT_SUBMIT_HOURS_URL",
            Endpoint::RegisterEmployee => "RHT_REGISTER_EMPLOYEE_URL",
            Endpoint::ListEmployees => "RHT_LIST_EMPLOYEES_URL",
            Endpoint::DeleteEmployee => "RHT_DELETE_EMPLOYEE_URL",
            Endpoint::HoursByEmployee => "RHT_HOURS_BY_EMPLOYEE_URL",
            Endpoint::GlobalHistory => "RHT_GLOBAL_HISTORY_URL",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub submit_hours: Option<String>,
    pub register_employee: Option<String>,
    pub list_employees: Option<String>,
    pub delete_employee: Option<String>,
    pub hours_by_employee: Option<String>,
    pub global_history: Option<String>,
}

impl Endpoints {
    fn slot(&mut self, ep: Endpoint) -> &mut Option<String> {
        match ep {
            Endpoint::SubmitHours => &mut self.submit_hours,
            Endpoint::RegisterEmployee => &mut self.register_employee,
            Endpoint::ListEmployees => &mut self.list_employees,
            Endpoint::DeleteEmployee => &mut self.delete_employee,
            Endpoint::HoursByEmployee => &mut self.hours_by_employee,
            Endpoint::GlobalHistory => &mut self.global_history,
        }
    }

    /// Configured URL, blanks count as unset.
    pub fn url(&self, ep: Endpoint) -> Option<&str> {
        let v = match ep {
            Endpoint::SubmitHours => &self.submit_hours,
            Endpoint::RegisterEmployee => &self.register_employee,
            Endpoint::ListEmployees => &self.list_employees,
            Endpoint::DeleteEmployee => &self.delete_employee,
            Endpoint::HoursByEmployee => &self.hours_by_employee,
            Endpoint::GlobalHistory => &self.global_history,
        };
        v.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn set(&mut self, ep: Endpoint, url: Option<String>) {
        *self.slot(ep) = url;
    }

    /// Apply `RHT_*_URL` overrides from the environment.
    pub fn apply_env(&mut self) {
        for ep in Endpoint::ALL {
            if let Ok(v) = env::var(ep.env_var()) {
                let v = v.trim().to_string();
                self.set(ep, if v.is_empty() { None } else { Some(v) });
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub store: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub endpoints: Endpoints,
}

fn default_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: Self::store_file().to_string_lossy().to_string(),
            request_timeout_secs: default_timeout(),
            endpoints: Endpoints::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if let Ok(dir) = env::var("RHTLOGGER_HOME") {
            return PathBuf::from(dir);
        }
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rhtlogger")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rhtlogger")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rhtlogger.conf")
    }

    /// Return the default path of the local store
    pub fn store_file() -> PathBuf {
        Self::config_dir().join("rhtlogger.sqlite")
    }

    /// Store path with `~` expanded.
    pub fn store_path(&self) -> String {
        if self.store == ":memory:" {
            return self.store.clone();
        }
        expand_tilde(&self.store).to_string_lossy().to_string()
    }

    /// Parse a YAML document, environment overrides are not applied here.
    pub fn from_yaml(content: &str) -> AppResult<Self> {
        serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Load configuration from file (defaults if not found), then apply
    /// the `RHT_*_URL` environment overrides.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
            Self::from_yaml(&content).map_err(|_| AppError::ConfigLoad)?
        } else {
            Config::default()
        };

        cfg.endpoints.apply_env();
        Ok(cfg)
    }

    /// Write the default configuration file (when missing) and return its path.
    pub fn init_file(custom_store: Option<String>) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let path = Self::config_file();
        if path.exists() {
            return Ok(path);
        }

        let mut config = Config::default();
        if let Some(store) = custom_store {
            config.store = store;
        }

        let yaml = serde_yaml::to_string(&config).map_err(|_| AppError::ConfigSave)?;
        let mut file = fs::File::create(&path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(path)
    }
}
