use crate::errors::{AppError, AppResult};
use crate::models::shift::{ShiftWindow, default_shifts};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variables that override the admin credentials.
pub const ENV_ADMIN_USER: &str = "DOORBELL_ADMIN_USER";
pub const ENV_ADMIN_PASS: &str = "DOORBELL_ADMIN_PASS";

/// Which durable store holds the ring log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Csv,
    Sqlite,
}

impl Backend {
    /// `.sqlite` / `.db` → SQLite, anything else → CSV.
    pub fn from_path(path: &str) -> Self {
        let lower = path.to_lowercase();
        if lower.ends_with(".sqlite") || lower.ends_with(".db") {
            Backend::Sqlite
        } else {
            Backend::Csv
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_path")]
    pub log_path: String,
    #[serde(default)]
    pub backend: Backend,
    #[serde(default = "default_photos_dir")]
    pub photos_dir: String,
    #[serde(default = "default_reports_dir")]
    pub reports_dir: String,
    #[serde(default = "default_shifts")]
    pub shifts: Vec<ShiftWindow>,
    #[serde(default = "default_badge_auto_ring_len")]
    pub badge_auto_ring_len: usize,
    #[serde(default)]
    pub require_photo: bool,
    #[serde(default = "default_admin_user")]
    pub admin_user: String,
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
}

fn default_log_path() -> String {
    Config::config_dir()
        .join("doorbell_log.csv")
        .to_string_lossy()
        .to_string()
}
fn default_photos_dir() -> String {
    Config::config_dir()
        .join("photos")
        .to_string_lossy()
        .to_string()
}
fn default_reports_dir() -> String {
    Config::config_dir()
        .join("reports")
        .to_string_lossy()
        .to_string()
}
fn default_badge_auto_ring_len() -> usize {
    5
}
fn default_admin_user() -> String {
    "admin".to_string()
}
fn default_admin_password() -> String {
    "doorbell".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
            backend: Backend::default(),
            photos_dir: default_photos_dir(),
            reports_dir: default_reports_dir(),
            shifts: default_shifts(),
            badge_auto_ring_len: default_badge_auto_ring_len(),
            require_photo: false,
            admin_user: default_admin_user(),
            admin_password: default_admin_password(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("doorbell")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".doorbell")
        }
    }

    /// Return the full path of the default config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("doorbell.conf")
    }

    /// Load configuration from `path` (or the default location), falling back
    /// to defaults when the file does not exist. Admin credentials can be
    /// overridden through the environment.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_file);

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path)?;
            Self::from_yaml(&content)?
        } else {
            Config::default()
        };

        cfg.apply_env_overrides();
        Ok(cfg)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        let cfg: Config = serde_yaml::from_str(content)
            .map_err(|e| AppError::Config(format!("failed to parse configuration: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(user) = env::var(ENV_ADMIN_USER) {
            self.admin_user = user;
        }
        if let Ok(pass) = env::var(ENV_ADMIN_PASS) {
            self.admin_password = pass;
        }
    }

    fn validate(&self) -> AppResult<()> {
        if self.badge_auto_ring_len == 0 {
            return Err(AppError::Config(
                "badge_auto_ring_len must be at least 1".into(),
            ));
        }
        if let Some(w) = self.shifts.iter().find(|w| w.name.trim().is_empty()) {
            return Err(AppError::Config(format!(
                "shift starting at {} has an empty name",
                w.start.format("%H:%M")
            )));
        }
        Ok(())
    }

    /// Apply the `--log` override: the extension decides the backend.
    pub fn override_log(&mut self, log: &str) {
        self.log_path = log.to_string();
        self.backend = Backend::from_path(log);
    }

    pub fn log_file(&self) -> PathBuf {
        expand_tilde(&self.log_path)
    }

    pub fn photos_path(&self) -> PathBuf {
        expand_tilde(&self.photos_dir)
    }

    pub fn reports_path(&self) -> PathBuf {
        expand_tilde(&self.reports_dir)
    }

    pub fn shift_names(&self) -> Vec<String> {
        self.shifts.iter().map(|w| w.name.clone()).collect()
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| AppError::Config(format!("failed to serialize configuration: {e}")))
    }

    /// Write the configuration file (creating its directory).
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let yaml = self.to_yaml()?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }
}
