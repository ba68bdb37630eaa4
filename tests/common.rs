#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn door() -> Command {
    cargo_bin_cmd!("doorbell")
}

/// Per-test sandbox: its own config file, ring log, photo and report dirs.
pub struct Sandbox {
    pub dir: PathBuf,
    pub config: String,
    pub log: String,
}

impl Sandbox {
    /// Fresh sandbox under the system temp dir; `ext` picks the backend.
    pub fn new(name: &str, ext: &str) -> Self {
        Self::with_config(name, ext, "")
    }

    /// Same, with extra YAML appended to the generated config.
    pub fn with_config(name: &str, ext: &str, extra_yaml: &str) -> Self {
        let dir = env::temp_dir().join(format!("doorbell_it_{name}"));
        fs::remove_dir_all(&dir).ok();
        fs::create_dir_all(&dir).expect("create sandbox");

        let config = dir.join("doorbell.conf");
        let yaml = format!(
            "photos_dir: {}\nreports_dir: {}\n{extra_yaml}",
            dir.join("photos").display(),
            dir.join("reports").display(),
        );
        fs::write(&config, yaml).expect("write config");

        let log = dir.join(format!("rings.{ext}"));

        Self {
            dir,
            config: config.to_string_lossy().to_string(),
            log: log.to_string_lossy().to_string(),
        }
    }

    /// `doorbell --config .. --log ..` with admin overrides cleared.
    pub fn cmd(&self) -> Command {
        let mut c = door();
        c.env_remove("DOORBELL_ADMIN_USER")
            .env_remove("DOORBELL_ADMIN_PASS")
            .args(["--config", &self.config, "--log", &self.log]);
        c
    }

    pub fn out(&self, name: &str) -> String {
        self.dir.join(name).to_string_lossy().to_string()
    }

    pub fn log_text(&self) -> String {
        fs::read_to_string(&self.log).unwrap_or_default()
    }

    /// Write a CSV log with fixed timestamps.
    pub fn seed_csv(&self) {
        let rows = "\
timestamp,name,username,badge,note,shift,photo_ref
2025-09-01T08:15:00,Ann Lee,alee,,parcel,Day,
2025-09-15T22:40:00,Bob Stone,,777,,Night,
2025-10-01T05:10:00,Carl Diaz,cdiaz,,,Unscheduled,
";
        fs::write(&self.log, rows).expect("seed csv");
    }

    pub fn files_ending_with(&self, suffix: &str) -> Vec<PathBuf> {
        fs::read_dir(&self.dir)
            .map(|rd| {
                rd.filter_map(|e| e.ok())
                    .map(|e| e.path())
                    .filter(|p| p.to_string_lossy().ends_with(suffix))
                    .collect()
            })
            .unwrap_or_default()
    }
}
