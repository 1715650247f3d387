use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use client_core::service::normalize_base_url;

pub const DEFAULT_CONFIG_FILE: &str = "netsereno.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub service_url: String,
    pub report_dir: PathBuf,
    pub accept_invalid_certs: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            service_url: "http://127.0.0.1:5000".into(),
            report_dir: PathBuf::from("."),
            accept_invalid_certs: false,
        }
    }
}

/// Overrides taken from the command line; they win over file and env.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub service_url: Option<String>,
    pub report_dir: Option<PathBuf>,
    pub accept_invalid_certs: bool,
}

pub fn load_settings(config_path: &Path, cli: &CliOverrides) -> Result<ClientSettings> {
    let raw = match fs::read_to_string(config_path) {
        Ok(raw) => Some(raw),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", config_path.display()))
        }
    };
    resolve_settings(raw.as_deref(), |key| std::env::var(key).ok(), cli)
}

fn resolve_settings(
    file_raw: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
    cli: &CliOverrides,
) -> Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    if let Some(raw) = file_raw {
        let file_cfg: HashMap<String, toml::Value> =
            toml::from_str(raw).context("invalid settings file")?;
        if let Some(v) = file_cfg.get("service_url").and_then(toml::Value::as_str) {
            settings.service_url = v.to_string();
        }
        if let Some(v) = file_cfg.get("report_dir").and_then(toml::Value::as_str) {
            settings.report_dir = PathBuf::from(v);
        }
        if let Some(v) = file_cfg
            .get("accept_invalid_certs")
            .and_then(toml::Value::as_bool)
        {
            settings.accept_invalid_certs = v;
        }
    }

    if let Some(v) = env("NETSERENO_SERVICE_URL") {
        settings.service_url = v;
    }
    if let Some(v) = env("APP__SERVICE_URL") {
        settings.service_url = v;
    }
    if let Some(v) = env("NETSERENO_REPORT_DIR") {
        settings.report_dir = PathBuf::from(v);
    }
    if let Some(v) = env("APP__REPORT_DIR") {
        settings.report_dir = PathBuf::from(v);
    }

    if let Some(v) = &cli.service_url {
        settings.service_url = v.clone();
    }
    if let Some(v) = &cli.report_dir {
        settings.report_dir = v.clone();
    }
    settings.accept_invalid_certs |= cli.accept_invalid_certs;

    settings.service_url = normalize_base_url(&settings.service_url)?;
    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
