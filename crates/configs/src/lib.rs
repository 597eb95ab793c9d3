use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub resource: ResourceConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

/// Where the CRUD resource is mounted.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceConfig {
    #[serde(default = "default_resource_path")]
    pub path: String,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self { path: default_resource_path() }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8080 }
fn default_resource_path() -> String { "/item".into() }

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`); falls back to [`AppConfig::from_env`]
    /// when the file does not exist. A present but invalid file is an error.
    pub fn load_and_validate() -> Result<Self> {
        if !Path::new(&config_path()).exists() {
            return Self::from_env();
        }
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Build a config from `SERVER_HOST`, `SERVER_PORT`, `TOKIO_WORKER_THREADS`
    /// and `RESOURCE_PATH`, used when no config file exists.
    pub fn from_env() -> Result<Self> {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Ok(port) = std::env::var("SERVER_PORT") {
            cfg.server.port = port
                .parse()
                .map_err(|_| anyhow!("SERVER_PORT is not a valid port: {port}"))?;
        }
        if let Ok(w) = std::env::var("TOKIO_WORKER_THREADS") {
            cfg.server.worker_threads = w.parse().ok();
        }
        if let Ok(path) = std::env::var("RESOURCE_PATH") {
            cfg.resource.path = path;
        }
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.resource.normalize()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl ResourceConfig {
    fn normalize(&mut self) -> Result<()> {
        let trimmed = self.path.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(anyhow!("resource.path must name a resource, e.g. /item"));
        }
        if !trimmed.starts_with('/') {
            return Err(anyhow!("resource.path must start with '/'"));
        }
        if trimmed.contains(|c: char| matches!(c, ':' | '*' | '{' | '}')) {
            return Err(anyhow!("resource.path must be a literal path without ':', '*', '{{' or '}}'"));
        }
        if trimmed == "/health" {
            return Err(anyhow!("resource.path /health is reserved"));
        }
        self.path = trimmed.to_string();
        Ok(())
    }
}
