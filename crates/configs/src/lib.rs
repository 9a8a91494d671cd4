use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

pub const DEFAULT_DB_NAME: &str = "bike-club";
pub const DEFAULT_DB_HOST: &str = "localhost:27017";
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 72;
/// Used only when `ACCESS_TOKEN_SECRET` is not provided; startup warns about it.
pub const DEV_TOKEN_SECRET: &str = "dev-secret-change-me";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".into(), port: 5000, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Full connection string; takes precedence over user/password/host.
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_db_host")]
    pub host: String,
    #[serde(default = "default_db_name")]
    pub name: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_server_selection_timeout")]
    pub server_selection_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: String::new(),
            user: None,
            password: None,
            host: default_db_host(),
            name: default_db_name(),
            connect_timeout_secs: default_connect_timeout(),
            server_selection_timeout_secs: default_server_selection_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
    /// Require a bearer token on PATCH/DELETE /booking/:id.
    #[serde(default)]
    pub protect_booking_mutations: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { jwt_secret: String::new(), token_ttl_hours: default_token_ttl_hours(), protect_booking_mutations: false }
    }
}

fn default_db_host() -> String { DEFAULT_DB_HOST.to_string() }
fn default_db_name() -> String { DEFAULT_DB_NAME.to_string() }
fn default_connect_timeout() -> u64 { 10 }
fn default_server_selection_timeout() -> u64 { 30 }
fn default_token_ttl_hours() -> i64 { DEFAULT_TOKEN_TTL_HOURS }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` when present, otherwise start from defaults; env vars are
    /// overlaid in both cases.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_default();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize_from_env();
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.auth.normalize_from_env();
        self.auth.validate()?;
        Ok(())
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl ServerConfig {
    pub fn normalize_from_env(&mut self) {
        if let Some(host) = env_non_empty("SERVER_HOST") {
            self.host = host;
        }
        // PORT wins over SERVER_PORT, matching common PaaS conventions
        let port = env_non_empty("PORT").or_else(|| env_non_empty("SERVER_PORT"));
        if let Some(p) = port.and_then(|p| p.parse::<u16>().ok()) {
            self.port = p;
        }
        if let Some(w) = env_non_empty("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok()) {
            self.worker_threads = Some(w);
        }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "0.0.0.0".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if self.uri.trim().is_empty() {
            if let Some(uri) = env_non_empty("MONGODB_URI").or_else(|| env_non_empty("DATABASE_URL")) {
                self.uri = uri;
            }
        }
        if let Some(user) = env_non_empty("DB_USER") {
            self.user = Some(user);
        }
        if let Some(pass) = env_non_empty("DB_PASS") {
            self.password = Some(pass);
        }
        if let Some(host) = env_non_empty("DB_HOST") {
            self.host = host;
        }
        if let Some(name) = env_non_empty("DB_NAME") {
            self.name = name;
        }
    }

    /// Resolve the connection string: explicit URI first, then an SRV URI built from
    /// credentials, then a plain host URI.
    pub fn connection_uri(&self) -> String {
        if !self.uri.trim().is_empty() {
            return self.uri.trim().to_string();
        }
        match (&self.user, &self.password) {
            (Some(user), Some(pass)) => format!(
                "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority",
                user, pass, self.host
            ),
            _ => format!("mongodb://{}", self.host),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let uri = self.connection_uri().to_lowercase();
        if !(uri.starts_with("mongodb://") || uri.starts_with("mongodb+srv://")) {
            return Err(anyhow!("database uri must start with mongodb:// or mongodb+srv://"));
        }
        if self.name.trim().is_empty() {
            return Err(anyhow!("database.name is empty"));
        }
        if self.connect_timeout_secs == 0 || self.server_selection_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl AuthConfig {
    pub fn normalize_from_env(&mut self) {
        if let Some(secret) = env_non_empty("ACCESS_TOKEN_SECRET") {
            self.jwt_secret = secret;
        }
        if let Some(ttl) = env_non_empty("TOKEN_TTL_HOURS").and_then(|v| v.parse::<i64>().ok()) {
            self.token_ttl_hours = ttl;
        }
        if let Some(flag) = env_non_empty("PROTECT_BOOKING_MUTATIONS") {
            self.protect_booking_mutations = matches!(flag.to_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.token_ttl_hours <= 0 {
            return Err(anyhow!("auth.token_ttl_hours must be positive"));
        }
        Ok(())
    }

    pub fn has_secret(&self) -> bool {
        !self.jwt_secret.trim().is_empty()
    }

    /// Configured secret, or the development fallback when none was supplied.
    pub fn secret_or_dev(&self) -> String {
        if self.has_secret() { self.jwt_secret.clone() } else { DEV_TOKEN_SECRET.to_string() }
    }
}
