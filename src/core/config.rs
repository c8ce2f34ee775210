use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub webhook: WebhookConfig,
    pub telemetry: TelemetryConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// S3-compatible blob storage holding complaint images
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Endpoint used by the service itself
    pub endpoint: String,
    /// Endpoint embedded into stored `file_url`s (defaults to `endpoint`)
    pub public_endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    /// Bucket holding the uploaded images
    pub container: String,
    pub region: String,
}

/// Workflow endpoint notified of every new complaint
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_format: LogFormat,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            webhook: WebhookConfig::from_env()?,
            telemetry: TelemetryConfig::from_env()?,
            swagger: SwaggerConfig::from_env(),
        })
    }
}

fn required(name: &str) -> Result<String, String> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| format!("{} environment variable is required", name))
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = required("DATABASE_URL")?;

        Ok(Self {
            url,
            max_connections: parse_or("DB_MAX_CONNECTIONS", Self::DEFAULT_MAX_CONNECTIONS)?,
            min_connections: parse_or("DB_MIN_CONNECTIONS", Self::DEFAULT_MIN_CONNECTIONS)?,
            acquire_timeout_secs: parse_or(
                "DB_ACQUIRE_TIMEOUT_SECS",
                Self::DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )?,
            idle_timeout_secs: parse_or("DB_IDLE_TIMEOUT_SECS", Self::DEFAULT_IDLE_TIMEOUT_SECS)?,
            max_lifetime_secs: parse_or("DB_MAX_LIFETIME_SECS", Self::DEFAULT_MAX_LIFETIME_SECS)?,
        })
    }
}

impl StorageConfig {
    pub fn from_env() -> Result<Self, String> {
        let endpoint = required("STORAGE_ENDPOINT")?
            .trim_end_matches('/')
            .to_string();

        let public_endpoint = env::var("STORAGE_PUBLIC_ENDPOINT")
            .ok()
            .filter(|s| !s.is_empty())
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| endpoint.clone());

        Ok(Self {
            endpoint,
            public_endpoint,
            access_key: required("STORAGE_ACCESS_KEY")?,
            secret_key: required("STORAGE_SECRET_KEY")?,
            container: env::var("STORAGE_CONTAINER")
                .unwrap_or_else(|_| "complaint-images".to_string()),
            region: env::var("STORAGE_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
        })
    }
}

impl WebhookConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 10;

    pub fn from_env() -> Result<Self, String> {
        let url = required("WEBHOOK_URL")?;
        let timeout_secs = parse_or("WEBHOOK_TIMEOUT_SECS", Self::DEFAULT_TIMEOUT_SECS)?;

        Ok(Self {
            url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl TelemetryConfig {
    pub fn from_env() -> Result<Self, String> {
        let log_format = match env::var("LOG_FORMAT")
            .unwrap_or_else(|_| "pretty".to_string())
            .to_lowercase()
            .as_str()
        {
            "pretty" | "text" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            other => return Err(format!("Invalid LOG_FORMAT: {}", other)),
        };

        Ok(Self { log_format })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Self {
        Self {
            title: env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Complaint Desk API".to_string()),
            version: env::var("SWAGGER_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string()),
            description: env::var("SWAGGER_DESCRIPTION")
                .unwrap_or_else(|_| "Complaint intake and triage endpoints".to_string()),
        }
    }
}

fn parse_or<T>(name: &str, default: T) -> Result<T, String>
where
    T: std::str::FromStr,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|_| format!("{} must be a valid number", name)),
        Err(_) => Ok(default),
    }
}
