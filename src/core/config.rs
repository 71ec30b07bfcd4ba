use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub auth: AuthConfig,
    pub geocoding: GeocodingConfig,
    pub store: StoreConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
    pub max_photo_size: usize,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub demo_username: String,
    pub demo_password: String,
    pub sign_in_delay: Duration,
}

#[derive(Debug, Clone)]
pub struct GeocodingConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

/// Which `ReportRepository` implementation the composition root builds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportBackend {
    Memory,
    Remote { base_url: String },
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: ReportBackend,
    pub simulate_latency: bool,
    pub seed_demo_reports: bool,
    pub progress_simulation_enabled: bool,
    pub progress_simulation_interval: Duration,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
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
            auth: AuthConfig::from_env()?,
            geocoding: GeocodingConfig::from_env()?,
            store: StoreConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

/// Parse a boolean flag, accepting the usual spellings
fn parse_flag(name: &str, default: bool) -> Result<bool, String> {
    match env::var(name) {
        Err(_) => Ok(default),
        Ok(value) => match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(format!("{} must be a boolean (true/false)", name)),
        },
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 10 * 1024 * 1024; // 10MB
    const DEFAULT_MAX_PHOTO_SIZE: usize = 10 * 1024 * 1024; // 10MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        let max_photo_size = env::var("MAX_PHOTO_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_PHOTO_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_PHOTO_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
            max_photo_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AuthConfig {
    const DEFAULT_TOKEN_TTL_SECS: u64 = 86400; // 24 hours
    const DEFAULT_SIGN_IN_DELAY_MS: u64 = 1000;

    pub fn from_env() -> Result<Self, String> {
        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| "JWT_SECRET environment variable is required".to_string())?;

        let token_ttl_secs = env::var("TOKEN_TTL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TOKEN_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "TOKEN_TTL_SECS must be a valid number".to_string())?;

        let demo_username = env::var("DEMO_USERNAME").unwrap_or_else(|_| "admin".to_string());
        let demo_password = env::var("DEMO_PASSWORD").unwrap_or_else(|_| "1234".to_string());

        let sign_in_delay_ms = env::var("SIGN_IN_DELAY_MS")
            .unwrap_or_else(|_| Self::DEFAULT_SIGN_IN_DELAY_MS.to_string())
            .parse::<u64>()
            .map_err(|_| "SIGN_IN_DELAY_MS must be a valid number".to_string())?;

        Ok(Self {
            jwt_secret,
            token_ttl: Duration::from_secs(token_ttl_secs),
            demo_username,
            demo_password,
            sign_in_delay: Duration::from_millis(sign_in_delay_ms),
        })
    }
}

impl GeocodingConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 10;

    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("NOMINATIM_BASE_URL")
            .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string())
            .trim_end_matches('/')
            .to_string();

        let user_agent = env::var("NOMINATIM_USER_AGENT")
            .unwrap_or_else(|_| "NagarSevaCore/1.0 (civic-issue-reporting)".to_string());

        let timeout_secs = env::var("GEOCODING_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "GEOCODING_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            base_url,
            user_agent,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl StoreConfig {
    const DEFAULT_PROGRESS_INTERVAL_SECS: u64 = 30;

    pub fn from_env() -> Result<Self, String> {
        let backend = match env::var("REPORT_BACKEND")
            .unwrap_or_else(|_| "memory".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" => ReportBackend::Memory,
            "remote" => {
                let base_url = env::var("REPORT_SERVICE_URL").map_err(|_| {
                    "REPORT_SERVICE_URL must be set when REPORT_BACKEND=remote".to_string()
                })?;
                ReportBackend::Remote {
                    base_url: base_url.trim_end_matches('/').to_string(),
                }
            }
            other => {
                return Err(format!(
                    "REPORT_BACKEND must be 'memory' or 'remote', got '{}'",
                    other
                ))
            }
        };

        let progress_interval_secs = env::var("PROGRESS_SIMULATION_INTERVAL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_PROGRESS_INTERVAL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "PROGRESS_SIMULATION_INTERVAL_SECS must be a valid number".to_string())?;

        Ok(Self {
            backend,
            simulate_latency: parse_flag("STORE_SIMULATE_LATENCY", true)?,
            seed_demo_reports: parse_flag("SEED_DEMO_REPORTS", true)?,
            progress_simulation_enabled: parse_flag("PROGRESS_SIMULATION_ENABLED", false)?,
            progress_simulation_interval: Duration::from_secs(progress_interval_secs.max(1)),
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Nagar Seva API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Civic issue reporting API for Nagar Seva".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}
