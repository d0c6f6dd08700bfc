// --- File: crates/quadra_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. sqlite:data/quadra.db, overridden via QUADRA__DATABASE__URL
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:data/quadra.db".to_string(),
        }
    }
}

// --- Booking Rules ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct BookingConfig {
    /// Reject new bookings that start after this week's Saturday
    #[serde(default)]
    pub current_week_only: bool,
}

// --- Admin Config ---
// Both secrets may be set to "secret_from_env" in config files, see env_vars.rs.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AdminConfig {
    pub password: String,
    pub token_secret: String,
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: i64,
}

fn default_token_ttl_minutes() -> i64 {
    480
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: "secret_from_env".to_string(),
            token_secret: "secret_from_env".to_string(),
            token_ttl_minutes: default_token_ttl_minutes(),
        }
    }
}

// --- CORS Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    /// Comma separated list of origins, or "*" to allow any origin.
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".to_string(),
        }
    }
}

impl CorsConfig {
    pub fn allows_any(&self) -> bool {
        self.allowed_origins.trim() == "*"
    }

    pub fn origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

// --- Static Files Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StaticFilesConfig {
    pub dir: String,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            dir: "wwwroot".to_string(),
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}
