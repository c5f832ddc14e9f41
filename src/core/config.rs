use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub notifications: NotificationConfig,
    pub content: ContentConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub frontend_url: String,
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

/// Operator API token for the moderation endpoints.
///
/// Token issuance and the one-time-token check on the public submission path
/// belong to the surrounding platform; this service only verifies the
/// operator bearer token.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub admin_token: String,
}

/// Where and how the operator alert for a new report is sent.
///
/// The notify address is resolved once at startup (NOTIFY_EMAIL, falling
/// back to ADMIN_EMAIL) and injected here, never read from ambient state.
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    pub notify_email: String,
    pub site_name: String,
    pub mailer_endpoint: String,
    /// Link to the moderation queue included in every alert body
    pub queue_url: String,
}

/// Content collaborator API (permalink and title lookups by post id)
#[derive(Debug, Clone)]
pub struct ContentConfig {
    pub base_url: String,
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
            // Only error if it's not "file not found" - that's acceptable
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        let app = AppConfig::from_env()?;
        let notifications = NotificationConfig::from_env(&app)?;

        Ok(Config {
            app,
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            notifications,
            content: ContentConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
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

        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            frontend_url,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    // Default values for database connection pool (conservative defaults for small-medium apps)
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl AuthConfig {
    pub fn from_env() -> Result<Self, String> {
        let admin_token = env::var("ADMIN_API_TOKEN")
            .map_err(|_| "ADMIN_API_TOKEN environment variable is required".to_string())?;

        if admin_token.is_empty() {
            return Err("ADMIN_API_TOKEN must not be empty".to_string());
        }

        Ok(Self { admin_token })
    }
}

impl NotificationConfig {
    pub fn from_env(app: &AppConfig) -> Result<Self, String> {
        let admin_email = env::var("ADMIN_EMAIL")
            .map_err(|_| "ADMIN_EMAIL environment variable is required".to_string())?;

        // NOTIFY_EMAIL overrides the site admin address when set and non-empty
        let notify_email = env::var("NOTIFY_EMAIL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or(admin_email);

        let site_name = env::var("SITE_NAME").unwrap_or_else(|_| "Example Site".to_string());

        let mailer_endpoint = env::var("MAILER_ENDPOINT")
            .map_err(|_| "MAILER_ENDPOINT environment variable is required".to_string())?;

        let queue_url = env::var("ADMIN_QUEUE_URL")
            .unwrap_or_else(|_| format!("{}/admin/reports", app.frontend_url));

        Ok(Self {
            notify_email,
            site_name,
            mailer_endpoint,
            queue_url,
        })
    }
}

impl ContentConfig {
    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("CONTENT_API_URL")
            .map_err(|_| "CONTENT_API_URL environment variable is required".to_string())?;

        Ok(Self { base_url })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Linkreport API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Broken link report intake and moderation API".to_string());

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
