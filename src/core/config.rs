use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub swagger: SwaggerConfig,
    pub storage: StorageConfig,
    pub geocoding: GeocodingConfig,
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

/// Supabase Auth (GoTrue) settings.
///
/// Access tokens are verified locally: with the project's HS256 JWT secret when
/// `SUPABASE_JWT_SECRET` is set, otherwise against the project's JWKS.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`
    pub supabase_url: String,
    /// Public anon key, sent as `apikey` header on GoTrue calls
    pub anon_key: String,
    pub jwt_secret: Option<String>,
    pub audience: String,
    pub jwks_cache_ttl: Duration,
    pub jwt_leeway: Duration,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Supabase Storage configuration (S3-compatible endpoint)
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// S3 endpoint, e.g. `https://abcd.supabase.co/storage/v1/s3`
    pub endpoint: String,
    /// Base for public object URLs, e.g. `https://abcd.supabase.co/storage/v1/object/public`
    pub public_base_url: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    pub region: String,
}

#[derive(Debug, Clone)]
pub struct GeocodingConfig {
    pub nominatim_url: String,
    pub user_agent: String,
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
            auth: AuthConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            geocoding: GeocodingConfig::from_env(),
        })
    }
}

/// Parse an optional env var, falling back to `default` when unset
fn parse_or<T>(key: &str, default: T) -> Result<T, String>
where
    T: std::str::FromStr + ToString,
{
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<T>()
        .map_err(|_| format!("{} must be a valid number", key))
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Comma-separated list, "*" allows any origin
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
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

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

impl AuthConfig {
    const DEFAULT_JWKS_CACHE_TTL_SECS: u64 = 3600; // 1 hour
    const DEFAULT_JWT_LEEWAY_SECS: u64 = 60;
    const DEFAULT_AUDIENCE: &'static str = "authenticated";

    pub fn from_env() -> Result<Self, String> {
        let supabase_url = env::var("SUPABASE_URL")
            .map_err(|_| "SUPABASE_URL environment variable is required".to_string())?
            .trim_end_matches('/')
            .to_string();

        let anon_key = env::var("SUPABASE_ANON_KEY")
            .map_err(|_| "SUPABASE_ANON_KEY environment variable is required".to_string())?;

        let jwt_secret = env::var("SUPABASE_JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty());

        let audience =
            env::var("JWT_AUDIENCE").unwrap_or_else(|_| Self::DEFAULT_AUDIENCE.to_string());

        let jwks_cache_ttl_secs = parse_or("JWKS_CACHE_TTL", Self::DEFAULT_JWKS_CACHE_TTL_SECS)?;
        let jwt_leeway_secs = parse_or("JWT_LEEWAY", Self::DEFAULT_JWT_LEEWAY_SECS)?;

        Ok(Self {
            supabase_url,
            anon_key,
            jwt_secret,
            audience,
            jwks_cache_ttl: Duration::from_secs(jwks_cache_ttl_secs),
            jwt_leeway: Duration::from_secs(jwt_leeway_secs),
        })
    }

    /// Issuer claim Supabase puts in access tokens
    pub fn issuer(&self) -> String {
        format!("{}/auth/v1", self.supabase_url)
    }

    /// Base URL of the GoTrue REST API
    pub fn auth_api_url(&self) -> String {
        format!("{}/auth/v1", self.supabase_url)
    }

    pub fn jwks_url(&self) -> String {
        format!("{}/auth/v1/.well-known/jwks.json", self.supabase_url)
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Nagar Mitra API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Civic issue reporting and authority portal API".to_string());

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

impl StorageConfig {
    pub fn from_env() -> Result<Self, String> {
        let supabase_url = env::var("SUPABASE_URL")
            .map_err(|_| "SUPABASE_URL environment variable is required".to_string())?
            .trim_end_matches('/')
            .to_string();

        let endpoint = env::var("STORAGE_S3_ENDPOINT")
            .unwrap_or_else(|_| format!("{}/storage/v1/s3", supabase_url));

        let public_base_url = env::var("STORAGE_PUBLIC_URL")
            .unwrap_or_else(|_| format!("{}/storage/v1/object/public", supabase_url))
            .trim_end_matches('/')
            .to_string();

        let access_key = env::var("STORAGE_ACCESS_KEY").unwrap_or_default();
        let secret_key = env::var("STORAGE_SECRET_KEY").unwrap_or_default();
        let bucket = env::var("STORAGE_BUCKET").unwrap_or_else(|_| "issue-media".to_string());
        let region = env::var("STORAGE_REGION").unwrap_or_else(|_| "us-east-1".to_string());

        Ok(Self {
            endpoint,
            public_base_url,
            access_key,
            secret_key,
            bucket,
            region,
        })
    }
}

impl GeocodingConfig {
    pub fn from_env() -> Self {
        Self {
            nominatim_url: env::var("NOMINATIM_URL")
                .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string())
                .trim_end_matches('/')
                .to_string(),
            user_agent: env::var("NOMINATIM_USER_AGENT")
                .unwrap_or_else(|_| "NagarMitra/1.0 (civic-issue-reporter)".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_config() -> AuthConfig {
        AuthConfig {
            supabase_url: "https://demo.supabase.co".to_string(),
            anon_key: "anon".to_string(),
            jwt_secret: None,
            audience: "authenticated".to_string(),
            jwks_cache_ttl: Duration::from_secs(60),
            jwt_leeway: Duration::from_secs(0),
        }
    }

    #[test]
    fn test_auth_urls_derive_from_project_url() {
        let config = auth_config();
        assert_eq!(config.issuer(), "https://demo.supabase.co/auth/v1");
        assert_eq!(
            config.jwks_url(),
            "https://demo.supabase.co/auth/v1/.well-known/jwks.json"
        );
    }

    #[test]
    fn test_swagger_credentials_require_both_parts() {
        let mut swagger = SwaggerConfig {
            username: Some("admin".to_string()),
            password: None,
            title: String::new(),
            version: String::new(),
            description: String::new(),
        };
        assert_eq!(swagger.credentials(), None);

        swagger.password = Some("secret".to_string());
        assert_eq!(swagger.credentials(), Some("admin:secret".to_string()));
    }
}
