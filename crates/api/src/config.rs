use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Session token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Site-level settings consumed by handlers and actions.
    pub site: SiteConfig,
}

/// Settings describing the public site itself.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Canonical base URL, used in outbound email links.
    pub site_url: String,
    /// Shared secret required by `POST /api/revalidate`. When unset the
    /// endpoint rejects every request.
    pub revalidate_secret: Option<String>,
    /// Analytics measurement id; the client loads analytics only when this
    /// is set and consent was granted.
    pub analytics_measurement_id: Option<String>,
    /// Inbox notified of new contact submissions.
    pub admin_notify_email: Option<String>,
    /// Lifetime of a cached page render in seconds.
    pub page_cache_ttl_secs: u64,
}

impl SiteConfig {
    /// Whether session cookies should carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.site_url.starts_with("https://")
    }
}

/// Read an optional variable, treating blank values as unset.
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SITE_URL`             | `http://localhost:3000`    |
    /// | `REVALIDATE_SECRET`    | unset                      |
    /// | `GA_MEASUREMENT_ID`    | unset                      |
    /// | `ADMIN_NOTIFY_EMAIL`   | unset                      |
    /// | `PAGE_CACHE_TTL_SECS`  | `3600`                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let page_cache_ttl_secs: u64 = std::env::var("PAGE_CACHE_TTL_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("PAGE_CACHE_TTL_SECS must be a valid u64");

        let site = SiteConfig {
            site_url: optional_var("SITE_URL").unwrap_or_else(|| "http://localhost:3000".into()),
            revalidate_secret: optional_var("REVALIDATE_SECRET"),
            analytics_measurement_id: optional_var("GA_MEASUREMENT_ID"),
            admin_notify_email: optional_var("ADMIN_NOTIFY_EMAIL"),
            page_cache_ttl_secs,
        };

        if site.revalidate_secret.is_none() {
            tracing::warn!(
                "REVALIDATE_SECRET is not set; /api/revalidate will reject all requests"
            );
        }

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            site,
        }
    }
}
