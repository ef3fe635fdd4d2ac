/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// An empty list means any origin is allowed.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Base URL of the de-raining inference service.
    pub inference_url: String,
    /// Timeout for one inference call in seconds (default: `60`).
    pub inference_timeout_secs: u64,
    /// Directory for transient upload artifacts (default: `uploads`).
    pub upload_dir: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                 |
    /// |--------------------------|-------------------------|
    /// | `HOST`                   | `0.0.0.0`               |
    /// | `PORT`                   | `5000`                  |
    /// | `CORS_ORIGINS`           | (empty: allow any)      |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                    |
    /// | `INFERENCE_URL`          | `http://localhost:8000` |
    /// | `INFERENCE_TIMEOUT_SECS` | `60`                    |
    /// | `UPLOAD_DIR`             | `uploads`               |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let inference_url =
            std::env::var("INFERENCE_URL").unwrap_or_else(|_| "http://localhost:8000".into());

        let inference_timeout_secs: u64 = std::env::var("INFERENCE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("INFERENCE_TIMEOUT_SECS must be a valid u64");

        let upload_dir = std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            inference_url,
            inference_timeout_secs,
            upload_dir,
        }
    }
}
