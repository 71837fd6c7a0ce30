use tracing::warn;

pub struct Config {
    pub host: String,
    pub http_port: u16,
    /// Flodesk credential; `None` when unset. Submissions are rejected with a
    /// configuration error until it is provided.
    pub flodesk_api_key: Option<String>,
    /// Override for the Flodesk API root, mainly for pointing the server at a
    /// staging host. `None` uses the production API.
    pub flodesk_api_url: Option<String>,
    pub allowed_origins: Vec<String>,
    /// When true, provider failures during signup still report success to the
    /// visitor and are only visible in server logs.
    pub fail_open: bool,
}

impl Config {
    const DEFAULT_HOST: &str = "0.0.0.0";
    const DEFAULT_HTTP_PORT: u16 = 8080;

    pub fn from_env() -> Self {
        let host = std::env::var("WAITLIST_HOST").unwrap_or_else(|_| Self::DEFAULT_HOST.to_string());
        let http_port = std::env::var("WAITLIST_HTTP_PORT")
            .unwrap_or_else(|_| Self::DEFAULT_HTTP_PORT.to_string())
            .parse::<u16>()
            .unwrap_or(Self::DEFAULT_HTTP_PORT);

        let flodesk_api_key = std::env::var("FLODESK_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        if flodesk_api_key.is_none() {
            warn!("FLODESK_API_KEY not set, lead submissions will fail with a configuration error");
        }

        Self {
            host,
            http_port,
            flodesk_api_key,
            flodesk_api_url: std::env::var("FLODESK_API_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            allowed_origins: std::env::var("WAITLIST_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "*".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            fail_open: std::env::var("WAITLIST_FAIL_OPEN")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
        }
    }
}
