use tracing::info;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
}

impl Config {
    /// Reads `ACTIVITIES_API_URL` from the environment, falling back to
    /// the local development server.
    pub fn from_env() -> Self {
        let api_url = std::env::var("ACTIVITIES_API_URL").unwrap_or_else(|_| {
            info!("ACTIVITIES_API_URL not set, using {}", DEFAULT_API_URL);
            DEFAULT_API_URL.to_string()
        });

        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }
}
