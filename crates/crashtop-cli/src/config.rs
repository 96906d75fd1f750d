use crashtop_client::{DEFAULT_ENDPOINT, DEFAULT_UNIVERSE};
use std::env;

/// Backend settings resolved once at startup and threaded through the
/// pipeline. Credentials come only from the process environment, never
/// from flags, so they cannot leak into process listings or shell history.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub endpoint: String,
    pub universe: String,
    pub project: Option<String>,
    pub token: Option<String>,
}

impl BackendConfig {
    pub fn from_env(project_flag: Option<String>) -> Self {
        BackendConfig {
            endpoint: env::var("BACKTRACE_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            universe: env::var("BACKTRACE_UNIVERSE")
                .unwrap_or_else(|_| DEFAULT_UNIVERSE.to_string()),
            project: project_flag.or_else(|| env::var("BACKTRACE_PROJECT").ok()),
            token: env::var("BACKTRACE_API_KEY").ok(),
        }
    }
}
