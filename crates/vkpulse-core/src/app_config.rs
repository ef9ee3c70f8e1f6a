#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// VK user or service token passed through as `access_token`.
    pub access_token: Option<String>,
    pub api_base_url: String,
    pub api_version: String,
    /// Items requested per window (`count`); VK caps this at 200.
    pub page_size: u32,
    pub window_days: u32,
    pub inter_window_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Base URL of a text-classification server exposing `POST /predict`.
    pub classifier_url: Option<String>,
    pub classifier_batch_size: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[redacted]"),
            )
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .field("page_size", &self.page_size)
            .field("window_days", &self.window_days)
            .field("inter_window_delay_ms", &self.inter_window_delay_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("classifier_url", &self.classifier_url)
            .field("classifier_batch_size", &self.classifier_batch_size)
            .finish()
    }
}
