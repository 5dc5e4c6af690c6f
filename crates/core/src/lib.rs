pub mod domain;
pub mod llm;
pub mod prompt;
pub mod relay;

pub mod config {
    use anyhow::Context;

    pub const DEFAULT_LM_STUDIO_API_BASE_URL: &str = "http://localhost:1234/v1/chat/completions";
    pub const DEFAULT_LM_STUDIO_MODEL_NAME: &str = "google/gemma-3-4b";
    pub const DEFAULT_PORT: u16 = 8000;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub lm_studio_api_base_url: String,
        pub lm_studio_model_name: String,
        /// `None` leaves the outbound call without a deadline.
        pub lm_studio_timeout_secs: Option<u64>,
        pub port: u16,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
        where
            F: Fn(&str) -> Option<String>,
        {
            let non_empty = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

            let lm_studio_timeout_secs = non_empty("LM_STUDIO_TIMEOUT_SECS")
                .map(|s| s.trim().parse::<u64>())
                .transpose()
                .context("LM_STUDIO_TIMEOUT_SECS must be a whole number of seconds")?;

            let port = non_empty("PORT")
                .map(|s| s.trim().parse::<u16>())
                .transpose()
                .context("PORT must be a valid TCP port")?
                .unwrap_or(DEFAULT_PORT);

            Ok(Self {
                lm_studio_api_base_url: non_empty("LM_STUDIO_API_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_LM_STUDIO_API_BASE_URL.to_string()),
                lm_studio_model_name: non_empty("LM_STUDIO_MODEL_NAME")
                    .unwrap_or_else(|| DEFAULT_LM_STUDIO_MODEL_NAME.to_string()),
                lm_studio_timeout_secs,
                port,
                sentry_dsn: non_empty("SENTRY_DSN"),
            })
        }
    }

}
