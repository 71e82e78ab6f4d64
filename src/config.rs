use anyhow::{Error, Result, anyhow};
use dotenvy::dotenv;
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "http://openapi.xg.qq.com";

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    pub xinge_access_id: i64,
    pub xinge_secret_key: String,

    #[serde(default = "default_api_url")]
    pub xinge_api_url: String,

    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_request_timeout_seconds() -> u64 {
    10
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        dotenv().ok();

        Self::from_vars(std::env::vars())
    }

    /// Builds a config from `(NAME, value)` pairs using the same rules as the
    /// process environment.
    pub fn from_vars<I>(vars: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Self>(vars)
            .map_err(|e| anyhow!("Invalid or missing environmental variable: {}", e))?;

        if config.xinge_access_id <= 0 {
            return Err(anyhow!("XINGE_ACCESS_ID must be positive"));
        }

        if config.xinge_secret_key.is_empty() {
            return Err(anyhow!("XINGE_SECRET_KEY cannot be empty"));
        }

        Ok(config)
    }

    pub fn with_credentials(access_id: i64, secret_key: &str) -> Self {
        Self {
            xinge_access_id: access_id,
            xinge_secret_key: secret_key.to_string(),
            xinge_api_url: default_api_url(),
            request_timeout_seconds: default_request_timeout_seconds(),
        }
    }

    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.xinge_api_url = api_url.to_string();
        self
    }
}
