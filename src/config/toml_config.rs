use crate::adapters::http::{
    build_client, HttpProvider, BRASIL_API_NAME, BRASIL_API_URL, DEFAULT_USER_AGENT, VIA_CEP_NAME,
    VIA_CEP_URL,
};
use crate::core::resolver::{Resolver, DEFAULT_DEADLINE};
use crate::domain::ports::SharedProvider;
use crate::utils::error::{CepError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub const MAX_DEADLINE_MS: u64 = 60_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RaceConfig {
    #[serde(default)]
    pub race: RaceSettings,
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RaceSettings {
    pub deadline_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpSettings {
    pub request_timeout_ms: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub name: String,
    pub url_template: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig {
            name: BRASIL_API_NAME.to_string(),
            url_template: BRASIL_API_URL.to_string(),
            enabled: true,
        },
        ProviderConfig {
            name: VIA_CEP_NAME.to_string(),
            url_template: VIA_CEP_URL.to_string(),
            enabled: true,
        },
    ]
}

impl RaceConfig {
    /// Stock BrasilAPI + ViaCEP setup used when no file is given.
    pub fn stock() -> Self {
        Self {
            providers: default_providers(),
            ..Self::default()
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CepError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CepError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are
    /// left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CepError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(deadline_ms) = self.race.deadline_ms {
            validation::validate_range("race.deadline_ms", deadline_ms, 1, MAX_DEADLINE_MS)?;
        }

        if let Some(timeout_ms) = self.http.request_timeout_ms {
            validation::validate_positive_number("http.request_timeout_ms", timeout_ms, 1)?;
        }

        if let Some(user_agent) = &self.http.user_agent {
            validation::validate_non_empty_string("http.user_agent", user_agent)?;
        }

        for (i, provider) in self.providers.iter().enumerate() {
            validation::validate_non_empty_string(&format!("providers[{}].name", i), &provider.name)?;
            validation::validate_url_template(
                &format!("providers[{}].url_template", i),
                &provider.url_template,
            )?;
        }

        validation::validate_unique_names(
            "providers.name",
            self.providers.iter().map(|p| p.name.as_str()),
        )?;

        Ok(())
    }

    pub fn deadline(&self) -> Duration {
        self.race
            .deadline_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DEADLINE)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.http.request_timeout_ms.map(Duration::from_millis)
    }

    pub fn user_agent(&self) -> &str {
        self.http.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    pub fn enabled_providers(&self) -> impl Iterator<Item = &ProviderConfig> {
        self.providers.iter().filter(|p| p.enabled)
    }

    /// Builds one shared HTTP client and an [`HttpProvider`] per enabled entry.
    pub fn build_providers(&self) -> Result<Vec<SharedProvider>> {
        let client = build_client(self.request_timeout(), self.user_agent())?;

        Ok(self
            .enabled_providers()
            .map(|p| {
                Arc::new(HttpProvider::new(&p.name, &p.url_template, client.clone()))
                    as SharedProvider
            })
            .collect())
    }

    pub fn build_resolver(&self) -> Result<Resolver> {
        Ok(Resolver::new(self.build_providers()?).with_deadline(self.deadline()))
    }
}

impl Validate for RaceConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
