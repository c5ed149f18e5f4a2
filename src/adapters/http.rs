use crate::domain::model::{FetchResult, NormalizedCode};
use crate::domain::ports::Provider;
use crate::utils::error::{ProviderError, Result};
use crate::utils::validation::CEP_PLACEHOLDER;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const BRASIL_API_NAME: &str = "BrasilAPI";
pub const BRASIL_API_URL: &str = "https://brasilapi.com.br/api/cep/v1/{cep}";
pub const VIA_CEP_NAME: &str = "ViaCEP";
pub const VIA_CEP_URL: &str = "http://viacep.com.br/ws/{cep}/json/";

pub const DEFAULT_USER_AGENT: &str = concat!("cep-race/", env!("CARGO_PKG_VERSION"));

/// Builds the client shared by every HTTP provider of a process.
pub fn build_client(request_timeout: Option<Duration>, user_agent: &str) -> Result<Client> {
    let mut builder = Client::builder().user_agent(user_agent);
    if let Some(timeout) = request_timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Provider that GETs a URL built from a template and returns the body
/// verbatim. Anything other than `200 OK` is a failure.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    name: String,
    url_template: String,
    client: Client,
}

impl HttpProvider {
    pub fn new(name: impl Into<String>, url_template: impl Into<String>, client: Client) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
            client,
        }
    }

    pub fn brasil_api(client: Client) -> Self {
        Self::new(BRASIL_API_NAME, BRASIL_API_URL, client)
    }

    pub fn via_cep(client: Client) -> Self {
        Self::new(VIA_CEP_NAME, VIA_CEP_URL, client)
    }

    pub fn url_for(&self, code: &NormalizedCode) -> String {
        self.url_template.replace(CEP_PLACEHOLDER, code.as_str())
    }

    async fn request(&self, code: &NormalizedCode) -> std::result::Result<FetchResult, ProviderError> {
        let url = self.url_for(code);
        tracing::debug!(provider = %self.name, url = %url, "Sending request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ProviderError::Request)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ProviderError::UnexpectedStatus { status });
        }

        let body = response.text().await.map_err(ProviderError::Body)?;

        tracing::info!(provider = %self.name, bytes = body.len(), "Response received");
        Ok(FetchResult::new(self.name.clone(), body))
    }
}

#[async_trait]
impl Provider for HttpProvider {
    async fn fetch(
        &self,
        code: &NormalizedCode,
        cancel: CancellationToken,
    ) -> std::result::Result<FetchResult, ProviderError> {
        tokio::select! {
            _ = cancel.cancelled() => Err(ProviderError::Cancelled),
            result = self.request(code) => result,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
