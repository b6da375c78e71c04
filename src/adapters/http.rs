use crate::domain::model::{InvoiceKey, RawDocument};
use crate::domain::ports::{ConfigProvider, InvoiceSource};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Posts the invoice key to the SEFAZ relay and returns whatever page comes back.
pub struct InvoiceLookupClient {
    client: Client,
    endpoint: String,
    homologation: bool,
}

impl InvoiceLookupClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            homologation: false,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Ok(Self::new(
            config.lookup_endpoint(),
            Duration::from_secs(config.timeout_seconds()),
        )?
        .with_homologation(config.homologation()))
    }

    pub fn with_homologation(mut self, homologation: bool) -> Self {
        self.homologation = homologation;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// `HML=false&chaveNFe=<key>`
    pub fn form_body(&self, key: &InvoiceKey) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("HML", if self.homologation { "true" } else { "false" })
            .append_pair("chaveNFe", key.as_str())
            .finish()
    }
}

#[async_trait]
impl InvoiceSource for InvoiceLookupClient {
    async fn fetch_raw(&self, key: &InvoiceKey) -> Result<RawDocument> {
        tracing::debug!("📡 POST {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(self.form_body(key))
            .send()
            .await?;

        // SEFAZ 以 HTML 內容表示查無資料，狀態碼不可靠
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("⚠️ Relay answered with status {}, parsing body anyway", status);
        } else {
            tracing::debug!("📡 Relay response status: {}", status);
        }

        let body = response.text().await?;
        tracing::debug!("📡 Received {} bytes", body.len());
        Ok(RawDocument::new(body))
    }
}
