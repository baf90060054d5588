use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use async_trait::async_trait;
use colle_storage::catalog::StorageCatalog;
use colle_storage::contract::{
    blank_contract_template, ContractBuilder, MemoryDocumentEngine, TemplateError, TemplateSource,
};
use colle_storage::l10n::Language;
use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::TemplateConfig;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) catalog: Arc<StorageCatalog>,
    pub(crate) builder: Arc<ContractBuilder>,
    /// Contract builds take this before allocating an agreement number.
    pub(crate) build_slot: Arc<tokio::sync::Mutex<()>>,
}

/// Fetches hosted blank agreements, one file per language.
pub(crate) struct HttpTemplateSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTemplateSource {
    pub(crate) fn new(base_url: String) -> HttpTemplateSource {
        HttpTemplateSource {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn template_url(&self, language: Language) -> String {
        format!("{}/contract-{}.pdf", self.base_url, language.key())
    }
}

#[async_trait]
impl TemplateSource for HttpTemplateSource {
    async fn fetch(&self, language: Language) -> Result<Vec<u8>, TemplateError> {
        let response = self
            .client
            .get(self.template_url(language))
            .send()
            .await
            .map_err(|err| TemplateError::Network(err.to_string()))?;

        if !response.status().is_success() {
            return Err(TemplateError::Status {
                status: response.status().as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| TemplateError::Network(err.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Serves the blank bundled with the engine, so the service runs without a
/// template host.
pub(crate) struct BundledTemplateSource;

#[async_trait]
impl TemplateSource for BundledTemplateSource {
    async fn fetch(&self, language: Language) -> Result<Vec<u8>, TemplateError> {
        Ok(blank_contract_template(language))
    }
}

pub(crate) fn contract_builder(
    catalog: Arc<StorageCatalog>,
    templates: &TemplateConfig,
) -> Arc<ContractBuilder> {
    let source: Arc<dyn TemplateSource> = match &templates.base_url {
        Some(base) => Arc::new(HttpTemplateSource::new(base.clone())),
        None => Arc::new(BundledTemplateSource),
    };
    Arc::new(ContractBuilder::new(
        catalog,
        source,
        Arc::new(MemoryDocumentEngine),
    ))
}
