use std::sync::Arc;

use chrono::{Local, NaiveDate};
use thiserror::Error;

use crate::booking::ContractDraft;
use crate::catalog::StorageCatalog;
use crate::l10n::Language;

use super::document::{DocumentEngine, DocumentError, FormDocument, TemplateError, TemplateSource};
use super::fields::{contract_fields, FieldSpec, FieldValue};
use super::policies::append_policy_section;
use super::{ContractNumber, GeneratedContract};

#[derive(Debug, Error)]
pub enum BuildError {
    /// The template service is down or the template is gone. Retry later or
    /// fall back to the bundled blank.
    #[error("contract template unavailable")]
    TemplateUnavailable(#[source] TemplateError),
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Fills the seasonal agreement from a completed draft.
///
/// Template source and document engine are injected, so the same builder
/// serves the hosted templates in production and the in-process backend in
/// tests and the demo.
pub struct ContractBuilder {
    catalog: Arc<StorageCatalog>,
    templates: Arc<dyn TemplateSource>,
    engine: Arc<dyn DocumentEngine>,
}

impl ContractBuilder {
    pub fn new(
        catalog: Arc<StorageCatalog>,
        templates: Arc<dyn TemplateSource>,
        engine: Arc<dyn DocumentEngine>,
    ) -> ContractBuilder {
        ContractBuilder {
            catalog,
            templates,
            engine,
        }
    }

    /// Builds a contract dated today.
    pub async fn build(
        &self,
        draft: &ContractDraft,
        language: Language,
    ) -> Result<GeneratedContract, BuildError> {
        self.build_on(draft, language, Local::now().date_naive())
            .await
    }

    /// Builds a contract with an explicit signature date.
    pub async fn build_on(
        &self,
        draft: &ContractDraft,
        language: Language,
        signed_on: NaiveDate,
    ) -> Result<GeneratedContract, BuildError> {
        let template = self
            .templates
            .fetch(language)
            .await
            .map_err(BuildError::TemplateUnavailable)?;
        let mut document = self.engine.open(&template)?;

        // Numbers are drawn only once a template is in hand, so a dead
        // template service never burns agreement numbers.
        let number = ContractNumber::next();
        for spec in contract_fields(&self.catalog, draft, &number, language, signed_on) {
            apply_field(document.as_mut(), &spec);
        }

        let season = self.catalog.resolve_season(&draft.season);
        append_policy_section(document.as_mut(), &self.catalog, season, language);
        document.set_needs_appearances(true);

        let bytes = document.save()?;
        tracing::info!(
            number = %number,
            language = language.key(),
            pages = document.page_count(),
            "contract generated"
        );
        Ok(GeneratedContract {
            filename: format!("colle-storage-{}.pdf", number.as_str().to_ascii_lowercase()),
            number,
            bytes,
        })
    }
}

/// Writes one logical field, trying each candidate name until the template
/// answers. A template with none of the names just leaves that entry blank.
/// Dropdown and checkbox writes fall back to a text field of the same name,
/// since some template revisions model those entries as plain text.
fn apply_field(document: &mut dyn FormDocument, spec: &FieldSpec) {
    for candidate in spec.candidates {
        let written = match &spec.value {
            FieldValue::Text(value) => document.set_text_field(candidate, value),
            FieldValue::Option(value) => document
                .select_option(candidate, value)
                .or_else(|_| document.set_text_field(candidate, value)),
            FieldValue::Checkbox(checked) => document
                .set_checkbox(candidate, *checked)
                .or_else(|_| {
                    document.set_text_field(candidate, if *checked { "X" } else { "" })
                }),
        };
        if written.is_ok() {
            if spec.refresh {
                if let Err(error) = document.refresh_appearance(candidate) {
                    tracing::debug!(field = spec.logical, %error, "appearance not refreshed");
                }
            }
            return;
        }
    }
    tracing::warn!(field = spec.logical, "template has no matching form field");
}
