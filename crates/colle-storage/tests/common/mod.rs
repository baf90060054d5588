//! Fixtures shared by the integration suites.

// Each suite pulls a different subset.
#![allow(dead_code)]

use async_trait::async_trait;
use colle_storage::booking::{ContractDraft, DraftStore, StorageError};
use colle_storage::catalog::{AddonId, VehicleType};
use colle_storage::contract::{blank_contract_template, TemplateError, TemplateSource};
use colle_storage::l10n::Language;

/// A draft that passes every validation step for the winter season.
pub fn filled_winter_draft() -> ContractDraft {
    ContractDraft {
        tenant_name: "Marie Tremblay".to_string(),
        tenant_phone: "514 627 5377".to_string(),
        tenant_email: "marie@exemple.ca".to_string(),
        street: "12 rue Principale".to_string(),
        city: "Saint-Eustache".to_string(),
        province: "QC".to_string(),
        postal_code: "J7R 2A4".to_string(),
        season: "winter".to_string(),
        vehicle_type: Some(VehicleType::Car),
        vehicle_length: "14".to_string(),
        plate: "ABC 123".to_string(),
        insurance_company: "Assurance Nord".to_string(),
        policy_number: "PN-88211".to_string(),
        insurance_expiry: "2026-08-01".to_string(),
        addons: [AddonId::Battery].into(),
        notes: "Convertible, soft cover in the trunk".to_string(),
    }
}

/// Store that refuses every operation, like a browser with storage off.
pub struct RefusingStore;

impl DraftStore for RefusingStore {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::QuotaExceeded)
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }
}

/// Serves the bundled blank template, like the production fallback.
pub struct BundledTemplates;

#[async_trait]
impl TemplateSource for BundledTemplates {
    async fn fetch(&self, language: Language) -> Result<Vec<u8>, TemplateError> {
        Ok(blank_contract_template(language))
    }
}

/// Serves fixed bytes regardless of language.
pub struct StaticTemplates(pub Vec<u8>);

#[async_trait]
impl TemplateSource for StaticTemplates {
    async fn fetch(&self, _language: Language) -> Result<Vec<u8>, TemplateError> {
        Ok(self.0.clone())
    }
}

/// A template host that is down.
pub struct DeadTemplates;

#[async_trait]
impl TemplateSource for DeadTemplates {
    async fn fetch(&self, _language: Language) -> Result<Vec<u8>, TemplateError> {
        Err(TemplateError::Status { status: 404 })
    }
}
