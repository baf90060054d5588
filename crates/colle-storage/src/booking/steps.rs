use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{AddonId, StorageCatalog, VehicleType};
use crate::l10n::{Language, LocalizedText};
use crate::pricing;

use super::store::draft_key;
use super::{derive, ContractDraft, DerivedFields, DraftStore};

/// The four screens of the booking form, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    TenantInfo,
    VehicleInfo,
    InsuranceAddons,
    Review,
}

impl BookingStep {
    pub const fn ordered() -> [BookingStep; 4] {
        [
            BookingStep::TenantInfo,
            BookingStep::VehicleInfo,
            BookingStep::InsuranceAddons,
            BookingStep::Review,
        ]
    }

    pub const fn index(self) -> usize {
        match self {
            BookingStep::TenantInfo => 0,
            BookingStep::VehicleInfo => 1,
            BookingStep::InsuranceAddons => 2,
            BookingStep::Review => 3,
        }
    }

    pub const fn title(self) -> LocalizedText {
        match self {
            BookingStep::TenantInfo => LocalizedText::new("Your information", "Vos coordonn\u{e9}es"),
            BookingStep::VehicleInfo => LocalizedText::new("Your vehicle", "Votre v\u{e9}hicule"),
            BookingStep::InsuranceAddons => {
                LocalizedText::new("Insurance and options", "Assurance et options")
            }
            BookingStep::Review => LocalizedText::new("Review and sign", "V\u{e9}rification et signature"),
        }
    }

    const fn next(self) -> Option<BookingStep> {
        match self {
            BookingStep::TenantInfo => Some(BookingStep::VehicleInfo),
            BookingStep::VehicleInfo => Some(BookingStep::InsuranceAddons),
            BookingStep::InsuranceAddons => Some(BookingStep::Review),
            BookingStep::Review => None,
        }
    }

    const fn previous(self) -> Option<BookingStep> {
        match self {
            BookingStep::TenantInfo => None,
            BookingStep::VehicleInfo => Some(BookingStep::TenantInfo),
            BookingStep::InsuranceAddons => Some(BookingStep::VehicleInfo),
            BookingStep::Review => Some(BookingStep::InsuranceAddons),
        }
    }
}

/// Form fields that can fail validation, named by their wire key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    TenantName,
    TenantPhone,
    TenantEmail,
    Season,
    VehicleType,
    VehicleLength,
    InsuranceCompany,
    PolicyNumber,
    InsuranceExpiry,
}

impl FieldId {
    pub const fn key(self) -> &'static str {
        match self {
            FieldId::TenantName => "tenant_name",
            FieldId::TenantPhone => "tenant_phone",
            FieldId::TenantEmail => "tenant_email",
            FieldId::Season => "season",
            FieldId::VehicleType => "vehicle_type",
            FieldId::VehicleLength => "vehicle_length",
            FieldId::InsuranceCompany => "insurance_company",
            FieldId::PolicyNumber => "policy_number",
            FieldId::InsuranceExpiry => "insurance_expiry",
        }
    }
}

/// First field that blocked a step change, with copy for both languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid {}: {}", .field.key(), .message.en)]
pub struct ValidationFailed {
    pub field: FieldId,
    pub message: LocalizedText,
}

impl ValidationFailed {
    fn new(field: FieldId, en: &'static str, fr: &'static str) -> ValidationFailed {
        ValidationFailed {
            field,
            message: LocalizedText::new(en, fr),
        }
    }

    pub fn message(&self, language: Language) -> &'static str {
        self.message.resolve(language)
    }
}

fn valid_phone(raw: &str) -> bool {
    let digits = raw.chars().filter(char::is_ascii_digit).count();
    let first_digit = raw.chars().find(char::is_ascii_digit);
    digits == 10 || (digits == 11 && first_digit == Some('1'))
}

fn valid_email(raw: &str) -> bool {
    let raw = raw.trim();
    if raw.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

fn validate_step(
    catalog: &StorageCatalog,
    draft: &ContractDraft,
    step: BookingStep,
) -> Result<(), ValidationFailed> {
    match step {
        BookingStep::TenantInfo => {
            if draft.tenant_name.trim().is_empty() {
                return Err(ValidationFailed::new(
                    FieldId::TenantName,
                    "Enter your full name",
                    "Entrez votre nom complet",
                ));
            }
            if !valid_phone(&draft.tenant_phone) {
                return Err(ValidationFailed::new(
                    FieldId::TenantPhone,
                    "Enter a valid phone number",
                    "Entrez un num\u{e9}ro de t\u{e9}l\u{e9}phone valide",
                ));
            }
            if !valid_email(&draft.tenant_email) {
                return Err(ValidationFailed::new(
                    FieldId::TenantEmail,
                    "Enter a valid email address",
                    "Entrez une adresse courriel valide",
                ));
            }
            Ok(())
        }
        BookingStep::VehicleInfo => {
            let Some(season) = catalog.resolve_season(&draft.season) else {
                return Err(ValidationFailed::new(
                    FieldId::Season,
                    "Choose a storage season",
                    "Choisissez une saison d'entreposage",
                ));
            };
            let Some(vehicle) = draft.vehicle_type else {
                return Err(ValidationFailed::new(
                    FieldId::VehicleType,
                    "Choose a vehicle type",
                    "Choisissez un type de v\u{e9}hicule",
                ));
            };
            if pricing::length_required(season, vehicle) && draft.length_feet().is_none() {
                return Err(ValidationFailed::new(
                    FieldId::VehicleLength,
                    "Enter the vehicle length in feet",
                    "Entrez la longueur du v\u{e9}hicule en pieds",
                ));
            }
            Ok(())
        }
        BookingStep::InsuranceAddons => {
            if draft.insurance_company.trim().is_empty() {
                return Err(ValidationFailed::new(
                    FieldId::InsuranceCompany,
                    "Enter your insurance company",
                    "Entrez votre compagnie d'assurance",
                ));
            }
            if draft.policy_number.trim().is_empty() {
                return Err(ValidationFailed::new(
                    FieldId::PolicyNumber,
                    "Enter your policy number",
                    "Entrez votre num\u{e9}ro de police",
                ));
            }
            let Some(expiry) = draft.insurance_expiry_date() else {
                return Err(ValidationFailed::new(
                    FieldId::InsuranceExpiry,
                    "Enter the policy expiry date",
                    "Entrez la date d'\u{e9}ch\u{e9}ance de la police",
                ));
            };
            if let Some(season) = catalog.resolve_season(&draft.season) {
                if expiry < season.minimum_insurance_expiry() {
                    return Err(ValidationFailed::new(
                        FieldId::InsuranceExpiry,
                        "Insurance must stay valid at least 30 days past pickup",
                        "L'assurance doit rester valide au moins 30 jours apr\u{e8}s la reprise",
                    ));
                }
            }
            Ok(())
        }
        BookingStep::Review => Ok(()),
    }
}

/// Validates the whole draft, stopping at the first violation in step order.
pub fn validate_draft(catalog: &StorageCatalog, draft: &ContractDraft) -> Result<(), ValidationFailed> {
    for step in BookingStep::ordered() {
        validate_step(catalog, draft, step)?;
    }
    Ok(())
}

/// One tenant's walk through the booking form.
///
/// Every edit writes through to the draft store under the current vehicle
/// type's key; a store that refuses is logged and ignored so the form keeps
/// working without persistence.
pub struct BookingSession<S> {
    catalog: Arc<StorageCatalog>,
    store: Arc<S>,
    draft: ContractDraft,
    step: BookingStep,
    derived: DerivedFields,
}

impl<S: DraftStore> BookingSession<S> {
    pub fn new(catalog: Arc<StorageCatalog>, store: Arc<S>) -> BookingSession<S> {
        let draft = ContractDraft::default();
        let derived = derive(&catalog, &draft);
        BookingSession {
            catalog,
            store,
            draft,
            step: BookingStep::TenantInfo,
            derived,
        }
    }

    pub fn catalog(&self) -> &StorageCatalog {
        &self.catalog
    }

    pub fn draft(&self) -> &ContractDraft {
        &self.draft
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn derived(&self) -> &DerivedFields {
        &self.derived
    }

    /// Moves forward one step after re-validating everything up to and
    /// including the current one. On failure the session does not move.
    pub fn advance(&mut self) -> Result<BookingStep, ValidationFailed> {
        for step in &BookingStep::ordered()[..=self.step.index()] {
            validate_step(&self.catalog, &self.draft, *step)?;
        }
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    /// Moves back one step. Never validates, never fails.
    pub fn back(&mut self) -> BookingStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Full-draft validation as run right before contract generation.
    pub fn validate_for_submission(&self) -> Result<(), ValidationFailed> {
        validate_draft(&self.catalog, &self.draft)
    }

    pub fn set_tenant_name(&mut self, value: &str) {
        self.draft.tenant_name = value.to_string();
        self.persist();
    }

    pub fn set_tenant_phone(&mut self, value: &str) {
        self.draft.tenant_phone = value.to_string();
        self.persist();
    }

    pub fn set_tenant_email(&mut self, value: &str) {
        self.draft.tenant_email = value.to_string();
        self.persist();
    }

    pub fn set_street(&mut self, value: &str) {
        self.draft.street = value.to_string();
        self.persist();
    }

    pub fn set_city(&mut self, value: &str) {
        self.draft.city = value.to_string();
        self.persist();
    }

    pub fn set_province(&mut self, value: &str) {
        self.draft.province = value.to_string();
        self.persist();
    }

    pub fn set_postal_code(&mut self, value: &str) {
        self.draft.postal_code = value.to_string();
        self.persist();
    }

    pub fn set_plate(&mut self, value: &str) {
        self.draft.plate = value.to_string();
        self.persist();
    }

    pub fn set_insurance_company(&mut self, value: &str) {
        self.draft.insurance_company = value.to_string();
        self.persist();
    }

    pub fn set_policy_number(&mut self, value: &str) {
        self.draft.policy_number = value.to_string();
        self.persist();
    }

    pub fn set_insurance_expiry(&mut self, value: &str) {
        self.draft.insurance_expiry = value.to_string();
        self.persist();
    }

    pub fn set_notes(&mut self, value: &str) {
        self.draft.notes = value.to_string();
        self.persist();
    }

    pub fn set_season(&mut self, raw: &str) {
        self.draft.season = raw.to_string();
        self.refresh_derived();
        self.persist();
    }

    pub fn set_vehicle_length(&mut self, raw: &str) {
        self.draft.vehicle_length = raw.to_string();
        self.refresh_derived();
        self.persist();
    }

    pub fn set_addon(&mut self, addon: AddonId, selected: bool) {
        if selected {
            self.draft.addons.insert(addon);
        } else {
            self.draft.addons.remove(&addon);
        }
        self.refresh_derived();
        self.persist();
    }

    /// Switches vehicle type, restoring whatever draft was last saved for
    /// the new type. With nothing saved, current entries carry over.
    pub fn set_vehicle_type(&mut self, vehicle: Option<VehicleType>) {
        self.draft.vehicle_type = vehicle;
        if let Some(vehicle) = vehicle {
            self.restore_saved(vehicle);
        }
        self.refresh_derived();
        self.persist();
    }

    /// Forgets the saved draft for the current vehicle type and resets the
    /// form, keeping only the type selection.
    pub fn clear_draft(&mut self) {
        if let Some(vehicle) = self.draft.vehicle_type {
            if let Err(error) = self.store.remove(&draft_key(vehicle)) {
                tracing::debug!(%error, vehicle = vehicle.key(), "saved draft not removed");
            }
        }
        self.draft = ContractDraft {
            vehicle_type: self.draft.vehicle_type,
            ..ContractDraft::default()
        };
        self.refresh_derived();
    }

    fn restore_saved(&mut self, vehicle: VehicleType) {
        match self.store.read(&draft_key(vehicle)) {
            Ok(Some(raw)) => match serde_json::from_str::<ContractDraft>(&raw) {
                Ok(mut saved) => {
                    saved.vehicle_type = Some(vehicle);
                    self.draft = saved;
                }
                Err(error) => {
                    tracing::debug!(%error, vehicle = vehicle.key(), "ignoring unreadable saved draft");
                }
            },
            Ok(None) => {}
            Err(error) => {
                tracing::debug!(%error, vehicle = vehicle.key(), "draft restore skipped");
            }
        }
    }

    fn persist(&self) {
        let Some(vehicle) = self.draft.vehicle_type else {
            return;
        };
        match serde_json::to_string(&self.draft) {
            Ok(raw) => {
                if let Err(error) = self.store.write(&draft_key(vehicle), &raw) {
                    tracing::debug!(%error, vehicle = vehicle.key(), "draft save skipped");
                }
            }
            Err(error) => tracing::debug!(%error, "draft not serializable"),
        }
    }

    fn refresh_derived(&mut self) {
        self.derived = derive(&self.catalog, &self.draft);
    }
}
