//! Contract generation against the in-process document backend.

mod common;

use std::sync::{Arc, Mutex, OnceLock};

use chrono::NaiveDate;

use colle_storage::booking::ContractDraft;
use colle_storage::catalog::StorageCatalog;
use colle_storage::contract::{
    BuildError, ContractBuilder, DocumentModel, GeneratedContract, MemoryDocumentEngine,
    TemplateError,
};
use colle_storage::l10n::Language;

use common::{filled_winter_draft, BundledTemplates, DeadTemplates, StaticTemplates};

// Agreement numbers come from one process-wide counter, so any test that
// generates a contract holds this.
fn number_guard() -> &'static Mutex<()> {
    static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
    GUARD.get_or_init(|| Mutex::new(()))
}

fn builder(templates: impl colle_storage::contract::TemplateSource + 'static) -> ContractBuilder {
    ContractBuilder::new(
        Arc::new(StorageCatalog::standard()),
        Arc::new(templates),
        Arc::new(MemoryDocumentEngine),
    )
}

fn signing_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 20).expect("valid date")
}

async fn build(draft: &ContractDraft, language: Language) -> GeneratedContract {
    builder(BundledTemplates)
        .build_on(draft, language, signing_day())
        .await
        .expect("contract builds")
}

fn sequence_of(contract: &GeneratedContract) -> u64 {
    contract
        .number
        .as_str()
        .rsplit('-')
        .next()
        .expect("sequence suffix")
        .parse()
        .expect("numeric sequence")
}

#[tokio::test]
async fn a_complete_draft_fills_every_form_field() {
    let _lock = number_guard().lock().expect("number mutex poisoned");
    let contract = build(&filled_winter_draft(), Language::En).await;
    let model = DocumentModel::from_bytes(&contract.bytes).expect("readable document");

    assert_eq!(model.text_value("tenant_name"), Some("Marie Tremblay"));
    assert_eq!(model.text_value("tenant_phone"), Some("514-627-5377"));
    assert_eq!(
        model.text_value("tenant_address"),
        Some("12 rue Principale, Saint-Eustache, QC J7R 2A4")
    );
    assert_eq!(model.dropdown_value("vehicle_type"), Some("Car"));
    assert_eq!(model.text_value("season_label"), Some("Winter 2025-2026"));
    assert_eq!(
        model.text_value("lease_duration"),
        Some("17 Oct 2025 \u{2013} 26 Apr 2026")
    );
    assert_eq!(model.text_value("estimated_cost"), Some("440.00"));
    assert_eq!(model.text_value("deposit_amount"), Some("100.00"));
    assert_eq!(model.checkbox_value("addon_battery"), Some(true));
    assert_eq!(model.checkbox_value("addon_propane"), Some(false));
    assert_eq!(model.text_value("signed_at"), Some("Saint-Eustache, QC"));
    assert_eq!(model.text_value("signature_date"), Some("20 Oct 2025"));
    assert_eq!(
        model.text_value("contract_number"),
        Some(contract.number.as_str())
    );
}

#[tokio::test]
async fn the_document_is_viewer_ready_with_fresh_date_appearances() {
    let _lock = number_guard().lock().expect("number mutex poisoned");
    let contract = build(&filled_winter_draft(), Language::Fr).await;
    let model = DocumentModel::from_bytes(&contract.bytes).expect("readable document");

    assert!(model.needs_appearances());
    assert!(model.was_refreshed("insurance_expiry"));
    assert!(model.was_refreshed("signature_date"));
    assert!(!model.was_refreshed("tenant_name"));
}

#[tokio::test]
async fn french_contracts_localize_the_filled_values() {
    let _lock = number_guard().lock().expect("number mutex poisoned");
    let contract = build(&filled_winter_draft(), Language::Fr).await;
    let model = DocumentModel::from_bytes(&contract.bytes).expect("readable document");

    assert_eq!(model.dropdown_value("vehicle_type"), Some("Voiture"));
    assert_eq!(model.text_value("season_label"), Some("Hiver 2025-2026"));
    assert_eq!(model.text_value("signature_date"), Some("20 oct. 2025"));
    // Money stays locale-free on paper.
    assert_eq!(model.text_value("estimated_cost"), Some("440.00"));
}

#[tokio::test]
async fn the_conditions_section_lands_after_the_form_pages() {
    let _lock = number_guard().lock().expect("number mutex poisoned");
    let contract = build(&filled_winter_draft(), Language::En).await;
    let model = DocumentModel::from_bytes(&contract.bytes).expect("readable document");

    assert!(model.page_count() >= 2);
    let conditions = model.page_text(1).join("\n");
    assert!(conditions.contains("Storage conditions"));
    assert!(conditions.contains("Drop-off window for Winter 2025-2026"));
}

#[tokio::test]
async fn filenames_follow_the_contract_number() {
    let _lock = number_guard().lock().expect("number mutex poisoned");
    let contract = build(&filled_winter_draft(), Language::En).await;

    assert!(contract.filename.starts_with("colle-storage-cs-"));
    assert!(contract.filename.ends_with(".pdf"));
    assert_eq!(
        contract.filename,
        format!(
            "colle-storage-{}.pdf",
            contract.number.as_str().to_ascii_lowercase()
        )
    );
}

#[tokio::test]
async fn rebuilding_the_same_draft_changes_only_the_number() {
    let _lock = number_guard().lock().expect("number mutex poisoned");
    let builder = builder(BundledTemplates);
    let draft = filled_winter_draft();

    let first = builder
        .build_on(&draft, Language::En, signing_day())
        .await
        .expect("first build");
    let second = builder
        .build_on(&draft, Language::En, signing_day())
        .await
        .expect("second build");

    assert_ne!(first.number, second.number);

    let a = DocumentModel::from_bytes(&first.bytes).expect("first document");
    let b = DocumentModel::from_bytes(&second.bytes).expect("second document");
    assert_eq!(a.page_count(), b.page_count());
    for name in a.field_names() {
        if name == "contract_number" {
            continue;
        }
        assert_eq!(
            a.text_value(name),
            b.text_value(name),
            "field {name} should not vary between builds"
        );
    }
}

#[tokio::test]
async fn templates_with_legacy_field_names_still_fill() {
    let _lock = number_guard().lock().expect("number mutex poisoned");
    // An older revision that says "name"/"estimate" instead of the current
    // names, takes the vehicle type as plain text, and has no notes field.
    let legacy = br#"{
        "format": "colle-doc/1",
        "pages": [{"width": 612.0, "height": 792.0, "ops": []}],
        "fields": {
            "name": {"kind": "text"},
            "estimate": {"kind": "text"},
            "vehicle": {"kind": "text"},
            "battery_option": {"kind": "checkbox"}
        }
    }"#;

    let contract = builder(StaticTemplates(legacy.to_vec()))
        .build_on(&filled_winter_draft(), Language::En, signing_day())
        .await
        .expect("legacy template builds");
    let model = DocumentModel::from_bytes(&contract.bytes).expect("readable document");

    assert_eq!(model.text_value("name"), Some("Marie Tremblay"));
    assert_eq!(model.text_value("estimate"), Some("440.00"));
    assert_eq!(model.text_value("vehicle"), Some("Car"));
    assert_eq!(model.checkbox_value("battery_option"), Some(true));
}

#[tokio::test]
async fn a_dead_template_service_fails_without_burning_numbers() {
    let _lock = number_guard().lock().expect("number mutex poisoned");
    let draft = filled_winter_draft();

    let before = build(&draft, Language::En).await;
    let failure = builder(DeadTemplates)
        .build_on(&draft, Language::En, signing_day())
        .await
        .expect_err("no template, no contract");
    assert!(matches!(
        failure,
        BuildError::TemplateUnavailable(TemplateError::Status { status: 404 })
    ));
    let after = build(&draft, Language::En).await;

    assert_eq!(sequence_of(&after), sequence_of(&before) + 1);
}

#[tokio::test]
async fn a_malformed_template_reads_as_a_document_error() {
    let failure = builder(StaticTemplates(b"%PDF-1.7 not a model".to_vec()))
        .build_on(&filled_winter_draft(), Language::En, signing_day())
        .await
        .expect_err("garbage template");
    assert!(matches!(failure, BuildError::Document(_)));
}
