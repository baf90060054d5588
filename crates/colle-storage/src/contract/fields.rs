//! Projection of a draft onto the template's form fields.

use chrono::NaiveDate;

use crate::booking::{derive, ContractDraft};
use crate::catalog::{AddonId, StorageCatalog, SIGNATURE_PLACE};
use crate::l10n::{self, Language};
use crate::pricing::PriceResult;

use super::ContractNumber;

/// Placeholder written where the draft has nothing usable, after the
/// paper forms the office used before.
const EMPTY_MARK: &str = "N/A";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FieldValue {
    Text(String),
    Option(String),
    Checkbox(bool),
}

/// One logical form entry. Templates have been revised over the years, so
/// each entry carries every field name it has gone by; the first present in
/// the open template wins.
#[derive(Debug, Clone)]
pub(crate) struct FieldSpec {
    pub logical: &'static str,
    pub candidates: &'static [&'static str],
    pub value: FieldValue,
    /// Date fields need their appearance rebuilt after a programmatic set.
    pub refresh: bool,
}

impl FieldSpec {
    fn text(
        logical: &'static str,
        candidates: &'static [&'static str],
        value: String,
    ) -> FieldSpec {
        FieldSpec {
            logical,
            candidates,
            value: FieldValue::Text(value),
            refresh: false,
        }
    }

    fn date(
        logical: &'static str,
        candidates: &'static [&'static str],
        value: String,
    ) -> FieldSpec {
        FieldSpec {
            logical,
            candidates,
            value: FieldValue::Text(value),
            refresh: true,
        }
    }

    fn checkbox(
        logical: &'static str,
        candidates: &'static [&'static str],
        checked: bool,
    ) -> FieldSpec {
        FieldSpec {
            logical,
            candidates,
            value: FieldValue::Checkbox(checked),
            refresh: false,
        }
    }
}

fn or_mark(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        EMPTY_MARK.to_string()
    } else {
        value.to_string()
    }
}

fn estimate_text(estimate: Option<&PriceResult>, language: Language) -> String {
    match estimate {
        Some(PriceResult::Amount(total)) => l10n::format_money_for_document(*total),
        Some(_) => match language {
            Language::En => "To be confirmed".to_string(),
            Language::Fr => "\u{c0} confirmer".to_string(),
        },
        None => EMPTY_MARK.to_string(),
    }
}

/// Everything the builder writes into the form, in template order.
pub(crate) fn contract_fields(
    catalog: &StorageCatalog,
    draft: &ContractDraft,
    number: &ContractNumber,
    language: Language,
    signed_on: NaiveDate,
) -> Vec<FieldSpec> {
    let season = catalog.resolve_season(&draft.season);
    let derived = derive(catalog, draft);

    let season_label = season
        .map(|season| season.label.resolve(language).to_string())
        .unwrap_or_else(|| or_mark(&draft.season));
    let vehicle_label = draft
        .vehicle_type
        .map(|vehicle| vehicle.label().resolve(language).to_string())
        .unwrap_or_else(|| EMPTY_MARK.to_string());
    let expiry_text = draft
        .insurance_expiry_date()
        .map(|date| l10n::format_date(date, language))
        .unwrap_or_else(|| or_mark(&draft.insurance_expiry));

    vec![
        FieldSpec::text(
            "tenant_name",
            &["tenant_name", "name"],
            or_mark(&draft.tenant_name),
        ),
        FieldSpec::text(
            "tenant_phone",
            &["tenant_phone", "phone"],
            or_mark(&l10n::format_phone(&draft.tenant_phone)),
        ),
        FieldSpec::text(
            "tenant_email",
            &["tenant_email", "email"],
            or_mark(&draft.tenant_email),
        ),
        FieldSpec::text(
            "tenant_address",
            &["tenant_address", "address"],
            or_mark(&draft.mailing_address()),
        ),
        FieldSpec {
            logical: "vehicle_type",
            candidates: &["vehicle_type", "vehicle"],
            value: FieldValue::Option(vehicle_label),
            refresh: false,
        },
        FieldSpec::text(
            "vehicle_length",
            &["vehicle_length", "length"],
            or_mark(&draft.vehicle_length),
        ),
        FieldSpec::text("plate", &["plate", "license_plate"], or_mark(&draft.plate)),
        FieldSpec::text("season_label", &["season_label", "season"], season_label),
        FieldSpec::text(
            "lease_duration",
            &["lease_duration", "storage_period"],
            derived
                .lease_duration_text(language)
                .unwrap_or_else(|| EMPTY_MARK.to_string()),
        ),
        FieldSpec::text(
            "insurance_company",
            &["insurance_company", "insurer"],
            or_mark(&draft.insurance_company),
        ),
        FieldSpec::text(
            "policy_number",
            &["policy_number", "policy"],
            or_mark(&draft.policy_number),
        ),
        FieldSpec::date("insurance_expiry", &["insurance_expiry", "expiry_date"], expiry_text),
        FieldSpec::text(
            "estimated_cost",
            &["estimated_cost", "estimate"],
            estimate_text(derived.estimate.as_ref(), language),
        ),
        FieldSpec::text(
            "deposit_amount",
            &["deposit_amount", "deposit"],
            derived
                .deposit
                .map(l10n::format_money_for_document)
                .unwrap_or_else(|| EMPTY_MARK.to_string()),
        ),
        FieldSpec::checkbox(
            "addon_battery",
            &["addon_battery", "battery_option"],
            draft.addons.contains(&AddonId::Battery),
        ),
        FieldSpec::checkbox(
            "addon_propane",
            &["addon_propane", "propane_option"],
            draft.addons.contains(&AddonId::Propane),
        ),
        FieldSpec::text(
            "contract_number",
            &["contract_number", "agreement_number"],
            number.to_string(),
        ),
        FieldSpec::text("notes", &["notes", "special_requests"], draft.notes.trim().to_string()),
        FieldSpec::text(
            "signed_at",
            &["signed_at", "signature_place"],
            SIGNATURE_PLACE.to_string(),
        ),
        FieldSpec::date(
            "signature_date",
            &["signature_date", "date_signed"],
            l10n::format_date(signed_on, language),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VehicleType;

    fn filled_draft() -> ContractDraft {
        ContractDraft {
            tenant_name: "Marie Tremblay".to_string(),
            tenant_phone: "(514) 627-5377".to_string(),
            tenant_email: "marie@exemple.ca".to_string(),
            street: "12 rue Principale".to_string(),
            city: "Saint-Eustache".to_string(),
            province: "qc".to_string(),
            postal_code: "j7r 2a4".to_string(),
            season: "winter".to_string(),
            vehicle_type: Some(VehicleType::Car),
            vehicle_length: "14".to_string(),
            plate: "ABC 123".to_string(),
            insurance_company: "Assurance Nord".to_string(),
            policy_number: "PN-88211".to_string(),
            insurance_expiry: "2026-08-01".to_string(),
            addons: [AddonId::Battery].into(),
            notes: String::new(),
        }
    }

    fn value_of<'a>(fields: &'a [FieldSpec], logical: &str) -> &'a FieldValue {
        &fields
            .iter()
            .find(|field| field.logical == logical)
            .expect("known field")
            .value
    }

    #[test]
    fn money_fields_use_plain_two_decimal_amounts() {
        let catalog = StorageCatalog::standard();
        let number = ContractNumber::next();
        let signed = NaiveDate::from_ymd_opt(2025, 10, 20).expect("valid date");

        let fields = contract_fields(&catalog, &filled_draft(), &number, Language::Fr, signed);

        assert_eq!(
            value_of(&fields, "estimated_cost"),
            &FieldValue::Text("440.00".to_string())
        );
        assert_eq!(
            value_of(&fields, "deposit_amount"),
            &FieldValue::Text("100.00".to_string())
        );
    }

    #[test]
    fn dates_and_phone_are_normalized_per_language() {
        let catalog = StorageCatalog::standard();
        let number = ContractNumber::next();
        let signed = NaiveDate::from_ymd_opt(2025, 10, 20).expect("valid date");

        let fields = contract_fields(&catalog, &filled_draft(), &number, Language::Fr, signed);

        assert_eq!(
            value_of(&fields, "tenant_phone"),
            &FieldValue::Text("514-627-5377".to_string())
        );
        assert_eq!(
            value_of(&fields, "insurance_expiry"),
            &FieldValue::Text("1 ao\u{fb}t 2026".to_string())
        );
        assert_eq!(
            value_of(&fields, "signature_date"),
            &FieldValue::Text("20 oct. 2025".to_string())
        );
        assert_eq!(
            value_of(&fields, "tenant_address"),
            &FieldValue::Text("12 rue Principale, Saint-Eustache, QC J7R 2A4".to_string())
        );
    }

    #[test]
    fn questionable_entries_fall_back_to_the_paper_mark() {
        let catalog = StorageCatalog::standard();
        let number = ContractNumber::next();
        let signed = NaiveDate::from_ymd_opt(2025, 10, 20).expect("valid date");
        let draft = ContractDraft {
            season: "unknown season".to_string(),
            ..ContractDraft::default()
        };

        let fields = contract_fields(&catalog, &draft, &number, Language::En, signed);

        assert_eq!(
            value_of(&fields, "season_label"),
            &FieldValue::Text("unknown season".to_string())
        );
        assert_eq!(
            value_of(&fields, "lease_duration"),
            &FieldValue::Text("N/A".to_string())
        );
        assert_eq!(
            value_of(&fields, "estimated_cost"),
            &FieldValue::Text("N/A".to_string())
        );
        assert_eq!(value_of(&fields, "vehicle_type"), &FieldValue::Option("N/A".to_string()));
    }

    #[test]
    fn only_date_fields_request_an_appearance_refresh() {
        let catalog = StorageCatalog::standard();
        let number = ContractNumber::next();
        let signed = NaiveDate::from_ymd_opt(2025, 10, 20).expect("valid date");

        let fields = contract_fields(&catalog, &filled_draft(), &number, Language::En, signed);
        let refreshed: Vec<&str> = fields
            .iter()
            .filter(|field| field.refresh)
            .map(|field| field.logical)
            .collect();
        assert_eq!(refreshed, vec!["insurance_expiry", "signature_date"]);
    }
}
