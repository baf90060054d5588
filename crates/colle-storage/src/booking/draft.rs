use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{AddonId, VehicleType};

/// The working copy of a storage contract, exactly as typed.
///
/// Free-text fields stay raw so a saved draft restores what the tenant
/// actually entered; typed accessors parse on demand. Unknown fields in a
/// stored draft are ignored and missing ones default, so drafts saved by
/// older builds still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractDraft {
    pub tenant_name: String,
    pub tenant_phone: String,
    pub tenant_email: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    /// Season id, or a display label from a draft saved before ids existed.
    pub season: String,
    pub vehicle_type: Option<VehicleType>,
    /// Vehicle length in feet, as typed.
    pub vehicle_length: String,
    pub plate: String,
    pub insurance_company: String,
    pub policy_number: String,
    /// ISO `YYYY-MM-DD` from the date input.
    pub insurance_expiry: String,
    pub addons: BTreeSet<AddonId>,
    pub notes: String,
}

impl ContractDraft {
    /// Parses the typed length; whitespace, garbage, and non-positive values
    /// all read as absent.
    pub fn length_feet(&self) -> Option<Decimal> {
        let length: Decimal = self.vehicle_length.trim().parse().ok()?;
        if length > Decimal::ZERO {
            Some(length)
        } else {
            None
        }
    }

    pub fn insurance_expiry_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.insurance_expiry.trim(), "%Y-%m-%d").ok()
    }

    /// One-line mailing address: `street, city, PROVINCE POSTAL`.
    /// Empty parts drop out rather than leaving dangling commas.
    pub fn mailing_address(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(3);
        for piece in [self.street.trim(), self.city.trim()] {
            if !piece.is_empty() {
                parts.push(piece.to_string());
            }
        }
        let region = [self.province.trim(), self.postal_code.trim()]
            .iter()
            .filter(|piece| !piece.is_empty())
            .map(|piece| piece.to_uppercase())
            .collect::<Vec<String>>()
            .join(" ");
        if !region.is_empty() {
            parts.push(region);
        }
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_parses_only_positive_numbers() {
        let mut draft = ContractDraft {
            vehicle_length: " 20.5 ".to_string(),
            ..ContractDraft::default()
        };
        assert_eq!(draft.length_feet(), Some(Decimal::new(205, 1)));

        for raw in ["", "  ", "abc", "-4", "0"] {
            draft.vehicle_length = raw.to_string();
            assert_eq!(draft.length_feet(), None, "{raw:?} should not parse");
        }
    }

    #[test]
    fn mailing_address_skips_empty_parts_and_uppercases_region() {
        let draft = ContractDraft {
            street: "276 rue Dolbec".to_string(),
            city: "Saint-Eustache".to_string(),
            province: "qc".to_string(),
            postal_code: "j7r 6n5".to_string(),
            ..ContractDraft::default()
        };
        assert_eq!(
            draft.mailing_address(),
            "276 rue Dolbec, Saint-Eustache, QC J7R 6N5"
        );

        let partial = ContractDraft {
            city: "Saint-Eustache".to_string(),
            province: "qc".to_string(),
            ..ContractDraft::default()
        };
        assert_eq!(partial.mailing_address(), "Saint-Eustache, QC");
        assert_eq!(ContractDraft::default().mailing_address(), "");
    }

    #[test]
    fn drafts_saved_by_older_builds_still_load() {
        let legacy = r#"{"tenant_name":"Marie Tremblay","season":"Winter 2025-2026"}"#;
        let draft: ContractDraft = serde_json::from_str(legacy).expect("legacy draft");
        assert_eq!(draft.tenant_name, "Marie Tremblay");
        assert_eq!(draft.season, "Winter 2025-2026");
        assert!(draft.addons.is_empty());
    }
}
