use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::catalog::{display_precision, DateRange, StorageCatalog};
use crate::l10n::{self, Language};
use crate::pricing::{self, PriceResult};

use super::ContractDraft;

/// Figures the form shows read-only, recomputed from the draft.
///
/// Values are stored structurally and rendered on demand so the same state
/// serves both languages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedFields {
    /// The season's full storage span.
    pub lease_window: Option<DateRange>,
    /// `None` until both a season and a vehicle type are chosen.
    pub estimate: Option<PriceResult>,
    /// Deposit owed, only once the estimate is a concrete amount.
    pub deposit: Option<Decimal>,
    /// Earliest acceptable insurance expiry for the chosen season.
    pub insurance_expiry_floor: Option<NaiveDate>,
}

impl DerivedFields {
    pub fn lease_duration_text(&self, language: Language) -> Option<String> {
        self.lease_window.map(|window| window.text(language))
    }

    pub fn estimate_text(&self, language: Language) -> Option<String> {
        self.estimate
            .as_ref()
            .map(|estimate| estimate.display(language))
    }

    pub fn deposit_text(&self, language: Language) -> Option<String> {
        self.deposit
            .map(|deposit| l10n::format_currency(deposit, language, display_precision(deposit)))
    }
}

/// Recomputes every derived figure from the current draft.
pub fn derive(catalog: &StorageCatalog, draft: &ContractDraft) -> DerivedFields {
    let season = catalog.resolve_season(&draft.season);
    let estimate = match (season, draft.vehicle_type) {
        (Some(season), Some(vehicle)) => Some(pricing::estimate(
            season,
            vehicle,
            draft.length_feet(),
            &draft.addons,
            catalog.addons(),
        )),
        _ => None,
    };
    DerivedFields {
        lease_window: season.map(|season| season.timeframe),
        deposit: estimate.as_ref().and_then(pricing::deposit_for),
        insurance_expiry_floor: season.map(|season| season.minimum_insurance_expiry()),
        estimate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VehicleType;

    #[test]
    fn nothing_derives_without_a_season() {
        let catalog = StorageCatalog::standard();
        let draft = ContractDraft {
            vehicle_type: Some(VehicleType::Car),
            ..ContractDraft::default()
        };
        assert_eq!(derive(&catalog, &draft), DerivedFields::default());
    }

    #[test]
    fn full_figures_derive_once_season_and_vehicle_are_set() {
        let catalog = StorageCatalog::standard();
        let draft = ContractDraft {
            season: "winter".to_string(),
            vehicle_type: Some(VehicleType::Car),
            vehicle_length: "14".to_string(),
            ..ContractDraft::default()
        };
        let derived = derive(&catalog, &draft);

        assert_eq!(
            derived.estimate,
            Some(PriceResult::Amount(Decimal::new(415, 0)))
        );
        assert_eq!(derived.deposit, Some(pricing::DEPOSIT_STANDARD));
        assert_eq!(
            derived.lease_duration_text(Language::En).as_deref(),
            Some("17 Oct 2025 \u{2013} 26 Apr 2026")
        );
        assert_eq!(
            derived.insurance_expiry_floor,
            NaiveDate::from_ymd_opt(2026, 5, 26)
        );
    }

    #[test]
    fn legacy_label_in_the_season_field_still_derives() {
        let catalog = StorageCatalog::standard();
        let draft = ContractDraft {
            season: "Hiver 2025-2026".to_string(),
            vehicle_type: Some(VehicleType::Motorcycle),
            ..ContractDraft::default()
        };
        let derived = derive(&catalog, &draft);
        assert_eq!(
            derived.estimate,
            Some(PriceResult::Amount(Decimal::new(175, 0)))
        );
        assert_eq!(derived.deposit, Some(pricing::DEPOSIT_REDUCED));
    }
}
