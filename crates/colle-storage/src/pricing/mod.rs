//! Quote math over the published catalog.
//!
//! Estimation is a pure function of season, vehicle, length, and selected
//! add-ons. It never errors: anything the rate card cannot answer comes back
//! as [`PriceResult::ContactForPricing`] so the caller can route the tenant
//! to the office instead of showing a dead end.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::{display_precision, AddonId, AddonService, PriceRule, Season, VehicleType};
use crate::l10n::{self, Language};

/// Deposit owed on estimates above [`DEPOSIT_THRESHOLD`].
pub const DEPOSIT_STANDARD: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Deposit owed on small estimates (motorcycles, sleds).
pub const DEPOSIT_REDUCED: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Estimates strictly above this take the standard deposit.
pub const DEPOSIT_THRESHOLD: Decimal = Decimal::from_parts(250, 0, 0, false, 0);

/// Outcome of a pricing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PriceResult {
    /// A concrete seasonal total, add-ons included.
    Amount(Decimal),
    /// The matched offers price by length and none was supplied.
    NeedsLength,
    /// No published rate answers this request.
    ContactForPricing,
}

impl PriceResult {
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            PriceResult::Amount(total) => Some(*total),
            _ => None,
        }
    }

    /// Text shown in the live estimate box.
    pub fn display(&self, language: Language) -> String {
        match self {
            PriceResult::Amount(total) => {
                l10n::format_currency(*total, language, display_precision(*total))
            }
            PriceResult::NeedsLength => match language {
                Language::En => "Enter a length to see pricing".to_string(),
                Language::Fr => "Entrez une longueur pour voir le prix".to_string(),
            },
            PriceResult::ContactForPricing => match language {
                Language::En => "Contact us for pricing".to_string(),
                Language::Fr => "Contactez-nous pour obtenir un prix".to_string(),
            },
        }
    }
}

/// Whether quoting this vehicle in this season needs a length.
pub fn length_required(season: &Season, vehicle: VehicleType) -> bool {
    season
        .offers_for(vehicle)
        .any(|offer| offer.requires_length())
}

/// Prices one storage request against a season's rate card.
///
/// Offers are consulted in card order; the first whose length range admits
/// the request wins. Flat offers ignore the supplied length entirely.
pub fn estimate(
    season: &Season,
    vehicle: VehicleType,
    length: Option<Decimal>,
    selected: &BTreeSet<AddonId>,
    addons: &[AddonService],
) -> PriceResult {
    let offers: Vec<_> = season.offers_for(vehicle).collect();
    if offers.is_empty() {
        return PriceResult::ContactForPricing;
    }
    if length.is_none() && offers.iter().any(|offer| offer.requires_length()) {
        return PriceResult::NeedsLength;
    }

    let matched = offers.iter().find(|offer| match (offer.length_range, length) {
        (None, _) => true,
        (Some(range), Some(length)) => range.contains(length),
        (Some(_), None) => false,
    });
    let Some(offer) = matched else {
        return PriceResult::ContactForPricing;
    };

    let base = match offer.rule {
        PriceRule::Flat(amount) => amount,
        PriceRule::PerFoot { rate, minimum } => {
            let Some(length) = length else {
                return PriceResult::NeedsLength;
            };
            (length * rate).max(minimum)
        }
        PriceRule::Contact => return PriceResult::ContactForPricing,
    };

    let extras: Decimal = addons
        .iter()
        .filter(|addon| selected.contains(&addon.id) && addon.available_for(vehicle))
        .map(|addon| addon.fee)
        .sum();

    PriceResult::Amount(base + extras)
}

/// Reservation deposit owed for a quoted amount.
///
/// Only concrete amounts carry a deposit; a request still waiting on a
/// length or a hand quote has nothing to put down yet.
pub fn deposit_for(result: &PriceResult) -> Option<Decimal> {
    match result {
        PriceResult::Amount(total) if *total > DEPOSIT_THRESHOLD => Some(DEPOSIT_STANDARD),
        PriceResult::Amount(_) => Some(DEPOSIT_REDUCED),
        _ => None,
    }
}
