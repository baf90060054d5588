//! The storage offering: seasons, offers, price rules, and optional services.
//!
//! Everything here is data the yard publishes. Pricing math lives in
//! [`crate::pricing`]; this module only describes what is on offer.

mod seasons;
mod view;

pub use seasons::StorageCatalog;
pub use view::{vehicle_options, AddonCard, OfferRow, SeasonCard, VehicleOption};

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::l10n::{self, Language, LocalizedText, LocalizedValue};

/// Where storage requests land when a quote needs a human.
pub const CONTACT_EMAIL: &str = "storage@as-colle.com";

/// Front-desk line printed on cards and contracts.
pub const BUSINESS_PHONE: &str = "514-627-5377";

/// Street address of the yard.
pub const YARD_ADDRESS: &str = "276 rue Dolbec, Saint-Eustache, QC J7R 6N5";

/// Place name written beside the signature date on contracts.
pub const SIGNATURE_PLACE: &str = "Saint-Eustache, QC";

/// Days past the pickup deadline an insurance policy must remain valid.
const INSURANCE_TAIL_DAYS: i64 = 30;

/// An inclusive span of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> DateRange {
        DateRange { start, end }
    }

    pub fn text(&self, language: Language) -> String {
        l10n::format_date_range(self.start, self.end, language)
    }
}

/// The kinds of vehicle the yard takes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    Car,
    Truck,
    Trailer,
    Motorhome,
    Motorcycle,
    Spyder,
    Snowmobile,
}

impl VehicleType {
    pub const fn all() -> [VehicleType; 7] {
        [
            VehicleType::Car,
            VehicleType::Truck,
            VehicleType::Trailer,
            VehicleType::Motorhome,
            VehicleType::Motorcycle,
            VehicleType::Spyder,
            VehicleType::Snowmobile,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            VehicleType::Car => "car",
            VehicleType::Truck => "truck",
            VehicleType::Trailer => "trailer",
            VehicleType::Motorhome => "motorhome",
            VehicleType::Motorcycle => "motorcycle",
            VehicleType::Spyder => "spyder",
            VehicleType::Snowmobile => "snowmobile",
        }
    }

    pub fn from_key(raw: &str) -> Option<VehicleType> {
        VehicleType::all()
            .into_iter()
            .find(|vehicle| vehicle.key() == raw.trim().to_ascii_lowercase())
    }

    pub const fn label(self) -> LocalizedText {
        match self {
            VehicleType::Car => LocalizedText::new("Car", "Voiture"),
            VehicleType::Truck => LocalizedText::new("Pickup / work truck", "Camionnette / camion"),
            VehicleType::Trailer => LocalizedText::new("Trailer", "Remorque"),
            VehicleType::Motorhome => LocalizedText::new("Motorhome", "Motoris\u{e9}"),
            VehicleType::Motorcycle => LocalizedText::new("Motorcycle", "Moto"),
            VehicleType::Spyder => LocalizedText::new("Can-Am Spyder", "Can-Am Spyder"),
            VehicleType::Snowmobile => LocalizedText::new("Snowmobile", "Motoneige"),
        }
    }
}

/// Optional paid services a tenant can attach to a storage booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddonId {
    Battery,
    Propane,
}

impl AddonId {
    pub const fn all() -> [AddonId; 2] {
        [AddonId::Battery, AddonId::Propane]
    }

    pub const fn key(self) -> &'static str {
        match self {
            AddonId::Battery => "battery",
            AddonId::Propane => "propane",
        }
    }

    pub fn from_key(raw: &str) -> Option<AddonId> {
        AddonId::all()
            .into_iter()
            .find(|addon| addon.key() == raw.trim().to_ascii_lowercase())
    }
}

#[derive(Debug, Clone, Copy)]
pub enum AddonAvailability {
    AllVehicles,
    Only(&'static [VehicleType]),
}

/// One optional service with its flat seasonal fee.
#[derive(Debug, Clone)]
pub struct AddonService {
    pub id: AddonId,
    pub label: LocalizedText,
    pub fee: Decimal,
    pub availability: AddonAvailability,
}

impl AddonService {
    pub fn available_for(&self, vehicle: VehicleType) -> bool {
        match self.availability {
            AddonAvailability::AllVehicles => true,
            AddonAvailability::Only(types) => types.contains(&vehicle),
        }
    }
}

/// One end of a length range, in feet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthBound {
    pub feet: Decimal,
    pub inclusive: bool,
}

/// A possibly half-open range of vehicle lengths an offer applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LengthRange {
    pub min: Option<LengthBound>,
    pub max: Option<LengthBound>,
}

impl LengthRange {
    /// `length <= feet`
    pub fn at_most(feet: Decimal) -> LengthRange {
        LengthRange {
            min: None,
            max: Some(LengthBound {
                feet,
                inclusive: true,
            }),
        }
    }

    /// `min < length <= max`
    pub fn over_up_to(min: Decimal, max: Decimal) -> LengthRange {
        LengthRange {
            min: Some(LengthBound {
                feet: min,
                inclusive: false,
            }),
            max: Some(LengthBound {
                feet: max,
                inclusive: true,
            }),
        }
    }

    /// `length > feet`
    pub fn over(feet: Decimal) -> LengthRange {
        LengthRange {
            min: Some(LengthBound {
                feet,
                inclusive: false,
            }),
            max: None,
        }
    }

    pub fn contains(&self, length: Decimal) -> bool {
        if let Some(min) = self.min {
            let above = if min.inclusive {
                length >= min.feet
            } else {
                length > min.feet
            };
            if !above {
                return false;
            }
        }
        if let Some(max) = self.max {
            let below = if max.inclusive {
                length <= max.feet
            } else {
                length < max.feet
            };
            if !below {
                return false;
            }
        }
        true
    }
}

/// How one offer is priced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceRule {
    /// A fixed seasonal amount.
    Flat(Decimal),
    /// Billed per foot of vehicle length with a seasonal minimum.
    PerFoot { rate: Decimal, minimum: Decimal },
    /// No published rate; the office quotes by hand.
    Contact,
}

impl PriceRule {
    /// Price column text for rate cards.
    pub fn display(&self, language: Language) -> String {
        match self {
            PriceRule::Flat(amount) => {
                l10n::format_currency(*amount, language, display_precision(*amount))
            }
            PriceRule::PerFoot { rate, .. } => {
                let unit = match language {
                    Language::En => "ft",
                    Language::Fr => "pi",
                };
                format!(
                    "{} / {unit}",
                    l10n::format_currency(*rate, language, display_precision(*rate))
                )
            }
            PriceRule::Contact => match language {
                Language::En => "Contact us".to_string(),
                Language::Fr => "Contactez-nous".to_string(),
            },
        }
    }
}

pub(crate) fn display_precision(amount: Decimal) -> u32 {
    if amount.is_integer() {
        0
    } else {
        2
    }
}

/// One row of a season's rate card.
///
/// Offers with an empty `vehicle_types` slice are display-only: they show on
/// the card but never price a quote. Hidden offers are the opposite, they
/// price quotes (oversize placements) without showing on the card.
#[derive(Debug, Clone)]
pub struct Offer {
    pub label: LocalizedText,
    pub vehicle_types: &'static [VehicleType],
    pub length_range: Option<LengthRange>,
    pub rule: PriceRule,
    pub note: Option<LocalizedValue>,
    pub visible: bool,
}

impl Offer {
    pub fn applies_to(&self, vehicle: VehicleType) -> bool {
        self.vehicle_types.contains(&vehicle)
    }

    /// Whether quoting this offer needs the vehicle length.
    pub fn requires_length(&self) -> bool {
        matches!(self.rule, PriceRule::PerFoot { .. }) || self.length_range.is_some()
    }
}

/// A published storage season with its calendar and rate card.
#[derive(Debug, Clone)]
pub struct Season {
    pub id: &'static str,
    pub name: LocalizedText,
    pub label: LocalizedText,
    pub description: LocalizedText,
    pub timeframe: DateRange,
    pub dropoff_window: DateRange,
    pub pickup_deadline: NaiveDate,
    pub deposit_note: LocalizedText,
    pub offers: Vec<Offer>,
    pub policies: Vec<LocalizedValue>,
}

impl Season {
    pub fn offers_for(&self, vehicle: VehicleType) -> impl Iterator<Item = &Offer> {
        self.offers.iter().filter(move |offer| offer.applies_to(vehicle))
    }

    pub fn visible_offers(&self) -> impl Iterator<Item = &Offer> {
        self.offers.iter().filter(|offer| offer.visible)
    }

    /// Earliest acceptable insurance expiry: the policy must outlive the
    /// pickup deadline by the tail the yard's own coverage requires.
    pub fn minimum_insurance_expiry(&self) -> NaiveDate {
        self.pickup_deadline + Duration::days(INSURANCE_TAIL_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn feet(value: i64) -> Decimal {
        Decimal::new(value, 0)
    }

    #[test]
    fn vehicle_keys_round_trip() {
        for vehicle in VehicleType::all() {
            assert_eq!(VehicleType::from_key(vehicle.key()), Some(vehicle));
        }
        assert_eq!(VehicleType::from_key("  Snowmobile "), Some(VehicleType::Snowmobile));
        assert_eq!(VehicleType::from_key("boat"), None);
    }

    #[test]
    fn length_ranges_honor_bound_exclusivity() {
        let short = LengthRange::at_most(feet(15));
        let long = LengthRange::over_up_to(feet(15), feet(20));

        assert!(short.contains(feet(15)));
        assert!(!long.contains(feet(15)));
        assert!(long.contains(Decimal::new(1501, 2)));
        assert!(long.contains(feet(20)));
        assert!(!long.contains(Decimal::new(2001, 2)));
        assert!(LengthRange::over(feet(20)).contains(feet(21)));
    }

    #[test]
    fn per_foot_rule_displays_localized_unit() {
        let rule = PriceRule::PerFoot {
            rate: Decimal::new(2250, 2),
            minimum: feet(450),
        };
        assert_eq!(rule.display(Language::En), "$22.50 / ft");
        assert_eq!(rule.display(Language::Fr), "22,50\u{a0}$ / pi");
        assert_eq!(PriceRule::Flat(feet(415)).display(Language::En), "$415");
    }

    #[test]
    fn insurance_floor_trails_pickup_deadline() {
        let season = StorageCatalog::standard();
        let winter = season.season("winter").expect("winter season");
        let expected = NaiveDate::from_ymd_opt(2026, 5, 26).expect("valid date");
        assert_eq!(winter.minimum_insurance_expiry(), expected);
    }
}
