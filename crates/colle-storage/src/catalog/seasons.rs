//! The published catalog for the current storage year.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::l10n::{self, Language, LocalizedText, LocalizedValue};

use super::{
    AddonAvailability, AddonId, AddonService, DateRange, LengthRange, Offer, PriceRule, Season,
    VehicleType,
};

/// Every season, offer, and optional service the yard currently sells.
///
/// Seasons keep their identity by `id`; display labels change year over year
/// and saved drafts may still carry an old label, so lookups accept both.
pub struct StorageCatalog {
    seasons: Vec<Season>,
    addons: Vec<AddonService>,
    terms: Vec<LocalizedValue>,
}

impl StorageCatalog {
    /// The 2025-2026 storage year as published.
    pub fn standard() -> StorageCatalog {
        StorageCatalog {
            seasons: vec![winter(), summer()],
            addons: addon_services(),
            terms: storage_terms(),
        }
    }

    pub fn seasons(&self) -> &[Season] {
        &self.seasons
    }

    pub fn season(&self, id: &str) -> Option<&Season> {
        self.seasons.iter().find(|season| season.id == id)
    }

    /// Recovers a season from free text, matching the stored name or display
    /// label in either language, case-insensitively.
    pub fn season_by_label(&self, text: &str) -> Option<&Season> {
        let wanted = text.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }
        self.seasons.iter().find(|season| {
            [
                season.label.en,
                season.label.fr,
                season.name.en,
                season.name.fr,
            ]
            .iter()
            .any(|candidate| candidate.to_lowercase() == wanted)
        })
    }

    /// Season lookup for stored drafts: by id first, then by display label
    /// for drafts saved before ids were stored.
    pub fn resolve_season(&self, raw: &str) -> Option<&Season> {
        self.season(raw.trim()).or_else(|| self.season_by_label(raw))
    }

    pub fn addons(&self) -> &[AddonService] {
        &self.addons
    }

    pub fn addon(&self, id: AddonId) -> Option<&AddonService> {
        self.addons.iter().find(|addon| addon.id == id)
    }

    pub fn addons_for(&self, vehicle: VehicleType) -> impl Iterator<Item = &AddonService> {
        self.addons
            .iter()
            .filter(move |addon| addon.available_for(vehicle))
    }

    /// General conditions printed at the end of every contract.
    pub fn storage_terms(&self) -> &[LocalizedValue] {
        &self.terms
    }
}

fn dollars(units: i64) -> Decimal {
    Decimal::new(units, 0)
}

fn cents(total: i64) -> Decimal {
    Decimal::new(total, 2)
}

fn feet(value: i64) -> Decimal {
    Decimal::new(value, 0)
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

fn minimum_note(minimum: Decimal) -> LocalizedValue {
    // "Minimum" reads the same in both languages; only the money format moves.
    LocalizedValue::computed(move |language| {
        format!(
            "Minimum {}",
            l10n::format_currency(minimum, language, super::display_precision(minimum))
        )
    })
}

fn intake_policy(window: DateRange, deadline: NaiveDate, late_fee: Decimal) -> LocalizedValue {
    LocalizedValue::computed(move |language| {
        let fee = l10n::format_currency(late_fee, language, 0);
        match language {
            Language::En => format!(
                "Vehicles are received between {} and {}; pickup no later than {} (late fee {}/day).",
                l10n::format_date(window.start, language),
                l10n::format_date(window.end, language),
                l10n::format_date(deadline, language),
                fee,
            ),
            Language::Fr => format!(
                "Les v\u{e9}hicules sont re\u{e7}us entre le {} et le {}; reprise au plus tard le {} (frais de retard de {}/jour).",
                l10n::format_date(window.start, language),
                l10n::format_date(window.end, language),
                l10n::format_date(deadline, language),
                fee,
            ),
        }
    })
}

fn winter() -> Season {
    let dropoff = DateRange::new(date(2025, 10, 17), date(2025, 11, 1));
    let deadline = date(2026, 4, 26);
    Season {
        id: "winter",
        name: LocalizedText::new("Winter Storage", "Entreposage d'hiver"),
        label: LocalizedText::new("Winter 2025-2026", "Hiver 2025-2026"),
        description: LocalizedText::new(
            "Indoor and outdoor winter storage for cars, trucks, trailers, motorhomes, and motorcycles.",
            "Entreposage d'hiver int\u{e9}rieur et ext\u{e9}rieur pour voitures, camions, remorques, motoris\u{e9}s et motos.",
        ),
        timeframe: DateRange::new(date(2025, 10, 17), deadline),
        dropoff_window: dropoff,
        pickup_deadline: deadline,
        deposit_note: LocalizedText::new(
            "$100 deposit per space ($40 for motorcycles and sleds)",
            "D\u{e9}p\u{f4}t de 100 $ par espace (40 $ pour motos et motoneiges)",
        ),
        offers: vec![
            Offer {
                label: LocalizedText::new(
                    "Indoor trailer / motorhome storage",
                    "Entreposage int\u{e9}rieur de remorque / motoris\u{e9}",
                ),
                vehicle_types: &[VehicleType::Trailer, VehicleType::Motorhome],
                length_range: None,
                rule: PriceRule::PerFoot {
                    rate: cents(2250),
                    minimum: dollars(450),
                },
                note: Some(minimum_note(dollars(450))),
                visible: true,
            },
            Offer {
                label: LocalizedText::new(
                    "Outdoor trailer / RV on concrete (up to 30 ft)",
                    "Remorque / VR ext\u{e9}rieur sur b\u{e9}ton (jusqu'\u{e0} 30 pi)",
                ),
                vehicle_types: &[],
                length_range: None,
                rule: PriceRule::Flat(dollars(370)),
                note: None,
                visible: true,
            },
            Offer {
                label: LocalizedText::new(
                    "Indoor car storage (15 ft and under)",
                    "Entreposage int\u{e9}rieur de voiture (15 pi et moins)",
                ),
                vehicle_types: &[VehicleType::Car],
                length_range: Some(LengthRange::at_most(feet(15))),
                rule: PriceRule::Flat(dollars(415)),
                note: None,
                visible: true,
            },
            Offer {
                label: LocalizedText::new(
                    "Indoor car storage (15 to 20 ft)",
                    "Entreposage int\u{e9}rieur de voiture (15 \u{e0} 20 pi)",
                ),
                vehicle_types: &[VehicleType::Car],
                length_range: Some(LengthRange::over_up_to(feet(15), feet(20))),
                rule: PriceRule::Flat(dollars(460)),
                note: None,
                visible: true,
            },
            Offer {
                label: LocalizedText::new(
                    "Indoor pickup / work truck storage",
                    "Entreposage int\u{e9}rieur de camionnette / camion",
                ),
                vehicle_types: &[VehicleType::Truck],
                length_range: None,
                rule: PriceRule::PerFoot {
                    rate: cents(2250),
                    minimum: dollars(405),
                },
                note: Some(minimum_note(dollars(405))),
                visible: true,
            },
            Offer {
                label: LocalizedText::new(
                    "Indoor motorcycle storage",
                    "Entreposage int\u{e9}rieur de moto",
                ),
                vehicle_types: &[VehicleType::Motorcycle],
                length_range: None,
                rule: PriceRule::Flat(dollars(175)),
                note: None,
                visible: true,
            },
            Offer {
                label: LocalizedText::new(
                    "Indoor Can-Am Spyder storage",
                    "Entreposage int\u{e9}rieur de Can-Am Spyder",
                ),
                vehicle_types: &[VehicleType::Spyder],
                length_range: None,
                rule: PriceRule::Flat(dollars(240)),
                note: None,
                visible: true,
            },
            Offer {
                label: LocalizedText::new(
                    "Oversize car placement",
                    "Placement de voiture hors gabarit",
                ),
                vehicle_types: &[VehicleType::Car],
                length_range: Some(LengthRange::over(feet(20))),
                rule: PriceRule::Contact,
                note: None,
                visible: false,
            },
        ],
        policies: vec![
            intake_policy(dropoff, deadline, dollars(5)),
            LocalizedValue::fixed(
                "Vehicles must arrive clean, with a quarter tank of fuel or less.",
                "Les v\u{e9}hicules doivent arriver propres, avec un quart de r\u{e9}servoir d'essence ou moins.",
            ),
            LocalizedValue::fixed(
                "Indoor spaces are not accessible during the season without an appointment.",
                "Les espaces int\u{e9}rieurs ne sont pas accessibles pendant la saison sans rendez-vous.",
            ),
            LocalizedValue::fixed(
                "Battery disconnection is recommended; the battery maintenance option keeps it charged over the winter.",
                "Le d\u{e9}branchement de la batterie est recommand\u{e9}; l'option d'entretien la garde charg\u{e9}e tout l'hiver.",
            ),
        ],
    }
}

fn summer() -> Season {
    let dropoff = DateRange::new(date(2025, 5, 3), date(2025, 5, 17));
    let deadline = date(2025, 10, 10);
    Season {
        id: "summer",
        name: LocalizedText::new("Summer Storage", "Entreposage d'\u{e9}t\u{e9}"),
        label: LocalizedText::new("Summer 2025", "\u{c9}t\u{e9} 2025"),
        description: LocalizedText::new(
            "Indoor summer storage for snowmobiles, sleds on trailers, and seasonal cars.",
            "Entreposage d'\u{e9}t\u{e9} int\u{e9}rieur pour motoneiges, motoneiges sur remorque et voitures saisonni\u{e8}res.",
        ),
        timeframe: DateRange::new(date(2025, 5, 3), deadline),
        dropoff_window: dropoff,
        pickup_deadline: deadline,
        deposit_note: LocalizedText::new(
            "$100 deposit per car, $40 per sled",
            "D\u{e9}p\u{f4}t de 100 $ par voiture, 40 $ par motoneige",
        ),
        offers: vec![
            Offer {
                label: LocalizedText::new(
                    "Indoor car storage (15 ft and under)",
                    "Entreposage int\u{e9}rieur de voiture (15 pi et moins)",
                ),
                vehicle_types: &[VehicleType::Car],
                length_range: Some(LengthRange::at_most(feet(15))),
                rule: PriceRule::Flat(dollars(415)),
                note: None,
                visible: true,
            },
            Offer {
                label: LocalizedText::new("Snowmobile storage", "Entreposage de motoneige"),
                vehicle_types: &[VehicleType::Snowmobile],
                length_range: None,
                rule: PriceRule::Flat(dollars(180)),
                note: None,
                visible: true,
            },
            Offer {
                label: LocalizedText::new(
                    "Snowmobile with single trailer",
                    "Motoneige avec remorque simple",
                ),
                vehicle_types: &[],
                length_range: None,
                rule: PriceRule::Flat(dollars(250)),
                note: None,
                visible: true,
            },
            Offer {
                label: LocalizedText::new(
                    "Snowmobiles with double trailer",
                    "Motoneiges avec remorque double",
                ),
                vehicle_types: &[],
                length_range: None,
                rule: PriceRule::Flat(dollars(440)),
                note: None,
                visible: true,
            },
            Offer {
                label: LocalizedText::new(
                    "Oversize car placement",
                    "Placement de voiture hors gabarit",
                ),
                vehicle_types: &[VehicleType::Car],
                length_range: Some(LengthRange::over(feet(15))),
                rule: PriceRule::Contact,
                note: None,
                visible: false,
            },
            Offer {
                label: LocalizedText::new(
                    "Truck placement on request",
                    "Placement de camion sur demande",
                ),
                vehicle_types: &[VehicleType::Truck],
                length_range: None,
                rule: PriceRule::Contact,
                note: None,
                visible: false,
            },
        ],
        policies: vec![
            intake_policy(dropoff, deadline, dollars(5)),
            LocalizedValue::fixed(
                "Vehicles must arrive clean, with a quarter tank of fuel or less.",
                "Les v\u{e9}hicules doivent arriver propres, avec un quart de r\u{e9}servoir d'essence ou moins.",
            ),
            LocalizedValue::fixed(
                "Summer bays are dry indoor storage; vehicles are not accessible until fall pickup.",
                "Les espaces d'\u{e9}t\u{e9} sont des baies int\u{e9}rieures s\u{e8}ches; les v\u{e9}hicules ne sont pas accessibles avant la reprise d'automne.",
            ),
        ],
    }
}

fn addon_services() -> Vec<AddonService> {
    vec![
        AddonService {
            id: AddonId::Battery,
            label: LocalizedText::new("Battery maintenance", "Entretien de la batterie"),
            fee: dollars(25),
            availability: AddonAvailability::AllVehicles,
        },
        AddonService {
            id: AddonId::Propane,
            label: LocalizedText::new(
                "Propane tank storage",
                "Entreposage de bonbonne de propane",
            ),
            fee: dollars(15),
            availability: AddonAvailability::Only(&[VehicleType::Motorhome]),
        },
    ]
}

fn storage_terms() -> Vec<LocalizedValue> {
    vec![
        LocalizedValue::fixed(
            "The tenant certifies ownership of the stored vehicle and the accuracy of the information provided.",
            "Le locataire certifie \u{ea}tre propri\u{e9}taire du v\u{e9}hicule entrepos\u{e9} et atteste l'exactitude des renseignements fournis.",
        ),
        LocalizedValue::fixed(
            "The vehicle must carry valid insurance for the full storage period; storage is at the tenant's risk.",
            "Le v\u{e9}hicule doit \u{ea}tre assur\u{e9} pour toute la p\u{e9}riode d'entreposage; l'entreposage est aux risques du locataire.",
        ),
        LocalizedValue::fixed(
            "Storage fees are payable in full at drop-off; the deposit is non-refundable.",
            "Les frais d'entreposage sont payables en entier au d\u{e9}p\u{f4}t; le d\u{e9}p\u{f4}t de r\u{e9}servation n'est pas remboursable.",
        ),
        LocalizedValue::fixed(
            "Vehicles left more than 30 days past the pickup deadline may be moved to outdoor storage at the tenant's expense.",
            "Les v\u{e9}hicules laiss\u{e9}s plus de 30 jours apr\u{e8}s la date limite de reprise peuvent \u{ea}tre d\u{e9}plac\u{e9}s \u{e0} l'ext\u{e9}rieur aux frais du locataire.",
        ),
        LocalizedValue::fixed(
            "Arrivals and departures must be scheduled with the office at least 48 hours in advance.",
            "Les arriv\u{e9}es et d\u{e9}parts doivent \u{ea}tre planifi\u{e9}s avec le bureau au moins 48 heures \u{e0} l'avance.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::l10n::Language;

    #[test]
    fn standard_catalog_publishes_both_seasons() {
        let catalog = StorageCatalog::standard();
        let ids: Vec<&str> = catalog.seasons().iter().map(|season| season.id).collect();
        assert_eq!(ids, vec!["winter", "summer"]);
        assert_eq!(catalog.addons().len(), 2);
        assert_eq!(catalog.storage_terms().len(), 5);
    }

    #[test]
    fn season_lookup_accepts_labels_in_either_language() {
        let catalog = StorageCatalog::standard();
        let winter = catalog.season("winter").expect("winter season");

        assert_eq!(
            catalog.season_by_label("winter 2025-2026").map(|s| s.id),
            Some(winter.id)
        );
        assert_eq!(
            catalog.season_by_label("HIVER 2025-2026").map(|s| s.id),
            Some(winter.id)
        );
        assert_eq!(
            catalog.season_by_label("Entreposage d'hiver").map(|s| s.id),
            Some(winter.id)
        );
        assert!(catalog.season_by_label("Spring 2026").is_none());
        assert!(catalog.season_by_label("  ").is_none());
    }

    #[test]
    fn resolve_season_prefers_id_over_label() {
        let catalog = StorageCatalog::standard();
        assert_eq!(catalog.resolve_season("summer").map(|s| s.id), Some("summer"));
        assert_eq!(
            catalog.resolve_season("Summer 2025").map(|s| s.id),
            Some("summer")
        );
        assert!(catalog.resolve_season("fall").is_none());
    }

    #[test]
    fn propane_addon_is_motorhome_only() {
        let catalog = StorageCatalog::standard();
        let propane = catalog.addon(AddonId::Propane).expect("propane addon");
        assert!(propane.available_for(VehicleType::Motorhome));
        assert!(!propane.available_for(VehicleType::Car));

        let for_car: Vec<AddonId> = catalog
            .addons_for(VehicleType::Car)
            .map(|addon| addon.id)
            .collect();
        assert_eq!(for_car, vec![AddonId::Battery]);
    }

    #[test]
    fn every_vehicle_type_reaches_an_offer_at_any_length() {
        // Rate cards may leave gaps only if a hidden placement row closes
        // them, so a quote can always be answered without a dead end.
        let catalog = StorageCatalog::standard();
        for season in catalog.seasons() {
            for vehicle in VehicleType::all() {
                let offers: Vec<&Offer> = season.offers_for(vehicle).collect();
                if offers.is_empty() {
                    continue;
                }
                let mut length = Decimal::new(5, 1);
                while length < Decimal::new(80, 0) {
                    assert!(
                        offers.iter().any(|offer| offer
                            .length_range
                            .map_or(true, |range| range.contains(length))),
                        "{} {:?} has no offer at {} ft",
                        season.id,
                        vehicle,
                        length
                    );
                    length += Decimal::new(5, 1);
                }
            }
        }
    }

    #[test]
    fn intake_policy_interpolates_formatted_dates_and_fee() {
        let catalog = StorageCatalog::standard();
        let winter = catalog.season("winter").expect("winter season");
        let en = winter.policies[0].render(Language::En);
        let fr = winter.policies[0].render(Language::Fr);

        assert!(en.contains("17 Oct 2025"));
        assert!(en.contains("$5/day"));
        assert!(fr.contains("17 oct. 2025"));
        assert!(fr.contains("5\u{a0}$/jour"));
    }
}
