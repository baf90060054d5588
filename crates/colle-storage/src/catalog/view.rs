//! Fully localized, serializable projections of the catalog.
//!
//! Cards carry plain strings already rendered in one language so callers
//! never re-run localization on the wire.

use serde::Serialize;

use crate::l10n::{self, Language};

use super::{AddonService, Season, VehicleType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonCard {
    pub id: &'static str,
    pub name: String,
    pub label: String,
    pub description: String,
    pub timeframe: String,
    pub dropoff_window: String,
    pub pickup_deadline: String,
    pub deposit_note: String,
    pub rows: Vec<OfferRow>,
    pub policies: Vec<String>,
}

/// One visible line of a season's rate card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferRow {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleOption {
    pub key: &'static str,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddonCard {
    pub id: &'static str,
    pub label: String,
    pub fee: String,
    pub vehicle_keys: Vec<&'static str>,
}

impl Season {
    pub fn card(&self, language: Language) -> SeasonCard {
        SeasonCard {
            id: self.id,
            name: self.name.resolve(language).to_string(),
            label: self.label.resolve(language).to_string(),
            description: self.description.resolve(language).to_string(),
            timeframe: self.timeframe.text(language),
            dropoff_window: self.dropoff_window.text(language),
            pickup_deadline: l10n::format_date(self.pickup_deadline, language),
            deposit_note: self.deposit_note.resolve(language).to_string(),
            rows: self
                .visible_offers()
                .map(|offer| OfferRow {
                    label: offer.label.resolve(language).to_string(),
                    note: offer.note.as_ref().map(|note| note.render(language)),
                    price: offer.rule.display(language),
                })
                .collect(),
            policies: self
                .policies
                .iter()
                .map(|policy| policy.render(language))
                .collect(),
        }
    }
}

impl AddonService {
    pub fn card(&self, language: Language) -> AddonCard {
        AddonCard {
            id: self.id.key(),
            label: self.label.resolve(language).to_string(),
            fee: l10n::format_currency(self.fee, language, super::display_precision(self.fee)),
            vehicle_keys: VehicleType::all()
                .into_iter()
                .filter(|vehicle| self.available_for(*vehicle))
                .map(VehicleType::key)
                .collect(),
        }
    }
}

/// Vehicle selector entries in display order.
pub fn vehicle_options(language: Language) -> Vec<VehicleOption> {
    VehicleType::all()
        .into_iter()
        .map(|vehicle| VehicleOption {
            key: vehicle.key(),
            label: vehicle.label().resolve(language).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StorageCatalog;

    #[test]
    fn cards_render_every_visible_row_localized() {
        let catalog = StorageCatalog::standard();
        let winter = catalog.season("winter").expect("winter season");

        let en = winter.card(Language::En);
        assert_eq!(en.label, "Winter 2025-2026");
        assert_eq!(en.timeframe, "17 Oct 2025 \u{2013} 26 Apr 2026");
        assert_eq!(en.rows.len(), 7);
        assert!(en.rows.iter().any(|row| row.price == "$22.50 / ft"));

        let fr = winter.card(Language::Fr);
        assert_eq!(fr.label, "Hiver 2025-2026");
        assert!(fr.rows.iter().any(|row| row.price == "22,50\u{a0}$ / pi"));
        assert!(fr.policies[0].contains("17 oct. 2025"));
    }

    #[test]
    fn hidden_offers_stay_off_the_card() {
        let catalog = StorageCatalog::standard();
        let summer = catalog.season("summer").expect("summer season");
        let card = summer.card(Language::En);
        assert!(card.rows.iter().all(|row| !row.label.contains("placement")));
    }

    #[test]
    fn vehicle_options_cover_every_type() {
        let options = vehicle_options(Language::Fr);
        assert_eq!(options.len(), 7);
        assert!(options
            .iter()
            .any(|option| option.key == "snowmobile" && option.label == "Motoneige"));
    }
}
