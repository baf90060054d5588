//! In-process document backend.
//!
//! Documents are a JSON model of pages, draw operations, and form fields.
//! The model is deterministic (ordered maps, fixed text metrics) so tests
//! can assert on bytes, and the service can run end to end with no document
//! library installed. A real engine plugs in through the same traits.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::catalog::{self, VehicleType};
use crate::l10n::{Language, LocalizedText};

use super::document::{
    DocumentEngine, DocumentError, FieldNotFound, FormDocument, PageSize, TextStyle, LETTER,
};

const FORMAT_TAG: &str = "colle-doc/1";

/// Average glyph advance as a fraction of font size.
const REGULAR_ADVANCE: f32 = 0.5;
const BOLD_ADVANCE: f32 = 0.55;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum FieldState {
    Text {
        #[serde(default)]
        value: String,
    },
    Dropdown {
        options: Vec<String>,
        #[serde(default)]
        value: String,
    },
    Checkbox {
        #[serde(default)]
        checked: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum DrawOp {
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        style: TextStyle,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

impl DrawOp {
    fn y(&self) -> f32 {
        match self {
            DrawOp::Text { y, .. } => *y,
            DrawOp::Rect { y, .. } => *y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PageModel {
    width: f32,
    height: f32,
    #[serde(default)]
    ops: Vec<DrawOp>,
}

/// Parsed form of a memory document, also the test-side lens on generated
/// contracts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentModel {
    format: String,
    pages: Vec<PageModel>,
    fields: BTreeMap<String, FieldState>,
    #[serde(default)]
    needs_appearances: bool,
    #[serde(default)]
    refreshed: BTreeSet<String>,
}

impl DocumentModel {
    pub fn from_bytes(bytes: &[u8]) -> Result<DocumentModel, DocumentError> {
        let model: DocumentModel = serde_json::from_slice(bytes)
            .map_err(|error| DocumentError::Malformed(error.to_string()))?;
        if model.format != FORMAT_TAG {
            return Err(DocumentError::Malformed(format!(
                "unsupported document format {:?}",
                model.format
            )));
        }
        Ok(model)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DocumentError> {
        serde_json::to_vec(self).map_err(|error| DocumentError::Serialize(error.to_string()))
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn needs_appearances(&self) -> bool {
        self.needs_appearances
    }

    pub fn was_refreshed(&self, name: &str) -> bool {
        self.refreshed.contains(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn text_value(&self, name: &str) -> Option<&str> {
        match self.fields.get(name)? {
            FieldState::Text { value } => Some(value),
            _ => None,
        }
    }

    pub fn dropdown_value(&self, name: &str) -> Option<&str> {
        match self.fields.get(name)? {
            FieldState::Dropdown { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn checkbox_value(&self, name: &str) -> Option<bool> {
        match self.fields.get(name)? {
            FieldState::Checkbox { checked } => Some(*checked),
            _ => None,
        }
    }

    /// Text drawn on one page, top to bottom.
    pub fn page_text(&self, page: usize) -> Vec<&str> {
        let Some(page) = self.pages.get(page) else {
            return Vec::new();
        };
        let mut texts: Vec<(f32, &str)> = page
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, y, .. } => Some((*y, text.as_str())),
                DrawOp::Rect { .. } => None,
            })
            .collect();
        texts.sort_by(|a, b| b.0.total_cmp(&a.0));
        texts.into_iter().map(|(_, text)| text).collect()
    }
}

/// Engine that opens and saves [`DocumentModel`] JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryDocumentEngine;

impl DocumentEngine for MemoryDocumentEngine {
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn FormDocument>, DocumentError> {
        let model = DocumentModel::from_bytes(bytes)?;
        Ok(Box::new(MemoryDocument { model }))
    }
}

struct MemoryDocument {
    model: DocumentModel,
}

impl MemoryDocument {
    fn page_mut(&mut self, page: usize) -> &mut PageModel {
        &mut self.model.pages[page]
    }
}

impl FormDocument for MemoryDocument {
    fn set_text_field(&mut self, name: &str, value: &str) -> Result<(), FieldNotFound> {
        match self.model.fields.get_mut(name) {
            Some(FieldState::Text { value: slot }) => {
                *slot = value.to_string();
                Ok(())
            }
            _ => Err(FieldNotFound::named(name)),
        }
    }

    // The backend records; it does not validate. An option value outside
    // the template's list is kept verbatim.
    fn select_option(&mut self, name: &str, value: &str) -> Result<(), FieldNotFound> {
        match self.model.fields.get_mut(name) {
            Some(FieldState::Dropdown { value: slot, .. }) => {
                *slot = value.to_string();
                Ok(())
            }
            _ => Err(FieldNotFound::named(name)),
        }
    }

    fn set_checkbox(&mut self, name: &str, checked: bool) -> Result<(), FieldNotFound> {
        match self.model.fields.get_mut(name) {
            Some(FieldState::Checkbox { checked: slot }) => {
                *slot = checked;
                Ok(())
            }
            _ => Err(FieldNotFound::named(name)),
        }
    }

    fn refresh_appearance(&mut self, name: &str) -> Result<(), FieldNotFound> {
        if !self.model.fields.contains_key(name) {
            return Err(FieldNotFound::named(name));
        }
        self.model.refreshed.insert(name.to_string());
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.model.pages.len()
    }

    fn page_size(&self, page: usize) -> PageSize {
        let page = &self.model.pages[page];
        PageSize {
            width: page.width,
            height: page.height,
        }
    }

    fn content_floor(&self, page: usize) -> f32 {
        let page = &self.model.pages[page];
        page.ops
            .iter()
            .map(DrawOp::y)
            .fold(page.height, f32::min)
    }

    fn add_page(&mut self, size: PageSize) -> usize {
        self.model.pages.push(PageModel {
            width: size.width,
            height: size.height,
            ops: Vec::new(),
        });
        self.model.pages.len() - 1
    }

    fn draw_text(&mut self, page: usize, text: &str, x: f32, y: f32, size: f32, style: TextStyle) {
        self.page_mut(page).ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            size,
            style,
        });
    }

    fn draw_rect(&mut self, page: usize, x: f32, y: f32, width: f32, height: f32) {
        self.page_mut(page).ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
        });
    }

    fn text_width(&self, text: &str, size: f32, style: TextStyle) -> f32 {
        let advance = match style {
            TextStyle::Regular => REGULAR_ADVANCE,
            TextStyle::Bold => BOLD_ADVANCE,
        };
        text.chars().count() as f32 * size * advance
    }

    fn set_needs_appearances(&mut self, value: bool) {
        self.model.needs_appearances = value;
    }

    fn save(&mut self) -> Result<Vec<u8>, DocumentError> {
        self.model.to_bytes()
    }
}

struct TemplateWriter {
    model: DocumentModel,
    y: f32,
}

impl TemplateWriter {
    fn new() -> TemplateWriter {
        TemplateWriter {
            model: DocumentModel {
                format: FORMAT_TAG.to_string(),
                pages: vec![PageModel {
                    width: LETTER.width,
                    height: LETTER.height,
                    ops: Vec::new(),
                }],
                fields: BTreeMap::new(),
                needs_appearances: false,
                refreshed: BTreeSet::new(),
            },
            y: 742.0,
        }
    }

    fn line(&mut self, text: &str, size: f32, style: TextStyle, advance: f32) {
        self.model.pages[0].ops.push(DrawOp::Text {
            text: text.to_string(),
            x: 54.0,
            y: self.y,
            size,
            style,
        });
        self.y -= advance;
    }

    fn heading(&mut self, text: &str) {
        self.y -= 6.0;
        self.line(text, 12.0, TextStyle::Bold, 20.0);
    }

    fn text_field(&mut self, label: &str, name: &str) {
        self.line(label, 12.0, TextStyle::Regular, 18.0);
        self.model
            .fields
            .insert(name.to_string(), FieldState::Text {
                value: String::new(),
            });
    }

    fn dropdown_field(&mut self, label: &str, name: &str, options: Vec<String>) {
        self.line(label, 12.0, TextStyle::Regular, 18.0);
        self.model.fields.insert(
            name.to_string(),
            FieldState::Dropdown {
                options,
                value: String::new(),
            },
        );
    }

    fn checkbox_field(&mut self, label: &str, name: &str) {
        self.line(label, 12.0, TextStyle::Regular, 18.0);
        self.model
            .fields
            .insert(name.to_string(), FieldState::Checkbox { checked: false });
    }

    fn footer(mut self) -> DocumentModel {
        self.model.pages[0].ops.push(DrawOp::Rect {
            x: 54.0,
            y: 86.0,
            width: LETTER.width - 108.0,
            height: 0.75,
        });
        self.model.pages[0].ops.push(DrawOp::Text {
            text: format!(
                "Colle Storage \u{2022} {} \u{2022} {}",
                catalog::YARD_ADDRESS,
                catalog::BUSINESS_PHONE
            ),
            x: 54.0,
            y: 72.0,
            size: 9.0,
            style: TextStyle::Regular,
        });
        self.model
    }
}

/// Builds the bundled blank contract, used whenever no template service is
/// configured. Same field names the hosted templates use.
pub fn blank_contract_template(language: Language) -> Vec<u8> {
    let t = |en: &'static str, fr: &'static str| LocalizedText::new(en, fr).resolve(language);
    let mut writer = TemplateWriter::new();

    writer.line(
        t(
            "Colle Storage \u{2013} Seasonal Storage Contract",
            "Colle Storage \u{2013} Contrat d'entreposage saisonnier",
        ),
        18.0,
        TextStyle::Bold,
        28.0,
    );
    writer.line(
        t(
            "Complete every section, then sign at drop-off.",
            "Remplissez chaque section, puis signez au d\u{e9}p\u{f4}t.",
        ),
        10.0,
        TextStyle::Regular,
        24.0,
    );

    writer.heading(t("Tenant", "Locataire"));
    writer.text_field(t("Full name", "Nom complet"), "tenant_name");
    writer.text_field(t("Phone", "T\u{e9}l\u{e9}phone"), "tenant_phone");
    writer.text_field(t("Email", "Courriel"), "tenant_email");
    writer.text_field(t("Mailing address", "Adresse postale"), "tenant_address");

    writer.heading(t("Vehicle", "V\u{e9}hicule"));
    let options = VehicleType::all()
        .into_iter()
        .map(|vehicle| vehicle.label().resolve(language).to_string())
        .collect();
    writer.dropdown_field(t("Vehicle type", "Type de v\u{e9}hicule"), "vehicle_type", options);
    writer.text_field(t("Length (ft)", "Longueur (pi)"), "vehicle_length");
    writer.text_field(t("License plate", "Plaque d'immatriculation"), "plate");
    writer.text_field(t("Season", "Saison"), "season_label");
    writer.text_field(t("Storage period", "P\u{e9}riode d'entreposage"), "lease_duration");

    writer.heading(t("Insurance", "Assurance"));
    writer.text_field(t("Insurance company", "Compagnie d'assurance"), "insurance_company");
    writer.text_field(t("Policy number", "Num\u{e9}ro de police"), "policy_number");
    writer.text_field(t("Policy expiry", "\u{c9}ch\u{e9}ance de la police"), "insurance_expiry");

    writer.heading(t("Pricing", "Tarification"));
    writer.text_field(t("Estimated cost", "Co\u{fb}t estim\u{e9}"), "estimated_cost");
    writer.text_field(t("Deposit", "D\u{e9}p\u{f4}t"), "deposit_amount");
    writer.checkbox_field(t("Battery maintenance", "Entretien de la batterie"), "addon_battery");
    writer.checkbox_field(
        t("Propane tank storage", "Entreposage de bonbonne de propane"),
        "addon_propane",
    );

    writer.heading(t("Agreement", "Entente"));
    writer.text_field(t("Contract number", "Num\u{e9}ro de contrat"), "contract_number");
    writer.text_field(t("Notes", "Remarques"), "notes");
    writer.text_field(t("Signed at", "Sign\u{e9} \u{e0}"), "signed_at");
    writer.text_field(t("Date", "Date"), "signature_date");

    let model = writer.footer();
    model.to_bytes().expect("template model serializes")
}
