//! Seams to the document stack.
//!
//! Contract generation talks to two collaborators it does not own: somewhere
//! to fetch the fillable template from, and an engine that understands the
//! document format. Both are traits so the service can swap the real stack
//! for the in-process one in [`super::memory`] without touching the builder.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::l10n::Language;

/// US Letter, in points.
pub const LETTER: PageSize = PageSize {
    width: 612.0,
    height: 792.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    Regular,
    Bold,
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template request returned status {status}")]
    Status { status: u16 },
    #[error("template request failed: {0}")]
    Network(String),
}

/// Fetches the blank fillable contract for one language.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    async fn fetch(&self, language: Language) -> Result<Vec<u8>, TemplateError>;
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed contract template: {0}")]
    Malformed(String),
    #[error("document could not be serialized: {0}")]
    Serialize(String),
}

#[derive(Debug, Error)]
#[error("no form field named {name}")]
pub struct FieldNotFound {
    pub name: String,
}

impl FieldNotFound {
    pub(crate) fn named(name: &str) -> FieldNotFound {
        FieldNotFound {
            name: name.to_string(),
        }
    }
}

/// Opens template bytes into an editable document.
pub trait DocumentEngine: Send + Sync {
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn FormDocument>, DocumentError>;
}

/// One open document with a fillable form and drawable pages.
///
/// Field setters fail with [`FieldNotFound`] when the template has no field
/// of that name and kind; drawing calls are infallible. Coordinates follow
/// document convention: origin at the bottom-left, y growing upward.
pub trait FormDocument: Send {
    fn set_text_field(&mut self, name: &str, value: &str) -> Result<(), FieldNotFound>;
    fn select_option(&mut self, name: &str, value: &str) -> Result<(), FieldNotFound>;
    fn set_checkbox(&mut self, name: &str, checked: bool) -> Result<(), FieldNotFound>;
    /// Regenerates the printed appearance of one field. Date fields need
    /// this after a programmatic set or viewers show the stale mask.
    fn refresh_appearance(&mut self, name: &str) -> Result<(), FieldNotFound>;

    fn page_count(&self) -> usize;
    fn page_size(&self, page: usize) -> PageSize;
    /// Lowest y touched by existing content on a page, or the page height
    /// when the page is blank. Everything below is free space.
    fn content_floor(&self, page: usize) -> f32;
    /// Appends a blank page and returns its index.
    fn add_page(&mut self, size: PageSize) -> usize;
    fn draw_text(&mut self, page: usize, text: &str, x: f32, y: f32, size: f32, style: TextStyle);
    fn draw_rect(&mut self, page: usize, x: f32, y: f32, width: f32, height: f32);
    /// Rendered width of `text` at `size`, in points.
    fn text_width(&self, text: &str, size: f32, style: TextStyle) -> f32;
    /// Tells viewers to rebuild field appearances on open, so filled values
    /// show regardless of the fonts embedded in the template.
    fn set_needs_appearances(&mut self, value: bool);
    fn save(&mut self) -> Result<Vec<u8>, DocumentError>;
}
