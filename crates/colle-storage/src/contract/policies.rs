//! The storage-conditions section appended after the form pages.
//!
//! Laid out by hand the way the office's paper addendum reads: a bold
//! heading, the season's own rules, a divider, the general terms, and the
//! drop-off reminder. Text wraps to the page and spills onto fresh pages
//! when it runs out of room.

use crate::catalog::{Season, StorageCatalog};
use crate::l10n::{self, Language, LocalizedText};

use super::document::{FormDocument, TextStyle, LETTER};

pub(crate) const MARGIN_X: f32 = 54.0;
pub(crate) const LINE_HEIGHT: f32 = 18.0;
pub(crate) const HEADING_HEIGHT: f32 = 20.0;
pub(crate) const BOTTOM_MARGIN: f32 = 60.0;
pub(crate) const TOP_CURSOR: f32 = 742.0;
const BODY_SIZE: f32 = 12.0;
const SECTION_GAP: f32 = 24.0;

/// Writes the full conditions block, continuing on the template's last page
/// when it has room for at least the heading and a couple of lines.
pub(crate) fn append_policy_section(
    doc: &mut dyn FormDocument,
    catalog: &StorageCatalog,
    season: Option<&Season>,
    language: Language,
) {
    let heading = LocalizedText::new("Storage conditions", "Conditions d'entreposage");
    let mut cursor = SectionCursor::start(doc);
    cursor.heading(heading.resolve(language));

    let mut index = 1;
    if let Some(season) = season {
        for policy in &season.policies {
            cursor.numbered(index, &policy.render(language));
            index += 1;
        }
        cursor.divider();
    }
    for term in catalog.storage_terms() {
        cursor.numbered(index, &term.render(language));
        index += 1;
    }
    cursor.divider();
    cursor.paragraph(&schedule_reminder(season, language));
}

fn schedule_reminder(season: Option<&Season>, language: Language) -> String {
    match season {
        Some(season) => match language {
            Language::En => format!(
                "Drop-off window for {}: {}; pickup by {}.",
                season.label.resolve(language),
                season.dropoff_window.text(language),
                l10n::format_date(season.pickup_deadline, language),
            ),
            Language::Fr => format!(
                "P\u{e9}riode de d\u{e9}p\u{f4}t pour {} : {}; reprise avant le {}.",
                season.label.resolve(language),
                season.dropoff_window.text(language),
                l10n::format_date(season.pickup_deadline, language),
            ),
        },
        None => LocalizedText::new(
            "Drop-off and pickup dates: see your confirmation email.",
            "Dates de d\u{e9}p\u{f4}t et de reprise : voir votre courriel de confirmation.",
        )
        .resolve(language)
        .to_string(),
    }
}

struct SectionCursor<'d> {
    doc: &'d mut dyn FormDocument,
    page: usize,
    y: f32,
}

impl<'d> SectionCursor<'d> {
    fn start(doc: &'d mut dyn FormDocument) -> SectionCursor<'d> {
        let required = SECTION_GAP + HEADING_HEIGHT + 2.0 * LINE_HEIGHT;
        if doc.page_count() > 0 {
            let last = doc.page_count() - 1;
            let floor = doc.content_floor(last);
            if floor - required >= BOTTOM_MARGIN {
                return SectionCursor {
                    doc,
                    page: last,
                    y: floor - SECTION_GAP,
                };
            }
        }
        let page = doc.add_page(LETTER);
        SectionCursor {
            doc,
            page,
            y: TOP_CURSOR,
        }
    }

    fn ensure_room(&mut self, needed: f32) {
        if self.y - needed < BOTTOM_MARGIN {
            self.page = self.doc.add_page(LETTER);
            self.y = TOP_CURSOR;
        }
    }

    fn body_width(&self) -> f32 {
        self.doc.page_size(self.page).width - 2.0 * MARGIN_X
    }

    fn heading(&mut self, text: &str) {
        self.ensure_room(HEADING_HEIGHT);
        self.doc
            .draw_text(self.page, text, MARGIN_X, self.y, BODY_SIZE, TextStyle::Bold);
        self.y -= HEADING_HEIGHT;
    }

    fn numbered(&mut self, index: usize, text: &str) {
        self.paragraph(&format!("{index}. {text}"));
    }

    fn paragraph(&mut self, text: &str) {
        let lines = wrap_text(self.doc, text, BODY_SIZE, TextStyle::Regular, self.body_width());
        for line in lines {
            self.ensure_room(LINE_HEIGHT);
            self.doc
                .draw_text(self.page, &line, MARGIN_X, self.y, BODY_SIZE, TextStyle::Regular);
            self.y -= LINE_HEIGHT;
        }
    }

    fn divider(&mut self) {
        self.ensure_room(LINE_HEIGHT);
        let width = self.body_width();
        self.doc
            .draw_rect(self.page, MARGIN_X, self.y - 4.0, width, 0.75);
        self.y -= LINE_HEIGHT;
    }
}

/// Greedy word wrap against the engine's text metrics. A single word wider
/// than the line is placed anyway rather than split.
fn wrap_text(
    doc: &dyn FormDocument,
    text: &str,
    size: f32,
    style: TextStyle,
    max_width: f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };
        if line.is_empty() || doc.text_width(&candidate, size, style) <= max_width {
            line = candidate;
        } else {
            lines.push(line);
            line = word.to_string();
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
