//! The multi-step booking flow behind the contract form.
//!
//! A [`BookingSession`] owns the working [`ContractDraft`], walks the tenant
//! through the steps, keeps derived figures current, and mirrors the draft
//! into a [`DraftStore`] keyed by vehicle type so half-finished forms survive
//! a visit.

mod derived;
mod draft;
mod steps;
mod store;

pub use derived::{derive, DerivedFields};
pub use draft::ContractDraft;
pub use steps::{validate_draft, BookingSession, BookingStep, FieldId, ValidationFailed};
pub use store::{draft_key, DraftStore, MemoryDraftStore, StorageError, LANGUAGE_PREF_KEY};
