//! Pricing estimation and bilingual contract generation for Colle Storage's
//! seasonal vehicle storage.
//!
//! The crate is the storefront's brain: the published [`catalog`], the
//! [`pricing`] rules over it, the step-by-step [`booking`] flow with its
//! saved drafts, and [`contract`] generation onto fillable templates. All
//! copy is English/French via [`l10n`]; nothing here owns a language.

pub mod booking;
pub mod catalog;
pub mod contact;
pub mod contract;
pub mod l10n;
pub mod pricing;
