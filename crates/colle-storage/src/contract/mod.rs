//! Contract generation: filling the seasonal storage agreement from a
//! completed draft and handing back a downloadable document.

mod builder;
mod document;
mod fields;
mod memory;
mod policies;
mod preview;

pub use builder::{BuildError, ContractBuilder};
pub use document::{
    DocumentEngine, DocumentError, FieldNotFound, FormDocument, PageSize, TemplateError,
    TemplateSource, TextStyle, LETTER,
};
pub use memory::{blank_contract_template, DocumentModel, MemoryDocumentEngine};
pub use preview::{MemoryUrlAllocator, PreviewSlot, UrlAllocator};

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::Serialize;

static CONTRACT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Unique agreement number stamped on each generated contract.
///
/// Built from the generation instant plus a process-wide sequence, so two
/// contracts generated in the same millisecond still differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ContractNumber(String);

impl ContractNumber {
    pub(crate) fn next() -> ContractNumber {
        let millis = Utc::now().timestamp_millis();
        let sequence = CONTRACT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        ContractNumber(format!("CS-{millis}-{sequence:04}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A finished contract ready to preview or download.
#[derive(Debug, Clone)]
pub struct GeneratedContract {
    pub number: ContractNumber,
    /// Suggested download name, derived from the contract number.
    pub filename: String,
    pub bytes: Vec<u8>,
}
