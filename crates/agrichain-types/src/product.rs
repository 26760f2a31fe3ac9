//! On-chain product record projection.

use serde::Serialize;

use crate::NOT_AVAILABLE;

/// Read-only projection of `getProductDetails(string)`.
///
/// The contract returns `(name, batchId, details)` in that order. Fields that
/// are missing or not text are coerced to empty strings when the record is
/// built, so rendering never has to deal with absent values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    pub name: String,
    pub batch_id: String,
    pub detail_blob: String,
}

impl ProductRecord {
    pub fn new(
        name: impl Into<String>,
        batch_id: impl Into<String>,
        detail_blob: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            batch_id: batch_id.into(),
            detail_blob: detail_blob.into(),
        }
    }

    /// Build from positional tuple fields. Extra fields are ignored,
    /// missing or `None` fields become empty.
    pub fn from_fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = Option<String>>,
    {
        let mut it = fields.into_iter();
        let mut next = || it.next().flatten().unwrap_or_default();
        let name = next();
        let batch_id = next();
        let detail_blob = next();
        Self {
            name,
            batch_id,
            detail_blob,
        }
    }

    pub fn has_details(&self) -> bool {
        !self.detail_blob.is_empty()
    }
}

/// `"N/A"` for empty values, the value itself otherwise.
pub fn display_or_na(value: &str) -> &str {
    if value.is_empty() { NOT_AVAILABLE } else { value }
}
