//! Detail string parsing.
//!
//! The contract stores ingredient and processing history as one string:
//! entries separated by `" | "`, fields inside an entry separated by `", "`,
//! and each field written as `label: value`.

use serde::Serialize;

const ENTRY_SEPARATOR: &str = " | ";
const FIELD_SEPARATOR: &str = ", ";
const LABEL_SEPARATOR: &str = ": ";

/// One `label: value` pair. `value` is `None` when the token has no `": "`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailField {
    pub label: String,
    pub value: Option<String>,
}

impl DetailField {
    fn parse(token: &str) -> Self {
        let mut parts = token.split(LABEL_SEPARATOR);
        // Only the first two segments count; `a: b: c` keeps `b`.
        let label = parts.next().unwrap_or_default().to_string();
        let value = parts.next().map(str::to_string);
        Self { label, value }
    }

    /// Value for display; absent renders as empty.
    pub fn value_or_empty(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

/// One processing stage or ingredient record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailEntry {
    pub fields: Vec<DetailField>,
}

impl DetailEntry {
    fn parse(segment: &str) -> Self {
        Self {
            fields: segment.split(FIELD_SEPARATOR).map(DetailField::parse).collect(),
        }
    }

    #[cfg(test)]
    fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .and_then(|f| f.value.as_deref())
    }
}

/// Split a detail blob into entries. Blank entries are dropped; an empty blob
/// yields no entries. Never fails.
pub fn parse_detail_blob(blob: &str) -> Vec<DetailEntry> {
    if blob.is_empty() {
        return Vec::new();
    }
    blob.split(ENTRY_SEPARATOR)
        .filter(|segment| !segment.trim().is_empty())
        .map(DetailEntry::parse)
        .collect()
}
