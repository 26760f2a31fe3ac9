//! Product record types and pure-logic parsing for the AgriChain viewer.
//! No network or async dependency, usable by any presentation layer.

mod detail;
mod messages;
mod product;

pub use detail::{DetailEntry, DetailField, parse_detail_blob};
pub use messages::{
    CONTRACT_NOT_INITIALIZED, EMPTY_PRODUCT_ID, NO_DETAILS, NOT_AVAILABLE, PRODUCT_NOT_FOUND,
    PROVIDER_NOT_INSTALLED,
};
pub use product::{ProductRecord, display_or_na};
