//! Marketplace search type to processor type mapping

use procat_common::SearchableType;

use crate::models::DataProcessorType;

/// Map a marketplace searchable type onto the processor family
///
/// Project types have no processor counterpart and map to `None`. No wildcard
/// arm: a new `SearchableType` variant must be mapped here before it compiles.
pub fn convert(searchable_type: SearchableType) -> Option<DataProcessorType> {
    match searchable_type {
        SearchableType::Algorithm => Some(DataProcessorType::Algorithm),
        SearchableType::Operation => Some(DataProcessorType::Operation),
        SearchableType::Visualisation => Some(DataProcessorType::Visualisation),
        SearchableType::DataProject | SearchableType::CodeProject => None,
    }
}
