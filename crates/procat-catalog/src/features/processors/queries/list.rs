//! List processors for a marketplace search category

use mediator::Request;
use procat_common::SearchableType;
use serde::{Deserialize, Serialize};

use crate::converter::convert;
use crate::cqrs::middleware::Query;
use crate::error::CatalogResult;
use crate::models::DataProcessor;
use crate::repository::ProcessorRepository;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListProcessorsBySearchableTypeQuery {
    pub searchable_type: SearchableType,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListProcessorsBySearchableTypeResponse {
    pub searchable_type: SearchableType,
    pub items: Vec<DataProcessor>,
}

impl Request<CatalogResult<ListProcessorsBySearchableTypeResponse>>
    for ListProcessorsBySearchableTypeQuery
{
}

impl Query for ListProcessorsBySearchableTypeQuery {
    const NAME: &'static str = "list_processors_by_searchable_type";
}

/// Project categories have no processors and yield an empty list without
/// touching storage.
#[tracing::instrument(
    skip(repo, query),
    fields(
        operation = ListProcessorsBySearchableTypeQuery::NAME,
        searchable_type = %query.searchable_type
    )
)]
pub async fn handle(
    repo: &dyn ProcessorRepository,
    query: ListProcessorsBySearchableTypeQuery,
) -> CatalogResult<ListProcessorsBySearchableTypeResponse> {
    let items = match convert(query.searchable_type) {
        Some(processor_type) => repo.find_by_type(processor_type).await?,
        None => Vec::new(),
    };

    tracing::debug!(count = items.len(), "Processors listed");

    Ok(ListProcessorsBySearchableTypeResponse {
        searchable_type: query.searchable_type,
        items,
    })
}
