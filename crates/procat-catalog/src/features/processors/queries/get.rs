use mediator::Request;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cqrs::middleware::Query;
use crate::error::{CatalogError, CatalogResult, ValidationError};
use crate::models::DataProcessor;
use crate::repository::ProcessorRepository;

/// Look up one processor by id or by slug
///
/// When both keys are given the id wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetProcessorQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetProcessorResponse {
    pub processor: DataProcessor,
}

impl Request<CatalogResult<GetProcessorResponse>> for GetProcessorQuery {}

impl Query for GetProcessorQuery {
    const NAME: &'static str = "get_processor";
}

impl GetProcessorQuery {
    pub fn by_id(id: Uuid) -> Self {
        Self {
            id: Some(id),
            slug: None,
        }
    }

    pub fn by_slug(slug: impl Into<String>) -> Self {
        Self {
            id: None,
            slug: Some(slug.into()),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match (&self.id, &self.slug) {
            (Some(_), _) => Ok(()),
            (None, Some(slug)) if !slug.trim().is_empty() => Ok(()),
            _ => Err(ValidationError::LookupKeyRequired),
        }
    }
}

#[tracing::instrument(skip(repo, query), fields(operation = GetProcessorQuery::NAME))]
pub async fn handle(
    repo: &dyn ProcessorRepository,
    query: GetProcessorQuery,
) -> CatalogResult<GetProcessorResponse> {
    query.validate()?;

    let (found, key) = match (query.id, query.slug) {
        (Some(id), _) => (repo.find_by_id(id).await?, id.to_string()),
        (None, Some(slug)) => (repo.find_by_slug(&slug).await?, slug),
        (None, None) => return Err(ValidationError::LookupKeyRequired.into()),
    };

    let processor = found.ok_or_else(|| CatalogError::not_found("Data processor", key))?;
    tracing::debug!(processor_id = %processor.id(), "Processor loaded");

    Ok(GetProcessorResponse { processor })
}
