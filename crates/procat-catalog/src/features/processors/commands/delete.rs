use mediator::Request;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cqrs::middleware::Command;
use crate::error::CatalogResult;
use crate::repository::ProcessorRepository;

/// Remove a processor; its parameters and output files go with it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteProcessorCommand {
    pub id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteProcessorResponse {
    pub id: Uuid,
    pub deleted: bool,
}

impl Request<CatalogResult<DeleteProcessorResponse>> for DeleteProcessorCommand {}

impl Command for DeleteProcessorCommand {
    const NAME: &'static str = "delete_processor";
}

#[tracing::instrument(skip(repo, command), fields(operation = DeleteProcessorCommand::NAME, id = %command.id))]
pub async fn handle(
    repo: &dyn ProcessorRepository,
    command: DeleteProcessorCommand,
) -> CatalogResult<DeleteProcessorResponse> {
    repo.delete(command.id).await?;

    tracing::info!("Processor deleted");

    Ok(DeleteProcessorResponse {
        id: command.id,
        deleted: true,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::models::{DataProcessor, DataProcessorType, NewDataProcessor, OutputFile};
    use crate::repository::MemoryProcessorRepository;

    #[tokio::test]
    async fn test_handle_deletes_processor_and_children() {
        let repo = MemoryProcessorRepository::new();
        let processor = DataProcessor::new(NewDataProcessor {
            output_files: vec![OutputFile::new("chart.png")],
            ..NewDataProcessor::new(DataProcessorType::Visualisation, "chart", "Chart", "chart.py")
        })
        .unwrap();
        repo.insert(&processor).await.unwrap();

        let response = handle(&repo, DeleteProcessorCommand { id: processor.id() })
            .await
            .unwrap();

        assert!(response.deleted);
        assert!(repo.find_by_id(processor.id()).await.unwrap().is_none());
        assert_eq!(repo.output_file_row_count().await, 0);
    }

    #[tokio::test]
    async fn test_handle_not_found() {
        let repo = MemoryProcessorRepository::new();
        let err = handle(&repo, DeleteProcessorCommand { id: Uuid::new_v4() })
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
