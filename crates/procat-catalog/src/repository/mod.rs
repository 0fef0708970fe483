//! Storage access for data processors
//!
//! The repository owns assembly of the full object graph: every read returns
//! a processor with its author, parameters and output files populated, and
//! every write covers the parent row and its children in one unit.
//!
//! Two implementations share the same contract:
//!
//! - [`PgProcessorRepository`]: PostgreSQL via SQLx
//! - [`MemoryProcessorRepository`]: in-process maps, for tests and embedding

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{DataProcessor, DataProcessorType};

pub mod memory;
pub mod postgres;

pub use memory::MemoryProcessorRepository;
pub use postgres::PgProcessorRepository;

/// Constraint names reported by both implementations
pub mod constraints {
    pub const PRIMARY_KEY: &str = "data_processors_pkey";
    pub const SLUG_UNIQUE: &str = "data_processors_slug_key";
    pub const AUTHOR_FK: &str = "data_processors_author_id_fkey";
    pub const CODE_PROJECT_FK: &str = "data_processors_code_project_id_fkey";
    pub const PARAMETER_PRIMARY_KEY: &str = "processor_parameters_pkey";
    pub const OUTPUT_FILE_PRIMARY_KEY: &str = "output_files_pkey";
}

#[async_trait]
pub trait ProcessorRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> CatalogResult<Option<DataProcessor>>;

    async fn find_by_slug(&self, slug: &str) -> CatalogResult<Option<DataProcessor>>;

    /// All processors of one variant, ordered by slug
    async fn find_by_type(
        &self,
        processor_type: DataProcessorType,
    ) -> CatalogResult<Vec<DataProcessor>>;

    /// Store a new processor with its children
    ///
    /// Returns the stored value carrying storage-assigned timestamps.
    async fn insert(&self, processor: &DataProcessor) -> CatalogResult<DataProcessor>;

    /// Replace a stored processor and its children
    ///
    /// Succeeds only if the stored version equals `processor.version()`;
    /// otherwise fails with `CatalogError::ConcurrentModification`. The
    /// returned value has the bumped version.
    async fn update(&self, processor: &DataProcessor) -> CatalogResult<DataProcessor>;

    /// Remove a processor together with all of its children
    async fn delete(&self, id: Uuid) -> CatalogResult<()>;
}
