//! In-memory processor repository
//!
//! Mirrors the relational layout: parent rows, parameter rows and output
//! file rows are kept in separate maps keyed by the owning processor, so
//! cascade and orphan behaviour can be observed the same way as in
//! PostgreSQL. Authors and code projects must be registered before they can
//! be referenced.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use procat_common::Subject;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{constraints, ProcessorRepository};
use crate::error::{CatalogError, CatalogResult, PersistenceError};
use crate::models::{AuditInfo, DataProcessor, DataProcessorType, OutputFile, ProcessorParameter};

#[derive(Debug, Default)]
struct Tables {
    /// Parent rows, stored with empty child lists
    processors: HashMap<Uuid, DataProcessor>,
    parameters: HashMap<Uuid, Vec<ProcessorParameter>>,
    output_files: HashMap<Uuid, Vec<OutputFile>>,
    subjects: HashMap<Uuid, Subject>,
    code_projects: HashSet<Uuid>,
}

impl Tables {
    fn check_references(&self, processor: &DataProcessor) -> Result<(), PersistenceError> {
        if let Some(author) = processor.author() {
            if !self.subjects.contains_key(&author.id) {
                return Err(PersistenceError::ForeignKeyViolation {
                    constraint: constraints::AUTHOR_FK.to_string(),
                });
            }
        }
        if let Some(code_project_id) = processor.code_project_id() {
            if !self.code_projects.contains(&code_project_id) {
                return Err(PersistenceError::ForeignKeyViolation {
                    constraint: constraints::CODE_PROJECT_FK.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Child ids are primary keys: unique within the list and not owned by
    /// another processor
    fn check_child_ids(&self, processor: &DataProcessor) -> Result<(), PersistenceError> {
        let owner = processor.id();

        let parameter_ids = processor.parameters().iter().map(|parameter| parameter.id);
        if has_foreign_or_repeated_id(parameter_ids, owner, &self.parameters, |row| row.id) {
            return Err(PersistenceError::UniqueViolation {
                constraint: constraints::PARAMETER_PRIMARY_KEY.to_string(),
            });
        }

        let file_ids = processor.output_files().iter().map(|file| file.id);
        if has_foreign_or_repeated_id(file_ids, owner, &self.output_files, |row| row.id) {
            return Err(PersistenceError::UniqueViolation {
                constraint: constraints::OUTPUT_FILE_PRIMARY_KEY.to_string(),
            });
        }

        Ok(())
    }

    fn slug_taken_by_other(&self, slug: &str, id: Uuid) -> bool {
        self.processors
            .values()
            .any(|stored| stored.slug() == slug && stored.id() != id)
    }

    /// Split a processor into its parent row and child rows
    fn store_rows(&mut self, mut processor: DataProcessor) {
        let id = processor.id();
        self.parameters
            .insert(id, std::mem::take(&mut processor.parameters));
        self.output_files
            .insert(id, std::mem::take(&mut processor.output_files));
        self.processors.insert(id, processor);
    }

    /// Reassemble the full graph, resolving the author eagerly
    fn assemble(&self, id: Uuid) -> Option<DataProcessor> {
        let mut processor = self.processors.get(&id)?.clone();
        processor.parameters = self.parameters.get(&id).cloned().unwrap_or_default();
        processor.output_files = self.output_files.get(&id).cloned().unwrap_or_default();
        processor.author = processor
            .author
            .as_ref()
            .and_then(|author| self.subjects.get(&author.id).cloned());
        Some(processor)
    }
}

fn has_foreign_or_repeated_id<T>(
    mut ids: impl Iterator<Item = Uuid>,
    owner: Uuid,
    rows: &HashMap<Uuid, Vec<T>>,
    row_id: impl Fn(&T) -> Uuid,
) -> bool {
    let mut seen = HashSet::new();
    ids.any(|id| {
        !seen.insert(id)
            || rows
                .iter()
                .filter(|(other, _)| **other != owner)
                .any(|(_, children)| children.iter().any(|row| row_id(row) == id))
    })
}

#[derive(Debug, Default)]
pub struct MemoryProcessorRepository {
    tables: RwLock<Tables>,
}

impl MemoryProcessorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a subject available as an author
    pub async fn register_subject(&self, subject: Subject) {
        self.tables.write().await.subjects.insert(subject.id, subject);
    }

    /// Make a code project id available as an owner reference
    pub async fn register_code_project(&self, id: Uuid) {
        self.tables.write().await.code_projects.insert(id);
    }

    /// Number of stored parameter rows across all processors
    pub async fn parameter_row_count(&self) -> usize {
        self.tables.read().await.parameters.values().map(Vec::len).sum()
    }

    /// Number of stored output file rows across all processors
    pub async fn output_file_row_count(&self) -> usize {
        self.tables.read().await.output_files.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl ProcessorRepository for MemoryProcessorRepository {
    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> CatalogResult<Option<DataProcessor>> {
        Ok(self.tables.read().await.assemble(id))
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_slug(&self, slug: &str) -> CatalogResult<Option<DataProcessor>> {
        let tables = self.tables.read().await;
        let id = tables
            .processors
            .values()
            .find(|stored| stored.slug() == slug)
            .map(DataProcessor::id);
        Ok(id.and_then(|id| tables.assemble(id)))
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_type(
        &self,
        processor_type: DataProcessorType,
    ) -> CatalogResult<Vec<DataProcessor>> {
        let tables = self.tables.read().await;
        let mut found: Vec<DataProcessor> = tables
            .processors
            .values()
            .filter(|stored| stored.processor_type() == processor_type)
            .filter_map(|stored| tables.assemble(stored.id()))
            .collect();
        found.sort_by(|a, b| a.slug().cmp(b.slug()));
        Ok(found)
    }

    #[tracing::instrument(skip(self, processor), fields(id = %processor.id(), slug = %processor.slug()))]
    async fn insert(&self, processor: &DataProcessor) -> CatalogResult<DataProcessor> {
        let mut tables = self.tables.write().await;

        if tables.processors.contains_key(&processor.id()) {
            return Err(PersistenceError::UniqueViolation {
                constraint: constraints::PRIMARY_KEY.to_string(),
            }
            .into());
        }
        if tables.slug_taken_by_other(processor.slug(), processor.id()) {
            return Err(PersistenceError::UniqueViolation {
                constraint: constraints::SLUG_UNIQUE.to_string(),
            }
            .into());
        }
        tables.check_references(processor)?;
        tables.check_child_ids(processor)?;

        let stored = processor.clone().stored_as(AuditInfo {
            id: processor.id(),
            version: 0,
            created_at: Utc::now(),
            updated_at: None,
        });
        tables.store_rows(stored.clone());

        tracing::debug!("Processor inserted");
        Ok(stored)
    }

    #[tracing::instrument(skip(self, processor), fields(id = %processor.id(), version = processor.version()))]
    async fn update(&self, processor: &DataProcessor) -> CatalogResult<DataProcessor> {
        let mut tables = self.tables.write().await;
        let id = processor.id();

        let current = tables
            .processors
            .get(&id)
            .map(|stored| stored.audit().clone())
            .ok_or_else(|| CatalogError::not_found("Data processor", id.to_string()))?;

        if current.version != processor.version() {
            tracing::warn!(stored_version = current.version, "Stale processor update rejected");
            return Err(CatalogError::ConcurrentModification {
                id,
                expected_version: processor.version(),
                actual_version: current.version,
            });
        }
        if tables.slug_taken_by_other(processor.slug(), id) {
            return Err(PersistenceError::UniqueViolation {
                constraint: constraints::SLUG_UNIQUE.to_string(),
            }
            .into());
        }
        tables.check_references(processor)?;
        tables.check_child_ids(processor)?;

        let stored = processor.clone().stored_as(AuditInfo {
            id,
            version: current.version + 1,
            created_at: current.created_at,
            updated_at: Some(Utc::now()),
        });
        tables.store_rows(stored.clone());

        tracing::debug!(new_version = stored.version(), "Processor updated");
        Ok(stored)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> CatalogResult<()> {
        let mut tables = self.tables.write().await;

        if tables.processors.remove(&id).is_none() {
            return Err(CatalogError::not_found("Data processor", id.to_string()));
        }
        tables.parameters.remove(&id);
        tables.output_files.remove(&id);

        tracing::debug!("Processor deleted with its children");
        Ok(())
    }
}
