//! PostgreSQL processor repository
//!
//! Parent and children are always written in one transaction. Children are
//! replaced wholesale on update and removed by `ON DELETE CASCADE` on delete.
//! Enumerations are stored as TEXT and parsed back on load; an unknown value
//! surfaces as `PersistenceError::CorruptRow`.

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use procat_common::{ParseEnumError, Subject};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::ProcessorRepository;
use crate::error::{CatalogError, CatalogResult, PersistenceError};
use crate::models::{
    AuditInfo, DataProcessor, DataProcessorType, MetricSchema, OutputFile, ProcessorParameter,
};

const SELECT_PROCESSOR: &str = r#"
    SELECT dp.id, dp.version, dp.created_at, dp.updated_at,
           dp.slug, dp.name, dp.command,
           dp.input_data_type, dp.output_data_type, dp.processor_type,
           dp.visibility_scope, dp.description, dp.code_project_id,
           s.id AS author_id, s.slug AS author_slug, s.name AS author_name,
           s.kind AS author_kind,
           dp.metric_schema_type, dp.metric_schema_ground_truth,
           dp.metric_schema_prediction, dp.metric_schema_json_blob
    FROM data_processors dp
    LEFT JOIN subjects s ON s.id = dp.author_id
"#;

#[derive(Debug, FromRow)]
struct ProcessorRow {
    id: Uuid,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    slug: String,
    name: String,
    command: String,
    input_data_type: String,
    output_data_type: String,
    processor_type: String,
    visibility_scope: String,
    description: String,
    code_project_id: Option<Uuid>,
    author_id: Option<Uuid>,
    author_slug: Option<String>,
    author_name: Option<String>,
    author_kind: Option<String>,
    metric_schema_type: String,
    metric_schema_ground_truth: String,
    metric_schema_prediction: String,
    metric_schema_json_blob: String,
}

#[derive(Debug, FromRow)]
struct ParameterRow {
    id: Uuid,
    data_processor_id: Uuid,
    name: String,
    parameter_type: String,
    required: bool,
    default_value: String,
    description: String,
    parameter_group: String,
}

#[derive(Debug, FromRow)]
struct OutputFileRow {
    id: Uuid,
    data_processor_id: Uuid,
    name: String,
    path: String,
    data_type: String,
}

fn parse<T>(value: &str) -> Result<T, PersistenceError>
where
    T: FromStr<Err = ParseEnumError>,
{
    value.parse().map_err(PersistenceError::CorruptRow)
}

impl ParameterRow {
    fn into_model(self) -> Result<ProcessorParameter, PersistenceError> {
        Ok(ProcessorParameter {
            id: self.id,
            name: self.name,
            parameter_type: parse(&self.parameter_type)?,
            required: self.required,
            default_value: self.default_value,
            description: self.description,
            group: self.parameter_group,
        })
    }
}

impl OutputFileRow {
    fn into_model(self) -> Result<OutputFile, PersistenceError> {
        Ok(OutputFile {
            id: self.id,
            name: self.name,
            path: self.path,
            data_type: parse(&self.data_type)?,
        })
    }
}

impl ProcessorRow {
    fn into_model(
        self,
        parameters: Vec<ProcessorParameter>,
        output_files: Vec<OutputFile>,
    ) -> Result<DataProcessor, PersistenceError> {
        let author = match (self.author_id, self.author_slug, self.author_name, self.author_kind) {
            (Some(id), Some(slug), Some(name), Some(kind)) => Some(Subject {
                id,
                slug,
                name,
                kind: parse(&kind)?,
            }),
            _ => None,
        };

        Ok(DataProcessor {
            audit: AuditInfo {
                id: self.id,
                version: self.version,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            slug: self.slug,
            name: self.name,
            command: self.command,
            input_data_type: parse(&self.input_data_type)?,
            output_data_type: parse(&self.output_data_type)?,
            processor_type: parse(&self.processor_type)?,
            visibility_scope: parse(&self.visibility_scope)?,
            description: self.description,
            code_project_id: self.code_project_id,
            author,
            parameters,
            output_files,
            metric_schema: MetricSchema {
                metric_type: parse(&self.metric_schema_type)?,
                ground_truth: self.metric_schema_ground_truth,
                prediction: self.metric_schema_prediction,
                json_blob: self.metric_schema_json_blob,
            },
        })
    }
}

#[derive(Debug, Clone)]
pub struct PgProcessorRepository {
    pool: PgPool,
}

impl PgProcessorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Load children for a set of parents and attach them in stored order
    async fn assemble(&self, rows: Vec<ProcessorRow>) -> CatalogResult<Vec<DataProcessor>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();

        let parameter_rows = sqlx::query_as::<_, ParameterRow>(
            r#"
            SELECT id, data_processor_id, name, parameter_type, required,
                   default_value, description, parameter_group
            FROM processor_parameters
            WHERE data_processor_id = ANY($1)
            ORDER BY data_processor_id, position
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let output_file_rows = sqlx::query_as::<_, OutputFileRow>(
            r#"
            SELECT id, data_processor_id, name, path, data_type
            FROM output_files
            WHERE data_processor_id = ANY($1)
            ORDER BY data_processor_id, position
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut parameters: HashMap<Uuid, Vec<ProcessorParameter>> = HashMap::new();
        for row in parameter_rows {
            let owner = row.data_processor_id;
            parameters.entry(owner).or_default().push(row.into_model()?);
        }

        let mut output_files: HashMap<Uuid, Vec<OutputFile>> = HashMap::new();
        for row in output_file_rows {
            let owner = row.data_processor_id;
            output_files.entry(owner).or_default().push(row.into_model()?);
        }

        rows.into_iter()
            .map(|row| {
                let id = row.id;
                row.into_model(
                    parameters.remove(&id).unwrap_or_default(),
                    output_files.remove(&id).unwrap_or_default(),
                )
                .map_err(CatalogError::from)
            })
            .collect()
    }

    async fn find_one(&self, row: Option<ProcessorRow>) -> CatalogResult<Option<DataProcessor>> {
        match row {
            Some(row) => Ok(self.assemble(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }
}

async fn insert_children(
    tx: &mut Transaction<'_, Postgres>,
    processor: &DataProcessor,
) -> Result<(), sqlx::Error> {
    for (position, parameter) in processor.parameters().iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO processor_parameters
                (id, data_processor_id, position, name, parameter_type, required,
                 default_value, description, parameter_group)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(parameter.id)
        .bind(processor.id())
        .bind(position as i32)
        .bind(&parameter.name)
        .bind(parameter.parameter_type.as_str())
        .bind(parameter.required)
        .bind(&parameter.default_value)
        .bind(&parameter.description)
        .bind(&parameter.group)
        .execute(&mut **tx)
        .await?;
    }

    for (position, file) in processor.output_files().iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO output_files (id, data_processor_id, position, name, path, data_type)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(file.id)
        .bind(processor.id())
        .bind(position as i32)
        .bind(&file.name)
        .bind(&file.path)
        .bind(file.data_type.as_str())
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

#[async_trait]
impl ProcessorRepository for PgProcessorRepository {
    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> CatalogResult<Option<DataProcessor>> {
        let row = sqlx::query_as::<_, ProcessorRow>(&format!("{SELECT_PROCESSOR} WHERE dp.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        self.find_one(row).await
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_slug(&self, slug: &str) -> CatalogResult<Option<DataProcessor>> {
        let row =
            sqlx::query_as::<_, ProcessorRow>(&format!("{SELECT_PROCESSOR} WHERE dp.slug = $1"))
                .bind(slug)
                .fetch_optional(&self.pool)
                .await?;
        self.find_one(row).await
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_type(
        &self,
        processor_type: DataProcessorType,
    ) -> CatalogResult<Vec<DataProcessor>> {
        let rows = sqlx::query_as::<_, ProcessorRow>(&format!(
            "{SELECT_PROCESSOR} WHERE dp.processor_type = $1 ORDER BY dp.slug"
        ))
        .bind(processor_type.as_str())
        .fetch_all(&self.pool)
        .await?;
        self.assemble(rows).await
    }

    #[tracing::instrument(skip(self, processor), fields(id = %processor.id(), slug = %processor.slug()))]
    async fn insert(&self, processor: &DataProcessor) -> CatalogResult<DataProcessor> {
        let mut tx = self.pool.begin().await?;
        let schema = processor.metric_schema();

        let created_at: DateTime<Utc> = sqlx::query_scalar(
            r#"
            INSERT INTO data_processors
                (id, version, slug, name, command, input_data_type, output_data_type,
                 processor_type, visibility_scope, description, code_project_id, author_id,
                 metric_schema_type, metric_schema_ground_truth, metric_schema_prediction,
                 metric_schema_json_blob)
            VALUES ($1, 0, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING created_at
            "#,
        )
        .bind(processor.id())
        .bind(processor.slug())
        .bind(processor.name())
        .bind(processor.command())
        .bind(processor.input_data_type().as_str())
        .bind(processor.output_data_type().as_str())
        .bind(processor.processor_type().as_str())
        .bind(processor.visibility_scope().as_str())
        .bind(processor.description())
        .bind(processor.code_project_id())
        .bind(processor.author().map(|author| author.id))
        .bind(schema.metric_type.as_str())
        .bind(&schema.ground_truth)
        .bind(&schema.prediction)
        .bind(&schema.json_blob)
        .fetch_one(&mut *tx)
        .await?;

        insert_children(&mut tx, processor).await?;
        tx.commit().await?;

        tracing::info!(processor_type = %processor.processor_type(), "Processor inserted");

        Ok(processor.clone().stored_as(AuditInfo {
            id: processor.id(),
            version: 0,
            created_at,
            updated_at: None,
        }))
    }

    #[tracing::instrument(skip(self, processor), fields(id = %processor.id(), version = processor.version()))]
    async fn update(&self, processor: &DataProcessor) -> CatalogResult<DataProcessor> {
        let mut tx = self.pool.begin().await?;
        let schema = processor.metric_schema();
        let id = processor.id();

        // processor_type is never rewritten: the discriminator is fixed at insert
        let bumped: Option<(i64, DateTime<Utc>, DateTime<Utc>)> = sqlx::query_as(
            r#"
            UPDATE data_processors
            SET slug = $3, name = $4, command = $5,
                input_data_type = $6, output_data_type = $7,
                visibility_scope = $8, description = $9,
                code_project_id = $10, author_id = $11,
                metric_schema_type = $12, metric_schema_ground_truth = $13,
                metric_schema_prediction = $14, metric_schema_json_blob = $15,
                version = version + 1, updated_at = NOW()
            WHERE id = $1 AND version = $2
            RETURNING version, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(processor.version())
        .bind(processor.slug())
        .bind(processor.name())
        .bind(processor.command())
        .bind(processor.input_data_type().as_str())
        .bind(processor.output_data_type().as_str())
        .bind(processor.visibility_scope().as_str())
        .bind(processor.description())
        .bind(processor.code_project_id())
        .bind(processor.author().map(|author| author.id))
        .bind(schema.metric_type.as_str())
        .bind(&schema.ground_truth)
        .bind(&schema.prediction)
        .bind(&schema.json_blob)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((version, created_at, updated_at)) = bumped else {
            let stored: Option<i64> =
                sqlx::query_scalar("SELECT version FROM data_processors WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&mut *tx)
                    .await?;
            tx.rollback().await?;

            return Err(match stored {
                Some(actual_version) => {
                    tracing::warn!(stored_version = actual_version, "Stale processor update rejected");
                    CatalogError::ConcurrentModification {
                        id,
                        expected_version: processor.version(),
                        actual_version,
                    }
                },
                None => CatalogError::not_found("Data processor", id.to_string()),
            });
        };

        sqlx::query("DELETE FROM processor_parameters WHERE data_processor_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM output_files WHERE data_processor_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        insert_children(&mut tx, processor).await?;
        tx.commit().await?;

        tracing::info!(new_version = version, "Processor updated");

        Ok(processor.clone().stored_as(AuditInfo {
            id,
            version,
            created_at,
            updated_at: Some(updated_at),
        }))
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> CatalogResult<()> {
        let result = sqlx::query("DELETE FROM data_processors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::not_found("Data processor", id.to_string()));
        }

        tracing::info!("Processor deleted");
        Ok(())
    }
}
