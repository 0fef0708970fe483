//! End-to-end catalog behaviour through the command and query handlers
//!
//! Runs against the in-memory repository, so no database is needed.

use procat_catalog::features::processors::{commands, queries};
use procat_catalog::features::processors::{
    DeleteProcessorCommand, GetProcessorQuery, ListProcessorsBySearchableTypeQuery,
    UpdateProcessorParametersCommand,
};
use procat_catalog::models::{
    DataProcessorType, MetricSchema, MetricType, OutputFile, ParameterType, ProcessorParameter,
};
use procat_catalog::repository::constraints;
use procat_catalog::{CatalogError, MemoryProcessorRepository, PersistenceError, ValidationError};
use procat_common::{SearchableType, Subject};

mod helpers;

use helpers::{parameters, random_forest, ProcessorFixture};

#[tokio::test]
async fn test_publish_and_load_full_graph() -> anyhow::Result<()> {
    let repo = MemoryProcessorRepository::new();
    let author = Subject::person("ada", "Ada Lovelace");
    repo.register_subject(author.clone()).await;

    let mut command = random_forest();
    command.author = Some(author.clone());

    let created = commands::create::handle(&repo, command).await?;
    assert!(!created.chainable);

    let loaded = queries::get::handle(&repo, GetProcessorQuery::by_slug("random-forest"))
        .await?
        .processor;

    assert_eq!(loaded.id(), created.id);
    assert_eq!(loaded.author(), Some(&author));
    let names: Vec<&str> = loaded.parameters().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["n_estimators", "max_depth", "criterion"]);
    assert_eq!(loaded.output_files().len(), 1);
    assert_eq!(loaded.metric_schema().metric_type, MetricType::Precision);
    Ok(())
}

#[tokio::test]
async fn test_chainability_per_variant() -> anyhow::Result<()> {
    let repo = MemoryProcessorRepository::new();

    for fixture in [
        ProcessorFixture::algorithm("algo"),
        ProcessorFixture::operation("op"),
        ProcessorFixture::visualisation("vis"),
    ] {
        let command = fixture.build();
        let expected = command.processor_type != DataProcessorType::Algorithm;
        let created = commands::create::handle(&repo, command).await?;
        assert_eq!(created.chainable, expected);
    }
    Ok(())
}

#[tokio::test]
async fn test_description_boundary() {
    let repo = MemoryProcessorRepository::new();

    let ok = ProcessorFixture::operation("at-limit")
        .with_description("d".repeat(1024))
        .build();
    assert!(commands::create::handle(&repo, ok).await.is_ok());

    let too_long = ProcessorFixture::operation("over-limit")
        .with_description("d".repeat(1025))
        .build();
    let err = commands::create::handle(&repo, too_long).await.unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Validation(ValidationError::DescriptionTooLong { .. })
    ));
}

#[tokio::test]
async fn test_unknown_author_is_foreign_key_violation() {
    let repo = MemoryProcessorRepository::new();
    let command = ProcessorFixture::operation("orphan")
        .with_author(Subject::person("ghost", "Ghost"))
        .build();

    let err = commands::create::handle(&repo, command).await.unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Persistence(PersistenceError::ForeignKeyViolation { .. })
    ));
}

#[tokio::test]
async fn test_reparameterise_preserves_identity() -> anyhow::Result<()> {
    let repo = MemoryProcessorRepository::new();
    let created = commands::create::handle(&repo, random_forest()).await?;
    let before = queries::get::handle(&repo, GetProcessorQuery::by_id(created.id))
        .await?
        .processor;

    let response = commands::update_parameters::handle(
        &repo,
        UpdateProcessorParametersCommand {
            id: created.id,
            expected_version: created.version,
            parameters: parameters(&["alpha", "beta"]),
            metric_schema: MetricSchema::new(MetricType::Recall),
        },
    )
    .await?;
    assert_eq!(response.version, created.version + 1);

    let after = queries::get::handle(&repo, GetProcessorQuery::by_id(created.id))
        .await?
        .processor;

    assert_eq!(after.slug(), before.slug());
    assert_eq!(after.name(), before.name());
    assert_eq!(after.command(), before.command());
    assert_eq!(after.processor_type(), before.processor_type());
    assert_eq!(after.visibility_scope(), before.visibility_scope());
    assert_eq!(after.output_files(), before.output_files());
    assert_eq!(after.parameters().len(), 2);
    assert_eq!(after.metric_schema().metric_type, MetricType::Recall);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_edits_second_writer_loses() -> anyhow::Result<()> {
    let repo = MemoryProcessorRepository::new();
    let created = commands::create::handle(&repo, random_forest()).await?;

    let edit = |names: &[&str]| UpdateProcessorParametersCommand {
        id: created.id,
        expected_version: created.version,
        parameters: parameters(names),
        metric_schema: MetricSchema::default(),
    };

    commands::update_parameters::handle(&repo, edit(&["first"])).await?;
    let err = commands::update_parameters::handle(&repo, edit(&["second"]))
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::ConcurrentModification { .. }));
    assert!(!err.is_recoverable());

    let stored = queries::get::handle(&repo, GetProcessorQuery::by_id(created.id))
        .await?
        .processor;
    assert_eq!(stored.parameters()[0].name, "first");
    Ok(())
}

#[tokio::test]
async fn test_delete_leaves_no_orphans() -> anyhow::Result<()> {
    let repo = MemoryProcessorRepository::new();
    let kept = commands::create::handle(&repo, ProcessorFixture::visualisation("kept").build()).await?;
    let doomed = commands::create::handle(&repo, random_forest()).await?;

    commands::delete::handle(&repo, DeleteProcessorCommand { id: doomed.id }).await?;

    assert_eq!(repo.parameter_row_count().await, 0);
    assert_eq!(repo.output_file_row_count().await, 1);

    let err = queries::get::handle(&repo, GetProcessorQuery::by_id(doomed.id))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(queries::get::handle(&repo, GetProcessorQuery::by_id(kept.id))
        .await
        .is_ok());
    Ok(())
}

#[tokio::test]
async fn test_list_by_searchable_type() -> anyhow::Result<()> {
    let repo = MemoryProcessorRepository::new();
    commands::create::handle(&repo, ProcessorFixture::visualisation("scatter").build()).await?;
    commands::create::handle(&repo, ProcessorFixture::visualisation("bar").build()).await?;
    commands::create::handle(&repo, ProcessorFixture::operation("normalise").build()).await?;

    let repo = &repo;
    let list = move |searchable_type| {
        queries::list::handle(repo, ListProcessorsBySearchableTypeQuery { searchable_type })
    };

    let visualisations = list(SearchableType::Visualisation).await?;
    let slugs: Vec<&str> = visualisations.items.iter().map(|p| p.slug()).collect();
    assert_eq!(slugs, vec!["bar", "scatter"]);

    assert_eq!(list(SearchableType::Operation).await?.items.len(), 1);
    assert!(list(SearchableType::Algorithm).await?.items.is_empty());
    assert!(list(SearchableType::DataProject).await?.items.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_overlong_child_names_rejected_before_storage() {
    let repo = MemoryProcessorRepository::new();

    let long_parameter = ProcessorFixture::operation("long-param")
        .with_parameter(ProcessorParameter::new("p".repeat(300), ParameterType::String))
        .build();
    let err = commands::create::handle(&repo, long_parameter).await.unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Validation(ValidationError::ParameterNameTooLong { position: 0, .. })
    ));

    let long_file = ProcessorFixture::operation("long-file")
        .with_output_file(OutputFile::new("f".repeat(300)))
        .build();
    let err = commands::create::handle(&repo, long_file).await.unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Validation(ValidationError::OutputFileNameTooLong { position: 0, .. })
    ));

    assert_eq!(repo.parameter_row_count().await, 0);
    assert_eq!(repo.output_file_row_count().await, 0);
}

#[tokio::test]
async fn test_parameters_cannot_be_shared_between_processors() -> anyhow::Result<()> {
    let repo = MemoryProcessorRepository::new();
    let owner = commands::create::handle(&repo, random_forest()).await?;
    let other = commands::create::handle(&repo, ProcessorFixture::operation("other").build()).await?;

    let borrowed = queries::get::handle(&repo, GetProcessorQuery::by_id(owner.id))
        .await?
        .processor
        .parameters()
        .to_vec();

    let err = commands::update_parameters::handle(
        &repo,
        UpdateProcessorParametersCommand {
            id: other.id,
            expected_version: other.version,
            parameters: borrowed,
            metric_schema: MetricSchema::default(),
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        CatalogError::Persistence(PersistenceError::UniqueViolation { ref constraint })
            if constraint == constraints::PARAMETER_PRIMARY_KEY
    ));
    assert_eq!(repo.parameter_row_count().await, 3);
    Ok(())
}
