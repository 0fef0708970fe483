//! Procat catalog library
//!
//! Storage and lookup of data processors for the analytics marketplace.
//!
//! # Overview
//!
//! A data processor is a runnable transformation published to the catalog.
//! It comes in three variants:
//!
//! - **Algorithm**: trains or fits a model, not chainable
//! - **Operation**: transforms data, chainable
//! - **Visualisation**: renders data, chainable
//!
//! Each processor owns an ordered list of parameters, a list of output files
//! and a metric schema, and may reference an author and a code project.
//!
//! # Architecture
//!
//! Writes and reads are split into commands and queries under
//! [`features::processors`], dispatched through [`cqrs::build_mediator`].
//! Handlers talk to storage only through [`repository::ProcessorRepository`],
//! which has a PostgreSQL implementation and an in-memory one.
//!
//! Updates use optimistic locking on the `version` column: a stale write
//! fails with [`CatalogError::ConcurrentModification`] and leaves storage
//! untouched.
//!
//! # Example
//!
//! ```no_run
//! use procat_catalog::{config::Config, cqrs, db};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let pool = db::create_pool(&config.database).await?;
//!     db::run_migrations(&pool).await?;
//!     let _mediator = cqrs::build_mediator(pool);
//!     Ok(())
//! }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod converter;
pub mod cqrs;
pub mod db;
pub mod error;
pub mod features;
pub mod models;
pub mod repository;
pub mod validation;

pub use error::{CatalogError, CatalogResult, PersistenceError, ValidationError};
pub use models::{DataProcessor, DataProcessorType, NewDataProcessor};
pub use repository::{MemoryProcessorRepository, PgProcessorRepository, ProcessorRepository};
