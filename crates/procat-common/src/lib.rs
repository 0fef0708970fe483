//! Procat Common Library
//!
//! Shared types and utilities for the processor catalog workspace.
//!
//! # Overview
//!
//! - **Types**: Collaborator types the catalog refers to but does not own
//!   (subjects, visibility scopes, marketplace searchable types)
//! - **Logging**: Centralized `tracing` subscriber setup
//!
//! # Example
//!
//! ```no_run
//! use procat_common::logging::{init_logging, LogConfig};
//! use procat_common::types::VisibilityScope;
//!
//! fn main() -> anyhow::Result<()> {
//!     init_logging(&LogConfig::from_env()?)?;
//!     tracing::info!(scope = %VisibilityScope::Public, "Catalog starting");
//!     Ok(())
//! }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod logging;
pub mod types;

// Re-export commonly used types
pub use types::{ParseEnumError, SearchableType, Subject, SubjectKind, VisibilityScope};
