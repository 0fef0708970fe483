//! Collaborator types shared across the catalog
//!
//! These belong to neighbouring domains (marketplace search, access control,
//! accounts). The catalog only stores and passes them around.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Returned when a stored or user-supplied name does not match any variant
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid {kind}: '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

// ============================================================================
// Visibility
// ============================================================================

/// Access-control gate attached to catalog entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisibilityScope {
    Public,
    #[default]
    Private,
    Internal,
}

impl VisibilityScope {
    pub const ALL: [VisibilityScope; 3] = [Self::Public, Self::Private, Self::Internal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "PUBLIC",
            Self::Private => "PRIVATE",
            Self::Internal => "INTERNAL",
        }
    }
}

impl std::fmt::Display for VisibilityScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VisibilityScope {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PUBLIC" => Ok(Self::Public),
            "PRIVATE" => Ok(Self::Private),
            "INTERNAL" => Ok(Self::Internal),
            _ => Err(ParseEnumError::new("visibility scope", s)),
        }
    }
}

// ============================================================================
// Marketplace search
// ============================================================================

/// Entry kinds known to the marketplace search index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchableType {
    DataProject,
    CodeProject,
    Algorithm,
    Operation,
    Visualisation,
}

impl SearchableType {
    pub const ALL: [SearchableType; 5] = [
        Self::DataProject,
        Self::CodeProject,
        Self::Algorithm,
        Self::Operation,
        Self::Visualisation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DataProject => "DATA_PROJECT",
            Self::CodeProject => "CODE_PROJECT",
            Self::Algorithm => "ALGORITHM",
            Self::Operation => "OPERATION",
            Self::Visualisation => "VISUALISATION",
        }
    }
}

impl std::fmt::Display for SearchableType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SearchableType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DATA_PROJECT" => Ok(Self::DataProject),
            "CODE_PROJECT" => Ok(Self::CodeProject),
            "ALGORITHM" => Ok(Self::Algorithm),
            "OPERATION" => Ok(Self::Operation),
            "VISUALISATION" => Ok(Self::Visualisation),
            _ => Err(ParseEnumError::new("searchable type", s)),
        }
    }
}

// ============================================================================
// Subjects
// ============================================================================

/// Kind of principal behind a subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubjectKind {
    Person,
    Group,
}

impl SubjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Group => "GROUP",
        }
    }
}

impl std::fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SubjectKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PERSON" => Ok(Self::Person),
            "GROUP" => Ok(Self::Group),
            _ => Err(ParseEnumError::new("subject kind", s)),
        }
    }
}

/// A user or group that can author catalog entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub kind: SubjectKind,
}

impl Subject {
    pub fn person(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            slug: slug.into(),
            name: name.into(),
            kind: SubjectKind::Person,
        }
    }
}
