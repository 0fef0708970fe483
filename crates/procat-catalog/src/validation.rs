//! Shared validation utilities
//!
//! Every rule runs before storage is touched. Lengths are counted in
//! characters, not bytes, so multi-byte descriptions get the full allowance.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::models::{OutputFile, ProcessorParameter};

/// Maximum slug length, matches `data_processors.slug VARCHAR(255)`
pub const MAX_SLUG_LENGTH: usize = 255;

/// Maximum name length, matches `data_processors.name VARCHAR(255)`
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum parameter and output file name length, matches the child
/// tables' `name VARCHAR(255)`
pub const MAX_CHILD_NAME_LENGTH: usize = 255;

/// Maximum description length, matches `data_processors.description VARCHAR(1024)`
pub const MAX_DESCRIPTION_LENGTH: usize = 1024;

/// Validate a slug (URL-safe identifier)
///
/// # Rules
/// - Must not be empty or exceed `max_length` characters
/// - Only lowercase ASCII letters, digits, and hyphens
/// - Must not start or end with a hyphen
pub fn validate_slug(slug: &str, max_length: usize) -> Result<(), ValidationError> {
    if slug.is_empty() {
        return Err(ValidationError::SlugRequired);
    }

    if slug.chars().count() > max_length {
        return Err(ValidationError::SlugTooLong { max_length });
    }

    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ValidationError::SlugInvalidFormat);
    }

    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(ValidationError::SlugInvalidHyphenPlacement);
    }

    Ok(())
}

/// Validate a display name: non-blank and at most `max_length` characters
pub fn validate_name(name: &str, max_length: usize) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }

    if name.chars().count() > max_length {
        return Err(ValidationError::NameTooLong { max_length });
    }

    Ok(())
}

pub fn validate_command(command: &str) -> Result<(), ValidationError> {
    if command.trim().is_empty() {
        return Err(ValidationError::CommandRequired);
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    let length = description.chars().count();
    if length > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::DescriptionTooLong {
            length,
            max_length: MAX_DESCRIPTION_LENGTH,
        });
    }
    Ok(())
}

/// Parameter names must be non-blank and unique within one processor
///
/// Names are compared exactly; `lr` and `LR` are distinct parameters.
pub fn validate_parameters(parameters: &[ProcessorParameter]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(parameters.len());

    for (position, parameter) in parameters.iter().enumerate() {
        if parameter.name.trim().is_empty() {
            return Err(ValidationError::BlankParameterName { position });
        }
        if parameter.name.chars().count() > MAX_CHILD_NAME_LENGTH {
            return Err(ValidationError::ParameterNameTooLong {
                position,
                max_length: MAX_CHILD_NAME_LENGTH,
            });
        }
        if !seen.insert(parameter.name.as_str()) {
            return Err(ValidationError::DuplicateParameterName(parameter.name.clone()));
        }
    }

    Ok(())
}

pub fn validate_output_files(output_files: &[OutputFile]) -> Result<(), ValidationError> {
    for (position, file) in output_files.iter().enumerate() {
        if file.name.trim().is_empty() {
            return Err(ValidationError::BlankOutputFileName { position });
        }
        if file.name.chars().count() > MAX_CHILD_NAME_LENGTH {
            return Err(ValidationError::OutputFileNameTooLong {
                position,
                max_length: MAX_CHILD_NAME_LENGTH,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParameterType;

    #[test]
    fn test_valid_slugs() {
        for slug in ["resnet", "image-resize", "pca-2d", "a", "123"] {
            assert!(validate_slug(slug, MAX_SLUG_LENGTH).is_ok(), "'{}' should be valid", slug);
        }
    }

    #[test]
    fn test_invalid_slugs() {
        assert_eq!(validate_slug("", 10), Err(ValidationError::SlugRequired));
        assert_eq!(
            validate_slug("abcdefghijk", 10),
            Err(ValidationError::SlugTooLong { max_length: 10 })
        );
        for slug in ["Upper", "has space", "under_score", "dot.ted"] {
            assert_eq!(
                validate_slug(slug, MAX_SLUG_LENGTH),
                Err(ValidationError::SlugInvalidFormat),
                "'{}' should be rejected",
                slug
            );
        }
        assert_eq!(
            validate_slug("-leading", MAX_SLUG_LENGTH),
            Err(ValidationError::SlugInvalidHyphenPlacement)
        );
        assert_eq!(
            validate_slug("trailing-", MAX_SLUG_LENGTH),
            Err(ValidationError::SlugInvalidHyphenPlacement)
        );
    }

    #[test]
    fn test_name_rules() {
        assert!(validate_name("Image Resize", MAX_NAME_LENGTH).is_ok());
        assert_eq!(validate_name("   ", MAX_NAME_LENGTH), Err(ValidationError::NameRequired));
        assert_eq!(
            validate_name(&"n".repeat(256), MAX_NAME_LENGTH),
            Err(ValidationError::NameTooLong { max_length: 255 })
        );
    }

    #[test]
    fn test_command_rules() {
        assert!(validate_command("python train.py").is_ok());
        assert_eq!(validate_command(" \t"), Err(ValidationError::CommandRequired));
    }

    #[test]
    fn test_description_boundary() {
        assert!(validate_description("").is_ok());
        assert!(validate_description(&"d".repeat(1024)).is_ok());
        assert_eq!(
            validate_description(&"d".repeat(1025)),
            Err(ValidationError::DescriptionTooLong {
                length: 1025,
                max_length: 1024
            })
        );
    }

    #[test]
    fn test_description_counts_characters() {
        // 1024 two-byte characters is 2048 bytes but still within the limit
        assert!(validate_description(&"é".repeat(1024)).is_ok());
        assert!(validate_description(&"é".repeat(1025)).is_err());
    }

    #[test]
    fn test_duplicate_parameter_names() {
        let params = vec![
            ProcessorParameter::new("epochs", ParameterType::Integer),
            ProcessorParameter::new("lr", ParameterType::Float),
            ProcessorParameter::new("epochs", ParameterType::String),
        ];
        assert_eq!(
            validate_parameters(&params),
            Err(ValidationError::DuplicateParameterName("epochs".to_string()))
        );
    }

    #[test]
    fn test_parameter_names_are_case_sensitive() {
        let params = vec![
            ProcessorParameter::new("lr", ParameterType::Float),
            ProcessorParameter::new("LR", ParameterType::Float),
        ];
        assert!(validate_parameters(&params).is_ok());
    }

    #[test]
    fn test_blank_parameter_name() {
        let params = vec![
            ProcessorParameter::new("ok", ParameterType::Boolean),
            ProcessorParameter::new(" ", ParameterType::Boolean),
        ];
        assert_eq!(
            validate_parameters(&params),
            Err(ValidationError::BlankParameterName { position: 1 })
        );
    }

    #[test]
    fn test_blank_output_file_name() {
        let files = vec![OutputFile::new("model.pkl"), OutputFile::new("")];
        assert_eq!(
            validate_output_files(&files),
            Err(ValidationError::BlankOutputFileName { position: 1 })
        );
        assert!(validate_output_files(&files[..1]).is_ok());
    }

    #[test]
    fn test_parameter_name_length_boundary() {
        let at_limit = vec![ProcessorParameter::new("p".repeat(255), ParameterType::String)];
        assert!(validate_parameters(&at_limit).is_ok());

        let params = vec![
            ProcessorParameter::new("ok", ParameterType::String),
            ProcessorParameter::new("p".repeat(256), ParameterType::String),
        ];
        assert_eq!(
            validate_parameters(&params),
            Err(ValidationError::ParameterNameTooLong {
                position: 1,
                max_length: 255
            })
        );
    }

    #[test]
    fn test_output_file_name_length_boundary() {
        assert!(validate_output_files(&[OutputFile::new("f".repeat(255))]).is_ok());
        assert_eq!(
            validate_output_files(&[OutputFile::new("f".repeat(256))]),
            Err(ValidationError::OutputFileNameTooLong {
                position: 0,
                max_length: 255
            })
        );
    }

    #[test]
    fn test_child_name_length_counts_characters() {
        let params = vec![ProcessorParameter::new("é".repeat(255), ParameterType::String)];
        assert!(validate_parameters(&params).is_ok());
        assert!(validate_output_files(&[OutputFile::new("é".repeat(255))]).is_ok());
    }
}
