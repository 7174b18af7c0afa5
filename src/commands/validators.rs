//! Command argument validation utilities
//!
//! Validation rules applied after clap parsing and before any request is
//! made.

use anyhow::{Result, anyhow};

/// Validation errors for command arguments
#[derive(Debug, PartialEq)]
pub enum CommandValidationError {
    /// Mutually exclusive arguments were both provided
    MutualExclusivity { first: String, second: String },
    /// Required argument was not provided
    MissingRequired {
        argument: String,
        alternatives: Vec<String>,
    },
    /// Invalid argument value
    InvalidValue {
        argument: String,
        value: String,
        reason: String,
    },
    /// Empty collection when at least one item is required
    EmptyCollection { argument: String },
}

impl std::fmt::Display for CommandValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandValidationError::MutualExclusivity { first, second } => {
                write!(f, "Cannot specify both {} and {}", first, second)
            }
            CommandValidationError::MissingRequired {
                argument,
                alternatives,
            } => {
                if alternatives.is_empty() {
                    write!(f, "{} is required", argument)
                } else {
                    write!(
                        f,
                        "Either {} or {} must be provided",
                        alternatives.join(", "),
                        argument
                    )
                }
            }
            CommandValidationError::InvalidValue {
                argument,
                value,
                reason,
            } => {
                write!(f, "Invalid value '{}' for {}: {}", value, argument, reason)
            }
            CommandValidationError::EmptyCollection { argument } => {
                write!(f, "{} cannot be empty", argument)
            }
        }
    }
}

impl std::error::Error for CommandValidationError {}

/// Convert validation error to anyhow::Error
pub fn validation_error_to_anyhow(error: CommandValidationError) -> anyhow::Error {
    anyhow!(error.to_string())
}

/// A repository is given either as a URI or as owner/name, never both
pub fn validate_repository_args(
    uri: &Option<String>,
    owner: &Option<String>,
    name: &Option<String>,
) -> Result<()> {
    if uri.is_some() {
        let second = match (owner, name) {
            (Some(_), _) => "--owner",
            (None, Some(_)) => "--repo",
            (None, None) => return Ok(()),
        };
        return Err(validation_error_to_anyhow(
            CommandValidationError::MutualExclusivity {
                first: "--uri".to_string(),
                second: second.to_string(),
            },
        ));
    }
    Ok(())
}

/// Tag and branch address the same reference slot
pub fn validate_reference_args(tag: &Option<String>, branch: &Option<String>) -> Result<()> {
    match (tag, branch) {
        (Some(_), Some(_)) => Err(validation_error_to_anyhow(
            CommandValidationError::MutualExclusivity {
                first: "--tag".to_string(),
                second: "--branch".to_string(),
            },
        )),
        (None, None) => Err(validation_error_to_anyhow(
            CommandValidationError::MissingRequired {
                argument: "--branch".to_string(),
                alternatives: vec!["--tag".to_string()],
            },
        )),
        _ => Ok(()),
    }
}

/// Validate branch name
///
/// Ensures branch names follow basic Git naming conventions
pub fn validate_branch_name(branch: &Option<String>) -> Result<()> {
    if let Some(name) = branch {
        if name.trim().is_empty() {
            return Err(validation_error_to_anyhow(
                CommandValidationError::InvalidValue {
                    argument: "branch".to_string(),
                    value: name.clone(),
                    reason: "branch name cannot be empty or whitespace only".to_string(),
                },
            ));
        }

        if name.starts_with('-') || name.ends_with('.') || name.contains("..") {
            return Err(validation_error_to_anyhow(
                CommandValidationError::InvalidValue {
                    argument: "branch".to_string(),
                    value: name.clone(),
                    reason: "invalid Git branch name format".to_string(),
                },
            ));
        }
    }
    Ok(())
}

/// Validate a commit SHA (abbreviated or full)
pub fn validate_sha(sha: &str) -> Result<()> {
    let valid_length = (4..=40).contains(&sha.len());
    if !valid_length || !sha.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(validation_error_to_anyhow(
            CommandValidationError::InvalidValue {
                argument: "sha".to_string(),
                value: sha.to_string(),
                reason: "expected 4 to 40 hexadecimal characters".to_string(),
            },
        ));
    }
    Ok(())
}

/// At least one user or team must be named
pub fn validate_reviewers(users: &[String], teams: &[String]) -> Result<()> {
    if users.is_empty() && teams.is_empty() {
        return Err(validation_error_to_anyhow(
            CommandValidationError::EmptyCollection {
                argument: "reviewers (--user or --team)".to_string(),
            },
        ));
    }
    for reviewer in users.iter().chain(teams) {
        if reviewer.trim().is_empty() {
            return Err(validation_error_to_anyhow(
                CommandValidationError::InvalidValue {
                    argument: "reviewer".to_string(),
                    value: reviewer.clone(),
                    reason: "reviewer cannot be empty or whitespace only".to_string(),
                },
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn test_validate_repository_args() {
        assert!(validate_repository_args(&None, &None, &None).is_ok());
        assert!(validate_repository_args(&some("https://github.com/o/r"), &None, &None).is_ok());
        assert!(validate_repository_args(&None, &some("o"), &some("r")).is_ok());

        let result = validate_repository_args(&some("https://github.com/o/r"), &None, &some("r"));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Cannot specify both --uri and --repo")
        );
    }

    #[test]
    fn test_validate_reference_args() {
        assert!(validate_reference_args(&some("v1.0"), &None).is_ok());
        assert!(validate_reference_args(&None, &some("main")).is_ok());

        let both = validate_reference_args(&some("v1.0"), &some("main"));
        assert!(both.unwrap_err().to_string().contains("Cannot specify both"));

        let neither = validate_reference_args(&None, &None);
        assert!(neither.unwrap_err().to_string().contains("must be provided"));
    }

    #[test]
    fn test_validate_branch_name() {
        assert!(validate_branch_name(&some("feature/new-feature")).is_ok());
        assert!(validate_branch_name(&None).is_ok());
        for invalid in ["-invalid", "invalid.", "feature..invalid"] {
            let result = validate_branch_name(&some(invalid));
            assert!(
                result
                    .unwrap_err()
                    .to_string()
                    .contains("invalid Git branch name")
            );
        }
        assert!(validate_branch_name(&some("  ")).is_err());
    }

    #[test]
    fn test_validate_sha() {
        assert!(validate_sha("aa218f56b14c9653891f9e74264a383fa43fefbd").is_ok());
        assert!(validate_sha("aa21").is_ok());
        assert!(validate_sha("aa2").is_err());
        assert!(validate_sha("not-a-sha").is_err());
        assert!(validate_sha(&"a".repeat(41)).is_err());
    }

    #[test]
    fn test_validate_reviewers() {
        assert!(validate_reviewers(&["octocat".to_string()], &[]).is_ok());
        assert!(validate_reviewers(&[], &["justice-league".to_string()]).is_ok());

        let empty = validate_reviewers(&[], &[]);
        assert!(empty.unwrap_err().to_string().contains("cannot be empty"));

        assert!(validate_reviewers(&[" ".to_string()], &[]).is_err());
    }
}
