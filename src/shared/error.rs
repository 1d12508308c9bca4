use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - no policy violations, or violations were not asked to fail the run
    Success = 0,
    /// Forbidden models were found and `--fail-on-violation` was set
    PolicyViolationsDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (API error, network error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::PolicyViolationsDetected => write!(f, "Policy Violations Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for AI-BOM aggregation.
///
/// `MalformedAibom` is recovered per target by the aggregator; every other
/// variant aborts the run and is reported through `main`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AibomError {
    #[error("Malformed AI-BOM for target '{target}': missing or invalid field '{field}'")]
    MalformedAibom { target: String, field: String },

    #[error("Invalid policy file: {path}\nDetails: {details}\n\n💡 Hint: A policy file must look like:\n   reject:\n     - gpt-4\n     - llama-2-7b")]
    InvalidPolicy { path: PathBuf, details: String },

    #[error("Invalid component type filter: '{value}'\n\n💡 Hint: {hint}")]
    InvalidFilter { value: String, hint: String },

    #[error("Missing configuration: {name}\n\n💡 Hint: {hint}")]
    MissingConfiguration { name: String, hint: String },

    #[error("Snyk API request failed: {endpoint}\nDetails: {details}\n\n💡 Hint: Check your API token, organization/group ID and network connectivity")]
    ApiError { endpoint: String, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    /// Validation error for configuration values
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

impl AibomError {
    pub fn malformed(target: impl Into<String>, field: impl Into<String>) -> Self {
        AibomError::MalformedAibom {
            target: target.into(),
            field: field.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::PolicyViolationsDetected.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::PolicyViolationsDetected),
            "Policy Violations Detected (1)"
        );
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_malformed_aibom_names_target_and_field() {
        let error = AibomError::malformed("org/repo", "data.attributes.components");
        let display = error.to_string();
        assert!(display.contains("org/repo"));
        assert!(display.contains("data.attributes.components"));
    }

    #[test]
    fn test_invalid_policy_display() {
        let error = AibomError::InvalidPolicy {
            path: PathBuf::from("/test/policy.yml"),
            details: "missing field `reject`".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Invalid policy file"));
        assert!(display.contains("/test/policy.yml"));
        assert!(display.contains("missing field `reject`"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_invalid_filter_display() {
        let error = AibomError::InvalidFilter {
            value: "robots".to_string(),
            hint: "Valid types: ML Model, Dataset".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("'robots'"));
        assert!(display.contains("Valid types"));
    }

    #[test]
    fn test_api_error_display() {
        let error = AibomError::ApiError {
            endpoint: "/rest/orgs/abc/targets".to_string(),
            details: "401 Unauthorized".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("/rest/orgs/abc/targets"));
        assert!(display.contains("401 Unauthorized"));
    }

    #[test]
    fn test_security_error_display() {
        let error = AibomError::SecurityError {
            path: PathBuf::from("/test/symlink"),
            reason: "Symbolic links are not allowed".to_string(),
            hint: "Use a regular file instead".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Security violation"));
        assert!(display.contains("/test/symlink"));
        assert!(display.contains("Use a regular file instead"));
    }
}
