//! Configuration for aibom-tools.
//!
//! Provides YAML-based configuration through `aibom-tools.config.yml` files
//! and the resolved API credentials threaded through the shell.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::adapters::outbound::network::{ApiScope, DEFAULT_API_URL};
use crate::aibom_aggregation::domain::TypeFilter;
use crate::aibom_aggregation::services::GroupBy;
use crate::shared::error::AibomError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "aibom-tools.config.yml";

/// Accepted range for parallel AI-BOM fetches
pub const MIN_CONCURRENCY: usize = 1;
pub const MAX_CONCURRENCY: usize = 16;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub org_id: Option<String>,
    pub group_id: Option<String>,
    pub api_url: Option<String>,
    pub include: Option<Vec<String>>,
    pub group_by: Option<String>,
    pub policy: Option<PathBuf>,
    pub concurrency: Option<usize>,
    pub fail_on_violation: Option<bool>,
    pub fail_on_empty: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// `include` entries as a type filter, if the file sets one
    pub fn type_filter(&self) -> Result<Option<TypeFilter>> {
        match &self.include {
            Some(entries) => Ok(Some(TypeFilter::parse_entries(
                entries.iter().map(String::as_str),
            )?)),
            None => Ok(None),
        }
    }

    pub fn group_by(&self) -> Result<Option<GroupBy>> {
        match &self.group_by {
            Some(value) => {
                let group_by = value
                    .parse::<GroupBy>()
                    .map_err(|message| AibomError::Validation { message })?;
                Ok(Some(group_by))
            }
            None => Ok(None),
        }
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Checks that `concurrency` lies within the accepted range
pub fn validate_concurrency(concurrency: usize) -> Result<usize> {
    if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&concurrency) {
        bail!(AibomError::Validation {
            message: format!(
                "concurrency must be between {} and {}, got {}",
                MIN_CONCURRENCY, MAX_CONCURRENCY, concurrency
            ),
        });
    }
    Ok(concurrency)
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    config
        .group_by()
        .context("Invalid config: group_by")?;
    if let Some(concurrency) = config.concurrency {
        validate_concurrency(concurrency).context("Invalid config: concurrency")?;
    }
    config.type_filter().context("Invalid config: include")?;
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Resolved Snyk API settings
///
/// Flags and environment variables are merged by clap before this point;
/// values from the config file only fill the gaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_token: Option<String>,
    pub org_id: Option<String>,
    pub group_id: Option<String>,
    pub api_url: String,
    pub debug: bool,
}

impl ApiConfig {
    pub fn resolve(
        api_token: Option<String>,
        org_id: Option<String>,
        group_id: Option<String>,
        api_url: Option<String>,
        debug: bool,
        file: &ConfigFile,
    ) -> Self {
        Self {
            api_token: non_empty(api_token),
            org_id: non_empty(org_id).or_else(|| non_empty(file.org_id.clone())),
            group_id: non_empty(group_id).or_else(|| non_empty(file.group_id.clone())),
            api_url: non_empty(api_url)
                .or_else(|| non_empty(file.api_url.clone()))
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            debug,
        }
    }

    pub fn api_token(&self) -> Result<&str> {
        self.api_token.as_deref().ok_or_else(|| {
            AibomError::MissingConfiguration {
                name: "SNYK_API_TOKEN".to_string(),
                hint: "Pass --api-token, set SNYK_API_TOKEN, or add it to a .env file. \
                       Use --input to re-aggregate a saved report without the API."
                    .to_string(),
            }
            .into()
        })
    }

    /// A group ID takes precedence over an organization ID
    pub fn scope(&self) -> Result<ApiScope> {
        if let Some(group_id) = &self.group_id {
            return Ok(ApiScope::Group(group_id.clone()));
        }
        if let Some(org_id) = &self.org_id {
            return Ok(ApiScope::Organization(org_id.clone()));
        }
        Err(AibomError::MissingConfiguration {
            name: "SNYK_ORG_ID or SNYK_GROUP_ID".to_string(),
            hint: "Pass --org-id or --group-id, or set SNYK_ORG_ID / SNYK_GROUP_ID".to_string(),
        }
        .into())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
