use serde::Serialize;
use serde_json::Value;

/// Integration types whose targets are source repositories and can be scanned
pub const SUPPORTED_INTEGRATIONS: [&str; 9] = [
    "github",
    "github-enterprise",
    "github-cloud-app",
    "github-server-app",
    "gitlab",
    "azure-repos",
    "bitbucket-cloud",
    "bitbucket-server",
    "bitbucket-cloud-app",
];

/// Target value object: one scanned repository and its raw AI-BOM document
///
/// The document is kept untyped; it only becomes typed data inside the
/// normalizer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Target {
    name: String,
    raw_aibom: Value,
}

impl Target {
    pub fn new(name: impl Into<String>, raw_aibom: Value) -> Self {
        Self {
            name: name.into(),
            raw_aibom,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn raw_aibom(&self) -> &Value {
        &self.raw_aibom
    }
}

/// A target as listed by an AI-BOM source, before its document is fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDescriptor {
    /// Source specific identifier (API target ID, or index for saved files)
    pub id: String,
    /// Display name, e.g. `org/repo`
    pub name: String,
    /// Organization owning the target
    pub org_id: String,
    /// Integration the target was imported through. `None` when the source
    /// does not know it (saved exports), which is treated as scannable.
    pub integration_type: Option<String>,
}

impl TargetDescriptor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        org_id: impl Into<String>,
        integration_type: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            org_id: org_id.into(),
            integration_type,
        }
    }

    /// Container images, CLI uploads and the like carry no AI-BOM
    pub fn is_supported(&self) -> bool {
        match &self.integration_type {
            Some(integration) => SUPPORTED_INTEGRATIONS.contains(&integration.as_str()),
            None => true,
        }
    }
}
