use serde::{Serialize, Serializer};
use std::fmt;

/// Category of an AI-BOM entry
///
/// The ten known categories map one-to-one onto the type strings emitted by
/// the AI-BOM API. Anything else is kept as [`ComponentType::Other`] with the
/// original string so that no entry is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentType {
    MlModel,
    Dataset,
    Library,
    Application,
    Agent,
    Tool,
    Service,
    McpClient,
    McpServer,
    McpResource,
    Other(String),
}

impl ComponentType {
    /// Every known variant, in display order
    pub const KNOWN: [ComponentType; 10] = [
        ComponentType::MlModel,
        ComponentType::Dataset,
        ComponentType::Library,
        ComponentType::Application,
        ComponentType::Agent,
        ComponentType::Tool,
        ComponentType::Service,
        ComponentType::McpClient,
        ComponentType::McpServer,
        ComponentType::McpResource,
    ];

    /// Maps a raw AI-BOM `type` string to a component type.
    ///
    /// Matching is case-insensitive and tolerates `_` in place of `-`.
    pub fn from_raw(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase().replace('_', "-");
        Self::KNOWN
            .iter()
            .find(|known| known.raw() == normalized)
            .cloned()
            .unwrap_or_else(|| ComponentType::Other(raw.trim().to_string()))
    }

    /// Maps a key of the type-keyed document shape (`models`, `datasets`, ...)
    pub fn from_list_key(key: &str) -> Option<Self> {
        Self::KNOWN
            .iter()
            .find(|known| known.list_key() == Some(key))
            .cloned()
    }

    /// Type string as emitted by the AI-BOM API
    pub fn raw(&self) -> &str {
        match self {
            ComponentType::MlModel => "machine-learning-model",
            ComponentType::Dataset => "data",
            ComponentType::Library => "library",
            ComponentType::Application => "application",
            ComponentType::Agent => "agent",
            ComponentType::Tool => "tool",
            ComponentType::Service => "service",
            ComponentType::McpClient => "mcp-client",
            ComponentType::McpServer => "mcp-server",
            ComponentType::McpResource => "mcp-resource",
            ComponentType::Other(raw) => raw,
        }
    }

    /// Key of the per-type list in the type-keyed document shape
    pub fn list_key(&self) -> Option<&'static str> {
        match self {
            ComponentType::MlModel => Some("models"),
            ComponentType::Dataset => Some("datasets"),
            ComponentType::Library => Some("libraries"),
            ComponentType::Application => Some("applications"),
            ComponentType::Agent => Some("agents"),
            ComponentType::Tool => Some("tools"),
            ComponentType::Service => Some("services"),
            ComponentType::McpClient => Some("mcp_clients"),
            ComponentType::McpServer => Some("mcp_servers"),
            ComponentType::McpResource => Some("mcp_resources"),
            ComponentType::Other(_) => None,
        }
    }

    /// Human readable label, also used as the by-component group key
    ///
    /// An unrecognized type whose title-cased form reads like a known label
    /// keeps its original spelling instead.
    pub fn label(&self) -> String {
        match self {
            ComponentType::MlModel => "ML Model".to_string(),
            ComponentType::Dataset => "Dataset".to_string(),
            ComponentType::Library => "Library".to_string(),
            ComponentType::Application => "Application".to_string(),
            ComponentType::Agent => "Agent".to_string(),
            ComponentType::Tool => "Tool".to_string(),
            ComponentType::Service => "Service".to_string(),
            ComponentType::McpClient => "MCP Client".to_string(),
            ComponentType::McpServer => "MCP Server".to_string(),
            ComponentType::McpResource => "MCP Resource".to_string(),
            ComponentType::Other(raw) => {
                let title = title_case(raw);
                let shadows_known = Self::KNOWN
                    .iter()
                    .any(|known| known.label().to_lowercase() == title.to_lowercase());
                if shadows_known {
                    format!("{} (unrecognized)", raw)
                } else {
                    title
                }
            }
        }
    }

    /// Plural label with an icon, used in type breakdowns
    pub fn breakdown_label(&self) -> String {
        match self {
            ComponentType::MlModel => "🧠 ML Models".to_string(),
            ComponentType::Dataset => "📊 Datasets".to_string(),
            ComponentType::Library => "📚 Libraries".to_string(),
            ComponentType::Application => "🔧 Applications".to_string(),
            ComponentType::Agent => "🤖 Agents".to_string(),
            ComponentType::Tool => "🛠️ Tools".to_string(),
            ComponentType::Service => "🌐 Services".to_string(),
            ComponentType::McpClient => "🔌 MCP Clients".to_string(),
            ComponentType::McpServer => "🖥️ MCP Servers".to_string(),
            ComponentType::McpResource => "📦 MCP Resources".to_string(),
            ComponentType::Other(_) => format!("🔧 {}", self.label()),
        }
    }

    pub fn is_model(&self) -> bool {
        matches!(self, ComponentType::MlModel)
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for ComponentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

/// Upper-cases the first letter of every alphanumeric run ("foo-bar" -> "Foo-Bar")
fn title_case(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut at_word_start = true;
    for c in raw.chars() {
        if c.is_alphanumeric() {
            if at_word_start {
                result.extend(c.to_uppercase());
            } else {
                result.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            result.push(c);
            at_word_start = true;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_known_types() {
        assert_eq!(
            ComponentType::from_raw("machine-learning-model"),
            ComponentType::MlModel
        );
        assert_eq!(ComponentType::from_raw("data"), ComponentType::Dataset);
        assert_eq!(ComponentType::from_raw("mcp-server"), ComponentType::McpServer);
        assert_eq!(ComponentType::from_raw("MCP_CLIENT"), ComponentType::McpClient);
    }

    #[test]
    fn test_from_raw_unknown_type_is_preserved() {
        let other = ComponentType::from_raw("prompt-template");
        assert_eq!(other, ComponentType::Other("prompt-template".to_string()));
        assert_eq!(other.raw(), "prompt-template");
        assert_eq!(other.label(), "Prompt-Template");
    }

    #[test]
    fn test_unknown_type_label_never_shadows_known_label() {
        let lookalike = ComponentType::from_raw("dataset");
        assert_eq!(lookalike, ComponentType::Other("dataset".to_string()));
        assert_eq!(lookalike.label(), "dataset (unrecognized)");
        assert_ne!(lookalike.label(), ComponentType::Dataset.label());
        assert_eq!(lookalike.breakdown_label(), "🔧 dataset (unrecognized)");
        assert_eq!(
            ComponentType::from_raw("Mcp Server").label(),
            "Mcp Server (unrecognized)"
        );
    }

    #[test]
    fn test_raw_round_trips_for_known_types() {
        for known in ComponentType::KNOWN.iter() {
            assert_eq!(&ComponentType::from_raw(known.raw()), known);
        }
    }

    #[test]
    fn test_from_list_key() {
        assert_eq!(
            ComponentType::from_list_key("models"),
            Some(ComponentType::MlModel)
        );
        assert_eq!(
            ComponentType::from_list_key("mcp_resources"),
            Some(ComponentType::McpResource)
        );
        assert_eq!(ComponentType::from_list_key("name"), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(ComponentType::MlModel.label(), "ML Model");
        assert_eq!(ComponentType::McpResource.to_string(), "MCP Resource");
        assert_eq!(ComponentType::Dataset.breakdown_label(), "📊 Datasets");
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&ComponentType::MlModel).unwrap();
        assert_eq!(json, "\"ML Model\"");
    }

    #[test]
    fn test_is_model() {
        assert!(ComponentType::MlModel.is_model());
        assert!(!ComponentType::Dataset.is_model());
        assert!(!ComponentType::Other("model".to_string()).is_model());
    }
}
