use super::component_type::ComponentType;
use crate::shared::error::AibomError;
use indexmap::IndexSet;

/// User-facing aliases accepted by `--include`, besides raw type strings and labels
const ALIASES: &[(&str, ComponentType)] = &[
    ("ml model", ComponentType::MlModel),
    ("ml models", ComponentType::MlModel),
    ("machine learning model", ComponentType::MlModel),
    ("machine learning models", ComponentType::MlModel),
    ("model", ComponentType::MlModel),
    ("models", ComponentType::MlModel),
    ("dataset", ComponentType::Dataset),
    ("datasets", ComponentType::Dataset),
    ("libraries", ComponentType::Library),
    ("applications", ComponentType::Application),
    ("app", ComponentType::Application),
    ("apps", ComponentType::Application),
    ("agents", ComponentType::Agent),
    ("tools", ComponentType::Tool),
    ("services", ComponentType::Service),
    ("mcp client", ComponentType::McpClient),
    ("mcp clients", ComponentType::McpClient),
    ("mcp server", ComponentType::McpServer),
    ("mcp servers", ComponentType::McpServer),
    ("mcp resource", ComponentType::McpResource),
    ("mcp resources", ComponentType::McpResource),
];

/// Set of component types a report is restricted to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeFilter {
    types: IndexSet<ComponentType>,
}

impl TypeFilter {
    pub fn new(types: impl IntoIterator<Item = ComponentType>) -> Result<Self, AibomError> {
        let types: IndexSet<ComponentType> = types.into_iter().collect();
        if types.is_empty() {
            return Err(AibomError::InvalidFilter {
                value: String::new(),
                hint: "Specify at least one component type".to_string(),
            });
        }
        Ok(Self { types })
    }

    /// Parses a comma separated list such as `"ML Model, datasets,library"`.
    ///
    /// Any unknown entry fails the whole parse so that a typo never silently
    /// widens the report.
    pub fn parse(list: &str) -> Result<Self, AibomError> {
        Self::parse_entries(list.split(','))
    }

    /// Parses already split entries (config file lists, repeated flags)
    pub fn parse_entries<'a>(entries: impl IntoIterator<Item = &'a str>) -> Result<Self, AibomError> {
        let mut types = Vec::new();
        for entry in entries {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            types.push(parse_type(entry)?);
        }
        Self::new(types)
    }

    pub fn contains(&self, component_type: &ComponentType) -> bool {
        self.types.contains(component_type)
    }

    pub fn types(&self) -> impl Iterator<Item = &ComponentType> {
        self.types.iter()
    }
}

fn parse_type(entry: &str) -> Result<ComponentType, AibomError> {
    let folded = entry.to_lowercase();

    if let Some((_, component_type)) = ALIASES.iter().find(|(alias, _)| *alias == folded) {
        return Ok(component_type.clone());
    }

    ComponentType::KNOWN
        .iter()
        .find(|known| known.raw() == folded.replace('_', "-") || known.label().to_lowercase() == folded)
        .cloned()
        .ok_or_else(|| AibomError::InvalidFilter {
            value: entry.to_string(),
            hint: format!(
                "Valid types are: {}",
                ComponentType::KNOWN
                    .iter()
                    .map(ComponentType::label)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        })
}
