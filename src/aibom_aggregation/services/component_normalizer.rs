use crate::aibom_aggregation::domain::{ComponentRecord, ComponentType, Target};
use crate::shared::error::AibomError;
use serde_json::{Map, Value};

/// Name used when an entry carries neither a name nor an identifier
const UNKNOWN_COMPONENT_NAME: &str = "Unknown Component";

/// Keys promoted to dedicated record fields; everything else is passed through
const PROMOTED_KEYS: [&str; 5] = ["type", "name", "id", "identifier", "version"];

/// ComponentNormalizer - turns one raw AI-BOM document into typed records
///
/// Accepted document shapes, checked in order:
/// 1. JSON:API envelope: `{"data": {"attributes": {"components": [...]}}}`
/// 2. CycloneDX style: `{"components": [...]}`, each entry with a `type`
/// 3. Type-keyed lists: `{"models": [...], "datasets": [...], ...}`
pub struct ComponentNormalizer;

impl ComponentNormalizer {
    /// Normalizes a target's document into one record per leaf component
    ///
    /// # Errors
    /// Returns `MalformedAibom` naming the target and the first missing or
    /// mistyped structural field.
    pub fn normalize(target: &Target) -> Result<Vec<ComponentRecord>, AibomError> {
        let name = target.name();
        let root = target
            .raw_aibom()
            .as_object()
            .ok_or_else(|| AibomError::malformed(name, "<root>"))?;

        if let Some(data) = root.get("data") {
            let components = data
                .get("attributes")
                .and_then(|attributes| attributes.get("components"))
                .and_then(Value::as_array)
                .ok_or_else(|| AibomError::malformed(name, "data.attributes.components"))?;
            return Self::normalize_typed_entries(name, components, "data.attributes.components");
        }

        if let Some(components) = root.get("components") {
            let components = components
                .as_array()
                .ok_or_else(|| AibomError::malformed(name, "components"))?;
            return Self::normalize_typed_entries(name, components, "components");
        }

        Self::normalize_keyed_lists(name, root)
    }

    /// Entries that carry their own `type` field (envelope and CycloneDX shapes)
    fn normalize_typed_entries(
        target_name: &str,
        entries: &[Value],
        path: &str,
    ) -> Result<Vec<ComponentRecord>, AibomError> {
        let mut records = Vec::with_capacity(entries.len());

        for (i, entry) in entries.iter().enumerate() {
            let object = entry
                .as_object()
                .ok_or_else(|| AibomError::malformed(target_name, format!("{}[{}]", path, i)))?;
            let raw_type = object
                .get("type")
                .and_then(Value::as_str)
                .ok_or_else(|| AibomError::malformed(target_name, format!("{}[{}].type", path, i)))?;

            if is_root_component(object, raw_type) {
                continue;
            }

            records.push(Self::build_record(
                target_name,
                ComponentType::from_raw(raw_type),
                object,
                true,
            ));
        }

        Ok(records)
    }

    /// Per-type lists keyed by `models`, `datasets`, ...
    fn normalize_keyed_lists(
        target_name: &str,
        root: &Map<String, Value>,
    ) -> Result<Vec<ComponentRecord>, AibomError> {
        let mut records = Vec::new();
        let mut found_list = false;

        for (key, value) in root {
            let Some(component_type) = ComponentType::from_list_key(key) else {
                continue;
            };
            found_list = true;

            let entries = value
                .as_array()
                .ok_or_else(|| AibomError::malformed(target_name, key.as_str()))?;

            for (i, entry) in entries.iter().enumerate() {
                let object = entry
                    .as_object()
                    .ok_or_else(|| AibomError::malformed(target_name, format!("{}[{}]", key, i)))?;
                records.push(Self::build_record(
                    target_name,
                    component_type.clone(),
                    object,
                    false,
                ));
            }
        }

        if !found_list {
            return Err(AibomError::malformed(target_name, "components"));
        }

        Ok(records)
    }

    /// Builds a record from one entry object.
    ///
    /// In typed shapes the component name doubles as the model identifier
    /// when no explicit `id`/`identifier` is present.
    fn build_record(
        target_name: &str,
        component_type: ComponentType,
        object: &Map<String, Value>,
        name_is_identifier: bool,
    ) -> ComponentRecord {
        let explicit_id = first_string(object, &["id", "identifier"]);
        let entry_name = first_string(object, &["name"]);

        let identifier = match (explicit_id, entry_name) {
            (Some(id), _) => id,
            (None, Some(name)) if name_is_identifier => name,
            _ => "",
        };
        let name = entry_name
            .or(explicit_id)
            .unwrap_or(UNKNOWN_COMPONENT_NAME);
        let version = first_string(object, &["version"]).unwrap_or_default();

        let metadata: Map<String, Value> = object
            .iter()
            .filter(|(key, _)| !PROMOTED_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        ComponentRecord::new(target_name, component_type, name, identifier)
            .with_version(version)
            .with_locations(extract_locations(object))
            .with_metadata(metadata)
    }
}

/// The synthetic CycloneDX root describing the scanned repository itself
fn is_root_component(object: &Map<String, Value>, raw_type: &str) -> bool {
    raw_type == "application" && object.get("name").and_then(Value::as_str) == Some("Root")
}

/// First non-empty string value among `keys`
fn first_string<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| object.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|value| !value.is_empty())
}

/// Collects `location:line` strings from `evidence.occurrences`
fn extract_locations(object: &Map<String, Value>) -> Vec<String> {
    let Some(occurrences) = object
        .get("evidence")
        .and_then(|evidence| evidence.get("occurrences"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    occurrences
        .iter()
        .filter_map(|occurrence| {
            let location = occurrence.get("location").and_then(Value::as_str)?;
            if location.is_empty() {
                return None;
            }
            match occurrence.get("line") {
                Some(Value::Number(line)) => Some(format!("{}:{}", location, line)),
                Some(Value::String(line)) if !line.is_empty() => {
                    Some(format!("{}:{}", location, line))
                }
                _ => Some(location.to_string()),
            }
        })
        .collect()
}
