//! Single validating pass from a loosely typed JSON document to [`PlanTree`]

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use super::error::PlanDecodeError;
use super::types::{AttributeValue, PlanNode, PlanSource, PlanTree, ResourceRecord};

/// Read and decode a plan or state document from disk
pub fn load_plan(path: &Path) -> Result<PlanTree> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read plan file: {}", path.display()))?;
    let tree = decode_plan_str(&content)
        .with_context(|| format!("Failed to decode plan file: {}", path.display()))?;
    debug!(
        path = %path.display(),
        modules = tree.modules().len(),
        "decoded plan document"
    );
    Ok(tree)
}

/// Parse JSON text and decode it
pub fn decode_plan_str(content: &str) -> Result<PlanTree> {
    let value: Value = serde_json::from_str(content).context("Plan document is not valid JSON")?;
    Ok(decode_plan(&value)?)
}

/// Decode a parsed plan document.
///
/// Accepts `planned_values.root_module` (plan), `values.root_module` (state),
/// or a bare module object.
pub fn decode_plan(document: &Value) -> Result<PlanTree, PlanDecodeError> {
    let object = document.as_object().ok_or(PlanDecodeError::NotAnObject)?;

    if let Some(root) = nested_root(object, "planned_values")? {
        return Ok(PlanTree {
            source: PlanSource::Planned,
            root: decode_module(root, "planned_values.root_module")?,
        });
    }
    if let Some(root) = nested_root(object, "values")? {
        return Ok(PlanTree {
            source: PlanSource::State,
            root: decode_module(root, "values.root_module")?,
        });
    }
    if object.contains_key("resources") || object.contains_key("child_modules") {
        return Ok(PlanTree {
            source: PlanSource::Module,
            root: decode_module(document, "root")?,
        });
    }

    Err(PlanDecodeError::MissingRootModule)
}

fn nested_root<'a>(
    object: &'a Map<String, Value>,
    key: &str,
) -> Result<Option<&'a Value>, PlanDecodeError> {
    let Some(section) = object.get(key) else {
        return Ok(None);
    };
    let section = expect_object(section, key)?;
    Ok(section.get("root_module"))
}

fn decode_module(value: &Value, path: &str) -> Result<PlanNode, PlanDecodeError> {
    let object = expect_object(value, path)?;

    let address = match object.get("address") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => return Err(wrong_type(format!("{path}.address"), "string", other)),
    };

    let mut resources = Vec::new();
    for (i, item) in optional_array(object, "resources", path)?.iter().enumerate() {
        resources.push(decode_resource(item, &format!("{path}.resources[{i}]"))?);
    }

    let mut child_modules = Vec::new();
    for (i, item) in optional_array(object, "child_modules", path)?
        .iter()
        .enumerate()
    {
        child_modules.push(decode_module(item, &format!("{path}.child_modules[{i}]"))?);
    }

    Ok(PlanNode {
        address,
        resources,
        child_modules,
    })
}

fn decode_resource(value: &Value, path: &str) -> Result<ResourceRecord, PlanDecodeError> {
    let object = expect_object(value, path)?;

    let resource_type = match object.get("type") {
        Some(Value::String(s)) => s.clone(),
        None | Some(Value::Null) => {
            return Err(PlanDecodeError::MissingField {
                path: path.to_string(),
                field: "type",
            })
        }
        Some(other) => return Err(wrong_type(format!("{path}.type"), "string", other)),
    };

    let name = optional_string(object, "name", path)?;
    let address = optional_string(object, "address", path)?;

    let values = match object.get("values") {
        None | Some(Value::Null) => BTreeMap::new(),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(k, v)| (k.clone(), decode_value(v)))
            .collect(),
        Some(other) => return Err(wrong_type(format!("{path}.values"), "object", other)),
    };

    Ok(ResourceRecord {
        address,
        resource_type,
        name,
        values,
    })
}

/// Convert an arbitrary JSON value into an [`AttributeValue`]
pub fn decode_value(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null,
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::Number(n.clone()),
        Value::String(s) => AttributeValue::String(s.clone()),
        Value::Array(items) => AttributeValue::List(items.iter().map(decode_value).collect()),
        Value::Object(map) => AttributeValue::Map(
            map.iter()
                .map(|(k, v)| (k.clone(), decode_value(v)))
                .collect(),
        ),
    }
}

fn expect_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, PlanDecodeError> {
    value
        .as_object()
        .ok_or_else(|| wrong_type(path.to_string(), "object", value))
}

fn optional_array<'a>(
    object: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a [Value], PlanDecodeError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(Default::default()),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(wrong_type(format!("{path}.{key}"), "array", other)),
    }
}

fn optional_string(
    object: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<String>, PlanDecodeError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(wrong_type(format!("{path}.{key}"), "string", other)),
    }
}

fn wrong_type(path: String, expected: &'static str, found: &Value) -> PlanDecodeError {
    PlanDecodeError::WrongType {
        path,
        expected,
        found: json_kind(found),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
