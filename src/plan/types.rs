//! Typed plan tree built by the decode pass

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single configured attribute value of a resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    /// Kept as the document's number so large integers compare exactly
    Number(serde_json::Number),
    String(String),
    List(Vec<AttributeValue>),
    Map(BTreeMap<String, AttributeValue>),
}

impl AttributeValue {
    /// Short name of the value's shape, used in mismatch messages
    pub fn kind(&self) -> &'static str {
        match self {
            AttributeValue::Null => "null",
            AttributeValue::Bool(_) => "bool",
            AttributeValue::Number(_) => "number",
            AttributeValue::String(_) => "string",
            AttributeValue::List(_) => "list",
            AttributeValue::Map(_) => "map",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, AttributeValue>> {
        match self {
            AttributeValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Scalar text form used for equality and substring predicates.
    ///
    /// Lists and maps have no scalar form.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            AttributeValue::Null => Some(String::new()),
            AttributeValue::Bool(b) => Some(b.to_string()),
            AttributeValue::Number(n) => Some(format_number(n)),
            AttributeValue::String(s) => Some(s.clone()),
            AttributeValue::List(_) | AttributeValue::Map(_) => None,
        }
    }

    /// Whether the value counts as "present and non-empty"
    pub fn is_empty(&self) -> bool {
        match self {
            AttributeValue::Null => true,
            AttributeValue::Bool(_) | AttributeValue::Number(_) => false,
            AttributeValue::String(s) => s.trim().is_empty(),
            AttributeValue::List(items) => items.is_empty(),
            AttributeValue::Map(map) => map.is_empty(),
        }
    }
}

/// Integers print exactly; integral floats print without a fraction
fn format_number(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(s) => write!(f, "{s:?}"),
            AttributeValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            AttributeValue::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            other => match other.scalar_text() {
                Some(text) if !text.is_empty() => write!(f, "{text}"),
                _ => write!(f, "null"),
            },
        }
    }
}

/// One infrastructure object in a module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// Full address as reported by the provisioning tool, if any
    #[serde(default)]
    pub address: Option<String>,
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub values: BTreeMap<String, AttributeValue>,
}

impl ResourceRecord {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            address: None,
            resource_type: resource_type.into(),
            name: None,
            values: BTreeMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_value(mut self, key: impl Into<String>, value: AttributeValue) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Label used in diagnostics: the address when known, else `type.name`
    pub fn label(&self) -> String {
        if let Some(address) = &self.address {
            return address.clone();
        }
        match &self.name {
            Some(name) => format!("{}.{}", self.resource_type, name),
            None => self.resource_type.clone(),
        }
    }
}

/// A module in the plan tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanNode {
    pub address: String,
    #[serde(default)]
    pub resources: Vec<ResourceRecord>,
    #[serde(default)]
    pub child_modules: Vec<PlanNode>,
}

impl PlanNode {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            resources: Vec::new(),
            child_modules: Vec::new(),
        }
    }

    pub fn with_resource(mut self, resource: ResourceRecord) -> Self {
        self.resources.push(resource);
        self
    }

    pub fn with_child(mut self, child: PlanNode) -> Self {
        self.child_modules.push(child);
        self
    }
}

/// Whether the document described a proposed change or applied state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanSource {
    /// `planned_values.root_module` of a plan document
    Planned,
    /// `values.root_module` of a state document
    State,
    /// A bare module object
    Module,
}

/// A decoded plan: the root module plus where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct PlanTree {
    pub source: PlanSource,
    pub root: PlanNode,
}

impl PlanTree {
    pub fn new(root: PlanNode) -> Self {
        Self {
            source: PlanSource::Module,
            root,
        }
    }

    /// Top-level modules searched by module lookups
    pub fn modules(&self) -> &[PlanNode] {
        &self.root.child_modules
    }
}
