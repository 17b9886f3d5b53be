//! Module and resource lookups over a decoded plan tree

use std::fmt;

use super::error::ValidationFailure;
use super::types::{PlanNode, PlanTree, ResourceRecord};

/// Find the first top-level module whose address equals `address` exactly.
///
/// Only the root's direct child modules are searched.
pub fn find_module<'a>(tree: &'a PlanTree, address: &str) -> Option<&'a PlanNode> {
    tree.modules().iter().find(|m| m.address == address)
}

/// Like [`find_module`] but reports a missing or duplicated address
pub fn find_module_unique<'a>(
    tree: &'a PlanTree,
    address: &str,
) -> Result<&'a PlanNode, ValidationFailure> {
    let mut matches = tree.modules().iter().filter(|m| m.address == address);
    let first = matches
        .next()
        .ok_or_else(|| ValidationFailure::StructuralMismatch {
            address: address.to_string(),
        })?;
    let extra = matches.count();
    if extra > 0 {
        return Err(ValidationFailure::AmbiguousModule {
            address: address.to_string(),
            count: extra + 1,
        });
    }
    Ok(first)
}

/// Predicate over resources: exact type, optionally a name substring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceQuery {
    pub resource_type: String,
    pub name_contains: Option<String>,
}

impl ResourceQuery {
    pub fn of_type(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            name_contains: None,
        }
    }

    pub fn name_contains(mut self, fragment: impl Into<String>) -> Self {
        self.name_contains = Some(fragment.into());
        self
    }

    pub fn matches(&self, record: &ResourceRecord) -> bool {
        if record.resource_type != self.resource_type {
            return false;
        }
        match &self.name_contains {
            None => true,
            Some(fragment) => record
                .name
                .as_deref()
                .is_some_and(|name| name.contains(fragment.as_str())),
        }
    }
}

impl fmt::Display for ResourceQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type == '{}'", self.resource_type)?;
        if let Some(fragment) = &self.name_contains {
            write!(f, " and name contains '{fragment}'")?;
        }
        Ok(())
    }
}

/// First resource, in listed order, satisfying `predicate`
pub fn find_resource<'a, P>(module: &'a PlanNode, predicate: P) -> Option<&'a ResourceRecord>
where
    P: Fn(&ResourceRecord) -> bool,
{
    module.resources.iter().find(|r| predicate(r))
}

/// All resources satisfying `predicate`, in listed order
pub fn find_resources<'a, P>(module: &'a PlanNode, predicate: P) -> Vec<&'a ResourceRecord>
where
    P: Fn(&ResourceRecord) -> bool,
{
    module.resources.iter().filter(|r| predicate(r)).collect()
}

/// First resource matching `query`, or [`ValidationFailure::ResourceNotFound`]
pub fn require_resource<'a>(
    module: &'a PlanNode,
    query: &ResourceQuery,
) -> Result<&'a ResourceRecord, ValidationFailure> {
    find_resource(module, |r| query.matches(r)).ok_or_else(|| {
        ValidationFailure::ResourceNotFound {
            module: module.address.clone(),
            query: query.to_string(),
        }
    })
}
