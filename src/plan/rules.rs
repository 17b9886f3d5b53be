//! Declarative plan checks loaded from YAML
//!
//! Each [`PlanCheck`] names one expectation about a resource in a module and is
//! evaluated as a single named check, so one bad assertion fails exactly one
//! outcome.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use super::assert::{assert_attribute, Expectation};
use super::error::ValidationFailure;
use super::lookup::{find_module_unique, require_resource, ResourceQuery};
use super::types::PlanTree;
use crate::report::CheckVerdict;

/// Root of a plan check file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanCheckFile {
    #[serde(default)]
    pub checks: Vec<PlanCheck>,
}

/// One named expectation about a resource in a module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanCheck {
    pub name: String,
    /// Exact address of a top-level module, e.g. `module.ses`
    pub module: String,
    pub resource_type: String,
    #[serde(default)]
    pub name_contains: Option<String>,
    /// A missing resource is recorded as skipped rather than failed.
    /// Use for resources gated behind feature flags.
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub attributes: Vec<AttributeRule>,
}

impl PlanCheck {
    pub fn query(&self) -> ResourceQuery {
        let query = ResourceQuery::of_type(&self.resource_type);
        match &self.name_contains {
            Some(fragment) => query.name_contains(fragment),
            None => query,
        }
    }
}

/// Expectation on one attribute; exactly one predicate field must be set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeRule {
    /// Attribute key, dotted for nested values (`records.0`)
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matches: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_contains: Option<String>,
    #[serde(default)]
    pub non_empty: bool,
    #[serde(default)]
    pub is_list: bool,
    #[serde(default)]
    pub is_map: bool,
}

impl AttributeRule {
    /// Convert to an [`Expectation`], rejecting zero or several predicates
    pub fn expectation(&self) -> Result<Expectation, String> {
        let mut found = Vec::new();
        if let Some(s) = &self.equals {
            found.push(Expectation::Equals(s.clone()));
        }
        if let Some(s) = &self.contains {
            found.push(Expectation::Contains(s.clone()));
        }
        if let Some(pattern) = &self.matches {
            let expectation = Expectation::matches(pattern)
                .map_err(|e| format!("invalid pattern '{pattern}': {e}"))?;
            found.push(expectation);
        }
        if let Some(s) = &self.list_contains {
            found.push(Expectation::ListContains(s.clone()));
        }
        if self.non_empty {
            found.push(Expectation::NonEmpty);
        }
        if self.is_list {
            found.push(Expectation::IsList);
        }
        if self.is_map {
            found.push(Expectation::IsMap);
        }

        match found.len() {
            0 => Err(format!("attribute '{}' has no expectation", self.key)),
            1 => Ok(found.remove(0)),
            n => Err(format!(
                "attribute '{}' has {n} expectations, expected exactly one",
                self.key
            )),
        }
    }
}

/// A problem in a plan check file, found before any check runs
#[derive(Debug)]
pub struct RuleError {
    pub message: String,
    pub check: Option<String>,
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.check {
            write!(f, "Check '{}': {}", name, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for RuleError {}

/// Read and validate a plan check file
pub fn load_plan_checks(path: &Path) -> Result<PlanCheckFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read plan checks: {}", path.display()))?;
    let file: PlanCheckFile = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse plan checks: {}", path.display()))?;

    if let Err(errors) = validate_checks(&file.checks) {
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n  - ");
        anyhow::bail!("Invalid plan checks in {}:\n  - {joined}", path.display());
    }

    Ok(file)
}

/// Validate check definitions, collecting every problem
pub fn validate_checks(checks: &[PlanCheck]) -> Result<(), Vec<RuleError>> {
    let mut errors = Vec::new();

    for check in checks {
        if check.name.trim().is_empty() {
            errors.push(RuleError {
                message: "Check name cannot be empty".to_string(),
                check: None,
            });
            continue;
        }
        let name = Some(check.name.clone());

        if check.module.trim().is_empty() {
            errors.push(RuleError {
                message: "module cannot be empty".to_string(),
                check: name.clone(),
            });
        }

        if check.resource_type.trim().is_empty() {
            errors.push(RuleError {
                message: "resource_type cannot be empty".to_string(),
                check: name.clone(),
            });
        }

        for rule in &check.attributes {
            if rule.key.trim().is_empty() {
                errors.push(RuleError {
                    message: "attribute key cannot be empty".to_string(),
                    check: name.clone(),
                });
                continue;
            }
            if let Err(message) = rule.expectation() {
                errors.push(RuleError {
                    message,
                    check: name.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Evaluate one check against the tree.
///
/// A missing module always fails. A missing resource fails unless the check
/// is optional, in which case it is skipped.
pub fn evaluate_check(tree: &PlanTree, check: &PlanCheck) -> Result<CheckVerdict, ValidationFailure> {
    let module = find_module_unique(tree, &check.module)?;

    let record = match require_resource(module, &check.query()) {
        Ok(record) => record,
        Err(failure) if check.optional && failure.is_resource_not_found() => {
            return Ok(CheckVerdict::Skipped {
                reason: failure.to_string(),
            });
        }
        Err(failure) => return Err(failure),
    };

    for rule in &check.attributes {
        let expectation = rule.expectation().map_err(|message| {
            ValidationFailure::AttributeMismatch {
                resource: record.label(),
                key: rule.key.clone(),
                expected: "a valid expectation".to_string(),
                actual: message,
            }
        })?;
        assert_attribute(record, &rule.key, &expectation)?;
    }

    Ok(CheckVerdict::Passed)
}
