//! Error taxonomy for plan decoding and validation

use thiserror::Error;

/// The plan document does not have the expected shape
#[derive(Debug, Error, PartialEq)]
pub enum PlanDecodeError {
    #[error("plan document is not a JSON object")]
    NotAnObject,

    #[error("plan document has no root module (expected planned_values.root_module, values.root_module or a module object)")]
    MissingRootModule,

    #[error("{path}: expected {expected}, found {found}")]
    WrongType {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{path}: missing required field '{field}'")]
    MissingField { path: String, field: &'static str },
}

/// A validation assertion that did not hold
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationFailure {
    /// The expected module is absent from the plan tree
    #[error("module '{address}' not found in plan")]
    StructuralMismatch { address: String },

    /// More than one top-level module carries the same address
    #[error("module address '{address}' is ambiguous ({count} modules share it)")]
    AmbiguousModule { address: String, count: usize },

    /// No resource in the module satisfied the query
    #[error("no resource matching {query} in module '{module}'")]
    ResourceNotFound { module: String, query: String },

    /// A resource field or attribute failed its expectation
    #[error("{resource}: attribute '{key}' expected {expected}, got {actual}")]
    AttributeMismatch {
        resource: String,
        key: String,
        expected: String,
        actual: String,
    },
}

impl ValidationFailure {
    /// Whether the failure may be legitimate when a feature is disabled
    pub fn is_resource_not_found(&self) -> bool {
        matches!(self, ValidationFailure::ResourceNotFound { .. })
    }
}
