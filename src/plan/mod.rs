//! Plan tree validation
//!
//! A deployment plan arrives as loosely typed JSON. It is decoded once into a
//! typed tree of modules and resources, and every lookup and assertion works on
//! that tree:
//!
//! - [`find_module`] locates a top-level module by exact address
//! - [`find_resource`] returns the first resource satisfying a predicate
//! - [`assert_attribute`] checks an attribute against an [`Expectation`]
//!
//! A missing module is a wiring problem and reported as
//! [`ValidationFailure::StructuralMismatch`]. A missing resource may be expected
//! when a feature is disabled, so callers decide whether
//! [`ValidationFailure::ResourceNotFound`] is fatal.

mod assert;
mod decode;
mod error;
mod lookup;
pub mod rules;
mod types;


pub use assert::{assert_attribute, assert_name, assert_text, assert_type, lookup_path, Expectation};
pub use decode::{decode_plan, decode_plan_str, decode_value, load_plan};
pub use error::{PlanDecodeError, ValidationFailure};
pub use lookup::{
    find_module, find_module_unique, find_resource, find_resources, require_resource,
    ResourceQuery,
};
pub use rules::{evaluate_check, load_plan_checks, validate_checks, AttributeRule, PlanCheck, PlanCheckFile};
pub use types::{AttributeValue, PlanNode, PlanSource, PlanTree, ResourceRecord};
