//! Attribute expectations and assertions on resource records

use regex::Regex;
use std::fmt;

use super::error::ValidationFailure;
use super::types::{AttributeValue, ResourceRecord};

/// Predicate applied to a single attribute value
#[derive(Debug, Clone)]
pub enum Expectation {
    /// Scalar text equals the given string exactly
    Equals(String),
    /// Scalar text contains the given substring
    Contains(String),
    /// Value is present and not empty (blank strings count as empty)
    NonEmpty,
    /// Scalar text matches the regular expression
    Matches(Regex),
    /// Value is a list with at least one element containing the substring
    ListContains(String),
    IsList,
    IsMap,
}

impl Expectation {
    /// Build a regex expectation, rejecting invalid patterns
    pub fn matches(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Expectation::Matches)
    }

    /// Evaluate against a value, returning a rendering of the actual value on mismatch
    pub fn check(&self, value: &AttributeValue) -> Result<(), String> {
        let holds = match self {
            Expectation::Equals(expected) => {
                scalar_or_shape(value)?.as_str() == expected.as_str()
            }
            Expectation::Contains(fragment) => scalar_or_shape(value)?.contains(fragment.as_str()),
            Expectation::Matches(re) => re.is_match(&scalar_or_shape(value)?),
            Expectation::NonEmpty => !value.is_empty(),
            Expectation::ListContains(fragment) => {
                let items = value
                    .as_list()
                    .ok_or_else(|| format!("{} {value}", value.kind()))?;
                items.iter().any(|item| {
                    item.scalar_text()
                        .is_some_and(|text| text.contains(fragment.as_str()))
                })
            }
            Expectation::IsList => value.as_list().is_some(),
            Expectation::IsMap => value.as_map().is_some(),
        };

        if holds {
            Ok(())
        } else {
            Err(describe_actual(value))
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Equals(s) => write!(f, "equal to {s:?}"),
            Expectation::Contains(s) => write!(f, "to contain {s:?}"),
            Expectation::NonEmpty => write!(f, "a non-empty value"),
            Expectation::Matches(re) => write!(f, "to match /{}/", re.as_str()),
            Expectation::ListContains(s) => write!(f, "a list with an element containing {s:?}"),
            Expectation::IsList => write!(f, "a list"),
            Expectation::IsMap => write!(f, "a map"),
        }
    }
}

fn scalar_or_shape(value: &AttributeValue) -> Result<String, String> {
    value
        .scalar_text()
        .ok_or_else(|| format!("{} {value}", value.kind()))
}

fn describe_actual(value: &AttributeValue) -> String {
    match value {
        AttributeValue::String(_) => value.to_string(),
        AttributeValue::Null => "null".to_string(),
        other => format!("{} {other}", other.kind()),
    }
}

/// Resolve a dotted attribute path such as `records.0` or `tags.Name`
pub fn lookup_path<'a>(record: &'a ResourceRecord, path: &str) -> Option<&'a AttributeValue> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = record.values.get(first)?;
    for segment in segments {
        current = match current {
            AttributeValue::Map(map) => map.get(segment)?,
            AttributeValue::List(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Assert that the attribute at `key` exists and satisfies `expectation`
pub fn assert_attribute(
    record: &ResourceRecord,
    key: &str,
    expectation: &Expectation,
) -> Result<(), ValidationFailure> {
    let value = lookup_path(record, key).ok_or_else(|| ValidationFailure::AttributeMismatch {
        resource: record.label(),
        key: key.to_string(),
        expected: expectation.to_string(),
        actual: "<missing>".to_string(),
    })?;

    expectation
        .check(value)
        .map_err(|actual| mismatch(record, key, expectation, actual))
}

/// Assert on the record's resource type
pub fn assert_type(
    record: &ResourceRecord,
    expectation: &Expectation,
) -> Result<(), ValidationFailure> {
    let value = AttributeValue::String(record.resource_type.clone());
    expectation
        .check(&value)
        .map_err(|actual| mismatch(record, "type", expectation, actual))
}

/// Assert on the record's logical name; a missing name checks as null
pub fn assert_name(
    record: &ResourceRecord,
    expectation: &Expectation,
) -> Result<(), ValidationFailure> {
    let value = record
        .name
        .clone()
        .map_or(AttributeValue::Null, AttributeValue::String);
    expectation
        .check(&value)
        .map_err(|actual| mismatch(record, "name", expectation, actual))
}

/// Apply an expectation to a free-standing text value, e.g. from a live lookup
pub fn assert_text(
    subject: &str,
    key: &str,
    actual: &str,
    expectation: &Expectation,
) -> Result<(), ValidationFailure> {
    expectation
        .check(&AttributeValue::String(actual.to_string()))
        .map_err(|actual| ValidationFailure::AttributeMismatch {
            resource: subject.to_string(),
            key: key.to_string(),
            expected: expectation.to_string(),
            actual,
        })
}

fn mismatch(
    record: &ResourceRecord,
    key: &str,
    expectation: &Expectation,
    actual: String,
) -> ValidationFailure {
    ValidationFailure::AttributeMismatch {
        resource: record.label(),
        key: key.to_string(),
        expected: expectation.to_string(),
        actual,
    }
}
