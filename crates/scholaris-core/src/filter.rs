//! Filter criteria for list queries.
//!
//! List endpoints accept a `filters` query parameter holding a JSON array of
//! criteria, e.g. `[{"PropertyName":"Status","Operator":"Equal","Value":"Active"}]`.
//! Criteria are ANDed left-to-right against top-level record properties.
//!
//! [`matches_record`] implements the evaluation used by the in-memory store;
//! the SQL store compiles the same semantics to parameterized queries.

use std::cmp::Ordering;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::errors::AppError;

/// Comparison operator for one filter term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum FilterOperator {
    Equal,
    NotEqual,
    Contains,
    StartsWith,
    EndsWith,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
}

/// One property/operator/value filter term.
///
/// The wire format is PascalCase; camelCase keys are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct FilterCriteria {
    #[serde(alias = "propertyName")]
    pub property_name: String,
    #[serde(alias = "operator")]
    pub operator: FilterOperator,
    #[serde(alias = "value")]
    pub value: String,
}

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Parses the raw `filters` query parameter into criteria.
///
/// Malformed JSON, unknown operators, and empty property names are rejected
/// as bad requests before any store call.
pub fn parse_filters(raw: &str) -> Result<Vec<FilterCriteria>, AppError> {
    let criteria: Vec<FilterCriteria> = serde_json::from_str(raw)
        .map_err(|e| AppError::bad_request(anyhow!("Invalid filter criteria: {}", e)))?;

    if criteria.iter().any(|c| c.property_name.trim().is_empty()) {
        return Err(AppError::bad_request(anyhow!(
            "Invalid filter criteria: property name must not be empty"
        )));
    }

    Ok(criteria)
}

/// Returns true when `record` satisfies every criterion.
pub fn matches_record(record: &Value, criteria: &[FilterCriteria]) -> bool {
    criteria.iter().all(|c| matches_criterion(record, c))
}

fn matches_criterion(record: &Value, criterion: &FilterCriteria) -> bool {
    match record.get(&criterion.property_name) {
        None | Some(Value::Null) => matches!(criterion.operator, FilterOperator::NotEqual),
        Some(field) => compare(field, criterion.operator, &criterion.value),
    }
}

/// Text form of a field: strings unquoted, everything else as JSON text.
fn text_of(field: &Value) -> String {
    match field {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn numeric_pair(field: &Value, value: &str) -> Option<(f64, f64)> {
    Some((field.as_f64()?, value.parse().ok()?))
}

fn is_equal(field: &Value, value: &str) -> bool {
    if let Some((a, b)) = numeric_pair(field, value) {
        return a == b;
    }
    if let (Some(a), Ok(b)) = (field.as_bool(), value.parse::<bool>()) {
        return a == b;
    }
    text_of(field) == value
}

fn ordering_of(field: &Value, value: &str) -> Ordering {
    if let Some((a, b)) = numeric_pair(field, value) {
        a.total_cmp(&b)
    } else {
        text_of(field).as_str().cmp(value)
    }
}

fn compare(field: &Value, operator: FilterOperator, value: &str) -> bool {
    match operator {
        FilterOperator::Equal => is_equal(field, value),
        FilterOperator::NotEqual => !is_equal(field, value),
        FilterOperator::Contains => text_of(field)
            .to_lowercase()
            .contains(&value.to_lowercase()),
        FilterOperator::StartsWith => text_of(field)
            .to_lowercase()
            .starts_with(&value.to_lowercase()),
        FilterOperator::EndsWith => text_of(field)
            .to_lowercase()
            .ends_with(&value.to_lowercase()),
        FilterOperator::GreaterThan => ordering_of(field, value) == Ordering::Greater,
        FilterOperator::GreaterThanOrEqual => ordering_of(field, value) != Ordering::Less,
        FilterOperator::LessThan => ordering_of(field, value) == Ordering::Less,
        FilterOperator::LessThanOrEqual => ordering_of(field, value) != Ordering::Greater,
    }
}

/// Case-insensitive substring search over the record's JSON text.
pub fn matches_search(record: &Value, term: &str) -> bool {
    record.to_string().to_lowercase().contains(&term.to_lowercase())
}

/// Orders two records by a top-level property for sorting.
///
/// Records missing the property sort last in either direction; numbers sort
/// before strings, strings before booleans.
pub fn compare_by_field(a: &Value, b: &Value, field: &str, order: SortOrder) -> Ordering {
    let va = a.get(field).filter(|v| !v.is_null());
    let vb = b.get(field).filter(|v| !v.is_null());

    match (va, vb) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(va), Some(vb)) => {
            let ord = compare_values(va, vb);
            match order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        }
    }
}

fn type_rank(v: &Value) -> u8 {
    match v {
        Value::Number(_) => 0,
        Value::String(_) => 1,
        Value::Bool(_) => 2,
        _ => 3,
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .unwrap_or(f64::NAN)
            .total_cmp(&y.as_f64().unwrap_or(f64::NAN)),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => type_rank(a)
            .cmp(&type_rank(b))
            .then_with(|| a.to_string().cmp(&b.to_string())),
    }
}
