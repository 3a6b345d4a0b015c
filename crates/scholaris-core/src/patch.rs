//! JSON patch documents for partial record updates.
//!
//! A patch is an ordered list of operations in RFC 6902 form with RFC 6901
//! pointers (`~0` unescapes to `~`, `~1` to `/`, `-` appends to arrays):
//!
//! ```json
//! [
//!   {"op": "replace", "path": "/status", "value": "Archived"},
//!   {"op": "remove", "path": "/tags/0"}
//! ]
//! ```
//!
//! Operations apply in order and the first failure aborts. Callers that must
//! not persist partial applications apply the patch to a copy of the record.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// One patch operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Value },
    Replace { path: String, value: Value },
    Remove { path: String },
    Move { from: String, path: String },
    Copy { from: String, path: String },
    Test { path: String, value: Value },
}

/// An ordered list of patch operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PatchDocument(pub Vec<PatchOperation>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    InvalidPointer(String),
    UnknownPath(String),
    BadIndex(String),
    TestFailed(String),
    InvalidMove(String),
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchError::InvalidPointer(path) => write!(f, "invalid JSON pointer \"{}\"", path),
            PatchError::UnknownPath(path) => write!(f, "no value at \"{}\"", path),
            PatchError::BadIndex(path) => write!(f, "array index out of bounds at \"{}\"", path),
            PatchError::TestFailed(path) => write!(f, "test failed at \"{}\"", path),
            PatchError::InvalidMove(path) => write!(f, "cannot move \"{}\" into itself", path),
        }
    }
}

impl std::error::Error for PatchError {}

impl PatchDocument {
    /// Applies every operation in order, aborting on the first failure.
    pub fn apply(&self, target: &mut Value) -> Result<(), PatchError> {
        for operation in &self.0 {
            apply_operation(target, operation)?;
        }
        Ok(())
    }
}

fn apply_operation(doc: &mut Value, operation: &PatchOperation) -> Result<(), PatchError> {
    match operation {
        PatchOperation::Add { path, value } => add(doc, path, value.clone()),
        PatchOperation::Replace { path, value } => replace(doc, path, value.clone()),
        PatchOperation::Remove { path } => remove(doc, path).map(|_| ()),
        PatchOperation::Move { from, path } => {
            if path == from {
                return Ok(());
            }
            if path.starts_with(&format!("{}/", from)) {
                return Err(PatchError::InvalidMove(from.clone()));
            }
            let value = remove(doc, from)?;
            add(doc, path, value)
        }
        PatchOperation::Copy { from, path } => {
            let value = resolve(doc, from)?.clone();
            add(doc, path, value)
        }
        PatchOperation::Test { path, value } => {
            if resolve(doc, path)? == value {
                Ok(())
            } else {
                Err(PatchError::TestFailed(path.clone()))
            }
        }
    }
}

fn parse_pointer(path: &str) -> Result<Vec<String>, PatchError> {
    if path.is_empty() {
        return Ok(Vec::new());
    }
    if !path.starts_with('/') {
        return Err(PatchError::InvalidPointer(path.to_string()));
    }
    Ok(path
        .split('/')
        .skip(1)
        .map(|token| token.replace("~1", "/").replace("~0", "~"))
        .collect())
}

fn array_index(token: &str, path: &str) -> Result<usize, PatchError> {
    token
        .parse()
        .map_err(|_| PatchError::BadIndex(path.to_string()))
}

fn resolve<'a>(doc: &'a Value, path: &str) -> Result<&'a Value, PatchError> {
    let tokens = parse_pointer(path)?;
    let mut current = doc;
    for token in &tokens {
        current = match current {
            Value::Object(map) => map
                .get(token)
                .ok_or_else(|| PatchError::UnknownPath(path.to_string()))?,
            Value::Array(items) => {
                let index = array_index(token, path)?;
                items
                    .get(index)
                    .ok_or_else(|| PatchError::BadIndex(path.to_string()))?
            }
            _ => return Err(PatchError::UnknownPath(path.to_string())),
        };
    }
    Ok(current)
}

/// Walks to the parent of the pointer's final token.
fn resolve_parent<'a>(
    doc: &'a mut Value,
    tokens: &[String],
    path: &str,
) -> Result<&'a mut Value, PatchError> {
    let mut current = doc;
    for token in &tokens[..tokens.len() - 1] {
        current = match current {
            Value::Object(map) => map
                .get_mut(token)
                .ok_or_else(|| PatchError::UnknownPath(path.to_string()))?,
            Value::Array(items) => {
                let index = array_index(token, path)?;
                items
                    .get_mut(index)
                    .ok_or_else(|| PatchError::BadIndex(path.to_string()))?
            }
            _ => return Err(PatchError::UnknownPath(path.to_string())),
        };
    }
    Ok(current)
}

fn add(doc: &mut Value, path: &str, value: Value) -> Result<(), PatchError> {
    let tokens = parse_pointer(path)?;
    if tokens.is_empty() {
        *doc = value;
        return Ok(());
    }
    let last = &tokens[tokens.len() - 1];
    let parent = resolve_parent(doc, &tokens, path)?;
    match parent {
        Value::Object(map) => {
            map.insert(last.clone(), value);
            Ok(())
        }
        Value::Array(items) => {
            if last == "-" {
                items.push(value);
                return Ok(());
            }
            let index = array_index(last, path)?;
            if index > items.len() {
                return Err(PatchError::BadIndex(path.to_string()));
            }
            items.insert(index, value);
            Ok(())
        }
        _ => Err(PatchError::UnknownPath(path.to_string())),
    }
}

fn replace(doc: &mut Value, path: &str, value: Value) -> Result<(), PatchError> {
    let tokens = parse_pointer(path)?;
    if tokens.is_empty() {
        *doc = value;
        return Ok(());
    }
    let last = &tokens[tokens.len() - 1];
    let parent = resolve_parent(doc, &tokens, path)?;
    match parent {
        Value::Object(map) => {
            if !map.contains_key(last) {
                return Err(PatchError::UnknownPath(path.to_string()));
            }
            map.insert(last.clone(), value);
            Ok(())
        }
        Value::Array(items) => {
            let index = array_index(last, path)?;
            if index >= items.len() {
                return Err(PatchError::BadIndex(path.to_string()));
            }
            items[index] = value;
            Ok(())
        }
        _ => Err(PatchError::UnknownPath(path.to_string())),
    }
}

fn remove(doc: &mut Value, path: &str) -> Result<Value, PatchError> {
    let tokens = parse_pointer(path)?;
    if tokens.is_empty() {
        return Err(PatchError::InvalidPointer(path.to_string()));
    }
    let last = &tokens[tokens.len() - 1];
    let parent = resolve_parent(doc, &tokens, path)?;
    match parent {
        Value::Object(map) => map
            .remove(last)
            .ok_or_else(|| PatchError::UnknownPath(path.to_string())),
        Value::Array(items) => {
            let index = array_index(last, path)?;
            if index >= items.len() {
                return Err(PatchError::BadIndex(path.to_string()));
            }
            Ok(items.remove(index))
        }
        _ => Err(PatchError::UnknownPath(path.to_string())),
    }
}
