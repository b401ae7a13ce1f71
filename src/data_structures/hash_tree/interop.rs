//! JSON interop for string-keyed trees.
//!
//! `HashTree<K>` serializes as a nested map where leaves are empty maps
//! (`{"A": {"x": {}}}`). Loading is more lenient through [`HashTree::put_all`]:
//!
//! * an object maps each key to a subtree
//! * `null` or `{}` at a value position is a leaf
//! * an array lists leaf keys; objects inside it are merged in
//! * any other scalar is a single leaf key, rendered as text

use serde_json::Value;

use super::{HashTree, HashTreeError, HashTreeResult};

impl HashTree<String> {
    /// Merges every entry of a JSON object into this tree.
    ///
    /// Merging follows [`HashTree::merge`]: existing keys are reused, never
    /// replaced.
    ///
    /// # Errors
    ///
    /// * `HashTreeError::InvalidArgument` - If `source` is not an object, or
    ///   contains an array nested directly inside another array.
    pub fn put_all(&mut self, source: &Value) -> HashTreeResult<()> {
        match source {
            Value::Object(entries) => {
                for (key, value) in entries {
                    self.add(key.clone()).merge_value(value)?;
                }
                Ok(())
            }
            other => Err(HashTreeError::InvalidArgument(format!(
                "expected a JSON object, found {}",
                kind_of(other)
            ))),
        }
    }

    /// Builds a tree from a JSON object.
    pub fn from_json_value(source: &Value) -> HashTreeResult<Self> {
        let mut tree = Self::new();
        tree.put_all(source)?;
        Ok(tree)
    }

    /// Parses `text` as JSON and builds a tree from it.
    pub fn from_json_str(text: &str) -> HashTreeResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json_value(&value)
    }

    fn merge_value(&mut self, value: &Value) -> HashTreeResult<()> {
        match value {
            Value::Null => Ok(()),
            Value::Object(_) => self.put_all(value),
            Value::Array(items) => {
                for item in items {
                    match item {
                        Value::Array(_) => {
                            return Err(HashTreeError::InvalidArgument(
                                "nested arrays do not describe a tree".to_string(),
                            ))
                        }
                        Value::Object(_) => self.put_all(item)?,
                        Value::Null => {}
                        scalar => {
                            self.add(scalar_text(scalar));
                        }
                    }
                }
                Ok(())
            }
            scalar => {
                self.add(scalar_text(scalar));
                Ok(())
            }
        }
    }
}

impl TryFrom<&Value> for HashTree<String> {
    type Error = HashTreeError;

    fn try_from(source: &Value) -> Result<Self, Self::Error> {
        Self::from_json_value(source)
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
