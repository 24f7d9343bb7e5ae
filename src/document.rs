//! # Structured File Reading
//!
//! Inventory class files and the override configuration file are both YAML.
//! This module hides the parser behind the [`StructuredFileReader`] trait so
//! discovery and URL resolution can be tested against in-memory fixtures.
//!
//! A parsed file is a [`Document`]: a thin wrapper around `serde_yaml::Value`
//! that remembers where it came from and offers typed extraction helpers.
//! The helpers fail with [`Error::DocumentShape`] on shape mismatches instead
//! of silently ignoring unexpected values.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::error::{Error, Result};

/// Trait for reading structured files - allows mocking in tests
pub trait StructuredFileReader: Send + Sync {
    /// Parses the file at `path`.
    ///
    /// Returns `Ok(None)` for a syntactically empty file (no document, or an
    /// explicit `null`). Unreadable or malformed files are errors.
    fn read(&self, path: &Path) -> Result<Option<Document>>;
}

/// The default implementation of `StructuredFileReader`, backed by `serde_yaml`.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlFileReader;

impl StructuredFileReader for YamlFileReader {
    fn read(&self, path: &Path) -> Result<Option<Document>> {
        let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Document::parse(path, &content)
    }
}

/// A parsed YAML document together with its source path.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    path: PathBuf,
    value: Value,
}

impl Document {
    /// Parses `content` as YAML, attributing errors to `path`.
    ///
    /// Empty input and a top-level `null` both yield `Ok(None)`.
    pub fn parse(path: &Path, content: &str) -> Result<Option<Self>> {
        if content.trim().is_empty() {
            return Ok(None);
        }
        let value: Value = serde_yaml::from_str(content).map_err(|e| Error::YamlParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::new(path, value))
    }

    /// Wraps an already-parsed value. Returns `None` for `null`.
    pub fn new(path: impl Into<PathBuf>, value: Value) -> Option<Self> {
        if value.is_null() {
            None
        } else {
            Some(Self {
                path: path.into(),
                value,
            })
        }
    }

    /// The file this document was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The underlying YAML value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns the sequence of strings stored under `key`.
    ///
    /// A missing key (or an explicit `null`) is an empty sequence. Anything
    /// other than a list of strings is a shape error.
    pub fn sequence_of_strings(&self, key: &str) -> Result<Vec<String>> {
        let Some(value) = self.field(key)? else {
            return Ok(Vec::new());
        };
        let Some(items) = value.as_sequence() else {
            return Err(self.shape_error(format!("'{}' must be a list", key)));
        };
        items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    self.shape_error(format!("'{}' must only contain strings", key))
                })
            })
            .collect()
    }

    /// Returns the sequence of mappings stored under `key`, each wrapped as a
    /// `Document` so the typed helpers can be applied to the entries.
    pub fn sequence_of_mappings(&self, key: &str) -> Result<Vec<Document>> {
        let Some(value) = self.field(key)? else {
            return Ok(Vec::new());
        };
        let Some(items) = value.as_sequence() else {
            return Err(self.shape_error(format!("'{}' must be a list", key)));
        };
        items
            .iter()
            .map(|item| {
                if item.is_mapping() {
                    Ok(Document {
                        path: self.path.clone(),
                        value: item.clone(),
                    })
                } else {
                    Err(self.shape_error(format!("entries of '{}' must be mappings", key)))
                }
            })
            .collect()
    }

    /// Returns the mandatory string field `key` of this mapping.
    pub fn mapping_field(&self, key: &str) -> Result<String> {
        match self.field(key)? {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(self.shape_error(format!("field '{}' must be a string", key))),
            None => Err(self.shape_error(format!("missing field '{}'", key))),
        }
    }

    /// Looks up `key` in this document, which must be a mapping.
    fn field(&self, key: &str) -> Result<Option<&Value>> {
        let Some(mapping) = self.value.as_mapping() else {
            return Err(self.shape_error("document must be a mapping".to_string()));
        };
        Ok(mapping.get(key).filter(|v| !v.is_null()))
    }

    fn shape_error(&self, message: String) -> Error {
        Error::DocumentShape {
            path: self.path.display().to_string(),
            message,
        }
    }
}
