// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for configuration and layout validation.

use alloc::string::String;
use core::fmt;

/// The root does not carry the configured children field, so it is not a tree.
///
/// A root whose children field is present but empty is a valid single-leaf
/// tree and does not produce this error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructureError {
    /// The children field that was looked up.
    pub children_field: String,
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "root has no `{}` field and does not represent a tree",
            self.children_field
        )
    }
}

impl core::error::Error for StructureError {}

/// A configuration override was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The override sets no field at all.
    EmptyOverride,
    /// The override names an empty children field.
    EmptyChildrenField,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyOverride => f.write_str("configuration override sets no fields"),
            Self::EmptyChildrenField => f.write_str("children field name must not be empty"),
        }
    }
}

impl core::error::Error for ConfigError {}
