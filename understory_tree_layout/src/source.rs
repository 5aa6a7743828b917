// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input trees: the [`TreeSource`] trait and a typed [`Node`].

use alloc::vec::Vec;

/// Key stripped from payloads alongside the children field.
///
/// Hosts that round-trip annotated data may carry a `ratio` key; it is
/// structural and never handed to content callbacks.
pub const RATIO_KEY: &str = "ratio";

/// A caller-owned tree: an opaque record plus a designated children field.
///
/// The layout passes never assume anything about a node beyond what this
/// trait exposes. The children field is looked up by name so dynamically
/// shaped data (for example JSON) can pick which key holds the structure.
pub trait TreeSource: Sized {
    /// Record handed to content callbacks, with structural fields removed.
    type Payload: Clone;

    /// Returns the children stored under `field`.
    ///
    /// `None` means the field is absent. `Some(&[])` means it is present but
    /// empty. Both describe a leaf; only the root distinguishes them.
    fn children(&self, field: &str) -> Option<&[Self]>;

    /// Returns a copy of this node's record without the children field.
    fn payload(&self, field: &str) -> Self::Payload;
}

/// A statically typed tree node.
///
/// The children field name is ignored: `children` is always the structure.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Node<P> {
    /// Opaque record.
    pub payload: P,
    /// Child nodes, or `None` when the node carries no children field at all.
    pub children: Option<Vec<Node<P>>>,
}

impl<P> Node<P> {
    /// Creates a node without a children field.
    pub fn leaf(payload: P) -> Self {
        Self {
            payload,
            children: None,
        }
    }

    /// Creates a node with the given children.
    pub fn branch(payload: P, children: Vec<Self>) -> Self {
        Self {
            payload,
            children: Some(children),
        }
    }
}

impl<P: Clone> TreeSource for Node<P> {
    type Payload = P;

    fn children(&self, _field: &str) -> Option<&[Self]> {
        self.children.as_deref()
    }

    fn payload(&self, _field: &str) -> P {
        self.payload.clone()
    }
}

#[cfg(feature = "serde_json")]
impl TreeSource for serde_json::Value {
    type Payload = Self;

    /// Non-array values under `field` count as an absent field.
    fn children(&self, field: &str) -> Option<&[Self]> {
        self.get(field)
            .and_then(Self::as_array)
            .map(Vec::as_slice)
    }

    fn payload(&self, field: &str) -> Self {
        match self {
            Self::Object(map) => Self::Object(
                map.iter()
                    .filter(|(key, _)| key.as_str() != field && key.as_str() != RATIO_KEY)
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect(),
            ),
            other => other.clone(),
        }
    }
}
