// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use core::fmt;

use understory_tree_layout::StructureError;

/// Error returned by a content callback.
pub type ContentError = Box<dyn core::error::Error + Send + Sync>;

/// A render call failed; the previous layout stays in place.
#[derive(Debug)]
pub enum RenderError {
    /// No data was passed and none was cached from an earlier render.
    MissingData,
    /// The data is not a tree.
    Structure(StructureError),
    /// The content callback failed.
    Content(ContentError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingData => f.write_str("no data to render"),
            Self::Structure(err) => write!(f, "invalid tree: {err}"),
            Self::Content(err) => write!(f, "content callback failed: {err}"),
        }
    }
}

impl core::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::MissingData => None,
            Self::Structure(err) => Some(err),
            Self::Content(err) => Some(&**err),
        }
    }
}

impl From<StructureError> for RenderError {
    fn from(err: StructureError) -> Self {
        Self::Structure(err)
    }
}
