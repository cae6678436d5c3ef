//! Default and null value handling modes

use serde::{Deserialize, Serialize};

/// How default values are treated on read and write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultValueHandling {
    /// Always read and write values
    #[default]
    Include,

    /// Omit values equal to the field default when writing
    Ignore,

    /// Assign the field default when the document has no usable value
    Populate,

    /// Both [`Ignore`](Self::Ignore) and [`Populate`](Self::Populate)
    IgnoreAndPopulate,
}

impl DefaultValueHandling {
    /// Check if missing or null values fall back to the field default
    #[inline]
    #[must_use]
    pub fn populates(self) -> bool {
        matches!(self, Self::Populate | Self::IgnoreAndPopulate)
    }

    /// Check if default values are omitted on write
    #[inline]
    #[must_use]
    pub fn ignores(self) -> bool {
        matches!(self, Self::Ignore | Self::IgnoreAndPopulate)
    }
}

/// How null values are treated on read and write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullValueHandling {
    /// Nulls are assigned and emitted
    #[default]
    Include,

    /// Nulls are skipped on read and omitted on write
    Ignore,
}

impl NullValueHandling {
    /// Check if nulls are skipped
    #[inline]
    #[must_use]
    pub fn ignores(self) -> bool {
        matches!(self, Self::Ignore)
    }
}
