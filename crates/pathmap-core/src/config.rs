//! Mapper configuration
//!
//! [`MapperConfig`] holds the process defaults that field-level overrides fall
//! back to, plus the naming policy used for structural member lookup and
//! emission.

use pathmap_model::{DefaultValueHandling, FieldDescriptor, NullValueHandling};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// How declared field names map to document member names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingPolicy {
    /// Use the declared name unchanged
    #[default]
    AsIs,

    /// `main_value` → `mainValue`
    CamelCase,
}

impl NamingPolicy {
    /// Apply the policy to a declared name
    #[must_use]
    pub fn apply<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match self {
            Self::AsIs => Cow::Borrowed(name),
            Self::CamelCase => to_camel_case(name),
        }
    }
}

fn to_camel_case(name: &str) -> Cow<'_, str> {
    let starts_upper = name.chars().next().is_some_and(char::is_uppercase);
    if !starts_upper && !name.contains('_') {
        return Cow::Borrowed(name);
    }

    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if ch == '_' {
            upper_next = !out.is_empty();
        } else if out.is_empty() {
            out.extend(ch.to_lowercase());
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

/// Mapper configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Default value handling for fields without an override
    pub default_value_handling: DefaultValueHandling,
    /// Null value handling for fields without an override
    pub null_value_handling: NullValueHandling,
    /// Member naming policy
    pub naming: NamingPolicy,
}

impl MapperConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With default value handling
    #[inline]
    #[must_use]
    pub fn with_default_value_handling(mut self, handling: DefaultValueHandling) -> Self {
        self.default_value_handling = handling;
        self
    }

    /// With null value handling
    #[inline]
    #[must_use]
    pub fn with_null_value_handling(mut self, handling: NullValueHandling) -> Self {
        self.null_value_handling = handling;
        self
    }

    /// With naming policy
    #[inline]
    #[must_use]
    pub fn with_naming(mut self, naming: NamingPolicy) -> Self {
        self.naming = naming;
        self
    }

    /// Effective default value handling for a field
    #[inline]
    #[must_use]
    pub fn default_value_handling_for<T>(&self, field: &FieldDescriptor<T>) -> DefaultValueHandling {
        field
            .default_value_handling()
            .unwrap_or(self.default_value_handling)
    }

    /// Effective null value handling for a field
    #[inline]
    #[must_use]
    pub fn null_value_handling_for<T>(&self, field: &FieldDescriptor<T>) -> NullValueHandling {
        field.null_value_handling().unwrap_or(self.null_value_handling)
    }

    /// Document member name for a field
    #[inline]
    #[must_use]
    pub fn member_name<'a, T>(&self, field: &'a FieldDescriptor<T>) -> Cow<'a, str> {
        self.naming.apply(field.name())
    }
}
