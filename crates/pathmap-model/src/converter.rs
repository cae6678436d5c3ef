//! Custom value converters
//!
//! A converter sits between a resolved document node and a field's generic
//! decode. It can be attached to a field as a whole, or to each item of a
//! collection field.

use crate::error::ConvertError;
use crate::shape::FieldType;
use serde_json::Value;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// Converts document nodes into field values and back
///
/// Implement this trait to customize how a single field (or each item of a
/// collection field) is read and written. Values flow as [`Value`]; the mapper
/// decodes the result into the declared field type.
pub trait ValueConverter: Send + Sync + Debug {
    /// Whether this converter participates on read
    fn can_read(&self) -> bool {
        true
    }

    /// Whether this converter participates on write
    fn can_write(&self) -> bool {
        true
    }

    /// Convert a document node into a field value
    ///
    /// `existing` is the field's current value when the field is readable.
    fn read_value(
        &self,
        node: &Value,
        target: &FieldType,
        existing: Option<&Value>,
    ) -> Result<Value, ConvertError>;

    /// Convert a field value into its document form
    fn write_value(&self, value: &Value) -> Result<Value, ConvertError>;
}

/// Shared converter handle
pub type ConverterRef = Arc<dyn ValueConverter>;

type ReadFn = dyn Fn(&Value, &FieldType, Option<&Value>) -> Result<Value, ConvertError> + Send + Sync;
type WriteFn = dyn Fn(&Value) -> Result<Value, ConvertError> + Send + Sync;

/// Converter assembled from closures
#[derive(Clone)]
pub struct FnConverter {
    name: &'static str,
    read: Option<Arc<ReadFn>>,
    write: Option<Arc<WriteFn>>,
}

impl FnConverter {
    /// Create converter that reads and writes
    pub fn new<R, W>(name: &'static str, read: R, write: W) -> Self
    where
        R: Fn(&Value, &FieldType, Option<&Value>) -> Result<Value, ConvertError>
            + Send
            + Sync
            + 'static,
        W: Fn(&Value) -> Result<Value, ConvertError> + Send + Sync + 'static,
    {
        Self {
            name,
            read: Some(Arc::new(read)),
            write: Some(Arc::new(write)),
        }
    }

    /// Create converter that only participates on read
    pub fn reader<R>(name: &'static str, read: R) -> Self
    where
        R: Fn(&Value, &FieldType, Option<&Value>) -> Result<Value, ConvertError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name,
            read: Some(Arc::new(read)),
            write: None,
        }
    }

    /// Create converter that only participates on write
    pub fn writer<W>(name: &'static str, write: W) -> Self
    where
        W: Fn(&Value) -> Result<Value, ConvertError> + Send + Sync + 'static,
    {
        Self {
            name,
            read: None,
            write: Some(Arc::new(write)),
        }
    }

    /// Converter name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Debug for FnConverter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnConverter")
            .field("name", &self.name)
            .field("can_read", &self.read.is_some())
            .field("can_write", &self.write.is_some())
            .finish()
    }
}

impl ValueConverter for FnConverter {
    fn can_read(&self) -> bool {
        self.read.is_some()
    }

    fn can_write(&self) -> bool {
        self.write.is_some()
    }

    fn read_value(
        &self,
        node: &Value,
        target: &FieldType,
        existing: Option<&Value>,
    ) -> Result<Value, ConvertError> {
        match &self.read {
            Some(read) => read(node, target, existing),
            None => Ok(node.clone()),
        }
    }

    fn write_value(&self, value: &Value) -> Result<Value, ConvertError> {
        match &self.write {
            Some(write) => write(value),
            None => Ok(value.clone()),
        }
    }
}
