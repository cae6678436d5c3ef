//! Test converters

use pathmap_model::{ConvertError, FieldType, ValueConverter};
use serde_json::Value;

/// Prefixes the node text on read and the value text on write
#[derive(Debug, Clone)]
pub struct CombineConverter {
    prefix: String,
}

impl CombineConverter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for CombineConverter {
    fn default() -> Self {
        Self::new("custom-")
    }
}

impl ValueConverter for CombineConverter {
    fn read_value(
        &self,
        node: &Value,
        _target: &FieldType,
        _existing: Option<&Value>,
    ) -> Result<Value, ConvertError> {
        Ok(Value::String(format!("{}{}", self.prefix, text(node))))
    }

    fn write_value(&self, value: &Value) -> Result<Value, ConvertError> {
        Ok(Value::String(format!("{}{}", self.prefix, text(value))))
    }
}

/// Ignores the actual value and always produces a fixed one
#[derive(Debug, Clone)]
pub struct OnlyConverter {
    value: Value,
}

impl OnlyConverter {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl ValueConverter for OnlyConverter {
    fn read_value(
        &self,
        _node: &Value,
        _target: &FieldType,
        _existing: Option<&Value>,
    ) -> Result<Value, ConvertError> {
        Ok(self.value.clone())
    }

    fn write_value(&self, _value: &Value) -> Result<Value, ConvertError> {
        Ok(self.value.clone())
    }
}

/// Appends the node to the current list value on read
#[derive(Debug, Clone, Default)]
pub struct AppendConverter;

impl ValueConverter for AppendConverter {
    fn can_write(&self) -> bool {
        false
    }

    fn read_value(
        &self,
        node: &Value,
        _target: &FieldType,
        existing: Option<&Value>,
    ) -> Result<Value, ConvertError> {
        let mut items = existing
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        items.push(node.clone());
        Ok(Value::Array(items))
    }

    fn write_value(&self, value: &Value) -> Result<Value, ConvertError> {
        Ok(value.clone())
    }
}

/// Fails every read
#[derive(Debug, Clone, Default)]
pub struct FailingConverter;

impl ValueConverter for FailingConverter {
    fn read_value(
        &self,
        node: &Value,
        _target: &FieldType,
        _existing: Option<&Value>,
    ) -> Result<Value, ConvertError> {
        Err(ConvertError::custom(format!("cannot convert {node}")))
    }

    fn write_value(&self, value: &Value) -> Result<Value, ConvertError> {
        Ok(value.clone())
    }
}

fn text(node: &Value) -> String {
    match node {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
