//! Reflection over `serde_json` documents.
//!
//! Objects are composites whose fields are their keys in document order.
//! An object of the form `{"$bytes": "<base64>"}` stands for a raw payload.

use crate::builder::TreeBuilder;
use crate::config::BuildOptions;
use crate::logging::SAMPLE_LOAD;
use crate::schema::{FieldDescriptor, FieldKind, Reflect, Reflected, Value};
use crate::tree::Tree;
use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{Map, Value as JsonValue};
use std::borrow::Cow;

pub const BYTES_KEY: &str = "$bytes";

fn bytes_payload(object: &Map<String, JsonValue>) -> Option<&str> {
    if object.len() != 1 {
        return None;
    }
    object.get(BYTES_KEY).and_then(JsonValue::as_str)
}

fn kind_of(value: &JsonValue) -> FieldKind {
    match value {
        JsonValue::Bool(_) => FieldKind::Bool,
        JsonValue::Null | JsonValue::Number(_) | JsonValue::String(_) => FieldKind::Scalar,
        JsonValue::Array(_) => FieldKind::Sequence,
        JsonValue::Object(object) if bytes_payload(object).is_some() => FieldKind::Bytes,
        JsonValue::Object(_) => FieldKind::Composite,
    }
}

impl Reflect for Map<String, JsonValue> {
    fn type_name(&self) -> Cow<'_, str> {
        Cow::Borrowed("object")
    }

    fn fields(&self) -> Cow<'_, [FieldDescriptor]> {
        Cow::Owned(
            self.iter()
                .map(|(key, value)| FieldDescriptor::new(key.clone(), kind_of(value)))
                .collect(),
        )
    }

    fn read(&self, index: usize) -> Value<'_> {
        match self.values().nth(index) {
            Some(value) => value.to_value(),
            None => Value::Absent(Cow::Borrowed("null")),
        }
    }

    fn read_all(&self) -> Vec<Value<'_>> {
        self.values().map(|value| value.to_value()).collect()
    }
}

impl Reflected for JsonValue {
    fn reflected_type_name() -> Cow<'static, str> {
        Cow::Borrowed("Value")
    }

    fn to_value(&self) -> Value<'_> {
        match self {
            JsonValue::Null => Value::Absent(Cow::Borrowed("null")),
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Number(number) => Value::Scalar(Cow::Owned(number.to_string())),
            JsonValue::String(text) => Value::Scalar(Cow::Borrowed(text)),
            JsonValue::Array(items) => Value::Sequence(items),
            JsonValue::Object(object) => match bytes_payload(object) {
                Some(encoded) => match STANDARD.decode(encoded) {
                    Ok(data) => Value::Bytes(Cow::Owned(data)),
                    Err(err) => {
                        tracing::warn!(target: SAMPLE_LOAD, error = %err, "invalid base64 payload");
                        Value::Opaque(Cow::Borrowed(BYTES_KEY))
                    }
                },
                None => Value::Composite(object),
            },
        }
    }
}

/// Parses a JSON sample and materializes its top-level object.
pub fn inspect_json(sample: &str, options: &BuildOptions) -> Result<Tree> {
    let document: JsonValue = serde_json::from_str(sample).context("Failed to parse JSON sample")?;
    let JsonValue::Object(object) = &document else {
        bail!("JSON sample must be an object at the top level");
    };
    tracing::debug!(target: SAMPLE_LOAD, fields = object.len(), "loaded JSON sample");
    Ok(TreeBuilder::new(options.clone()).build(object))
}
