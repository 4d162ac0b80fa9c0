use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use rand::RngCore;
use serde_json::Value;

use recordsmith_core::PatternDescriptor;

use crate::clock::Clock;
use crate::generators::{generate_pattern, random_uuid};
use crate::model::UuidMode;

/// Ambient sources available while a record is evaluated.
pub struct EvalContext<'a> {
    pub rng: &'a mut dyn RngCore,
    pub clock: &'a dyn Clock,
}

/// Value source for caller-defined keyword fields.
pub trait FieldValue: Send + Sync + fmt::Debug {
    fn evaluate(&self, ctx: &mut EvalContext<'_>) -> Value;
}

/// A classified template field.
#[derive(Debug, Clone)]
pub enum Field {
    /// Non-directive value passed through unchanged.
    Static { name: String, value: Value },
    /// Copy of a sibling field's value.
    Reference { name: String, target: String },
    /// Unix epoch seconds at evaluation time.
    Timestamp { name: String },
    Uuid { name: String, mode: UuidMode },
    Pattern {
        name: String,
        descriptor: PatternDescriptor,
    },
    /// Field built by a caller-registered keyword.
    Custom {
        name: String,
        value: Arc<dyn FieldValue>,
    },
}

impl Field {
    pub fn static_value(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Field::Static {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn custom(name: impl Into<String>, value: impl FieldValue + 'static) -> Self {
        Field::Custom {
            name: name.into(),
            value: Arc::new(value),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Field::Static { name, .. }
            | Field::Reference { name, .. }
            | Field::Timestamp { name }
            | Field::Uuid { name, .. }
            | Field::Pattern { name, .. }
            | Field::Custom { name, .. } => name,
        }
    }

    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Field::Static { .. } => "static",
            Field::Reference { .. } => "reference",
            Field::Timestamp { .. } => "timestamp",
            Field::Uuid { .. } => "uuid",
            Field::Pattern { .. } => "pattern",
            Field::Custom { .. } => "custom",
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Field::Reference { .. })
    }

    pub fn reference_target(&self) -> Option<&str> {
        match self {
            Field::Reference { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Compute this field's value. References yield `None`; they are
    /// resolved against the other fields of the same record.
    pub fn evaluate(&self, ctx: &mut EvalContext<'_>) -> Option<Value> {
        let value = match self {
            Field::Static { value, .. } => value.clone(),
            Field::Reference { .. } => return None,
            Field::Timestamp { .. } => Value::from(ctx.clock.unix_seconds()),
            Field::Uuid { mode, .. } => match mode {
                UuidMode::V4 => Value::String(random_uuid(&mut *ctx.rng)),
                UuidMode::LegacyTimestamp => Value::from(ctx.clock.unix_seconds()),
            },
            Field::Pattern { descriptor, .. } => {
                Value::String(generate_pattern(descriptor, &mut *ctx.rng))
            }
            Field::Custom { value, .. } => value.evaluate(ctx),
        };
        Some(value)
    }
}

/// Immutable set of classified fields keyed by name.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    fields: BTreeMap<String, Field>,
}

impl FieldSet {
    pub(crate) fn insert(&mut self, field: Field) {
        self.fields.insert(field.name().to_string(), field);
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    /// `(field, target)` pairs for every reference field.
    pub fn references(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .values()
            .filter_map(|field| field.reference_target().map(|target| (field.name(), target)))
    }
}
