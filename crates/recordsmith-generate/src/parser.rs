use serde_json::{Map, Value};
use tracing::{debug, warn};

use recordsmith_core::{DIRECTIVE_MARKER, PatternError, compile};

use crate::errors::{Result, TemplateError};
use crate::fields::{Field, FieldSet};
use crate::keywords::KeywordRegistry;
use crate::model::MarkerPolicy;

const REFERENCE_SIGIL: char = '_';

/// Classifies template values into fields.
#[derive(Debug, Clone, Copy)]
pub struct TemplateParser<'r> {
    registry: &'r KeywordRegistry,
    marker_policy: MarkerPolicy,
}

impl<'r> TemplateParser<'r> {
    pub fn new(registry: &'r KeywordRegistry, marker_policy: MarkerPolicy) -> Self {
        Self {
            registry,
            marker_policy,
        }
    }

    /// Decode `body` as a JSON object and classify every value.
    pub fn parse(&self, body: &[u8]) -> Result<FieldSet> {
        let template: Map<String, Value> = serde_json::from_slice(body)?;
        self.parse_template(&template)
    }

    /// Classify an already decoded template. Fails on the first bad field.
    pub fn parse_template(&self, template: &Map<String, Value>) -> Result<FieldSet> {
        let mut fields = FieldSet::default();
        for (key, value) in template {
            let field = self.parse_field(template, key, value)?;
            if field.name() != key {
                return Err(TemplateError::unresolved(
                    key,
                    value.as_str().unwrap_or_default(),
                    format!("keyword built a field named '{}'", field.name()),
                ));
            }
            debug!(field = %key, kind = field.kind(), "field classified");
            fields.insert(field);
        }

        check_references(template, &fields)?;
        Ok(fields)
    }

    fn parse_field(
        &self,
        template: &Map<String, Value>,
        key: &str,
        value: &Value,
    ) -> Result<Field> {
        match value {
            Value::String(raw) => self.parse_string_field(template, key, raw),
            other => Ok(Field::static_value(key, other.clone())),
        }
    }

    fn parse_string_field(
        &self,
        template: &Map<String, Value>,
        key: &str,
        raw: &str,
    ) -> Result<Field> {
        let Some(body) = directive_body(raw, self.marker_policy) else {
            return Ok(Field::static_value(key, raw));
        };
        if !raw.starts_with(DIRECTIVE_MARKER) {
            warn!(
                field = %key,
                value = %raw,
                body = %body,
                "directive marker is not a prefix; body taken from fixed offset"
            );
        }

        if let Some(field) = self.registry.construct(key, body) {
            return field;
        }

        if let Some(target) = body.strip_prefix(REFERENCE_SIGIL) {
            if template.contains_key(target) {
                return Ok(Field::Reference {
                    name: key.to_string(),
                    target: target.to_string(),
                });
            }
            return Err(TemplateError::unresolved(
                key,
                body,
                format!("no field named '{target}'"),
            ));
        }

        match compile(body) {
            Ok(descriptor) => Ok(Field::Pattern {
                name: key.to_string(),
                descriptor,
            }),
            Err(PatternError::PatternNotFound) if !body.contains(['<', '>']) => Err(
                TemplateError::unresolved(key, body, "unknown keyword"),
            ),
            Err(source) => Err(TemplateError::InvalidPattern {
                pattern: body.to_string(),
                source,
            }),
        }
    }
}

/// Directive body of `value`, or `None` for a plain string.
///
/// Under [`MarkerPolicy::Anywhere`] the marker may occur at any position but
/// the body always starts `DIRECTIVE_MARKER.len()` bytes into the string,
/// moved forward to the next character boundary when that offset splits a
/// multi-byte character.
pub fn directive_body(value: &str, policy: MarkerPolicy) -> Option<&str> {
    match policy {
        MarkerPolicy::Prefix => value.strip_prefix(DIRECTIVE_MARKER),
        MarkerPolicy::Anywhere => {
            if !value.contains(DIRECTIVE_MARKER) {
                return None;
            }
            let offset = (DIRECTIVE_MARKER.len()..=value.len())
                .find(|index| value.is_char_boundary(*index))
                .unwrap_or(value.len());
            Some(&value[offset..])
        }
    }
}

/// Every reference must point at a template key whose field is not itself a
/// reference. Keyword constructors may build references too, so this runs
/// over the finished set.
fn check_references(template: &Map<String, Value>, fields: &FieldSet) -> Result<()> {
    for (name, target) in fields.references() {
        if !template.contains_key(target) {
            return Err(TemplateError::unresolved(
                name,
                format!("{REFERENCE_SIGIL}{target}"),
                format!("no field named '{target}'"),
            ));
        }
        if fields.get(target).is_some_and(Field::is_reference) {
            return Err(TemplateError::unresolved(
                name,
                format!("{REFERENCE_SIGIL}{target}"),
                format!("'{target}' is itself a reference"),
            ));
        }
    }
    Ok(())
}
