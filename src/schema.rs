//! Declarative record schemas and payload validation.
//!
//! A [`Schema`] is a static table of [`FieldSpec`]s. [`Schema::validate`] checks
//! an incoming JSON payload against that table before anything reaches the
//! store, collecting every field-level problem into [`ValidationErrors`].
//! Schemas serialize to JSON so external tooling can discover them.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// FieldKind / FieldSpec
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Number,
}

/// One field of a record schema.
#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(skip_serializing_if = "is_empty_list")]
    pub allowed: &'static [&'static str],
    pub description: &'static str,
}

fn is_empty_list(values: &&'static [&'static str]) -> bool {
    values.is_empty()
}

impl FieldSpec {
    const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: None,
            minimum: None,
            maximum: None,
            allowed: &[],
            description: "",
        }
    }

    pub const fn string(name: &'static str) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub const fn number(name: &'static str) -> Self {
        Self::new(name, FieldKind::Number)
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Value substituted when the field is missing or `null`.
    pub const fn default_value(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    /// Inclusive lower bound for numeric fields.
    pub const fn minimum(mut self, min: f64) -> Self {
        self.minimum = Some(min);
        self
    }

    /// Inclusive upper bound for numeric fields.
    pub const fn maximum(mut self, max: f64) -> Self {
        self.maximum = Some(max);
        self
    }

    /// Restrict a string field to a fixed set of values.
    pub const fn one_of(mut self, values: &'static [&'static str]) -> Self {
        self.allowed = values;
        self
    }

    pub const fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    fn check(&self, value: &Value) -> Option<String> {
        match self.kind {
            FieldKind::String => {
                let Some(s) = value.as_str() else {
                    return Some("expected a string".to_string());
                };
                if !self.allowed.is_empty() && !self.allowed.contains(&s) {
                    return Some(format!("must be one of: {}", self.allowed.join(", ")));
                }
                None
            }
            FieldKind::Number => {
                let Some(n) = value.as_f64() else {
                    return Some("expected a number".to_string());
                };
                if let Some(min) = self.minimum {
                    if n < min {
                        return Some(format!("must be greater than or equal to {}", min));
                    }
                }
                if let Some(max) = self.maximum {
                    if n > max {
                        return Some(format!("must be less than or equal to {}", max));
                    }
                }
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Declarative shape of a persisted record type.
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    pub name: &'static str,
    pub collection: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldSpec],
}

impl Schema {
    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validate a JSON payload and normalize it into a record map.
    ///
    /// The returned map contains exactly the schema's fields: defaults are
    /// filled in, absent optional fields become `null`, and keys the schema
    /// does not know are dropped.
    pub fn validate(&self, payload: &Value) -> Result<Map<String, Value>, ValidationErrors> {
        let Some(obj) = payload.as_object() else {
            return Err(ValidationErrors::single("body", "expected a JSON object"));
        };

        let mut errors = ValidationErrors::default();
        let mut record = Map::with_capacity(self.fields.len());

        for field in self.fields {
            match obj.get(field.name) {
                None | Some(Value::Null) => {
                    if let Some(default) = field.default {
                        record.insert(field.name.to_string(), Value::String(default.to_string()));
                    } else if field.required {
                        errors.push(field.name, "field required");
                    } else {
                        record.insert(field.name.to_string(), Value::Null);
                    }
                }
                Some(value) => match field.check(value) {
                    Some(message) => errors.push(field.name, message),
                    None => {
                        record.insert(field.name.to_string(), value.clone());
                    }
                },
            }
        }

        if errors.is_empty() {
            Ok(record)
        } else {
            Err(errors)
        }
    }
}

// ---------------------------------------------------------------------------
// ValidationErrors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every field-level problem found in one payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Whether any error concerns the named field.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}
