//! Ordered, short-circuiting rule sets
//!
//! A [`RuleSet`] is a named list of [`FieldRule`]s evaluated in declaration
//! order against an untyped JSON payload. The first failing rule stops the
//! run and its [`ValidationError`] is returned; later rules are never
//! evaluated. On success the caller receives a new, normalized copy of the
//! payload and the original value is left untouched.

use serde_json::{Map, Value};

use super::extractors::ValidationError;
use super::sanitizers::{trim_object_field, trim_string_items, trim_value};
use super::validators::{
    validate_array, validate_count, validate_date, validate_date_order, validate_email,
    validate_non_blank, validate_object_items, validate_one_of, validate_positive_number,
    validate_string_items,
};

/// Whether a field must be present in the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    /// Skipped entirely when the key is absent
    Optional,
}

/// Shape and value constraint applied to a single field
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    /// Non-blank string; trimmed on success
    String,
    /// Non-blank string shaped like an email address; trimmed on success
    Email,
    /// Number strictly greater than zero
    PositiveNumber,
    /// Whole number of at least `min` (people counts)
    Count { min: u64 },
    /// String that parses to a valid date; trimmed on success
    Date,
    /// Exact member of a fixed set of strings
    OneOf(&'static [&'static str]),
    /// Array of non-blank strings; each element trimmed
    StringArray { allow_empty: bool },
    /// Array of objects whose `trim_field` is a non-blank string, trimmed per
    /// element. `count_field`, when set, must be an integer of at least 1.
    ObjectArray {
        allow_empty: bool,
        trim_field: &'static str,
        count_field: Option<&'static str>,
    },
}

impl Check {
    /// Run the check, returning the normalized replacement if the field
    /// should be rewritten
    fn run(&self, label: &str, value: &Value) -> Result<Option<Value>, String> {
        match self {
            Check::String => {
                validate_non_blank(value, label)?;
                Ok(Some(trim_value(value)))
            }
            Check::Email => {
                validate_email(value, label)?;
                Ok(Some(trim_value(value)))
            }
            Check::PositiveNumber => {
                validate_positive_number(value, label)?;
                Ok(None)
            }
            Check::Count { min } => {
                validate_count(value, label, *min)?;
                Ok(None)
            }
            Check::Date => {
                validate_date(value, label)?;
                Ok(Some(trim_value(value)))
            }
            Check::OneOf(allowed) => {
                validate_one_of(value, label, allowed)?;
                Ok(None)
            }
            Check::StringArray { allow_empty } => {
                let items = validate_array(value, label, *allow_empty)?;
                validate_string_items(items, label)?;
                Ok(Some(trim_string_items(items)))
            }
            Check::ObjectArray {
                allow_empty,
                trim_field,
                count_field,
            } => {
                let items = validate_array(value, label, *allow_empty)?;
                validate_object_items(items, label, trim_field, *count_field)?;
                Ok(Some(trim_object_field(items, trim_field)))
            }
        }
    }
}

/// One step of a rule set
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRule {
    Field {
        name: &'static str,
        label: &'static str,
        presence: Presence,
        check: Check,
    },
    /// `start` must be strictly before `end`. Only evaluated when both keys
    /// are present in the payload.
    DateOrder {
        start: &'static str,
        start_label: &'static str,
        end: &'static str,
        end_label: &'static str,
    },
    /// `name` is required only when the (already normalized) value of `when`
    /// equals `equals`; otherwise it is validated only if present.
    RequiredWhen {
        name: &'static str,
        label: &'static str,
        when: &'static str,
        equals: &'static str,
        check: Check,
    },
}

impl FieldRule {
    pub fn required(name: &'static str, label: &'static str, check: Check) -> Self {
        Self::Field {
            name,
            label,
            presence: Presence::Required,
            check,
        }
    }

    pub fn optional(name: &'static str, label: &'static str, check: Check) -> Self {
        Self::Field {
            name,
            label,
            presence: Presence::Optional,
            check,
        }
    }

    pub fn date_order(
        start: &'static str,
        start_label: &'static str,
        end: &'static str,
        end_label: &'static str,
    ) -> Self {
        Self::DateOrder {
            start,
            start_label,
            end,
            end_label,
        }
    }

    pub fn required_when(
        name: &'static str,
        label: &'static str,
        when: &'static str,
        equals: &'static str,
        check: Check,
    ) -> Self {
        Self::RequiredWhen {
            name,
            label,
            when,
            equals,
            check,
        }
    }

    /// Field reported on failure. Date ordering blames the end date.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Field { name, .. } | Self::RequiredWhen { name, .. } => name,
            Self::DateOrder { end, .. } => end,
        }
    }

    /// Same constraint, but skipped when the field is absent
    pub fn into_optional(self) -> Self {
        match self {
            Self::Field {
                name, label, check, ..
            } => Self::Field {
                name,
                label,
                presence: Presence::Optional,
                check,
            },
            other => other,
        }
    }

    fn apply(&self, payload: &mut Map<String, Value>) -> Result<(), ValidationError> {
        match self {
            Self::Field {
                name,
                label,
                presence,
                check,
            } => apply_field(payload, name, label, *presence, check),
            Self::RequiredWhen {
                name,
                label,
                when,
                equals,
                check,
            } => {
                let triggered = payload.get(*when).and_then(Value::as_str) == Some(*equals);
                let presence = if triggered {
                    Presence::Required
                } else {
                    Presence::Optional
                };
                apply_field(payload, name, label, presence, check)
            }
            Self::DateOrder {
                start,
                start_label,
                end,
                end_label,
            } => {
                let (Some(start_value), Some(end_value)) = (payload.get(*start), payload.get(*end))
                else {
                    return Ok(());
                };
                let start_at = validate_date(start_value, start_label)
                    .map_err(|msg| ValidationError::bad_request(*start, msg))?;
                let end_at = validate_date(end_value, end_label)
                    .map_err(|msg| ValidationError::bad_request(*end, msg))?;
                validate_date_order(start_at, end_at, start_label, end_label)
                    .map_err(|msg| ValidationError::bad_request(*end, msg))
            }
        }
    }
}

fn apply_field(
    payload: &mut Map<String, Value>,
    name: &str,
    label: &str,
    presence: Presence,
    check: &Check,
) -> Result<(), ValidationError> {
    let value = match (payload.get(name), presence) {
        (None, Presence::Optional) => return Ok(()),
        (None, Presence::Required) | (Some(Value::Null), Presence::Required) => {
            return Err(ValidationError::bad_request(
                name,
                format!("{} is required", label),
            ));
        }
        (Some(value), _) => value,
    };

    let replacement = check
        .run(label, value)
        .map_err(|msg| ValidationError::bad_request(name, msg))?;

    if let Some(normalized) = replacement {
        payload.insert(name.to_string(), normalized);
    }
    Ok(())
}

/// Named, ordered list of field rules for one operation on one domain object
#[derive(Debug, Clone)]
pub struct RuleSet {
    name: &'static str,
    rules: Vec<FieldRule>,
}

impl RuleSet {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rules: vec![],
        }
    }

    /// Append a rule; evaluation follows insertion order
    pub fn rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Derive the update variant of a creation rule set: every field becomes
    /// optional while keeping its constraint.
    pub fn to_update(&self, name: &'static str) -> Self {
        Self {
            name,
            rules: self
                .rules
                .iter()
                .cloned()
                .map(FieldRule::into_optional)
                .collect(),
        }
    }

    /// Validate `payload` and return its normalized copy
    ///
    /// Only fields named by a rule are normalized; unknown keys are copied
    /// through unchanged.
    pub fn apply(&self, payload: &Value) -> Result<Value, ValidationError> {
        let Some(fields) = payload.as_object() else {
            return Err(ValidationError::bad_request(
                "body",
                "Request body must be a JSON object",
            ));
        };

        let mut normalized = fields.clone();
        for rule in &self.rules {
            rule.apply(&mut normalized)?;
        }
        Ok(Value::Object(normalized))
    }
}
