//! Declarative request validation
//!
//! A schema is a list of [`Rule`]s. Each rule names a field, a check to run
//! against that field and the message reported when the check fails. Rules
//! run in order and every failure is collected, so one field may report more
//! than one error.

use serde::Serialize;
use serde_json::{Map, Value};
use validator::validate_length;

/// Where a validated field came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Body,
    Query,
}

/// The check applied by a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Field is present and not null
    Exists,
    /// Field is a JSON string
    IsString,
    /// Field is present and, if a string, has at least one character
    NotEmpty,
    /// Field is a string whose character count lies in `min..=max`
    Length { min: u64, max: u64 },
}

impl Check {
    pub fn passes(&self, value: Option<&Value>) -> bool {
        match (self, value) {
            (_, None) | (_, Some(Value::Null)) => false,
            (Check::Exists, Some(_)) => true,
            (Check::IsString, Some(v)) => v.is_string(),
            (Check::NotEmpty, Some(Value::String(s))) => !s.is_empty(),
            (Check::NotEmpty, Some(_)) => true,
            (Check::Length { min, max }, Some(Value::String(s))) => {
                validate_length(s.as_str(), Some(*min), Some(*max), None)
            }
            (Check::Length { .. }, Some(_)) => false,
        }
    }
}

/// A single `(field, check, message)` validation rule
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub field: &'static str,
    pub check: Check,
    pub message: &'static str,
}

impl Rule {
    pub const fn new(field: &'static str, check: Check, message: &'static str) -> Self {
        Self {
            field,
            check,
            message,
        }
    }
}

/// A failed rule, serialized in the shape clients receive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub msg: String,
    pub path: String,
    pub location: Location,
}

/// Rules for creating a user
pub const USER_SCHEMA: &[Rule] = &[
    Rule::new("username", Check::IsString, "Username must be a string"),
    Rule::new("username", Check::NotEmpty, "Username cannot be empty"),
    Rule::new(
        "username",
        Check::Length { min: 5, max: 32 },
        "Must be at least of length 5 and maximum 32",
    ),
    Rule::new("displayName", Check::Exists, "displayName is required"),
    Rule::new("displayName", Check::IsString, "displayName must be a string"),
];

/// Rules for replacing or merging a user: the fields only need the right
/// shape, no length limits apply.
pub const USER_SHAPE: &[Rule] = &[
    Rule::new("username", Check::Exists, "username is required"),
    Rule::new("username", Check::IsString, "username must be a string"),
    Rule::new("displayName", Check::Exists, "displayName is required"),
    Rule::new("displayName", Check::IsString, "displayName must be a string"),
];

/// Rules for the `filter` query parameter of the user listing
pub const USER_FILTER_QUERY: &[Rule] = &[
    Rule::new("filter", Check::IsString, "Must be a string"),
    Rule::new("filter", Check::NotEmpty, "Must not be empty"),
    Rule::new(
        "filter",
        Check::Length { min: 3, max: 10 },
        "Must be at least 3 - 10 characters",
    ),
];

/// Run every rule against `input`, collecting all failures.
pub fn validate(rules: &[Rule], input: &Value, location: Location) -> Result<(), Vec<FieldError>> {
    run(rules, input, location, false)
}

/// Like [`validate`], but rules for fields missing from `input` are skipped.
pub fn validate_present(
    rules: &[Rule],
    input: &Value,
    location: Location,
) -> Result<(), Vec<FieldError>> {
    run(rules, input, location, true)
}

fn run(
    rules: &[Rule],
    input: &Value,
    location: Location,
    skip_missing: bool,
) -> Result<(), Vec<FieldError>> {
    let empty = Map::new();
    let fields = input.as_object().unwrap_or(&empty);

    let errors: Vec<FieldError> = rules
        .iter()
        .filter_map(|rule| {
            let value = fields.get(rule.field);
            if skip_missing && value.is_none() {
                return None;
            }
            if rule.check.passes(value) {
                return None;
            }
            Some(FieldError {
                kind: "field",
                value: value.cloned(),
                msg: rule.message.to_string(),
                path: rule.field.to_string(),
                location,
            })
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
