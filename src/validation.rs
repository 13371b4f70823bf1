//! Structural checks on raw request payloads.
//!
//! Validation never touches the store. A request either comes out as a typed
//! [`ValidatedRequest`] or as the first [`ValidationError`] found.

use serde_json::{Map, Value};

use crate::domain::{ProductCreate, ProductPatch};
use crate::error::ValidationError;
use crate::handlers::Operation;

const NAME: &str = "name";
const DESC: &str = "desc";
const PATH_PARAMETERS: &str = "pathParameters";
const ID: &str = "id";
const BODY: &str = "body";

#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedRequest {
    Create(ProductCreate),
    Read { id: String },
    List,
    Update { id: String, patch: ProductPatch },
}

pub fn validate(operation: Operation, payload: &str) -> Result<ValidatedRequest, ValidationError> {
    match operation {
        Operation::Create => validate_create(payload),
        Operation::Read => validate_read(payload),
        // Listing takes no input at all, so even a garbage payload passes.
        Operation::List => Ok(ValidatedRequest::List),
        Operation::Update => validate_update(payload),
    }
}

pub fn validate_create(payload: &str) -> Result<ValidatedRequest, ValidationError> {
    let event = parse(payload)?;
    let name = required_string(&event, NAME)?;
    let description = required_string(&event, DESC)?;
    Ok(ValidatedRequest::Create(ProductCreate { name, description }))
}

pub fn validate_read(payload: &str) -> Result<ValidatedRequest, ValidationError> {
    let event = parse(payload)?;
    let id = path_id(&event)?;
    Ok(ValidatedRequest::Read { id })
}

pub fn validate_update(payload: &str) -> Result<ValidatedRequest, ValidationError> {
    let event = parse(payload)?;
    let id = path_id(&event)?;
    let body = match event.get(BODY) {
        Some(Value::String(body)) => body,
        Some(_) => return Err(ValidationError::WrongType(BODY)),
        None => return Err(ValidationError::MissingField(BODY)),
    };
    // Any well-formed body passes. Arrays, scalars and null patch nothing.
    let patch = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(fields)) => ProductPatch {
            name: optional_string(&fields, NAME),
            description: optional_string(&fields, DESC),
        },
        Ok(_) => ProductPatch::default(),
        Err(e) => return Err(ValidationError::InvalidBody(e.to_string())),
    };
    Ok(ValidatedRequest::Update { id, patch })
}

fn parse(payload: &str) -> Result<Value, ValidationError> {
    serde_json::from_str(payload).map_err(|e| ValidationError::Malformed(e.to_string()))
}

/// Presence is what counts. A present value that is not a string reads as
/// the empty string.
fn string_value(value: &Value) -> String {
    value.as_str().unwrap_or_default().to_string()
}

fn required_string(event: &Value, key: &'static str) -> Result<String, ValidationError> {
    event
        .get(key)
        .map(string_value)
        .ok_or(ValidationError::MissingField(key))
}

fn optional_string(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).map(string_value)
}

fn path_id(event: &Value) -> Result<String, ValidationError> {
    match event.get(PATH_PARAMETERS) {
        Some(params @ Value::Object(_)) => required_string(params, ID),
        Some(_) => Err(ValidationError::WrongType(PATH_PARAMETERS)),
        None => Err(ValidationError::MissingField(PATH_PARAMETERS)),
    }
}
