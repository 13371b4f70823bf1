use thiserror::Error;

/// Body returned for any request that fails validation.
pub const INVALID_INPUT_BODY: &str = "Error in input, please verify payload body";
/// Body returned when the referenced product does not exist.
pub const NOT_FOUND_BODY: &str = "Resource not found";
/// Body returned for every store failure. The cause is logged, never returned.
pub const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

/// Structural problems with an incoming request.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("Request is not valid JSON: {0}")]
    Malformed(String),
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Field has the wrong type: {0}")]
    WrongType(&'static str),
    #[error("Update body is not valid JSON: {0}")]
    InvalidBody(String),
}

/// Failures reported by an item store. Not-found is not an error here; lookups
/// return `Ok(None)` for that.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Store backend error: {0}")]
    Backend(String),
    #[error("Stored record is corrupt: {0}")]
    CorruptRecord(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Everything a handler can fail with. Each variant maps onto exactly one
/// status code.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CatalogError {
    pub fn status_code(&self) -> u16 {
        match self {
            CatalogError::Validation(_) => 400,
            CatalogError::NotFound(_) => 404,
            CatalogError::Store(_) => 500,
        }
    }

    /// The literal body handed back to the caller.
    pub fn public_message(&self) -> &'static str {
        match self {
            CatalogError::Validation(_) => INVALID_INPUT_BODY,
            CatalogError::NotFound(_) => NOT_FOUND_BODY,
            CatalogError::Store(_) => INTERNAL_ERROR_BODY,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("CA bundle not found at {0}")]
    MissingCaBundle(String),
    #[error("Failed to read event: {0}")]
    EventRead(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_and_bodies() {
        let validation = CatalogError::from(ValidationError::MissingField("name"));
        assert_eq!(validation.status_code(), 400);
        assert_eq!(validation.public_message(), INVALID_INPUT_BODY);

        let missing = CatalogError::NotFound("abc".to_string());
        assert_eq!(missing.status_code(), 404);
        assert_eq!(missing.public_message(), NOT_FOUND_BODY);

        let store = CatalogError::from(StoreError::Backend("throttled".to_string()));
        assert_eq!(store.status_code(), 500);
        assert_eq!(store.public_message(), INTERNAL_ERROR_BODY);
    }

    #[test]
    fn test_store_cause_not_in_public_message() {
        let err = CatalogError::from(StoreError::Backend("AccessDenied for arn:secret".to_string()));
        assert!(!err.public_message().contains("secret"));
        assert!(err.to_string().contains("AccessDenied"));
    }
}
