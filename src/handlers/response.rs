use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::{CatalogError, INTERNAL_ERROR_BODY};

/// What every handler returns: a status code and a body string. Success bodies
/// hold encoded JSON, error bodies hold a plain message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub body: String,
}

impl ApiResponse {
    /// 200 with `value` encoded as the body.
    pub fn ok<T: Serialize>(value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self {
                status_code: 200,
                body,
            },
            Err(e) => {
                error!(error = %e, "Failed to encode response body");
                Self {
                    status_code: 500,
                    body: INTERNAL_ERROR_BODY.to_string(),
                }
            }
        }
    }

    pub fn error(err: &CatalogError) -> Self {
        Self {
            status_code: err.status_code(),
            body: err.public_message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Product;
    use crate::error::StoreError;

    #[test]
    fn test_wire_shape() {
        let response = ApiResponse::ok(&Product::new("p1", "Widget", "A simple widget"));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["statusCode"], 200);
        assert_eq!(
            value["body"],
            r#"{"id":"p1","name":"Widget","description":"A simple widget"}"#
        );
    }

    #[test]
    fn test_error_body_is_plain_text() {
        let response = ApiResponse::error(&CatalogError::Store(StoreError::Backend(
            "connection reset".to_string(),
        )));
        assert_eq!(response.status_code, 500);
        assert_eq!(response.body, "Internal Server Error");
    }
}
