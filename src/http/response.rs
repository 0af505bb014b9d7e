//! Response handling: status mapping and decoding into typed shapes.

use crate::error::{ApiError, Result};

use super::document::{self, ErrorDocument, Resource};
use super::transport::HttpResponse;

/// Maps a non-success status onto an [`ApiError`].
///
/// The message comes from the server's error document when it has one,
/// otherwise from the canonical reason of the status.
///
/// # Errors
///
/// Returns the mapped API error for any non-2xx status.
pub fn check_status(response: &HttpResponse) -> Result<()> {
    if response.status.is_success() {
        return Ok(());
    }

    let message = serde_json::from_slice::<ErrorDocument>(&response.body)
        .ok()
        .and_then(|doc| doc.message())
        .unwrap_or_else(|| {
            response
                .status
                .canonical_reason()
                .unwrap_or("error")
                .to_owned()
        });

    Err(ApiError::from_status(response.status, message).into())
}

/// Decodes a single resource.
///
/// # Errors
///
/// Returns an API error for a non-success status, or a decode error.
pub fn decode_one<T: Resource>(response: &HttpResponse) -> Result<T> {
    check_status(response)?;
    document::decode_single(&response.body)
}

/// Decodes a collection, preserving server order.
///
/// # Errors
///
/// Returns an API error for a non-success status, or a decode error.
pub fn decode_many<T: Resource>(response: &HttpResponse) -> Result<Vec<T>> {
    check_status(response)?;
    document::decode_collection(&response.body)
}

/// Accepts any success response and ignores its body.
///
/// # Errors
///
/// Returns an API error for a non-success status.
pub fn expect_empty(response: &HttpResponse) -> Result<()> {
    check_status(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TfeError;
    use reqwest::StatusCode;
    use serde_json::json;

    fn response(status: StatusCode, body: &serde_json::Value) -> HttpResponse {
        HttpResponse::new(status, serde_json::to_vec(body).expect("json serializes"))
    }

    #[test]
    fn test_success_passes() {
        assert!(check_status(&HttpResponse::new(StatusCode::NO_CONTENT, Vec::new())).is_ok());
        assert!(expect_empty(&HttpResponse::new(StatusCode::OK, b"garbage".to_vec())).is_ok());
    }

    #[test]
    fn test_not_found() {
        let err = check_status(&response(
            StatusCode::NOT_FOUND,
            &json!({ "errors": [ { "status": "404", "title": "not found" } ] }),
        ))
        .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_error_document_detail() {
        let err = check_status(&response(
            StatusCode::UNPROCESSABLE_ENTITY,
            &json!({
                "errors": [ {
                    "status": "422",
                    "title": "invalid attribute",
                    "detail": "Name has already been taken"
                } ]
            }),
        ))
        .unwrap_err();

        assert!(matches!(
            err,
            TfeError::Api(ApiError::RequestFailed { status: 422, ref message })
                if message == "Name has already been taken"
        ));
    }

    #[test]
    fn test_falls_back_to_reason() {
        let err = check_status(&HttpResponse::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            b"<html>oops</html>".to_vec(),
        ))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "API request failed: 500 - Internal Server Error"
        );
    }

    #[test]
    fn test_unauthorized() {
        let err = check_status(&HttpResponse::new(StatusCode::UNAUTHORIZED, Vec::new())).unwrap_err();
        assert!(matches!(err, TfeError::Api(ApiError::Unauthorized)));
    }
}
