//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 403 Forbidden
            Self::PermissionDenied => StatusCode::FORBIDDEN,

            // 400 Bad Request
            Self::ValidationFailed
            | Self::InvalidFormat
            | Self::BillItemsInvalid
            | Self::BillNumberInvalid
            | Self::MenuItemNameRequired
            | Self::MenuItemInvalidPrice => StatusCode::BAD_REQUEST,

            // 500 Internal Server Error
            Self::InternalError | Self::StorageError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorCode::MenuItemNameRequired.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::BillItemsInvalid.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::PermissionDenied.http_status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ErrorCode::StorageError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
