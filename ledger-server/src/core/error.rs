use axum::response::{IntoResponse, Response};
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::store::StoreError;

/// 账本/菜单领域错误
///
/// 验证类与解析类错误映射为 400，存储错误映射为 500。
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Missing name")]
    MissingName,

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid items: expected a list")]
    InvalidItems,

    #[error("Invalid bill number: {0}")]
    InvalidBillNo(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl LedgerError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LedgerError::MissingName => ErrorCode::MenuItemNameRequired,
            LedgerError::InvalidPrice(_) => ErrorCode::MenuItemInvalidPrice,
            LedgerError::InvalidItems => ErrorCode::BillItemsInvalid,
            LedgerError::InvalidBillNo(_) => ErrorCode::BillNumberInvalid,
            LedgerError::InvalidTimestamp(_) => ErrorCode::InvalidFormat,
            LedgerError::Validation(_) => ErrorCode::ValidationFailed,
            LedgerError::Storage(_) => ErrorCode::StorageError,
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        AppError::with_message(err.code(), err.to_string())
    }
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

/// 领域操作的 Result 类型别名
pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (LedgerError::MissingName, StatusCode::BAD_REQUEST),
            (LedgerError::InvalidItems, StatusCode::BAD_REQUEST),
            (
                LedgerError::InvalidTimestamp("x".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                LedgerError::Storage(StoreError::Io(std::io::Error::other("disk"))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).http_status(), status);
        }
    }

    #[test]
    fn test_validation_message_reaches_client() {
        let app: AppError = LedgerError::Validation("Invalid line item".into()).into();
        assert_eq!(app.code, ErrorCode::ValidationFailed);
        assert_eq!(app.message, "Validation error: Invalid line item");
    }

    #[test]
    fn test_missing_name_message() {
        let app: AppError = LedgerError::MissingName.into();
        assert_eq!(app.code, ErrorCode::MenuItemNameRequired);
        assert_eq!(app.message, "Missing name");
    }
}
