//! Unified error codes for the ledger
//!
//! Error codes are organized by category:
//! - 0xxx: General errors (validation, format)
//! - 2xxx: Permission errors
//! - 4xxx: Bill errors
//! - 6xxx: Menu errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Invalid format (unparseable timestamp, price, ...)
    InvalidFormat = 6,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 4xxx: Bill ====================
    /// Bill items must be a list
    BillItemsInvalid = 4001,
    /// Bill number is not a positive integer
    BillNumberInvalid = 4002,

    // ==================== 6xxx: Menu ====================
    /// Menu item name missing
    MenuItemNameRequired = 6001,
    /// Menu item price invalid
    MenuItemInvalidPrice = 6002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Table storage error
    StorageError = 9002,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default English message for this code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::InvalidFormat => "Invalid format",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",

            // Bill
            ErrorCode::BillItemsInvalid => "Invalid items",
            ErrorCode::BillNumberInvalid => "Bill number must be a positive integer",

            // Menu
            ErrorCode::MenuItemNameRequired => "Missing name",
            ErrorCode::MenuItemInvalidPrice => "Invalid price",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::StorageError => "Storage error",
        }
    }

    /// 是否属于系统错误 (9xxx)
    pub const fn is_system(&self) -> bool {
        self.code() >= 9000
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            2 => ErrorCode::ValidationFailed,
            6 => ErrorCode::InvalidFormat,
            2001 => ErrorCode::PermissionDenied,
            4001 => ErrorCode::BillItemsInvalid,
            4002 => ErrorCode::BillNumberInvalid,
            6001 => ErrorCode::MenuItemNameRequired,
            6002 => ErrorCode::MenuItemInvalidPrice,
            9001 => ErrorCode::InternalError,
            9002 => ErrorCode::StorageError,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip_through_u16() {
        for code in [
            ErrorCode::ValidationFailed,
            ErrorCode::BillItemsInvalid,
            ErrorCode::MenuItemNameRequired,
            ErrorCode::StorageError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_display_format() {
        assert_eq!(ErrorCode::BillItemsInvalid.to_string(), "E4001");
        assert_eq!(ErrorCode::ValidationFailed.to_string(), "E0002");
    }
}
