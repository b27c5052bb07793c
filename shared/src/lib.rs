//! Shared types for the restaurant ledger
//!
//! Common types used across crates: API models, error types and
//! response structures.

pub mod error;
pub mod models;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
