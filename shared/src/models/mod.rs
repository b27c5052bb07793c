//! Data models
//!
//! Shared between ledger-server and frontend (via API).

pub mod bill;
pub mod menu;

// Re-exports
pub use bill::*;
pub use menu::*;
