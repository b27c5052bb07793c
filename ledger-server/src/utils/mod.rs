//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`ApiResponse`] - API 响应结构 (from shared::error)
//! - [`parse`] - 宽松/严格的数值解析
//! - [`time`] - 本地时间与存储格式
//! - [`logger`] - 日志初始化

pub mod error;
pub mod logger;
pub mod parse;
pub mod time;

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use parse::ParsePolicy;
