//! 统一错误处理
//!
//! 错误类型定义在 `shared::error`，这里只做再导出，
//! handler 统一写 `crate::utils::AppResult`。
//!
//! # 错误码规范
//!
//! | 范围 | 分类 | 示例 |
//! |------|------|------|
//! | E0xxx | 通用错误 | E0002 验证失败 |
//! | E2xxx | 权限错误 | E2001 禁止访问 |
//! | E4xxx | 账单错误 | E4001 items 不是列表 |
//! | E6xxx | 菜单错误 | E6001 缺少菜名 |
//! | E9xxx | 系统错误 | E9002 存储错误 |
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::forbidden("Forbidden"))
//!
//! // 领域错误经 `?` 自动转换
//! let bill = state.ledger.record_bill(draft)?;
//! ```

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
