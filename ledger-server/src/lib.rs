//! Ledger Server - 小餐馆收银账本
//!
//! # 架构概述
//!
//! - **表存储** (`store`): 行式表抽象，CSV 文件与内存两种实现
//! - **菜单目录** (`menu`): 分类 → 菜品列表
//! - **账单账本** (`ledger`): 账单号分配、时间戳规范化、行展开与分组
//! - **HTTP API** (`api`): JSON 接口、前端页面、表文件下载
//!
//! # 模块结构
//!
//! ```text
//! ledger-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── store/         # 表存储
//! ├── menu/          # 菜单目录
//! ├── ledger/        # 账单账本
//! ├── api/           # HTTP 路由和处理器
//! ├── routes/        # 路由组装与中间件栈
//! ├── middleware/    # 请求日志
//! └── utils/         # 解析、时间、日志、错误
//! ```

pub mod api;
pub mod core;
pub mod ledger;
pub mod menu;
pub mod middleware;
pub mod routes;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, LedgerError, LedgerResult, Server, ServerState};
pub use ledger::{BillDraft, BillingLedger};
pub use menu::MenuService;
pub use routes::{build_app, build_router};
pub use store::{CsvTableStore, MemoryTableStore, TableSpec, TableStore};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCode, ParsePolicy};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// 设置运行环境
///
/// 1. 加载 `.env` (不存在时忽略)
/// 2. 按 LOG_LEVEL / LOG_DIR 初始化日志
pub fn setup_environment() -> anyhow::Result<()> {
    if let Err(e) = dotenv::dotenv()
        && !e.not_found()
    {
        anyhow::bail!("Failed to load .env: {}", e);
    }

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
    let log_dir = std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty());
    let json = std::env::var("ENVIRONMENT").is_ok_and(|env| env == "production");
    init_logger_with_file(Some(&log_level), json, log_dir.as_deref());
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    __             __
   / /   ___  ____/ /___ ____  _____
  / /   / _ \/ __  / __ `/ _ \/ ___/
 / /___/  __/ /_/ / /_/ /  __/ /
/_____/\___/\__,_/\__, /\___/_/
                 /____/
    "#
    );
}
