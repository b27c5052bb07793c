use std::sync::Arc;
use std::time::Instant;

use crate::core::{Config, LedgerResult};
use crate::ledger::BillingLedger;
use crate::menu::MenuService;
use crate::store::{CsvTableStore, TableStore};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，可以直接作为 axum 的 State。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | store | Arc<dyn TableStore> | 表存储 |
/// | menu | MenuService | 菜单目录 |
/// | ledger | BillingLedger | 账单账本 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 表存储 (CSV 文件或内存)
    pub store: Arc<dyn TableStore>,
    /// 菜单目录
    pub menu: MenuService,
    /// 账单账本
    pub ledger: BillingLedger,
    /// 启动时间
    pub started_at: Instant,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("menu", &self.menu)
            .field("ledger", &self.ledger)
            .finish()
    }
}

impl ServerState {
    /// 使用给定存储创建状态
    pub fn with_store(config: Config, store: Arc<dyn TableStore>) -> Self {
        let menu = MenuService::new(store.clone(), config.menu_table(), config.parse_policy);
        let ledger = BillingLedger::new(store.clone(), config.bills_table(), config.parse_policy);
        Self {
            config,
            store,
            menu,
            ledger,
            started_at: Instant::now(),
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 在工作目录下打开 CSV 表存储
    /// 2. 确保菜单表和账单表存在 (只含表头)
    /// 3. 检查 index.html 是否存在
    pub fn initialize(config: &Config) -> LedgerResult<Self> {
        let store: Arc<dyn TableStore> = Arc::new(CsvTableStore::new(config.work_dir_path()));
        let state = Self::with_store(config.clone(), store);

        state.menu.ensure_table()?;
        state.ledger.ensure_table()?;

        if !config.index_path().exists() {
            tracing::warn!(
                path = %config.index_path().display(),
                "Missing index.html, the built-in placeholder page will be served"
            );
        }

        tracing::info!(
            work_dir = %config.work_dir,
            menu = %config.menu_file,
            bills = %config.bills_file,
            policy = %config.parse_policy,
            "Server state initialized"
        );
        Ok(state)
    }

    /// 运行时间 (秒)
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
