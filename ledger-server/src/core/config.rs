use std::path::PathBuf;

use crate::store::TableSpec;
use crate::utils::parse::ParsePolicy;

/// 默认桌台标签 (前端展示用，账本把 table 当作不透明字符串)
pub const DEFAULT_TABLE_LABELS: &[&str] = &[
    "Outside 1",
    "Outside 2",
    "Swiggy",
    "Inside 1",
    "Inside 2",
    "Inside 3",
    "Last 1",
    "Last 2",
];

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | . | 工作目录 (表文件、index.html) |
/// | BIND_ADDR | 127.0.0.1 | 监听地址 |
/// | HTTP_PORT | 5000 | HTTP 服务端口 |
/// | MENU_FILE | menu.csv | 菜单表文件名 |
/// | BILLS_FILE | bills.csv | 账单表文件名 |
/// | PARSE_POLICY | lenient | 解析失败策略: lenient / strict |
/// | TABLE_LABELS | Outside 1,... | 桌台标签，逗号分隔 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (空) | 日志文件目录，不设置则只输出到终端 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/pos HTTP_PORT=8080 PARSE_POLICY=strict cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    /// 监听地址
    pub bind_addr: String,
    /// HTTP 服务端口
    pub http_port: u16,
    /// 菜单表文件名
    pub menu_file: String,
    /// 账单表文件名
    pub bills_file: String,
    /// 时间/价格解析失败时的策略
    pub parse_policy: ParsePolicy,
    /// 桌台标签
    pub table_labels: Vec<String>,
    /// 日志级别
    pub log_level: String,
    /// 日志文件目录
    pub log_dir: Option<String>,
    /// 运行环境: development | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| ".".into()),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            menu_file: std::env::var("MENU_FILE").unwrap_or_else(|_| "menu.csv".into()),
            bills_file: std::env::var("BILLS_FILE").unwrap_or_else(|_| "bills.csv".into()),
            parse_policy: std::env::var("PARSE_POLICY")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or_default(),
            table_labels: std::env::var("TABLE_LABELS")
                .ok()
                .map(|v| parse_labels(&v))
                .filter(|labels| !labels.is_empty())
                .unwrap_or_else(default_table_labels),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 工作目录路径
    pub fn work_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir)
    }

    /// index.html 路径
    pub fn index_path(&self) -> PathBuf {
        self.work_dir_path().join("index.html")
    }

    /// 菜单表描述
    pub fn menu_table(&self) -> TableSpec {
        TableSpec::menu(self.menu_file.clone())
    }

    /// 账单表描述
    pub fn bills_table(&self) -> TableSpec {
        TableSpec::bills(self.bills_file.clone())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn default_table_labels() -> Vec<String> {
    DEFAULT_TABLE_LABELS.iter().map(|s| s.to_string()).collect()
}

fn parse_labels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
