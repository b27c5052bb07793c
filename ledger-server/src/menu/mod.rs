//! 菜单目录 - 分类 → 菜品列表
//!
//! 菜单表每行是 (分类, 菜名, 价格)。读取时整理为有序映射，
//! 新增时在内存中追加后整表重写。

use std::sync::Arc;

use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde_json::Value;
use shared::models::{MenuCatalog, MenuEntry, MenuItem, normalize_category};

use crate::core::{LedgerError, LedgerResult};
use crate::store::{Row, TableSpec, TableStore};
use crate::utils::parse::{ParsePolicy, decimal_from_json, decimal_from_text};

/// Menu catalog over a [`TableStore`]
#[derive(Clone)]
pub struct MenuService {
    store: Arc<dyn TableStore>,
    table: TableSpec,
    policy: ParsePolicy,
    write_lock: Arc<Mutex<()>>,
}

impl std::fmt::Debug for MenuService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuService")
            .field("table", &self.table)
            .field("policy", &self.policy)
            .finish()
    }
}

impl MenuService {
    pub fn new(store: Arc<dyn TableStore>, table: TableSpec, policy: ParsePolicy) -> Self {
        Self {
            store,
            table,
            policy,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn table(&self) -> &TableSpec {
        &self.table
    }

    /// 确保菜单表存在
    pub fn ensure_table(&self) -> LedgerResult<()> {
        Ok(self.store.ensure(&self.table)?)
    }

    /// 读取完整菜单
    ///
    /// 菜名为空或价格非数字的行被静默丢弃，空价格按 0 处理，空分类归入默认分类。
    pub fn get(&self) -> LedgerResult<MenuCatalog> {
        let rows = self.store.read_all(&self.table)?;
        let mut catalog = MenuCatalog::new();
        for row in &rows {
            if let Some((category, item)) = parse_row(row) {
                catalog.entry(category).or_default().push(item);
            }
        }
        Ok(catalog)
    }

    /// 新增菜品并整表重写
    ///
    /// - 菜名去空白后为空 → [`LedgerError::MissingName`]
    /// - 价格缺省 → 0
    /// - 价格非数字 → 宽松模式下为 0，严格模式下报错
    /// - 价格为负 → 报错
    pub fn add_item(
        &self,
        category: &str,
        name: &str,
        price: Option<&Value>,
    ) -> LedgerResult<MenuEntry> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::MissingName);
        }
        let price = self.coerce_price(price)?;
        let category = normalize_category(category);

        let _guard = self.write_lock.lock();
        let mut catalog = self.get()?;
        catalog.entry(category.clone()).or_default().push(MenuItem {
            name: name.to_string(),
            price,
        });
        self.store.rewrite_all(&self.table, &to_rows(&catalog))?;

        tracing::info!(category = %category, name = %name, price = %price, "Menu item added");
        Ok(MenuEntry {
            category,
            name: name.to_string(),
            price,
        })
    }

    fn coerce_price(&self, price: Option<&Value>) -> LedgerResult<Decimal> {
        let value = match price {
            None | Some(Value::Null) => return Ok(Decimal::ZERO),
            Some(value) => value,
        };
        let parsed = match decimal_from_json(value) {
            Some(p) => p,
            None => match self.policy {
                ParsePolicy::UseDefault => {
                    tracing::warn!(raw = %value, "Non-numeric menu price, using 0");
                    Decimal::ZERO
                }
                ParsePolicy::Reject => return Err(LedgerError::InvalidPrice(value.to_string())),
            },
        };
        if parsed.is_sign_negative() && !parsed.is_zero() {
            return Err(LedgerError::InvalidPrice(parsed.to_string()));
        }
        Ok(parsed)
    }
}

fn parse_row(row: &Row) -> Option<(String, MenuItem)> {
    let cell = |idx: usize| row.get(idx).map(|c| c.trim()).unwrap_or("");
    let name = cell(1);
    if name.is_empty() {
        return None;
    }
    let price = match cell(2) {
        "" => Decimal::ZERO,
        text => decimal_from_text(text)?,
    };
    Some((
        normalize_category(cell(0)),
        MenuItem {
            name: name.to_string(),
            price,
        },
    ))
}

fn to_rows(catalog: &MenuCatalog) -> Vec<Row> {
    catalog
        .iter()
        .flat_map(|(category, items)| {
            items
                .iter()
                .map(move |item| vec![category.clone(), item.name.clone(), item.price.to_string()])
        })
        .collect()
}
