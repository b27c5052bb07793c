//! 账单账本 - 编号分配、行展开/聚合、时间归一化、区间过滤
//!
//! # 存储模型
//!
//! 账本是只追加的扁平表，每行 = 账单头 + 一个明细项:
//!
//! ```text
//! Bill No | Date & Time | Item Name | Qty | Rate | Amount | Total | Payment Method | Table
//! ```
//!
//! # 账单号
//!
//! `next_bill_number() = max(已有账单号, 0) + 1`，每次全表扫描，没有持久化计数器。
//! 进程内的写操作由 `write_lock` 串行化，自动编号不会重复；
//! 但前端先取号再提交的两个终端仍可能使用同一个号，读取时它们的行会合并为一张账单。
//!
//! # 时间
//!
//! 追加时无法解析的时间按 [`ParsePolicy`] 处理 (默认回退到当前时间)；
//! 读取过滤时无法解析的时间会让该账单被直接丢弃。

pub mod rows;
pub mod timestamp;

pub use timestamp::{TimestampInput, normalize, parse_timestamp};

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDateTime};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde_json::Value;
use shared::models::{Bill, BillCreate, LineItem};

use crate::core::{LedgerError, LedgerResult};
use crate::store::{TableSpec, TableStore};
use crate::utils::parse::{ParsePolicy, bill_no_from_text};
use crate::utils::time::{now_local, today_bounds};

/// 待入账的账单
///
/// `bill_no` / `date_time` 缺省时由账本补全。
#[derive(Debug, Clone, Default)]
pub struct BillDraft {
    pub bill_no: Option<u64>,
    pub date_time: Option<TimestampInput>,
    pub table: String,
    pub payment: String,
    pub total: Decimal,
    pub items: Vec<LineItem>,
}

impl TryFrom<BillCreate> for BillDraft {
    type Error = LedgerError;

    fn try_from(payload: BillCreate) -> LedgerResult<Self> {
        Ok(Self {
            bill_no: bill_no_from_json(payload.bill_no.as_ref())?,
            date_time: timestamp_from_json(payload.date_time.as_ref()),
            table: payload.table,
            payment: payload.payment,
            total: payload.total,
            items: items_from_json(payload.items)?,
        })
    }
}

/// 空值 (null / false / 0 / "") 视为未提供
fn bill_no_from_json(value: Option<&Value>) -> LedgerResult<Option<u64>> {
    let Some(value) = value else {
        return Ok(None);
    };
    match value {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::Number(n) if n.as_f64() == Some(0.0) => Ok(None),
        Value::Number(n) => bill_no_from_text(&n.to_string())
            .map(Some)
            .ok_or_else(|| LedgerError::InvalidBillNo(n.to_string())),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => bill_no_from_text(s)
            .map(Some)
            .ok_or_else(|| LedgerError::InvalidBillNo(s.clone())),
        other => Err(LedgerError::InvalidBillNo(other.to_string())),
    }
}

/// 数字按 Unix 毫秒处理，其余一律作为文本交给解析
fn timestamp_from_json(value: Option<&Value>) -> Option<TimestampInput> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(TimestampInput::Text(s.clone())),
        Value::Number(n) => Some(
            n.as_i64()
                .and_then(DateTime::from_timestamp_millis)
                .map(|dt| TimestampInput::At(dt.with_timezone(&Local).naive_local()))
                .unwrap_or_else(|| TimestampInput::Text(n.to_string())),
        ),
        other => Some(TimestampInput::Text(other.to_string())),
    }
}

/// 缺省 → 空列表；显式 null 或非列表 → [`LedgerError::InvalidItems`]
fn items_from_json(value: Option<Value>) -> LedgerResult<Vec<LineItem>> {
    match value {
        None => Ok(Vec::new()),
        Some(value @ Value::Array(_)) => serde_json::from_value(value)
            .map_err(|e| LedgerError::Validation(format!("Invalid line item: {e}"))),
        Some(_) => Err(LedgerError::InvalidItems),
    }
}

/// Billing ledger over a [`TableStore`]
#[derive(Clone)]
pub struct BillingLedger {
    store: Arc<dyn TableStore>,
    table: TableSpec,
    policy: ParsePolicy,
    write_lock: Arc<Mutex<()>>,
}

impl std::fmt::Debug for BillingLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BillingLedger")
            .field("table", &self.table)
            .field("policy", &self.policy)
            .finish()
    }
}

impl BillingLedger {
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

    pub fn policy(&self) -> ParsePolicy {
        self.policy
    }

    /// 确保账本表存在
    pub fn ensure_table(&self) -> LedgerResult<()> {
        Ok(self.store.ensure(&self.table)?)
    }

    /// 下一个账单号 = 最大账单号 + 1
    pub fn next_bill_number(&self) -> LedgerResult<u64> {
        let rows = self.store.read_all(&self.table)?;
        Ok(rows::max_bill_no(&rows) + 1)
    }

    /// 入账: 补全账单号和时间，每个明细展开为一行，整批追加
    pub fn record_bill(&self, draft: BillDraft) -> LedgerResult<Bill> {
        self.record_bill_at(draft, now_local())
    }

    /// 同 [`record_bill`](Self::record_bill)，`now` 由调用方提供
    pub fn record_bill_at(&self, draft: BillDraft, now: NaiveDateTime) -> LedgerResult<Bill> {
        let date_time = normalize(draft.date_time.as_ref(), self.policy, now)?;

        let _guard = self.write_lock.lock();
        let bill_no = match draft.bill_no {
            Some(n) => n,
            None => self.next_bill_number()?,
        };

        let bill = Bill {
            bill_no,
            date_time: Some(date_time),
            table: draft.table,
            payment: draft.payment,
            total: draft.total,
            items: draft.items,
        };

        let rows = rows::flatten(&bill);
        if rows.is_empty() {
            tracing::warn!(bill_no, "Bill has no items, nothing appended");
            return Ok(bill);
        }
        self.store.append_rows(&self.table, &rows)?;

        tracing::info!(
            bill_no,
            items = bill.items.len(),
            total = %bill.total,
            table = %bill.table,
            "Bill recorded"
        );
        Ok(bill)
    }

    /// 读取全部账单，按账单号首次出现顺序
    pub fn list_bills(&self) -> LedgerResult<Vec<Bill>> {
        let rows = self.store.read_all(&self.table)?;
        Ok(rows::group(rows))
    }

    /// 时间落在 `[start, end]` 闭区间内的账单
    ///
    /// 时间无法解析的账单被丢弃。
    pub fn list_bills_in_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> LedgerResult<Vec<Bill>> {
        let bills = self.list_bills()?;
        let total = bills.len();
        let filtered: Vec<Bill> = bills
            .into_iter()
            .filter(|bill| match bill.date_time {
                Some(dt) => start <= dt && dt <= end,
                None => {
                    tracing::debug!(bill_no = bill.bill_no, "Dropping bill with unparseable timestamp");
                    false
                }
            })
            .collect();
        tracing::debug!(total, kept = filtered.len(), %start, %end, "Bills filtered by range");
        Ok(filtered)
    }

    /// 今天 (本地 00:00:00 ~ 23:59:59.999999) 的账单
    pub fn list_today(&self) -> LedgerResult<Vec<Bill>> {
        let (start, end) = today_bounds();
        self.list_bills_in_range(start, end)
    }
}
