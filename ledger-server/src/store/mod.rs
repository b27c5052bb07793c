//! 表存储层 - 行式表抽象
//!
//! # 表结构
//!
//! | Table | File | Header |
//! |-------|------|--------|
//! | `menu` | `menu.csv` | Category, Item Name, Price |
//! | `bills` | `bills.csv` | Bill No, Date & Time, Item Name, Qty, Rate, Amount, Total, Payment Method, Table |
//!
//! # 写入语义
//!
//! 每次写入都把整张表读入内存、修改后写到同目录的临时文件，再原子替换。
//! 读者要么看到旧表，要么看到新表，不会看到写了一半的行。
//! 本层不协调多个写者，串行化由上层负责。

pub mod csv;
pub mod memory;

pub use self::csv::CsvTableStore;
pub use self::memory::MemoryTableStore;

use thiserror::Error;

/// 一行数据 (按列顺序的文本单元格)
pub type Row = Vec<String>;

/// 静态表描述: 逻辑名、文件名、表头
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub name: &'static str,
    pub file_name: String,
    pub header: &'static [&'static str],
}

pub const MENU_HEADER: &[&str] = &["Category", "Item Name", "Price"];

pub const BILLS_HEADER: &[&str] = &[
    "Bill No",
    "Date & Time",
    "Item Name",
    "Qty",
    "Rate",
    "Amount",
    "Total",
    "Payment Method",
    "Table",
];

impl TableSpec {
    /// 菜单表
    pub fn menu(file_name: impl Into<String>) -> Self {
        Self {
            name: "menu",
            file_name: file_name.into(),
            header: MENU_HEADER,
        }
    }

    /// 账单表
    pub fn bills(file_name: impl Into<String>) -> Self {
        Self {
            name: "bills",
            file_name: file_name.into(),
            header: BILLS_HEADER,
        }
    }

    /// 表头行
    pub fn header_row(&self) -> Row {
        self.header.iter().map(|h| h.to_string()).collect()
    }
}

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("Failed to replace table file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("CSV writer error: {0}")]
    IntoInner(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// 行式表存储
///
/// 所有方法都是同步且有界的 (最多一次全表扫描)。
/// 实现必须保证 `append_rows` / `rewrite_all` 对读者是全有或全无的。
pub trait TableStore: Send + Sync {
    /// 表不存在时创建只含表头的空表
    fn ensure(&self, table: &TableSpec) -> StoreResult<()>;

    /// 读取全部数据行 (不含表头)，按追加顺序
    fn read_all(&self, table: &TableSpec) -> StoreResult<Vec<Row>>;

    /// 批量追加行
    fn append_rows(&self, table: &TableSpec, rows: &[Row]) -> StoreResult<()>;

    /// 用给定行整体替换表内容 (表头保持不变)
    fn rewrite_all(&self, table: &TableSpec, rows: &[Row]) -> StoreResult<()>;

    /// 导出表的原始字节 (用于下载)
    fn export(&self, table: &TableSpec) -> StoreResult<Vec<u8>>;
}

/// 把行序列编码为 CSV 字节 (含表头)
pub(crate) fn encode_csv(table: &TableSpec, rows: &[Row]) -> StoreResult<Vec<u8>> {
    let mut writer = ::csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(vec![]);
    writer.write_record(table.header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| StoreError::IntoInner(e.to_string()))
}

/// 从 CSV 字节解码数据行 (跳过表头)
pub(crate) fn decode_csv(bytes: &[u8]) -> StoreResult<Vec<Row>> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_encode_decode_keeps_quoted_cells() {
        let table = TableSpec::menu("menu.csv");
        let rows = vec![
            row(&["Drinks", "Tea, masala", "12.5"]),
            row(&["Snacks", "Samosa \"large\"", "20"]),
        ];
        let bytes = encode_csv(&table, &rows).unwrap();
        assert!(bytes.starts_with(b"Category,Item Name,Price\n"));
        assert_eq!(decode_csv(&bytes).unwrap(), rows);
    }

    #[test]
    fn test_decode_allows_short_rows() {
        let bytes = b"Category,Item Name,Price\nDrinks,Tea\n";
        let rows = decode_csv(bytes).unwrap();
        assert_eq!(rows, vec![row(&["Drinks", "Tea"])]);
    }

    #[test]
    fn test_header_only_table_is_empty() {
        let bytes = encode_csv(&TableSpec::bills("bills.csv"), &[]).unwrap();
        assert!(decode_csv(&bytes).unwrap().is_empty());
    }
}
