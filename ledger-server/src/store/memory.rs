//! 内存表存储
//!
//! 不落盘，进程退出即丢失。用于测试和临时演示。

use std::collections::HashMap;

use parking_lot::RwLock;

use super::{Row, StoreResult, TableSpec, TableStore, encode_csv};

/// In-memory table store
#[derive(Debug, Default)]
pub struct MemoryTableStore {
    tables: RwLock<HashMap<String, Vec<Row>>>,
}

impl MemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 表是否已创建
    pub fn contains(&self, table: &TableSpec) -> bool {
        self.tables.read().contains_key(&table.file_name)
    }
}

impl TableStore for MemoryTableStore {
    fn ensure(&self, table: &TableSpec) -> StoreResult<()> {
        self.tables
            .write()
            .entry(table.file_name.clone())
            .or_default();
        Ok(())
    }

    fn read_all(&self, table: &TableSpec) -> StoreResult<Vec<Row>> {
        self.ensure(table)?;
        Ok(self
            .tables
            .read()
            .get(&table.file_name)
            .cloned()
            .unwrap_or_default())
    }

    fn append_rows(&self, table: &TableSpec, rows: &[Row]) -> StoreResult<()> {
        // 单次持锁完成追加，读者看不到中间状态
        self.tables
            .write()
            .entry(table.file_name.clone())
            .or_default()
            .extend_from_slice(rows);
        Ok(())
    }

    fn rewrite_all(&self, table: &TableSpec, rows: &[Row]) -> StoreResult<()> {
        self.tables
            .write()
            .insert(table.file_name.clone(), rows.to_vec());
        Ok(())
    }

    fn export(&self, table: &TableSpec) -> StoreResult<Vec<u8>> {
        let rows = self.read_all(table)?;
        encode_csv(table, &rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_lifecycle() {
        let store = MemoryTableStore::new();
        let table = TableSpec::menu("menu.csv");
        assert!(!store.contains(&table));

        assert!(store.read_all(&table).unwrap().is_empty());
        assert!(store.contains(&table));

        store
            .append_rows(&table, &[vec!["Drinks".into(), "Tea".into(), "10".into()]])
            .unwrap();
        assert_eq!(store.read_all(&table).unwrap().len(), 1);

        store.rewrite_all(&table, &[]).unwrap();
        assert!(store.read_all(&table).unwrap().is_empty());
        assert_eq!(store.export(&table).unwrap(), b"Category,Item Name,Price\n");
    }
}
