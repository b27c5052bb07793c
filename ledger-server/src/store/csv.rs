//! CSV 文件表存储
//!
//! 每张表对应工作目录下的一个 CSV 文件。写入流程:
//! 读全表 → 内存修改 → 写同目录临时文件 → rename 覆盖。

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use super::{Row, StoreResult, TableSpec, TableStore, decode_csv, encode_csv};

/// CSV file backed table store
#[derive(Debug, Clone)]
pub struct CsvTableStore {
    dir: PathBuf,
}

impl CsvTableStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// 表文件完整路径
    pub fn path_of(&self, table: &TableSpec) -> PathBuf {
        self.dir.join(&table.file_name)
    }

    /// Atomic write: tmp file + rename
    fn write_table(&self, table: &TableSpec, rows: &[Row]) -> StoreResult<()> {
        fs::create_dir_all(&self.dir)?;
        let bytes = encode_csv(table, rows)?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.path_of(table))?;

        tracing::debug!(
            table = table.name,
            rows = rows.len(),
            bytes = bytes.len(),
            "Table file replaced"
        );
        Ok(())
    }
}

impl TableStore for CsvTableStore {
    fn ensure(&self, table: &TableSpec) -> StoreResult<()> {
        if self.path_of(table).exists() {
            return Ok(());
        }
        tracing::info!(table = table.name, path = %self.path_of(table).display(), "Creating table file");
        self.write_table(table, &[])
    }

    fn read_all(&self, table: &TableSpec) -> StoreResult<Vec<Row>> {
        self.ensure(table)?;
        let bytes = fs::read(self.path_of(table))?;
        decode_csv(&bytes)
    }

    fn append_rows(&self, table: &TableSpec, rows: &[Row]) -> StoreResult<()> {
        let mut all = self.read_all(table)?;
        all.extend_from_slice(rows);
        self.write_table(table, &all)
    }

    fn rewrite_all(&self, table: &TableSpec, rows: &[Row]) -> StoreResult<()> {
        self.write_table(table, rows)
    }

    fn export(&self, table: &TableSpec) -> StoreResult<Vec<u8>> {
        self.ensure(table)?;
        Ok(fs::read(self.path_of(table))?)
    }
}
