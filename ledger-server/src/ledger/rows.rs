//! 账单 ↔ 账本行 转换
//!
//! 一张账单的每个明细项对应一行，账单头字段 (时间、合计、支付方式、桌台)
//! 冗余写入每一行。读取时按账单号把行重新聚合为账单。

use std::collections::HashMap;

use rust_decimal::Decimal;
use shared::models::{Bill, LineItem};

use super::timestamp::parse_timestamp;
use crate::store::Row;
use crate::utils::parse::{bill_no_from_text, decimal_from_text, qty_from_text};
use crate::utils::time::format_timestamp;

// 列序号 (与 BILLS_HEADER 一致)
const COL_BILL_NO: usize = 0;
const COL_DATE_TIME: usize = 1;
const COL_ITEM_NAME: usize = 2;
const COL_QTY: usize = 3;
const COL_RATE: usize = 4;
const COL_AMOUNT: usize = 5;
const COL_TOTAL: usize = 6;
const COL_PAYMENT: usize = 7;
const COL_TABLE: usize = 8;
const COLUMNS: usize = 9;

/// 账单 → 账本行 (每个明细一行)
pub fn flatten(bill: &Bill) -> Vec<Row> {
    let bill_no = bill.bill_no.to_string();
    let date_time = bill.date_time.map(format_timestamp).unwrap_or_default();
    let total = bill.total.to_string();

    bill.items
        .iter()
        .map(|item| {
            vec![
                bill_no.clone(),
                date_time.clone(),
                item.name.clone(),
                item.qty.to_string(),
                item.rate.to_string(),
                item.amount.to_string(),
                total.clone(),
                bill.payment.clone(),
                bill.table.clone(),
            ]
        })
        .collect()
}

/// 账本行 → 账单，按账单号首次出现的顺序返回
///
/// 账单号不是正整数的行在读取时被拒绝 (跳过并记录日志)。
/// 同一账单号的多次提交会合并成一个聚合。
pub fn group(rows: Vec<Row>) -> Vec<Bill> {
    let mut bills: Vec<Bill> = Vec::new();
    let mut index: HashMap<u64, usize> = HashMap::new();

    for (line, mut row) in rows.into_iter().enumerate() {
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        if row.len() < COLUMNS {
            row.resize(COLUMNS, String::new());
        }

        let Some(bill_no) = bill_no_from_text(&row[COL_BILL_NO]) else {
            tracing::warn!(
                line = line + 2,
                bill_no = %row[COL_BILL_NO],
                "Skipping ledger row with invalid bill number"
            );
            continue;
        };

        let item = LineItem {
            name: row[COL_ITEM_NAME].clone(),
            qty: cell_qty(&row[COL_QTY], line),
            rate: cell_decimal(&row[COL_RATE], "rate", line),
            amount: cell_decimal(&row[COL_AMOUNT], "amount", line),
        };

        let pos = *index.entry(bill_no).or_insert_with(|| {
            bills.push(Bill {
                bill_no,
                date_time: parse_timestamp(&row[COL_DATE_TIME]),
                table: row[COL_TABLE].clone(),
                payment: row[COL_PAYMENT].clone(),
                total: cell_decimal(&row[COL_TOTAL], "total", line),
                items: Vec::new(),
            });
            bills.len() - 1
        });
        bills[pos].items.push(item);
    }

    bills
}

fn cell_decimal(cell: &str, column: &'static str, line: usize) -> Decimal {
    if cell.trim().is_empty() {
        return Decimal::ZERO;
    }
    decimal_from_text(cell).unwrap_or_else(|| {
        tracing::warn!(line = line + 2, column, value = %cell, "Non-numeric ledger cell, using 0");
        Decimal::ZERO
    })
}

fn cell_qty(cell: &str, line: usize) -> u32 {
    if cell.trim().is_empty() {
        return 0;
    }
    qty_from_text(cell).unwrap_or_else(|| {
        tracing::warn!(line = line + 2, value = %cell, "Invalid ledger qty, using 0");
        0
    })
}

/// 所有行中最大的有效账单号 (无则为 0)
pub fn max_bill_no(rows: &[Row]) -> u64 {
    rows.iter()
        .filter_map(|row| row.get(COL_BILL_NO))
        .filter_map(|cell| bill_no_from_text(cell))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn sample_bill() -> Bill {
        Bill {
            bill_no: 42,
            date_time: NaiveDateTime::parse_from_str("2024-05-01T12:00:00", "%Y-%m-%dT%H:%M:%S")
                .ok(),
            table: "Outside 1".to_string(),
            payment: "UPI".to_string(),
            total: Decimal::new(5050, 2),
            items: vec![
                LineItem {
                    name: "Tea".to_string(),
                    qty: 2,
                    rate: Decimal::new(1000, 2),
                    amount: Decimal::new(2000, 2),
                },
                LineItem {
                    name: "Samosa".to_string(),
                    qty: 1,
                    rate: Decimal::new(3050, 2),
                    // 前端给的金额，和 qty × rate 无关
                    amount: Decimal::new(3050, 2),
                },
            ],
        }
    }

    #[test]
    fn test_flatten_denormalizes_header() {
        let rows = flatten(&sample_bill());
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            row(&[
                "42",
                "2024-05-01T12:00:00",
                "Tea",
                "2",
                "10.00",
                "20.00",
                "50.50",
                "UPI",
                "Outside 1"
            ])
        );
        assert_eq!(rows[1][0], "42");
        assert_eq!(rows[1][6], "50.50");
        assert_eq!(rows[1][8], "Outside 1");
    }

    #[test]
    fn test_group_reconstructs_bill() {
        let bill = sample_bill();
        let bills = group(flatten(&bill));
        assert_eq!(bills, vec![bill]);
    }

    #[test]
    fn test_group_merges_same_bill_no_in_first_seen_order() {
        let rows = vec![
            row(&["7", "2024-05-01T10:00:00", "Tea", "1", "10", "10", "10", "Cash", "Inside 1"]),
            row(&["3", "2024-05-01T10:05:00", "Coffee", "1", "20", "20", "20", "Card", "Inside 2"]),
            row(&["7", "2024-05-01T10:10:00", "Bun", "2", "5", "10", "10", "UPI", "Inside 3"]),
        ];
        let bills = group(rows);
        assert_eq!(bills.len(), 2);
        assert_eq!(bills[0].bill_no, 7);
        assert_eq!(bills[1].bill_no, 3);

        // 头字段取自第一行
        assert_eq!(bills[0].payment, "Cash");
        let names: Vec<&str> = bills[0].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Tea", "Bun"]);
    }

    #[test]
    fn test_group_rejects_non_numeric_bill_no() {
        let rows = vec![
            row(&["None", "2024-05-01T10:00:00", "Ghost"]),
            row(&["", "", ""]),
            row(&["abc", "2024-05-01T10:00:00", "Ghost"]),
            row(&["1", "2024-05-01T10:00:00", "Tea"]),
        ];
        let bills = group(rows);
        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].items[0].name, "Tea");
    }

    #[test]
    fn test_group_tolerates_short_and_malformed_rows() {
        let rows = vec![row(&["5", "garbage", "Tea", "two", "x"])];
        let bills = group(rows);
        assert_eq!(bills.len(), 1);
        let bill = &bills[0];
        assert_eq!(bill.date_time, None);
        assert_eq!(bill.table, "");
        assert_eq!(bill.total, Decimal::ZERO);
        assert_eq!(bill.items[0].qty, 0);
        assert_eq!(bill.items[0].rate, Decimal::ZERO);
    }

    #[test]
    fn test_max_bill_no() {
        assert_eq!(max_bill_no(&[]), 0);
        let rows = vec![row(&["2"]), row(&["oops"]), row(&["5"]), row(&["3"]), vec![]];
        assert_eq!(max_bill_no(&rows), 5);
    }
}
