//! Bill Model

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::Value;

/// Bill line item
///
/// `amount` 由前端计算并原样保存，服务端不会用 qty × rate 重算。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_qty")]
    pub qty: u32,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub rate: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// 数量: 接受 `2`、`2.0`、`"2"`，null 视为 0；小数或负数报错
fn deserialize_qty<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let qty = match &value {
        Value::Null => Some(0),
        Value::Number(n) => whole_number(n.as_f64()),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u32>().ok().or_else(|| whole_number(s.parse::<f64>().ok()))
        }
        _ => None,
    };
    qty.ok_or_else(|| D::Error::custom(format!("invalid qty: {value}")))
}

fn whole_number(n: Option<f64>) -> Option<u32> {
    n.filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n <= u32::MAX as f64)
        .map(|n| n as u32)
}

/// Bill aggregate (header + line items)
///
/// 由共享同一 `bill_no` 的账本行重建而来。
/// `date_time` 仅在存储的时间戳无法解析时为 `None`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub bill_no: u64,
    pub date_time: Option<NaiveDateTime>,
    pub table: String,
    pub payment: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub items: Vec<LineItem>,
}

/// Create bill payload
///
/// `bill_no` / `date_time` / `items` 保留原始 JSON 值，
/// 缺省、类型校验由服务端完成。
///
/// `items` 区分字段缺省 (`None`) 与显式 `null` (`Some(Value::Null)`)。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillCreate {
    #[serde(default)]
    pub bill_no: Option<serde_json::Value>,
    #[serde(default)]
    pub date_time: Option<serde_json::Value>,
    #[serde(default)]
    pub table: String,
    #[serde(default)]
    pub payment: String,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub items: Option<Value>,
}

/// 字段出现即为 `Some`，包括 `null`
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Next bill number response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextBillNo {
    pub next: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bill_serializes_camel_case() {
        let bill = Bill {
            bill_no: 3,
            date_time: NaiveDateTime::parse_from_str("2024-05-01T12:30:00", "%Y-%m-%dT%H:%M:%S")
                .ok(),
            table: "Inside 1".to_string(),
            payment: "Cash".to_string(),
            total: Decimal::new(240, 0),
            items: vec![LineItem {
                name: "Tea".to_string(),
                qty: 2,
                rate: Decimal::new(120, 0),
                amount: Decimal::new(240, 0),
            }],
        };
        let value = serde_json::to_value(&bill).unwrap();
        assert_eq!(value["billNo"], 3);
        assert_eq!(value["dateTime"], "2024-05-01T12:30:00");
        assert_eq!(value["total"], json!(240.0));
        assert_eq!(value["items"][0]["qty"], 2);
    }

    #[test]
    fn test_line_item_defaults_missing_fields() {
        let item: LineItem = serde_json::from_value(json!({ "name": "Tea" })).unwrap();
        assert_eq!(item.qty, 0);
        assert_eq!(item.rate, Decimal::ZERO);
        assert_eq!(item.amount, Decimal::ZERO);
    }

    #[test]
    fn test_line_item_qty_is_tolerant() {
        for raw in [json!(2), json!(2.0), json!("2"), json!(" 2.0 ")] {
            let item: LineItem = serde_json::from_value(json!({ "name": "Tea", "qty": raw })).unwrap();
            assert_eq!(item.qty, 2);
        }
        let item: LineItem = serde_json::from_value(json!({ "name": "Tea", "qty": null })).unwrap();
        assert_eq!(item.qty, 0);
        for raw in [json!(2.5), json!(-1), json!("many"), json!([2])] {
            assert!(serde_json::from_value::<LineItem>(json!({ "qty": raw })).is_err());
        }
    }

    #[test]
    fn test_create_payload_distinguishes_null_items() {
        let missing: BillCreate = serde_json::from_value(json!({ "table": "Swiggy" })).unwrap();
        assert_eq!(missing.items, None);
        let null: BillCreate =
            serde_json::from_value(json!({ "table": "Swiggy", "items": null })).unwrap();
        assert_eq!(null.items, Some(Value::Null));
    }

    #[test]
    fn test_create_payload_keeps_raw_items() {
        let payload: BillCreate =
            serde_json::from_value(json!({ "table": "Swiggy", "items": "oops" })).unwrap();
        assert!(payload.bill_no.is_none());
        assert_eq!(payload.items, Some(json!("oops")));
        assert_eq!(payload.total, Decimal::ZERO);
    }
}
