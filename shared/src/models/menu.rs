//! Menu Model

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 未填写分类时使用的默认分类名
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Menu item entity
///
/// 没有独立 ID，只由所在分类列表中的位置标识，允许重名。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// 分类名 → 有序菜品列表
pub type MenuCatalog = BTreeMap<String, Vec<MenuItem>>;

/// Create menu item payload
///
/// `price` 保持原始 JSON 值，由服务端按解析策略转换。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemCreate {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Option<serde_json::Value>,
}

/// 新增菜品后返回的完整条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub category: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Blank category → [`DEFAULT_CATEGORY`]
pub fn normalize_category(category: &str) -> String {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        DEFAULT_CATEGORY.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_category() {
        assert_eq!(normalize_category(""), DEFAULT_CATEGORY);
        assert_eq!(normalize_category("   "), DEFAULT_CATEGORY);
        assert_eq!(normalize_category(" Drinks "), "Drinks");
    }

    #[test]
    fn test_menu_item_price_serializes_as_number() {
        let item = MenuItem {
            name: "Tea".to_string(),
            price: Decimal::new(1250, 2),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["price"], serde_json::json!(12.5));
    }

    #[test]
    fn test_create_payload_defaults() {
        let payload: MenuItemCreate = serde_json::from_str(r#"{"name":"Tea"}"#).unwrap();
        assert_eq!(payload.category, "");
        assert!(payload.price.is_none());
    }
}
