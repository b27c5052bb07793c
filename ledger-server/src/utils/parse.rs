//! 宽松解析工具 - 价格/数量/账单号的文本与 JSON 转换
//!
//! 解析失败时的处理由 [`ParsePolicy`] 决定:
//! `UseDefault` 回退到安全默认值 (当前时间 / 0)，`Reject` 直接报错。

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde_json::Value;

/// 解析失败策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParsePolicy {
    /// 回退到默认值 (当前时间 / 零价格)，记录 warn 日志
    #[default]
    UseDefault,
    /// 作为验证错误返回给调用方
    Reject,
}

impl FromStr for ParsePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" | "default" | "use_default" => Ok(ParsePolicy::UseDefault),
            "strict" | "reject" => Ok(ParsePolicy::Reject),
            other => Err(format!("unknown parse policy: {other}")),
        }
    }
}

impl fmt::Display for ParsePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsePolicy::UseDefault => write!(f, "lenient"),
            ParsePolicy::Reject => write!(f, "strict"),
        }
    }
}

/// 文本 → Decimal，支持科学计数法，前后空白忽略
pub fn decimal_from_text(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// JSON 值 → Decimal (数字或数字字符串)
pub fn decimal_from_json(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(Decimal::from(i)),
            None => n.as_f64().and_then(Decimal::from_f64),
        },
        Value::String(s) => decimal_from_text(s),
        _ => None,
    }
}

/// 单元格 → 正整数账单号
///
/// 接受 `12` 和整数值的小数写法 `12.0`，其余 (空、负数、0、非数字) 返回 `None`。
pub fn bill_no_from_text(text: &str) -> Option<u64> {
    let text = text.trim();
    if let Ok(n) = text.parse::<u64>() {
        return (n > 0).then_some(n);
    }
    let d = decimal_from_text(text)?;
    if d.fract().is_zero() && d > Decimal::ZERO {
        d.to_u64()
    } else {
        None
    }
}

/// 单元格 → 非负整数数量
pub fn qty_from_text(text: &str) -> Option<u32> {
    let text = text.trim();
    text.parse::<u32>().ok().or_else(|| {
        let d = decimal_from_text(text)?;
        if d.fract().is_zero() && d >= Decimal::ZERO {
            d.to_u32()
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_policy_from_str() {
        assert_eq!("lenient".parse::<ParsePolicy>(), Ok(ParsePolicy::UseDefault));
        assert_eq!("STRICT".parse::<ParsePolicy>(), Ok(ParsePolicy::Reject));
        assert!("sometimes".parse::<ParsePolicy>().is_err());
    }

    #[test]
    fn test_decimal_from_json() {
        assert_eq!(decimal_from_json(&json!(10)), Some(Decimal::from(10)));
        assert_eq!(decimal_from_json(&json!(12.5)), Some(Decimal::new(125, 1)));
        assert_eq!(decimal_from_json(&json!(" 7.25 ")), Some(Decimal::new(725, 2)));
        assert_eq!(decimal_from_json(&json!("oops")), None);
        assert_eq!(decimal_from_json(&json!(null)), None);
        assert_eq!(decimal_from_json(&json!([1])), None);
    }

    #[test]
    fn test_decimal_from_text_scientific() {
        assert_eq!(decimal_from_text("1e2"), Some(Decimal::from(100)));
        assert_eq!(decimal_from_text(""), None);
    }

    #[test]
    fn test_bill_no_from_text() {
        assert_eq!(bill_no_from_text("12"), Some(12));
        assert_eq!(bill_no_from_text(" 5.0 "), Some(5));
        assert_eq!(bill_no_from_text("0"), None);
        assert_eq!(bill_no_from_text("-3"), None);
        assert_eq!(bill_no_from_text("2.5"), None);
        assert_eq!(bill_no_from_text("None"), None);
        assert_eq!(bill_no_from_text(""), None);
    }

    #[test]
    fn test_qty_from_text() {
        assert_eq!(qty_from_text("3"), Some(3));
        assert_eq!(qty_from_text("2.0"), Some(2));
        assert_eq!(qty_from_text("abc"), None);
    }
}
