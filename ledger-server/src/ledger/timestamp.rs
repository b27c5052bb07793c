//! 账单时间戳归一化
//!
//! 输入可能是结构化时间，也可能是前端传来的各种 ISO-8601 文本
//! (`Z` 结尾、带毫秒、带时区偏移、只有日期...)。
//! 统一转换为秒级精度的本地 naive 时间，时区信息直接丢弃。

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::core::{LedgerError, LedgerResult};
use crate::utils::parse::ParsePolicy;
use crate::utils::time::{STORAGE_FORMAT, truncate_to_seconds};

/// 清洗后依次尝试的 ISO 格式
const ISO_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// 账单时间输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampInput {
    /// 已结构化的时间，直接使用
    At(NaiveDateTime),
    /// 待解析的文本
    Text(String),
}

impl From<NaiveDateTime> for TimestampInput {
    fn from(dt: NaiveDateTime) -> Self {
        TimestampInput::At(dt)
    }
}

impl From<&str> for TimestampInput {
    fn from(text: &str) -> Self {
        TimestampInput::Text(text.to_string())
    }
}

/// 去掉 `Z`、小数秒和时区偏移后缀
fn strip_suffixes(raw: &str) -> String {
    let mut cleaned: String = raw.trim().chars().filter(|c| *c != 'Z' && *c != 'z').collect();
    if let Some(idx) = cleaned.find('.') {
        cleaned.truncate(idx);
    }
    if let Some(idx) = cleaned.find('+') {
        cleaned.truncate(idx);
    }
    // 日期部分本身带 '-'，只有时间部分之后的 '-' 才是负偏移
    if let Some(idx) = cleaned.rfind('-')
        && idx > 10
    {
        cleaned.truncate(idx);
    }
    cleaned
}

/// 解析文本时间戳，失败返回 `None`
///
/// 顺序: RFC 3339 (保留墙上时间，丢弃偏移) → 清洗后的 ISO 格式
/// → 纯日期 (当天零点) → 原文按固定格式 `%Y-%m-%dT%H:%M:%S`。
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(truncate_to_seconds(dt.naive_local()));
    }

    let cleaned = strip_suffixes(raw);
    ISO_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&cleaned, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(&cleaned, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .or_else(|| NaiveDateTime::parse_from_str(raw, STORAGE_FORMAT).ok())
        .map(truncate_to_seconds)
}

/// 追加账单时的时间归一化
///
/// - 缺省或空文本 → `now`
/// - 结构化时间 → 原样 (截断到秒)
/// - 文本 → [`parse_timestamp`]，失败时按策略回退到 `now` 或报错
pub fn normalize(
    input: Option<&TimestampInput>,
    policy: ParsePolicy,
    now: NaiveDateTime,
) -> LedgerResult<NaiveDateTime> {
    let now = truncate_to_seconds(now);
    match input {
        None => Ok(now),
        Some(TimestampInput::At(dt)) => Ok(truncate_to_seconds(*dt)),
        Some(TimestampInput::Text(text)) if text.trim().is_empty() => Ok(now),
        Some(TimestampInput::Text(text)) => match parse_timestamp(text) {
            Some(dt) => Ok(dt),
            None => match policy {
                ParsePolicy::UseDefault => {
                    tracing::warn!(raw = %text, "Unparseable bill timestamp, using current time");
                    Ok(now)
                }
                ParsePolicy::Reject => Err(LedgerError::InvalidTimestamp(text.clone())),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, STORAGE_FORMAT).unwrap()
    }

    #[test]
    fn test_parse_plain_iso() {
        assert_eq!(parse_timestamp("2024-05-01T10:15:30"), Some(dt("2024-05-01T10:15:30")));
        assert_eq!(parse_timestamp("2024-05-01 10:15:30"), Some(dt("2024-05-01T10:15:30")));
        assert_eq!(parse_timestamp("2024-05-01T10:15"), Some(dt("2024-05-01T10:15:00")));
    }

    #[test]
    fn test_parse_browser_utc_string() {
        // JS Date.toISOString()
        assert_eq!(
            parse_timestamp("2024-05-01T10:15:30.123Z"),
            Some(dt("2024-05-01T10:15:30"))
        );
    }

    #[test]
    fn test_parse_discards_offset_keeps_wall_clock() {
        assert_eq!(
            parse_timestamp("2024-05-01T10:15:30+05:30"),
            Some(dt("2024-05-01T10:15:30"))
        );
        assert_eq!(
            parse_timestamp("2024-05-01T10:15:30.5-04:00"),
            Some(dt("2024-05-01T10:15:30"))
        );
        assert_eq!(
            parse_timestamp("2024-05-01 10:15:30+0530"),
            Some(dt("2024-05-01T10:15:30"))
        );
    }

    #[test]
    fn test_parse_date_only_is_midnight() {
        assert_eq!(parse_timestamp("2024-05-01"), Some(dt("2024-05-01T00:00:00")));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_timestamp("not-a-date"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2024-13-01T00:00:00"), None);
    }

    #[test]
    fn test_normalize_absent_uses_now() {
        let now = dt("2024-05-01T08:00:00");
        assert_eq!(normalize(None, ParsePolicy::Reject, now).unwrap(), now);
        let blank = TimestampInput::from("  ");
        assert_eq!(normalize(Some(&blank), ParsePolicy::Reject, now).unwrap(), now);
    }

    #[test]
    fn test_normalize_structured_is_used_directly() {
        let now = dt("2024-05-01T08:00:00");
        let at = TimestampInput::from(dt("2023-12-31T23:59:59"));
        assert_eq!(
            normalize(Some(&at), ParsePolicy::UseDefault, now).unwrap(),
            dt("2023-12-31T23:59:59")
        );
    }

    #[test]
    fn test_normalize_policy_on_garbage() {
        let now = dt("2024-05-01T08:00:00");
        let bad = TimestampInput::from("not-a-date");
        assert_eq!(normalize(Some(&bad), ParsePolicy::UseDefault, now).unwrap(), now);
        assert!(matches!(
            normalize(Some(&bad), ParsePolicy::Reject, now),
            Err(LedgerError::InvalidTimestamp(_))
        ));
    }
}
