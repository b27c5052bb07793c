//! 时间工具函数 — 本地时间与营业日边界
//!
//! 账本只保存不带时区的本地时间 (naive)，秒级精度。

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// 账本中时间戳的存储格式
pub const STORAGE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// 当前本地时间 (naive)
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// 今天 (本地)
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// 去掉秒以下的精度
pub fn truncate_to_seconds(dt: NaiveDateTime) -> NaiveDateTime {
    dt.with_nanosecond(0).unwrap_or(dt)
}

/// 格式化为存储格式
pub fn format_timestamp(dt: NaiveDateTime) -> String {
    dt.format(STORAGE_FORMAT).to_string()
}

/// 日期 → [00:00:00, 23:59:59.999999] 闭区间
pub fn day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_time(NaiveTime::MIN);
    let end = date.and_time(
        NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).unwrap_or(NaiveTime::MIN),
    );
    (start, end)
}

/// 今天的闭区间边界
pub fn today_bounds() -> (NaiveDateTime, NaiveDateTime) {
    day_bounds(today_local())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_bounds_inclusive() {
        let (start, end) = day_bounds(date(2024, 2, 29));
        assert_eq!(format_timestamp(start), "2024-02-29T00:00:00");
        assert_eq!(format_timestamp(end), "2024-02-29T23:59:59");
        assert_eq!(end.nanosecond(), 999_999_000);
        assert!(start < end);
    }

    #[test]
    fn test_truncate_to_seconds() {
        let dt = date(2024, 1, 1).and_hms_milli_opt(10, 0, 0, 750).unwrap();
        assert_eq!(truncate_to_seconds(dt), date(2024, 1, 1).and_hms_opt(10, 0, 0).unwrap());
    }

    #[test]
    fn test_today_bounds_contain_now() {
        let (start, end) = today_bounds();
        let now = now_local();
        assert!(start <= now && now <= end || now.date() != start.date());
    }
}
