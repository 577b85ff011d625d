//! 时间辅助模块
//!
//! 活动时间的解析与展示都集中在此：
//! - RFC 3339 / `datetime-local` 输入的解析
//! - 面向用户的长短格式化
//! - 开场倒计时计算
//!
//! 全部基于 `chrono`，保持宿主可测试；"当前时间"由调用方传入。

use chrono::{DateTime, NaiveDateTime, Utc};

// =========================================================
// 解析
// =========================================================

/// 解析后端返回的 RFC 3339 时间串
pub fn parse_rfc3339(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// 解析 `<input type="datetime-local">` 的取值（无时区，可带秒）
pub fn parse_datetime_local(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

// =========================================================
// 格式化
// =========================================================

/// 长格式："Saturday, March 8, 2026, 07:30 PM"
pub fn format_long(dt: &DateTime<Utc>) -> String {
    dt.format("%A, %B %-d, %Y, %I:%M %p").to_string()
}

/// 短格式："Sat, Mar 8, 2026, 07:30 PM"
pub fn format_short(dt: &DateTime<Utc>) -> String {
    dt.format("%a, %b %-d, %Y, %I:%M %p").to_string()
}

/// 仅日期："Mar 8, 2026"
pub fn format_date_only(dt: &DateTime<Utc>) -> String {
    dt.format("%b %-d, %Y").to_string()
}

// =========================================================
// 倒计时
// =========================================================

/// 距活动开场的剩余时间，已开场时各分量归零。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl Countdown {
    /// 计算 `now` 到 `start` 的剩余时间
    pub fn until(start: &DateTime<Utc>, now: &DateTime<Utc>) -> Self {
        let diff = start.signed_duration_since(*now);
        if diff.num_seconds() <= 0 {
            return Self::default();
        }
        Self {
            days: diff.num_days(),
            hours: diff.num_hours() % 24,
            minutes: diff.num_minutes() % 60,
        }
    }

    pub fn is_over(&self) -> bool {
        self.days == 0 && self.hours == 0 && self.minutes == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        parse_rfc3339(s).unwrap()
    }

    #[test]
    fn parses_rfc3339_with_offsets() {
        assert!(parse_rfc3339("2026-09-01T18:00:00Z").is_some());
        let lagos = parse_rfc3339("2026-09-01T19:00:00+01:00").unwrap();
        assert_eq!(lagos, utc("2026-09-01T18:00:00Z"));
        assert!(parse_rfc3339("not a date").is_none());
    }

    #[test]
    fn parses_datetime_local_inputs() {
        assert!(parse_datetime_local("2026-09-01T18:00").is_some());
        assert!(parse_datetime_local("2026-09-01T18:00:30").is_some());
        assert!(parse_datetime_local("09/01/2026").is_none());
    }

    #[test]
    fn countdown_splits_components() {
        let start = utc("2026-09-03T12:45:00Z");
        let now = utc("2026-09-01T10:15:00Z");
        let c = Countdown::until(&start, &now);
        assert_eq!(c.days, 2);
        assert_eq!(c.hours, 2);
        assert_eq!(c.minutes, 30);
        assert!(!c.is_over());
    }

    #[test]
    fn countdown_floors_at_zero_once_started() {
        let start = utc("2026-09-01T10:00:00Z");
        let now = utc("2026-09-01T10:00:01Z");
        let c = Countdown::until(&start, &now);
        assert_eq!(c, Countdown::default());
        assert!(c.is_over());
    }

    #[test]
    fn formats_are_stable() {
        let dt = utc("2026-03-08T19:30:00Z");
        assert_eq!(format_long(&dt), "Sunday, March 8, 2026, 07:30 PM");
        assert_eq!(format_short(&dt), "Sun, Mar 8, 2026, 07:30 PM");
        assert_eq!(format_date_only(&dt), "Mar 8, 2026");
    }
}
