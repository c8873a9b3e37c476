// ==========================================
// 铁路大亨 - 时间值 (TimeValue)
// ==========================================
// 红线: 只做结构比较, 不做日历合法性校验(无闰年/天数修正)
// ==========================================

use crate::domain::error::NetworkError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 日历日期 (年, 月, 日)
///
/// 排序按 (year, month, day) 字典序, 由字段声明顺序派生。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeValue {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl TimeValue {
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// 同月同日, 替换年份
    pub const fn with_year(self, year: i32) -> Self {
        Self {
            year,
            month: self.month,
            day: self.day,
        }
    }

    /// 转换为 chrono 日期
    ///
    /// TimeValue 不做合法性校验, 因此转换可能失败(如 2月30日)
    pub fn to_naive_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for TimeValue {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month(), date.day())
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for TimeValue {
    type Err = NetworkError;

    /// 解析 YYYY-MM-DD
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NetworkError::InvalidDate(s.to_string());

        let mut parts = s.trim().splitn(3, '-');
        let year = parts
            .next()
            .and_then(|p| p.parse::<i32>().ok())
            .ok_or_else(invalid)?;
        let month = parts
            .next()
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or_else(invalid)?;
        let day = parts
            .next()
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or_else(invalid)?;

        Ok(Self::new(year, month, day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_lexicographic() {
        let a = TimeValue::new(2020, 12, 31);
        let b = TimeValue::new(2021, 1, 1);
        let c = TimeValue::new(2021, 1, 2);
        let d = TimeValue::new(2021, 2, 1);

        assert!(a < b);
        assert!(b < c);
        assert!(c < d);
        assert_eq!(b, TimeValue::new(2021, 1, 1));
    }

    #[test]
    fn test_display_and_parse() {
        let date = TimeValue::new(2024, 6, 5);
        assert_eq!(date.to_string(), "2024-06-05");
        assert_eq!("2024-06-05".parse::<TimeValue>().unwrap(), date);
        assert_eq!(" 1999-1-2 ".parse::<TimeValue>().unwrap(), TimeValue::new(1999, 1, 2));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "2024/06/05".parse::<TimeValue>(),
            Err(NetworkError::InvalidDate(_))
        ));
        assert!("2024-06".parse::<TimeValue>().is_err());
        assert!("".parse::<TimeValue>().is_err());
    }

    #[test]
    fn test_no_calendar_validation() {
        // 不合法日期仍可构造、比较, 仅转换 chrono 时失败
        let odd = TimeValue::new(2023, 2, 30);
        assert!(odd < TimeValue::new(2023, 3, 1));
        assert!(odd.to_naive_date().is_none());

        let leap = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(TimeValue::from(leap).to_naive_date(), Some(leap));
    }
}
