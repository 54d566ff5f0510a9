//! 日期粒度判断与格式校验

use crate::error::{LookupError, DAILY_FORMAT_MESSAGE, HOURLY_FORMAT_MESSAGE};
use crate::models::SeriesDocument;
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static DAILY_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());
static HOURLY_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}$").unwrap()
});

/// 查询粒度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// 日线，YYYY-MM-DD
    Daily,
    /// 小时线，YYYY-MM-DD HH:MM:SS
    Hourly,
}

impl Granularity {
    /// 含空格或字母 T 视为小时线，否则为日线
    ///
    /// 只做文本判断，不合法的格式由 [`Granularity::validate`] 拒绝
    pub fn classify(date: &str) -> Self {
        if date.contains(' ') || date.contains('T') {
            Granularity::Hourly
        } else {
            Granularity::Daily
        }
    }

    /// 校验日期格式：必须补零，且日历/时钟取值有效
    pub fn validate(self, date: &str) -> Result<(), LookupError> {
        let valid = match self {
            Granularity::Daily => {
                DAILY_SHAPE.is_match(date) && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
            }
            Granularity::Hourly => {
                HOURLY_SHAPE.is_match(date)
                    && NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S").is_ok()
            }
        };

        if valid {
            Ok(())
        } else {
            Err(LookupError::Format(self.format_message()))
        }
    }

    fn format_message(self) -> &'static str {
        match self {
            Granularity::Daily => DAILY_FORMAT_MESSAGE,
            Granularity::Hourly => HOURLY_FORMAT_MESSAGE,
        }
    }

    /// 数据集中对应的序列字段名
    pub fn series_name(self) -> &'static str {
        match self {
            Granularity::Daily => "Time Series (Daily)",
            Granularity::Hourly => "Time Series (60min)",
        }
    }

    /// 取出文档中对应粒度的序列
    pub fn series(self, doc: &SeriesDocument) -> Option<&Map<String, Value>> {
        doc.series(self.series_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(Granularity::classify("2025-10-30"), Granularity::Daily);
        assert_eq!(Granularity::classify("10/30/2025"), Granularity::Daily);
        assert_eq!(Granularity::classify("2025-10-30 14:30:00"), Granularity::Hourly);
        assert_eq!(Granularity::classify("2025-10-30T14:30:00"), Granularity::Hourly);
    }

    #[test]
    fn test_validate_daily() {
        for date in ["2025-10-30", "2024-02-29", "1999-01-01"] {
            assert!(Granularity::Daily.validate(date).is_ok(), "{} 应该合法", date);
        }

        for date in ["10/30/2025", "2025-1-5", "2025-13-01", "2025-02-30", "2023-02-29", "20251030", "", " 2025-10-30"] {
            let err = Granularity::Daily.validate(date).unwrap_err();
            assert_eq!(err.to_string(), "date must be in YYYY-MM-DD format", "{}", date);
        }
    }

    #[test]
    fn test_validate_hourly() {
        for date in ["2025-10-30 14:30:00", "2025-10-30 00:00:00", "2025-10-30 23:59:59"] {
            assert!(Granularity::Hourly.validate(date).is_ok(), "{} 应该合法", date);
        }

        for date in ["2025-10-30T14:30:00", "2025-10-30 24:00:00", "2025-10-30 9:30:00", "2025-10-30 14:30", "2025-10-30 14:61:00"] {
            let err = Granularity::Hourly.validate(date).unwrap_err();
            assert_eq!(err.to_string(), "date must be in YYYY-MM-DD HH:MM:SS format", "{}", date);
        }
    }
}
