//! 查询错误类型
//!
//! 所有变体都会在服务边界转换为 `{error, symbol, date}` 错误结构，不会向调用方抛出

use std::path::PathBuf;
use thiserror::Error;

/// 行情查询错误
#[derive(Debug, Error)]
pub enum LookupError {
    /// 日期格式不符合对应粒度
    #[error("{0}")]
    Format(&'static str),

    /// 数据文件不存在
    #[error("Data file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// 找到股票但缺少该日期，附带最近的可用日期
    #[error("Data not found for date {date}. Please verify the date exists in data. Sample available dates: {}", sample_list(samples))]
    DateNotFound { date: String, samples: Vec<String> },

    /// 数据集中没有该股票
    #[error("No records found for stock {symbol} in local data")]
    SymbolNotFound { symbol: String },

    /// 除“文件不存在”之外的读取错误
    #[error("Failed to read data file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 可用日期列表，格式为 `['2025-10-30', '2025-10-29']`
fn sample_list(samples: &[String]) -> String {
    let quoted: Vec<String> = samples.iter().map(|s| format!("'{}'", s)).collect();
    format!("[{}]", quoted.join(", "))
}

pub const DAILY_FORMAT_MESSAGE: &str = "date must be in YYYY-MM-DD format";
pub const HOURLY_FORMAT_MESSAGE: &str = "date must be in YYYY-MM-DD HH:MM:SS format";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = LookupError::SymbolNotFound { symbol: "XYZ".to_string() };
        assert_eq!(err.to_string(), "No records found for stock XYZ in local data");

        let err = LookupError::DateNotFound {
            date: "2025-10-30".to_string(),
            samples: vec!["2025-10-29".to_string(), "2025-10-28".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Data not found for date 2025-10-30. Please verify the date exists in data. \
             Sample available dates: ['2025-10-29', '2025-10-28']"
        );

        let err = LookupError::DateNotFound { date: "2025-10-30".to_string(), samples: Vec::new() };
        assert!(err.to_string().ends_with("Sample available dates: []"));

        let err = LookupError::FileNotFound { path: PathBuf::from("data/merged.jsonl") };
        assert_eq!(err.to_string(), "Data file not found: data/merged.jsonl");

        assert_eq!(LookupError::Format(DAILY_FORMAT_MESSAGE).to_string(), DAILY_FORMAT_MESSAGE);
    }
}
