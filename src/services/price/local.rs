//! 本地 JSONL 数据集查询
//!
//! 每次查询都重新打开并顺序扫描文件，不建索引也不缓存。
//! 第一个代码匹配的文档即为结果来源：日期缺失时直接返回错误，不再继续扫描

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};

use super::Granularity;
use crate::config::{ConfigSource, TODAY_DATE_KEY};
use crate::error::LookupError;
use crate::models::{LookupFailure, LookupResult, Ohlcv, PriceRecord, SeriesDocument};

/// 日期缺失时返回的可用日期数量
const SAMPLE_DATE_COUNT: usize = 5;

/// 本地行情查询服务
#[derive(Clone)]
pub struct PriceLookupService {
    data_path: PathBuf,
    config: Arc<dyn ConfigSource>,
}

impl PriceLookupService {
    pub fn new(data_path: PathBuf, config: Arc<dyn ConfigSource>) -> Self {
        Self { data_path, config }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// 查询指定股票在指定日期/时刻的 OHLCV
    ///
    /// 所有失败都转换为 `{error, symbol, date}` 结构返回
    pub fn lookup(&self, symbol: &str, date: &str) -> LookupResult {
        match self.try_lookup(symbol, date) {
            Ok(ohlcv) => LookupResult::Found(PriceRecord {
                symbol: symbol.to_string(),
                date: date.to_string(),
                ohlcv,
            }),
            Err(e) => {
                log::debug!("查询 {} @ {} 失败: {}", symbol, date, e);
                LookupResult::Failed(LookupFailure {
                    error: e.to_string(),
                    symbol: symbol.to_string(),
                    date: date.to_string(),
                })
            }
        }
    }

    fn try_lookup(&self, symbol: &str, date: &str) -> Result<Ohlcv, LookupError> {
        let granularity = Granularity::classify(date);
        log::debug!("查询 {} @ {}，序列 {}", symbol, date, granularity.series_name());

        granularity.validate(date)?;
        let bar = self.scan(symbol, date, granularity)?;
        Ok(self.assemble(&bar, date))
    }

    /// 顺序扫描数据集，返回第一个代码匹配文档中该日期的K线
    fn scan(&self, symbol: &str, date: &str, granularity: Granularity) -> Result<Value, LookupError> {
        let file = File::open(&self.data_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LookupError::FileNotFound { path: self.data_path.clone() },
            _ => self.io_error(e),
        })?;

        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| self.io_error(e))?;
            if line.trim().is_empty() {
                continue;
            }

            let doc = match serde_json::from_str::<Value>(&line) {
                Ok(doc) => SeriesDocument::new(doc),
                Err(e) => {
                    log::warn!(
                        "跳过 {} 第 {} 行，无法解析: {}",
                        self.data_path.display(),
                        index + 1,
                        e
                    );
                    continue;
                }
            };
            if doc.symbol() != Some(symbol) {
                continue;
            }

            // 只看第一个匹配的文档；序列缺失或格式异常按空序列处理
            let series = granularity.series(&doc);
            return match series.and_then(|series| series.get(date)) {
                Some(bar) if !bar.is_null() => Ok(bar.clone()),
                _ => Err(LookupError::DateNotFound {
                    date: date.to_string(),
                    samples: recent_keys(series),
                }),
            };
        }

        Err(LookupError::SymbolNotFound { symbol: symbol.to_string() })
    }

    /// 当前交易日只返回开盘价，避免泄露尚未确定的高/低/收/量
    fn assemble(&self, bar: &Value, date: &str) -> Ohlcv {
        let today = self.config.get_value(TODAY_DATE_KEY);
        if today.as_deref() == Some(date) {
            Ohlcv::from_bar_in_progress(bar)
        } else {
            Ohlcv::from_bar(bar)
        }
    }

    fn io_error(&self, source: std::io::Error) -> LookupError {
        LookupError::Io { path: self.data_path.clone(), source }
    }
}

/// 序列中最近的若干个日期，倒序
fn recent_keys(series: Option<&Map<String, Value>>) -> Vec<String> {
    let mut keys: Vec<String> = series.map(|s| s.keys().cloned().collect()).unwrap_or_default();
    keys.sort_unstable_by(|a, b| b.cmp(a));
    keys.truncate(SAMPLE_DATE_COUNT);
    keys
}
