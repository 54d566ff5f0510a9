//! 行情数据模型
//!
//! 本地数据集的文档结构，以及查询结果的两种返回形态

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// K线字段名，沿用数据集原始键名
pub const OPEN_FIELD: &str = "1. buy price";
pub const HIGH_FIELD: &str = "2. high";
pub const LOW_FIELD: &str = "3. low";
pub const CLOSE_FIELD: &str = "4. sell price";
pub const VOLUME_FIELD: &str = "5. volume";

/// 当前交易日不可获取的字段占位文本
pub const HIDDEN_HIGH: &str = "You can not get the current high price";
pub const HIDDEN_LOW: &str = "You can not get the current low price";
pub const HIDDEN_CLOSE: &str = "You can not get the next close price";
pub const HIDDEN_VOLUME: &str = "You can not get the current volume";

/// 数据集字段名
pub const META_DATA_KEY: &str = "Meta Data";
pub const SYMBOL_KEY: &str = "2. Symbol";

/// 数据集中的一行：单只股票的完整时间序列
///
/// 只按需读取元数据和所查询的序列，另一粒度的序列即使格式异常也不影响查询
#[derive(Debug)]
pub struct SeriesDocument(Value);

impl SeriesDocument {
    pub fn new(doc: Value) -> Self {
        Self(doc)
    }

    /// 股票代码，非字符串值视为不匹配
    pub fn symbol(&self) -> Option<&str> {
        self.0.get(META_DATA_KEY)?.get(SYMBOL_KEY)?.as_str()
    }

    /// 取出指定名称的序列，缺失或不是对象时返回 None
    pub fn series(&self, name: &str) -> Option<&Map<String, Value>> {
        self.0.get(name)?.as_object()
    }
}

/// OHLCV 数据，原样透传数据集中的值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ohlcv {
    pub open: Value,
    pub high: Value,
    pub low: Value,
    pub close: Value,
    pub volume: Value,
}

impl Ohlcv {
    /// 从单根K线对象中提取字段，缺失字段为 null
    pub fn from_bar(bar: &Value) -> Self {
        let empty = Map::new();
        let fields = bar.as_object().unwrap_or(&empty);
        let field = |name: &str| fields.get(name).cloned().unwrap_or(Value::Null);

        Self {
            open: field(OPEN_FIELD),
            high: field(HIGH_FIELD),
            low: field(LOW_FIELD),
            close: field(CLOSE_FIELD),
            volume: field(VOLUME_FIELD),
        }
    }

    /// 当前交易日：只保留开盘价，其余字段替换为占位文本
    pub fn from_bar_in_progress(bar: &Value) -> Self {
        let open = bar.get(OPEN_FIELD).cloned().unwrap_or(Value::Null);

        Self {
            open,
            high: Value::from(HIDDEN_HIGH),
            low: Value::from(HIDDEN_LOW),
            close: Value::from(HIDDEN_CLOSE),
            volume: Value::from(HIDDEN_VOLUME),
        }
    }
}

/// 查询成功
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub symbol: String,
    pub date: String,
    pub ohlcv: Ohlcv,
}

/// 查询失败
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupFailure {
    pub error: String,
    pub symbol: String,
    pub date: String,
}

/// 查询结果，调用方通过是否存在 `error` 字段区分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LookupResult {
    Failed(LookupFailure),
    Found(PriceRecord),
}

/// 行情查询参数
#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    /// 股票代码，如 IBM、600243.SHH
    pub symbol: String,
    /// YYYY-MM-DD 或 YYYY-MM-DD HH:MM:SS
    pub date: String,
}
