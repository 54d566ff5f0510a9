//! 配置模块
//!
//! 支持从 JSON 文件加载系统配置，并允许环境变量覆盖；
//! 查询服务通过 [`ConfigSource`] 只读访问运行期配置项

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 当前交易日配置键
pub const TODAY_DATE_KEY: &str = "TODAY_DATE";

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    /// 工作线程数（0 表示使用 CPU 核心数）
    #[serde(default)]
    pub workers: usize,
}

/// 本地数据配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// 数据目录
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// 数据文件名（每行一个 JSON 文档）
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

/// 交易日配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradingConfig {
    /// 当前交易日（静态值）
    #[serde(default)]
    pub today_date: Option<String>,
    /// 运行期配置文件，每次查询时重新读取
    #[serde(default)]
    pub runtime_env_path: Option<PathBuf>,
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,
    /// 数据配置
    #[serde(default)]
    pub data: DataConfig,
    /// 交易日配置
    #[serde(default)]
    pub trading: TradingConfig,
}

// 默认值函数
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8003 }
fn default_data_dir() -> PathBuf { PathBuf::from("data") }
fn default_file_name() -> String { "merged.jsonl".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            file_name: default_file_name(),
        }
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 加载配置，优先从文件，失败则使用默认值；最后应用环境变量覆盖
    pub fn load() -> Self {
        let mut config = Self::load_file_or_default();
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config
    }

    fn load_file_or_default() -> Self {
        let config_paths = ["config.json", "config/config.json"];

        for path in config_paths {
            if Path::new(path).exists() {
                match Self::from_file(path) {
                    Ok(config) => {
                        log::info!("从 {} 加载配置成功", path);
                        return config;
                    }
                    Err(e) => {
                        log::warn!("加载配置文件 {} 失败: {}", path, e);
                    }
                }
            }
        }

        log::info!("使用默认配置");
        Self::default()
    }

    /// 应用环境变量覆盖
    ///
    /// 支持 GETPRICE_HTTP_PORT、DATA_DIR、TODAY_DATE、RUNTIME_ENV_PATH
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("GETPRICE_HTTP_PORT") {
            match port.trim().parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(e) => log::warn!("忽略无效的 GETPRICE_HTTP_PORT={}: {}", port, e),
            }
        }
        if let Some(dir) = lookup("DATA_DIR") {
            self.data.data_dir = PathBuf::from(dir);
        }
        if let Some(today) = lookup(TODAY_DATE_KEY) {
            self.trading.today_date = Some(today);
        }
        if let Some(path) = lookup("RUNTIME_ENV_PATH") {
            self.trading.runtime_env_path = Some(PathBuf::from(path));
        }
    }

    /// 获取服务器绑定地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 数据文件完整路径
    pub fn data_path(&self) -> PathBuf {
        self.data.data_dir.join(&self.data.file_name)
    }

    /// 数据文件绝对路径，用于错误信息和日志
    pub fn resolved_data_path(&self) -> PathBuf {
        let path = self.data_path();
        std::path::absolute(&path).unwrap_or(path)
    }

    /// 构造查询服务使用的配置源
    pub fn config_source(&self) -> Arc<dyn ConfigSource> {
        let mut values = HashMap::new();
        if let Some(today) = &self.trading.today_date {
            values.insert(TODAY_DATE_KEY.to_string(), today.clone());
        }
        let fixed = StaticConfig::new(values);

        match &self.trading.runtime_env_path {
            Some(path) => Arc::new(RuntimeEnvConfig::new(path.clone(), fixed)),
            None => Arc::new(fixed),
        }
    }
}

/// 只读配置源
pub trait ConfigSource: Send + Sync {
    fn get_value(&self, key: &str) -> Option<String>;
}

/// 固定键值配置
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    values: HashMap<String, String>,
}

impl StaticConfig {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    #[cfg(test)]
    pub fn with_today(today: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(TODAY_DATE_KEY.to_string(), today.to_string());
        Self { values }
    }
}

impl ConfigSource for StaticConfig {
    fn get_value(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// 运行期配置
///
/// 每次读取都重新解析 JSON 文件，外部驱动可以在服务运行期间推进 TODAY_DATE。
/// 查找顺序：文件 -> 同名环境变量 -> 静态配置
#[derive(Debug, Clone)]
pub struct RuntimeEnvConfig {
    path: PathBuf,
    fallback: StaticConfig,
}

impl RuntimeEnvConfig {
    pub fn new(path: PathBuf, fallback: StaticConfig) -> Self {
        Self { path, fallback }
    }

    fn read_file_value(&self, key: &str) -> Option<String> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                log::debug!("读取运行期配置 {} 失败: {}", self.path.display(), e);
                return None;
            }
        };
        let values: serde_json::Map<String, serde_json::Value> =
            match serde_json::from_str(&content) {
                Ok(values) => values,
                Err(e) => {
                    log::debug!("解析运行期配置 {} 失败: {}", self.path.display(), e);
                    return None;
                }
            };

        match values.get(key)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl ConfigSource for RuntimeEnvConfig {
    fn get_value(&self, key: &str) -> Option<String> {
        self.read_file_value(key)
            .or_else(|| std::env::var(key).ok())
            .or_else(|| self.fallback.get_value(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8003");
        assert_eq!(config.data_path(), PathBuf::from("data").join("merged.jsonl"));
        assert!(config.trading.today_date.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"server": {{"port": 9100}}, "trading": {{"today_date": "2025-10-30"}}}}"#).unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.data.file_name, "merged.jsonl");
        assert_eq!(config.trading.today_date.as_deref(), Some("2025-10-30"));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| match key {
            "GETPRICE_HTTP_PORT" => Some("8123".to_string()),
            "DATA_DIR" => Some("/srv/prices".to_string()),
            "TODAY_DATE" => Some("2025-10-30".to_string()),
            _ => None,
        });

        assert_eq!(config.server.port, 8123);
        assert_eq!(config.data_path(), PathBuf::from("/srv/prices/merged.jsonl"));
        assert_eq!(config.trading.today_date.as_deref(), Some("2025-10-30"));
        assert!(config.trading.runtime_env_path.is_none());
    }

    #[test]
    fn test_invalid_port_ignored() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| (key == "GETPRICE_HTTP_PORT").then(|| "abc".to_string()));
        assert_eq!(config.server.port, 8003);
    }

    #[test]
    fn test_static_source() {
        let mut config = AppConfig::default();
        config.trading.today_date = Some("2025-10-30".to_string());
        let source = config.config_source();
        assert_eq!(source.get_value(TODAY_DATE_KEY).as_deref(), Some("2025-10-30"));
        assert_eq!(source.get_value("SIGNATURE"), None);
    }

    #[test]
    fn test_runtime_env_reloads_on_each_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runtime_env.json");
        // 键名刻意避开真实环境变量
        let key = "PRICE_TEST_RUNTIME_KEY";

        let source = RuntimeEnvConfig::new(path.clone(), StaticConfig::default());
        assert_eq!(source.get_value(key), None);

        fs::write(&path, format!(r#"{{"{}": "2025-10-29"}}"#, key)).unwrap();
        assert_eq!(source.get_value(key).as_deref(), Some("2025-10-29"));

        fs::write(&path, format!(r#"{{"{}": "2025-10-30"}}"#, key)).unwrap();
        assert_eq!(source.get_value(key).as_deref(), Some("2025-10-30"));

        fs::write(&path, format!(r#"{{"{}": 3}}"#, key)).unwrap();
        assert_eq!(source.get_value(key).as_deref(), Some("3"));
    }

    #[test]
    fn test_runtime_env_falls_back_to_static() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let mut values = HashMap::new();
        values.insert("PRICE_TEST_FALLBACK_KEY".to_string(), "2025-01-02".to_string());

        let source = RuntimeEnvConfig::new(path, StaticConfig::new(values));
        assert_eq!(source.get_value("PRICE_TEST_FALLBACK_KEY").as_deref(), Some("2025-01-02"));
    }
}
