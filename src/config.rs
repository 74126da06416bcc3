use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 指定配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "PRODUCTS_CONFIG";

/// 服务配置结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP 服务配置
    pub server: ServerConfig,
    /// 数据存储配置
    pub storage: StorageConfig,
    /// 日志配置
    pub logging: LoggingConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 绑定地址
    pub bind_address: String,
    /// HTTP 服务端口
    pub port: u16,
}

/// 数据存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// 产品数据文件路径
    pub data_file: PathBuf,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("products.json"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// `host:port` 形式的监听地址
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl Config {
    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        Ok(config)
    }

    /// 用环境变量覆盖配置项
    ///
    /// 支持 `PRODUCTS_BIND`、`PRODUCTS_PORT`、`PRODUCTS_DATA_FILE`、`PRODUCTS_LOG_LEVEL`。
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("PRODUCTS_BIND") {
            self.server.bind_address = bind;
        }
        if let Some(port) = lookup("PRODUCTS_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Validation(format!("无效的端口: {}", port)))?;
        }
        if let Some(data_file) = lookup("PRODUCTS_DATA_FILE") {
            self.storage.data_file = PathBuf::from(data_file);
        }
        if let Some(level) = lookup("PRODUCTS_LOG_LEVEL") {
            self.logging.level = level.to_lowercase();
        }
        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("HTTP端口必须大于0".to_string()));
        }
        if self.server.bind_address.is_empty() {
            return Err(ConfigError::Validation("绑定地址不能为空".to_string()));
        }
        if self.storage.data_file.as_os_str().is_empty() {
            return Err(ConfigError::Validation("数据文件路径不能为空".to_string()));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, valid_levels
            )));
        }

        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
}

/// 从文件、环境变量或默认值加载配置
///
/// 返回配置以及所使用的配置文件（若有）。
pub fn load_config() -> Result<(Config, Option<PathBuf>), ConfigError> {
    let source = match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) => Some(PathBuf::from(path)),
        Err(_) => ["config.toml", "./config/config.toml"]
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists()),
    };

    let mut config = match &source {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    config.apply_overrides(|key| std::env::var(key).ok())?;
    config.validate()?;

    Ok((config, source))
}
