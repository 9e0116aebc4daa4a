// ==========================================
// Fertigung API - 服务配置
// ==========================================
// 加载顺序: 默认值 → TOML 配置文件（可选）→ 环境变量覆写
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 配置文件路径环境变量
pub const ENV_CONFIG_PATH: &str = "FERTIGUNG_API_CONFIG";
pub const ENV_BIND_ADDR: &str = "FERTIGUNG_API_BIND";
pub const ENV_DB_PATH: &str = "FERTIGUNG_API_DB_PATH";
pub const ENV_LOG_FORMAT: &str = "FERTIGUNG_API_LOG_FORMAT";
pub const ENV_DEFAULT_TAKE: &str = "FERTIGUNG_API_DEFAULT_TAKE";
pub const ENV_MAX_TAKE: &str = "FERTIGUNG_API_MAX_TAKE";

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("无法读取配置文件 {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件解析失败: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("配置项 {key} 无效: {message}")]
    InvalidValue { key: String, message: String },
}

/// 日志输出格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("未知日志格式: {}", other)),
        }
    }
}

// ==========================================
// ServerConfig - 服务配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 监听地址
    pub bind_addr: String,
    /// 数据库文件路径（None 时使用用户数据目录）
    pub db_path: Option<String>,
    /// 未指定 take 时的默认分页大小
    pub default_take: u32,
    /// 允许的最大分页大小
    pub max_take: u32,
    /// 日志格式
    pub log_format: LogFormat,
    /// 是否允许任意来源跨域
    pub cors_allow_any: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            db_path: None,
            default_take: 20,
            max_take: 500,
            log_format: LogFormat::Pretty,
            cors_allow_any: true,
        }
    }
}

impl ServerConfig {
    /// 从进程环境加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(ENV_CONFIG_PATH) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(Path::new(path.trim()))?,
            _ => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件加载（缺失字段取默认值）
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// 应用环境变量覆写
    ///
    /// `lookup` 抽象环境变量读取，便于测试
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(bind) = non_empty(ENV_BIND_ADDR) {
            self.bind_addr = bind.trim().to_string();
        }
        if let Some(path) = non_empty(ENV_DB_PATH) {
            self.db_path = Some(path.trim().to_string());
        }
        if let Some(format) = non_empty(ENV_LOG_FORMAT) {
            self.log_format = format.parse().map_err(|message| ConfigError::InvalidValue {
                key: ENV_LOG_FORMAT.to_string(),
                message,
            })?;
        }
        if let Some(take) = non_empty(ENV_DEFAULT_TAKE) {
            self.default_take = parse_u32(ENV_DEFAULT_TAKE, &take)?;
        }
        if let Some(take) = non_empty(ENV_MAX_TAKE) {
            self.max_take = parse_u32(ENV_MAX_TAKE, &take)?;
        }
        Ok(())
    }

    /// 校验配置一致性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_addr.trim().is_empty() {
            return Err(invalid("bind_addr", "监听地址不能为空"));
        }
        if let Some(path) = &self.db_path {
            let path = path.trim();
            // 每个会话独立打开连接，内存库无法跨会话共享
            if path.is_empty() || path == ":memory:" || path.contains("mode=memory") {
                return Err(invalid("db_path", "必须是数据库文件路径，不支持内存数据库"));
            }
        }
        if self.max_take == 0 {
            return Err(invalid("max_take", "必须大于0"));
        }
        if self.default_take == 0 || self.default_take > self.max_take {
            return Err(invalid(
                "default_take",
                &format!("必须在 1..={} 之间", self.max_take),
            ));
        }
        Ok(())
    }

    /// 解析最终使用的数据库路径
    pub fn resolved_db_path(&self) -> String {
        match &self.db_path {
            Some(path) => path.clone(),
            None => get_default_db_path(),
        }
    }
}

fn parse_u32(key: &str, raw: &str) -> Result<u32, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| invalid(key, &e.to_string()))
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}

/// 默认数据库路径（用户数据目录下）
pub fn get_default_db_path() -> String {
    let mut path = PathBuf::from("./fertigung.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("fertigung-api");
        // 确保目录存在
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("fertigung.db");
        }
    }

    path.to_string_lossy().to_string()
}
