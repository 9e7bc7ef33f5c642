//! 内核配置
//!
//! 定义导航内核的配置结构和加载逻辑。

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::router::{MemoryHistory, RouteTableConfig};
use crate::utils::Result;

/// 路由器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// 是否启用解析缓存
    #[serde(default = "default_true")]
    pub cache_enabled: bool,

    /// 解析缓存容量
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// 是否严格区分尾斜杠
    #[serde(default)]
    pub strict_trailing_slash: bool,

    /// 历史策略的 base 前缀
    #[serde(default)]
    pub history_base: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_cache_capacity() -> usize {
    256
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            cache_enabled: default_true(),
            cache_capacity: default_cache_capacity(),
            strict_trailing_slash: false,
            history_base: None,
        }
    }
}

impl RouterConfig {
    /// 转换为路由表配置
    pub fn to_table_config(&self) -> RouteTableConfig {
        RouteTableConfig {
            cache_enabled: self.cache_enabled,
            cache_capacity: self.cache_capacity,
            strict_trailing_slash: self.strict_trailing_slash,
        }
    }

    /// 按配置创建内存历史
    pub fn build_history(&self) -> MemoryHistory {
        match self.history_base {
            Some(ref base) => MemoryHistory::with_base(base.clone()),
            None => MemoryHistory::new(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否输出到文件
    #[serde(default)]
    pub file_output: bool,

    /// 日志文件目录
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// 是否输出 JSON 格式
    #[serde(default)]
    pub json_format: bool,

    /// 日志轮转策略
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: false,
            log_dir: None,
            json_format: false,
            rotation: default_rotation(),
        }
    }
}

/// 内核配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 配置文件路径
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// 路由器配置
    #[serde(default)]
    pub router: RouterConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LogConfig,

    /// 是否为开发模式
    #[serde(default)]
    pub dev_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            router: RouterConfig::default(),
            logging: LogConfig::default(),
            dev_mode: false,
        }
    }
}

impl AppConfig {
    /// 创建配置构建器
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::new()
    }

    /// 从文件加载配置
    ///
    /// 按扩展名选择解析格式：`.json` 使用 JSON，其余使用 YAML。
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let mut config: AppConfig = if path.extension().map(|e| e == "json").unwrap_or(false) {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// 合并另一个配置（用于覆盖）
    pub fn merge(&mut self, other: AppConfig) {
        // 只覆盖非默认值的配置
        if other.router.cache_capacity != default_cache_capacity() {
            self.router.cache_capacity = other.router.cache_capacity;
        }
        if !other.router.cache_enabled {
            self.router.cache_enabled = false;
        }
        if other.router.strict_trailing_slash {
            self.router.strict_trailing_slash = true;
        }
        if other.router.history_base.is_some() {
            self.router.history_base = other.router.history_base;
        }
        if other.logging.level != default_log_level() {
            self.logging.level = other.logging.level;
        }
        if other.logging.file_output {
            self.logging.file_output = true;
            self.logging.log_dir = other.logging.log_dir;
        }
        if other.logging.json_format {
            self.logging.json_format = true;
        }
        if other.dev_mode {
            self.dev_mode = true;
        }
    }
}

/// 配置构建器
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// 设置配置文件路径
    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.config_path = Some(path.into());
        self
    }

    /// 设置缓存容量
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.config.router.cache_capacity = capacity;
        self
    }

    /// 禁用解析缓存
    pub fn disable_cache(mut self) -> Self {
        self.config.router.cache_enabled = false;
        self
    }

    /// 启用严格尾斜杠匹配
    pub fn strict_trailing_slash(mut self) -> Self {
        self.config.router.strict_trailing_slash = true;
        self
    }

    /// 设置历史 base 前缀
    pub fn history_base(mut self, base: impl Into<String>) -> Self {
        self.config.router.history_base = Some(base.into());
        self
    }

    /// 设置日志级别
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    /// 启用文件日志
    pub fn file_logging(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.config.logging.file_output = true;
        self.config.logging.log_dir = Some(log_dir.into());
        self
    }

    /// 启用 JSON 格式日志
    pub fn json_logging(mut self) -> Self {
        self.config.logging.json_format = true;
        self
    }

    /// 启用开发模式
    pub fn dev_mode(mut self) -> Self {
        self.config.dev_mode = true;
        self
    }

    /// 构建配置
    pub fn build(self) -> AppConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(!config.dev_mode);
        assert_eq!(config.logging.level, "info");
        assert!(config.router.cache_enabled);
        assert_eq!(config.router.cache_capacity, 256);
    }

    #[test]
    fn test_config_builder() {
        let config = AppConfig::builder()
            .cache_capacity(64)
            .log_level("debug")
            .history_base("/app")
            .dev_mode()
            .build();

        assert_eq!(config.router.cache_capacity, 64);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.router.history_base.as_deref(), Some("/app"));
        assert!(config.dev_mode);
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::default();
        let override_config = AppConfig::builder()
            .log_level("debug")
            .strict_trailing_slash()
            .dev_mode()
            .build();

        base.merge(override_config);

        assert_eq!(base.logging.level, "debug");
        assert!(base.router.strict_trailing_slash);
        assert!(base.dev_mode);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::builder()
            .cache_capacity(32)
            .log_level("warn")
            .build();

        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: AppConfig = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(parsed.router.cache_capacity, 32);
        assert_eq!(parsed.logging.level, "warn");
    }

    #[test]
    fn test_to_table_config() {
        let config = AppConfig::builder().disable_cache().build();
        let table_config = config.router.to_table_config();

        assert!(!table_config.cache_enabled);
        assert!(!table_config.strict_trailing_slash);
    }

    #[test]
    fn test_build_history() {
        let config = AppConfig::builder().history_base("/app/").build();
        let history = config.router.build_history();
        assert_eq!(history.base(), "/app");
    }
}
