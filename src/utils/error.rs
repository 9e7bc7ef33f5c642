//! 导航内核错误类型定义
//!
//! 本模块定义了内核中使用的所有错误类型。

use thiserror::Error;

/// 导航内核核心错误类型
#[derive(Error, Debug)]
pub enum NavError {
    // ==================== 路由表错误 ====================

    /// 路由未找到
    #[error("路由未找到: name '{0}'")]
    RouteNotFound(String),

    /// 路由路径重复
    #[error("路由路径重复: path '{0}'")]
    DuplicatePath(String),

    /// 路由名称重复
    #[error("路由名称重复: name '{0}'")]
    DuplicateName(String),

    /// 路由定义无效
    #[error("路由定义无效: {0}")]
    InvalidRoute(String),

    /// 命名导航缺少参数
    #[error("命名导航缺少参数: 路由 '{name}' 需要参数 '{param}'")]
    MissingParam {
        name: String,
        param: String,
    },

    // ==================== 历史策略错误 ====================

    /// 历史游标越界
    #[error("历史游标越界: delta {delta}, 当前位置 {position}, 条目数 {len}")]
    HistoryOutOfRange {
        delta: i64,
        position: usize,
        len: usize,
    },

    /// 路径格式无效
    #[error("路径格式无效: '{0}'")]
    InvalidPath(String),

    // ==================== 应用外壳错误 ====================

    /// 路由器尚未安装
    #[error("路由器尚未安装")]
    RouterNotInstalled,

    /// 外壳状态非法
    #[error("外壳状态非法: 期望 {expected}, 当前 {actual}")]
    InvalidShellState {
        expected: String,
        actual: String,
    },

    // ==================== 配置错误 ====================

    /// 配置加载失败
    #[error("配置加载失败: {0}")]
    ConfigLoadFailed(String),

    /// 配置值无效
    #[error("配置值无效: '{key}' - {reason}")]
    InvalidConfigValue {
        key: String,
        reason: String,
    },

    // ==================== IO 和序列化错误 ====================

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 序列化/反序列化错误
    #[error("JSON 错误: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML 序列化/反序列化错误
    #[error("YAML 错误: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ==================== 通用错误 ====================

    /// 内部错误
    #[error("内部错误: {0}")]
    Internal(String),

    /// 初始化失败
    #[error("初始化失败: {0}")]
    InitFailed(String),

    /// 其他错误
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// 内核操作结果类型别名
pub type Result<T> = std::result::Result<T, NavError>;

/// 错误码常量
pub mod error_code {
    // 路由错误 (ROUTE-xxx)
    pub const ROUTE_NOT_FOUND: &str = "ROUTE-001";
    pub const ROUTE_DUPLICATE_PATH: &str = "ROUTE-002";
    pub const ROUTE_DUPLICATE_NAME: &str = "ROUTE-003";
    pub const ROUTE_INVALID_DEFINITION: &str = "ROUTE-004";
    pub const ROUTE_MISSING_PARAM: &str = "ROUTE-005";

    // 历史错误 (HISTORY-xxx)
    pub const HISTORY_OUT_OF_RANGE: &str = "HISTORY-001";
    pub const HISTORY_INVALID_PATH: &str = "HISTORY-002";

    // 外壳错误 (SHELL-xxx)
    pub const SHELL_ROUTER_NOT_INSTALLED: &str = "SHELL-001";
    pub const SHELL_INVALID_STATE: &str = "SHELL-002";

    // 配置错误 (CONFIG-xxx)
    pub const CONFIG_LOAD_FAILED: &str = "CONFIG-001";
    pub const CONFIG_INVALID_VALUE: &str = "CONFIG-002";
}

impl NavError {
    /// 获取错误码
    pub fn error_code(&self) -> &'static str {
        match self {
            NavError::RouteNotFound(_) => error_code::ROUTE_NOT_FOUND,
            NavError::DuplicatePath(_) => error_code::ROUTE_DUPLICATE_PATH,
            NavError::DuplicateName(_) => error_code::ROUTE_DUPLICATE_NAME,
            NavError::InvalidRoute(_) => error_code::ROUTE_INVALID_DEFINITION,
            NavError::MissingParam { .. } => error_code::ROUTE_MISSING_PARAM,
            NavError::HistoryOutOfRange { .. } => error_code::HISTORY_OUT_OF_RANGE,
            NavError::InvalidPath(_) => error_code::HISTORY_INVALID_PATH,
            NavError::RouterNotInstalled => error_code::SHELL_ROUTER_NOT_INSTALLED,
            NavError::InvalidShellState { .. } => error_code::SHELL_INVALID_STATE,
            NavError::ConfigLoadFailed(_) => error_code::CONFIG_LOAD_FAILED,
            NavError::InvalidConfigValue { .. } => error_code::CONFIG_INVALID_VALUE,
            _ => "UNKNOWN",
        }
    }

    /// 是否为路由表构建阶段的契约违规
    pub fn is_build_error(&self) -> bool {
        matches!(
            self,
            NavError::DuplicatePath(_) | NavError::DuplicateName(_) | NavError::InvalidRoute(_)
        )
    }
}
