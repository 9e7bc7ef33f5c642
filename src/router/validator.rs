//! 路由声明验证器
//!
//! 在路由表构建前对路由声明做格式验证和唯一性检查。
//! 格式不合法或 path/name 重复都是构建期契约违规。

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use super::route::RouteDef;
use crate::utils::{NavError, Result};

/// 路径段格式正则表达式
///
/// 允许静态段、参数段（`:id`）和通配段（`*rest`），
/// 段内字符限 URL 安全集合。
static SEGMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[:*]?[A-Za-z0-9._~-]+$").expect("Invalid segment regex")
});

/// 路由名称格式正则表达式
///
/// 名称以字母开头，由字母、数字、下划线和连字符组成。
static NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("Invalid name regex")
});

/// 验证错误详情
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// 错误字段
    pub field: String,
    /// 错误消息
    pub message: String,
    /// 错误码
    pub code: ValidationErrorCode,
}

impl ValidationError {
    /// 创建新的验证错误
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        code: ValidationErrorCode,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code,
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.field, self.message)
    }
}

/// 验证错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorCode {
    /// 字段为空
    EmptyField,
    /// 格式无效
    InvalidFormat,
    /// 值超出范围
    OutOfRange,
    /// 路径重复
    DuplicatePath,
    /// 名称重复
    DuplicateName,
}

impl std::fmt::Display for ValidationErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationErrorCode::EmptyField => write!(f, "EMPTY_FIELD"),
            ValidationErrorCode::InvalidFormat => write!(f, "INVALID_FORMAT"),
            ValidationErrorCode::OutOfRange => write!(f, "OUT_OF_RANGE"),
            ValidationErrorCode::DuplicatePath => write!(f, "DUPLICATE_PATH"),
            ValidationErrorCode::DuplicateName => write!(f, "DUPLICATE_NAME"),
        }
    }
}

/// 验证结果
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// 是否通过验证
    pub is_valid: bool,
    /// 验证错误列表
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// 创建成功的验证结果
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// 添加错误
    pub fn add_error(&mut self, error: ValidationError) {
        self.is_valid = false;
        self.errors.push(error);
    }

    /// 是否有错误
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// 转换为 Result
    pub fn into_result(self) -> Result<()> {
        if self.is_valid {
            Ok(())
        } else {
            let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
            Err(NavError::InvalidRoute(messages.join("; ")))
        }
    }
}

/// 验证器配置
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// 路径最大长度
    pub max_path_length: usize,
    /// 名称最大长度
    pub max_name_length: usize,
    /// 路径段最大数量
    pub max_segment_count: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_path_length: 512,
            max_name_length: 64,
            max_segment_count: 32,
        }
    }
}

/// 路由声明验证器
#[derive(Debug, Clone, Default)]
pub struct RouteValidator {
    /// 验证器配置
    config: ValidatorConfig,
}

impl RouteValidator {
    /// 创建新的验证器
    pub fn new() -> Self {
        Self {
            config: ValidatorConfig::default(),
        }
    }

    /// 使用自定义配置创建验证器
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// 获取配置
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// 验证单条路由声明的格式
    ///
    /// 检查以下内容：
    /// - path 非空、以 `/` 开头、无空段、无尾斜杠（根路径除外）、长度合法
    /// - 每个路径段符合格式要求
    /// - name 非空、格式正确且长度合法
    pub fn validate_def(&self, def: &RouteDef) -> ValidationResult {
        let mut result = ValidationResult::success();

        self.validate_path(&def.path, &mut result);
        self.validate_name(&def.name, &mut result);

        result
    }

    /// 验证一组路由声明（格式 + 表内唯一性）
    pub fn validate_defs(&self, defs: &[RouteDef]) -> ValidationResult {
        let mut result = ValidationResult::success();

        let mut seen_paths: HashSet<&str> = HashSet::new();
        let mut seen_names: HashSet<&str> = HashSet::new();

        for def in defs {
            let single = self.validate_def(def);
            for error in single.errors {
                result.add_error(error);
            }

            if !seen_paths.insert(&def.path) {
                result.add_error(ValidationError::new(
                    "path",
                    format!("路径 '{}' 在表内重复", def.path),
                    ValidationErrorCode::DuplicatePath,
                ));
            }

            if !seen_names.insert(&def.name) {
                result.add_error(ValidationError::new(
                    "name",
                    format!("名称 '{}' 在表内重复", def.name),
                    ValidationErrorCode::DuplicateName,
                ));
            }
        }

        result
    }

    /// 验证路径格式
    fn validate_path(&self, path: &str, result: &mut ValidationResult) {
        if path.is_empty() {
            result.add_error(ValidationError::new(
                "path",
                "路径不能为空",
                ValidationErrorCode::EmptyField,
            ));
            return;
        }

        if !path.starts_with('/') {
            result.add_error(ValidationError::new(
                "path",
                format!("路径 '{}' 必须以 '/' 开头", path),
                ValidationErrorCode::InvalidFormat,
            ));
            return;
        }

        if path.len() > self.config.max_path_length {
            result.add_error(ValidationError::new(
                "path",
                format!("路径长度超过上限 {}", self.config.max_path_length),
                ValidationErrorCode::OutOfRange,
            ));
        }

        // 根路径无需逐段检查
        if path == "/" {
            return;
        }

        if path.ends_with('/') {
            result.add_error(ValidationError::new(
                "path",
                format!("路径 '{}' 不能以 '/' 结尾", path),
                ValidationErrorCode::InvalidFormat,
            ));
        }

        if path.contains("//") {
            result.add_error(ValidationError::new(
                "path",
                format!("路径 '{}' 含有空路径段", path),
                ValidationErrorCode::InvalidFormat,
            ));
            return;
        }

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        if segments.len() > self.config.max_segment_count {
            result.add_error(ValidationError::new(
                "path",
                format!("路径段数超过上限 {}", self.config.max_segment_count),
                ValidationErrorCode::OutOfRange,
            ));
        }

        for segment in segments {
            if !SEGMENT_REGEX.is_match(segment) {
                result.add_error(ValidationError::new(
                    "path",
                    format!("路径段 '{}' 格式无效", segment),
                    ValidationErrorCode::InvalidFormat,
                ));
            }
        }
    }

    /// 验证名称格式
    fn validate_name(&self, name: &str, result: &mut ValidationResult) {
        if name.is_empty() {
            result.add_error(ValidationError::new(
                "name",
                "名称不能为空",
                ValidationErrorCode::EmptyField,
            ));
            return;
        }

        if name.len() > self.config.max_name_length {
            result.add_error(ValidationError::new(
                "name",
                format!("名称长度超过上限 {}", self.config.max_name_length),
                ValidationErrorCode::OutOfRange,
            ));
        }

        if !NAME_REGEX.is_match(name) {
            result.add_error(ValidationError::new(
                "name",
                format!("名称 '{}' 格式无效", name),
                ValidationErrorCode::InvalidFormat,
            ));
        }
    }
}

/// 检查路径格式是否有效（快捷函数）
pub fn is_valid_path_format(path: &str) -> bool {
    let validator = RouteValidator::new();
    let mut result = ValidationResult::success();
    validator.validate_path(path, &mut result);
    result.is_valid
}
