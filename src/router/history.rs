//! 历史策略
//!
//! 路由器通过历史策略持有导航状态。策略采用干净 URL 语义：
//! 位置是完整路径（可带查询串），不使用片段（`#`）表示导航状态。
//!
//! 内核内置 [`MemoryHistory`]：进程内的条目栈加游标，
//! 支持压入、替换和前后遍历，压入时截断前进分支。

use tracing::debug;

use crate::utils::{NavError, Result};

// ============================================================================
// 历史策略 trait
// ============================================================================

/// 历史策略 trait
///
/// 导航状态的持有者。路由器对策略的要求只有：报告当前位置、
/// 接受压入/替换、支持按偏移遍历。
pub trait HistoryStrategy: Send + Sync {
    /// 策略种类标识
    fn kind(&self) -> &'static str;

    /// 当前位置（不含 base 前缀）
    fn location(&self) -> String;

    /// 压入新位置
    ///
    /// 游标不在栈顶时截断前进分支。
    fn push(&mut self, path: &str) -> Result<()>;

    /// 替换当前位置（不产生新条目）
    fn replace(&mut self, path: &str) -> Result<()>;

    /// 按偏移移动游标，返回移动后的位置
    ///
    /// `delta` 为负表示后退，为正表示前进。越界返回错误且游标不动。
    fn go(&mut self, delta: i64) -> Result<String>;

    /// 当前游标位置（从 0 开始）
    fn position(&self) -> usize;

    /// 历史条目数量
    fn len(&self) -> usize;

    /// 历史是否只有初始条目
    fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

// ============================================================================
// 内存历史
// ============================================================================

/// 初始位置
const INITIAL_LOCATION: &str = "/";

/// 内存历史策略
///
/// 条目栈加游标。所有位置是干净（无片段）的完整路径；
/// 可选的 base 前缀在对外呈现完整位置时拼接。
pub struct MemoryHistory {
    /// base 前缀（规范化后不以 `/` 结尾）
    base: String,
    /// 历史条目
    entries: Vec<String>,
    /// 游标位置
    position: usize,
}

impl MemoryHistory {
    /// 创建内存历史，初始位置为根路径
    pub fn new() -> Self {
        Self {
            base: String::new(),
            entries: vec![INITIAL_LOCATION.to_string()],
            position: 0,
        }
    }

    /// 创建带 base 前缀的内存历史
    pub fn with_base(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            base,
            entries: vec![INITIAL_LOCATION.to_string()],
            position: 0,
        }
    }

    /// 创建以指定位置为初始条目的内存历史
    pub fn starting_at(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        Self::check_path(&path)?;
        Ok(Self {
            base: String::new(),
            entries: vec![path],
            position: 0,
        })
    }

    /// base 前缀
    pub fn base(&self) -> &str {
        &self.base
    }

    /// 含 base 前缀的完整位置
    pub fn full_location(&self) -> String {
        format!("{}{}", self.base, self.entries[self.position])
    }

    /// 所有历史条目（按时间顺序）
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// 路径合法性检查
    fn check_path(path: &str) -> Result<()> {
        if !path.starts_with('/') {
            return Err(NavError::InvalidPath(path.to_string()));
        }
        Ok(())
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStrategy for MemoryHistory {
    fn kind(&self) -> &'static str {
        "memory"
    }

    fn location(&self) -> String {
        self.entries[self.position].clone()
    }

    fn push(&mut self, path: &str) -> Result<()> {
        Self::check_path(path)?;

        // 截断前进分支
        self.entries.truncate(self.position + 1);
        self.entries.push(path.to_string());
        self.position += 1;

        debug!(path, position = self.position, "历史压入新位置");
        Ok(())
    }

    fn replace(&mut self, path: &str) -> Result<()> {
        Self::check_path(path)?;

        self.entries[self.position] = path.to_string();

        debug!(path, position = self.position, "历史替换当前位置");
        Ok(())
    }

    fn go(&mut self, delta: i64) -> Result<String> {
        let target = self.position as i64 + delta;

        if target < 0 || target >= self.entries.len() as i64 {
            return Err(NavError::HistoryOutOfRange {
                delta,
                position: self.position,
                len: self.entries.len(),
            });
        }

        self.position = target as usize;
        Ok(self.entries[self.position].clone())
    }

    fn position(&self) -> usize {
        self.position
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let history = MemoryHistory::new();
        assert_eq!(history.location(), "/");
        assert_eq!(history.position(), 0);
        assert_eq!(history.len(), 1);
        assert!(history.is_empty());
        assert_eq!(history.kind(), "memory");
    }

    #[test]
    fn test_push() {
        let mut history = MemoryHistory::new();
        history.push("/xaffman").unwrap();

        assert_eq!(history.location(), "/xaffman");
        assert_eq!(history.position(), 1);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_push_rejects_relative_path() {
        let mut history = MemoryHistory::new();
        let err = history.push("xaffman").unwrap_err();
        assert!(matches!(err, NavError::InvalidPath(_)));
    }

    #[test]
    fn test_replace_keeps_length() {
        let mut history = MemoryHistory::new();
        history.push("/a").unwrap();
        history.replace("/b").unwrap();

        assert_eq!(history.location(), "/b");
        assert_eq!(history.len(), 2);
        assert_eq!(history.entries(), &["/".to_string(), "/b".to_string()]);
    }

    #[test]
    fn test_back_and_forward() {
        let mut history = MemoryHistory::new();
        history.push("/a").unwrap();
        history.push("/b").unwrap();

        assert_eq!(history.go(-1).unwrap(), "/a");
        assert_eq!(history.go(-1).unwrap(), "/");
        assert_eq!(history.go(2).unwrap(), "/b");
    }

    #[test]
    fn test_go_out_of_range() {
        let mut history = MemoryHistory::new();
        history.push("/a").unwrap();

        let err = history.go(-5).unwrap_err();
        assert!(matches!(err, NavError::HistoryOutOfRange { .. }));

        // 越界后游标不动
        assert_eq!(history.location(), "/a");
        assert_eq!(history.position(), 1);
    }

    #[test]
    fn test_push_truncates_forward_branch() {
        let mut history = MemoryHistory::new();
        history.push("/a").unwrap();
        history.push("/b").unwrap();
        history.go(-2).unwrap();

        // 从中间压入，/a 与 /b 丢弃
        history.push("/c").unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history.location(), "/c");
        assert!(history.go(1).is_err());
    }

    #[test]
    fn test_base_prefix() {
        let mut history = MemoryHistory::with_base("/app/");
        assert_eq!(history.base(), "/app");
        assert_eq!(history.full_location(), "/app/");

        history.push("/xaffman").unwrap();
        assert_eq!(history.location(), "/xaffman");
        assert_eq!(history.full_location(), "/app/xaffman");
    }

    #[test]
    fn test_starting_at() {
        let history = MemoryHistory::starting_at("/xaffman").unwrap();
        assert_eq!(history.location(), "/xaffman");

        assert!(MemoryHistory::starting_at("bad").is_err());
    }
}
