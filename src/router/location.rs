//! 路由位置与导航事件数据结构
//!
//! 定义路由器持有的当前位置状态，以及每次导航完成后
//! 分发给订阅者的事件消息。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::utils::generate_id;

// ============================================================================
// 导航类型
// ============================================================================

/// 导航类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationKind {
    /// 初始位置（外壳启动时从历史策略同步）
    Initial,
    /// 压入新位置
    Push,
    /// 替换当前位置
    Replace,
    /// 历史后退
    Back,
    /// 历史前进
    Forward,
}

impl std::fmt::Display for NavigationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NavigationKind::Initial => write!(f, "initial"),
            NavigationKind::Push => write!(f, "push"),
            NavigationKind::Replace => write!(f, "replace"),
            NavigationKind::Back => write!(f, "back"),
            NavigationKind::Forward => write!(f, "forward"),
        }
    }
}

// ============================================================================
// 路由位置
// ============================================================================

/// 路由位置
///
/// 一次路径解析的完整结果：路径、命中的路由名称、捕获的参数
/// 和查询串。未命中任何路由时 `name` 为 `None` 且 `matched` 为 false，
/// 这是未声明兜底路由时的默认无匹配状态。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteLocation {
    /// 本次导航的唯一标识
    pub navigation_id: String,

    /// 规范化后的路径（不含查询串）
    pub path: String,

    /// 命中的路由名称（未命中时为 None）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// 捕获的路径参数
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub params: HashMap<String, String>,

    /// 查询串键值对
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub query: HashMap<String, String>,

    /// 是否命中路由表
    pub matched: bool,

    /// 位置产生时间
    pub timestamp: DateTime<Utc>,
}

impl RouteLocation {
    /// 创建命中路由的位置
    pub fn matched(
        path: impl Into<String>,
        name: impl Into<String>,
        params: HashMap<String, String>,
    ) -> Self {
        Self {
            navigation_id: generate_id(),
            path: path.into(),
            name: Some(name.into()),
            params,
            query: HashMap::new(),
            matched: true,
            timestamp: Utc::now(),
        }
    }

    /// 创建未命中路由的位置（无匹配状态）
    pub fn unmatched(path: impl Into<String>) -> Self {
        Self {
            navigation_id: generate_id(),
            path: path.into(),
            name: None,
            params: HashMap::new(),
            query: HashMap::new(),
            matched: false,
            timestamp: Utc::now(),
        }
    }

    /// 附加查询串
    pub fn with_query(mut self, query: HashMap<String, String>) -> Self {
        self.query = query;
        self
    }
}

/// 从完整路径中剥离查询串
///
/// 返回 (纯路径, 查询键值对)。片段（`#...`）一并丢弃：
/// 干净 URL 策略下片段不参与导航状态。
pub fn split_query(full_path: &str) -> (&str, HashMap<String, String>) {
    let without_fragment = full_path.split('#').next().unwrap_or(full_path);

    match without_fragment.split_once('?') {
        Some((path, raw_query)) => {
            let mut query = HashMap::new();
            for pair in raw_query.split('&').filter(|p| !p.is_empty()) {
                match pair.split_once('=') {
                    Some((k, v)) => query.insert(k.to_string(), v.to_string()),
                    None => query.insert(pair.to_string(), String::new()),
                };
            }
            (path, query)
        }
        None => (without_fragment, HashMap::new()),
    }
}

// ============================================================================
// 导航事件
// ============================================================================

/// 导航事件
///
/// 每次导航完成后分发给订阅者。`from` 为导航前的位置，
/// `to` 为导航后的位置。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationEvent {
    /// 事件 ID（与目标位置的 navigation_id 一致）
    pub id: String,

    /// 导航类型
    pub kind: NavigationKind,

    /// 导航前的位置
    pub from: RouteLocation,

    /// 导航后的位置
    pub to: RouteLocation,

    /// 事件产生时间
    pub timestamp: DateTime<Utc>,
}

impl NavigationEvent {
    /// 创建导航事件
    pub fn new(kind: NavigationKind, from: RouteLocation, to: RouteLocation) -> Self {
        Self {
            id: to.navigation_id.clone(),
            kind,
            from,
            to,
            timestamp: Utc::now(),
        }
    }
}
