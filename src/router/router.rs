//! 路由器主结构体
//!
//! 整合路由表和历史策略，持有当前位置状态，
//! 并在每次导航完成后向订阅者分发导航事件。

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

use super::history::{HistoryStrategy, MemoryHistory};
use super::location::{split_query, NavigationEvent, NavigationKind, RouteLocation};
use super::route::PageComponent;
use super::table::{ResolvedRoute, RouteTable};
use crate::utils::{generate_id, NavError, Result};

// ============================================================================
// 导航统计
// ============================================================================

/// 导航统计信息
#[derive(Debug, Default)]
pub struct NavigationStats {
    /// 总导航次数
    total: AtomicU64,
    /// 命中路由表的导航次数
    matched: AtomicU64,
    /// 未命中路由表的导航次数
    unmatched: AtomicU64,
    /// 压入次数
    pushes: AtomicU64,
    /// 替换次数
    replaces: AtomicU64,
    /// 历史遍历次数（后退 + 前进）
    traversals: AtomicU64,
}

impl NavigationStats {
    /// 创建新的统计实例
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次导航
    pub fn record(&self, kind: NavigationKind, matched: bool) {
        self.total.fetch_add(1, Ordering::Relaxed);

        if matched {
            self.matched.fetch_add(1, Ordering::Relaxed);
        } else {
            self.unmatched.fetch_add(1, Ordering::Relaxed);
        }

        match kind {
            NavigationKind::Push => {
                self.pushes.fetch_add(1, Ordering::Relaxed);
            }
            NavigationKind::Replace => {
                self.replaces.fetch_add(1, Ordering::Relaxed);
            }
            NavigationKind::Back | NavigationKind::Forward => {
                self.traversals.fetch_add(1, Ordering::Relaxed);
            }
            NavigationKind::Initial => {}
        }
    }

    /// 获取统计快照
    pub fn snapshot(&self) -> NavigationStatsSnapshot {
        let total = self.total.load(Ordering::Relaxed);
        let matched = self.matched.load(Ordering::Relaxed);

        NavigationStatsSnapshot {
            total,
            matched,
            unmatched: self.unmatched.load(Ordering::Relaxed),
            pushes: self.pushes.load(Ordering::Relaxed),
            replaces: self.replaces.load(Ordering::Relaxed),
            traversals: self.traversals.load(Ordering::Relaxed),
            match_rate: if total > 0 {
                matched as f64 / total as f64
            } else {
                0.0
            },
        }
    }

    /// 重置统计
    pub fn reset(&self) {
        self.total.store(0, Ordering::Relaxed);
        self.matched.store(0, Ordering::Relaxed);
        self.unmatched.store(0, Ordering::Relaxed);
        self.pushes.store(0, Ordering::Relaxed);
        self.replaces.store(0, Ordering::Relaxed);
        self.traversals.store(0, Ordering::Relaxed);
    }
}

/// 导航统计快照
#[derive(Debug, Clone, serde::Serialize)]
pub struct NavigationStatsSnapshot {
    /// 总导航次数
    pub total: u64,
    /// 命中次数
    pub matched: u64,
    /// 未命中次数
    pub unmatched: u64,
    /// 压入次数
    pub pushes: u64,
    /// 替换次数
    pub replaces: u64,
    /// 历史遍历次数
    pub traversals: u64,
    /// 命中率
    pub match_rate: f64,
}

// ============================================================================
// 导航事件订阅
// ============================================================================

/// 导航事件回调
pub type NavigationCallback = Box<dyn Fn(&NavigationEvent) + Send + Sync>;

// ============================================================================
// 路由器
// ============================================================================

/// 路由器
///
/// 导航系统的核心组件，负责：
/// - 持有当前位置状态
/// - 将目标路径解析为路由表条目
/// - 驱动历史策略（压入、替换、前后遍历）
/// - 向订阅者分发导航事件
///
/// 路由表在构建后不可变；路由器自身的可变状态只有
/// 当前位置、历史游标和订阅者表。
pub struct Router {
    /// 路由表
    table: Arc<RouteTable>,

    /// 历史策略
    history: Mutex<Box<dyn HistoryStrategy>>,

    /// 当前位置
    current: RwLock<RouteLocation>,

    /// 导航事件订阅者（订阅 ID -> 回调）
    listeners: RwLock<HashMap<String, NavigationCallback>>,

    /// 导航统计
    stats: NavigationStats,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("table", &self.table)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl Router {
    /// 使用指定历史策略创建路由器
    ///
    /// 创建时立即解析历史策略的当前位置作为初始位置。
    pub fn new(table: RouteTable, history: Box<dyn HistoryStrategy>) -> Self {
        let table = Arc::new(table);
        let initial = Self::locate(&table, &history.location());

        info!(
            routes = table.len(),
            history = history.kind(),
            initial_path = %initial.path,
            "创建路由器"
        );

        Self {
            table,
            history: Mutex::new(history),
            current: RwLock::new(initial),
            listeners: RwLock::new(HashMap::new()),
            stats: NavigationStats::new(),
        }
    }

    /// 使用内存历史创建路由器
    pub fn with_memory_history(table: RouteTable) -> Self {
        Self::new(table, Box::new(MemoryHistory::new()))
    }

    /// 将完整路径解析为路由位置
    ///
    /// 未命中路由表时返回无匹配位置：导航本身不失败，
    /// 这是未声明兜底路由时的默认行为。
    fn locate(table: &RouteTable, full_path: &str) -> RouteLocation {
        let (path, query) = split_query(full_path);

        match table.resolve(path) {
            Some(resolved) => {
                RouteLocation::matched(path, resolved.name, resolved.params).with_query(query)
            }
            None => RouteLocation::unmatched(path).with_query(query),
        }
    }

    /// 执行一次导航
    ///
    /// 先驱动历史策略，再解析目标位置、更新当前位置，
    /// 最后分发导航事件。
    #[instrument(skip(self), fields(kind = %kind, path = %full_path))]
    fn navigate(&self, kind: NavigationKind, full_path: &str) -> Result<NavigationEvent> {
        // 1. 驱动历史策略
        {
            let mut history = self.history.lock().unwrap();
            match kind {
                NavigationKind::Push => history.push(full_path)?,
                NavigationKind::Replace => history.replace(full_path)?,
                // 遍历类导航在调用方已移动游标
                _ => {}
            }
        }

        // 2. 解析目标位置
        let to = Self::locate(&self.table, full_path);

        if !to.matched {
            warn!(path = %to.path, "导航到未声明的路径（无匹配状态）");
        }

        // 3. 更新当前位置
        let from = {
            let mut current = self.current.write().unwrap();
            std::mem::replace(&mut *current, to.clone())
        };

        // 4. 记录统计并分发事件
        self.stats.record(kind, to.matched);

        let event = NavigationEvent::new(kind, from, to);
        self.dispatch(&event);

        debug!(
            navigation_id = %event.id,
            matched = event.to.matched,
            route_name = event.to.name.as_deref().unwrap_or("-"),
            "导航完成"
        );

        Ok(event)
    }

    /// 分发导航事件给所有订阅者
    fn dispatch(&self, event: &NavigationEvent) {
        let listeners = self.listeners.read().unwrap();
        for callback in listeners.values() {
            callback(event);
        }
    }

    // ========================================================================
    // 导航操作
    // ========================================================================

    /// 压入新位置
    ///
    /// 目标路径可带查询串。未命中路由表时导航仍然成功，
    /// 当前位置进入无匹配状态。
    pub fn push(&self, path: &str) -> Result<NavigationEvent> {
        self.navigate(NavigationKind::Push, path)
    }

    /// 替换当前位置（不产生历史条目）
    pub fn replace(&self, path: &str) -> Result<NavigationEvent> {
        self.navigate(NavigationKind::Replace, path)
    }

    /// 命名导航：按路由名称和参数压入
    pub fn push_named(
        &self,
        name: &str,
        params: &HashMap<String, String>,
    ) -> Result<NavigationEvent> {
        let path = self.table.resolve_by_name(name, params)?;
        self.push(&path)
    }

    /// 历史后退一步
    pub fn back(&self) -> Result<NavigationEvent> {
        let path = {
            let mut history = self.history.lock().unwrap();
            history.go(-1)?
        };
        self.navigate(NavigationKind::Back, &path)
    }

    /// 历史前进一步
    pub fn forward(&self) -> Result<NavigationEvent> {
        let path = {
            let mut history = self.history.lock().unwrap();
            history.go(1)?
        };
        self.navigate(NavigationKind::Forward, &path)
    }

    /// 按偏移遍历历史
    pub fn go(&self, delta: i64) -> Result<NavigationEvent> {
        if delta == 0 {
            return Err(NavError::Internal("go(0) 不是有效的历史遍历".to_string()));
        }

        let kind = if delta < 0 {
            NavigationKind::Back
        } else {
            NavigationKind::Forward
        };

        let path = {
            let mut history = self.history.lock().unwrap();
            history.go(delta)?
        };
        self.navigate(kind, &path)
    }

    // ========================================================================
    // 查询接口
    // ========================================================================

    /// 当前位置
    pub fn current(&self) -> RouteLocation {
        self.current.read().unwrap().clone()
    }

    /// 解析路径但不导航
    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute> {
        let (pure_path, _) = split_query(path);
        self.table.resolve(pure_path)
    }

    /// 当前激活的页面组件
    ///
    /// 当前位置处于无匹配状态时返回 `None`。
    pub fn active_component(&self) -> Option<Arc<dyn PageComponent>> {
        let current = self.current.read().unwrap();
        if !current.matched {
            return None;
        }
        self.table.resolve(&current.path).map(|r| r.component)
    }

    /// 订阅导航事件
    ///
    /// 返回订阅 ID，用于退订。
    pub fn subscribe(&self, callback: NavigationCallback) -> String {
        let id = generate_id();
        let mut listeners = self.listeners.write().unwrap();
        listeners.insert(id.clone(), callback);
        debug!(subscription_id = %id, "注册导航事件订阅");
        id
    }

    /// 退订导航事件
    pub fn unsubscribe(&self, id: &str) -> bool {
        let mut listeners = self.listeners.write().unwrap();
        listeners.remove(id).is_some()
    }

    /// 当前订阅者数量
    pub fn subscriber_count(&self) -> usize {
        self.listeners.read().unwrap().len()
    }

    /// 获取路由表引用
    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }

    /// 历史条目数量
    pub fn history_len(&self) -> usize {
        self.history.lock().unwrap().len()
    }

    /// 历史游标位置
    pub fn history_position(&self) -> usize {
        self.history.lock().unwrap().position()
    }

    /// 获取统计快照
    pub fn stats(&self) -> NavigationStatsSnapshot {
        self.stats.snapshot()
    }

    /// 重置统计信息
    pub fn reset_stats(&self) {
        self.stats.reset();
    }
}
