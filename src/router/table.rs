//! 路由表数据结构
//!
//! 管理路径到页面组件的映射关系。路由表在构建时一次成型，
//! 此后不可变；解析按声明顺序取首个匹配。
//! 包含 LRU 缓存优化，提升路径解析性能。

use lru::LruCache;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use super::route::{PageComponent, RouteDef, RouteKind, RouteRecord};
use super::validator::RouteValidator;
use crate::utils::{NavError, Result};

// ============================================================================
// 解析缓存
// ============================================================================

/// 默认缓存容量
const DEFAULT_CACHE_CAPACITY: usize = 256;

/// 解析缓存统计信息
#[derive(Debug, Clone, Serialize)]
pub struct ResolveCacheStats {
    /// 缓存命中次数
    pub hits: u64,
    /// 缓存未命中次数
    pub misses: u64,
    /// 缓存条目数量
    pub size: usize,
    /// 缓存容量
    pub capacity: usize,
    /// 命中率（百分比）
    pub hit_rate: f64,
}

/// 解析缓存
///
/// 使用 LRU 算法缓存最近解析过的路径，重复导航到同一路径时
/// 跳过逐条匹配。表不可变，因此缓存永不失效。
pub struct ResolveCache {
    /// LRU 缓存（规范化路径 -> ResolvedRoute）
    cache: Mutex<LruCache<String, ResolvedRoute>>,
    /// 缓存命中次数
    hits: AtomicU64,
    /// 缓存未命中次数
    misses: AtomicU64,
    /// 缓存容量
    capacity: usize,
}

impl ResolveCache {
    /// 创建新的解析缓存
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN),
            )),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            capacity,
        }
    }

    /// 从缓存获取解析结果
    pub fn get(&self, path: &str) -> Option<ResolvedRoute> {
        let mut cache = self.cache.lock().unwrap();
        if let Some(resolved) = cache.get(path).cloned() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            Some(resolved)
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            None
        }
    }

    /// 将解析结果放入缓存
    pub fn put(&self, path: String, resolved: ResolvedRoute) {
        let mut cache = self.cache.lock().unwrap();
        cache.put(path, resolved);
    }

    /// 清空所有缓存
    pub fn clear(&self) {
        let mut cache = self.cache.lock().unwrap();
        cache.clear();
    }

    /// 获取缓存统计信息
    pub fn stats(&self) -> ResolveCacheStats {
        let cache = self.cache.lock().unwrap();
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;

        ResolveCacheStats {
            hits,
            misses,
            size: cache.len(),
            capacity: self.capacity,
            hit_rate: if total > 0 {
                (hits as f64 / total as f64) * 100.0
            } else {
                0.0
            },
        }
    }

    /// 重置统计计数器
    pub fn reset_stats(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

// ============================================================================
// 解析结果
// ============================================================================

/// 路径解析结果
///
/// 路径命中路由表后得到的条目视图：命中路由的名称、路径模式、
/// 捕获的参数和绑定的页面组件。
#[derive(Clone)]
pub struct ResolvedRoute {
    /// 命中路由的逻辑名称
    pub name: String,
    /// 命中路由的路径模式
    pub pattern: String,
    /// 捕获的路径参数
    pub params: HashMap<String, String>,
    /// 声明顺序
    pub index: usize,
    /// 绑定的页面组件
    pub component: Arc<dyn PageComponent>,
}

impl fmt::Debug for ResolvedRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedRoute")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .field("params", &self.params)
            .field("index", &self.index)
            .finish()
    }
}

// ============================================================================
// 路由表配置
// ============================================================================

/// 路由表配置
#[derive(Debug, Clone)]
pub struct RouteTableConfig {
    /// 是否启用解析缓存
    pub cache_enabled: bool,
    /// 缓存容量
    pub cache_capacity: usize,
    /// 是否严格区分尾斜杠（false 时 `/xaffman/` 等价于 `/xaffman`）
    pub strict_trailing_slash: bool,
}

impl Default for RouteTableConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            strict_trailing_slash: false,
        }
    }
}

// ============================================================================
// 路由表
// ============================================================================

/// 路由表
///
/// 有序的路由记录序列。构建后不可变，解析按声明顺序取首个匹配。
pub struct RouteTable {
    /// 路由记录（按声明顺序）
    records: Vec<RouteRecord>,

    /// 名称索引（name -> records 下标）
    by_name: HashMap<String, usize>,

    /// 解析缓存
    cache: Option<ResolveCache>,

    /// 配置
    config: RouteTableConfig,
}

impl RouteTable {
    /// 创建路由表构建器
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::new()
    }

    /// 解析路径，返回首个匹配的路由
    ///
    /// 路径须以 `/` 开头且不含查询串。未命中任何路由返回 `None`，
    /// 由调用方决定无匹配状态的表现。
    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute> {
        if !path.starts_with('/') {
            return None;
        }

        let normalized = self.normalize(path);

        // 1. 尝试从缓存获取
        if let Some(ref cache) = self.cache {
            if let Some(resolved) = cache.get(&normalized) {
                return Some(resolved);
            }
        }

        // 2. 按声明顺序逐条匹配
        let resolved = self.resolve_uncached(&normalized);

        // 3. 命中结果放入缓存
        if let Some(ref found) = resolved {
            if let Some(ref cache) = self.cache {
                cache.put(normalized, found.clone());
            }
        }

        resolved
    }

    /// 跳过缓存的解析
    fn resolve_uncached(&self, normalized: &str) -> Option<ResolvedRoute> {
        for record in &self.records {
            if let Some(m) = record.matches(normalized) {
                return Some(ResolvedRoute {
                    name: record.name().to_string(),
                    pattern: record.path().to_string(),
                    params: m.params,
                    index: record.index(),
                    component: Arc::clone(record.component()),
                });
            }
        }
        None
    }

    /// 按名称查找路由记录
    pub fn record_by_name(&self, name: &str) -> Option<&RouteRecord> {
        self.by_name.get(name).map(|&i| &self.records[i])
    }

    /// 命名解析：由名称和参数构建具体路径
    pub fn resolve_by_name(
        &self,
        name: &str,
        params: &HashMap<String, String>,
    ) -> Result<String> {
        let record = self
            .record_by_name(name)
            .ok_or_else(|| NavError::RouteNotFound(name.to_string()))?;
        record.build_path(params)
    }

    /// 路径规范化
    ///
    /// 非严格模式下去除尾斜杠（根路径除外）。
    fn normalize(&self, path: &str) -> String {
        if !self.config.strict_trailing_slash && path.len() > 1 && path.ends_with('/') {
            let trimmed = path.trim_end_matches('/');
            if trimmed.is_empty() {
                "/".to_string()
            } else {
                trimmed.to_string()
            }
        } else {
            path.to_string()
        }
    }

    /// 路由条目数量
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// 路由表是否为空
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 所有路径模式（按声明顺序）
    pub fn paths(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.path()).collect()
    }

    /// 所有路由名称（按声明顺序）
    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name()).collect()
    }

    /// 遍历路由记录（按声明顺序）
    pub fn records(&self) -> impl Iterator<Item = &RouteRecord> {
        self.records.iter()
    }

    /// 导出路由表（用于调试）
    pub fn export(&self) -> RouteTableExport {
        RouteTableExport {
            routes: self
                .records
                .iter()
                .map(|r| RouteExportEntry {
                    path: r.path().to_string(),
                    name: r.name().to_string(),
                    kind: r.kind(),
                    component: r.component().component_name().to_string(),
                })
                .collect(),
        }
    }

    /// 获取路由表统计信息
    pub fn stats(&self) -> RouteTableStats {
        let mut static_count = 0;
        let mut dynamic_count = 0;
        let mut has_catch_all = false;

        for record in &self.records {
            match record.kind() {
                RouteKind::Static => static_count += 1,
                RouteKind::Dynamic => dynamic_count += 1,
                RouteKind::CatchAll => has_catch_all = true,
            }
        }

        RouteTableStats {
            route_count: self.records.len(),
            static_count,
            dynamic_count,
            has_catch_all,
            cache_stats: self.cache.as_ref().map(|c| c.stats()),
        }
    }

    /// 获取缓存统计信息
    pub fn cache_stats(&self) -> Option<ResolveCacheStats> {
        self.cache.as_ref().map(|c| c.stats())
    }

    /// 检查缓存是否启用
    pub fn is_cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// 获取配置
    pub fn config(&self) -> &RouteTableConfig {
        &self.config
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("records", &self.records)
            .field("cache_enabled", &self.cache.is_some())
            .finish()
    }
}

/// 路由表导出数据
#[derive(Debug, Clone, Serialize)]
pub struct RouteTableExport {
    /// 导出的路由条目（按声明顺序）
    pub routes: Vec<RouteExportEntry>,
}

/// 导出的路由条目
#[derive(Debug, Clone, Serialize)]
pub struct RouteExportEntry {
    /// 路径模式
    pub path: String,
    /// 逻辑名称
    pub name: String,
    /// 路由种类
    pub kind: RouteKind,
    /// 绑定组件名称
    pub component: String,
}

/// 路由表统计信息
#[derive(Debug, Clone, Serialize)]
pub struct RouteTableStats {
    /// 路由条目总数
    pub route_count: usize,
    /// 静态路由数
    pub static_count: usize,
    /// 动态路由数
    pub dynamic_count: usize,
    /// 是否声明了兜底路由
    pub has_catch_all: bool,
    /// 缓存统计（如果启用）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_stats: Option<ResolveCacheStats>,
}

// ============================================================================
// 路由表构建器
// ============================================================================

/// 路由表构建器
///
/// 收集路由声明，`build` 时统一做格式验证、唯一性检查和编译。
/// 相同声明的重复构建产生相同的 path → name 映射。
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    defs: Vec<RouteDef>,
    config: RouteTableConfig,
}

impl RouteTableBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self {
            defs: Vec::new(),
            config: RouteTableConfig::default(),
        }
    }

    /// 添加路由声明
    pub fn route(mut self, def: RouteDef) -> Self {
        self.defs.push(def);
        self
    }

    /// 批量添加路由声明
    pub fn routes(mut self, defs: impl IntoIterator<Item = RouteDef>) -> Self {
        self.defs.extend(defs);
        self
    }

    /// 设置路由表配置
    pub fn config(mut self, config: RouteTableConfig) -> Self {
        self.config = config;
        self
    }

    /// 禁用解析缓存
    pub fn without_cache(mut self) -> Self {
        self.config.cache_enabled = false;
        self
    }

    /// 构建路由表
    ///
    /// 重复的 path 或 name、格式非法的声明都会使构建失败。
    pub fn build(self) -> Result<RouteTable> {
        let validator = RouteValidator::new();
        validator.validate_defs(&self.defs).into_result()?;

        let mut records = Vec::with_capacity(self.defs.len());
        let mut by_name = HashMap::with_capacity(self.defs.len());

        for (index, def) in self.defs.into_iter().enumerate() {
            let name = def.name.clone();
            let record = RouteRecord::compile(def, index)?;
            records.push(record);
            by_name.insert(name, index);
        }

        let cache = if self.config.cache_enabled {
            Some(ResolveCache::new(self.config.cache_capacity))
        } else {
            None
        };

        Ok(RouteTable {
            records,
            by_name,
            cache,
            config: self.config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::route::StaticPage;

    fn def(path: &str, name: &str) -> RouteDef {
        RouteDef::with_page(path, name, StaticPage::new(name, ""))
    }

    fn demo_table() -> RouteTable {
        RouteTable::builder()
            .route(def("/", "ShennonFano"))
            .route(def("/xaffman", "Xaffman"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_resolve_root() {
        let table = demo_table();
        let resolved = table.resolve("/").unwrap();
        assert_eq!(resolved.name, "ShennonFano");
    }

    #[test]
    fn test_resolve_static() {
        let table = demo_table();
        let resolved = table.resolve("/xaffman").unwrap();
        assert_eq!(resolved.name, "Xaffman");
        assert_eq!(resolved.pattern, "/xaffman");
    }

    #[test]
    fn test_resolve_unknown() {
        let table = demo_table();
        assert!(table.resolve("/unknown").is_none());
    }

    #[test]
    fn test_name_and_path_sets() {
        let table = demo_table();
        assert_eq!(table.names(), vec!["ShennonFano", "Xaffman"]);
        assert_eq!(table.paths(), vec!["/", "/xaffman"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let result = RouteTable::builder()
            .route(def("/xaffman", "A"))
            .route(def("/xaffman", "B"))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let result = RouteTable::builder()
            .route(def("/a", "Xaffman"))
            .route(def("/b", "Xaffman"))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_build_idempotent() {
        let first = demo_table();
        let second = demo_table();

        for path in ["/", "/xaffman"] {
            let a = first.resolve(path).unwrap();
            let b = second.resolve(path).unwrap();
            assert_eq!(a.name, b.name);
            assert_eq!(a.pattern, b.pattern);
        }
    }

    #[test]
    fn test_first_match_order() {
        // 参数路由先声明时优先于后声明的静态路由
        let table = RouteTable::builder()
            .route(def("/demo/:algo", "Demo"))
            .route(def("/demo/huffman", "Huffman"))
            .build()
            .unwrap();

        let resolved = table.resolve("/demo/huffman").unwrap();
        assert_eq!(resolved.name, "Demo");
    }

    #[test]
    fn test_catch_all_route() {
        let table = RouteTable::builder()
            .route(def("/", "Home"))
            .route(def("/*rest", "NotFound"))
            .build()
            .unwrap();

        let resolved = table.resolve("/no/such/page").unwrap();
        assert_eq!(resolved.name, "NotFound");
        assert_eq!(
            resolved.params.get("rest").map(String::as_str),
            Some("no/such/page")
        );
    }

    #[test]
    fn test_trailing_slash_normalization() {
        let table = demo_table();
        let resolved = table.resolve("/xaffman/").unwrap();
        assert_eq!(resolved.name, "Xaffman");
    }

    #[test]
    fn test_strict_trailing_slash() {
        let table = RouteTable::builder()
            .route(def("/xaffman", "Xaffman"))
            .config(RouteTableConfig {
                strict_trailing_slash: true,
                ..Default::default()
            })
            .build()
            .unwrap();

        assert!(table.resolve("/xaffman/").is_none());
        assert!(table.resolve("/xaffman").is_some());
    }

    #[test]
    fn test_resolve_by_name() {
        let table = demo_table();
        let path = table.resolve_by_name("Xaffman", &HashMap::new()).unwrap();
        assert_eq!(path, "/xaffman");

        let err = table.resolve_by_name("Unknown", &HashMap::new()).unwrap_err();
        assert!(matches!(err, NavError::RouteNotFound(_)));
    }

    #[test]
    fn test_resolve_by_name_with_params() {
        let table = RouteTable::builder()
            .route(def("/demo/:algo", "Demo"))
            .build()
            .unwrap();

        let mut params = HashMap::new();
        params.insert("algo".to_string(), "huffman".to_string());
        let path = table.resolve_by_name("Demo", &params).unwrap();
        assert_eq!(path, "/demo/huffman");
    }

    #[test]
    fn test_cache_hit_and_stats() {
        let table = demo_table();
        assert!(table.is_cache_enabled());

        // 第一次解析（缓存未命中）
        table.resolve("/xaffman");
        // 第二次解析（缓存命中）
        table.resolve("/xaffman");

        let stats = table.cache_stats().unwrap();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_rate - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_without_cache() {
        let table = RouteTable::builder()
            .route(def("/", "Home"))
            .without_cache()
            .build()
            .unwrap();

        assert!(!table.is_cache_enabled());
        assert!(table.cache_stats().is_none());
        assert!(table.resolve("/").is_some());
    }

    #[test]
    fn test_cache_lru_eviction() {
        let cache = ResolveCache::new(2);
        let table = demo_table();

        let a = table.resolve("/").unwrap();
        cache.put("/a".to_string(), a.clone());
        cache.put("/b".to_string(), a.clone());
        cache.put("/c".to_string(), a); // 应该驱逐 /a

        assert!(cache.get("/a").is_none());
        assert!(cache.get("/b").is_some());
        assert!(cache.get("/c").is_some());
    }

    #[test]
    fn test_export() {
        let table = demo_table();
        let export = table.export();

        assert_eq!(export.routes.len(), 2);
        assert_eq!(export.routes[0].path, "/");
        assert_eq!(export.routes[0].name, "ShennonFano");
        assert_eq!(export.routes[1].path, "/xaffman");

        // 导出结果可序列化
        let json = serde_json::to_string(&export).unwrap();
        assert!(json.contains("Xaffman"));
    }

    #[test]
    fn test_stats() {
        let table = RouteTable::builder()
            .route(def("/", "Home"))
            .route(def("/demo/:algo", "Demo"))
            .route(def("/*rest", "NotFound"))
            .build()
            .unwrap();

        let stats = table.stats();
        assert_eq!(stats.route_count, 3);
        assert_eq!(stats.static_count, 1);
        assert_eq!(stats.dynamic_count, 1);
        assert!(stats.has_catch_all);
    }
}
