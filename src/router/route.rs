//! 路由与页面组件数据结构
//!
//! 定义路由声明（path + name + 页面组件）以及编译后的路由记录。
//! 路由记录负责路径段匹配：静态段、参数段（`:id`）和通配段（`*rest`）。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::utils::{NavError, Result};

// ============================================================================
// 页面组件
// ============================================================================

/// 页面组件 trait
///
/// 路由绑定的可渲染产物。对路由层而言组件是不透明的：
/// 内核只要求它能在对应路径下渲染，不约定其内部数据契约。
pub trait PageComponent: Send + Sync {
    /// 组件名称
    fn component_name(&self) -> &str;

    /// 渲染组件，返回渲染结果
    fn render(&self) -> String;
}

/// 静态页面组件
///
/// 内置的最简页面组件实现，用于演示程序和测试。
#[derive(Debug, Clone)]
pub struct StaticPage {
    name: String,
    content: String,
}

impl StaticPage {
    /// 创建静态页面
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

impl PageComponent for StaticPage {
    fn component_name(&self) -> &str {
        &self.name
    }

    fn render(&self) -> String {
        self.content.clone()
    }
}

// ============================================================================
// 路由声明
// ============================================================================

/// 路由声明
///
/// 一条 path → 页面组件的声明式绑定，带有表内唯一的逻辑名称。
/// 声明在路由表构建时编译为 [`RouteRecord`]。
#[derive(Clone)]
pub struct RouteDef {
    /// URL 路径模式（必须以 `/` 开头）
    pub path: String,

    /// 逻辑名称（表内唯一）
    pub name: String,

    /// 绑定的页面组件
    pub component: Arc<dyn PageComponent>,
}

impl RouteDef {
    /// 创建路由声明
    pub fn new(
        path: impl Into<String>,
        name: impl Into<String>,
        component: Arc<dyn PageComponent>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            component,
        }
    }

    /// 使用静态页面创建路由声明
    pub fn with_page(
        path: impl Into<String>,
        name: impl Into<String>,
        page: StaticPage,
    ) -> Self {
        Self::new(path, name, Arc::new(page))
    }
}

impl fmt::Debug for RouteDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDef")
            .field("path", &self.path)
            .field("name", &self.name)
            .field("component", &self.component.component_name())
            .finish()
    }
}

// ============================================================================
// 路径段
// ============================================================================

/// 路径段
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    /// 静态段，逐字匹配
    Static(String),
    /// 参数段（`:id`），匹配单个非空段并捕获
    Param(String),
    /// 通配段（`*rest`），匹配余下全部段并捕获
    CatchAll(String),
}

/// 路由种类（由路径段推导）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    /// 纯静态路径
    Static,
    /// 含参数段
    Dynamic,
    /// 含通配段
    CatchAll,
}

/// 将路径拆分为非空段
///
/// 根路径 `/` 拆分为空段列表。查询串和片段不属于路径，调用方需先剥离。
pub(crate) fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

// ============================================================================
// 路由记录
// ============================================================================

/// 解析路径模式为路径段序列，并推导路由种类
fn parse_segments(path: &str) -> Result<(Vec<Segment>, RouteKind)> {
    let raw_segments = split_segments(path);
    let mut segments = Vec::with_capacity(raw_segments.len());
    let mut kind = RouteKind::Static;

    for (i, raw) in raw_segments.iter().enumerate() {
        if let Some(param) = raw.strip_prefix(':') {
            if param.is_empty() {
                return Err(NavError::InvalidRoute(format!("路径 '{}' 含有空参数段", path)));
            }
            if kind == RouteKind::Static {
                kind = RouteKind::Dynamic;
            }
            segments.push(Segment::Param(param.to_string()));
        } else if let Some(rest) = raw.strip_prefix('*') {
            if rest.is_empty() {
                return Err(NavError::InvalidRoute(format!(
                    "路径 '{}' 含有未命名通配段",
                    path
                )));
            }
            // 通配段必须是最后一段
            if i + 1 != raw_segments.len() {
                return Err(NavError::InvalidRoute(format!(
                    "路径 '{}' 的通配段后仍有路径段",
                    path
                )));
            }
            kind = RouteKind::CatchAll;
            segments.push(Segment::CatchAll(rest.to_string()));
        } else {
            segments.push(Segment::Static((*raw).to_string()));
        }
    }

    Ok((segments, kind))
}

/// 路径匹配结果
#[derive(Debug, Clone, Default)]
pub struct PathMatch {
    /// 捕获的路径参数
    pub params: HashMap<String, String>,
}

/// 编译后的路由记录
///
/// 路由表中的一个条目：原始声明加上解析好的路径段。
/// 记录在表构建后不可变。
pub struct RouteRecord {
    path: String,
    name: String,
    component: Arc<dyn PageComponent>,
    segments: Vec<Segment>,
    kind: RouteKind,
    index: usize,
}

impl RouteRecord {
    /// 编译路由声明
    ///
    /// `index` 为声明顺序，决定首个匹配的解析次序。
    /// 格式校验由验证器负责，这里只做段级解析。
    pub(crate) fn compile(def: RouteDef, index: usize) -> Result<Self> {
        let (segments, kind) = parse_segments(&def.path)?;

        Ok(Self {
            path: def.path,
            name: def.name,
            component: def.component,
            segments,
            kind,
            index,
        })
    }

    /// 路径模式
    pub fn path(&self) -> &str {
        &self.path
    }

    /// 逻辑名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 绑定的页面组件
    pub fn component(&self) -> &Arc<dyn PageComponent> {
        &self.component
    }

    /// 路由种类
    pub fn kind(&self) -> RouteKind {
        self.kind
    }

    /// 声明顺序
    pub fn index(&self) -> usize {
        self.index
    }

    /// 尝试匹配给定路径
    ///
    /// 路径须为规范形式（以 `/` 开头、无查询串和片段）。
    /// 匹配成功返回捕获的参数。
    pub fn matches(&self, path: &str) -> Option<PathMatch> {
        let input = split_segments(path);
        let mut params = HashMap::new();
        let mut pos = 0;

        for segment in &self.segments {
            match segment {
                Segment::Static(expected) => {
                    if input.get(pos) != Some(&expected.as_str()) {
                        return None;
                    }
                    pos += 1;
                }
                Segment::Param(name) => {
                    let value = input.get(pos)?;
                    params.insert(name.clone(), (*value).to_string());
                    pos += 1;
                }
                Segment::CatchAll(name) => {
                    // 捕获余下全部段（可为空）
                    params.insert(name.clone(), input[pos..].join("/"));
                    pos = input.len();
                }
            }
        }

        if pos == input.len() {
            Some(PathMatch { params })
        } else {
            None
        }
    }

    /// 由参数构建具体路径（命名导航）
    pub fn build_path(&self, params: &HashMap<String, String>) -> Result<String> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }

        let mut parts = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                Segment::Static(s) => parts.push(s.clone()),
                Segment::Param(name) => {
                    let value = params.get(name).ok_or_else(|| NavError::MissingParam {
                        name: self.name.clone(),
                        param: name.clone(),
                    })?;
                    parts.push(value.clone());
                }
                Segment::CatchAll(name) => {
                    if let Some(value) = params.get(name) {
                        if !value.is_empty() {
                            parts.push(value.clone());
                        }
                    }
                }
            }
        }

        Ok(format!("/{}", parts.join("/")))
    }
}

impl fmt::Debug for RouteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteRecord")
            .field("path", &self.path)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("index", &self.index)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, name: &str) -> RouteRecord {
        let def = RouteDef::with_page(path, name, StaticPage::new(name, ""));
        RouteRecord::compile(def, 0).unwrap()
    }

    #[test]
    fn test_static_match_root() {
        let r = record("/", "Home");
        assert!(r.matches("/").is_some());
        assert!(r.matches("/xaffman").is_none());
        assert_eq!(r.kind(), RouteKind::Static);
    }

    #[test]
    fn test_static_match() {
        let r = record("/xaffman", "Xaffman");
        assert!(r.matches("/xaffman").is_some());
        assert!(r.matches("/").is_none());
        assert!(r.matches("/xaffman/extra").is_none());
    }

    #[test]
    fn test_param_match() {
        let r = record("/demo/:algo", "Demo");
        let m = r.matches("/demo/huffman").unwrap();
        assert_eq!(m.params.get("algo").map(String::as_str), Some("huffman"));
        assert!(r.matches("/demo").is_none());
        assert_eq!(r.kind(), RouteKind::Dynamic);
    }

    #[test]
    fn test_catch_all_match() {
        let r = record("/docs/*rest", "Docs");
        let m = r.matches("/docs/a/b/c").unwrap();
        assert_eq!(m.params.get("rest").map(String::as_str), Some("a/b/c"));

        // 通配段允许为空
        let m = r.matches("/docs").unwrap();
        assert_eq!(m.params.get("rest").map(String::as_str), Some(""));
        assert_eq!(r.kind(), RouteKind::CatchAll);
    }

    #[test]
    fn test_compile_rejects_empty_param() {
        let def = RouteDef::with_page("/demo/:", "Bad", StaticPage::new("Bad", ""));
        assert!(RouteRecord::compile(def, 0).is_err());
    }

    #[test]
    fn test_compile_rejects_middle_catch_all() {
        let def = RouteDef::with_page("/a/*rest/b", "Bad", StaticPage::new("Bad", ""));
        assert!(RouteRecord::compile(def, 0).is_err());
    }

    #[test]
    fn test_build_path_static() {
        let r = record("/xaffman", "Xaffman");
        let path = r.build_path(&HashMap::new()).unwrap();
        assert_eq!(path, "/xaffman");

        let root = record("/", "Home");
        assert_eq!(root.build_path(&HashMap::new()).unwrap(), "/");
    }

    #[test]
    fn test_build_path_with_params() {
        let r = record("/demo/:algo", "Demo");

        let mut params = HashMap::new();
        params.insert("algo".to_string(), "shannon-fano".to_string());
        assert_eq!(r.build_path(&params).unwrap(), "/demo/shannon-fano");

        // 缺少参数时报错
        let err = r.build_path(&HashMap::new()).unwrap_err();
        assert!(matches!(err, NavError::MissingParam { .. }));
    }

    #[test]
    fn test_static_page_render() {
        let page = StaticPage::new("ShennonFano", "Shannon-Fano coding demo");
        assert_eq!(page.component_name(), "ShennonFano");
        assert_eq!(page.render(), "Shannon-Fano coding demo");
    }
}
