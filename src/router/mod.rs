//! 路由模块
//!
//! 包含导航系统的核心组件：
//! - 路由声明与页面组件
//! - 路由表（构建期验证、首个匹配解析、解析缓存）
//! - 历史策略（干净 URL 语义的条目栈）
//! - 路由位置与导航事件
//! - 路由声明验证器
//! - 路由器主结构体

pub mod history;
pub mod location;
pub mod route;
pub mod router;
pub mod table;
pub mod validator;

// 重导出常用类型
pub use history::{HistoryStrategy, MemoryHistory};
pub use location::{split_query, NavigationEvent, NavigationKind, RouteLocation};
pub use route::{PageComponent, PathMatch, RouteDef, RouteKind, RouteRecord, StaticPage};
pub use router::{NavigationCallback, NavigationStats, NavigationStatsSnapshot, Router};
pub use table::{
    ResolveCache, ResolveCacheStats, ResolvedRoute, RouteExportEntry, RouteTable,
    RouteTableBuilder, RouteTableConfig, RouteTableExport, RouteTableStats,
};
pub use validator::{
    is_valid_path_format, RouteValidator, ValidationError, ValidationErrorCode,
    ValidationResult, ValidatorConfig,
};
