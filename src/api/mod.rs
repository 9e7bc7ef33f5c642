//! 对外 API 模块
//!
//! 提供应用引导代码使用的外壳接口。

pub mod sdk;

pub use sdk::{AppShell, ShellState};
