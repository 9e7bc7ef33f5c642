//! Nav Core 命令行入口
//!
//! 页面导航内核的命令行工具，提供演示、检查和调试功能。
//!
//! # 命令概览
//!
//! - `start` - 启动演示导航会话
//! - `version` - 显示版本信息
//! - `check-config` - 验证配置文件
//! - `routes` - 查看演示路由表
//! - `resolve` - 解析一条路径
//!
//! # 使用示例
//!
//! ```bash
//! # 启动演示会话
//! nav-core start
//!
//! # 使用自定义配置文件启动
//! nav-core -c my-config.yaml start
//!
//! # 开发模式启动
//! nav-core --dev start
//!
//! # 检查配置文件
//! nav-core check-config -c config.yaml
//!
//! # 解析路径
//! nav-core resolve -p /xaffman
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

use nav_core::{AppConfig, AppShell, RouteDef, StaticPage};

/// Nav Core - 页面导航内核
///
/// 单页应用的导航核心，提供声明式路由表、干净 URL 历史和导航事件。
#[derive(Parser)]
#[command(name = "nav-core")]
#[command(version, about = "单页应用的页面导航内核", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// 配置文件路径
    #[arg(short, long, default_value = "config.yaml", global = true)]
    config: PathBuf,

    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// 开发模式（启用更详细的日志和调试功能）
    #[arg(long, global = true)]
    dev: bool,

    /// 子命令
    #[command(subcommand)]
    command: Option<Commands>,
}

/// 可用的子命令
#[derive(Subcommand)]
enum Commands {
    /// 启动演示导航会话
    ///
    /// 使用演示路由表启动外壳，执行一轮压入/后退/前进导航并打印轨迹。
    Start,

    /// 查看版本信息
    Version,

    /// 验证配置文件
    ///
    /// 检查配置文件是否有效，并显示解析后的配置内容。
    CheckConfig {
        /// 配置文件路径（不指定则使用全局 -c 选项）
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// 查看演示路由表
    ///
    /// 显示演示路由表的全部条目及统计信息。
    Routes,

    /// 解析一条路径
    ///
    /// 在演示路由表中解析指定路径，显示匹配结果。
    Resolve {
        /// 待解析的路径
        #[arg(short, long)]
        path: String,
    },
}

/// 初始化日志系统
///
/// 根据日志级别和开发模式配置 tracing 日志。
fn init_logging(level: &str, dev_mode: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };
        EnvFilter::new(format!("nav_core={}", level))
    });

    let builder = fmt().with_env_filter(filter).with_target(true);

    if dev_mode {
        // 开发模式：显示更多信息
        builder
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        // 生产模式：简洁输出
        builder
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .init();
    }
}

/// 演示路由表
///
/// 两个静态页面：香农-范诺编码演示（首页）和哈夫曼编码演示。
fn demo_routes() -> Vec<RouteDef> {
    vec![
        RouteDef::with_page(
            "/",
            "ShennonFano",
            StaticPage::new("ShenonFano", "香农-范诺编码演示页"),
        ),
        RouteDef::with_page(
            "/xaffman",
            "Xaffman",
            StaticPage::new("Xaffman", "哈夫曼编码演示页"),
        ),
    ]
}

/// 构建已启动的演示外壳
fn demo_shell(config: AppConfig) -> Result<AppShell, Box<dyn std::error::Error>> {
    let mut shell = AppShell::new(config);
    shell.install_routes(demo_routes())?;
    shell.start()?;
    Ok(shell)
}

/// 启动演示导航会话
fn run_start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("启动页面导航内核...");

    let mut shell = demo_shell(config)?;
    let router = shell.router()?;

    println!();
    println!("╔════════════════════════════════════════════════════════╗");
    println!("║           页面导航内核已启动 (Nav Core Started)         ║");
    println!("╠════════════════════════════════════════════════════════╣");
    println!("║  版本: {}                                           ║", nav_core::VERSION);
    println!("║  路由条目: {}                                           ║", router.table().len());
    println!("╚════════════════════════════════════════════════════════╝");
    println!();

    // 订阅导航事件，打印轨迹
    router.subscribe(Box::new(|event| {
        println!(
            "  [{}] {} -> {} ({})",
            event.kind,
            event.from.path,
            event.to.path,
            event.to.name.as_deref().unwrap_or("未匹配"),
        );
    }));

    println!("导航轨迹:");
    println!("────────────────────────────────────────");
    router.push("/xaffman")?;
    router.push("/")?;
    router.back()?;
    router.forward()?;
    router.replace("/xaffman")?;
    println!("────────────────────────────────────────");
    println!();

    let current = router.current();
    println!("当前位置: {} ({})", current.path, current.name.as_deref().unwrap_or("未匹配"));
    if let Some(page) = shell.active_page() {
        println!("激活页面: {}", page.render());
    }

    let stats = router.stats();
    println!();
    println!("导航统计:");
    println!("  总次数:   {}", stats.total);
    println!("  命中:     {}", stats.matched);
    println!("  未命中:   {}", stats.unmatched);
    println!("  命中率:   {:.1}%", stats.match_rate * 100.0);
    println!();

    info!("演示会话结束，正在关闭...");
    shell.shutdown()?;
    info!("页面导航内核已关闭");

    Ok(())
}

/// 检查配置文件
fn check_config(path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    println!("检查配置文件: {}", path.display());
    println!();

    if !path.exists() {
        println!("⚠️  警告: 配置文件不存在，将使用默认配置");
        println!();
        print_config(&AppConfig::default(), "默认配置");
        return Ok(());
    }

    match AppConfig::from_file(path) {
        Ok(config) => {
            println!("✅ 配置文件有效！");
            println!();
            print_config(&config, "配置内容");
            Ok(())
        }
        Err(e) => {
            println!("❌ 配置文件无效: {}", e);
            Err(Box::new(e))
        }
    }
}

/// 打印配置内容
fn print_config(config: &AppConfig, title: &str) {
    println!("{}:", title);
    println!("────────────────────────────────────────");
    println!("  [路由器配置]");
    println!("    解析缓存:       {}", if config.router.cache_enabled { "启用" } else { "禁用" });
    println!("    缓存容量:       {}", config.router.cache_capacity);
    println!("    严格尾斜杠:     {}", if config.router.strict_trailing_slash { "是" } else { "否" });
    if let Some(ref base) = config.router.history_base {
        println!("    历史 base:      {}", base);
    }
    println!();
    println!("  [日志配置]");
    println!("    日志级别:       {}", config.logging.level);
    println!("    文件输出:       {}", if config.logging.file_output { "是" } else { "否" });
    println!("    JSON 格式:      {}", if config.logging.json_format { "是" } else { "否" });
    println!();
    println!("  [其他]");
    println!("    开发模式:       {}", if config.dev_mode { "是" } else { "否" });
    println!("────────────────────────────────────────");
}

/// 打印版本信息
fn print_version() {
    println!();
    println!("Nav Core - 页面导航内核");
    println!("═══════════════════════════════════════");
    println!("  版本:             {}", nav_core::VERSION);
    println!();
    println!("构建信息:");
    println!("  目标平台:         {}", std::env::consts::ARCH);
    println!("  操作系统:         {}", std::env::consts::OS);
    println!("═══════════════════════════════════════");
    println!();
}

/// 显示演示路由表
fn show_routes(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let shell = {
        let mut shell = AppShell::new(config);
        shell.install_routes(demo_routes())?;
        shell
    };
    let router = shell.router()?;
    let table = router.table();

    println!();
    println!("演示路由表");
    println!("═══════════════════════════════════════");
    for entry in table.export().routes {
        println!("  {:<16} -> {:<14} [{:?}]", entry.path, entry.name, entry.kind);
    }
    println!();

    let stats = table.stats();
    println!("  条目总数: {}  静态: {}  动态: {}", stats.route_count, stats.static_count, stats.dynamic_count);
    println!("═══════════════════════════════════════");
    println!();

    Ok(())
}

/// 在演示路由表中解析路径
fn resolve_path(config: AppConfig, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut shell = AppShell::new(config);
    shell.install_routes(demo_routes())?;
    let router = shell.router()?;

    println!();
    println!("解析路径: {}", path);
    println!("────────────────────────────────────────");
    match router.table().resolve(path) {
        Some(resolved) => {
            println!("  匹配:     是");
            println!("  路由名称: {}", resolved.name);
            println!("  路由模式: {}", resolved.pattern);
            if !resolved.params.is_empty() {
                println!("  参数:     {:?}", resolved.params);
            }
        }
        None => {
            println!("  匹配:     否（导航仍会成功，位置标记为未匹配）");
        }
    }
    println!("────────────────────────────────────────");
    println!();

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // 初始化日志（Version 和 CheckConfig 命令不需要日志）
    let needs_logging = !matches!(
        cli.command,
        Some(Commands::Version) | Some(Commands::CheckConfig { .. })
    );

    if needs_logging {
        init_logging(&cli.log_level, cli.dev);
    }

    match cli.command {
        // 默认命令或 Start 命令：启动演示会话
        Some(Commands::Start) | None => {
            let config = load_config(&cli.config, cli.dev)?;
            run_start(config)?;
        }

        // 显示版本信息
        Some(Commands::Version) => {
            print_version();
        }

        // 检查配置文件
        Some(Commands::CheckConfig { config }) => {
            let config_path = config.unwrap_or(cli.config);
            check_config(&config_path)?;
        }

        // 显示演示路由表
        Some(Commands::Routes) => {
            let config = load_config(&cli.config, cli.dev)?;
            show_routes(config)?;
        }

        // 解析路径
        Some(Commands::Resolve { path }) => {
            let config = load_config(&cli.config, cli.dev)?;
            resolve_path(config, &path)?;
        }
    }

    Ok(())
}

/// 加载配置文件
fn load_config(config_path: &PathBuf, dev_mode: bool) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let config = if config_path.exists() {
        let mut config = AppConfig::from_file(config_path)?;
        if dev_mode {
            config.dev_mode = true;
        }
        info!("已加载配置文件: {}", config_path.display());
        config
    } else {
        info!("配置文件不存在 ({})，使用默认配置", config_path.display());
        let mut config = AppConfig::default();
        if dev_mode {
            config.dev_mode = true;
        }
        config
    };

    Ok(config)
}
