use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::{debug, error, info, warn};

// 从 lib.rs 导入模块
use vclass::config::AppConfig;
use vclass::runtime::lifetime;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // 记录程序启动时间
    let start_datetime = chrono::Utc::now();

    // 初始化配置
    setup_panic!();
    if let Err(e) = AppConfig::init() {
        eprintln!("Failed to initialize configuration: {e}");
        std::process::exit(1);
    }
    let config = AppConfig::get();

    // 初始化日志
    let stdout_log = std::io::stdout();
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(stdout_log);
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    // 打印信息
    warn!(
        "Starting {}...
        Project: {}
        Version: {}
        Authors: {}",
        config.app.system_name,
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS")
    );

    let startup = match lifetime::startup::prepare_startup(config).await {
        Ok(startup) => startup,
        Err(e) => {
            #[cfg(debug_assertions)]
            error!("{}", e.format_colored());
            #[cfg(not(debug_assertions))]
            error!("{}", e.format_simple());
            std::process::exit(1);
        }
    };

    debug!(
        "Startup completed in {} ms",
        chrono::Utc::now()
            .signed_duration_since(start_datetime)
            .num_milliseconds()
    );

    // 概况：待审批用户、活动数量与全班进度
    let service = &startup.service;

    let pending = service.list_pending_users().await;
    info!("{}", pending.message);

    match startup.storage.count_users().await {
        Ok(count) => info!("{} users registered", count),
        Err(e) => warn!("Failed to count users: {}", e),
    }

    match startup.storage.count_activities().await {
        Ok(count) => info!("{} activities published", count),
        Err(e) => warn!("Failed to count activities: {}", e),
    }

    let progress = service.class_progress().await;
    info!("{}", progress.message);
    for entry in progress.data.iter().flatten() {
        info!(
            "  {} ({}): {:.1}% ({} of {} activities)",
            entry.name,
            entry.enrollment_id,
            entry.progress_percent,
            entry.submission_count,
            entry.total_activity_count
        );
    }
}
