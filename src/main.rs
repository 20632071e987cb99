use axum::{routing::{get, post}, Router};
use billing_planner::{api, create_pool, AppConfig, ReportService};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::load()?;
    info!("Starting server with config: {:?}", config);

    // 创建数据库连接池
    let pool = create_pool(&config.database.url, config.database.max_connections).await?;
    info!("Database pool created");

    let report_service = Arc::new(ReportService::new(
        pool,
        config.report.cache_enabled,
        config.report.fraction_digits,
    ));

    // 无状态汇总路由 (请求体自带整期记录)
    let summary_routes = Router::new()
        .route("/api/summary/matrix", post(api::summarize_matrix))
        .route("/api/summary/flat", post(api::summarize_flat))
        .route("/api/chart", post(api::chart_series));

    // 数据库期间报表路由
    let report_routes = Router::new()
        .route(
            "/api/report/:year/:month",
            get(api::period_report).delete(api::invalidate_report),
        )
        .route("/api/report/:year/:month/table", get(api::period_table))
        .route("/api/report/:year/:month/csv", get(api::period_table_csv))
        .route("/api/report/:year/:month/rows/csv", get(api::period_rows_csv))
        .route("/api/invoices/:year/:month/rows", get(api::invoice_rows))
        .with_state(report_service);

    let app = Router::new()
        .route("/health", get(api::health_check))
        .merge(summary_routes)
        .merge(report_routes);

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST   /api/summary/matrix          - 矩阵汇总 (主分类 × 列)");
    info!("  POST   /api/summary/flat            - 平铺汇总");
    info!("  POST   /api/chart                   - 目标 vs 实际 / 经理汇总");
    info!("  GET    /api/report/:year/:month     - 期间报表 (含 Not Invoiced)");
    info!("  DELETE /api/report/:year/:month     - 清除期间缓存");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
