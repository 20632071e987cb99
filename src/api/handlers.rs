use crate::error::ReportError;
use crate::models::{
    BillingRecord, FlatSummary, MatrixSummary, PendingInvoiceRecord, Period, PeriodMetrics,
};
use crate::service::{
    aggregate_flat, aggregate_matrix, aggregate_pending, manager_totals, period_metrics,
    target_vs_actual, ChartSeries, ManagerSeries, ReferenceData, ReportService,
};
use crate::service::export::{rows_to_csv_string, table_to_csv_string};
use axum::{
    extract::{Json, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 请求体: 已加载完毕的整期记录
#[derive(Debug, Deserialize)]
pub struct RecordsRequest {
    pub records: Vec<BillingRecord>,
    #[serde(default)]
    pub pending: Vec<PendingInvoiceRecord>,
}

/// 矩阵汇总响应
#[derive(Debug, Serialize)]
pub struct MatrixSummaryResponse {
    pub success: bool,
    pub message: String,
    pub summary: MatrixSummary,
    pub not_invoiced: MatrixSummary,
    pub metrics: PeriodMetrics,
}

/// 平铺汇总响应
#[derive(Debug, Serialize)]
pub struct FlatSummaryResponse {
    pub success: bool,
    pub message: String,
    pub summary: FlatSummary,
}

#[derive(Debug, Deserialize)]
pub struct ChartRequest {
    pub records: Vec<BillingRecord>,
    #[serde(default)]
    pub reference: ReferenceData,
}

#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub success: bool,
    pub categories: ChartSeries,
    pub managers: ManagerSeries,
}

/// 通用响应体
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

fn error_response(e: ReportError) -> Response {
    let status = match &e {
        ReportError::InvalidPeriod { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    tracing::error!("Request failed: {}", e);
    let response: ApiResponse<()> = ApiResponse {
        success: false,
        message: format!("Error: {}", e),
        data: None,
    };
    (status, Json(response)).into_response()
}

fn csv_response(body: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        body,
    )
        .into_response()
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 矩阵汇总 (主分类 × 列)，附带未开票汇总
pub async fn summarize_matrix(Json(req): Json<RecordsRequest>) -> Json<MatrixSummaryResponse> {
    let summary = aggregate_matrix(&req.records);
    let not_invoiced = aggregate_pending(&req.pending);
    let metrics = period_metrics(&req.records);

    Json(MatrixSummaryResponse {
        success: true,
        message: format!(
            "Aggregated {} records into {} categories, {} skipped",
            req.records.len(),
            summary.buckets.len(),
            metrics.skipped_count
        ),
        summary,
        not_invoiced,
        metrics,
    })
}

/// 平铺汇总
pub async fn summarize_flat(Json(req): Json<RecordsRequest>) -> Json<FlatSummaryResponse> {
    let summary = aggregate_flat(&req.records);
    Json(FlatSummaryResponse {
        success: true,
        message: format!(
            "Aggregated {} records into {} buckets",
            req.records.len(),
            summary.buckets.len()
        ),
        summary,
    })
}

/// 图表序列 (目标 vs 实际 + 经理汇总)
pub async fn chart_series(Json(req): Json<ChartRequest>) -> Json<ChartResponse> {
    Json(ChartResponse {
        success: true,
        categories: target_vs_actual(&req.records, &req.reference),
        managers: manager_totals(&req.records, &req.reference),
    })
}

/// 期间报表
pub async fn period_report(
    State(service): State<Arc<ReportService>>,
    Path((year, month)): Path<(i32, u32)>,
) -> Response {
    let result = match Period::new(month, year) {
        Ok(period) => service.period_report(period).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(report) => {
            let response = ApiResponse {
                success: true,
                message: format!("Report for {}-{:02}", year, month),
                data: Some(report.as_ref()),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// 期间汇总表 (Lakh 格式)
pub async fn period_table(
    State(service): State<Arc<ReportService>>,
    Path((year, month)): Path<(i32, u32)>,
) -> Response {
    let result = match Period::new(month, year) {
        Ok(period) => service.summary_table(period).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(table) => {
            let response = ApiResponse {
                success: true,
                message: format!("{} rows", table.rows.len()),
                data: Some(table),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// 期间汇总表导出 CSV
pub async fn period_table_csv(
    State(service): State<Arc<ReportService>>,
    Path((year, month)): Path<(i32, u32)>,
) -> Response {
    let result = match Period::new(month, year) {
        Ok(period) => service.summary_table(period).await,
        Err(e) => Err(e),
    };
    match result.and_then(|table| table_to_csv_string(&table)) {
        Ok(body) => csv_response(body),
        Err(e) => error_response(e),
    }
}

/// 期间计划行导出 CSV
pub async fn period_rows_csv(
    State(service): State<Arc<ReportService>>,
    Path((year, month)): Path<(i32, u32)>,
) -> Response {
    let result = match Period::new(month, year) {
        Ok(period) => service.billing_records(period).await,
        Err(e) => Err(e),
    };
    match result.and_then(|rows| rows_to_csv_string(&rows)) {
        Ok(body) => csv_response(body),
        Err(e) => error_response(e),
    }
}

/// 清除期间缓存
pub async fn invalidate_report(
    State(service): State<Arc<ReportService>>,
    Path((year, month)): Path<(i32, u32)>,
) -> Response {
    match Period::new(month, year) {
        Ok(period) => {
            let removed = service.invalidate(period);
            let response: ApiResponse<()> = ApiResponse {
                success: true,
                message: if removed {
                    format!("Cache cleared for {}-{:02}", year, month)
                } else {
                    format!("No cache for {}-{:02}", year, month)
                },
                data: None,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// 计划行 + 开票状态 (按 jobNumber_month_year 判断)
pub async fn invoice_rows(
    State(service): State<Arc<ReportService>>,
    Path((year, month)): Path<(i32, u32)>,
) -> Response {
    let result = match Period::new(month, year) {
        Ok(period) => service.annotated_rows(period).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(rows) => {
            let response = ApiResponse {
                success: true,
                message: format!("{} rows", rows.len()),
                data: Some(rows),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e),
    }
}
