use axum::Json;
use bigdecimal::BigDecimal;
use billing_planner::api::{
    chart_series, health_check, summarize_flat, summarize_matrix, ChartRequest, RecordsRequest,
};
use billing_planner::models::{FlatBucket, MainCategory};

fn records_request(json: &str) -> RecordsRequest {
    serde_json::from_str(json).unwrap()
}

#[tokio::test]
async fn health_returns_ok() {
    assert_eq!(health_check().await, "OK");
}

#[tokio::test]
async fn matrix_endpoint_keeps_not_invoiced_separate() {
    let req = records_request(
        r#"{
            "records": [
                {"jobNumber": "J1", "enqType": "OFFSHORE", "type": "Export", "poAmount": "1000", "wipAmount": "300"},
                {"jobNumber": "", "enqType": "OFFSHORE", "type": "Export", "poAmount": "50"}
            ],
            "pending": [
                {"jobNumber": "P1_Analysis", "enquiryType": "ONSITE", "type": "Domestic", "poAmount": "400", "govtTender": "YES"}
            ]
        }"#,
    );

    let Json(resp) = summarize_matrix(Json(req)).await;
    assert!(resp.success);
    assert_eq!(resp.summary.total.grand_total, BigDecimal::from(1000));
    assert_eq!(
        resp.not_invoiced
            .bucket(&MainCategory::OnsiteDomestic)
            .unwrap()
            .govt_analysis,
        BigDecimal::from(400)
    );
    assert_eq!(resp.metrics.total_po, BigDecimal::from(1050));
    assert_eq!(resp.metrics.total_wip, BigDecimal::from(300));
    assert_eq!(resp.metrics.skipped_count, 1);

    let body = serde_json::to_value(&resp).unwrap();
    assert!(body["summary"]["buckets"]["At Office Export"]["GrandTotal"].is_string());
}

#[tokio::test]
async fn flat_endpoint_uses_channel_buckets() {
    let req = records_request(
        r#"{"records": [
            {"jobNumber": "J1", "enqType": "ONSITE", "type": "Domestic", "poAmount": "700"},
            {"jobNumber": "J2_NPI", "enqType": "ONSITE", "type": "Domestic", "poAmount": "300", "eco": "20"}
        ]}"#,
    );

    let Json(resp) = summarize_flat(Json(req)).await;
    let onsite = resp
        .summary
        .bucket(&FlatBucket::Channel(MainCategory::OnsiteDomestic))
        .unwrap();
    assert_eq!(onsite.layout, BigDecimal::from(700));
    let npi = resp.summary.bucket(&FlatBucket::Npi).unwrap();
    assert_eq!(npi.grand_total, BigDecimal::from(320));
    assert_eq!(resp.summary.total.grand_total, BigDecimal::from(1020));
}

#[tokio::test]
async fn chart_endpoint_aligns_series() {
    let req: ChartRequest = serde_json::from_str(
        r#"{
            "records": [
                {"jobNumber": "J1_VA", "enqType": "OFFSHORE", "type": "Export", "poAmount": "200", "manager": "Ravi"}
            ],
            "reference": {
                "managers": ["Ravi", "Meena"],
                "targets": [{"category": "VA", "target": "500"}]
            }
        }"#,
    )
    .unwrap();

    let Json(resp) = chart_series(Json(req)).await;
    let va = resp.categories.labels.iter().position(|l| l == "VA").unwrap();
    assert_eq!(resp.categories.actual[va], 200.0);
    assert_eq!(resp.categories.target[va], 500.0);
    assert_eq!(resp.managers.totals, vec![200.0, 0.0]);
}
