pub mod aggregator;
pub mod chart;
pub mod export;
pub mod report;

pub use aggregator::{aggregate_flat, aggregate_matrix, aggregate_pending, column_sum, period_metrics};
pub use chart::{manager_totals, target_vs_actual, CategoryTarget, ChartSeries, ManagerSeries, ReferenceData};
pub use report::{build_period_report, ReportService};
