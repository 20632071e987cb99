use thiserror::Error;

/// 报表服务错误类型
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Invalid report period: month={month}, year={year}")]
    InvalidPeriod { month: u32, year: i32 },

    #[error("Database query failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
