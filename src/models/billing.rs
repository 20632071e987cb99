use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use std::str::FromStr;

/// 金额允许的最大指数 (小数位或 10 的幂)，超出按 0 处理
pub const MAX_AMOUNT_EXPONENT: i64 = 64;

/// 解析金额字段，空值、无法解析或指数越界时一律按 0 处理；负数原样保留
pub fn parse_amount(raw: Option<&str>) -> BigDecimal {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| BigDecimal::from_str(s).ok())
        .filter(|d| d.as_bigint_and_exponent().1.abs() <= MAX_AMOUNT_EXPONENT)
        .unwrap_or_else(BigDecimal::zero)
}

/// 宽松金额反序列化：接受字符串、数字或 null
fn lenient_amount<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => parse_amount(Some(&s)),
        Some(serde_json::Value::Number(n)) => parse_amount(Some(&n.to_string())),
        _ => BigDecimal::zero(),
    })
}

/// 可参与汇总的账单行 (开票计划行 / 未开票行)
pub trait Billable {
    /// 作业编号；缺失或为空时返回 None，该行不参与汇总
    fn job_number(&self) -> Option<&str>;
    /// 交付渠道 (OFFSHORE / ONSITE)
    fn channel(&self) -> &str;
    /// 商务类型 (Export / Domestic)
    fn commercial_type(&self) -> &str;
    fn po_amount(&self) -> &BigDecimal;
    fn eco(&self) -> &BigDecimal;
    fn govt_tender(&self) -> Option<&str>;
}

/// 开票计划行 (BillingRecord)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingRecord {
    #[serde(default)]
    pub job_number: Option<String>,
    #[serde(default)]
    pub enq_type: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub po_amount: BigDecimal,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub eco: BigDecimal,
    #[serde(rename = "govt_tender", alias = "govtTender", default)]
    pub govt_tender: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub wip_amount: BigDecimal,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub manager: Option<String>,
    #[serde(default)]
    pub po_date: Option<String>,
}

impl Billable for BillingRecord {
    fn job_number(&self) -> Option<&str> {
        self.job_number.as_deref().filter(|j| !j.is_empty())
    }

    fn channel(&self) -> &str {
        self.enq_type.as_deref().unwrap_or_default()
    }

    fn commercial_type(&self) -> &str {
        self.kind.as_deref().unwrap_or_default()
    }

    fn po_amount(&self) -> &BigDecimal {
        &self.po_amount
    }

    fn eco(&self) -> &BigDecimal {
        &self.eco
    }

    fn govt_tender(&self) -> Option<&str> {
        self.govt_tender.as_deref()
    }
}

/// 未开票行 (PendingInvoiceRecord)，渠道字段名为 enquiryType
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingInvoiceRecord {
    #[serde(default)]
    pub job_number: Option<String>,
    #[serde(default)]
    pub enquiry_type: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub po_amount: BigDecimal,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub eco: BigDecimal,
    #[serde(rename = "govt_tender", alias = "govtTender", default)]
    pub govt_tender: Option<String>,
    #[serde(default)]
    pub customer: Option<String>,
}

impl Billable for PendingInvoiceRecord {
    fn job_number(&self) -> Option<&str> {
        self.job_number.as_deref().filter(|j| !j.is_empty())
    }

    fn channel(&self) -> &str {
        self.enquiry_type.as_deref().unwrap_or_default()
    }

    fn commercial_type(&self) -> &str {
        self.kind.as_deref().unwrap_or_default()
    }

    fn po_amount(&self) -> &BigDecimal {
        &self.po_amount
    }

    fn eco(&self) -> &BigDecimal {
        &self.eco
    }

    fn govt_tender(&self) -> Option<&str> {
        self.govt_tender.as_deref()
    }
}

/// 开票计划表原始行 (金额列为文本)
#[derive(Debug, Clone, FromRow)]
pub struct BillingRow {
    pub job_number: Option<String>,
    pub enq_type: Option<String>,
    pub kind: Option<String>,
    pub po_amount: Option<String>,
    pub eco: Option<String>,
    pub govt_tender: Option<String>,
    pub wip_amount: Option<String>,
    pub customer: Option<String>,
    pub manager: Option<String>,
    pub po_date: Option<String>,
}

impl From<BillingRow> for BillingRecord {
    fn from(row: BillingRow) -> Self {
        Self {
            po_amount: parse_amount(row.po_amount.as_deref()),
            eco: parse_amount(row.eco.as_deref()),
            wip_amount: parse_amount(row.wip_amount.as_deref()),
            job_number: row.job_number,
            enq_type: row.enq_type,
            kind: row.kind,
            govt_tender: row.govt_tender,
            customer: row.customer,
            manager: row.manager,
            po_date: row.po_date,
        }
    }
}

/// 未开票表原始行
#[derive(Debug, Clone, FromRow)]
pub struct PendingInvoiceRow {
    pub job_number: Option<String>,
    pub enquiry_type: Option<String>,
    pub kind: Option<String>,
    pub po_amount: Option<String>,
    pub eco: Option<String>,
    pub govt_tender: Option<String>,
    pub customer: Option<String>,
}

impl From<PendingInvoiceRow> for PendingInvoiceRecord {
    fn from(row: PendingInvoiceRow) -> Self {
        Self {
            po_amount: parse_amount(row.po_amount.as_deref()),
            eco: parse_amount(row.eco.as_deref()),
            job_number: row.job_number,
            enquiry_type: row.enquiry_type,
            kind: row.kind,
            govt_tender: row.govt_tender,
            customer: row.customer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_defaults_to_zero() {
        assert_eq!(parse_amount(Some("50000")), BigDecimal::from(50000));
        assert_eq!(parse_amount(Some(" 12.5 ")), BigDecimal::from_str("12.5").unwrap());
        assert_eq!(parse_amount(Some("abc")), BigDecimal::zero());
        assert_eq!(parse_amount(Some("")), BigDecimal::zero());
        assert_eq!(parse_amount(None), BigDecimal::zero());
    }

    #[test]
    fn parse_amount_rejects_extreme_exponents() {
        assert_eq!(parse_amount(Some("1e-3000000")), BigDecimal::zero());
        assert_eq!(parse_amount(Some("1e400")), BigDecimal::zero());
        assert_eq!(parse_amount(Some("1.5e3")), BigDecimal::from(1500));
        assert_eq!(parse_amount(Some("0.0001")), BigDecimal::from_str("0.0001").unwrap());
    }

    #[test]
    fn parse_amount_keeps_negative_values() {
        assert_eq!(parse_amount(Some("-500")), BigDecimal::from(-500));
        assert_eq!(parse_amount(Some(" -12.75 ")), BigDecimal::from_str("-12.75").unwrap());
    }

    #[test]
    fn deserializes_string_number_and_null_amounts() {
        let json = r#"[
            {"jobNumber": "JOB1_VA", "enqType": "OFFSHORE", "type": "Export", "poAmount": "50000", "govt_tender": "NO"},
            {"jobNumber": "JOB2", "poAmount": 1200.5, "eco": null, "govtTender": "YES"},
            {"jobNumber": null, "poAmount": "n/a", "wipAmount": "300"}
        ]"#;
        let records: Vec<BillingRecord> = serde_json::from_str(json).unwrap();

        assert_eq!(records[0].po_amount, BigDecimal::from(50000));
        assert_eq!(records[0].commercial_type(), "Export");
        assert_eq!(records[0].govt_tender(), Some("NO"));

        assert_eq!(records[1].po_amount, BigDecimal::from_str("1200.5").unwrap());
        assert_eq!(records[1].eco, BigDecimal::zero());
        assert_eq!(records[1].govt_tender(), Some("YES"));
        assert_eq!(records[1].channel(), "");

        assert_eq!(records[2].job_number(), None);
        assert_eq!(records[2].po_amount, BigDecimal::zero());
        assert_eq!(records[2].wip_amount, BigDecimal::from(300));
    }

    #[test]
    fn empty_job_number_is_falsy() {
        let record = BillingRecord {
            job_number: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(record.job_number(), None);
    }

    #[test]
    fn pending_record_reads_enquiry_type() {
        let json = r#"{"jobNumber": "P1", "enquiryType": "ONSITE", "type": "Domestic", "poAmount": "10"}"#;
        let record: PendingInvoiceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.channel(), "ONSITE");
        assert_eq!(record.po_amount(), &BigDecimal::from(10));
    }

    #[test]
    fn billing_row_converts_text_amounts() {
        let row = BillingRow {
            job_number: Some("J_NPI".to_string()),
            enq_type: Some("ONSITE".to_string()),
            kind: Some("Domestic".to_string()),
            po_amount: Some("7500".to_string()),
            eco: Some("bad".to_string()),
            govt_tender: None,
            wip_amount: None,
            customer: None,
            manager: Some("Asha".to_string()),
            po_date: None,
        };
        let record = BillingRecord::from(row);
        assert_eq!(record.po_amount, BigDecimal::from(7500));
        assert_eq!(record.eco, BigDecimal::zero());
        assert_eq!(record.wip_amount, BigDecimal::zero());
    }
}
