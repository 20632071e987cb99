use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// 作业编号后缀所代表的工作类型 (未区分政府标)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkType {
    Va,
    Npi,
    Dfm,
    Library,
    Analysis,
    Layout,
}

/// 后缀规则表，按顺序匹配，首个命中生效；都不命中则为基础 Layout
pub const SUFFIX_RULES: &[(&str, WorkType)] = &[
    ("_VA", WorkType::Va),
    ("_NPI", WorkType::Npi),
    ("_DFM", WorkType::Dfm),
    ("_CAM", WorkType::Dfm),
    ("_CEG", WorkType::Dfm),
    ("_Lib", WorkType::Library),
    ("_Analysis", WorkType::Analysis),
];

impl WorkType {
    pub fn from_job_number(job_number: &str) -> Self {
        SUFFIX_RULES
            .iter()
            .find(|(suffix, _)| job_number.ends_with(*suffix))
            .map(|(_, work_type)| *work_type)
            .unwrap_or(WorkType::Layout)
    }
}

/// 政府标标记：只有 "YES" 为真
pub fn is_govt_tender(flag: Option<&str>) -> bool {
    flag == Some("YES")
}

/// 汇总矩阵的列 (工作类型维度)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Layout,
    Analysis,
    GovtLayout,
    GovtAnalysis,
    Library,
    #[serde(rename = "DFM")]
    Dfm,
    #[serde(rename = "VA")]
    Va,
    #[serde(rename = "NPI")]
    Npi,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::Layout,
        Column::Analysis,
        Column::GovtLayout,
        Column::GovtAnalysis,
        Column::Library,
        Column::Dfm,
        Column::Va,
        Column::Npi,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Column::Layout => "Layout",
            Column::Analysis => "Analysis",
            Column::GovtLayout => "GovtLayout",
            Column::GovtAnalysis => "GovtAnalysis",
            Column::Library => "Library",
            Column::Dfm => "DFM",
            Column::Va => "VA",
            Column::Npi => "NPI",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 列分类：只看作业编号后缀和政府标标记
pub fn column_for(job_number: &str, govt_tender: Option<&str>) -> Column {
    let govt = is_govt_tender(govt_tender);
    match WorkType::from_job_number(job_number) {
        WorkType::Va => Column::Va,
        WorkType::Npi => Column::Npi,
        WorkType::Dfm => Column::Dfm,
        WorkType::Library => Column::Library,
        WorkType::Analysis if govt => Column::GovtAnalysis,
        WorkType::Analysis => Column::Analysis,
        WorkType::Layout if govt => Column::GovtLayout,
        WorkType::Layout => Column::Layout,
    }
}

/// 汇总矩阵的行 (交付渠道维度)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MainCategory {
    #[serde(rename = "At Office Export")]
    AtOfficeExport,
    #[serde(rename = "At Office Domestic")]
    AtOfficeDomestic,
    #[serde(rename = "Onsite Domestic")]
    OnsiteDomestic,
}

impl MainCategory {
    pub const ALL: [MainCategory; 3] = [
        MainCategory::AtOfficeExport,
        MainCategory::AtOfficeDomestic,
        MainCategory::OnsiteDomestic,
    ];

    /// 严格分类，未知组合返回 None
    pub fn classify(enq_type: &str, kind: &str) -> Option<Self> {
        match (enq_type, kind) {
            ("OFFSHORE", "Export") => Some(MainCategory::AtOfficeExport),
            ("OFFSHORE", "Domestic") => Some(MainCategory::AtOfficeDomestic),
            ("ONSITE", "Domestic") => Some(MainCategory::OnsiteDomestic),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MainCategory::AtOfficeExport => "At Office Export",
            MainCategory::AtOfficeDomestic => "At Office Domestic",
            MainCategory::OnsiteDomestic => "Onsite Domestic",
        }
    }
}

impl fmt::Display for MainCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 主分类：未知的渠道/类型组合回落到 At Office Domestic
pub fn main_category_for(enq_type: &str, kind: &str) -> MainCategory {
    MainCategory::classify(enq_type, kind).unwrap_or(MainCategory::AtOfficeDomestic)
}

/// 平铺汇总的桶 (每行只落一个桶)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlatBucket {
    Va,
    Npi,
    Dfm,
    Library,
    Analysis,
    Channel(MainCategory),
    Layout,
}

impl FlatBucket {
    /// 基础 Layout 作业按渠道分桶，渠道未知时落入 Layout
    pub fn for_job(job_number: &str, enq_type: &str, kind: &str) -> Self {
        match WorkType::from_job_number(job_number) {
            WorkType::Va => FlatBucket::Va,
            WorkType::Npi => FlatBucket::Npi,
            WorkType::Dfm => FlatBucket::Dfm,
            WorkType::Library => FlatBucket::Library,
            WorkType::Analysis => FlatBucket::Analysis,
            WorkType::Layout => MainCategory::classify(enq_type, kind)
                .map(FlatBucket::Channel)
                .unwrap_or(FlatBucket::Layout),
        }
    }

    /// 该桶 PO 金额累加到的字段；渠道桶计入 Layout
    pub fn column(&self) -> Column {
        match self {
            FlatBucket::Va => Column::Va,
            FlatBucket::Npi => Column::Npi,
            FlatBucket::Dfm => Column::Dfm,
            FlatBucket::Library => Column::Library,
            FlatBucket::Analysis => Column::Analysis,
            FlatBucket::Channel(_) | FlatBucket::Layout => Column::Layout,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FlatBucket::Va => "VA",
            FlatBucket::Npi => "NPI",
            FlatBucket::Dfm => "DFM",
            FlatBucket::Library => "Library",
            FlatBucket::Analysis => "Analysis",
            FlatBucket::Channel(category) => category.label(),
            FlatBucket::Layout => "Layout",
        }
    }
}

impl fmt::Display for FlatBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for FlatBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// 图表分类：不区分政府标，DFM / Library 不单列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartBucket {
    Va,
    Npi,
    Analysis,
    Channel(MainCategory),
    Layout,
}

impl ChartBucket {
    /// 图表标签的固定顺序
    pub const ALL: [ChartBucket; 7] = [
        ChartBucket::Channel(MainCategory::AtOfficeExport),
        ChartBucket::Channel(MainCategory::AtOfficeDomestic),
        ChartBucket::Channel(MainCategory::OnsiteDomestic),
        ChartBucket::Analysis,
        ChartBucket::Va,
        ChartBucket::Npi,
        ChartBucket::Layout,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChartBucket::Va => "VA",
            ChartBucket::Npi => "NPI",
            ChartBucket::Analysis => "Analysis",
            ChartBucket::Channel(category) => category.label(),
            ChartBucket::Layout => "Layout",
        }
    }
}

impl fmt::Display for ChartBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 图表分类；作业编号缺失或为空时返回 None
pub fn bucket_for(job_number: Option<&str>, enq_type: &str, kind: &str) -> Option<ChartBucket> {
    let job_number = job_number.filter(|j| !j.is_empty())?;
    let bucket = match WorkType::from_job_number(job_number) {
        WorkType::Va => ChartBucket::Va,
        WorkType::Npi => ChartBucket::Npi,
        WorkType::Analysis => ChartBucket::Analysis,
        WorkType::Dfm | WorkType::Library | WorkType::Layout => MainCategory::classify(enq_type, kind)
            .map(ChartBucket::Channel)
            .unwrap_or(ChartBucket::Layout),
    };
    Some(bucket)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_for_follows_suffix_precedence() {
        assert_eq!(column_for("JOB1_VA", None), Column::Va);
        assert_eq!(column_for("JOB1_NPI", Some("YES")), Column::Npi);
        assert_eq!(column_for("JOB1_DFM", None), Column::Dfm);
        assert_eq!(column_for("JOB1_CAM", None), Column::Dfm);
        assert_eq!(column_for("JOB1_CEG", None), Column::Dfm);
        assert_eq!(column_for("JOB1_Lib", Some("YES")), Column::Library);
        assert_eq!(column_for("JOB1_Analysis", Some("NO")), Column::Analysis);
        assert_eq!(column_for("JOB1_Analysis", Some("YES")), Column::GovtAnalysis);
        assert_eq!(column_for("JOB1", Some("YES")), Column::GovtLayout);
        assert_eq!(column_for("JOB1", None), Column::Layout);
    }

    #[test]
    fn suffix_match_is_case_sensitive() {
        assert_eq!(column_for("JOB1_va", None), Column::Layout);
        assert_eq!(column_for("JOB1_LIB", None), Column::Layout);
        assert_eq!(column_for("JOB1_analysis", Some("YES")), Column::GovtLayout);
    }

    #[test]
    fn only_exact_yes_is_govt() {
        assert!(is_govt_tender(Some("YES")));
        assert!(!is_govt_tender(Some("yes")));
        assert!(!is_govt_tender(Some("NO")));
        assert!(!is_govt_tender(Some("")));
        assert!(!is_govt_tender(None));
    }

    #[test]
    fn main_category_falls_back_to_at_office_domestic() {
        assert_eq!(main_category_for("OFFSHORE", "Export"), MainCategory::AtOfficeExport);
        assert_eq!(main_category_for("OFFSHORE", "Domestic"), MainCategory::AtOfficeDomestic);
        assert_eq!(main_category_for("ONSITE", "Domestic"), MainCategory::OnsiteDomestic);
        assert_eq!(main_category_for("ONSITE", "Export"), MainCategory::AtOfficeDomestic);
        assert_eq!(main_category_for("", ""), MainCategory::AtOfficeDomestic);
        assert_eq!(MainCategory::classify("ONSITE", "Export"), None);
    }

    #[test]
    fn flat_bucket_uses_channel_for_base_layout() {
        assert_eq!(
            FlatBucket::for_job("J1", "OFFSHORE", "Export"),
            FlatBucket::Channel(MainCategory::AtOfficeExport)
        );
        assert_eq!(FlatBucket::for_job("J1", "ONSITE", "Export"), FlatBucket::Layout);
        assert_eq!(FlatBucket::for_job("J1_Analysis", "ONSITE", "Domestic"), FlatBucket::Analysis);
        assert_eq!(FlatBucket::for_job("J1_CEG", "ONSITE", "Domestic"), FlatBucket::Dfm);
        assert_eq!(FlatBucket::Channel(MainCategory::OnsiteDomestic).column(), Column::Layout);
    }

    #[test]
    fn chart_bucket_drops_dfm_and_govt_split() {
        assert_eq!(bucket_for(Some("J1_VA"), "", ""), Some(ChartBucket::Va));
        assert_eq!(
            bucket_for(Some("J1_DFM"), "OFFSHORE", "Domestic"),
            Some(ChartBucket::Channel(MainCategory::AtOfficeDomestic))
        );
        assert_eq!(bucket_for(Some("J1_Lib"), "X", "Y"), Some(ChartBucket::Layout));
        assert_eq!(bucket_for(Some("J1_Analysis"), "ONSITE", "Domestic"), Some(ChartBucket::Analysis));
        assert_eq!(bucket_for(Some(""), "ONSITE", "Domestic"), None);
        assert_eq!(bucket_for(None, "ONSITE", "Domestic"), None);
    }

    #[test]
    fn keys_serialize_as_labels() {
        assert_eq!(serde_json::to_string(&MainCategory::OnsiteDomestic).unwrap(), "\"Onsite Domestic\"");
        assert_eq!(serde_json::to_string(&Column::Dfm).unwrap(), "\"DFM\"");
        assert_eq!(
            serde_json::to_string(&FlatBucket::Channel(MainCategory::AtOfficeExport)).unwrap(),
            "\"At Office Export\""
        );
    }
}
