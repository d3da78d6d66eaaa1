use serde::{Deserialize, Serialize};

/// Top-level response from `/rest/json/cves/2.0`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CveApiResponse {
    pub results_per_page: u32,
    pub start_index: u32,
    pub total_results: u32,
    #[serde(default)]
    pub vulnerabilities: Vec<CveItem>,
}

/// One entry in the `vulnerabilities` array. The API wraps each record
/// in an object with a single `cve` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CveItem {
    pub cve: CveRecord,
}

/// A CVE record as published by NVD. Only the fields the triage pipeline
/// reads are modeled; everything else in the payload is ignored. New CVEs
/// frequently have no metrics yet, so everything past the identifier is
/// optional or defaulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CveRecord {
    pub id: String,
    #[serde(default)]
    pub vuln_status: String,
    #[serde(default)]
    pub published: String,
    #[serde(default)]
    pub descriptions: Vec<CveDescription>,
    #[serde(default)]
    pub metrics: Option<CveMetrics>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CveDescription {
    pub lang: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CveMetrics {
    #[serde(default)]
    pub cvss_metric_v31: Vec<CvssMetricV31>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvssMetricV31 {
    pub cvss_data: CvssData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvssData {
    pub base_score: f64,
    pub base_severity: String,
}

impl CveRecord {
    /// First description entry, regardless of language. NVD lists English
    /// first when one exists.
    pub fn primary_description(&self) -> Option<&str> {
        self.descriptions.first().map(|d| d.value.as_str())
    }

    /// CVSS v3.1 base score and severity label, when the record has been
    /// scored.
    pub fn cvss_v31(&self) -> Option<(f64, &str)> {
        self.metrics
            .as_ref()?
            .cvss_metric_v31
            .first()
            .map(|m| (m.cvss_data.base_score, m.cvss_data.base_severity.as_str()))
    }
}
