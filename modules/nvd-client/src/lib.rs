pub mod error;
pub mod types;

pub use error::{NvdError, Result};
pub use types::{CveDescription, CveMetrics, CveRecord, CvssData, CvssMetricV31};

use chrono::{DateTime, Utc};
use types::CveApiResponse;

const BASE_URL: &str = "https://services.nvd.nist.gov/rest/json/cves/2.0";

/// Max page size the API allows.
const RESULTS_PER_PAGE: u32 = 2000;

/// Client for the NVD CVE API 2.0.
///
/// An API key is optional; keyless access works at a lower rate limit.
pub struct NvdClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl NvdClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Fetch all CVEs published within `[start, end]`, following the API's
    /// `startIndex` pagination until `totalResults` is exhausted.
    pub async fn fetch_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CveRecord>> {
        let pub_start = format_nvd_date(start);
        let pub_end = format_nvd_date(end);

        let mut records = Vec::new();
        let mut start_index: u32 = 0;

        loop {
            let page = self.fetch_page(&pub_start, &pub_end, start_index).await?;
            let page_len = page.vulnerabilities.len() as u32;
            records.extend(page.vulnerabilities.into_iter().map(|item| item.cve));

            start_index += page_len;
            if start_index >= page.total_results || page_len == 0 {
                break;
            }
            tracing::debug!(
                start_index,
                total = page.total_results,
                "Fetching next NVD page"
            );
        }

        tracing::info!(count = records.len(), %pub_start, %pub_end, "Fetched CVE records");
        Ok(records)
    }

    async fn fetch_page(
        &self,
        pub_start: &str,
        pub_end: &str,
        start_index: u32,
    ) -> Result<CveApiResponse> {
        let results_per_page = RESULTS_PER_PAGE.to_string();
        let start_index = start_index.to_string();
        let mut request = self.client.get(&self.base_url).query(&[
            ("pubStartDate", pub_start),
            ("pubEndDate", pub_end),
            ("resultsPerPage", results_per_page.as_str()),
            ("startIndex", start_index.as_str()),
        ]);

        if let Some(ref key) = self.api_key {
            request = request.header("apiKey", key);
        }

        let resp = request.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(NvdError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp.json().await?)
    }
}

/// The API wants extended ISO-8601 with exactly three fractional digits.
fn format_nvd_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_dates_with_millis() {
        let date = Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap();
        assert_eq!(format_nvd_date(date), "2024-06-01T08:30:00.000");
    }

    #[test]
    fn client_base_url_override() {
        let client = NvdClient::new(None).with_base_url("http://localhost:9999/cves");
        assert_eq!(client.base_url, "http://localhost:9999/cves");
    }
}
