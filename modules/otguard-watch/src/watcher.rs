use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, warn};

use nvd_client::CveRecord;
use otguard_common::{Cvss, Finding, OtGuardError};

use crate::filter::KeywordFilter;
use crate::seen::SeenSet;
use crate::store::FindingStore;
use crate::traits::{Classify, CveSource, Sleeper, TokioSleeper};

/// Counters from one poll cycle.
#[derive(Debug, Default)]
pub struct CycleStats {
    pub fetched: u32,
    pub already_seen: u32,
    pub rejected_status: u32,
    pub no_description: u32,
    pub keyword_rejected: u32,
    pub classified: u32,
    pub confirmed: u32,
    pub errors: u32,
}

impl std::fmt::Display for CycleStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== Poll Cycle Complete ===")?;
        writeln!(f, "Records fetched:    {}", self.fetched)?;
        writeln!(f, "Already seen:       {}", self.already_seen)?;
        writeln!(f, "Rejected by NVD:    {}", self.rejected_status)?;
        writeln!(f, "No description:     {}", self.no_description)?;
        writeln!(f, "Keyword-filtered:   {}", self.keyword_rejected)?;
        writeln!(f, "Sent to classifier: {}", self.classified)?;
        writeln!(f, "Confirmed threats:  {}", self.confirmed)?;
        writeln!(f, "Record errors:      {}", self.errors)?;
        Ok(())
    }
}

/// The ingestion loop: poll a time window of CVEs, run each unseen record
/// through the keyword filter and then the classifier, persist confirmed
/// findings. Runs until externally killed.
pub struct Watcher {
    source: Box<dyn CveSource>,
    classifier: Box<dyn Classify>,
    filter: KeywordFilter,
    seen: SeenSet,
    store: FindingStore,
    sleeper: Box<dyn Sleeper>,
    poll_interval: Duration,
    window: Duration,
}

impl Watcher {
    pub fn new(
        source: Box<dyn CveSource>,
        classifier: Box<dyn Classify>,
        filter: KeywordFilter,
        store: FindingStore,
        poll_interval: Duration,
        window: Duration,
    ) -> Self {
        Self {
            source,
            classifier,
            filter,
            seen: SeenSet::new(),
            store,
            sleeper: Box::new(TokioSleeper),
            poll_interval,
            window,
        }
    }

    pub fn with_sleeper(mut self, sleeper: Box<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Run forever. Nothing per-cycle is allowed to end the loop; a failed
    /// fetch skips the cycle and waits for the next interval.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            match self.run_cycle().await {
                Ok(stats) => info!("{stats}"),
                Err(e) => warn!(error = %e, "Poll cycle failed, retrying next interval"),
            }
            self.sleeper.sleep(self.poll_interval).await;
        }
    }

    /// One poll cycle. The window is recomputed fresh each call, not
    /// anchored to the last successful run: records published more than a
    /// window before "now" are permanently missed if a cycle is delayed.
    pub async fn run_cycle(&mut self) -> Result<CycleStats> {
        let end = Utc::now();
        let start = end
            - chrono::Duration::from_std(self.window).context("Poll window out of range")?;

        let records = self
            .source
            .fetch_window(start, end)
            .await
            .map_err(|e| OtGuardError::Source(e.to_string()))?;

        let mut stats = CycleStats {
            fetched: records.len() as u32,
            ..CycleStats::default()
        };
        info!(count = records.len(), "Fetched CVE records");

        for record in &records {
            if self.seen.contains(&record.id) {
                stats.already_seen += 1;
                continue;
            }
            if record.vuln_status == "Rejected" {
                stats.rejected_status += 1;
                continue;
            }
            // Marked seen before processing: a mid-classification failure
            // never causes reprocessing this run, at the cost of the
            // record becoming a permanent miss for this run.
            self.seen.insert(&record.id);

            if let Err(e) = self.process_record(record, &mut stats).await {
                warn!(cve = %record.id, error = %e, "Record skipped");
                stats.errors += 1;
            }
        }

        Ok(stats)
    }

    async fn process_record(&self, record: &CveRecord, stats: &mut CycleStats) -> Result<()> {
        let Some(description) = record.primary_description() else {
            stats.no_description += 1;
            return Ok(());
        };

        if !self.filter.is_potential_ot(description) {
            stats.keyword_rejected += 1;
            return Ok(());
        }

        info!(cve = %record.id, "Potential OT threat detected, escalating to classifier");
        let verdict = self.classifier.classify(description).await;
        stats.classified += 1;

        if !verdict.ot_related {
            return Ok(());
        }

        let (cvss, severity) = match record.cvss_v31() {
            Some((score, label)) => (Cvss::Score(score), label.to_string()),
            None => (Cvss::unavailable(), "N/A".to_string()),
        };

        info!(cve = %record.id, %cvss, severity = %severity, "APPROVED: confirmed OT threat");

        self.store.append(&Finding {
            cve_id: record.id.clone(),
            cvss,
            severity,
            description: description.to_string(),
            ai_insight: verdict.reason,
        });
        stats.confirmed += 1;

        Ok(())
    }
}
