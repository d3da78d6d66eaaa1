use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use otguard_common::{read_raw_findings, Finding, OtGuardError};

/// Append-only findings store backed by a single pretty-printed JSON file.
///
/// Every append re-reads the whole file, coerces whatever is there into a
/// list, pushes the new finding, and rewrites the file atomically (temp
/// file + rename in the same directory). O(n) per append, which is fine at
/// this feed's confirmation rate; the tolerant re-read is what survives
/// manual edits or corruption between cycles.
pub struct FindingStore {
    path: PathBuf,
}

impl FindingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a finding. Logs and drops the entry on I/O trouble rather
    /// than failing the poll loop.
    pub fn append(&self, finding: &Finding) {
        match self.try_append(finding) {
            Ok(total) => {
                debug!(cve = %finding.cve_id, total, "Finding persisted");
            }
            Err(e) => {
                warn!(cve = %finding.cve_id, error = %e, "Failed to persist finding; entry dropped");
            }
        }
    }

    fn try_append(&self, finding: &Finding) -> Result<usize, OtGuardError> {
        let mut items = read_raw_findings(&self.path);
        items.push(
            serde_json::to_value(finding)
                .map_err(|e| OtGuardError::Store(format!("serialize finding: {e}")))?,
        );

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let tmp = tempfile::NamedTempFile::new_in(dir)
            .map_err(|e| OtGuardError::Store(format!("create temp file: {e}")))?;
        serde_json::to_writer_pretty(&tmp, &items)
            .map_err(|e| OtGuardError::Store(format!("write findings: {e}")))?;
        tmp.persist(&self.path)
            .map_err(|e| OtGuardError::Store(format!("replace findings file: {e}")))?;

        Ok(items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use otguard_common::{read_findings, Cvss};

    fn finding(id: &str) -> Finding {
        Finding {
            cve_id: id.to_string(),
            cvss: Cvss::Score(7.5),
            severity: "HIGH".to_string(),
            description: "Modbus parsing flaw.".to_string(),
            ai_insight: "Denial of service on the RTU.".to_string(),
        }
    }

    #[test]
    fn appends_preserve_order_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FindingStore::new(dir.path().join("findings.json"));

        store.append(&finding("CVE-2024-0001"));
        store.append(&finding("CVE-2024-0002"));

        let persisted = read_findings(store.path());
        assert_eq!(persisted.len(), 2);
        assert_eq!(persisted[0].cve_id, "CVE-2024-0001");
        assert_eq!(persisted[1].cve_id, "CVE-2024-0002");
    }

    #[test]
    fn bare_object_is_coerced_then_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("findings.json");
        std::fs::write(&path, serde_json::to_string(&finding("CVE-2023-9999")).unwrap()).unwrap();

        let store = FindingStore::new(&path);
        store.append(&finding("CVE-2024-0001"));

        let persisted = read_findings(&path);
        assert_eq!(persisted.len(), 2);
        assert_eq!(persisted[0].cve_id, "CVE-2023-9999");
        assert_eq!(persisted[1].cve_id, "CVE-2024-0001");
    }

    #[test]
    fn corrupt_file_is_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("findings.json");
        std::fs::write(&path, "not json at all {{{").unwrap();

        let store = FindingStore::new(&path);
        store.append(&finding("CVE-2024-0001"));

        let persisted = read_findings(&path);
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].cve_id, "CVE-2024-0001");
    }

    #[test]
    fn output_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let store = FindingStore::new(dir.path().join("findings.json"));
        store.append(&finding("CVE-2024-0001"));

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains('\n'));
        assert!(raw.trim_start().starts_with('['));
    }
}
