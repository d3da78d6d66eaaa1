use std::path::Path;

use serde::{Deserialize, Serialize};

/// A CVSS base score, or the `"N/A"` sentinel for records NVD has not
/// scored yet. Serializes as a bare number or a bare string, matching the
/// findings file format the dashboard reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cvss {
    Score(f64),
    Text(String),
}

impl Cvss {
    pub fn unavailable() -> Self {
        Cvss::Text("N/A".to_string())
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Cvss::Text(_))
    }
}

impl std::fmt::Display for Cvss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cvss::Score(s) => write!(f, "{s}"),
            Cvss::Text(t) => write!(f, "{t}"),
        }
    }
}

/// A confirmed OT-relevant vulnerability, as persisted in the findings
/// file. `cve_id` is the natural key; the store itself does not enforce
/// uniqueness — the watcher's seen-set does, once per process lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub cve_id: String,
    pub cvss: Cvss,
    pub severity: String,
    pub description: String,
    pub ai_insight: String,
}

/// Read the findings file as raw JSON values, coercing whatever is on disk
/// into a list:
/// - absent, unreadable, or unparseable file → empty
/// - a single bare object → one-element list
/// - any other non-array JSON → empty
///
/// Prior state is never trusted beyond this best-effort parse, which is
/// what lets the writer survive manual edits of the file between cycles.
pub fn read_raw_findings(path: &Path) -> Vec<serde_json::Value> {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return Vec::new();
    };

    match serde_json::from_str::<serde_json::Value>(&contents) {
        Ok(serde_json::Value::Array(items)) => items,
        Ok(obj @ serde_json::Value::Object(_)) => vec![obj],
        Ok(_) | Err(_) => Vec::new(),
    }
}

/// Read the findings file as typed findings for display. Entries that do
/// not parse as a `Finding` are dropped rather than failing the whole read.
pub fn read_findings(path: &Path) -> Vec<Finding> {
    read_raw_findings(path)
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_finding() -> Finding {
        Finding {
            cve_id: "CVE-2024-0001".to_string(),
            cvss: Cvss::Score(9.8),
            severity: "CRITICAL".to_string(),
            description: "A Modbus stack overflow.".to_string(),
            ai_insight: "Remote code execution on the PLC.".to_string(),
        }
    }

    #[test]
    fn finding_serializes_with_expected_keys() {
        let json = serde_json::to_value(sample_finding()).unwrap();
        assert_eq!(json["cve_id"], "CVE-2024-0001");
        assert_eq!(json["cvss"], 9.8);
        assert_eq!(json["severity"], "CRITICAL");
        assert_eq!(json["ai_insight"], "Remote code execution on the PLC.");
    }

    #[test]
    fn cvss_sentinel_round_trips_as_string() {
        let finding = Finding {
            cvss: Cvss::unavailable(),
            severity: "N/A".to_string(),
            ..sample_finding()
        };
        let json = serde_json::to_string(&finding).unwrap();
        assert!(json.contains(r#""cvss":"N/A""#));

        let back: Finding = serde_json::from_str(&json).unwrap();
        assert!(back.cvss.is_unavailable());
    }

    #[test]
    fn read_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_findings(&dir.path().join("nope.json")).is_empty());
    }

    #[test]
    fn read_garbage_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("findings.json");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"{ not json")
            .unwrap();
        assert!(read_findings(&path).is_empty());
        assert!(read_raw_findings(&path).is_empty());
    }

    #[test]
    fn read_bare_object_coerced_to_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("findings.json");
        let json = serde_json::to_string(&sample_finding()).unwrap();
        std::fs::write(&path, json).unwrap();

        let raw = read_raw_findings(&path);
        assert_eq!(raw.len(), 1);

        let typed = read_findings(&path);
        assert_eq!(typed, vec![sample_finding()]);
    }

    #[test]
    fn read_non_array_scalar_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("findings.json");
        std::fs::write(&path, "42").unwrap();
        assert!(read_raw_findings(&path).is_empty());
    }

    #[test]
    fn read_skips_entries_that_are_not_findings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("findings.json");
        let mixed = format!(
            "[{}, {{\"unrelated\": true}}]",
            serde_json::to_string(&sample_finding()).unwrap()
        );
        std::fs::write(&path, mixed).unwrap();

        assert_eq!(read_raw_findings(&path).len(), 2);
        assert_eq!(read_findings(&path).len(), 1);
    }
}
