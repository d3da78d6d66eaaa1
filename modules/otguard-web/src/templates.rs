use otguard_common::Finding;

/// Render the dashboard: threat count, summary table, and a collapsible
/// detail section per finding.
pub fn render_dashboard(findings: &[Finding]) -> String {
    let mut rows = String::new();
    for finding in findings {
        rows.push_str(&format!(
            "<tr><td>{id}</td><td>{cvss}</td><td><span class=\"sev sev-{sev_class}\">{sev}</span></td></tr>",
            id = html_escape(&finding.cve_id),
            cvss = html_escape(&finding.cvss.to_string()),
            sev_class = severity_class(&finding.severity),
            sev = html_escape(&finding.severity),
        ));
    }

    let mut details = String::new();
    for finding in findings {
        details.push_str(&format!(
            r#"<details class="finding">
    <summary>{id} — Severity: {sev}</summary>
    <div class="insight"><h4>AI Insight</h4><p>{insight}</p></div>
    <div class="description"><h4>Full Description</h4><p>{desc}</p></div>
</details>"#,
            id = html_escape(&finding.cve_id),
            sev = html_escape(&finding.severity),
            insight = html_escape(&finding.ai_insight),
            desc = html_escape(&finding.description),
        ));
    }

    let body = if findings.is_empty() {
        r#"<p class="empty">The agent hasn't found any threats yet.</p>"#.to_string()
    } else {
        format!(
            r#"<table class="findings-table">
<thead><tr><th>CVE ID</th><th>CVSS</th><th>Severity</th></tr></thead>
<tbody>{rows}</tbody>
</table>
<h2>Details</h2>
{details}"#
        )
    };

    let content = format!(
        r#"<div class="container">
    <h1>OT Threat Guard</h1>
    <p class="tagline">Watching for industrial cyber threats in real-time...</p>
    <div class="metric-card">
        <div class="metric-value">{count}</div>
        <div class="metric-label">Total OT Threats</div>
    </div>
    {body}
</div>"#,
        count = findings.len(),
    );

    build_page("OT Threat Guard", &content)
}

fn severity_class(severity: &str) -> &'static str {
    match severity.to_ascii_uppercase().as_str() {
        "CRITICAL" => "critical",
        "HIGH" => "high",
        "MEDIUM" => "medium",
        "LOW" => "low",
        _ => "na",
    }
}

// --- Helpers ---

fn build_page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
*{{margin:0;padding:0;box-sizing:border-box;}}
body{{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;color:#1a1a1a;background:#fafafa;}}
.container{{max-width:960px;margin:0 auto;padding:24px;}}
h1{{color:#cf0000;font-size:32px;margin-bottom:4px;}}
h2{{font-size:20px;margin:24px 0 12px;}}
.tagline{{color:#555;margin-bottom:24px;}}
.metric-card{{background:#fff;border:1px solid #e0e0e0;border-radius:8px;padding:16px;margin-bottom:24px;text-align:center;}}
.metric-value{{font-size:36px;font-weight:700;color:#cf0000;}}
.metric-label{{font-size:13px;color:#888;}}
.findings-table{{width:100%;background:#fff;border:1px solid #e0e0e0;border-radius:8px;border-collapse:collapse;font-size:14px;}}
.findings-table th,.findings-table td{{padding:8px 12px;text-align:left;border-bottom:1px solid #eee;}}
.sev{{display:inline-block;padding:2px 8px;border-radius:12px;font-size:11px;font-weight:600;}}
.sev-critical{{background:#fce4ec;color:#c62828;}}
.sev-high{{background:#fff3e0;color:#e65100;}}
.sev-medium{{background:#fffde7;color:#f9a825;}}
.sev-low{{background:#e8f5e9;color:#2e7d32;}}
.sev-na{{background:#f0f0f0;color:#555;}}
.finding{{background:#fff;border:1px solid #e0e0e0;border-radius:8px;padding:12px 16px;margin-bottom:8px;}}
.finding summary{{cursor:pointer;font-weight:600;font-size:14px;}}
.finding h4{{font-size:13px;color:#666;margin:12px 0 4px;}}
.finding p{{font-size:14px;color:#333;}}
.insight p{{background:#fff8e1;padding:8px;border-radius:4px;}}
.empty{{color:#888;text-align:center;padding:40px;}}
</style>
</head>
<body>
{content}
</body>
</html>"#,
        title = html_escape(title),
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use otguard_common::Cvss;

    fn finding() -> Finding {
        Finding {
            cve_id: "CVE-2099-0001".to_string(),
            cvss: Cvss::Score(9.8),
            severity: "CRITICAL".to_string(),
            description: "A Siemens Simatic PLC vulnerability.".to_string(),
            ai_insight: "remote code execution on PLC".to_string(),
        }
    }

    #[test]
    fn renders_count_and_finding() {
        let page = render_dashboard(&[finding()]);
        assert!(page.contains("CVE-2099-0001"));
        assert!(page.contains("remote code execution on PLC"));
        assert!(page.contains(r#"<div class="metric-value">1</div>"#));
    }

    #[test]
    fn renders_empty_state() {
        let page = render_dashboard(&[]);
        assert!(page.contains("hasn't found any threats yet"));
        assert!(page.contains(r#"<div class="metric-value">0</div>"#));
    }

    #[test]
    fn escapes_html_in_descriptions() {
        let mut f = finding();
        f.description = "<script>alert(1)</script>".to_string();
        let page = render_dashboard(&[f]);
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;"));
    }
}
