use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use gemini_client::{GeminiClient, GeminiError};

use crate::traits::{Classify, Sleeper, TokioSleeper};

/// What the model returns for each escalated description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Classification {
    /// True if the vulnerability is OT/ICS/SCADA related.
    pub ot_related: bool,
    /// Expert-level explanation of the verdict.
    pub reason: String,
}

impl Classification {
    /// Safe default used whenever the provider or its output fails:
    /// "not relevant" rather than a crashed cycle. Known false-negative
    /// risk, which is why every path returning this also logs a warning.
    pub fn error_default() -> Self {
        Self {
            ot_related: false,
            reason: "Error".to_string(),
        }
    }
}

/// Descriptions are cut to this many bytes before submission. Bounds cost
/// and payload size; CVE descriptions front-load the relevant facts.
const MAX_DESCRIPTION_BYTES: usize = 800;

/// Backoff schedule on rate limiting: `(attempt + 1) * 20s`, 3 attempts.
const RATE_LIMIT_RETRIES: u32 = 3;
const BACKOFF_STEP: Duration = Duration::from_secs(20);

/// Steady-state pacing after every successful call, independent of retry
/// backoff. Keeps the loop under the provider's per-minute budget.
const PACING_DELAY: Duration = Duration::from_secs(5);

const ANALYST_PROMPT: &str = r#"You are an expert OT threat analyst.
Thoroughly analyze the following CVE description.
Return ONLY a JSON object with exactly these keys:
1. "ot_related": boolean (true if OT/ICS/SCADA related, false otherwise).
2. "reason": string (an expert-level, detailed explanation of why. If "ot_related" is true, explain why this vulnerability is dangerous).

---------------------
Description:
---------------------
"#;

/// Seam between the classifier's retry policy and the actual model call,
/// so the policy is testable with a scripted model.
#[async_trait]
pub trait AnalystModel: Send + Sync {
    async fn analyze(&self, prompt: &str) -> gemini_client::Result<Classification>;
}

#[async_trait]
impl AnalystModel for GeminiClient {
    async fn analyze(&self, prompt: &str) -> gemini_client::Result<Classification> {
        self.generate_json(prompt).await
    }
}

/// Wraps the rate-limited model call with the retry/backoff policy and
/// the safe-default error collapse.
pub struct Classifier {
    model: Arc<dyn AnalystModel>,
    sleeper: Arc<dyn Sleeper>,
}

impl Classifier {
    pub fn new(gemini: GeminiClient) -> Self {
        Self::with_model(Arc::new(gemini), Arc::new(TokioSleeper))
    }

    pub fn with_model(model: Arc<dyn AnalystModel>, sleeper: Arc<dyn Sleeper>) -> Self {
        Self { model, sleeper }
    }

    async fn classify_inner(&self, description: &str) -> Classification {
        let short_desc = truncate_on_char_boundary(description, MAX_DESCRIPTION_BYTES);
        let prompt = format!("{ANALYST_PROMPT}{short_desc}");

        let mut attempts = 0;
        while attempts < RATE_LIMIT_RETRIES {
            match self.model.analyze(&prompt).await {
                Ok(verdict) => {
                    debug!(ot_related = verdict.ot_related, "Classification received");
                    self.sleeper.sleep(PACING_DELAY).await;
                    return verdict;
                }
                Err(GeminiError::RateLimited) => {
                    let wait = BACKOFF_STEP * (attempts + 1);
                    warn!(
                        backoff_secs = wait.as_secs(),
                        attempt = attempts + 1,
                        "Quota hit, backing off"
                    );
                    self.sleeper.sleep(wait).await;
                    attempts += 1;
                }
                Err(e) => {
                    warn!(error = %e, "Classifier error, returning safe default");
                    return Classification::error_default();
                }
            }
        }

        // Retries exhausted — one last unconditional attempt.
        match self.model.analyze(&prompt).await {
            Ok(verdict) => {
                self.sleeper.sleep(PACING_DELAY).await;
                verdict
            }
            Err(e) => {
                warn!(error = %e, "Classifier failed after retries, returning safe default");
                Classification::error_default()
            }
        }
    }
}

#[async_trait]
impl Classify for Classifier {
    async fn classify(&self, description: &str) -> Classification {
        self.classify_inner(description).await
    }
}

fn truncate_on_char_boundary(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
