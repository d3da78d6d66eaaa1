pub mod error;
pub mod schema;
pub mod types;

pub use error::{GeminiError, Result};
pub use schema::ResponseSchema;

use tracing::debug;
use types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a prompt and deserialize the model's JSON reply into `T`.
    ///
    /// Sets `responseMimeType: application/json` plus a `responseSchema`
    /// derived from `T`, so the model is constrained to the expected shape.
    /// A reply that still fails to parse surfaces as `GeminiError::Parse`.
    pub async fn generate_json<T: ResponseSchema>(&self, prompt: &str) -> Result<T> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(prompt)],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: Some(T::gemini_schema()),
            }),
        };

        let response = self.generate(&request).await?;
        let text = response.text().ok_or(GeminiError::Empty)?;

        Ok(serde_json::from_str(text)?)
    }

    async fn generate(&self, request: &GenerateContentRequest) -> Result<GenerateContentResponse> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        debug!(model = %self.model, "Gemini generateContent request");

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if status.as_u16() == 429 {
            return Err(GeminiError::RateLimited);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp.json().await?)
    }
}
