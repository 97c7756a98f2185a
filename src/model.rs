// Summarization model abstraction - pluggable providers.
// Default: distilbart-cnn via a local Hugging Face style inference server.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Abstractive summarization model. Implement this to support new backends.
///
/// Implementations must honor `deterministic`: identical input must yield
/// identical output when it is set, so runs are reproducible and testable.
#[async_trait::async_trait]
pub trait SummaryModel: Send + Sync {
    async fn summarize(
        &self,
        text: &str,
        min_length: usize,
        max_length: usize,
        deterministic: bool,
    ) -> Result<String, ModelError>;

    fn model_name(&self) -> &str;
}

/// Configuration for the summarization backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ModelConfig {
    /// Self-hosted inference server speaking the HF pipeline JSON protocol.
    HfEndpoint { endpoint_url: String, model: String },
    /// Hosted Hugging Face inference API (requires API key).
    HfInferenceApi { api_key: String, model: String },
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::HfEndpoint {
            endpoint_url: "http://localhost:8080".to_string(),
            model: "sshleifer/distilbart-cnn-12-6".to_string(),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum ModelError {
    #[error("Model connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Invalid model response: {0}")]
    InvalidResponse(String),
    #[error("Summarization failed: {0}")]
    GenerationFailed(String),
    #[error("Model config error: {0}")]
    ConfigError(String),
}

/// HF pipeline-protocol summarizer over HTTP.
pub struct HfSummarizer {
    url: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct HfRequest {
    inputs: String,
    parameters: HfParameters,
    options: HfOptions,
}

#[derive(Serialize)]
struct HfParameters {
    min_length: usize,
    max_length: usize,
    do_sample: bool,
}

#[derive(Serialize)]
struct HfOptions {
    wait_for_model: bool,
}

#[derive(Deserialize)]
struct HfSummary {
    summary_text: String,
}

impl HfSummarizer {
    pub fn for_endpoint(endpoint_url: String, model: String) -> Self {
        Self {
            url: endpoint_url.trim_end_matches('/').to_string(),
            model,
            api_key: None,
            client: reqwest::Client::new(),
        }
    }

    pub fn for_inference_api(api_key: String, model: String) -> Self {
        Self {
            url: format!("https://api-inference.huggingface.co/models/{}", model),
            model,
            api_key: Some(api_key),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl SummaryModel for HfSummarizer {
    async fn summarize(
        &self,
        text: &str,
        min_length: usize,
        max_length: usize,
        deterministic: bool,
    ) -> Result<String, ModelError> {
        debug!(model = %self.model, input_chars = text.len(), "Requesting summary");

        let req = HfRequest {
            inputs: text.to_string(),
            parameters: HfParameters {
                min_length,
                max_length,
                do_sample: !deterministic,
            },
            options: HfOptions {
                wait_for_model: true,
            },
        };

        let mut request = self.client.post(&self.url).json(&req);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ModelError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::GenerationFailed(format!(
                "{} returned {}: {}",
                self.model, status, body
            )));
        }

        let summaries: Vec<HfSummary> = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(e.to_string()))?;

        let summary = summaries
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::InvalidResponse("empty summary list".to_string()))?;

        debug!(model = %self.model, summary_chars = summary.summary_text.len(), "Summary received");
        Ok(summary.summary_text.trim().to_string())
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Build the process-wide model handle from config. The handle is created
/// once at startup and shared read-only across all requests.
pub fn create_summary_model(config: ModelConfig) -> Result<Arc<dyn SummaryModel>, ModelError> {
    match config {
        ModelConfig::HfEndpoint { endpoint_url, model } => {
            if endpoint_url.is_empty() {
                return Err(ModelError::ConfigError(
                    "SUMMARY_ENDPOINT must not be empty".to_string(),
                ));
            }
            info!("Initializing {} via {}", model, endpoint_url);
            Ok(Arc::new(HfSummarizer::for_endpoint(endpoint_url, model)))
        }
        ModelConfig::HfInferenceApi { api_key, model } => {
            if api_key.is_empty() {
                return Err(ModelError::ConfigError(
                    "HF_API_KEY must not be empty".to_string(),
                ));
            }
            info!("Initializing {} via hosted inference API", model);
            Ok(Arc::new(HfSummarizer::for_inference_api(api_key, model)))
        }
    }
}
