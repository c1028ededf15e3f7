//! Plan-generation service boundary
//!
//! One fire-and-await call: send the request payload, receive a JSON array
//! of phases or fail. No retry, backoff, or caching lives here; the UI
//! layer owns user-facing retry, and timeouts come from the transport.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::PlannerConfig;
use crate::domain::Phase;

use super::request::PlanRequest;

/// Failures from the plan-generation collaborator
#[derive(Debug, Error)]
pub enum PlanGenerationError {
    /// Non-2xx response, raw status and body preserved for the caller
    #[error("plan service error {status}: {body}")]
    Service { status: u16, body: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid plan response: {0}")]
    InvalidResponse(String),
}

/// External collaborator that turns a request payload into a phase tree
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    async fn generate(&self, request: &PlanRequest) -> Result<Vec<Phase>, PlanGenerationError>;
}

/// HTTP implementation of the plan-generation boundary
pub struct HttpPlanGenerator {
    base_url: String,
    api_key: String,
    http: Client,
}

impl HttpPlanGenerator {
    /// Create a generator from planner configuration
    pub fn from_config(config: &PlannerConfig) -> Result<Self, PlanGenerationError> {
        debug!(base_url = %config.base_url, "from_config: called");
        let api_key = config
            .get_api_key()
            .map_err(|e| PlanGenerationError::InvalidResponse(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            base_url: config.base_url.clone(),
            api_key,
            http,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/plans/generate", self.base_url)
    }
}

#[async_trait]
impl PlanGenerator for HttpPlanGenerator {
    async fn generate(&self, request: &PlanRequest) -> Result<Vec<Phase>, PlanGenerationError> {
        debug!(title = %request.title, num_phases = request.num_phases, "generate: called");

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "generate: service error");
            return Err(PlanGenerationError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let phases: Vec<Phase> = serde_json::from_str(&body)
            .map_err(|e| PlanGenerationError::InvalidResponse(format!("{e}: {body}")))?;

        debug!(phase_count = phases.len(), "generate: plan received");
        Ok(phases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        let generator = HttpPlanGenerator {
            base_url: "https://planner.example.com".to_string(),
            api_key: "key".to_string(),
            http: Client::new(),
        };
        assert_eq!(generator.endpoint(), "https://planner.example.com/v1/plans/generate");
    }

    #[test]
    fn test_phase_array_parses() {
        let body = r#"[
            {"phase_no": 1, "title": "Foundations", "subgoals": [{"title": "A"}]},
            {"phase_no": 2, "title": "Practice", "summary": "drill", "subgoals": []}
        ]"#;
        let phases: Vec<Phase> = serde_json::from_str(body).unwrap();
        assert_eq!(phases.len(), 2);
        assert_eq!(phases[1].summary.as_deref(), Some("drill"));
    }

    #[test]
    fn test_malformed_body_is_invalid_response() {
        let err = serde_json::from_str::<Vec<Phase>>("{\"not\": \"an array\"}")
            .map_err(|e| PlanGenerationError::InvalidResponse(e.to_string()))
            .unwrap_err();
        assert!(matches!(err, PlanGenerationError::InvalidResponse(_)));
    }
}
