//! REST-backed goal store
//!
//! Talks to the hosted backend's row API: one POST per goal (representation
//! returned so we get the generated id), one batched POST for subgoal rows.
//! No retries here; failures surface to the materializer as-is.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::BackendConfig;
use crate::domain::{GoalId, NewGoal, SubgoalRow};

use super::{GoalStore, StorageError};

/// Goal store backed by the hosted backend's REST row API
pub struct RestGoalStore {
    base_url: String,
    api_key: String,
    http: Client,
}

/// Row shape returned when inserting a goal with representation
#[derive(Debug, Deserialize)]
struct InsertedGoal {
    id: String,
}

impl RestGoalStore {
    /// Create a store from backend configuration
    pub fn from_config(config: &BackendConfig) -> Result<Self, StorageError> {
        debug!(base_url = %config.base_url, "from_config: called");
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            base_url: config.base_url.clone(),
            api_key: config.get_api_key().map_err(|e| StorageError::InvalidResponse(e.to_string()))?,
            http,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }
}

#[async_trait::async_trait]
impl GoalStore for RestGoalStore {
    async fn insert_goal(&self, goal: &NewGoal) -> Result<GoalId, StorageError> {
        debug!(title = %goal.title, "insert_goal: called");
        let response = self
            .http
            .post(self.table_url("goals"))
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation")
            .json(goal)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "insert_goal: backend error");
            return Err(StorageError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        // Representation comes back as a one-element array of inserted rows
        let rows: Vec<InsertedGoal> = response.json().await?;
        let inserted = rows
            .into_iter()
            .next()
            .ok_or_else(|| StorageError::InvalidResponse("empty representation for inserted goal".to_string()))?;

        debug!(goal_id = %inserted.id, "insert_goal: created");
        Ok(GoalId(inserted.id))
    }

    async fn insert_subgoals(&self, rows: &[SubgoalRow]) -> Result<(), StorageError> {
        debug!(row_count = rows.len(), "insert_subgoals: called");
        if rows.is_empty() {
            debug!("insert_subgoals: nothing to insert");
            return Ok(());
        }

        let response = self
            .http
            .post(self.table_url("subgoals"))
            .bearer_auth(&self.api_key)
            .json(rows)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "insert_subgoals: backend error");
            return Err(StorageError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        debug!("insert_subgoals: batch inserted");
        Ok(())
    }
}
