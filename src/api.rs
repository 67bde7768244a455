//! Score service client
//!
//! Posts final scores and fetches the leaderboard. Failures are reported to the
//! player as a [`SaveStatus`] and never reach the simulation.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::leaderboard::{Leaderboard, LeaderboardEntry};

/// Timeout for every score service request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server returned {0}")]
    Status(reqwest::StatusCode),
    #[error("Request timed out")]
    Timeout,
    #[error("Failed to create runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Body of `POST /score`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub wallet: String,
    pub score: u64,
}

/// Response of `POST /score`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub success: bool,
}

/// Outcome of saving a result, as shown to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Saved,
    Rejected,
    Failed,
    NoWallet,
}

impl SaveStatus {
    pub fn message(&self) -> &'static str {
        match self {
            SaveStatus::Saved => "Result saved!",
            SaveStatus::Rejected => "Can't save result",
            SaveStatus::Failed => "Save result error",
            SaveStatus::NoWallet => "Connect your wallet to save result.",
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, SaveStatus::Saved)
    }
}

#[derive(Debug, Clone)]
pub struct ScoreClient {
    base_url: String,
    client: reqwest::Client,
}

impl ScoreClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_client(base_url, client))
    }

    /// Use a preconfigured HTTP client (proxy settings, custom timeouts)
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    pub async fn submit_score(
        &self,
        submission: &ScoreSubmission,
    ) -> Result<SubmitResponse, ApiError> {
        let request = self.client.post(self.url("score")).json(submission).send();
        let response = match tokio::time::timeout(REQUEST_TIMEOUT, request).await {
            Ok(result) => result?,
            Err(_) => return Err(ApiError::Timeout),
        };
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    pub async fn fetch_leaderboard(&self) -> Result<Leaderboard, ApiError> {
        let request = self.client.get(self.url("leaderboard")).send();
        let response = match tokio::time::timeout(REQUEST_TIMEOUT, request).await {
            Ok(result) => result?,
            Err(_) => return Err(ApiError::Timeout),
        };
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        let entries: Vec<LeaderboardEntry> = response.json().await?;
        Ok(Leaderboard::from_entries(entries))
    }
}

/// Submit a final score on behalf of `wallet`, mapping the outcome to a status
pub async fn save_result(client: &ScoreClient, wallet: Option<&str>, score: u64) -> SaveStatus {
    let Some(wallet) = wallet.filter(|w| !w.is_empty()) else {
        return SaveStatus::NoWallet;
    };
    let submission = ScoreSubmission {
        wallet: wallet.to_string(),
        score,
    };
    match client.submit_score(&submission).await {
        Ok(SubmitResponse { success: true }) => {
            log::info!("Score {} saved for {}", score, wallet);
            SaveStatus::Saved
        }
        Ok(_) => {
            log::warn!("Score service rejected score {}", score);
            SaveStatus::Rejected
        }
        Err(e) => {
            log::warn!("Score submission failed: {}", e);
            SaveStatus::Failed
        }
    }
}

/// Run one score service call to completion from synchronous code
pub fn block_on<F: std::future::Future>(future: F) -> Result<F::Output, ApiError> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(rt.block_on(future))
}
