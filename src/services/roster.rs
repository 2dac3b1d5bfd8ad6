use crate::core::code::PersonalityCode;
use crate::models::Profile;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when fetching the roster
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Raw row of the profile table
#[derive(Debug, Clone, Deserialize)]
struct RosterRow {
    #[serde(default)]
    name_kor: Option<String>,
    #[serde(default)]
    name_eng: Option<String>,
    #[serde(default)]
    team: Option<String>,
    #[serde(default)]
    mbti: PersonalityCode,
    #[serde(default)]
    welcome_url: Option<String>,
}

impl From<RosterRow> for Profile {
    fn from(row: RosterRow) -> Self {
        let name = row
            .name_kor
            .clone()
            .filter(|n| !n.is_empty())
            .or_else(|| row.name_eng.clone());

        Profile {
            name,
            name_kor: row.name_kor,
            name_eng: row.name_eng,
            team: row.team.unwrap_or_default(),
            mbti: row.mbti,
            welcome_url: row.welcome_url,
        }
    }
}

/// Client for the hosted profile table (PostgREST-style API)
///
/// Read-only: the matcher only ever needs a snapshot of the roster.
pub struct RosterClient {
    base_url: String,
    api_key: String,
    table: String,
    client: Client,
}

impl RosterClient {
    /// Create a new roster client
    pub fn new(
        base_url: String,
        api_key: String,
        table: String,
        timeout: Duration,
    ) -> Result<Self, RosterError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            table,
            client,
        })
    }

    /// Fetch every profile, ordered by romanized name
    pub async fn fetch_profiles(&self) -> Result<Vec<Profile>, RosterError> {
        let url = format!(
            "{}/rest/v1/{}?select=*&order=name_eng",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.table)
        );

        tracing::debug!("Fetching roster from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(RosterError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to fetch roster: {} - {}", status, body);
            return Err(RosterError::ApiError(format!("Failed to fetch roster: {}", status)));
        }

        let rows: Vec<RosterRow> = response
            .json()
            .await
            .map_err(|e| RosterError::InvalidResponse(format!("Failed to parse roster: {}", e)))?;

        let profiles: Vec<Profile> = rows.into_iter().map(Profile::from).collect();
        let valid = profiles.iter().filter(|p| p.mbti.is_valid()).count();

        tracing::debug!("Fetched {} profiles ({} with a valid code)", profiles.len(), valid);

        Ok(profiles)
    }
}
