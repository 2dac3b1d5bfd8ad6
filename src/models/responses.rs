use serde::{Deserialize, Serialize};
use crate::core::stats::{StatsReport, TypeShare};
use crate::models::domain::{MatchSet, Profile};
use crate::services::CacheStats;

/// Response for find matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    pub profile: Profile,
    pub matches: MatchSet,
    pub total_candidates: usize,
    pub date: chrono::NaiveDate,
}

/// Response for statistics endpoint
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub report: StatsReport,
    pub team: Option<String>,
    pub team_breakdown: Vec<TypeShare>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub roster_size: Option<usize>,
    pub cache: CacheStats,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code,
        }
    }
}
