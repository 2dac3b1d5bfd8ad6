use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to find matches (also used for invites)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Query string for profile search
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Query string for statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsQuery {
    #[serde(default)]
    pub team: Option<String>,
}
