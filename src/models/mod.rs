// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Profile, MatchCategory, CategoryInfo, Match, MatchSet};
pub use requests::{FindMatchesRequest, SearchQuery, StatsQuery};
pub use responses::{FindMatchesResponse, HealthResponse, ErrorResponse, StatsResponse};
