use serde::Serialize;
use thiserror::Error;
use crate::models::Profile;

/// Errors that can occur when looking up a profile
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Please enter a name")]
    EmptyQuery,
}

/// Result of a roster lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "profile", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// Found, with a valid personality code
    Complete(Profile),
    /// Found, but the personality code is missing
    Incomplete(Profile),
    NotFound,
}

impl SearchOutcome {
    pub fn profile(&self) -> Option<&Profile> {
        match self {
            SearchOutcome::Complete(p) | SearchOutcome::Incomplete(p) => Some(p),
            SearchOutcome::NotFound => None,
        }
    }
}

/// Find a profile by any of its names, case-insensitively
///
/// The first roster entry that answers to the trimmed query wins.
pub fn find_profile(roster: &[Profile], query: &str) -> Result<SearchOutcome, SearchError> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Err(SearchError::EmptyQuery);
    }

    let outcome = match roster.iter().find(|p| p.answers_to(&query)) {
        Some(p) if p.mbti.is_valid() => SearchOutcome::Complete(p.clone()),
        Some(p) => SearchOutcome::Incomplete(p.clone()),
        None => SearchOutcome::NotFound,
    };

    tracing::debug!("Profile search for {:?}: {:?}", query, outcome.profile().map(Profile::primary_name));
    Ok(outcome)
}
