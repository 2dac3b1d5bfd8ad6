//! MBTI Match - personality-distance matching for colleague pairing
//!
//! This library provides the matcher that pairs a user with colleagues by
//! MBTI distance (Bestie, Balancer and Wild Card), the roster lookup it is
//! fed from, and aggregate statistics over the same roster.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{Matcher, MatchResult, PersonalityCode, mbti_distance};
pub use models::{Profile, Match, MatchSet, MatchCategory};
