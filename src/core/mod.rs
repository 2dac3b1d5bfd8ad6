// Core algorithm exports
pub mod code;
pub mod filters;
pub mod matcher;
pub mod search;
pub mod seed;
pub mod stats;

pub use code::{mbti_distance, different_axes, Axis, PersonalityCode};
pub use filters::candidate_pool;
pub use matcher::{Matcher, MatchResult};
pub use search::{find_profile, SearchError, SearchOutcome};
pub use seed::{hash_string, seeded_random, stable_seed};
pub use stats::{build_report, StatsReport};
