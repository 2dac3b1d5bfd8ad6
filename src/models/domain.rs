use serde::{Deserialize, Serialize};
use crate::core::code::PersonalityCode;

/// Roster entry for one colleague
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub name_kor: Option<String>,
    #[serde(default)]
    pub name_eng: Option<String>,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub mbti: PersonalityCode,
    #[serde(default)]
    pub welcome_url: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl Profile {
    /// Name used for seeding and tie-breaking: primary, then romanized, then localized
    pub fn primary_name(&self) -> &str {
        non_empty(&self.name)
            .or_else(|| non_empty(&self.name_eng))
            .or_else(|| non_empty(&self.name_kor))
            .unwrap_or_default()
    }

    /// Name shown to users: localized, then romanized, then primary
    pub fn display_name(&self) -> &str {
        non_empty(&self.name_kor)
            .or_else(|| non_empty(&self.name_eng))
            .or_else(|| non_empty(&self.name))
            .unwrap_or_default()
    }

    /// True when any identifier present on both profiles is equal
    pub fn shares_identity(&self, other: &Profile) -> bool {
        let same = |a: &Option<String>, b: &Option<String>| match (non_empty(a), non_empty(b)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        };

        same(&self.name, &other.name)
            || same(&self.name_eng, &other.name_eng)
            || same(&self.name_kor, &other.name_kor)
    }

    /// Case-insensitive match of an already lowercased query against any identifier
    pub fn answers_to(&self, lowered_query: &str) -> bool {
        [&self.name, &self.name_eng, &self.name_kor]
            .into_iter()
            .filter_map(non_empty)
            .any(|name| name.to_lowercase() == lowered_query)
    }
}

/// Match category, in selection order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchCategory {
    Bestie,
    Balancer,
    Wild,
}

/// Static presentation data for a category
#[derive(Debug, Clone, Copy)]
pub struct CategoryInfo {
    pub emoji: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

impl MatchCategory {
    /// Largest distance still eligible as a bestie
    pub const BESTIE_MAX_DISTANCE: u8 = 1;
    /// Exact distance required for a balancer
    pub const BALANCER_DISTANCE: u8 = 2;
    /// Smallest distance eligible as a wild card
    pub const WILD_MIN_DISTANCE: u8 = 3;

    pub fn info(self) -> CategoryInfo {
        match self {
            MatchCategory::Bestie => CategoryInfo {
                emoji: "🤝",
                title: "Bestie Match",
                description: "Your thought processes are nearly identical",
            },
            MatchCategory::Balancer => CategoryInfo {
                emoji: "⚖️",
                title: "Balancer",
                description: "Different styles with little friction, a good complement",
            },
            MatchCategory::Wild => CategoryInfo {
                emoji: "🎲",
                title: "Wild Card",
                description: "A different perspective that widens the view in meetings",
            },
        }
    }
}

/// One categorized match, ready for presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub category: MatchCategory,
    pub name: String,
    pub name_eng: Option<String>,
    pub name_kor: Option<String>,
    pub team: String,
    pub mbti: String,
    pub distance: u8,
    pub diffs: Vec<String>,
    #[serde(rename = "diffText")]
    pub diff_text: String,
    pub reason: String,
    pub emoji: String,
    pub title: String,
    pub welcome_url: Option<String>,
}

/// Up to one match per category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchSet {
    pub bestie: Option<Match>,
    pub balancer: Option<Match>,
    pub wild: Option<Match>,
}

impl MatchSet {
    /// Present matches in category order
    pub fn iter(&self) -> impl Iterator<Item = &Match> {
        [&self.bestie, &self.balancer, &self.wild]
            .into_iter()
            .filter_map(Option::as_ref)
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }
}
