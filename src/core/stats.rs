//! Aggregate personality statistics over a roster snapshot.

use std::collections::BTreeMap;
use serde::Serialize;
use crate::core::code::Axis;
use crate::models::Profile;

/// Number of types listed in the top-types ranking by default
pub const DEFAULT_TOP_TYPES: usize = 5;

/// Count per upper-cased code
pub type Distribution = BTreeMap<String, usize>;

/// Split of one axis, as whole-number percentages of all valid profiles
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisRatio {
    pub axis: Axis,
    pub label: &'static str,
    pub first: (char, u32),
    pub second: (char, u32),
}

impl AxisRatio {
    /// The side with the larger share, the first letter on ties
    pub fn dominant(&self) -> char {
        if self.first.1 >= self.second.1 {
            self.first.0
        } else {
            self.second.0
        }
    }
}

/// One row of a ranking or team breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeShare {
    pub mbti: String,
    pub count: usize,
    /// Percentage rounded to one decimal place
    pub percent: f64,
}

/// Roster-wide summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub total: usize,
    pub most_common: Option<String>,
    pub axis_ratios: Option<Vec<AxisRatio>>,
    pub top_types: Vec<TypeShare>,
}

fn valid_codes(profiles: &[Profile]) -> impl Iterator<Item = String> + '_ {
    profiles
        .iter()
        .filter_map(|p| p.mbti.as_str())
        .filter(|code| !code.eq_ignore_ascii_case("null"))
        .map(str::to_uppercase)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Count of each code, ignoring profiles without a valid code
pub fn distribution(profiles: &[Profile]) -> Distribution {
    let mut counts = Distribution::new();
    for code in valid_codes(profiles) {
        *counts.entry(code).or_insert(0) += 1;
    }
    counts
}

fn ranked(distribution: &Distribution) -> Vec<(&String, usize)> {
    let mut entries: Vec<(&String, usize)> =
        distribution.iter().map(|(code, count)| (code, *count)).collect();
    // BTreeMap order is ascending by code, and the sort is stable
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

/// Most frequent code, smallest code first on ties
pub fn most_common(distribution: &Distribution) -> Option<String> {
    ranked(distribution).first().map(|(code, _)| (*code).clone())
}

/// Letter split per axis, or `None` when no profile has a valid code
pub fn axis_ratios(profiles: &[Profile]) -> Option<Vec<AxisRatio>> {
    let codes: Vec<String> = valid_codes(profiles).collect();
    if codes.is_empty() {
        return None;
    }

    let ratios = Axis::ALL
        .into_iter()
        .map(|axis| {
            let (a, b) = axis.letters();
            let letter_at = |code: &String| code.chars().nth(axis.position());
            let count = |letter| codes.iter().filter(|c| letter_at(*c) == Some(letter)).count();
            let pct = |n| percent(n, codes.len()).round() as u32;

            AxisRatio {
                axis,
                label: axis.label(),
                first: (a, pct(count(a))),
                second: (b, pct(count(b))),
            }
        })
        .collect();

    Some(ratios)
}

/// The `n` most frequent codes with their share of all valid profiles
pub fn top_types(profiles: &[Profile], n: usize) -> Vec<TypeShare> {
    let counts = distribution(profiles);
    let total: usize = counts.values().sum();

    ranked(&counts)
        .into_iter()
        .take(n)
        .map(|(code, count)| TypeShare {
            mbti: code.clone(),
            count,
            percent: round1(percent(count, total)),
        })
        .collect()
}

/// Distribution restricted to one team (or everyone), as shares of that subset
pub fn team_breakdown(profiles: &[Profile], team: Option<&str>) -> Vec<TypeShare> {
    let subset: Vec<Profile> = profiles
        .iter()
        .filter(|p| team.map_or(true, |t| p.team == t))
        .cloned()
        .collect();

    top_types(&subset, usize::MAX)
}

/// Build the roster-wide summary
pub fn build_report(profiles: &[Profile]) -> StatsReport {
    let counts = distribution(profiles);
    StatsReport {
        total: counts.values().sum(),
        most_common: most_common(&counts),
        axis_ratios: axis_ratios(profiles),
        top_types: top_types(profiles, DEFAULT_TOP_TYPES),
    }
}
