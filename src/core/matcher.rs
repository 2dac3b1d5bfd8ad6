use chrono::{NaiveDate, Utc};
use crate::core::{
    code::{different_axes, Axes, Axis},
    filters::{candidate_pool, prefer_other_teams},
    seed::{stable_seed, tie_break_key},
};
use crate::models::{Match, MatchCategory, MatchSet, Profile};

/// Result of the matching process
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub matches: MatchSet,
    /// Candidates left after validity, self and team filtering
    pub total_candidates: usize,
    /// Calendar date the tie-break seed was derived from
    pub date: NaiveDate,
}

/// A pool entry with everything needed for category selection precomputed
#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    profile: &'a Profile,
    axes: Axes,
    distance: u8,
    tie_break: f64,
}

impl<'a> Candidate<'a> {
    fn is(&self, other: Option<&Candidate<'a>>) -> bool {
        other.is_some_and(|o| std::ptr::eq(self.profile, o.profile))
    }
}

/// Personality-distance matcher
///
/// # Pipeline Stages
/// 1. Candidate pool: valid codes, self excluded, other teams preferred
/// 2. Per-day seed from the user's name and the date
/// 3. Distance and axis decomposition per candidate
/// 4. Bestie, then Balancer, then Wild Card selection
///
/// The matcher holds no state; the roster is passed in on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher;

impl Matcher {
    pub fn new() -> Self {
        Self
    }

    /// Compute matches using today's date (UTC), read once
    pub fn compute_matches(&self, user: &Profile, roster: &[Profile]) -> MatchResult {
        self.compute_matches_on(user, roster, Utc::now().date_naive())
    }

    /// Compute matches as of `date`
    ///
    /// Pure function of its inputs. Every category may come back empty;
    /// an empty roster or a user with an unset code yields an empty set.
    pub fn compute_matches_on(
        &self,
        user: &Profile,
        roster: &[Profile],
        date: NaiveDate,
    ) -> MatchResult {
        let empty = |total_candidates| MatchResult {
            matches: MatchSet::default(),
            total_candidates,
            date,
        };

        let Some(user_axes) = user.mbti.axes() else {
            tracing::debug!("User {} has no valid code, nothing to match", user.primary_name());
            return empty(0);
        };

        let pool = candidate_pool(user, roster);
        if pool.is_empty() {
            tracing::debug!("No candidates for {}", user.primary_name());
            return empty(0);
        }

        let seed = stable_seed(user.primary_name(), date);

        let candidates: Vec<Candidate> = pool
            .into_iter()
            .filter_map(|profile| {
                let axes = profile.mbti.axes()?;
                Some(Candidate {
                    profile,
                    axes,
                    distance: different_axes(&user_axes, &axes).len() as u8,
                    tie_break: tie_break_key(seed, profile.primary_name()),
                })
            })
            .collect();

        let bestie = find_bestie(&candidates);
        let balancer = find_balancer(&candidates, &user_axes);
        let wild = find_wild_card(&candidates, bestie.as_ref(), balancer.as_ref());

        tracing::debug!(
            "Matched {} from {} candidates (bestie: {}, balancer: {}, wild: {})",
            user.primary_name(),
            candidates.len(),
            bestie.is_some(),
            balancer.is_some(),
            wild.is_some()
        );

        let format = |candidate: Option<Candidate>, category| {
            candidate.map(|c| format_match(&user_axes, &c, category))
        };

        MatchResult {
            matches: MatchSet {
                bestie: format(bestie, MatchCategory::Bestie),
                balancer: format(balancer, MatchCategory::Balancer),
                wild: format(wild, MatchCategory::Wild),
            },
            total_candidates: candidates.len(),
            date,
        }
    }
}

#[inline]
fn by_tie_break(a: &Candidate, b: &Candidate) -> std::cmp::Ordering {
    a.tie_break
        .partial_cmp(&b.tie_break)
        .unwrap_or(std::cmp::Ordering::Equal)
}

/// Closest candidate within distance 1, nearest first
fn find_bestie<'a>(candidates: &[Candidate<'a>]) -> Option<Candidate<'a>> {
    let mut pool: Vec<Candidate> = candidates
        .iter()
        .copied()
        .filter(|c| c.distance <= MatchCategory::BESTIE_MAX_DISTANCE)
        .collect();

    pool.sort_by(|a, b| a.distance.cmp(&b.distance).then_with(|| by_tie_break(a, b)));
    pool.first().copied()
}

/// Distance exactly 2, differing on energy or structure
fn find_balancer<'a>(candidates: &[Candidate<'a>], user_axes: &Axes) -> Option<Candidate<'a>> {
    let mut pool: Vec<Candidate> = candidates
        .iter()
        .copied()
        .filter(|c| {
            c.distance == MatchCategory::BALANCER_DISTANCE
                && (c.axes.get(Axis::EnergyEI) != user_axes.get(Axis::EnergyEI)
                    || c.axes.get(Axis::LifestyleJP) != user_axes.get(Axis::LifestyleJP))
        })
        .collect();

    pool.sort_by(by_tie_break);
    pool.first().copied()
}

/// Distance 3 or more, not already picked, preferring teams not yet used
fn find_wild_card<'a>(
    candidates: &[Candidate<'a>],
    bestie: Option<&Candidate<'a>>,
    balancer: Option<&Candidate<'a>>,
) -> Option<Candidate<'a>> {
    let eligible: Vec<Candidate> = candidates
        .iter()
        .copied()
        .filter(|c| c.distance >= MatchCategory::WILD_MIN_DISTANCE)
        .filter(|c| !c.is(bestie) && !c.is(balancer))
        .collect();

    let used_teams: Vec<&str> = [bestie, balancer]
        .into_iter()
        .flatten()
        .map(|c| c.profile.team.as_str())
        .filter(|team| !team.is_empty())
        .collect();

    let profiles: Vec<&Profile> = eligible.iter().map(|c| c.profile).collect();
    let fresh_teams = prefer_other_teams(&profiles, &used_teams);

    let mut pool: Vec<Candidate> = if fresh_teams.is_empty() {
        eligible
    } else {
        eligible
            .into_iter()
            .filter(|c| fresh_teams.iter().any(|p| std::ptr::eq(*p, c.profile)))
            .collect()
    };

    pool.sort_by(by_tie_break);
    pool.first().copied()
}

fn format_match(user_axes: &Axes, candidate: &Candidate, category: MatchCategory) -> Match {
    let info = category.info();
    let diffs: Vec<String> = different_axes(user_axes, &candidate.axes)
        .into_iter()
        .map(|axis| axis.label().to_string())
        .collect();

    let reason = match category {
        MatchCategory::Bestie if candidate.distance == 0 => info.description,
        MatchCategory::Bestie => "Your core axes line up, so conversations tend to keep the same pace",
        MatchCategory::Balancer | MatchCategory::Wild => info.description,
    };

    let profile = candidate.profile;
    Match {
        category,
        name: profile.display_name().to_string(),
        name_eng: profile.name_eng.clone(),
        name_kor: profile.name_kor.clone(),
        team: profile.team.clone(),
        mbti: profile.mbti.to_string(),
        distance: candidate.distance,
        diff_text: diffs.join(", "),
        diffs,
        reason: reason.to_string(),
        emoji: info.emoji.to_string(),
        title: info.title.to_string(),
        welcome_url: profile.welcome_url.clone(),
    }
}
