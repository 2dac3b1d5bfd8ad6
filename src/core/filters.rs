use crate::models::Profile;

/// Candidate pool for a querying user
///
/// Stages, in order:
/// 1. drop entries without a valid personality code
/// 2. drop entries that share an identifier with the user
/// 3. keep only other-team entries, unless there are none
pub fn candidate_pool<'a>(user: &Profile, roster: &'a [Profile]) -> Vec<&'a Profile> {
    let candidates: Vec<&Profile> = roster
        .iter()
        .filter(|profile| profile.mbti.is_valid())
        .filter(|profile| !profile.shares_identity(user))
        .collect();

    let other_team = prefer_other_teams(&candidates, &[user.team.as_str()]);
    if other_team.is_empty() {
        candidates
    } else {
        other_team
    }
}

/// Entries whose team is not in `used_teams`
#[inline]
pub fn prefer_other_teams<'a>(pool: &[&'a Profile], used_teams: &[&str]) -> Vec<&'a Profile> {
    pool.iter()
        .copied()
        .filter(|profile| !used_teams.contains(&profile.team.as_str()))
        .collect()
}
