use crate::config::InviteSettings;
use crate::models::MatchSet;
use chrono::{DateTime, Duration, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Group coffee-chat invite for a set of matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarInvite {
    pub title: String,
    pub description: String,
    pub attendees: Vec<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub url: String,
}

/// Attendee address derived from a romanized name
///
/// `None` when the name is missing or blank.
pub fn attendee_email(name_eng: Option<&str>, domain: &str) -> Option<String> {
    let name = name_eng?.trim();
    if name.is_empty() {
        return None;
    }
    Some(format!("{}@{}", name.to_lowercase(), domain))
}

/// Event description listing every matched person
pub fn invite_description(matches: &MatchSet) -> String {
    let attendees = matches
        .iter()
        .map(|m| format!("- {} ({}, {})", m.name, m.mbti, m.team))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "MBTI-based team matching coffee chat.\n\nAttendees:\n{}\n\nLet's take some time to get to know each other! ☕",
        attendees
    )
}

fn calendar_stamp(at: &DateTime<Utc>) -> String {
    at.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Team-local offset, UTC when the configured value is out of range
fn team_offset(settings: &InviteSettings) -> FixedOffset {
    settings
        .utc_offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix())
}

/// Build the invite for `matches`, scheduled the team-local day after `now`
pub fn build_invite(matches: &MatchSet, settings: &InviteSettings, now: DateTime<Utc>) -> CalendarInvite {
    let offset = team_offset(settings);
    let today = now.with_timezone(&offset).date_naive();
    let day = today.succ_opt().unwrap_or(today);
    let starts_at = day
        .and_hms_opt(settings.start_hour.min(23), 0, 0)
        .and_then(|at| at.and_local_timezone(offset).single())
        .map(|at| at.with_timezone(&Utc))
        .unwrap_or(now);
    let ends_at = starts_at + Duration::minutes(i64::from(settings.duration_minutes));

    let attendees: Vec<String> = matches
        .iter()
        .filter_map(|m| attendee_email(m.name_eng.as_deref(), &settings.email_domain))
        .collect();

    let description = invite_description(matches);
    let dates = format!("{}/{}", calendar_stamp(&starts_at), calendar_stamp(&ends_at));

    let mut url = format!(
        "{}?action=TEMPLATE&text={}&details={}&dates={}",
        settings.calendar_url,
        urlencoding::encode(&settings.title),
        urlencoding::encode(&description),
        urlencoding::encode(&dates)
    );
    if !attendees.is_empty() {
        url.push_str("&add=");
        url.push_str(&urlencoding::encode(&attendees.join(",")));
    }

    tracing::debug!("Built invite for {} attendees starting {}", attendees.len(), starts_at);

    CalendarInvite {
        title: settings.title.clone(),
        description,
        attendees,
        starts_at,
        ends_at,
        url,
    }
}
