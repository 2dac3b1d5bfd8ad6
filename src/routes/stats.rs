use actix_web::{web, HttpResponse, Responder};
use crate::core::stats::{build_report, team_breakdown};
use crate::models::{StatsQuery, StatsResponse};
use crate::routes::matches::AppState;

/// Configure statistics routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/stats", web::get().to(get_stats));
}

/// Aggregate statistics endpoint
///
/// GET /api/v1/stats?team={team}
///
/// Only teams and codes are reported, never names.
async fn get_stats(
    state: web::Data<AppState>,
    query: web::Query<StatsQuery>,
) -> impl Responder {
    let roster = match state.roster_snapshot().await {
        Ok(roster) => roster,
        Err(response) => return response,
    };

    let team = query
        .team
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty() && !t.eq_ignore_ascii_case("all"));

    let report = build_report(&roster);
    tracing::debug!("Stats over {} valid profiles (team: {:?})", report.total, team);

    HttpResponse::Ok().json(StatsResponse {
        team_breakdown: team_breakdown(&roster, team),
        team: team.map(String::from),
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InviteSettings;
    use crate::core::{code::PersonalityCode, Matcher};
    use crate::models::Profile;
    use crate::services::{RosterCache, RosterClient};
    use actix_web::{test, App};
    use std::sync::Arc;
    use std::time::Duration;

    #[actix_web::test]
    async fn test_stats_endpoint() {
        let cache = RosterCache::new(60);
        cache
            .replace(
                [("AI", "INTJ"), ("AI", "ENFP"), ("Mobile", "INTJ"), ("Mobile", "NULL")]
                    .into_iter()
                    .enumerate()
                    .map(|(i, (team, mbti))| Profile {
                        name: Some(format!("p{}", i)),
                        name_kor: None,
                        name_eng: None,
                        team: team.to_string(),
                        mbti: PersonalityCode::parse(mbti),
                        welcome_url: None,
                    })
                    .collect(),
            )
            .await;

        let state = AppState {
            roster: Arc::new(
                RosterClient::new(
                    "http://127.0.0.1:9".to_string(),
                    String::new(),
                    "ch-eng-mbti".to_string(),
                    Duration::from_secs(1),
                )
                .unwrap(),
            ),
            cache: Arc::new(cache),
            matcher: Matcher::new(),
            invite: InviteSettings::default(),
        };
        let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure)).await;

        let req = test::TestRequest::get().uri("/stats?team=AI").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["total"], 3);
        assert_eq!(body["most_common"], "INTJ");
        assert_eq!(body["team"], "AI");
        assert_eq!(body["team_breakdown"].as_array().map(Vec::len), Some(2));
    }
}
