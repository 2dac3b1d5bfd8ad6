use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::config::InviteSettings;
use crate::core::{find_profile, Matcher, SearchError, SearchOutcome};
use crate::models::{ErrorResponse, FindMatchesRequest, FindMatchesResponse, HealthResponse, Profile, SearchQuery};
use crate::services::{build_invite, RosterCache, RosterClient};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub roster: Arc<RosterClient>,
    pub cache: Arc<RosterCache>,
    pub matcher: Matcher,
    pub invite: InviteSettings,
}

impl AppState {
    /// Current roster snapshot, fetched on a cache miss
    pub async fn roster_snapshot(&self) -> Result<Arc<Vec<Profile>>, HttpResponse> {
        self.cache
            .get_or_fetch(self.roster.fetch_profiles())
            .await
            .map_err(|e| {
                tracing::error!("Failed to load roster: {}", e);
                HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
                    "Failed to load roster",
                    e.to_string(),
                    503,
                ))
            })
    }
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/profiles/search", web::get().to(search_profile))
        .route("/matches/find", web::post().to(find_matches))
        .route("/matches/invite", web::post().to(create_invite));
}

fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new("Validation failed", errors.to_string(), 400))
}

/// Resolve a name to a profile that can be matched
fn resolve_user(roster: &[Profile], name: &str) -> Result<Profile, HttpResponse> {
    match find_profile(roster, name) {
        Ok(SearchOutcome::Complete(profile)) => Ok(profile),
        Ok(SearchOutcome::Incomplete(profile)) => {
            Err(HttpResponse::UnprocessableEntity().json(ErrorResponse::new(
                "Profile incomplete",
                format!("{} has no MBTI on record", profile.display_name()),
                422,
            )))
        }
        Ok(SearchOutcome::NotFound) => Err(HttpResponse::NotFound().json(ErrorResponse::new(
            "Profile not found",
            format!("No profile named {:?}", name.trim()),
            404,
        ))),
        Err(e @ SearchError::EmptyQuery) => {
            Err(HttpResponse::BadRequest().json(ErrorResponse::new("Invalid name", e.to_string(), 400)))
        }
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let roster_size = state.roster_snapshot().await.ok().map(|r| r.len());
    let status = if roster_size.is_some() { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        roster_size,
        cache: state.cache.stats().await,
    })
}

/// Profile search endpoint
///
/// GET /api/v1/profiles/search?name={name}
async fn search_profile(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_error(errors);
    }

    let roster = match state.roster_snapshot().await {
        Ok(roster) => roster,
        Err(response) => return response,
    };

    match find_profile(&roster, &query.name) {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => HttpResponse::BadRequest().json(ErrorResponse::new("Invalid name", e.to_string(), 400)),
    }
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// { "name": "string" }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return validation_error(errors);
    }

    let roster = match state.roster_snapshot().await {
        Ok(roster) => roster,
        Err(response) => return response,
    };

    let user = match resolve_user(&roster, &req.name) {
        Ok(user) => user,
        Err(response) => return response,
    };

    tracing::info!("Finding matches for {} ({} roster entries)", user.primary_name(), roster.len());

    let result = state.matcher.compute_matches(&user, &roster);

    tracing::info!(
        "Returning {} matches for {} (from {} candidates)",
        result.matches.len(),
        user.primary_name(),
        result.total_candidates
    );

    HttpResponse::Ok().json(FindMatchesResponse {
        profile: user,
        matches: result.matches,
        total_candidates: result.total_candidates,
        date: result.date,
    })
}

/// Coffee-chat invite endpoint
///
/// POST /api/v1/matches/invite
///
/// Computes today's matches for `name` and returns a calendar invite for them.
async fn create_invite(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let roster = match state.roster_snapshot().await {
        Ok(roster) => roster,
        Err(response) => return response,
    };

    let user = match resolve_user(&roster, &req.name) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let result = state.matcher.compute_matches(&user, &roster);
    let invite = build_invite(&result.matches, &state.invite, chrono::Utc::now());

    tracing::info!("Built invite for {} with {} attendees", user.primary_name(), invite.attendees.len());

    HttpResponse::Ok().json(invite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::code::PersonalityCode;
    use actix_web::{http::StatusCode, test, App};
    use std::time::Duration;

    fn create_profile(name: &str, team: &str, mbti: &str) -> Profile {
        Profile {
            name: Some(name.to_string()),
            name_kor: None,
            name_eng: Some(name.to_string()),
            team: team.to_string(),
            mbti: PersonalityCode::parse(mbti),
            welcome_url: None,
        }
    }

    async fn state_with(roster: Vec<Profile>) -> AppState {
        let cache = RosterCache::new(60);
        cache.replace(roster).await;

        AppState {
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
        }
    }

    fn roster() -> Vec<Profile> {
        vec![
            create_profile("Alex", "AI", "ENFP"),
            create_profile("Blake", "Mobile", "ENFP"),
            create_profile("Casey", "Backend", "INFJ"),
            create_profile("Drew", "Frontend", "ISTJ"),
            create_profile("Ellis", "FDE", "NULL"),
        ]
    }

    #[actix_web::test]
    async fn test_find_matches_endpoint() {
        let state = state_with(roster()).await;
        let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/matches/find")
            .set_json(serde_json::json!({ "name": "alex" }))
            .to_request();
        let resp: FindMatchesResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.profile.primary_name(), "Alex");
        assert_eq!(resp.matches.bestie.map(|m| m.name), Some("Blake".to_string()));
        assert_eq!(resp.matches.balancer.map(|m| m.name), Some("Casey".to_string()));
        assert_eq!(resp.matches.wild.map(|m| m.name), Some("Drew".to_string()));
    }

    #[actix_web::test]
    async fn test_find_matches_error_statuses() {
        let state = state_with(roster()).await;
        let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure)).await;

        for (name, status) in [
            ("", StatusCode::BAD_REQUEST),
            ("nobody", StatusCode::NOT_FOUND),
            ("ellis", StatusCode::UNPROCESSABLE_ENTITY),
        ] {
            let req = test::TestRequest::post()
                .uri("/matches/find")
                .set_json(serde_json::json!({ "name": name }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), status, "name {:?}", name);
        }
    }

    #[actix_web::test]
    async fn test_invite_endpoint() {
        let state = state_with(roster()).await;
        let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/matches/invite")
            .set_json(serde_json::json!({ "name": "Alex" }))
            .to_request();
        let invite: crate::services::CalendarInvite = test::call_and_read_body_json(&app, req).await;

        assert_eq!(invite.attendees.len(), 3);
        assert!(invite.attendees.contains(&"blake@channel.io".to_string()));
    }

    #[actix_web::test]
    async fn test_health_reports_roster_size() {
        let state = state_with(roster()).await;
        let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.status, "healthy");
        assert_eq!(resp.roster_size, Some(5));
        assert!(resp.cache.cached);
        assert_eq!(resp.cache.ttl_secs, 60);
    }

    #[actix_web::test]
    async fn test_resolve_user_complete() {
        let user = resolve_user(&roster(), " BLAKE ").unwrap();
        assert_eq!(user.team, "Mobile");
    }
}
