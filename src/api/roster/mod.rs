//! Roster API: teams, players and team statistics

mod players;
mod teams;

use axum::{
    extract::{rejection::PathRejection, Path},
    routing::{get, post},
    Router,
};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::TeamId;

pub use teams::{DeleteTeamResponse, ImportTeamsResponse};

/// Create the roster router
///
/// Read routes accept any authenticated caller; imports and mutations
/// require the admin role.
pub fn create_roster_router() -> Router<AppState> {
    Router::new()
        .route("/teams", get(teams::list_teams))
        .route("/teams/stats", get(teams::get_team_stats))
        .route("/teams/import", post(teams::import_teams))
        .route(
            "/teams/{id}",
            get(teams::get_team)
                .patch(teams::update_team)
                .delete(teams::delete_team),
        )
        .route("/teams/{id}/players", get(players::list_team_players))
        .route("/players", get(players::list_players))
}

/// Team id path segment, with rejections kept for the API error body
type TeamIdPath = Result<Path<i64>, PathRejection>;

fn team_id(path: TeamIdPath) -> Result<TeamId, ApiError> {
    path.map(|Path(id)| TeamId::new(id))
        .map_err(|e| ApiError::bad_request(format!("Invalid team id: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::domain::{Role, TeamId};
    use crate::infrastructure::auth::{JwtConfig, JwtGenerator, JwtService};
    use crate::infrastructure::cache::InMemoryCache;
    use crate::infrastructure::storage::InMemoryRosterStore;
    use crate::infrastructure::team::TeamService;

    const BOUNDARY: &str = "roster-test-boundary";

    struct TestApp {
        router: Router,
        store: Arc<InMemoryRosterStore>,
        admin: String,
        viewer: String,
    }

    fn app() -> TestApp {
        let jwt = JwtService::new(JwtConfig::new("roster-secret", 1));
        let store = Arc::new(InMemoryRosterStore::new());
        let cache = Arc::new(InMemoryCache::new());
        let service = TeamService::new(store.clone(), store.clone(), cache.clone());

        let state = AppState::new(Arc::new(service), Arc::new(jwt.clone()), cache);
        let router = create_roster_router().with_state(state);

        TestApp {
            router,
            store,
            admin: jwt.generate("ops", Role::Admin).unwrap(),
            viewer: jwt.generate("reader", Role::Viewer).unwrap(),
        }
    }

    fn request(method: Method, uri: &str, token: Option<&str>, body: Body) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(body).unwrap()
    }

    fn multipart_upload(token: &str, field: &str, filename: &str, content: &str) -> Request<Body> {
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: text/csv\r\n\r\n{content}\r\n--{b}--\r\n",
            b = BOUNDARY,
        );

        Request::builder()
            .method(Method::POST)
            .uri("/teams/import")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    async fn seed_teams(app: &TestApp) {
        let (status, body) = send(
            &app.router,
            multipart_upload(
                &app.admin,
                "file",
                "teams.csv",
                "name,description\nFalcons,Weekend league\nHawks,Midweek league\n",
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["created"], 2);
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let app = app();

        let (status, body) = send(&app.router, request(Method::GET, "/teams", None, Body::empty())).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["type"], "authentication_error");
    }

    #[tokio::test]
    async fn test_viewer_cannot_import() {
        let app = app();

        let (status, body) = send(
            &app.router,
            multipart_upload(&app.viewer, "file", "teams.csv", "name,description\nA,B\n"),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "insufficient_role");
    }

    #[tokio::test]
    async fn test_import_then_list_and_get() {
        let app = app();
        seed_teams(&app).await;

        let (status, body) = send(
            &app.router,
            request(Method::GET, "/teams", Some(&app.viewer), Body::empty()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["name"], "Falcons");
        assert!(body[0].get("description").is_none());

        let (status, body) = send(
            &app.router,
            request(Method::GET, "/teams/2", Some(&app.viewer), Body::empty()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Hawks");
        assert_eq!(body["description"], "Midweek league");
    }

    #[tokio::test]
    async fn test_import_rejects_non_csv_upload() {
        let app = app();

        let (status, body) = send(
            &app.router,
            multipart_upload(&app.admin, "file", "teams.txt", "name,description\nA,B\n"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "invalid_request_error");
    }

    #[tokio::test]
    async fn test_import_requires_file_field() {
        let app = app();

        let (status, _) = send(
            &app.router,
            multipart_upload(&app.admin, "upload", "teams.csv", "name,description\nA,B\n"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_unknown_team_is_not_found() {
        let app = app();

        let (status, body) = send(
            &app.router,
            request(Method::GET, "/teams/99", Some(&app.viewer), Body::empty()),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["type"], "not_found_error");
    }

    #[tokio::test]
    async fn test_non_numeric_team_id_is_bad_request() {
        let app = app();

        for (method, uri) in [
            (Method::GET, "/teams/abc"),
            (Method::DELETE, "/teams/abc"),
            (Method::GET, "/teams/abc/players"),
        ] {
            let token = if method == Method::GET { &app.viewer } else { &app.admin };
            let (status, body) =
                send(&app.router, request(method, uri, Some(token.as_str()), Body::empty())).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"]["type"], "invalid_request_error");
            assert!(
                body["error"]["message"]
                    .as_str()
                    .unwrap()
                    .starts_with("Invalid team id")
            );
        }
    }

    #[tokio::test]
    async fn test_patch_and_delete_team() {
        let app = app();
        seed_teams(&app).await;

        let patch = Request::builder()
            .method(Method::PATCH)
            .uri("/teams/1")
            .header(header::AUTHORIZATION, format!("Bearer {}", app.admin))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"description":"Sunday league"}"#))
            .unwrap();
        let (status, body) = send(&app.router, patch).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Falcons");
        assert_eq!(body["description"], "Sunday league");

        let (status, body) = send(
            &app.router,
            request(Method::DELETE, "/teams/1", Some(&app.admin), Body::empty()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted"], true);
        assert_eq!(body["id"], 1);

        let (status, _) = send(
            &app.router,
            request(Method::DELETE, "/teams/1", Some(&app.admin), Body::empty()),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_viewer_cannot_delete() {
        let app = app();
        seed_teams(&app).await;

        let (status, _) = send(
            &app.router,
            request(Method::DELETE, "/teams/1", Some(&app.viewer), Body::empty()),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_team_players_are_paginated() {
        let app = app();
        seed_teams(&app).await;
        for i in 1..=7 {
            app.store
                .insert_player(TeamId::new(1), format!("Player {}", i), format!("p{}", i))
                .unwrap();
        }
        app.store.insert_player(TeamId::new(2), "Other", "o").unwrap();

        let (status, body) = send(
            &app.router,
            request(
                Method::GET,
                "/teams/1/players?page=2&page_size=5",
                Some(&app.viewer),
                Body::empty(),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let players = body.as_array().unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0]["name"], "Player 6");
        assert!(players.iter().all(|p| p["team_id"] == 1));
    }

    #[tokio::test]
    async fn test_list_players_with_filters() {
        let app = app();
        seed_teams(&app).await;
        app.store.insert_player(TeamId::new(1), "Alice Smith", "Ace").unwrap();
        app.store.insert_player(TeamId::new(2), "alice jones", "ace").unwrap();
        app.store.insert_player(TeamId::new(2), "Bob", "Ace").unwrap();

        let (status, body) = send(
            &app.router,
            request(
                Method::GET,
                "/players?name=alice&nickname=Ace",
                Some(&app.viewer),
                Body::empty(),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let players = body.as_array().unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0]["name"], "Alice Smith");
    }

    #[tokio::test]
    async fn test_invalid_page_is_bad_request() {
        let app = app();

        let (status, _) = send(
            &app.router,
            request(Method::GET, "/players?page=0", Some(&app.viewer), Body::empty()),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app.router,
            request(Method::GET, "/players?page=abc", Some(&app.viewer), Body::empty()),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "invalid_request_error");
    }

    #[tokio::test]
    async fn test_team_stats() {
        let app = app();
        seed_teams(&app).await;
        app.store.insert_player(TeamId::new(1), "Alice", "Ace").unwrap();
        app.store.insert_support_message(TeamId::new(2), "help").unwrap();

        let (status, body) = send(
            &app.router,
            request(Method::GET, "/teams/stats", Some(&app.viewer), Body::empty()),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["playerCount"], 1);
        assert_eq!(body[0]["supportMessageCount"], 0);
        assert_eq!(body[1]["playerCount"], 0);
        assert_eq!(body[1]["supportMessageCount"], 1);
    }
}
