use axum::{
    Extension, Json, Router,
    routing::{delete, get, post},
};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::modules::classes::use_cases::create_class::inbound::http as create_class_http;
use crate::modules::classes::use_cases::list_classes::inbound::http as list_classes_http;
use crate::modules::feedback::use_cases::manage_feedback::inbound::http as manage_feedback_http;
use crate::modules::feedback::use_cases::post_feedback::inbound::http as post_feedback_http;
use crate::modules::study_sessions::use_cases::leaderboard::inbound::http as leaderboard_http;
use crate::modules::study_sessions::use_cases::record_session::inbound::http as record_session_http;
use crate::modules::study_sessions::use_cases::weekly_totals::inbound::http as weekly_totals_http;
use crate::modules::users::use_cases::current_user::inbound::http as current_user_http;
use crate::modules::users::use_cases::register_user::inbound::http as register_user_http;
use crate::shell::graphql::{self, AppSchema};
use crate::shell::state::AppState;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "message": "ClassClash API is running" }))
}

pub fn router(state: AppState) -> Router {
    let schema: AppSchema = graphql::schema(state.clone());

    Router::new()
        .route("/health", get(health))
        .route("/api/users", post(register_user_http::handle))
        .route("/api/users/me", get(current_user_http::handle))
        .route(
            "/api/classes",
            get(list_classes_http::handle).post(create_class_http::handle),
        )
        .route("/api/classes/{id}", get(list_classes_http::handle_get))
        .route("/api/sessions", post(record_session_http::handle))
        .route("/api/sessions/weekly", get(weekly_totals_http::handle_all))
        .route("/api/sessions/weekly/{class_id}", get(weekly_totals_http::handle_one))
        .route("/api/leaderboard/{class_id}", get(leaderboard_http::handle))
        .route(
            "/api/feedback",
            get(manage_feedback_http::handle_list).post(post_feedback_http::handle),
        )
        .route("/api/feedback/{id}/upvote", post(manage_feedback_http::handle_upvote))
        .route("/api/feedback/{id}", delete(manage_feedback_http::handle_delete))
        .route("/gql", get(graphql::graphiql).post(graphql::graphql))
        .with_state(state)
        .layer(Extension(schema))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod router_tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::router;
    use crate::tests::fixtures::{body_json, seeded_state};

    #[tokio::test]
    async fn it_should_report_health() {
        let (state, _, _) = seeded_state().await;
        let response = router(state)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn it_should_serve_graphql_with_the_caller_header() {
        let (state, _, seed) = seeded_state().await;
        let body = serde_json::json!({ "query": "{ weeklyTotals { classId totalSeconds } }" }).to_string();
        let response = router(state)
            .oneshot(
                Request::post("/gql")
                    .header("content-type", "application/json")
                    .header("x-user-id", seed.ada.id.to_string())
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json.get("errors").is_none(), "{json}");
        assert_eq!(json["data"]["weeklyTotals"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn it_should_return_404_for_unknown_routes() {
        let (state, _, _) = seeded_state().await;
        let response = router(state)
            .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
