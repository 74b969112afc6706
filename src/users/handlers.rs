use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    error::ApiError,
    state::AppState,
    users::{
        dto::{CreateUserRequest, LoginRequest, PublicUser, UserEnvelope},
        extractors::CallerId,
        services::{self, MSG_ALL_FIELDS, MSG_LOGIN_FIELDS},
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", post(create_user).get(list_users))
}

pub fn login_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserEnvelope>), ApiError> {
    let Json(req) = payload.map_err(|e| {
        warn!(error = %e, "unreadable registration body");
        ApiError::validation(MSG_ALL_FIELDS)
    })?;

    let user = services::register(&state.users, req, state.config.strict_validation)?;
    Ok((
        StatusCode::CREATED,
        Json(UserEnvelope {
            message: "User created successfully",
            user,
        }),
    ))
}

#[instrument(skip(state, caller))]
pub async fn list_users(
    State(state): State<AppState>,
    CallerId(caller): CallerId,
) -> Result<Json<Vec<PublicUser>>, ApiError> {
    let users = services::list_users(&state.users, caller.as_deref())?;
    Ok(Json(users))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<UserEnvelope>, ApiError> {
    let Json(req) = payload.map_err(|e| {
        warn!(error = %e, "unreadable login body");
        ApiError::validation(MSG_LOGIN_FIELDS)
    })?;

    let user = services::login(&state.users, req)?;
    Ok(Json(UserEnvelope {
        message: "Login successful",
        user,
    }))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        Router,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{app::build_app, state::AppState};

    fn app() -> Router {
        build_app(AppState::fake())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_users(user_id: Option<&str>) -> Request<Body> {
        let mut req = Request::get("/api/users");
        if let Some(id) = user_id {
            req = req.header("user-id", id);
        }
        req.body(Body::empty()).unwrap()
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn jane() -> Value {
        json!({
            "fullName": "Jane Doe",
            "email": "jane@mail.com",
            "phone": "050-1234567",
            "password": "Aa1!aaaa"
        })
    }

    #[tokio::test]
    async fn register_login_list_flow() {
        let app = app();

        let (status, body) = send(&app, post_json("/api/users", jane())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "User created successfully");
        assert_eq!(body["user"]["email"], "jane@mail.com");
        assert!(body["user"].get("password").is_none());
        assert!(body["user"].get("phone").is_none());

        let (status, body) = send(
            &app,
            post_json("/api/login", json!({ "email": "jane@mail.com", "password": "Aa1!aaaa" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Login successful");
        let id = body["user"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(&app, get_users(Some(&id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{ "id": id, "fullName": "Jane Doe", "email": "jane@mail.com" }])
        );
    }

    #[tokio::test]
    async fn duplicate_email_is_bad_request() {
        let app = app();
        send(&app, post_json("/api/users", jane())).await;
        let (status, body) = send(&app, post_json("/api/users", jane())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "User with this email already exists" }));
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() {
        let app = app();
        let mut body = jane();
        body["phone"] = json!("");
        let (status, resp) = send(&app, post_json("/api/users", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp, json!({ "error": "All fields are required" }));

        let (status, _) = send(&app, post_json("/api/users", json!({ "email": "a@b.c" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let app = app();
        let req = Request::post("/api/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Email and password are required" }));
    }

    #[tokio::test]
    async fn bad_credentials_are_unauthorized() {
        let app = app();
        send(&app, post_json("/api/users", jane())).await;
        let (status, body) = send(
            &app,
            post_json("/api/login", json!({ "email": "jane@mail.com", "password": "nope" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "Invalid email or password" }));
    }

    #[tokio::test]
    async fn list_users_needs_session() {
        let app = app();
        let (status, body) = send(&app, get_users(None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "User ID is required" }));

        let (_, created) = send(&app, post_json("/api/users", jane())).await;
        let id = created["user"]["id"].as_str().unwrap().to_string();
        let (status, body) = send(&app, get_users(Some(&id))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "User not authenticated" }));
    }

    #[tokio::test]
    async fn health_route() {
        let app = app();
        let res = app
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
}
