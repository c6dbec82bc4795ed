//! HTTP-level tests for the auth router

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, Response, StatusCode, header};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::application::{AuthConfig, BootstrapInput, BootstrapUseCase};
    use crate::infra::memory::MemoryAdminRepository;
    use crate::presentation::{AuthAppState, auth_router};

    const USERNAME: &str = "alice";
    const PASSWORD: &str = "S3cur3!Pass1234";

    async fn app_with(
        username: Option<&str>,
        password: Option<&str>,
        config: AuthConfig,
    ) -> (Router, AuthAppState<MemoryAdminRepository>) {
        let mut state = AuthAppState::new(MemoryAdminRepository::new(), config, true).unwrap();

        let outcome = BootstrapUseCase::new(state.repo.clone(), state.config.clone())
            .execute(BootstrapInput {
                username: username.map(str::to_string),
                password: password.map(str::to_string),
                ..Default::default()
            })
            .await
            .unwrap();
        state.admin_enabled = outcome.admin_enabled();

        (auth_router(state.clone()), state)
    }

    async fn app() -> (Router, AuthAppState<MemoryAdminRepository>) {
        app_with(Some(USERNAME), Some(PASSWORD), AuthConfig::development()).await
    }

    fn login_request(username: &str, password: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!("username={username}&password={password}")))
            .unwrap()
    }

    fn verify_request(header_pair: Option<(header::HeaderName, String)>) -> Request<Body> {
        let mut builder = Request::builder().uri("/verify");
        if let Some((name, value)) = header_pair {
            builder = builder.header(name, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn json_body(response: Response<Body>) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn set_cookie(response: &Response<Body>) -> String {
        response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_full_session_scenario() {
        let (app, _) = app().await;

        // Login
        let response = app
            .clone()
            .oneshot(login_request(USERNAME, PASSWORD))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let cookie = set_cookie(&response);
        assert!(cookie.starts_with("access_token=\"Bearer "));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=1800"));
        assert!(!cookie.contains("Secure"));

        let body = json_body(response).await;
        assert_eq!(body["token_type"], "bearer");
        let token = body["access_token"].as_str().unwrap().to_string();

        // Verify with the cookie
        let cookie_pair = cookie.split(';').next().unwrap().to_string();
        let response = app
            .clone()
            .oneshot(verify_request(Some((header::COOKIE, cookie_pair))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(
            body,
            serde_json::json!({"username": "alice", "authenticated": true})
        );

        // Logout clears the cookie
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/logout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cleared = set_cookie(&response);
        assert!(cleared.contains("Max-Age=0"));
        assert!(cleared.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
        assert_eq!(json_body(response).await["message"], "Logged out");

        // The raw token is stateless and still valid until it expires
        let response = app
            .oneshot(verify_request(Some((
                header::AUTHORIZATION,
                format!("Bearer {token}"),
            ))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_failed_logins_are_indistinguishable() {
        let (app, _) = app().await;

        let unknown = app
            .clone()
            .oneshot(login_request("nouser", PASSWORD))
            .await
            .unwrap();
        let wrong = app
            .oneshot(login_request(USERNAME, "wrongpass"))
            .await
            .unwrap();

        assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            unknown.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
        assert!(unknown.headers().get(header::SET_COOKIE).is_none());

        let unknown_body = json_body(unknown).await;
        let wrong_body = json_body(wrong).await;
        assert_eq!(unknown_body, wrong_body);
        assert_eq!(unknown_body["detail"], "Incorrect username or password");
    }

    #[tokio::test]
    async fn test_sixth_login_is_rate_limited() {
        let (app, _) = app().await;

        for _ in 0..5 {
            let response = app
                .clone()
                .oneshot(login_request(USERNAME, "wrongpass"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }

        let response = app
            .oneshot(login_request(USERNAME, PASSWORD))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(response.headers().get(header::RETRY_AFTER).is_some());
    }

    #[tokio::test]
    async fn test_forwarded_for_only_when_trusted() {
        let mut config = AuthConfig::development();
        config.trust_proxy_headers = true;
        let (app, _) = app_with(Some(USERNAME), Some(PASSWORD), config).await;

        let from = |ip: &str| {
            let mut request = login_request(USERNAME, "wrongpass");
            request
                .headers_mut()
                .insert("x-forwarded-for", ip.parse().unwrap());
            request
        };

        for _ in 0..5 {
            app.clone().oneshot(from("203.0.113.1")).await.unwrap();
        }
        let limited = app.clone().oneshot(from("203.0.113.1")).await.unwrap();
        assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);

        let other = app.oneshot(from("203.0.113.2")).await.unwrap();
        assert_eq!(other.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_verify_requires_token() {
        let (app, _) = app().await;

        let response = app.clone().oneshot(verify_request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
        assert_eq!(
            json_body(response).await["detail"],
            "Could not validate credentials"
        );

        let response = app
            .oneshot(verify_request(Some((
                header::AUTHORIZATION,
                "Bearer not.a.token".to_string(),
            ))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_cleared_cookie_falls_back_to_header() {
        let (app, state) = app().await;
        let token = state
            .issuer
            .issue(USERNAME, state.config.token_ttl)
            .unwrap()
            .token;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/verify")
                    .header(header::COOKIE, "access_token=\"\"")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["username"], USERNAME);
    }

    #[tokio::test]
    async fn test_incomplete_login_form_is_unprocessable() {
        let (app, _) = app().await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(format!("username={USERNAME}")))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
        let body = json_body(response).await;
        assert!(body["detail"].as_str().unwrap().contains("password"));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"username":"alice","password":"x"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json_body(response).await["detail"].is_string());
    }

    #[tokio::test]
    async fn test_degraded_mode_without_credentials() {
        let (app, state) = app_with(None, None, AuthConfig::development()).await;
        assert!(!state.admin_enabled);

        let response = app
            .clone()
            .oneshot(login_request(USERNAME, PASSWORD))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Even a correctly signed token opens nothing
        let token = state
            .issuer
            .issue(USERNAME, std::time::Duration::from_secs(60))
            .unwrap()
            .token;
        let response = app
            .oneshot(verify_request(Some((
                header::AUTHORIZATION,
                format!("Bearer {token}"),
            ))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_weak_bootstrap_password_is_fatal() {
        let state =
            AuthAppState::new(MemoryAdminRepository::new(), AuthConfig::development(), true)
                .unwrap();
        let result = BootstrapUseCase::new(state.repo.clone(), Arc::clone(&state.config))
            .execute(BootstrapInput {
                username: Some(USERNAME.to_string()),
                password: Some("admin".to_string()),
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(crate::AuthError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_short_secret_rejected_at_construction() {
        let config = AuthConfig {
            token_secret: b"short".to_vec(),
            ..AuthConfig::development()
        };
        assert!(AuthAppState::new(MemoryAdminRepository::new(), config, true).is_err());
    }

    #[tokio::test]
    async fn test_oversized_token_lifetime_rejected_at_construction() {
        let config = AuthConfig {
            token_ttl: std::time::Duration::from_secs(200_000_000_000_000_000 * 60),
            ..AuthConfig::development()
        };
        assert!(matches!(
            AuthAppState::new(MemoryAdminRepository::new(), config, true),
            Err(crate::AuthError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_secure_cookie_in_production() {
        let config = AuthConfig {
            cookie_secure: true,
            ..AuthConfig::development()
        };
        let (app, _) = app_with(Some(USERNAME), Some(PASSWORD), config).await;

        let response = app
            .oneshot(login_request(USERNAME, PASSWORD))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(set_cookie(&response).contains("; Secure"));
    }
}
