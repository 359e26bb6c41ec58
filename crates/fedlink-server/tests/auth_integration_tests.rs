// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Integration tests for the authentication routes.
//!
//! Odoo is replaced by a wiremock server; provisioning runs against the
//! in-memory store so created users and teams can be inspected.

use std::sync::Arc;

use axum::{
	body::Body,
	http::{header::SET_COOKIE, Request, StatusCode},
};
use fedlink_server::{create_router, AppState, Entitlements, Providers, ServerConfig};
use fedlink_server_auth::TeamRole;
use fedlink_server_provisioning::MemoryStore;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(odoo: Option<&MockServer>) -> ServerConfig {
	let mut config = ServerConfig::default();
	if let Some(server) = odoo {
		config.odoo.base_url = Some(server.uri());
		config.odoo.database = Some("prod".to_string());
	}
	config
}

fn setup_test_app(config: &ServerConfig) -> (axum::Router, Arc<MemoryStore>) {
	let store = Arc::new(MemoryStore::new());
	let state = AppState::new(Providers::from_config(config), store.clone(), config);
	(create_router(state), store)
}

fn rpc_result(id: i64, result: Value) -> ResponseTemplate {
	ResponseTemplate::new(200).set_body_json(json!({"jsonrpc": "2.0", "id": id, "result": result}))
}

async fn mount_rpc(server: &MockServer, id: i64, response: ResponseTemplate) {
	Mock::given(method("POST"))
		.and(path("/jsonrpc"))
		.and(body_partial_json(json!({"id": id})))
		.respond_with(response)
		.mount(server)
		.await;
}

async fn mount_authenticate(server: &MockServer, response: ResponseTemplate) {
	Mock::given(method("POST"))
		.and(path("/web/session/authenticate"))
		.and(body_partial_json(json!({
			"params": {"db": "prod", "login": "bob", "password": "pw123"}
		})))
		.respond_with(response)
		.mount(server)
		.await;
}

/// uid 42, login `bob@co`, one company and both admin flags.
async fn mount_bob(server: &MockServer) {
	mount_authenticate(server, rpc_result(1, json!({"uid": 42, "name": "Bob B"}))).await;
	mount_rpc(
		server,
		2,
		rpc_result(2, json!([{"id": 42, "name": "Bob B", "login": "bob@co", "email": "bob@corp.example"}])),
	)
	.await;
	mount_rpc(
		server,
		3,
		rpc_result(3, json!([{"id": 42, "company_ids": [7], "is_system": true, "is_admin": true}])),
	)
	.await;
	mount_rpc(server, 4, rpc_result(4, json!([{"id": 7, "name": "Co Ltd"}]))).await;
}

fn login_request(body: Value) -> Request<Body> {
	Request::builder()
		.uri("/auth/odoo/login")
		.method("POST")
		.header("content-type", "application/json")
		.header("user-agent", "Mozilla/5.0 (Android 14; Mobile)")
		.body(Body::from(body.to_string()))
		.unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	serde_json::from_slice(&body).unwrap()
}

// ============================================================================
// Odoo login
// ============================================================================

#[tokio::test]
async fn test_odoo_login_provisions_user_and_admin_team() {
	let odoo = MockServer::start().await;
	mount_bob(&odoo).await;
	let (app, store) = setup_test_app(&config_for(Some(&odoo)));

	let response = app
		.oneshot(login_request(json!({"identifier": "bob", "secret": "pw123"})))
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	let cookie = response
		.headers()
		.get(SET_COOKIE)
		.and_then(|v| v.to_str().ok())
		.unwrap()
		.to_string();
	assert!(cookie.starts_with("FEDLINKAUTHTOKEN="));
	assert!(cookie.contains("HttpOnly"));

	let json = json_body(response).await;
	assert_eq!(json["username"], "bob");
	assert_eq!(json["email"], "odoo_42@odoo.local");
	assert_eq!(json["create"], true);
	assert_eq!(json["updated_fields"], json!([]));
	assert!(json.get("auth_data").is_none());

	let members = store.team_members("co-ltd").await;
	assert_eq!(members.len(), 1);
	assert_eq!(members[0].role, TeamRole::Admin);
	assert_eq!(members[0].user_id.to_string(), json["user_id"].as_str().unwrap());
}

#[tokio::test]
async fn test_second_login_reuses_user() {
	let odoo = MockServer::start().await;
	mount_bob(&odoo).await;
	let (app, store) = setup_test_app(&config_for(Some(&odoo)));

	let first = app
		.clone()
		.oneshot(login_request(json!({"identifier": "bob", "secret": "pw123"})))
		.await
		.unwrap();
	assert_eq!(first.status(), StatusCode::OK);

	let second = app
		.oneshot(login_request(json!({"identifier": "bob", "password": "pw123"})))
		.await
		.unwrap();
	assert_eq!(second.status(), StatusCode::OK);

	let json = json_body(second).await;
	assert_eq!(json["create"], false);
	assert_eq!(store.user_count().await, 1);
	assert_eq!(store.session_count().await, 2);
}

#[tokio::test]
async fn test_blank_identifier_returns_400() {
	let odoo = MockServer::start().await;
	let (app, _store) = setup_test_app(&config_for(Some(&odoo)));

	let response = app
		.oneshot(login_request(json!({"identifier": "  ", "secret": "pw123"})))
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	let json = json_body(response).await;
	assert_eq!(json["error"], "invalid_request");
	assert!(json["message"].is_string());
}

#[tokio::test]
async fn test_missing_secret_returns_400() {
	let odoo = MockServer::start().await;
	let (app, _store) = setup_test_app(&config_for(Some(&odoo)));

	let response = app
		.oneshot(login_request(json!({"identifier": "bob"})))
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_returns_400() {
	let odoo = MockServer::start().await;
	let (app, _store) = setup_test_app(&config_for(Some(&odoo)));

	let response = app
		.oneshot(
			Request::builder()
				.uri("/auth/odoo/login")
				.method("POST")
				.body(Body::from("not json"))
				.unwrap(),
		)
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unconfigured_odoo_returns_500() {
	let (app, _store) = setup_test_app(&config_for(None));

	let response = app
		.oneshot(login_request(json!({"identifier": "bob", "secret": "pw123"})))
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
	let json = json_body(response).await;
	assert_eq!(json["error"], "configuration_error");
}

#[tokio::test]
async fn test_unconfigured_odoo_is_reported_before_body_validation() {
	let (app, _store) = setup_test_app(&config_for(None));

	let response = app
		.oneshot(login_request(json!({})))
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(json_body(response).await["error"], "configuration_error");
}

#[tokio::test]
async fn test_rejected_credentials_return_401() {
	let odoo = MockServer::start().await;
	mount_authenticate(&odoo, rpc_result(1, json!({"uid": 0}))).await;
	let (app, store) = setup_test_app(&config_for(Some(&odoo)));

	let response = app
		.oneshot(login_request(json!({"identifier": "bob", "secret": "pw123"})))
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
	assert!(response.headers().get(SET_COOKIE).is_none());
	assert_eq!(json_body(response).await["error"], "invalid_credentials");
	assert_eq!(store.user_count().await, 0);
}

#[tokio::test]
async fn test_unreadable_profile_returns_401() {
	let odoo = MockServer::start().await;
	mount_authenticate(&odoo, rpc_result(1, json!({"uid": 42}))).await;
	mount_rpc(&odoo, 2, rpc_result(2, json!([]))).await;
	let (app, _store) = setup_test_app(&config_for(Some(&odoo)));

	let response = app
		.oneshot(login_request(json!({"identifier": "bob", "secret": "pw123"})))
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
	assert_eq!(json_body(response).await["error"], "user_not_found");
}

#[tokio::test]
async fn test_upstream_server_error_returns_502() {
	let odoo = MockServer::start().await;
	mount_authenticate(&odoo, ResponseTemplate::new(500).set_body_string("Internal Server Error"))
		.await;
	let (app, _store) = setup_test_app(&config_for(Some(&odoo)));

	let response = app
		.oneshot(login_request(json!({"identifier": "bob", "secret": "pw123"})))
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
	assert_eq!(json_body(response).await["error"], "upstream_unavailable");
}

#[tokio::test]
async fn test_unclassified_rpc_error_returns_502() {
	let odoo = MockServer::start().await;
	mount_authenticate(
		&odoo,
		ResponseTemplate::new(200).set_body_json(json!({
			"jsonrpc": "2.0",
			"id": 1,
			"error": {
				"code": 200,
				"message": "Odoo Server Error",
				"data": {"name": "builtins.KeyError", "message": "'db'"}
			}
		})),
	)
	.await;
	let (app, _store) = setup_test_app(&config_for(Some(&odoo)));

	let response = app
		.oneshot(login_request(json!({"identifier": "bob", "secret": "pw123"})))
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
	assert_eq!(json_body(response).await["error"], "upstream_error");
}

// ============================================================================
// Providers and health
// ============================================================================

struct NoEntitlements;

impl Entitlements for NoEntitlements {
	fn has_feature(&self, _feature: &str) -> bool {
		false
	}
}

fn oidc_config(odoo: &MockServer) -> ServerConfig {
	let mut config = config_for(Some(odoo));
	config.oidc.enabled = true;
	config.oidc.authorization_endpoint = Some("https://idp.example.com/authorize".to_string());
	config.oidc.token_endpoint = Some("https://idp.example.com/token".to_string());
	config.oidc.userinfo_endpoint = Some("https://idp.example.com/userinfo".to_string());
	config
}

async fn providers(app: axum::Router) -> Value {
	let response = app
		.oneshot(
			Request::builder()
				.uri("/auth/providers")
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();
	assert_eq!(response.status(), StatusCode::OK);
	json_body(response).await
}

#[tokio::test]
async fn test_providers_lists_configured_providers() {
	let odoo = MockServer::start().await;
	let (app, _store) = setup_test_app(&oidc_config(&odoo));

	assert_eq!(providers(app).await["providers"], json!(["odoo", "openid"]));
}

#[tokio::test]
async fn test_providers_hides_openid_without_entitlement() {
	let odoo = MockServer::start().await;
	let config = oidc_config(&odoo);
	let state = AppState::new(
		Providers::from_config(&config),
		Arc::new(MemoryStore::new()),
		&config,
	)
	.with_entitlements(Arc::new(NoEntitlements));

	assert_eq!(
		providers(create_router(state)).await["providers"],
		json!(["odoo"])
	);
}

#[tokio::test]
async fn test_providers_empty_without_configuration() {
	let (app, _store) = setup_test_app(&config_for(None));

	assert_eq!(providers(app).await["providers"], json!([]));
}

#[tokio::test]
async fn test_health_reports_odoo_configuration() {
	let (app, _store) = setup_test_app(&config_for(None));

	let response = app
		.oneshot(
			Request::builder()
				.uri("/health")
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	let json = json_body(response).await;
	assert_eq!(json["status"], "healthy");
	assert_eq!(json["odoo_configured"], false);
}
