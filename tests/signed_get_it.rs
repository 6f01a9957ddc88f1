//! End-to-end reads over the bundled reqwest transport against a local mock service.

#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use serde_json::json;
use time::Duration;
use url::Url;
// self
use policyhawk::{
	auth::{Credentials, OrganizationId, RuleId, RulesetId, SecretKey, UserId},
	client::{PolicyClient, ReqwestPolicyClient},
	error::Error,
	retry::RetryPolicy,
	service::ServiceDescriptor,
};

const AUTHORIZATION_SHAPE: &str =
	r#"^Hawk id="observer-1", ts="\d+", nonce="[0-9A-Za-z]{8}", ext="org-42", mac=".+"$"#;

fn build_client(server: &MockServer) -> ReqwestPolicyClient {
	let descriptor = ServiceDescriptor::new(
		Url::parse(&server.base_url()).expect("Failed to parse mock server URL."),
		OrganizationId::new("org-42").expect("Failed to build organization identifier."),
	)
	.expect("Failed to build service descriptor.");
	let credentials = Credentials::new(
		UserId::new("observer-1").expect("Failed to build user identifier."),
		SecretKey::new("super-secret").expect("Failed to build secret key."),
	);

	PolicyClient::new(descriptor, credentials)
}

fn zero_delay(max_attempts: u32) -> RetryPolicy {
	RetryPolicy::new(max_attempts, Duration::ZERO).expect("Failed to build retry policy.")
}

#[tokio::test]
async fn ruleset_read_is_signed_and_normalized() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v2/rulesets/base")
				.header("content-type", "application/json")
				.header_matches("authorization", AUTHORIZATION_SHAPE);
			then.status(200).json_body(json!({
				"id": "base",
				"name": "Base Policy",
				"rules": ["rule-1"],
				"updatedAt": "2026-01-01T00:00:00Z",
				"createdAt": "2025-01-01T00:00:00Z",
			}));
		})
		.await;
	let client = build_client(&server);
	let ruleset = RulesetId::new("base").expect("Failed to build ruleset identifier.");
	let value = client.ruleset(&ruleset).await.expect("Signed read should succeed.");

	mock.assert_async().await;
	assert_eq!(value, json!({"id": "base", "name": "Base Policy", "rules": ["rule-1"]}));
}

#[tokio::test]
async fn rule_listing_normalizes_each_element() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v2/rulesets/base/rules")
				.header_matches("authorization", AUTHORIZATION_SHAPE);
			then.status(200).json_body(json!({
				"id": "base",
				"updatedAt": "2026-01-01T00:00:00Z",
				"rules": [
					{"id": "rule-1", "rulesetId": "base", "updatedAt": "x", "createdAt": "y"},
					{"id": "rule-2", "rulesetId": "base", "title": "Root login"},
				],
			}));
		})
		.await;
	let client = build_client(&server);
	let ruleset = RulesetId::new("base").expect("Failed to build ruleset identifier.");
	let value = client.ruleset_rules(&ruleset).await.expect("Signed read should succeed.");

	mock.assert_async().await;
	// Parent untouched, every element write-compatible.
	assert_eq!(value["updatedAt"], "2026-01-01T00:00:00Z");
	assert_eq!(
		value["rules"],
		json!([{"id": "rule-1"}, {"id": "rule-2", "title": "Root login"}]),
	);
}

#[tokio::test]
async fn ruleset_listing_is_returned_verbatim() {
	let server = MockServer::start_async().await;
	let listing = json!({
		"rulesets": [{"id": "base", "updatedAt": "2026-01-01T00:00:00Z"}],
	});
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v2/rulesets")
				.header_matches("authorization", AUTHORIZATION_SHAPE);
			then.status(200).json_body(listing.clone());
		})
		.await;
	let client = build_client(&server);
	let value = client.rulesets().await.expect("Signed read should succeed.");

	mock.assert_async().await;
	assert_eq!(value, listing);
}

#[tokio::test]
async fn tag_read_drops_the_embedded_error_block() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v2/rules/rule-1/tags")
				.header_matches("authorization", AUTHORIZATION_SHAPE);
			then.status(200).json_body(json!({
				"tags": [{"source": "ec2", "key": "role", "value": "web"}],
				"errors": ["instance i-123 unreachable"],
			}));
		})
		.await;
	let client = build_client(&server);
	let rule = RuleId::new("rule-1").expect("Failed to build rule identifier.");
	let value = client.rule_tags(&rule).await.expect("Signed read should succeed.");

	mock.assert_async().await;
	assert_eq!(value, json!({"tags": [{"source": "ec2", "key": "role", "value": "web"}]}));
}

#[tokio::test]
async fn throttled_reads_retry_up_to_the_bound() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v2/rulesets/base");
			then.status(429).body("slow down");
		})
		.await;
	let client = build_client(&server).with_retry_policy(zero_delay(2));
	let ruleset = RulesetId::new("base").expect("Failed to build ruleset identifier.");
	let err = client
		.ruleset(&ruleset)
		.await
		.expect_err("A permanently throttled endpoint must exhaust the budget.");

	mock.assert_calls_async(2).await;

	match err {
		Error::RetryLimitExceeded { cause, attempts } => {
			assert_eq!(attempts, 2);
			assert!(
				matches!(*cause, Error::RateLimited { code: 429, ref message } if message == "slow down"),
			);
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}
