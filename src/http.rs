//! Transport primitives for signed policy-service requests.
//!
//! [`PolicyTransport`] is the client's only dependency on an HTTP stack: one self-contained
//! GET per call, the minted header attached, no connection or header state shared between
//! dispatches. [`RawResponse::into_json`] performs the response classification: anything that
//! parses as JSON flows through verbatim, anything else becomes a retryable failure keyed on
//! whether the service signaled throttling.

// std
use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")]
use reqwest::{
	Client as ReqwestClient, Method,
	header::{AUTHORIZATION, CONTENT_TYPE},
};
use serde_json::Value;
// self
use crate::{_prelude::*, sign::SignedRequest};
#[cfg(feature = "reqwest")] use crate::{ext::SignRequestExt, sign::RequestMethod};

const STATUS_TOO_MANY_REQUESTS: u16 = 429;
#[cfg(feature = "reqwest")] const APPLICATION_JSON: &str = "application/json";

/// Boxed future returned by [`PolicyTransport::dispatch`].
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<RawResponse>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of executing one signed request per call.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can serve
/// concurrent client operations. Each dispatch is self-contained: the implementation
/// receives a freshly minted [`SignedRequest`], attaches its header plus a fixed
/// `Content-Type: application/json`, and must not retain either beyond the call. Network
/// failures (DNS, TCP, TLS) fold into [`Error::Transport`] so the retry layer can recover
/// them.
pub trait PolicyTransport
where
	Self: 'static + Send + Sync,
{
	/// Executes the request, returning the raw status, reason phrase, and body.
	fn dispatch(&self, request: &SignedRequest) -> TransportFuture<'_>;
}

/// Raw response surfaced by a transport before JSON decoding.
#[derive(Clone, Debug)]
pub struct RawResponse {
	/// Numeric HTTP status code.
	pub status: u16,
	/// Canonical reason phrase for the status, when known.
	pub reason: Option<String>,
	/// Response body decoded as UTF-8.
	pub body: String,
}
impl RawResponse {
	/// Decodes the body as JSON, folding non-JSON responses into the retryable taxonomy.
	///
	/// A body that parses is returned verbatim whatever the status code: the service ships
	/// structured error payloads and callers expect them to flow through. A body that does
	/// not parse is classified by status: 429 becomes [`Error::RateLimited`], everything
	/// else [`Error::Transport`] carrying the body (or reason phrase) plus the status code.
	pub fn into_json(self) -> Result<Value> {
		match serde_json::from_str(&self.body) {
			Ok(value) => Ok(value),
			Err(_) => {
				let detail = if self.body.is_empty() {
					self.reason.unwrap_or_else(|| "no response body".into())
				} else {
					self.body
				};

				if self.status == STATUS_TOO_MANY_REQUESTS {
					Err(Error::RateLimited { message: detail, code: self.status })
				} else {
					Err(Error::Transport {
						message: format!(
							"did not receive valid JSON in response: {detail} ~ {}",
							self.status,
						),
					})
				}
			},
		}
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// The wrapper is deliberately stateless beyond the connection pool: signing happens
/// upstream, per attempt, and nothing derived from a request is cached here.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl From<RequestMethod> for Method {
	fn from(value: RequestMethod) -> Self {
		match value {
			RequestMethod::Get => Method::GET,
			RequestMethod::Post => Method::POST,
			RequestMethod::Put => Method::PUT,
			RequestMethod::Delete => Method::DELETE,
		}
	}
}
#[cfg(feature = "reqwest")]
impl SignRequestExt<reqwest::RequestBuilder, Error> for ReqwestTransport {
	fn attach_authorization(
		&self,
		request: reqwest::RequestBuilder,
		signed: &SignedRequest,
	) -> Result<reqwest::RequestBuilder> {
		Ok(request
			.header(AUTHORIZATION, signed.header.as_str())
			.header(CONTENT_TYPE, APPLICATION_JSON))
	}
}
#[cfg(feature = "reqwest")]
impl PolicyTransport for ReqwestTransport {
	fn dispatch(&self, request: &SignedRequest) -> TransportFuture<'_> {
		let transport = self.clone();
		let request = request.clone();

		Box::pin(async move {
			let builder = transport.0.request(Method::from(request.method), request.url.clone());
			let builder = transport.attach_authorization(builder, &request)?;
			let response = builder.send().await.map_err(|e| Error::Transport {
				message: format!("request dispatch failed: {e}"),
			})?;
			let status = response.status();
			let reason = status.canonical_reason().map(str::to_owned);
			let body = response.text().await.map_err(|e| Error::Transport {
				message: format!("response body unreadable: {e}"),
			})?;

			Ok(RawResponse { status: status.as_u16(), reason, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn response(status: u16, reason: Option<&str>, body: &str) -> RawResponse {
		RawResponse { status, reason: reason.map(str::to_owned), body: body.to_owned() }
	}

	#[test]
	fn json_bodies_pass_through_whatever_the_status() {
		let value = response(500, Some("Internal Server Error"), r#"{"errors":["boom"]}"#)
			.into_json()
			.expect("JSON error payloads must flow through to the caller.");

		assert_eq!(value["errors"][0], "boom");
	}

	#[test]
	fn non_json_429_classifies_as_rate_limited() {
		let err = response(429, Some("Too Many Requests"), "slow down")
			.into_json()
			.expect_err("Non-JSON 429 must classify as rate limited.");

		match err {
			Error::RateLimited { message, code } => {
				assert_eq!(code, 429);
				assert_eq!(message, "slow down");
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn non_json_500_classifies_as_transport() {
		let err = response(500, Some("Internal Server Error"), "<html>oops</html>")
			.into_json()
			.expect_err("Non-JSON 500 must classify as transport, not rate limited.");

		match err {
			Error::Transport { message } => {
				assert!(message.contains("<html>oops</html>"));
				assert!(message.contains("500"));
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn empty_bodies_fall_back_to_the_reason_phrase() {
		let err = response(502, Some("Bad Gateway"), "")
			.into_json()
			.expect_err("Empty non-JSON bodies must still classify.");

		match err {
			Error::Transport { message } => {
				assert!(message.contains("Bad Gateway"));
				assert!(message.contains("502"));
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn empty_throttle_bodies_keep_the_reason_phrase_as_message() {
		let err = response(429, Some("Too Many Requests"), "")
			.into_json()
			.expect_err("Empty 429 bodies must still classify as rate limited.");

		assert!(matches!(
			err,
			Error::RateLimited { code: 429, message } if message == "Too Many Requests",
		));
	}
}
