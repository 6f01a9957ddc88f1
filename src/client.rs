//! High-level read operations against the policy service.
//!
//! [`PolicyClient`] composes the signer, retry policy, and transport into named operations.
//! Each read mints a fresh authorization header inside the retried closure (every attempt
//! carries its own timestamp/nonce pair), dispatches one GET, folds the response into the
//! closed error taxonomy, and strips server-assigned fields so the result can later be
//! replayed as a write body. Write operations and pagination are deliberately absent and
//! fail closed.

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	auth::{Credentials, RuleId, RulesetId},
	http::PolicyTransport,
	normalize::{self, ResourceKind},
	obs::{self, CallOutcome, CallSpan, OperationKind},
	retry::RetryPolicy,
	service::ServiceDescriptor,
	sign::{self, RequestMethod},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestPolicyClient = PolicyClient<ReqwestTransport>;

/// Read-side client for rulesets, rules, and their tags.
///
/// The client owns no per-request state: credentials are read-only, headers are minted
/// fresh per attempt and dropped after dispatch, and the transport is self-contained per
/// call. Cloned clients and concurrent operations on one client are both safe.
pub struct PolicyClient<T>
where
	T: ?Sized + PolicyTransport,
{
	/// Transport used for every outbound request.
	pub transport: Arc<T>,
	/// Deployment the client talks to.
	pub descriptor: ServiceDescriptor,
	/// Retry policy applied to every read.
	pub retry: RetryPolicy,
	credentials: Credentials,
}
impl<T> PolicyClient<T>
where
	T: ?Sized + PolicyTransport,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_transport(
		descriptor: ServiceDescriptor,
		credentials: Credentials,
		transport: impl Into<Arc<T>>,
	) -> Self {
		Self {
			transport: transport.into(),
			descriptor,
			retry: RetryPolicy::default(),
			credentials,
		}
	}

	/// Overrides the retry policy applied to reads.
	pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
		self.retry = retry;

		self
	}

	/// Returns the ruleset listing.
	///
	/// The one read that is not made write-compatible: the listing shape is documented as
	/// not intended for write replay, so it is returned verbatim.
	pub async fn rulesets(&self) -> Result<Value> {
		self.read(OperationKind::ListRulesets, ResourceKind::RulesetList, "/v2/rulesets".into())
			.await
	}

	/// Returns one ruleset with its rule identifiers, stripped of server-assigned
	/// timestamps.
	pub async fn ruleset(&self, ruleset: &RulesetId) -> Result<Value> {
		self.read(
			OperationKind::GetRuleset,
			ResourceKind::Ruleset,
			format!("/v2/rulesets/{ruleset}"),
		)
		.await
	}

	/// Returns a ruleset's verbose rule listing with every rule element made
	/// write-compatible; the listing's own fields stay untouched.
	pub async fn ruleset_rules(&self, ruleset: &RulesetId) -> Result<Value> {
		self.read(
			OperationKind::ListRulesetRules,
			ResourceKind::RuleList,
			format!("/v2/rulesets/{ruleset}/rules"),
		)
		.await
	}

	/// Returns one rule from a ruleset in write-compatible form.
	pub async fn rule(&self, ruleset: &RulesetId, rule: &RuleId) -> Result<Value> {
		self.read(
			OperationKind::GetRule,
			ResourceKind::Rule,
			format!("/v2/rulesets/{ruleset}/rules/{rule}"),
		)
		.await
	}

	/// Returns the tags assigned to a rule, stripped of the embedded error block.
	pub async fn rule_tags(&self, rule: &RuleId) -> Result<Value> {
		self.read(
			OperationKind::GetRuleTags,
			ResourceKind::TagList,
			format!("/v2/rules/{rule}/tags"),
		)
		.await
	}

	/// Creates a ruleset.
	///
	/// Deliberately absent: always fails with [`Error::Unimplemented`] without touching the
	/// transport, so callers can branch on the missing capability instead of a silent no-op.
	pub async fn create_ruleset(&self, _body: Value) -> Result<Value> {
		Err(Error::unimplemented("create ruleset"))
	}

	/// Updates a ruleset. Deliberately absent; see [`PolicyClient::create_ruleset`].
	pub async fn update_ruleset(&self, _ruleset: &RulesetId, _body: Value) -> Result<Value> {
		Err(Error::unimplemented("update ruleset"))
	}

	/// Deletes a ruleset. Deliberately absent; see [`PolicyClient::create_ruleset`].
	pub async fn delete_ruleset(&self, _ruleset: &RulesetId) -> Result<Value> {
		Err(Error::unimplemented("delete ruleset"))
	}

	/// Creates a rule under a ruleset. Deliberately absent; see
	/// [`PolicyClient::create_ruleset`].
	pub async fn create_rule(&self, _ruleset: &RulesetId, _body: Value) -> Result<Value> {
		Err(Error::unimplemented("create rule"))
	}

	/// Updates a rule. Deliberately absent; see [`PolicyClient::create_ruleset`].
	pub async fn update_rule(
		&self,
		_ruleset: &RulesetId,
		_rule: &RuleId,
		_body: Value,
	) -> Result<Value> {
		Err(Error::unimplemented("update rule"))
	}

	/// Deletes a rule. Deliberately absent; see [`PolicyClient::create_ruleset`].
	pub async fn delete_rule(&self, _ruleset: &RulesetId, _rule: &RuleId) -> Result<Value> {
		Err(Error::unimplemented("delete rule"))
	}

	/// Pages through the ruleset listing.
	///
	/// Pagination is deliberately absent: a partial fetch would be worse than failing fast,
	/// so every call reports [`Error::Unimplemented`] with the stable `pagination` label.
	pub async fn rulesets_page(&self, _page_token: Option<&str>) -> Result<Value> {
		Err(Error::unimplemented("pagination"))
	}

	async fn read(
		&self,
		kind: OperationKind,
		resource: ResourceKind,
		path: String,
	) -> Result<Value> {
		let span = CallSpan::new(kind);

		obs::record_call_outcome(kind, CallOutcome::Attempt);

		let result = span
			.instrument(async {
				let url = self.descriptor.resource_url(&path)?;
				let ext = self.descriptor.organization.as_ref();
				let value = self
					.retry
					.run(|| {
						// Minted inside the retried closure: every attempt gets a fresh
						// timestamp/nonce pair and no header outlives its dispatch.
						let signed =
							sign::sign(&self.credentials, RequestMethod::Get, &url, ext);

						async move { self.transport.dispatch(&signed).await?.into_json() }
					})
					.await?;

				Ok(normalize::normalize(resource, value))
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(kind, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(kind, CallOutcome::Failure),
		}

		result
	}
}
#[cfg(feature = "reqwest")]
impl PolicyClient<ReqwestTransport> {
	/// Creates a client backed by the crate's default reqwest transport.
	///
	/// Use [`PolicyClient::with_transport`] to bring a custom transport and
	/// [`PolicyClient::with_retry_policy`] to replace the default retry policy.
	pub fn new(descriptor: ServiceDescriptor, credentials: Credentials) -> Self {
		Self::with_transport(descriptor, credentials, ReqwestTransport::default())
	}
}
impl<T> Clone for PolicyClient<T>
where
	T: ?Sized + PolicyTransport,
{
	fn clone(&self) -> Self {
		Self {
			transport: self.transport.clone(),
			descriptor: self.descriptor.clone(),
			retry: self.retry.clone(),
			credentials: self.credentials.clone(),
		}
	}
}
impl<T> Debug for PolicyClient<T>
where
	T: ?Sized + PolicyTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PolicyClient")
			.field("descriptor", &self.descriptor)
			.field("retry", &self.retry)
			.finish()
	}
}
