//! Optional observability helpers for client operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `policyhawk.call` with the `operation`
//!   field, plus a debug event per retried attempt.
//! - Enable `metrics` to increment the `policyhawk_call_total` counter for every
//!   attempt/success/failure, labeled by `operation` + `outcome`, and the
//!   `policyhawk_retry_total` counter for every retried attempt.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Read operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
	/// List every ruleset.
	ListRulesets,
	/// Fetch a single ruleset.
	GetRuleset,
	/// List a ruleset's rules verbosely.
	ListRulesetRules,
	/// Fetch a single rule.
	GetRule,
	/// Fetch a rule's tags.
	GetRuleTags,
}
impl OperationKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationKind::ListRulesets => "list_rulesets",
			OperationKind::GetRuleset => "get_ruleset",
			OperationKind::ListRulesetRules => "list_ruleset_rules",
			OperationKind::GetRule => "get_rule",
			OperationKind::GetRuleTags => "get_rule_tags",
		}
	}
}
impl Display for OperationKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
