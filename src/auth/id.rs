//! Strongly typed identifiers enforced across the policy-service domain.
//!
//! Ruleset and rule identifiers are embedded verbatim into resource paths, so validation
//! rejects separators and whitespace up front instead of letting a malformed identifier
//! reshape the request URL.

// std
use std::{borrow::Borrow, ops::Deref, str::FromStr};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let view = value.as_ref();

				validate_view($kind, view)?;

				Ok(Self(view.to_owned()))
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				validate_view($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

const IDENTIFIER_MAX_LEN: usize = 128;
const PATH_DELIMITERS: &[char] = &['/', '?', '#'];

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (user, organization, ruleset, rule, secret).
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier (user, organization, ruleset, rule, secret).
		kind: &'static str,
	},
	/// The identifier contains a URL path delimiter.
	#[error("{kind} identifier contains a path delimiter.")]
	ContainsPathDelimiter {
		/// Kind of identifier (user, organization, ruleset, rule, secret).
		kind: &'static str,
	},
	/// The identifier exceeded the allowed character count.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier (user, organization, ruleset, rule, secret).
		kind: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
}

def_id! { UserId, "Identifier of the credential owner, embedded in every authorization header.", "User" }
def_id! { OrganizationId, "Tenant-scoping identifier bound into each request signature.", "Organization" }
def_id! { RulesetId, "Identifier of a ruleset in the remote policy service.", "Ruleset" }
def_id! { RuleId, "Identifier of a rule, always scoped to a ruleset.", "Rule" }

fn validate_view(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace { kind });
	}
	if view.contains(PATH_DELIMITERS) {
		return Err(IdentifierError::ContainsPathDelimiter { kind });
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn identifiers_accept_reasonable_values() {
		assert!(RulesetId::new("6f2a9b0c-rules").is_ok());
		assert!(RuleId::new("rule-001").is_ok());
		assert!(OrganizationId::new("org-42").is_ok());
		assert!(UserId::new("observer@example.com").is_ok());
	}

	#[test]
	fn identifiers_reject_empty_and_whitespace() {
		assert_eq!(RulesetId::new(""), Err(IdentifierError::Empty { kind: "Ruleset" }));
		assert_eq!(
			RuleId::new("rule one"),
			Err(IdentifierError::ContainsWhitespace { kind: "Rule" }),
		);
	}

	#[test]
	fn identifiers_reject_path_delimiters() {
		for broken in ["a/b", "a?b", "a#b"] {
			assert_eq!(
				RulesetId::new(broken),
				Err(IdentifierError::ContainsPathDelimiter { kind: "Ruleset" }),
			);
		}
	}

	#[test]
	fn identifiers_reject_oversized_values() {
		let oversized = "r".repeat(IDENTIFIER_MAX_LEN + 1);

		assert_eq!(
			RuleId::new(oversized),
			Err(IdentifierError::TooLong { kind: "Rule", max: IDENTIFIER_MAX_LEN }),
		);
	}

	#[test]
	fn identifiers_round_trip_through_serde() {
		let id = RulesetId::new("6f2a9b0c").expect("Failed to build ruleset identifier.");
		let json = serde_json::to_string(&id).expect("Failed to serialize ruleset identifier.");

		assert_eq!(json, "\"6f2a9b0c\"");
		assert_eq!(
			serde_json::from_str::<RulesetId>(&json)
				.expect("Failed to deserialize ruleset identifier."),
			id,
		);
		assert!(serde_json::from_str::<RulesetId>("\"a/b\"").is_err());
	}
}
