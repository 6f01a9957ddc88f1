//! Shared-secret credential material used to mint authorization headers.

// self
use crate::{
	_prelude::*,
	auth::{IdentifierError, UserId},
};

/// Digest algorithms supported for request MACs.
///
/// The set is closed on purpose; the service accepts exactly one algorithm today and the
/// signer matches on this enum so a future addition cannot be silently mis-signed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SigningAlgorithm {
	#[default]
	/// HMAC-SHA-256.
	Sha256,
}
impl SigningAlgorithm {
	/// Returns the wire label for the algorithm.
	pub const fn as_str(self) -> &'static str {
		match self {
			SigningAlgorithm::Sha256 => "sha256",
		}
	}
}
impl Display for SigningAlgorithm {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Redacted shared-secret wrapper keeping key material out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);
impl SecretKey {
	/// Wraps a new shared secret after rejecting empty values.
	pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
		let value = value.into();

		if value.is_empty() {
			return Err(IdentifierError::Empty { kind: "Secret" });
		}

		Ok(Self(value))
	}

	/// Returns the raw key bytes for MAC computation. Callers must avoid logging these.
	pub(crate) fn expose(&self) -> &[u8] {
		self.0.as_bytes()
	}
}
impl Debug for SecretKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SecretKey").field(&"<redacted>").finish()
	}
}
impl Display for SecretKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Immutable credential triple used for every request the client signs.
///
/// Constructed once at client construction and shared read-only across concurrent calls;
/// nothing derived from it (headers, nonces, timestamps) is ever stored back here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
	/// Credential owner, embedded as the `id` field of every authorization header.
	pub user: UserId,
	/// Shared secret used as the MAC key.
	pub key: SecretKey,
	/// Digest algorithm for the MAC.
	pub algorithm: SigningAlgorithm,
}
impl Credentials {
	/// Creates credentials for the given user and shared secret with the default algorithm.
	pub fn new(user: UserId, key: SecretKey) -> Self {
		Self { user, key, algorithm: SigningAlgorithm::default() }
	}
}
