//! Client-level error types shared across signing, transport, and retry layers.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// The taxonomy is deliberately closed: transports fold every wire failure into
/// [`Error::RateLimited`] or [`Error::Transport`], the retry layer converts bounded
/// exhaustion into [`Error::RetryLimitExceeded`], and deliberately absent capabilities
/// surface [`Error::Unimplemented`] so callers can branch on them instead of a catch-all.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; never retried.
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// Service signaled throttling via HTTP 429; safe to retry.
	#[error("Service rate limited the request: {message} ~ {code}.")]
	RateLimited {
		/// Response text accompanying the throttle, when the service sent any.
		message: String,
		/// Numeric HTTP status that carried the signal.
		code: u16,
	},
	/// Non-JSON response or network-level failure; safe to retry.
	#[error("Transport failure: {message}.")]
	Transport {
		/// Response body or reason phrase plus status code, for diagnosis without a trace.
		message: String,
	},
	/// Bounded retry policy spent every attempt on retryable failures.
	#[error("Exceeded max of {attempts} attempts.")]
	RetryLimitExceeded {
		/// Last retryable failure observed before giving up.
		#[source]
		cause: Box<Error>,
		/// Attempts consumed, equal to the configured bound.
		attempts: u32,
	},
	/// Capability is deliberately absent from this client.
	#[error("`{feature}` is not implemented.")]
	Unimplemented {
		/// Stable label for the missing capability.
		feature: &'static str,
	},
}
impl Error {
	/// Returns whether the retry layer may recover this failure by reissuing the request.
	pub fn is_retryable(&self) -> bool {
		matches!(self, Self::RateLimited { .. } | Self::Transport { .. })
	}

	/// Shorthand constructor for [`Error::Unimplemented`].
	pub fn unimplemented(feature: &'static str) -> Self {
		Self::Unimplemented { feature }
	}
}

/// Configuration and validation failures raised before any request is dispatched.
///
/// These propagate to the caller immediately, uncaught by the retry layer.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Identifier failed validation.
	#[error(transparent)]
	InvalidIdentifier(#[from] crate::auth::IdentifierError),
	/// Service descriptor failed validation.
	#[error(transparent)]
	InvalidDescriptor(#[from] crate::service::ServiceDescriptorError),
	/// Resource URL could not be assembled from the endpoint and path.
	#[error("Resource URL could not be assembled.")]
	UrlBuild {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Retry policies require a non-negative inter-attempt delay.
	#[error("Retry delay must be non-negative, received: {delay}.")]
	NegativeRetryDelay {
		/// Rejected delay value.
		delay: Duration,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for ConfigError {
	fn from(e: reqwest::Error) -> Self {
		Self::http_client_build(e)
	}
}
