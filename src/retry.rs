//! Explicit retry policies for transient service failures.
//!
//! A [`RetryPolicy`] owns both knobs the retry loop needs, the attempt budget and the fixed
//! pause between attempts, so no call site can schedule a retry without stating its delay.
//! Control flow is an explicit loop over attempts returning [`RetryOutcome`]; failures never
//! unwind the loop from the inside.

// self
use crate::{_prelude::*, error::ConfigError, obs};

const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_DELAY: Duration = Duration::seconds(30);

/// Outcome of driving one operation through a [`RetryPolicy`].
#[derive(Debug)]
pub enum RetryOutcome<T> {
	/// Operation succeeded within the attempt budget.
	Success(T),
	/// Bounded policy spent every attempt on retryable failures.
	Exhausted {
		/// Last retryable failure observed before giving up.
		last_error: Error,
		/// Attempts consumed, equal to the configured bound.
		attempts: u32,
	},
}

/// Attempt budget plus the fixed pause applied between attempts.
///
/// `max_attempts == 0` retries indefinitely until success; any positive bound terminates
/// with [`RetryOutcome::Exhausted`] once spent. The policy carries no state across calls
/// and may drive any number of operations concurrently.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
	max_attempts: u32,
	delay: Duration,
	retryable: fn(&Error) -> bool,
}
impl RetryPolicy {
	/// Creates a policy with the given attempt budget and fixed inter-attempt delay.
	///
	/// The delay is a required parameter on purpose; a negative value is a configuration
	/// error rather than a silent clamp.
	pub fn new(max_attempts: u32, delay: Duration) -> Result<Self, ConfigError> {
		if delay.is_negative() {
			return Err(ConfigError::NegativeRetryDelay { delay });
		}

		Ok(Self { max_attempts, delay, retryable: Error::is_retryable })
	}

	/// Overrides which failures the policy retries.
	///
	/// Defaults to [`Error::is_retryable`]; anything outside the predicate propagates
	/// immediately without consuming the budget.
	pub fn retry_when(mut self, retryable: fn(&Error) -> bool) -> Self {
		self.retryable = retryable;

		self
	}

	/// Returns the configured attempt budget (`0` meaning unbounded).
	pub fn max_attempts(&self) -> u32 {
		self.max_attempts
	}

	/// Returns the fixed pause applied between attempts.
	pub fn delay(&self) -> Duration {
		self.delay
	}

	/// Drives `operation` until success, a non-retryable failure, or attempt exhaustion.
	///
	/// Non-retryable failures surface as `Err` after exactly one invocation of the
	/// operation that raised them; retryable failures are re-attempted after the
	/// configured pause. Telemetry observes every retried attempt, but the returned value
	/// is exactly what the final invocation produced.
	pub async fn execute<T, F, Fut>(&self, mut operation: F) -> Result<RetryOutcome<T>>
	where
		F: FnMut() -> Fut,
		Fut: Future<Output = Result<T>>,
	{
		let mut attempts: u32 = 0;

		loop {
			attempts = attempts.saturating_add(1);

			match operation().await {
				Ok(value) => return Ok(RetryOutcome::Success(value)),
				Err(failure) if (self.retryable)(&failure) => {
					if self.max_attempts != 0 && attempts >= self.max_attempts {
						return Ok(RetryOutcome::Exhausted { last_error: failure, attempts });
					}

					#[cfg(feature = "tracing")]
					tracing::debug!(attempt = attempts, failure = %failure, "Retrying transient failure.");

					obs::record_retry_attempt();
					self.pause().await;
				},
				Err(failure) => return Err(failure),
			}
		}
	}

	/// Like [`execute`](Self::execute), folding exhaustion into
	/// [`Error::RetryLimitExceeded`] with the last cause attached.
	pub async fn run<T, F, Fut>(&self, operation: F) -> Result<T>
	where
		F: FnMut() -> Fut,
		Fut: Future<Output = Result<T>>,
	{
		match self.execute(operation).await? {
			RetryOutcome::Success(value) => Ok(value),
			RetryOutcome::Exhausted { last_error, attempts } =>
				Err(Error::RetryLimitExceeded { cause: Box::new(last_error), attempts }),
		}
	}

	async fn pause(&self) {
		// Non-negativity is enforced at construction, so the conversion cannot fail.
		let delay = std::time::Duration::try_from(self.delay).unwrap_or_default();

		tokio::time::sleep(delay).await;
	}
}
impl Default for RetryPolicy {
	fn default() -> Self {
		Self {
			max_attempts: DEFAULT_MAX_ATTEMPTS,
			delay: DEFAULT_DELAY,
			retryable: Error::is_retryable,
		}
	}
}
