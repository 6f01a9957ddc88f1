// self
use crate::obs::{CallOutcome, OperationKind};

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(kind: OperationKind, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"policyhawk_call_total",
			"operation" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records one retried attempt via the global metrics recorder (when enabled).
pub fn record_retry_attempt() {
	#[cfg(feature = "metrics")]
	metrics::counter!("policyhawk_retry_total").increment(1);
}
