//! Hawk-signed client for security-policy rulesets—fresh per-request MAC headers, explicit
//! retry policies, and write-safe response normalization in one crate built for production.
//!
//! Every read operation follows the same pipeline: mint an authorization header for this
//! attempt only, dispatch one GET, fold the response into a closed error taxonomy, retry the
//! transient failures under an explicit policy, and strip the server-assigned fields so the
//! result can be replayed as a write body unmodified.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod error;
pub mod ext;
pub mod http;
pub mod normalize;
pub mod obs;
pub mod retry;
pub mod service;
pub mod sign;

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use time;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use httpmock as _;
