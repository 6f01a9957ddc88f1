//! Deployment configuration: which service endpoint to talk to, scoped to which tenant.

// crates.io
use url::Host;
// self
use crate::{_prelude::*, auth::OrganizationId, error::ConfigError};

/// Errors raised while constructing or validating service descriptors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum ServiceDescriptorError {
	/// Endpoints must use HTTPS; loopback hosts are exempt so local test servers work.
	#[error("The service endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Endpoints carry an origin only; resource paths are appended by the client.
	#[error("The service endpoint must not carry a path, query, or fragment: {url}.")]
	NonBareEndpoint {
		/// Endpoint URL that failed validation.
		url: String,
	},
}

/// Immutable description of one policy-service deployment.
///
/// The organization identifier doubles as the signature extension: every header minted for
/// this descriptor is bound to this tenant and no other.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceDescriptor {
	/// Base endpoint every resource path is joined onto.
	pub endpoint: Url,
	/// Organization whose remote state this descriptor scopes requests to.
	pub organization: OrganizationId,
}
impl ServiceDescriptor {
	/// Creates a validated descriptor for the given endpoint and organization.
	pub fn new(
		endpoint: Url,
		organization: OrganizationId,
	) -> Result<Self, ServiceDescriptorError> {
		validate_endpoint(&endpoint)?;

		Ok(Self { endpoint, organization })
	}

	/// Joins an absolute resource path onto the base endpoint.
	pub(crate) fn resource_url(&self, path: &str) -> Result<Url, ConfigError> {
		self.endpoint.join(path).map_err(|source| ConfigError::UrlBuild { source })
	}
}

fn validate_endpoint(url: &Url) -> Result<(), ServiceDescriptorError> {
	if url.scheme() != "https" && !is_loopback(url) {
		return Err(ServiceDescriptorError::InsecureEndpoint { url: url.to_string() });
	}
	if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
		return Err(ServiceDescriptorError::NonBareEndpoint { url: url.to_string() });
	}

	Ok(())
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(Host::Domain(domain)) => domain == "localhost",
		Some(Host::Ipv4(ip)) => ip.is_loopback(),
		Some(Host::Ipv6(ip)) => ip.is_loopback(),
		None => false,
	}
}
