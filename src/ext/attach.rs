//! Header-attachment contracts that let downstream crates carry freshly minted
//! authorization headers on arbitrary HTTP clients.

// self
use crate::sign::SignedRequest;

/// Describes how to attach a [`SignedRequest`]'s header to an outbound request without
/// constraining the HTTP client type.
///
/// The trait is intentionally generic over both the request and error types so implementers
/// can integrate with any client builder (`reqwest`, `surf`, a bespoke SDK, etc.) while the
/// signing core stays free of those dependencies. Implementations must attach the header of
/// the [`SignedRequest`] they were handed and nothing older: headers are single-use.
pub trait SignRequestExt<Request, Error>
where
	Self: Send + Sync,
{
	/// Consumes (or clones) the provided request and injects the `Authorization` and
	/// `Content-Type` headers derived from the [`SignedRequest`].
	fn attach_authorization(
		&self,
		request: Request,
		signed: &SignedRequest,
	) -> Result<Request, Error>;
}
