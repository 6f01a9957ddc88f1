//! Fresh per-request Hawk authorization headers.
//!
//! Signing is a pure function of the credentials, the target, and the moment the header is
//! minted. Nothing is cached between calls: two headers for the same URL minted at different
//! moments differ in timestamp or nonce, and a stale header is rejected server-side rather
//! than locally. Because no signer state exists, independent operations may sign
//! concurrently without coordination.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use rand::{Rng, distr::Alphanumeric};
use sha2::Sha256;
// self
use crate::{
	_prelude::*,
	auth::{Credentials, SigningAlgorithm},
};

const NONCE_LEN: usize = 8;
const HEADER_VERSION: &str = "1";
const DEFAULT_TLS_PORT: u16 = 443;

type HmacSha256 = Hmac<Sha256>;

/// HTTP methods the signer knows how to bind into a MAC.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestMethod {
	/// HTTP GET.
	Get,
	/// HTTP POST.
	Post,
	/// HTTP PUT.
	Put,
	/// HTTP DELETE.
	Delete,
}
impl RequestMethod {
	/// Returns the uppercase wire form used in the normalized signature input.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestMethod::Get => "GET",
			RequestMethod::Post => "POST",
			RequestMethod::Put => "PUT",
			RequestMethod::Delete => "DELETE",
		}
	}
}
impl Display for RequestMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// A target URL paired with the freshly minted header that authorizes it.
///
/// Values are scoped to a single dispatch. The client mints one inside each retry attempt
/// and never stores one across calls; reusing a value replays a stale timestamp/nonce pair
/// the service will reject.
#[derive(Clone, Debug)]
pub struct SignedRequest {
	/// Target URL the header was computed for.
	pub url: Url,
	/// HTTP method bound into the MAC.
	pub method: RequestMethod,
	/// Complete `Authorization` header value.
	pub header: String,
}

/// Mints an authorization header for one request against `url`.
///
/// `ext` is the organization-scoping extension bound into the signature input, tying the
/// header to a single tenant. The request body is never hashed; the only currently signed
/// method is GET, which carries none.
pub fn sign(
	credentials: &Credentials,
	method: RequestMethod,
	url: &Url,
	ext: &str,
) -> SignedRequest {
	let ts = OffsetDateTime::now_utc().unix_timestamp();
	let nonce = random_nonce();

	sign_at(credentials, method, url, ext, ts, &nonce)
}

fn sign_at(
	credentials: &Credentials,
	method: RequestMethod,
	url: &Url,
	ext: &str,
	ts: i64,
	nonce: &str,
) -> SignedRequest {
	let mac = compute_mac(credentials, method, url, ext, ts, nonce);
	let header = format!(
		"Hawk id=\"{}\", ts=\"{ts}\", nonce=\"{nonce}\", ext=\"{ext}\", mac=\"{mac}\"",
		credentials.user.as_ref(),
	);

	SignedRequest { url: url.clone(), method, header }
}

fn compute_mac(
	credentials: &Credentials,
	method: RequestMethod,
	url: &Url,
	ext: &str,
	ts: i64,
	nonce: &str,
) -> String {
	let normalized = normalized_string(method, url, ext, ts, nonce);

	match credentials.algorithm {
		SigningAlgorithm::Sha256 => {
			let mut mac = HmacSha256::new_from_slice(credentials.key.expose())
				.expect("HMAC accepts keys of any length.");

			mac.update(normalized.as_bytes());

			STANDARD.encode(mac.finalize().into_bytes())
		},
	}
}

/// Builds the normalized signature input.
///
/// The empty line between port and ext is the payload-hash slot, intentionally blank: GET
/// requests carry no body and the service expects no content hash for them.
fn normalized_string(method: RequestMethod, url: &Url, ext: &str, ts: i64, nonce: &str) -> String {
	let resource = match url.query() {
		Some(query) => format!("{}?{query}", url.path()),
		None => url.path().to_owned(),
	};
	let host = url.host_str().unwrap_or_default();
	let port = url.port_or_known_default().unwrap_or(DEFAULT_TLS_PORT);

	format!("hawk.{HEADER_VERSION}.header\n{ts}\n{nonce}\n{method}\n{resource}\n{host}\n{port}\n\n{ext}\n")
}

fn random_nonce() -> String {
	rand::rng().sample_iter(Alphanumeric).take(NONCE_LEN).map(char::from).collect()
}
