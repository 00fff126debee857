//! OAuth 1.0 request signing as used by LTI 1.1
//!
//! Launch requests arrive as signed form posts and outcome messages leave as
//! signed XML posts carrying an `oauth_body_hash`. Both directions share the
//! same signature base string construction.

mod config;
mod encode;
mod error;
mod header;
mod signature;
mod signer;
mod verifier;

pub use config::{OAuthConfig, ToolCredentials};
pub use encode::{base_string_uri, normalize_parameters, percent_encode, signature_base_string};
pub use error::SignatureError;
pub use header::{authorization_header, parse_authorization_header};
pub use signature::SignatureMethod;
pub use signer::{OAuthSigner, body_hash};
pub use verifier::SignatureVerifier;

/// Parameter carrying the request signature
pub const OAUTH_SIGNATURE: &str = "oauth_signature";
/// Parameter naming the signature method
pub const OAUTH_SIGNATURE_METHOD: &str = "oauth_signature_method";
/// Parameter carrying the consumer key
pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
/// Parameter carrying the request timestamp (seconds since the epoch)
pub const OAUTH_TIMESTAMP: &str = "oauth_timestamp";
/// Parameter carrying the per-request nonce
pub const OAUTH_NONCE: &str = "oauth_nonce";
/// Parameter carrying the protocol version
pub const OAUTH_VERSION: &str = "oauth_version";
/// Body hash extension parameter
pub const OAUTH_BODY_HASH: &str = "oauth_body_hash";
