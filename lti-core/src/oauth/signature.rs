//! Supported signature methods

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;

use super::encode::percent_encode;
use super::error::SignatureError;

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;

/// Value of `oauth_signature_method`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignatureMethod {
    /// `HMAC-SHA1`, the method LTI 1.1 requires
    #[default]
    HmacSha1,
    /// `HMAC-SHA256`
    HmacSha256,
    /// `PLAINTEXT`, the signing key itself
    Plaintext,
}

impl SignatureMethod {
    /// Wire name of the method
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureMethod::HmacSha1 => "HMAC-SHA1",
            SignatureMethod::HmacSha256 => "HMAC-SHA256",
            SignatureMethod::Plaintext => "PLAINTEXT",
        }
    }

    /// Sign a base string with the consumer and token secrets
    pub fn sign(&self, base_string: &str, consumer_secret: &str, token_secret: &str) -> String {
        let key = signing_key(consumer_secret, token_secret);
        match self {
            SignatureMethod::HmacSha1 => {
                let mut mac = HmacSha1::new_from_slice(key.as_bytes())
                    .expect("HMAC accepts keys of any length");
                mac.update(base_string.as_bytes());
                STANDARD.encode(mac.finalize().into_bytes())
            }
            SignatureMethod::HmacSha256 => {
                let mut mac = HmacSha256::new_from_slice(key.as_bytes())
                    .expect("HMAC accepts keys of any length");
                mac.update(base_string.as_bytes());
                STANDARD.encode(mac.finalize().into_bytes())
            }
            SignatureMethod::Plaintext => key,
        }
    }
}

impl fmt::Display for SignatureMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureMethod {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HMAC-SHA1" => Ok(SignatureMethod::HmacSha1),
            "HMAC-SHA256" => Ok(SignatureMethod::HmacSha256),
            "PLAINTEXT" => Ok(SignatureMethod::Plaintext),
            other => Err(SignatureError::UnknownSignatureMethod(other.to_string())),
        }
    }
}

fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
    format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    )
}
