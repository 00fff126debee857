//! Signing outbound requests as the tool

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use sha1::{Digest, Sha1};
use url::Url;
use uuid::Uuid;

use super::config::ToolCredentials;
use super::encode::signature_base_string;
use super::header::authorization_header;
use super::signature::SignatureMethod;
use super::{
    OAUTH_BODY_HASH, OAUTH_CONSUMER_KEY, OAUTH_NONCE, OAUTH_SIGNATURE, OAUTH_SIGNATURE_METHOD,
    OAUTH_TIMESTAMP, OAUTH_VERSION,
};

/// Base64 SHA-1 digest of a request body (`oauth_body_hash`)
pub fn body_hash(body: &[u8]) -> String {
    STANDARD.encode(Sha1::digest(body))
}

/// Two-legged OAuth 1.0 signer (no token)
#[derive(Debug, Clone)]
pub struct OAuthSigner {
    credentials: ToolCredentials,
    method: SignatureMethod,
}

impl OAuthSigner {
    /// Create an HMAC-SHA1 signer
    pub fn new(credentials: ToolCredentials) -> Self {
        Self {
            credentials,
            method: SignatureMethod::HmacSha1,
        }
    }

    /// Use a different signature method
    pub fn with_method(mut self, method: SignatureMethod) -> Self {
        self.method = method;
        self
    }

    /// `Authorization` header for a request with a non-form body
    pub fn authorization_for_body(&self, method: &str, url: &Url, body: &[u8]) -> String {
        let params = self.protocol_parameters_at(
            method,
            url,
            &[],
            Some(body_hash(body)),
            Utc::now().timestamp(),
            &new_nonce(),
        );
        authorization_header(&params)
    }

    /// Append protocol parameters and the signature to form parameters
    pub fn sign_form(
        &self,
        method: &str,
        url: &Url,
        params: Vec<(String, String)>,
    ) -> Vec<(String, String)> {
        self.sign_form_at(method, url, params, Utc::now().timestamp(), &new_nonce())
    }

    /// [`sign_form`](Self::sign_form) with a fixed timestamp and nonce
    pub fn sign_form_at(
        &self,
        method: &str,
        url: &Url,
        mut params: Vec<(String, String)>,
        timestamp: i64,
        nonce: &str,
    ) -> Vec<(String, String)> {
        let protocol = self.protocol_parameters_at(method, url, &params, None, timestamp, nonce);
        params.extend(protocol);
        params
    }

    /// Protocol parameters for a request, ending with `oauth_signature`
    pub fn protocol_parameters_at(
        &self,
        method: &str,
        url: &Url,
        request_params: &[(String, String)],
        body_hash: Option<String>,
        timestamp: i64,
        nonce: &str,
    ) -> Vec<(String, String)> {
        let mut protocol = vec![
            (
                OAUTH_CONSUMER_KEY.to_string(),
                self.credentials.consumer_key.clone(),
            ),
            (OAUTH_NONCE.to_string(), nonce.to_string()),
            (
                OAUTH_SIGNATURE_METHOD.to_string(),
                self.method.as_str().to_string(),
            ),
            (OAUTH_TIMESTAMP.to_string(), timestamp.to_string()),
            (OAUTH_VERSION.to_string(), "1.0".to_string()),
        ];
        if let Some(hash) = body_hash {
            protocol.push((OAUTH_BODY_HASH.to_string(), hash));
        }

        let mut signed: Vec<(String, String)> = request_params.to_vec();
        signed.extend(protocol.iter().cloned());
        let base_string = signature_base_string(method, url, &signed);
        let signature = self
            .method
            .sign(&base_string, &self.credentials.consumer_secret, "");

        protocol.push((OAUTH_SIGNATURE.to_string(), signature));
        protocol
    }
}

fn new_nonce() -> String {
    Uuid::new_v4().simple().to_string()
}
