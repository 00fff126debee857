//! Signature base string construction (RFC 5849 section 3.4.1)

use url::Url;

/// Percent-encode with the RFC 3986 unreserved set
///
/// Everything except `A-Z a-z 0-9 - . _ ~` is encoded, which is exactly the
/// set OAuth 1.0 requires.
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Base string URI: scheme and host lowercased, default port dropped, no query
pub fn base_string_uri(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}://{}:{}{}", url.scheme(), host, port, url.path()),
        None => format!("{}://{}{}", url.scheme(), host, url.path()),
    }
}

/// Encode, sort and join request parameters
pub fn normalize_parameters<'a, I>(params: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut encoded: Vec<(String, String)> = params
        .into_iter()
        .map(|(name, value)| (percent_encode(name), percent_encode(value)))
        .collect();
    encoded.sort();

    encoded
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the signature base string for a request
///
/// `params` holds the form body and protocol parameters. Query parameters are
/// taken from `url`. `oauth_signature` and `realm` are skipped wherever they
/// appear.
pub fn signature_base_string(method: &str, url: &Url, params: &[(String, String)]) -> String {
    let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let included = query
        .iter()
        .chain(params.iter())
        .filter(|(name, _)| name != super::OAUTH_SIGNATURE && name != "realm")
        .map(|(name, value)| (name.as_str(), value.as_str()));

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent_encode(&base_string_uri(url)),
        percent_encode(&normalize_parameters(included))
    )
}
